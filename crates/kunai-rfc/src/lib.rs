//! Wire-format types and XML codec for the DAV sharing extension:
//! namespaces and qualified names, the share data model, request-body
//! building, and fetched-property payload parsing.

pub mod error;
pub mod rfc;
