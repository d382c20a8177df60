//! Fetched-property payload parsing.
//!
//! This module parses the XML payloads a property fetch delivers for the
//! sharing extension, using the `quick-xml` crate.

mod error;
mod invite;
mod sharing_modes;


pub use error::{ParseError, ParseResult};
pub use invite::parse_invite;
pub use sharing_modes::parse_sharing_modes;
