//! Core types for the sharing extension XML vocabulary.

mod namespace;
mod property;
mod sharing;

pub use namespace::{CS_NS, DAV_NS, Namespace, OC_NS, QName, dav_props};
pub use property::FetchedProperty;
pub use sharing::{Share, ShareAccess, ShareRequest, sharing_props};
