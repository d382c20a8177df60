//! Client-side glue for the DAV sharing extension: the transport seam,
//! the base collection entity, and the shareable capability.

pub mod collection;
pub mod error;
pub mod sharing;
pub mod transport;


pub use collection::{CollectionModel, DavCollection};
pub use error::{TransportError, TransportResult};
pub use sharing::Shareable;
pub use transport::{Dispatcher, ReqwestDispatcher};
