//! The base collection entity.

use std::collections::HashMap;

use kunai_rfc::error::{RfcError, RfcResult};
use kunai_rfc::rfc::dav::core::{FetchedProperty, QName, Share, dav_props};

use crate::sharing::Shareable;
use crate::transport::Dispatcher;

/// Capabilities a collection entity must expose for protocol behavior to
/// compose over it.
///
/// Capability traits stand in for a fixed inheritance chain: anything that
/// satisfies this contract picks up the sharing operations through the
/// blanket [`Shareable`] implementation.
pub trait CollectionModel {
    /// The request-execution primitive in use.
    type Dispatch: Dispatcher;

    /// The collection's own URL, target of sharing requests.
    fn url(&self) -> &str;

    /// The request-execution primitive.
    fn dispatcher(&self) -> &Self::Dispatch;

    /// Cached share grants, as last communicated to the server.
    fn shares(&self) -> &[Share];

    /// Mutable access to the cached share grants.
    fn shares_mut(&mut self) -> &mut Vec<Share>;

    /// Server-advertised sharing capabilities; `None` until a fetch has
    /// populated them.
    fn allowed_sharing_modes(&self) -> Option<&[String]>;

    /// Replaces the server-advertised sharing capabilities.
    fn set_allowed_sharing_modes(&mut self, modes: Vec<String>);

    /// Properties every fetch of this collection type requests.
    fn base_propfind_list() -> Vec<QName>
    where
        Self: Sized;
}

/// A remote DAV collection with a cached view of its fetched properties.
#[derive(Debug)]
pub struct DavCollection<D> {
    url: String,
    dispatcher: D,
    display_name: Option<String>,
    shares: Vec<Share>,
    allowed_sharing_modes: Option<Vec<String>>,
    /// Fetched properties nothing maps to a typed field.
    props: HashMap<QName, String>,
}

impl<D: Dispatcher> DavCollection<D> {
    /// Creates a collection handle for the given URL.
    ///
    /// Share state and capabilities start unpopulated; a property fetch
    /// delivers them through [`Self::apply_fetched_properties`].
    #[must_use]
    pub fn new(url: impl Into<String>, dispatcher: D) -> Self {
        Self {
            url: url.into(),
            dispatcher,
            display_name: None,
            shares: Vec::new(),
            allowed_sharing_modes: None,
            props: HashMap::new(),
        }
    }

    /// Display name, if a fetch has delivered one.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Raw payload of an untyped fetched property.
    #[must_use]
    pub fn property(&self, name: &QName) -> Option<&str> {
        self.props.get(name).map(String::as_str)
    }

    /// Absorbs a batch of fetched property payloads into the cached state.
    ///
    /// Sharing properties replace the cached grants and capabilities
    /// wholesale; `displayname` fills the typed field; everything else is
    /// retained raw.
    ///
    /// ## Errors
    /// Returns an error when the payload of a typed property does not
    /// parse. Payloads absorbed before the failing one are kept.
    pub fn apply_fetched_properties(&mut self, fetched: Vec<FetchedProperty>) -> RfcResult<()> {
        for prop in fetched {
            if self.absorb_sharing_property(&prop)? {
                continue;
            }

            if prop.name == dav_props::displayname() {
                let text = quick_xml::escape::unescape(&prop.raw)
                    .map_err(|err| RfcError::ParseError(err.to_string()))?;
                self.display_name = Some(text.into_owned());
            } else {
                self.props.insert(prop.name, prop.raw);
            }
        }
        Ok(())
    }
}

impl<D: Dispatcher> CollectionModel for DavCollection<D> {
    type Dispatch = D;

    fn url(&self) -> &str {
        &self.url
    }

    fn dispatcher(&self) -> &Self::Dispatch {
        &self.dispatcher
    }

    fn shares(&self) -> &[Share] {
        &self.shares
    }

    fn shares_mut(&mut self) -> &mut Vec<Share> {
        &mut self.shares
    }

    fn allowed_sharing_modes(&self) -> Option<&[String]> {
        self.allowed_sharing_modes.as_deref()
    }

    fn set_allowed_sharing_modes(&mut self, modes: Vec<String>) {
        self.allowed_sharing_modes = Some(modes);
    }

    fn base_propfind_list() -> Vec<QName> {
        vec![
            dav_props::displayname(),
            dav_props::resourcetype(),
            dav_props::owner(),
            dav_props::sync_token(),
        ]
    }
}
