//! The shareable capability.
//!
//! [`Shareable`] extends any [`CollectionModel`] with the sharing
//! extension: granting and revoking access, capability queries, and the
//! extra properties a fetch must request. Mutation of the cached grants is
//! optimistic: it happens strictly after the server acknowledged the POST
//! and is never confirmed by a re-fetch.

use kunai_core::constants::CONTENT_TYPE_XML;
use kunai_rfc::error::RfcResult;
use kunai_rfc::rfc::dav::build::serialize_share_request;
use kunai_rfc::rfc::dav::core::{
    FetchedProperty, QName, Share, ShareAccess, ShareRequest, sharing_props,
};
use kunai_rfc::rfc::dav::parse::{parse_invite, parse_sharing_modes};

use crate::collection::CollectionModel;
use crate::error::TransportResult;
use crate::transport::Dispatcher;

/// Sharing operations over any collection capability.
pub trait Shareable: CollectionModel {
    /// Shares the collection with a principal.
    ///
    /// Grants read-only access unless `writeable` is set; `summary` is
    /// omitted from the request when empty. Re-sharing an already shared
    /// principal updates the cached access level in place. The principal
    /// scheme is forwarded to the server as given, without validation.
    ///
    /// ## Errors
    /// Propagates the transport error unchanged. The cached grants are
    /// untouched on failure.
    #[allow(async_fn_in_trait)]
    async fn share(
        &mut self,
        principal_scheme: &str,
        writeable: bool,
        summary: &str,
    ) -> TransportResult<()> {
        tracing::debug!(
            url = self.url(),
            principal = principal_scheme,
            writeable,
            "Sharing collection"
        );

        let request = ShareRequest::set(principal_scheme, writeable, summary);
        let body = serialize_share_request(&request)?;
        self.dispatcher()
            .post(self.url(), &[("Content-Type", CONTENT_TYPE_XML)], body)
            .await?;

        let access = ShareAccess::from_writeable(writeable);
        if let Some(existing) = self
            .shares_mut()
            .iter_mut()
            .find(|share| share.href == principal_scheme)
        {
            existing.access = vec![access.token()];
        } else {
            let share = Share::granted(principal_scheme, access);
            self.shares_mut().push(share);
        }

        Ok(())
    }

    /// Unshares the collection from a principal.
    ///
    /// Revoking a principal that holds no grant succeeds and leaves the
    /// cached grants unchanged.
    ///
    /// ## Errors
    /// Propagates the transport error unchanged. The cached grants are
    /// untouched on failure.
    #[allow(async_fn_in_trait)]
    async fn unshare(&mut self, principal_scheme: &str) -> TransportResult<()> {
        tracing::debug!(
            url = self.url(),
            principal = principal_scheme,
            "Unsharing collection"
        );

        let request = ShareRequest::remove(principal_scheme);
        let body = serialize_share_request(&request)?;
        self.dispatcher()
            .post(self.url(), &[("Content-Type", CONTENT_TYPE_XML)], body)
            .await?;

        self.shares_mut()
            .retain(|share| share.href != principal_scheme);

        Ok(())
    }

    /// Returns whether the server advertises this collection as shareable.
    ///
    /// `false` both when the capability is denied and when capability data
    /// has not been fetched yet; the server gives no way to tell the two
    /// apart.
    fn is_shareable(&self) -> bool {
        contains_mode(self.allowed_sharing_modes(), &sharing_props::can_be_shared())
    }

    /// Returns whether the server advertises this collection as publishable.
    fn is_publishable(&self) -> bool {
        contains_mode(
            self.allowed_sharing_modes(),
            &sharing_props::can_be_published(),
        )
    }

    /// Properties a fetch of a shareable collection requests: the base
    /// list plus the invite and allowed-sharing-modes properties.
    fn propfind_list() -> Vec<QName>
    where
        Self: Sized,
    {
        let mut list = Self::base_propfind_list();
        list.push(sharing_props::invite());
        list.push(sharing_props::allowed_sharing_modes());
        list
    }

    /// Absorbs one fetched property payload if it belongs to the sharing
    /// extension, returning whether it was consumed.
    ///
    /// The invite payload replaces the cached grants wholesale.
    ///
    /// ## Errors
    /// Returns an error when the payload does not parse; the cached state
    /// is left as it was.
    fn absorb_sharing_property(&mut self, prop: &FetchedProperty) -> RfcResult<bool> {
        if prop.name == sharing_props::invite() {
            *self.shares_mut() = parse_invite(prop.raw.as_bytes())?;
            Ok(true)
        } else if prop.name == sharing_props::allowed_sharing_modes() {
            self.set_allowed_sharing_modes(parse_sharing_modes(prop.raw.as_bytes())?);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

impl<T: CollectionModel> Shareable for T {}

fn contains_mode(modes: Option<&[String]>, token: &QName) -> bool {
    modes.is_some_and(|modes| {
        let token = token.to_string();
        modes.iter().any(|mode| *mode == token)
    })
}
