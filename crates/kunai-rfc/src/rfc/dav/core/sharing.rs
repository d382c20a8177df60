//! Sharing extension data model.
//!
//! A `Share` is one grant of access to a principal; a `ShareRequest` is the
//! body of a share or unshare POST against the collection URL.

use super::namespace::QName;

/// Access level of a share grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareAccess {
    /// Read-only access.
    Read,
    /// Read-write access.
    ReadWrite,
}

impl ShareAccess {
    /// Maps the `writeable` flag of a share call to an access level.
    #[must_use]
    pub fn from_writeable(writeable: bool) -> Self {
        if writeable { Self::ReadWrite } else { Self::Read }
    }

    /// Returns the access-level token for this level.
    #[must_use]
    pub fn token(self) -> QName {
        match self {
            Self::Read => QName::oc("read"),
            Self::ReadWrite => QName::oc("read-write"),
        }
    }
}

/// One grant of access to a principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    /// Principal identifier (scheme/URI form), unique within a collection.
    pub href: String,
    /// Access-level tokens. Locally written grants carry exactly one.
    pub access: Vec<QName>,
    /// Display name of the principal. Only ever populated from a fetch.
    pub common_name: Option<String>,
    /// Whether the invite was accepted. Local grants assume `true`.
    pub invite_accepted: bool,
}

impl Share {
    /// Creates the local record of a freshly granted share.
    ///
    /// The server has only acknowledged the POST at this point; acceptance
    /// is assumed, not confirmed.
    #[must_use]
    pub fn granted(href: impl Into<String>, access: ShareAccess) -> Self {
        Self {
            href: href.into(),
            access: vec![access.token()],
            common_name: None,
            invite_accepted: true,
        }
    }
}

/// Body of a share or unshare POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareRequest {
    /// Grant (or re-grant) access to a principal.
    Set {
        /// Principal identifier.
        href: String,
        /// Whether to grant read-write access.
        read_write: bool,
        /// Human-readable summary; omitted from the body when empty.
        summary: String,
    },
    /// Revoke access from a principal.
    Remove {
        /// Principal identifier.
        href: String,
    },
}

impl ShareRequest {
    /// Creates a grant request.
    #[must_use]
    pub fn set(href: impl Into<String>, read_write: bool, summary: impl Into<String>) -> Self {
        Self::Set {
            href: href.into(),
            read_write,
            summary: summary.into(),
        }
    }

    /// Creates a revocation request.
    #[must_use]
    pub fn remove(href: impl Into<String>) -> Self {
        Self::Remove { href: href.into() }
    }

    /// Returns the principal this request targets.
    #[must_use]
    pub fn href(&self) -> &str {
        match self {
            Self::Set { href, .. } | Self::Remove { href } => href,
        }
    }
}

/// Property and capability names of the sharing extension.
pub mod sharing_props {
    use super::QName;

    /// The property carrying the current share grants.
    pub fn invite() -> QName {
        QName::oc("invite")
    }

    /// The property carrying the server-advertised sharing capabilities.
    pub fn allowed_sharing_modes() -> QName {
        QName::cs("allowed-sharing-modes")
    }

    /// Capability token: the collection can be shared with principals.
    pub fn can_be_shared() -> QName {
        QName::cs("can-be-shared")
    }

    /// Capability token: the collection can be published.
    pub fn can_be_published() -> QName {
        QName::cs("can-be-published")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_from_writeable() {
        assert_eq!(ShareAccess::from_writeable(false), ShareAccess::Read);
        assert_eq!(ShareAccess::from_writeable(true), ShareAccess::ReadWrite);
    }

    #[test]
    fn access_tokens() {
        assert_eq!(
            ShareAccess::Read.token().to_string(),
            "{http://owncloud.org/ns}read"
        );
        assert_eq!(
            ShareAccess::ReadWrite.token().to_string(),
            "{http://owncloud.org/ns}read-write"
        );
    }

    #[test]
    fn granted_share_is_optimistic() {
        let share = Share::granted("principal:users/alice", ShareAccess::Read);
        assert_eq!(share.href, "principal:users/alice");
        assert_eq!(share.access, vec![QName::oc("read")]);
        assert!(share.common_name.is_none());
        assert!(share.invite_accepted);
    }

    #[test]
    fn request_href() {
        let set = ShareRequest::set("principal:users/bob", true, "team calendar");
        assert_eq!(set.href(), "principal:users/bob");

        let remove = ShareRequest::remove("principal:users/bob");
        assert_eq!(remove.href(), "principal:users/bob");
    }
}
