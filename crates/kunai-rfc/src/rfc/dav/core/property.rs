//! Fetched property payloads.

use super::namespace::QName;

/// One property as delivered by a property fetch: its qualified name and
/// the raw inner XML of the property element. Interpretation is left to
/// whoever absorbs the payload.
#[derive(Debug, Clone)]
pub struct FetchedProperty {
    /// The property name.
    pub name: QName,
    /// Raw inner XML of the property element.
    pub raw: String,
}

impl FetchedProperty {
    /// Creates a fetched property payload.
    #[must_use]
    pub fn new(name: QName, raw: impl Into<String>) -> Self {
        Self {
            name,
            raw: raw.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetched_property_keeps_raw_payload() {
        let prop = FetchedProperty::new(QName::dav("displayname"), "Team calendar");
        assert_eq!(prop.name.local_name(), "displayname");
        assert_eq!(prop.raw, "Team calendar");
    }
}
