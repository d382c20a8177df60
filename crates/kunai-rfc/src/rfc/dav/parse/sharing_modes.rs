//! Allowed-sharing-modes property payload parsing.

use quick_xml::Reader;
use quick_xml::events::Event;

use super::error::ParseResult;
use crate::rfc::dav::core::{CS_NS, Namespace, QName};

/// Parses the payload of a fetched allowed-sharing-modes property.
///
/// ## Summary
/// Each child element of the property is one capability advertised by the
/// server. Children are collected as opaque Clark-notation token strings
/// (for example `{http://calendarserver.org/ns/}can-be-shared`); the
/// vocabulary is owned by the server. The payload may or may not still be
/// wrapped in the outer `allowed-sharing-modes` element.
///
/// ## Errors
/// Returns an error if the XML is malformed or not valid UTF-8.
#[tracing::instrument(skip(xml), fields(xml_len = xml.len()))]
pub fn parse_sharing_modes(xml: &[u8]) -> ParseResult<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut namespaces: Vec<(String, String)> = Vec::new();
    let mut modes: Vec<String> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) => {
                // Collect namespace declarations
                for attr in e.attributes().flatten() {
                    let key = std::str::from_utf8(attr.key.as_ref())?;
                    let value = std::str::from_utf8(&attr.value)?;
                    if let Some(prefix) = key.strip_prefix("xmlns:") {
                        namespaces.push((prefix.to_owned(), value.to_owned()));
                    } else if key == "xmlns" {
                        namespaces.push((String::new(), value.to_owned()));
                    } else {
                        // Other attributes ignored
                    }
                }

                let local_name_bytes = e.local_name();
                let local_name = std::str::from_utf8(local_name_bytes.as_ref())?;

                if local_name == "allowed-sharing-modes" {
                    // Wrapper element, not a capability
                } else {
                    modes.push(resolve_qname(e, &namespaces)?.to_string());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(modes)
}

/// Resolves a `QName` from an element, using namespace declarations.
///
/// An unresolvable prefix falls back to the `CalendarServer` namespace,
/// where the capability vocabulary lives; the declaration may have been on
/// an ancestor outside the delivered fragment.
fn resolve_qname(
    e: &quick_xml::events::BytesStart<'_>,
    namespaces: &[(String, String)],
) -> ParseResult<QName> {
    let name_bytes = e.name();
    let name = std::str::from_utf8(name_bytes.as_ref())?.to_owned();

    let (prefix, local_name) = if let Some(colon_pos) = name.find(':') {
        (
            name[..colon_pos].to_owned(),
            name[colon_pos + 1..].to_owned(),
        )
    } else {
        (String::new(), name)
    };

    let namespace = namespaces
        .iter()
        .rev()
        .find(|(p, _)| *p == prefix)
        .map_or(CS_NS, |(_, ns)| ns.as_str());

    Ok(QName::new(
        Namespace::new(namespace.to_owned()),
        local_name,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_both_capabilities() {
        let xml = br#"<CS:allowed-sharing-modes xmlns:CS="http://calendarserver.org/ns/">
  <CS:can-be-shared/>
  <CS:can-be-published/>
</CS:allowed-sharing-modes>"#;

        let modes = parse_sharing_modes(xml).unwrap();
        assert_eq!(
            modes,
            vec![
                "{http://calendarserver.org/ns/}can-be-shared".to_owned(),
                "{http://calendarserver.org/ns/}can-be-published".to_owned(),
            ]
        );
    }

    #[test]
    fn parse_fragment_without_declarations() {
        let xml = b"<x1:can-be-shared/>";

        let modes = parse_sharing_modes(xml).unwrap();
        assert_eq!(
            modes,
            vec!["{http://calendarserver.org/ns/}can-be-shared".to_owned()]
        );
    }

    #[test]
    fn parse_foreign_capability_kept_opaque() {
        let xml = br#"<CS:allowed-sharing-modes xmlns:CS="http://calendarserver.org/ns/" xmlns:X="http://example.com/ns">
  <X:can-be-mirrored/>
</CS:allowed-sharing-modes>"#;

        let modes = parse_sharing_modes(xml).unwrap();
        assert_eq!(modes, vec!["{http://example.com/ns}can-be-mirrored".to_owned()]);
    }

    #[test]
    fn parse_empty_payload() {
        let modes = parse_sharing_modes(b"").unwrap();
        assert!(modes.is_empty());
    }
}
