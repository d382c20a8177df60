//! Share request XML serialization.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::rfc::dav::core::{DAV_NS, OC_NS, ShareRequest};

/// Serializes a share or unshare request to XML.
///
/// ## Summary
/// Converts a `ShareRequest` into the sharing-extension request body
/// POSTed against the collection URL.
///
/// ## Errors
/// Returns an error if XML writing fails or if the generated XML is not valid UTF-8
/// (which should never happen with well-formed input).
pub fn serialize_share_request(request: &ShareRequest) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());

    // XML declaration
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    // Start share element with namespaces
    let mut elem = BytesStart::new("OC:share");
    elem.push_attribute(("xmlns:OC", OC_NS));
    elem.push_attribute(("xmlns:D", DAV_NS));
    writer.write_event(Event::Start(elem))?;

    match request {
        ShareRequest::Set {
            href,
            read_write,
            summary,
        } => {
            writer.write_event(Event::Start(BytesStart::new("OC:set")))?;

            write_text_element(&mut writer, "D:href", href)?;

            if *read_write {
                writer.write_event(Event::Empty(BytesStart::new("OC:read-write")))?;
            }
            if !summary.is_empty() {
                write_text_element(&mut writer, "OC:summary", summary)?;
            }

            writer.write_event(Event::End(BytesEnd::new("OC:set")))?;
        }
        ShareRequest::Remove { href } => {
            writer.write_event(Event::Start(BytesStart::new("OC:remove")))?;
            write_text_element(&mut writer, "D:href", href)?;
            writer.write_event(Event::End(BytesEnd::new("OC:remove")))?;
        }
    }

    // End share
    writer.write_event(Event::End(BytesEnd::new("OC:share")))?;

    let result = writer.into_inner();
    String::from_utf8(result).map_err(|e| {
        tracing::error!("Generated invalid UTF-8 in share request XML: {}", e);
        quick_xml::Error::Io(std::sync::Arc::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Invalid UTF-8 in XML output",
        )))
    })
}

/// Writes a simple text element.
fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_read_only_set() {
        let request = ShareRequest::set("principal:users/alice", false, "");
        let xml = serialize_share_request(&request).unwrap();

        assert!(xml.contains("OC:share"));
        assert!(xml.contains("xmlns:OC=\"http://owncloud.org/ns\""));
        assert!(xml.contains("xmlns:D=\"DAV:\""));
        assert!(xml.contains("<OC:set>"));
        assert!(xml.contains("<D:href>principal:users/alice</D:href>"));
        assert!(!xml.contains("read-write"));
        assert!(!xml.contains("summary"));
    }

    #[test]
    fn serialize_read_write_set_with_summary() {
        let request = ShareRequest::set("principal:users/bob", true, "team calendar");
        let xml = serialize_share_request(&request).unwrap();

        let href = xml.find("<D:href>principal:users/bob</D:href>").unwrap();
        let read_write = xml.find("<OC:read-write/>").unwrap();
        let summary = xml.find("<OC:summary>team calendar</OC:summary>").unwrap();

        // set children keep document order: href, read-write, summary
        assert!(href < read_write);
        assert!(read_write < summary);
    }

    #[test]
    fn serialize_remove() {
        let request = ShareRequest::remove("principal:users/alice");
        let xml = serialize_share_request(&request).unwrap();

        assert!(xml.contains("<OC:remove>"));
        assert!(xml.contains("<D:href>principal:users/alice</D:href>"));
        assert!(!xml.contains("OC:set"));
    }

    #[test]
    fn serialize_escapes_text_content() {
        let request = ShareRequest::set("principal:users/alice", true, "a <b> & c");
        let xml = serialize_share_request(&request).unwrap();

        assert!(xml.contains("a &lt;b&gt; &amp; c"));
    }
}
