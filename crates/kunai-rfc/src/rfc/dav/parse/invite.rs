//! Invite property payload parsing.

use quick_xml::Reader;
use quick_xml::events::Event;

use super::error::ParseResult;
use crate::rfc::dav::core::{QName, Share};

/// Parses the payload of a fetched invite property into share grants.
///
/// ## Summary
/// The payload contains one `user` element per grant, each carrying an
/// `href`, an optional `common-name`, an `access` element with a `read` or
/// `read-write` marker, and an `invite-accepted` or `invite-declined`
/// marker. The payload may or may not still be wrapped in the outer
/// `invite` element.
///
/// A `user` entry without an `href` is skipped with a warning; unknown
/// children are ignored.
///
/// ## Errors
/// Returns an error if the XML is malformed or not valid UTF-8.
#[tracing::instrument(skip(xml), fields(xml_len = xml.len()))]
pub fn parse_invite(xml: &[u8]) -> ParseResult<Vec<Share>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut shares: Vec<Share> = Vec::new();

    let mut in_user = false;
    let mut in_access = false;
    let mut text_target: Option<&'static str> = None;
    let mut text_buf = String::new();

    let mut href: Option<String> = None;
    let mut common_name: Option<String> = None;
    let mut access: Vec<QName> = Vec::new();
    let mut invite_accepted = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) => {
                let local_name_bytes = e.local_name();
                let local_name = std::str::from_utf8(local_name_bytes.as_ref())?.to_owned();

                match local_name.as_str() {
                    "user" => {
                        in_user = true;
                        href = None;
                        common_name = None;
                        access = Vec::new();
                        invite_accepted = false;
                    }
                    "href" if in_user => {
                        text_target = Some("href");
                        text_buf.clear();
                    }
                    "common-name" if in_user => {
                        text_target = Some("common-name");
                        text_buf.clear();
                    }
                    "access" if in_user => {
                        in_access = true;
                    }
                    "read" if in_access => {
                        access.push(QName::oc("read"));
                    }
                    "read-write" if in_access => {
                        access.push(QName::oc("read-write"));
                    }
                    "invite-accepted" if in_user => {
                        invite_accepted = true;
                    }
                    "invite-declined" if in_user => {
                        invite_accepted = false;
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                if text_target.is_some() {
                    let decoded = reader.decoder().decode(e.as_ref())?;
                    text_buf.push_str(&decoded);
                }
            }
            Ok(Event::End(ref e)) => {
                let local_name_bytes = e.local_name();
                let local_name = std::str::from_utf8(local_name_bytes.as_ref())?;

                match local_name {
                    "user" => {
                        in_user = false;
                        if let Some(href) = href.take() {
                            shares.push(Share {
                                href,
                                access: std::mem::take(&mut access),
                                common_name: common_name.take(),
                                invite_accepted,
                            });
                        } else {
                            tracing::warn!("Skipping invite user entry without href");
                        }
                    }
                    "href" => {
                        if text_target == Some("href") {
                            href = Some(std::mem::take(&mut text_buf));
                            text_target = None;
                        }
                    }
                    "common-name" => {
                        if text_target == Some("common-name") {
                            common_name = Some(std::mem::take(&mut text_buf));
                            text_target = None;
                        }
                    }
                    "access" => {
                        in_access = false;
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(shares)
}
