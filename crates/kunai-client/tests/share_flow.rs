//! End-to-end sharing flow over a recording dispatcher: absorb fetched
//! properties, query capabilities, grant and revoke access.

use std::cell::RefCell;

use kunai_client::{CollectionModel, DavCollection, Dispatcher, Shareable, TransportResult};
use kunai_rfc::rfc::dav::core::{FetchedProperty, QName, sharing_props};

#[derive(Default)]
struct RecordingDispatcher {
    bodies: RefCell<Vec<String>>,
}

impl Dispatcher for RecordingDispatcher {
    async fn post(&self, _url: &str, _headers: &[(&str, &str)], body: String) -> TransportResult<()> {
        self.bodies.borrow_mut().push(body);
        Ok(())
    }
}

const INVITE_PAYLOAD: &str = r#"<OC:invite xmlns:OC="http://owncloud.org/ns" xmlns:D="DAV:">
  <OC:user>
    <D:href>principal:principals/users/alice</D:href>
    <OC:common-name>Alice</OC:common-name>
    <OC:invite-accepted/>
    <OC:access><OC:read/></OC:access>
  </OC:user>
</OC:invite>"#;

const MODES_PAYLOAD: &str = r#"<CS:allowed-sharing-modes xmlns:CS="http://calendarserver.org/ns/">
  <CS:can-be-shared/>
  <CS:can-be-published/>
</CS:allowed-sharing-modes>"#;

#[test_log::test(tokio::test)]
async fn fetched_state_then_share_and_unshare() {
    let mut calendar = DavCollection::new(
        "https://dav.example.com/calendars/alice/team/",
        RecordingDispatcher::default(),
    );

    // A property fetch (performed elsewhere) delivers its payloads.
    calendar
        .apply_fetched_properties(vec![
            FetchedProperty::new(QName::dav("displayname"), "Team calendar"),
            FetchedProperty::new(sharing_props::invite(), INVITE_PAYLOAD),
            FetchedProperty::new(sharing_props::allowed_sharing_modes(), MODES_PAYLOAD),
        ])
        .unwrap();

    assert_eq!(calendar.display_name(), Some("Team calendar"));
    assert!(calendar.is_shareable());
    assert!(calendar.is_publishable());
    assert_eq!(calendar.shares().len(), 1);
    assert_eq!(calendar.shares()[0].common_name.as_deref(), Some("Alice"));

    // Grant bob write access, then revoke alice.
    calendar
        .share("principal:principals/users/bob", true, "team calendar")
        .await
        .unwrap();
    calendar
        .unshare("principal:principals/users/alice")
        .await
        .unwrap();

    let shares = calendar.shares();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].href, "principal:principals/users/bob");
    assert_eq!(shares[0].access, vec![QName::oc("read-write")]);

    let bodies = calendar.dispatcher().bodies.borrow();
    assert_eq!(bodies.len(), 2);
    assert!(bodies[0].contains("<OC:set>"));
    assert!(bodies[0].contains("<OC:read-write/>"));
    assert!(bodies[1].contains("<OC:remove>"));
}

#[test_log::test]
fn propfind_list_covers_sharing_extension() {
    let list = <DavCollection<RecordingDispatcher> as Shareable>::propfind_list();

    assert!(list.contains(&QName::dav("displayname")));
    assert!(list.contains(&sharing_props::invite()));
    assert!(list.contains(&sharing_props::allowed_sharing_modes()));
}
