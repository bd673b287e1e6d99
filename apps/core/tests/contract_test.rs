use siteswitch_core::contract::{CoreRequest, CoreResponse, EventResponse};
use siteswitch_core::controller::{Effect, UiEvent};
use siteswitch_core::hotkey::KeyEvent;
use siteswitch_core::subscriptions::Subscription;

#[test]
fn serializes_and_deserializes_event_request() {
    let request = CoreRequest::Event(UiEvent::KeyDown(KeyEvent::plain("k").with_ctrl().with_shift()));

    let encoded = serde_json::to_string(&request).unwrap();
    let decoded: CoreRequest = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, request);
}

#[test]
fn parses_host_written_event_payloads() {
    let raw = r#"{"kind":"Event","payload":{"type":"toggle_entry_menu","index":1,"space_below":42.5}}"#;
    let request: CoreRequest = serde_json::from_str(raw).unwrap();
    assert_eq!(
        request,
        CoreRequest::Event(UiEvent::ToggleEntryMenu {
            index: 1,
            space_below: 42.5
        })
    );

    let raw = r#"{"kind":"Event","payload":{"type":"activate_entry","index":0}}"#;
    let request: CoreRequest = serde_json::from_str(raw).unwrap();
    assert_eq!(
        request,
        CoreRequest::Event(UiEvent::ActivateEntry {
            index: 0,
            action: None
        })
    );
}

#[test]
fn event_response_omits_view_when_closed() {
    let response = CoreResponse::Event(EventResponse {
        effects: vec![Effect::Unsubscribe {
            subscription: Subscription::PageScrollLock,
        }],
        view: None,
    });

    let encoded = serde_json::to_string(&response).unwrap();
    assert_eq!(
        encoded,
        r#"{"kind":"Event","payload":{"effects":[{"type":"unsubscribe","subscription":"page_scroll_lock"}]}}"#
    );
}
