//! Debounced filtering driven through the event handler on a virtual clock.

mod common;

use common::FakeHost;
use pantry::request::{Method, Slot};
use pantry::{Event, InputMode};
use pretty_assertions::assert_eq;

fn query_text(url: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    let (_, value) = url::form_urlencoded::parse(query.as_bytes()).find(|(key, _)| key == "equalTo")?;
    serde_json::from_str(&value).ok()
}

#[test]
fn initial_load_waits_for_permissions_and_debounce() {
    let mut host = FakeHost::new();
    host.advance(10_000);
    assert!(host.take_requests().is_empty());

    host.dispatch(Event::PermissionsGranted);
    host.advance(499);
    assert!(host.take_requests().is_empty());

    host.advance(1);
    let request = host.take_single_request();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.url, "http://127.0.0.1:9000/ingredients.json");
}

#[test]
fn burst_of_changes_issues_one_query_after_the_last() {
    let mut host = FakeHost::mounted();
    let start = host.now();

    host.set_filter("a");
    host.advance_to(start + 100);
    host.set_filter("ab");
    host.advance_to(start + 700);
    host.set_filter("ab");
    host.advance_to(start + 5_000);

    let sent = host.take_requests();
    assert_eq!(sent.len(), 1, "{sent:?}");
    let (at, request) = &sent[0];
    assert!(*at >= start + 1_200);
    assert_eq!(query_text(&request.url), Some("ab".to_string()));
}

#[test]
fn typing_through_filter_mode_collapses_into_one_query() {
    let mut host = FakeHost::mounted();
    host.dispatch(Event::FilterMode);
    assert_eq!(host.state.input_mode, InputMode::Filter);

    host.type_text("salt");
    host.advance(500);

    let request = host.take_single_request();
    assert_eq!(request.context.slot, Slot::Query);
    assert_eq!(query_text(&request.url), Some("salt".to_string()));
}

#[test]
fn reverting_to_old_text_still_queries_latest() {
    let mut host = FakeHost::mounted();
    host.set_filter("Salt");
    host.advance(500);
    let salt = host.take_single_request();

    host.set_filter("Sugar");
    host.advance(200);
    host.set_filter("Salt");
    host.advance(500);
    let again = host.take_single_request();

    assert_eq!(query_text(&again.url), Some("Salt".to_string()));
    assert_ne!(salt.context.sequence, again.context.sequence);
}

#[test]
fn result_for_outdated_text_is_not_applied() {
    let mut host = FakeHost::mounted();
    host.set_filter("Salt");
    host.advance(500);
    let request = host.take_single_request();

    host.set_filter("Sugar");
    host.respond(&request, 200, r#"{"k1":{"title":"Salt","amount":1}}"#);

    assert!(host.titles().is_empty());
    assert!(!host.state.coordinator.is_pending(Slot::Query));
}

#[test]
fn superseded_query_completion_is_dropped() {
    let mut host = FakeHost::mounted();
    host.set_filter("Salt");
    host.advance(500);
    let first = host.take_single_request();

    host.set_filter("Sugar");
    host.advance(500);
    let second = host.take_single_request();

    host.respond(&second, 200, r#"{"k2":{"title":"Sugar","amount":2}}"#);
    assert!(!host.respond(&first, 200, r#"{"k1":{"title":"Salt","amount":1}}"#));

    assert_eq!(host.titles(), vec!["Sugar".to_string()]);
}

#[test]
fn clearing_filter_reloads_everything() {
    let mut host = FakeHost::mounted();
    host.set_filter("Salt");
    host.advance(500);
    let filtered = host.take_single_request();
    host.respond(&filtered, 200, r#"{"k1":{"title":"Salt","amount":1}}"#);

    host.set_filter("");
    host.advance(500);
    let all = host.take_single_request();
    assert_eq!(all.url, "http://127.0.0.1:9000/ingredients.json");

    host.respond(
        &all,
        200,
        r#"{"k1":{"title":"Salt","amount":1},"k2":{"title":"Flour","amount":"3"}}"#,
    );
    assert_eq!(host.titles(), vec!["Salt".to_string(), "Flour".to_string()]);
}

#[test]
fn teardown_cancels_armed_timer() {
    let mut host = FakeHost::mounted();
    host.set_filter("Salt");
    host.dispatch(Event::Teardown);
    host.advance(1_000);
    assert!(host.take_requests().is_empty());
}
