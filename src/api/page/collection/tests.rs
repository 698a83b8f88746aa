use std::{
    collections::VecDeque,
    ops::Range,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Notify;

use crate::api::{
    models::{event::Event, user::User},
    rest::error::RestApiError,
};

use super::*;

struct MockTransport {
    responses: Mutex<VecDeque<Result<Option<Value>, RestApiError>>>,
    calls: Mutex<Vec<(String, RequestParams)>>,
    entered: Option<Arc<Notify>>,
    gate: Option<Arc<Notify>>,
}

impl MockTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            entered: None,
            gate: None,
        })
    }

    /// Transport that signals `entered` when a request arrives and holds the
    /// response back until `gate` is notified.
    fn gated() -> (Arc<Self>, Arc<Notify>, Arc<Notify>) {
        let entered = Arc::new(Notify::new());
        let gate = Arc::new(Notify::new());

        let transport = Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            entered: Some(entered.clone()),
            gate: Some(gate.clone()),
        });

        (transport, entered, gate)
    }

    fn push(&self, response: Result<Option<Value>, RestApiError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn calls(&self) -> Vec<(String, RequestParams)> {
        self.calls.lock().unwrap().clone()
    }

    fn param(&self, call: usize, key: &str) -> Option<String> {
        self.calls().get(call)?.1.get(key).cloned()
    }
}

#[async_trait]
impl PageTransport for MockTransport {
    async fn get(&self, path: &str, params: &RequestParams) -> Result<Option<Value>, RestApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), params.clone()));

        if let Some(entered) = &self.entered {
            entered.notify_one();
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None))
    }
}

#[derive(Debug, PartialEq, Clone)]
enum DelegateCall {
    PageLoaded(usize),
    RangeChanged(Range<usize>),
    LoadFailed(&'static str),
}

#[derive(Default)]
struct RecordingDelegate {
    calls: Mutex<Vec<DelegateCall>>,
}

impl RecordingDelegate {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn calls(&self) -> Vec<DelegateCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl<T> PageCollectionDelegate<T> for RecordingDelegate {
    fn page_loaded(&self, batch: &[T]) {
        self.calls
            .lock()
            .unwrap()
            .push(DelegateCall::PageLoaded(batch.len()));
    }

    fn range_changed(&self, range: Range<usize>) {
        self.calls
            .lock()
            .unwrap()
            .push(DelegateCall::RangeChanged(range));
    }

    fn load_failed(&self, error: &PageError) {
        let tag = match error {
            PageError::Transport(_) => "transport",
            PageError::MalformedResponse(_) => "malformed",
        };
        self.calls.lock().unwrap().push(DelegateCall::LoadFailed(tag));
    }
}

fn event_doc(id: u64, name: &str) -> Value {
    json!({ "id": id, "name": name })
}

fn events_page(events: &[Value]) -> Value {
    json!({ "response": { "events": events } })
}

fn events_page_with_ids(ids: Range<u64>) -> Value {
    let events: Vec<Value> = ids.map(|id| event_doc(id, &format!("event {id}"))).collect();
    events_page(&events)
}

fn user_doc(id: u64, name: &str) -> Value {
    json!({ "id": id, "name": name, "email": format!("{name}@barlink.app") })
}

fn users_page(users: &[Value]) -> Value {
    json!({ "response": { "users": users } })
}

#[tokio::test]
async fn test_load_appends_records_in_arrival_order() {
    let transport = MockTransport::new();
    transport.push(Ok(Some(events_page(&[
        event_doc(1, "Opening Night"),
        event_doc(2, "Karaoke"),
        event_doc(3, "Quiz"),
    ]))));
    transport.push(Ok(Some(events_page(&[
        event_doc(4, "Live Jazz"),
        event_doc(5, "Salsa"),
    ]))));

    let collection = PageCollection::<Event>::events(transport.clone());

    assert!(collection.load().await);
    assert_eq!(collection.count(), 3);

    assert!(collection.load().await);
    assert_eq!(collection.count(), 5);

    let ids: Vec<u64> = collection.objects().iter().map(Event::id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    assert_eq!(transport.calls().len(), 2);
    assert_eq!(collection.get(3).map(|event| event.id()), Some(4));
    assert!(collection.get(5).is_none());
    assert!(!collection.is_empty());
}

#[tokio::test]
async fn test_concurrent_loads_share_a_single_request() {
    let (transport, entered, gate) = MockTransport::gated();
    transport.push(Ok(Some(events_page(&[event_doc(1, "Opening Night")]))));

    let collection = Arc::new(PageCollection::<Event>::events(transport.clone()));

    let running = {
        let collection = collection.clone();
        tokio::spawn(async move { collection.load().await })
    };

    entered.notified().await;
    assert!(collection.is_loading());

    // Re-entrant call while the first request is out.
    assert!(!collection.load().await);

    gate.notify_one();
    assert!(running.await.unwrap());

    assert_eq!(transport.calls().len(), 1);
    assert_eq!(collection.count(), 1);
    assert!(!collection.is_loading());
}

#[tokio::test]
async fn test_offset_count_strategy_reports_accumulated_count() {
    let transport = MockTransport::new();
    transport.push(Ok(Some(events_page_with_ids(1..4))));
    transport.push(Ok(Some(events_page_with_ids(4..6))));
    transport.push(Ok(Some(events_page(&[]))));

    let collection = PageCollection::<Event>::events(transport.clone());

    collection.load().await;
    collection.load().await;
    collection.load().await;

    assert_eq!(transport.param(0, "per_page").as_deref(), Some("20"));
    assert_eq!(transport.param(0, "page").as_deref(), Some("0"));
    assert_eq!(transport.param(1, "page").as_deref(), Some("3"));
    assert_eq!(transport.param(2, "page").as_deref(), Some("5"));
}

#[tokio::test]
async fn test_last_id_strategy_uses_newest_accumulated_record() {
    let transport = MockTransport::new();
    transport.push(Ok(Some(users_page(&[
        user_doc(7, "ana"),
        user_doc(12, "bruno"),
        user_doc(9, "carla"),
    ]))));
    transport.push(Ok(Some(users_page(&[user_doc(15, "dora")]))));

    let collection = PageCollection::<User>::user_search(transport.clone());

    collection.load().await;
    collection.load().await;

    // The cursor is the id of the last accumulated record, not the largest.
    assert_eq!(transport.param(0, "since").as_deref(), Some("0"));
    assert_eq!(transport.param(1, "since").as_deref(), Some("9"));
}

#[tokio::test]
async fn test_key_path_failure_keeps_accumulated_records() {
    let transport = MockTransport::new();
    transport.push(Ok(Some(events_page_with_ids(1..4))));
    transport.push(Ok(Some(json!({ "unexpected": [] }))));

    let delegate = RecordingDelegate::new();
    let collection = PageCollection::<Event>::events(transport.clone());
    collection.set_delegate(&delegate);

    collection.load().await;
    assert!(collection.load().await);

    assert_eq!(collection.count(), 3);
    assert!(!collection.is_loading());
    assert_eq!(
        delegate.calls().last(),
        Some(&DelegateCall::LoadFailed("malformed"))
    );
}

#[tokio::test]
async fn test_invalid_records_are_dropped_silently() {
    let transport = MockTransport::new();
    transport.push(Ok(Some(events_page(&[
        event_doc(1, "Opening Night"),
        json!({ "name": "missing id" }),
        event_doc(3, "Quiz"),
    ]))));
    transport.push(Ok(Some(events_page(&[]))));

    let delegate = RecordingDelegate::new();
    let collection = PageCollection::<Event>::events(transport.clone());
    collection.set_delegate(&delegate);

    collection.load().await;

    assert_eq!(collection.count(), 2);
    assert_eq!(
        delegate.calls(),
        vec![DelegateCall::PageLoaded(2), DelegateCall::RangeChanged(0..2)]
    );

    // The offset advances by the merged count, not the raw array length.
    collection.load().await;
    assert_eq!(transport.param(1, "page").as_deref(), Some("2"));
}

#[tokio::test]
async fn test_filter_builds_view_without_fetching() {
    let transport = MockTransport::new();
    transport.push(Ok(Some(events_page(&[
        event_doc(1, "Rooftop Party"),
        event_doc(2, "Karaoke"),
        event_doc(3, "rooftop cinema"),
        event_doc(4, "Quiz"),
    ]))));

    let collection = PageCollection::<Event>::events(transport.clone());
    collection.load().await;

    let matches = collection.filter("ROOFTOP").await;
    assert_eq!(matches, 2);
    assert_eq!(transport.calls().len(), 1);

    // The filtered view only fronts record access while searching.
    assert_eq!(collection.count(), 4);

    collection.set_searching(true);
    assert!(collection.is_searching());
    assert_eq!(collection.count(), 2);
    assert_eq!(collection.get(1).map(|event| event.id()), Some(3));
    assert!(!collection.should_load_next(1));

    collection.set_searching(false);
    assert_eq!(collection.count(), 4);
    assert_eq!(collection.get(1).map(|event| event.id()), Some(2));
}

#[tokio::test]
async fn test_clean_resets_records_and_offset() {
    let transport = MockTransport::new();
    transport.push(Ok(Some(events_page_with_ids(1..4))));
    transport.push(Ok(Some(events_page_with_ids(4..6))));

    let collection = PageCollection::<Event>::events(transport.clone());
    collection.load().await;
    collection.filter("event").await;

    collection.clean();

    assert_eq!(collection.count(), 0);
    collection.set_searching(true);
    assert_eq!(collection.count(), 0);
    collection.set_searching(false);

    assert!(collection.load().await);
    assert_eq!(transport.param(1, "page").as_deref(), Some("0"));
    assert_eq!(collection.count(), 2);
}

#[tokio::test]
async fn test_page_progress_and_next_page_trigger() {
    let transport = MockTransport::new();
    transport.push(Ok(Some(events_page_with_ids(1..21))));
    transport.push(Ok(Some(events_page_with_ids(21..26))));

    let collection = PageCollection::<Event>::events(transport.clone());
    assert_eq!(collection.page_size(), 20);
    assert_eq!(collection.pages_loaded(), 0);
    assert!(!collection.should_load_next(0));

    // Full page of 20.
    collection.load().await;
    assert_eq!(collection.count(), 20);
    assert_eq!(collection.pages_loaded(), 1);
    assert!(collection.should_load_next(19));
    assert!(!collection.should_load_next(10));

    // Short page of 5.
    collection.load().await;
    assert_eq!(collection.count(), 25);
    assert_eq!(collection.pages_loaded(), 2);
    assert_eq!(transport.param(1, "page").as_deref(), Some("20"));
    assert!(collection.should_load_next(24));
    assert!(!collection.should_load_next(19));
}

#[tokio::test]
async fn test_static_params_override_reserved_keys() {
    let transport = MockTransport::new();
    transport.push(Ok(Some(events_page(&[]))));

    let collection = PageCollection::<Event>::events(transport.clone());
    collection.insert_param("per_page", "50");
    collection.insert_param("expand", "full");

    collection.load().await;

    assert_eq!(transport.param(0, "per_page").as_deref(), Some("50"));
    assert_eq!(transport.param(0, "expand").as_deref(), Some("full"));
}

#[tokio::test]
async fn test_scope_id_is_sent_once_set() {
    let transport = MockTransport::new();
    transport.push(Ok(Some(events_page(&[]))));
    transport.push(Ok(Some(events_page(&[]))));

    let collection = PageCollection::<Event>::events(transport.clone());

    collection.load().await;
    assert_eq!(transport.param(0, "place_id"), None);

    collection.set_scope_id(42);
    collection.load().await;
    assert_eq!(transport.param(1, "place_id").as_deref(), Some("42"));
    assert_eq!(collection.scope_id(), 42);
}

#[tokio::test]
async fn test_delegate_receives_page_then_range() {
    let transport = MockTransport::new();
    transport.push(Ok(Some(events_page_with_ids(1..4))));
    transport.push(Ok(Some(events_page_with_ids(4..6))));
    transport.push(Err(RestApiError::UrlParse("bad".to_string())));

    let delegate = RecordingDelegate::new();
    let collection = PageCollection::<Event>::events(transport.clone());
    collection.set_delegate(&delegate);

    collection.load().await;
    collection.load().await;
    collection.load().await;

    assert_eq!(
        delegate.calls(),
        vec![
            DelegateCall::PageLoaded(3),
            DelegateCall::RangeChanged(0..3),
            DelegateCall::PageLoaded(2),
            DelegateCall::RangeChanged(3..5),
            DelegateCall::LoadFailed("transport"),
        ]
    );
}

#[tokio::test]
async fn test_load_without_transport_is_a_no_op() {
    let collection = PageCollection::<Event>::new(PagePreset::barlink(
        "/v1/events",
        OffsetStrategy::ByOffsetCount,
    ));

    assert!(!collection.load().await);
    assert_eq!(collection.count(), 0);
    assert!(!collection.is_loading());
}

#[tokio::test]
async fn test_missing_payload_is_a_malformed_response() {
    let transport = MockTransport::new();
    transport.push(Ok(None));

    let delegate = RecordingDelegate::new();
    let collection = PageCollection::<Event>::events(transport.clone());
    collection.set_delegate(&delegate);

    assert!(collection.load().await);

    assert_eq!(collection.count(), 0);
    assert_eq!(delegate.calls(), vec![DelegateCall::LoadFailed("malformed")]);
}

#[tokio::test]
async fn test_clean_discards_stale_response() {
    let (transport, entered, gate) = MockTransport::gated();
    transport.push(Ok(Some(events_page_with_ids(1..4))));
    transport.push(Ok(Some(events_page_with_ids(10..12))));

    let delegate = RecordingDelegate::new();
    let collection = Arc::new(PageCollection::<Event>::events(transport.clone()));
    collection.set_delegate(&delegate);

    let stale = {
        let collection = collection.clone();
        tokio::spawn(async move { collection.load().await })
    };

    entered.notified().await;
    collection.clean();

    // The invalidated request keeps its slot until it drains.
    assert!(collection.is_loading());
    assert!(!collection.load().await);

    gate.notify_one();
    assert!(stale.await.unwrap());

    // The stale page must not repopulate the cleaned collection.
    assert_eq!(collection.count(), 0);
    assert!(delegate.calls().is_empty());
    assert!(!collection.is_loading());

    gate.notify_one();
    assert!(collection.load().await);
    assert_eq!(collection.count(), 2);
    assert_eq!(transport.param(1, "page").as_deref(), Some("0"));
}

#[tokio::test]
async fn test_cancel_releases_flight_slot_immediately() {
    let (transport, entered, gate) = MockTransport::gated();
    transport.push(Ok(Some(events_page_with_ids(1..4))));
    transport.push(Ok(Some(events_page_with_ids(4..6))));

    let collection = Arc::new(PageCollection::<Event>::events(transport.clone()));

    let canceled = {
        let collection = collection.clone();
        tokio::spawn(async move { collection.load().await })
    };

    entered.notified().await;
    collection.cancel();
    assert!(!collection.is_loading());

    gate.notify_one();
    assert!(canceled.await.unwrap());
    assert_eq!(collection.count(), 0);

    gate.notify_one();
    assert!(collection.load().await);
    assert_eq!(collection.count(), 2);
}

#[tokio::test]
async fn test_drain_loop_stops_once_a_page_comes_back_empty() {
    let transport = MockTransport::new();
    transport.push(Ok(Some(events_page_with_ids(1..21))));
    transport.push(Ok(Some(events_page_with_ids(21..26))));
    transport.push(Ok(Some(events_page(&[]))));

    let collection = PageCollection::<Event>::events(transport.clone());

    // Load until a page no longer grows the collection.
    let mut loaded = 0;
    while collection.load().await {
        if collection.count() == loaded {
            break;
        }
        loaded = collection.count();
    }

    assert_eq!(collection.count(), 25);
    assert_eq!(transport.calls().len(), 3);
}

#[tokio::test]
async fn test_dropped_delegate_stops_notifications() {
    let transport = MockTransport::new();
    transport.push(Ok(Some(events_page_with_ids(1..3))));

    let collection = PageCollection::<Event>::events(transport.clone());
    {
        let delegate = RecordingDelegate::new();
        collection.set_delegate(&delegate);
    }

    assert!(collection.load().await);
    assert_eq!(collection.count(), 2);
}
