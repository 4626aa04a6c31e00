use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use client_core::{
    forms::{event_slots::EventSlots, shop::ShopForm},
    AdminClient, ClientError, ClientEvent, ListController, PageItem,
};
use shared::domain::{EventId, UserId};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Recorder {
    requests: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl Recorder {
    fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("lock").clone()
    }

    fn record(&self, line: impl Into<String>) {
        self.requests.lock().expect("lock").push(line.into());
    }
}

async fn handle_login() -> Json<serde_json::Value> {
    Json(serde_json::json!({"token": "tok-acceptance", "user_id": 1}))
}

async fn handle_shop_page(Path(page): Path<u32>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "max_pages": 4,
        "shops": [{
            "id": 3,
            "name": format!("Depot {page}"),
            "company": {"id": 4, "name": "Fresh Foods", "description": "Wholesale produce"},
            "location": {
                "id": 5,
                "address": "1 Market Street",
                "zip_code": "75001",
                "city": "Paris",
                "country": "France"
            }
        }]
    }))
}

async fn handle_list_companies() -> Json<serde_json::Value> {
    Json(serde_json::json!([
        {"id": 4, "name": "Fresh Foods", "description": "Wholesale produce"},
        {"id": 8, "name": "City Bakery", "description": "Day-old bread donations"}
    ]))
}

async fn handle_list_locations() -> Json<serde_json::Value> {
    Json(serde_json::json!([{
        "id": 5,
        "address": "1 Market Street",
        "zip_code": "75001",
        "city": "Paris",
        "country": "France"
    }]))
}

async fn handle_create_location(
    State(recorder): State<Recorder>,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    recorder.record("POST /location");
    recorder.bodies.lock().expect("lock").push(body);
    Json(serde_json::json!({"location_id": 99}))
}

async fn handle_update_shop(
    State(recorder): State<Recorder>,
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    recorder.record(format!("PUT /shop/{id}"));
    recorder.bodies.lock().expect("lock").push(body);
    Json(serde_json::json!({"message": format!("Shop '{id}' successfully updated.")}))
}

async fn handle_get_event(Path(id): Path<i64>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "id": id,
        "title": "Winter collection",
        "description": "Seasonal food drive",
        "dateTime": "2024-01-25T17:20:00",
        "maxSlot": 3,
        "group": 1,
        "type": {"id": 2, "name": "Collection"},
        "location": "Warehouse B",
        "users": [
            {"id": 1, "email": "ada@example.org"},
            {"id": 2, "email": "grace@example.org"}
        ]
    }))
}

async fn handle_join_event(
    State(recorder): State<Recorder>,
    Path((user_id, event_id)): Path<(i64, i64)>,
) -> Json<serde_json::Value> {
    recorder.record(format!("POST /user/{user_id}/event/{event_id}"));
    Json(serde_json::json!({"message": "joined"}))
}

async fn handle_leave_event(
    State(recorder): State<Recorder>,
    Path((user_id, event_id)): Path<(i64, i64)>,
) -> Json<serde_json::Value> {
    recorder.record(format!("DELETE /user/{user_id}/event/{event_id}"));
    Json(serde_json::json!({"message": "left"}))
}

async fn spawn_backend(recorder: Recorder) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let app = Router::new()
        .route("/login", post(handle_login))
        .route("/shop/page/:page", get(handle_shop_page))
        .route("/company", get(handle_list_companies))
        .route("/location", get(handle_list_locations).post(handle_create_location))
        .route("/shop/:id", axum::routing::put(handle_update_shop))
        .route("/event/:id", get(handle_get_event))
        .route(
            "/user/:user_id/event/:event_id",
            post(handle_join_event).delete(handle_leave_event),
        )
        .with_state(recorder);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn shop_update_inline_creates_the_location_before_the_parent_request() {
    let recorder = Recorder::default();
    let url = spawn_backend(recorder.clone()).await;
    let client = AdminClient::new(&url).expect("client");
    client.login("admin@example.org", "pw").await.expect("login");
    let mut events = client.subscribe_events();

    let mut list = ListController::new(client.shop_pager());
    list.refetch().await.expect("refetch");
    let shop = &list.items()[0];

    // The modal offers both selects, fetched fresh when it opens.
    let companies = client.list_companies().await.expect("companies");
    let locations = client.list_locations().await.expect("locations");
    assert_eq!(companies.len(), 2);
    assert_eq!(locations.len(), 1);

    let mut form = ShopForm::update(shop);
    form.location.switch();
    form.location.draft.address = "9 Harbour Road".into();
    form.location.draft.zip_code = "1011".into();
    form.location.draft.city = "Amsterdam".into();
    form.location.draft.country = "Netherlands".into();
    form.submit(&client).await.expect("submit");

    assert_eq!(
        recorder.requests(),
        vec!["POST /location".to_string(), "PUT /shop/3".to_string()]
    );
    let bodies = recorder.bodies.lock().expect("lock").clone();
    assert_eq!(bodies[0]["city"], "Amsterdam");
    assert_eq!(bodies[1]["location_id"], 99);
    assert_eq!(bodies[1]["company_id"], 4);
    assert_eq!(events.try_recv().expect("event"), ClientEvent::ShopsChanged);
}

#[tokio::test]
async fn shop_form_keeps_the_inactive_subform_and_requires_a_selection() {
    let recorder = Recorder::default();
    let url = spawn_backend(recorder.clone()).await;
    let client = AdminClient::new(&url).expect("client");

    let mut form = ShopForm::create();
    form.name = "South Depot".into();
    form.company.draft.name = "Kept Draft".into();
    form.company.switch();
    form.company.switch();
    assert_eq!(form.company.draft.name, "Kept Draft");

    // Back in select mode with nothing selected: validation stops the
    // submit before any request.
    form.location.selected = Some(shared::domain::LocationId(5));
    let err = form.submit(&client).await.expect_err("must fail");
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(recorder.requests().is_empty());
}

#[tokio::test]
async fn slots_reconciliation_issues_joins_and_leaves_only_for_the_diff() {
    let recorder = Recorder::default();
    let url = spawn_backend(recorder.clone()).await;
    let client = AdminClient::new(&url).expect("client");
    let mut events = client.subscribe_events();

    let event = client.get_event(EventId(11)).await.expect("event");
    let mut slots = EventSlots::open(&event);
    slots.toggle(UserId(2)).expect("toggle off");
    slots.toggle(UserId(6)).expect("toggle on");
    slots.submit(&client).await.expect("submit");

    assert_eq!(
        recorder.requests(),
        vec![
            "POST /user/6/event/11".to_string(),
            "DELETE /user/2/event/11".to_string(),
        ]
    );
    assert_eq!(events.try_recv().expect("event"), ClientEvent::EventsChanged);
}

#[tokio::test]
async fn slots_toggle_rejects_attaching_beyond_capacity() {
    let recorder = Recorder::default();
    let url = spawn_backend(recorder.clone()).await;
    let client = AdminClient::new(&url).expect("client");

    let event = client.get_event(EventId(11)).await.expect("event");
    let mut slots = EventSlots::open(&event);
    slots.toggle(UserId(6)).expect("third member fits");
    let err = slots.toggle(UserId(7)).expect_err("event is full");
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn shop_list_renders_the_reference_pagination_window() {
    let recorder = Recorder::default();
    let url = spawn_backend(recorder).await;
    let client = AdminClient::new(&url).expect("client");

    let mut list = ListController::new(client.shop_pager());
    list.refetch().await.expect("refetch");
    list.goto(3).await.expect("goto");

    assert_eq!(
        list.window().items(),
        vec![
            PageItem::Page(1),
            PageItem::Page(2),
            PageItem::Page(3),
            PageItem::Page(4),
        ]
    );
}
