//! Router tests for the events table UI over an in-memory row store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{NaiveDate, NaiveTime};
use http_body_util::BodyExt;
use tower::ServiceExt;

use planner_store::{EventRowStore, MemoryEventRowStore, NewEventRow};
use planner_web::{build_router, AppState};

fn app(store: Arc<MemoryEventRowStore>) -> Router {
    build_router(AppState { rows: store })
}

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    Reply {
        status,
        location,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn new_row(title: &str, day: u32, hour: u32) -> NewEventRow {
    NewEventRow {
        title: title.to_string(),
        date: NaiveDate::from_ymd_opt(2027, 5, day).unwrap(),
        time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        location: "Hong Kong".to_string(),
        description: None,
    }
}

#[tokio::test]
async fn page_lists_rows_in_date_order() {
    let store = Arc::new(MemoryEventRowStore::new());
    store.create(&new_row("Gala Dinner", 24, 19)).await.unwrap();
    store.create(&new_row("Welcome Reception", 21, 18)).await.unwrap();
    let app = app(store);

    let reply = send(&app, get("/")).await;
    assert_eq!(reply.status, StatusCode::OK);

    let welcome = reply.body.find("Welcome Reception").unwrap();
    let gala = reply.body.find("Gala Dinner").unwrap();
    assert!(welcome < gala);
    assert!(reply.body.contains("Fri 21 May 2027"));
}

#[tokio::test]
async fn create_redirects_and_stores_row() {
    let store = Arc::new(MemoryEventRowStore::new());
    let app = app(store.clone());

    let reply = send(
        &app,
        post_form(
            "/events",
            "title=Star+Ferry&date=2027-05-22&time=12%3A30&location=Pier+7&description=Canapes",
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/?status=created"));

    let rows = store.list().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Star Ferry");
    assert_eq!(rows[0].time, NaiveTime::from_hms_opt(12, 30, 0).unwrap());
    assert_eq!(rows[0].description.as_deref(), Some("Canapes"));

    let reply = send(&app, get("/?status=created")).await;
    assert!(reply.body.contains("Event added."));
}

#[tokio::test]
async fn empty_title_shows_inline_error_and_writes_nothing() {
    let store = Arc::new(MemoryEventRowStore::new());
    let app = app(store.clone());

    let reply = send(
        &app,
        post_form("/events", "title=&date=2027-05-22&time=12%3A30&location=Pier+7"),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Title and location are required."));
    // The rejected values are shown back in the form.
    assert!(reply.body.contains(r#"value="Pier 7""#));
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn edit_query_renders_inline_form() {
    let store = Arc::new(MemoryEventRowStore::new());
    let created = store.create(&new_row("Dim Sum", 24, 12)).await.unwrap();
    let app = app(store);

    let reply = send(&app, get(&format!("/?edit={}", created.id))).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains(&format!(r#"action="/events/{}""#, created.id)));
    assert!(reply.body.contains(r#"value="2027-05-24""#));
    assert!(reply.body.contains(r#"value="12:00""#));
}

#[tokio::test]
async fn blank_or_garbled_edit_param_still_renders_table() {
    let store = Arc::new(MemoryEventRowStore::new());
    let created = store.create(&new_row("Dim Sum", 24, 12)).await.unwrap();
    let app = app(store);

    for uri in ["/?edit=", "/?edit=abc", "/?status=created&edit="] {
        let reply = send(&app, get(uri)).await;
        assert_eq!(reply.status, StatusCode::OK, "{uri}");
        assert!(reply.body.contains("Dim Sum"), "{uri}");
        assert!(!reply.body.contains(&format!(r#"action="/events/{}""#, created.id)), "{uri}");
    }

    let reply = send(&app, get("/?status=created&edit=")).await;
    assert!(reply.body.contains("Event added."));
}

#[tokio::test]
async fn update_changes_row() {
    let store = Arc::new(MemoryEventRowStore::new());
    let created = store.create(&new_row("Dim Sum", 24, 12)).await.unwrap();
    let app = app(store.clone());

    let reply = send(
        &app,
        post_form(
            &format!("/events/{}", created.id),
            "title=Dim+Sum+Lunch&date=2027-05-24&time=13%3A00&location=Maxim%27s",
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/?status=updated"));

    let row = store.get(created.id).await.unwrap().unwrap();
    assert_eq!(row.title, "Dim Sum Lunch");
    assert_eq!(row.location, "Maxim's");
    assert_eq!(row.time, NaiveTime::from_hms_opt(13, 0, 0).unwrap());
}

#[tokio::test]
async fn rejected_update_keeps_edit_form_open() {
    let store = Arc::new(MemoryEventRowStore::new());
    let created = store.create(&new_row("Dim Sum", 24, 12)).await.unwrap();
    let app = app(store.clone());

    let reply = send(
        &app,
        post_form(
            &format!("/events/{}", created.id),
            "title=Dim+Sum&date=2027-05-24&time=13%3A00&location=",
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Title and location are required."));
    assert!(reply.body.contains(&format!(r#"action="/events/{}""#, created.id)));
    assert!(reply.body.contains(r#"value="13:00""#));
    assert_eq!(store.get(created.id).await.unwrap().unwrap().location, "Hong Kong");
}

#[tokio::test]
async fn update_of_missing_id_creates_nothing() {
    let store = Arc::new(MemoryEventRowStore::new());
    let app = app(store.clone());

    let reply = send(
        &app,
        post_form(
            "/events/42",
            "title=Ghost&date=2027-05-24&time=13%3A00&location=Nowhere",
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/"));
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_row_and_missing_id_is_harmless() {
    let store = Arc::new(MemoryEventRowStore::new());
    let keep = store.create(&new_row("Keep", 22, 9)).await.unwrap();
    let gone = store.create(&new_row("Gone", 22, 10)).await.unwrap();
    let app = app(store.clone());

    let reply = send(&app, post_form("/events/999/delete", "")).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(store.list().await.unwrap().len(), 2);

    let reply = send(&app, post_form(&format!("/events/{}/delete", gone.id), "")).await;
    assert_eq!(reply.location.as_deref(), Some("/?status=deleted"));
    assert_eq!(store.list().await.unwrap(), vec![keep]);
}

#[tokio::test]
async fn health_is_ok() {
    let app = app(Arc::new(MemoryEventRowStore::new()));
    let reply = send(&app, get("/health")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, "ok");
}
