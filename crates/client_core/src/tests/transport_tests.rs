use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use shared::domain::Metadata;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct BackendState {
    puts: Arc<Mutex<Vec<(String, PutPagePayload)>>>,
    deletes: Arc<Mutex<Vec<String>>>,
}

fn about_page() -> Page {
    Page::new_draft("about.md")
        .with_name("about.md")
        .with_field("title", "About")
        .with_content("# About")
}

async fn list_pages() -> Json<Vec<Page>> {
    Json(vec![about_page()])
}

async fn show_page(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "about.md" => Json(about_page()).into_response(),
        "broken.md" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "garbled.md" => (StatusCode::OK, "{not json").into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Page not found" })),
        )
            .into_response(),
    }
}

async fn write_page(
    State(state): State<BackendState>,
    Path(id): Path<String>,
    Json(payload): Json<PutPagePayload>,
) -> Json<Page> {
    state.puts.lock().await.push((id.clone(), payload.clone()));
    Json(Page {
        name: Some(id),
        path: payload.path,
        metadata: payload.front_matter,
        content: payload.raw_content,
        http_url: None,
    })
}

async fn remove_page(State(state): State<BackendState>, Path(id): Path<String>) -> StatusCode {
    state.deletes.lock().await.push(id);
    StatusCode::NO_CONTENT
}

async fn spawn_backend() -> anyhow::Result<(String, BackendState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = BackendState::default();
    let app = Router::new()
        .route("/_api/pages", get(list_pages))
        .route(
            "/_api/pages/*id",
            get(show_page).put(write_page).delete(remove_page),
        )
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/_api"), state))
}

fn http_client(base_url: &str) -> (PagesClient, Arc<RecordingSink>) {
    let sink = RecordingSink::new();
    let config = ClientConfig::with_reqwest(base_url).expect("config");
    (PagesClient::new(config, sink.clone()), sink)
}

#[tokio::test]
async fn lists_pages_over_http() {
    let (base_url, _state) = spawn_backend().await.expect("spawn backend");
    let (client, sink) = http_client(&base_url);

    client.fetch_pages().await;

    assert_eq!(
        sink.notifications(),
        vec![
            Notification::FetchPagesRequest,
            Notification::FetchPagesSuccess {
                pages: vec![about_page()]
            },
        ]
    );
}

#[tokio::test]
async fn missing_page_uses_backend_error_message() {
    let (base_url, _state) = spawn_backend().await.expect("spawn backend");
    let (client, sink) = http_client(&base_url);

    client.fetch_page("nope.md").await;

    assert_eq!(
        sink.notifications(),
        vec![
            Notification::FetchPageRequest,
            Notification::FetchPageFailure {
                error: "Page not found".into()
            },
        ]
    );
}

#[tokio::test]
async fn plain_text_server_error_falls_back_to_status() {
    let (base_url, _state) = spawn_backend().await.expect("spawn backend");
    let (client, sink) = http_client(&base_url);

    client.fetch_page("broken.md").await;

    assert_eq!(
        sink.notifications().last().and_then(Notification::error),
        Some("request failed with status 500")
    );
}

#[tokio::test]
async fn garbled_success_body_is_a_failure() {
    let (base_url, _state) = spawn_backend().await.expect("spawn backend");
    let (client, sink) = http_client(&base_url);

    client.fetch_page("garbled.md").await;

    assert_eq!(
        sink.kinds(),
        vec![
            NotificationKind::FetchPageRequest,
            NotificationKind::FetchPageFailure
        ]
    );
}

#[tokio::test]
async fn creates_nested_page_at_its_path() {
    let (base_url, state) = spawn_backend().await.expect("spawn backend");
    let (client, sink) = http_client(&base_url);
    let draft = Page::new_draft("_pages/team/new page.md")
        .with_field("title", "Team")
        .with_content("hello");

    client.put_page(&draft, None).await;

    let puts = state.puts.lock().await.clone();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].0, "_pages/team/new page.md");
    let mut expected_front_matter = Metadata::new();
    expected_front_matter.insert("title".into(), json!("Team"));
    assert_eq!(puts[0].1.front_matter, expected_front_matter);
    assert_eq!(puts[0].1.raw_content, "hello");

    let notifications = sink.notifications();
    assert_eq!(notifications[0], Notification::ClearErrors);
    match &notifications[1] {
        Notification::PutPageSuccess { page } => {
            assert_eq!(page.name(), Some("_pages/team/new page.md"));
            assert_eq!(page.title(), Some("Team"));
        }
        other => panic!("unexpected notification: {other:?}"),
    }
}

#[tokio::test]
async fn deletes_with_empty_response_body() {
    let (base_url, state) = spawn_backend().await.expect("spawn backend");
    let (client, sink) = http_client(&base_url);

    client.delete_page("about.md").await;

    assert_eq!(
        sink.notifications(),
        vec![Notification::DeletePageSuccess {
            id: "about.md".into()
        }]
    );
    assert_eq!(*state.deletes.lock().await, vec!["about.md".to_string()]);
}

#[tokio::test]
async fn unreachable_backend_settles_with_one_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let (client, sink) = http_client(&format!("http://{addr}/_api"));

    client.delete_page("about.md").await;
    client.put_page(&about_page(), Some("about.md")).await;

    assert_eq!(
        sink.kinds(),
        vec![
            NotificationKind::DeletePageFailure,
            NotificationKind::ClearErrors,
            NotificationKind::PutPageFailure,
        ]
    );
}
