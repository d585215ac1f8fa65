//! Form endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use formsmith_core::{render_html, FormPayload, FormRecord, SchemaEditor};
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::store::{FormStore, StoreResult};
use crate::AppState;

const REQUIRED_FIELDS: &str = "Title and schema_json are required";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/forms", get(list_forms).post(create_form))
        .route("/api/forms/:id", get(get_form).put(update_form).delete(delete_form))
        .route("/api/forms/:id/preview", get(preview_form))
}

/// Run a store operation on the blocking pool
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&FormStore) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| {
            error!(error = %e, "store task failed");
            ApiError::Internal
        })?
        .map_err(ApiError::from)
}

pub async fn list_forms(State(state): State<AppState>) -> Result<Json<Vec<FormRecord>>, ApiError> {
    Ok(Json(with_store(&state, |store| store.list()).await?))
}

pub async fn get_form(Path(id): Path<i64>, State(state): State<AppState>) -> Result<Json<FormRecord>, ApiError> {
    with_store(&state, move |store| store.get(id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn create_form(
    State(state): State<AppState>,
    Json(payload): Json<FormPayload>,
) -> Result<(StatusCode, Json<FormRecord>), ApiError> {
    if !payload.is_complete() {
        warn!("rejected form create without title or document");
        return Err(ApiError::BadRequest(REQUIRED_FIELDS));
    }
    let record = with_store(&state, move |store| store.insert(&payload)).await?;
    info!(id = record.id, title = %record.title, "form created");
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_form(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<FormPayload>,
) -> Result<Json<FormRecord>, ApiError> {
    if !payload.is_complete() {
        warn!(id, "rejected form update without title or document");
        return Err(ApiError::BadRequest(REQUIRED_FIELDS));
    }
    let record = with_store(&state, move |store| store.update(id, &payload))
        .await?
        .ok_or(ApiError::NotFound)?;
    info!(id, "form updated");
    Ok(Json(record))
}

pub async fn delete_form(Path(id): Path<i64>, State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    if with_store(&state, move |store| store.delete(id)).await? {
        info!(id, "form deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn preview_form(Path(id): Path<i64>, State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let record = with_store(&state, move |store| store.get(id))
        .await?
        .ok_or(ApiError::NotFound)?;
    let editor = SchemaEditor::hydrate(&record).map_err(|e| {
        warn!(id, error = %e, "stored document cannot be previewed");
        ApiError::Internal
    })?;
    Ok(Html(render_html(editor.schema())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    const DOC: &str = r#"{"fields":[{"type":"text","name":"a","label":"A"}],"submitLabel":"Submit"}"#;

    fn state() -> AppState {
        let store = FormStore::open_in_memory().unwrap();
        store.migrate().unwrap();
        AppState { store: Arc::new(store) }
    }

    fn server() -> TestServer {
        TestServer::new(crate::build_router(state())).unwrap()
    }

    async fn create(server: &TestServer, title: &str) -> FormRecord {
        let response = server
            .post("/api/forms")
            .json(&json!({ "title": title, "description": "d", "schema_json": DOC }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<FormRecord>()
    }

    #[tokio::test]
    async fn test_health() {
        let server = server();
        server.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_create_returns_canonical_record() {
        let server = server();
        let record = create(&server, "Signup").await;
        assert_eq!(record.id, 1);
        assert_eq!(record.title, "Signup");
        assert_eq!(record.description.as_deref(), Some("d"));
        assert_eq!(record.schema_json, DOC);
    }

    #[tokio::test]
    async fn test_create_requires_title_and_document() {
        let server = server();
        let response = server
            .post("/api/forms")
            .json(&json!({ "description": "no title", "schema_json": DOC }))
            .expect_failure()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "Title and schema_json are required" }));

        let response = server
            .post("/api/forms")
            .json(&json!({ "title": "no doc" }))
            .expect_failure()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let server = server();
        create(&server, "older").await;
        create(&server, "newer").await;
        let records = server.get("/api/forms").await.json::<Vec<FormRecord>>();
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn test_get_missing_form() {
        let server = server();
        let response = server.get("/api/forms/12").expect_failure().await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "error": "Form not found" }));
    }

    #[tokio::test]
    async fn test_update_existing_and_missing() {
        let server = server();
        let created = create(&server, "v1").await;

        let updated = server
            .put(&format!("/api/forms/{}", created.id))
            .json(&json!({ "title": "v2", "description": null, "schema_json": DOC }))
            .await
            .json::<FormRecord>();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "v2");
        assert_eq!(updated.description, None);
        assert!(updated.updated_at >= created.updated_at);

        server
            .put("/api/forms/999")
            .json(&json!({ "title": "ghost", "schema_json": DOC }))
            .expect_failure()
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_is_no_content() {
        let server = server();
        let created = create(&server, "temp").await;
        server
            .delete(&format!("/api/forms/{}", created.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format!("/api/forms/{}", created.id))
            .expect_failure()
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_server_does_not_inspect_document() {
        let server = server();
        let response = server
            .post("/api/forms")
            .json(&json!({ "title": "opaque", "schema_json": "not even json" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["schema_json"], "not even json");
    }

    #[tokio::test]
    async fn test_preview_renders_html() {
        let server = server();
        let created = create(&server, "Preview me").await;
        let response = server.get(&format!("/api/forms/{}/preview", created.id)).await;
        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("<h2>Preview me</h2>"));
        assert!(html.contains("<input type=\"text\" id=\"a\" name=\"a\">"));
    }

    #[tokio::test]
    async fn test_store_calls_return_store_results() {
        let state = state();
        assert_eq!(with_store(&state, |store| store.count()).await.unwrap(), 0);
        let missing = with_store(&state, |store| store.get(42)).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_failed_store_task_is_internal_error() {
        let state = state();
        let result = with_store(&state, |_| -> StoreResult<()> { panic!("store task crashed") }).await;
        assert!(matches!(result, Err(ApiError::Internal)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_creates_get_distinct_ids() {
        let state = state();
        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let state = state.clone();
                tokio::spawn(async move {
                    let payload = FormPayload {
                        title: format!("form {}", i),
                        description: None,
                        schema_json: DOC.into(),
                    };
                    with_store(&state, move |store| store.insert(&payload)).await.unwrap().id
                })
            })
            .collect();
        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }
}
