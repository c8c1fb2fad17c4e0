use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use planner_common::PlanDocument;
use planner_store::DocumentStore;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    /// Seed an empty store on read instead of answering 404.
    pub seed_defaults: bool,
    /// Whether a database connection string was configured.
    pub storage_configured: bool,
}

/// JSON API under `/api`, everything else served from `static_dir`
/// (`/` resolves to its `index.html`).
pub fn build_router(state: AppState, static_dir: impl Into<PathBuf>) -> Router {
    let api = Router::new()
        .route("/api/data", get(get_data).post(save_data))
        .route("/api/health", get(health))
        .with_state(state)
        // Clients always re-read the whole plan; never serve it from cache
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        .merge(api)
        .fallback_service(ServeDir::new(static_dir.into()))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

// --- Handlers ---

async fn get_data(State(state): State<AppState>) -> Response {
    let result = if state.seed_defaults {
        state.store.get().await.map(Some)
    } else {
        state.store.load().await
    };

    match result {
        Ok(Some(doc)) => Json(doc).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "No data found"})),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, backend = state.store.backend(), "Failed to load plan data");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

async fn save_data(State(state): State<AppState>, body: Bytes) -> Response {
    let doc: PlanDocument = match serde_json::from_slice(&body) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "Rejected malformed plan document");
            return failure(StatusCode::BAD_REQUEST, format!("Malformed plan document: {e}"));
        }
    };

    if let Err(e) = doc.validate() {
        warn!(error = %e, "Rejected inconsistent plan document");
        return failure(StatusCode::UNPROCESSABLE_ENTITY, e.to_string());
    }

    match state.store.replace(&doc).await {
        Ok(()) => {
            info!(
                events = doc.events.len(),
                days = doc.days.len(),
                backend = state.store.backend(),
                "Plan data saved"
            );
            Json(json!({"success": true, "message": "Data saved successfully"})).into_response()
        }
        Err(e) => {
            warn!(error = %e, backend = state.store.backend(), "Failed to save plan data");
            failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "storage": state.store.backend(),
        "storageConfigured": state.storage_configured,
    }))
}

fn failure(status: StatusCode, error: String) -> Response {
    (status, Json(json!({"success": false, "error": error}))).into_response()
}
