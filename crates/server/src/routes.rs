use std::path::PathBuf;

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde_json::Value;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::Document;

use crate::state::AppState;

pub mod documents;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// True when any path segment is hidden (`.env`, `.git`, `%2Eenv`).
fn has_hidden_segment(path: &str) -> bool {
    path.split('/').any(|segment| {
        segment.starts_with('.') || segment.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("%2e"))
    })
}

/// Static files never expose dotfiles; they answer 404 as if absent.
async fn deny_dotfiles(req: Request, next: Next) -> Response {
    if has_hidden_segment(req.uri().path()) {
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(req).await
}

fn static_files(dir: PathBuf) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(middleware::from_fn(deny_dotfiles))
}

/// One GET/POST pair per document, each bound to its fixed route.
fn document_routes() -> Router<AppState> {
    Document::ALL.into_iter().fold(Router::new(), |router, document| {
        router.route(
            document.route(),
            get(move |state: State<AppState>| documents::load_document(state, document)).post(
                move |state: State<AppState>, payload: Result<Json<Value>, JsonRejection>| {
                    documents::save_document(state, document, payload)
                },
            ),
        )
    })
}

/// Build the full application router: document API, health, and static files
/// from `static_dir` as the fallback when given.
pub fn build_router(state: AppState, cors: CorsLayer, static_dir: Option<PathBuf>) -> Router {
    let api = document_routes().route("/api/clear-all", delete(documents::clear_all));

    let mut router = Router::new().route("/health", get(health)).merge(api);
    if let Some(dir) = static_dir {
        router = router.fallback_service(static_files(dir));
    }

    router
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged as errors
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
