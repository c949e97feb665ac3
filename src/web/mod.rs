//! HTTP surface: the form page, a JSON endpoint and a health check.

pub mod form;
pub mod page;

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::bridge::{Bridge, Outcome, Submission};
use crate::web::form::FormInput;
use crate::web::page::{PageView, ResultView, render_page};

#[derive(Clone)]
pub struct AppState {
    pub bridge: Arc<Bridge>,
}

pub fn router(bridge: Bridge) -> Router {
    let state = AppState {
        bridge: Arc::new(bridge),
    };

    Router::new()
        .route("/", get(index).post(submit))
        .route("/api/product", post(api_product))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(render_page(&PageView::default()))
}

async fn submit(State(state): State<AppState>, Form(input): Form<FormInput>) -> Html<String> {
    let submission = Submission::from(input);
    let outcome = state.bridge.submit(&submission).await;

    Html(render_page(&PageView {
        selected_model: submission.model,
        description: submission.description,
        result: ResultView::from(&outcome),
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductRequest {
    pub model: String,
    pub description: String,
}

async fn api_product(
    State(state): State<AppState>,
    Json(body): Json<ProductRequest>,
) -> Response {
    let submission = Submission::new(body.model, body.description);
    match state.bridge.submit(&submission).await {
        Outcome::Success(product) => (StatusCode::OK, Json(product)).into_response(),
        Outcome::Warning(msg) => json_error(StatusCode::UNPROCESSABLE_ENTITY, "missing_input", msg),
        Outcome::Error(e) => {
            json_error(StatusCode::BAD_GATEWAY, "invocation_failed", e.to_string())
        }
    }
}

async fn healthz() -> &'static str {
    "ok"
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(bridge: Bridge) -> crate::Result<()> {
    let addr = bridge.settings().addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(bridge)).await?;
    Ok(())
}
