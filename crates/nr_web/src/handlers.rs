use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use nr_core::Error;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::render;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ResearchForm {
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    #[serde(default)]
    pub keyword: String,
}

pub async fn index() -> Html<String> {
    Html(render::page("", None, None))
}

/// Form submission. Failures are rendered as a notice on the page, never a 5xx.
pub async fn research_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ResearchForm>,
) -> Html<String> {
    let keyword = form.keyword.trim();
    if keyword.is_empty() {
        return Html(render::page("", None, Some("키워드를 입력해 주세요.")));
    }

    info!("🌐 Form research request: {}", keyword);
    match state.pipeline.run(keyword).await {
        Ok(result) => Html(render::page(keyword, Some(&result), None)),
        Err(e) => {
            error!("Research for '{}' failed: {}", keyword, e);
            Html(render::page(
                keyword,
                None,
                Some(&format!("분석 중 오류가 발생했습니다: {}", e)),
            ))
        }
    }
}

pub async fn api_research(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResearchRequest>,
) -> Response {
    let keyword = request.keyword.trim();
    if keyword.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "keyword must not be empty");
    }

    info!("🌐 API research request: {}", keyword);
    match state.pipeline.run(keyword).await {
        Ok(result) => Json(result).into_response(),
        Err(Error::InvalidInput(msg)) => error_response(StatusCode::BAD_REQUEST, &msg),
        Err(e) => {
            error!("Research for '{}' failed: {}", keyword, e);
            error_response(StatusCode::BAD_GATEWAY, &e.to_string())
        }
    }
}

pub async fn health() -> &'static str {
    "ok"
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
