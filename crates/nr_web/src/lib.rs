use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod handlers;
pub mod render;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::index).post(handlers::research_form))
        .route("/api/research", post(handlers::api_research))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Binds `0.0.0.0:port` and serves until the process is stopped.
pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("🚀 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use nr_core::{
        ArticleExtractor, Error, ExtractedArticle, Result, ResearchResult, SearchHit,
        SearchProvider,
    };
    use nr_inference::models::DummyModel;
    use nr_scrappers::{PipelineOptions, ResearchPipeline};
    use tower::ServiceExt;

    struct MockSearch {
        fail: bool,
    }

    #[async_trait]
    impl SearchProvider for MockSearch {
        fn name(&self) -> &str {
            "mock"
        }

        async fn search(&self, query: &str, _limit: usize) -> Result<Vec<SearchHit>> {
            if self.fail {
                return Err(Error::Upstream("status 401 Unauthorized".to_string()));
            }
            Ok(vec![
                SearchHit::new(query, "<b>신약</b> 허가", "https://news.example.com/1"),
                SearchHit::new(query, "임상 3상 결과", "https://news.example.com/2"),
            ])
        }
    }

    struct MockExtractor;

    #[async_trait]
    impl ArticleExtractor for MockExtractor {
        async fn extract(&self, url: &str) -> Result<ExtractedArticle> {
            Ok(ExtractedArticle {
                title: String::new(),
                body: format!("대웅제약 신약 임상 소식입니다. {}", url),
            })
        }
    }

    fn app(fail: bool) -> Router {
        let pipeline = ResearchPipeline::new(
            Arc::new(MockSearch { fail }),
            Arc::new(MockExtractor),
            Arc::new(DummyModel::new()),
            PipelineOptions::default(),
        );
        create_app(AppState::new(pipeline))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn json_request(body: &str) -> Request<Body> {
        Request::post("/api/research")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn form_request(body: &str) -> Request<Body> {
        Request::post("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(false)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "ok");
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let response = app(false)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains(r#"name="keyword""#));
    }

    #[tokio::test]
    async fn test_api_research() {
        let response = app(false)
            .oneshot(json_request(r#"{"keyword":"신약"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let result: ResearchResult = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(result.keyword, "신약");
        assert_eq!(result.articles.len(), 2);
        assert!(result.strategy.short_term.starts_with("## 단기 전략"));
    }

    #[tokio::test]
    async fn test_api_empty_keyword_is_bad_request() {
        let response = app(false).oneshot(json_request(r#"{"keyword":"  "}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response).await.contains("error"));
    }

    #[tokio::test]
    async fn test_api_upstream_failure_is_bad_gateway() {
        let response = app(true).oneshot(json_request(r#"{"keyword":"신약"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(body["error"].as_str().unwrap().contains("401"));
    }

    #[tokio::test]
    async fn test_form_renders_escaped_results() {
        let response = app(false)
            .oneshot(form_request("keyword=%EC%8B%A0%EC%95%BD"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("&lt;b&gt;신약&lt;/b&gt; 허가"));
        assert!(html.contains("수집 기사 (2)"));
        assert!(!html.contains("<b>신약</b>"));
    }

    #[tokio::test]
    async fn test_form_failure_is_degraded_page() {
        let response = app(true)
            .oneshot(form_request("keyword=%EC%8B%A0%EC%95%BD"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains(r#"class="notice""#));
    }

    #[tokio::test]
    async fn test_form_empty_keyword_rerenders_form() {
        let response = app(false).oneshot(form_request("keyword=")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains(r#"name="keyword""#));
        assert!(!html.contains("수집 기사"));
    }
}
