use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use textlens::fetch::{Article, ArticleFetcher, HttpArticleFetcher};
use textlens::nlp::{
    EnglishTokenizer, ExtractiveSummarizer, LexiconClassifier, Sentiment, SentimentClassifier,
    SummaryOptions, Summarizer,
};
use textlens::server::create_router;
use textlens::{AnalysisContext, AnalysisError, AnalysisSettings};

struct StaticFetcher(&'static str);

#[async_trait]
impl ArticleFetcher for StaticFetcher {
    async fn fetch_article(&self, _url: &str) -> Result<Article, AnalysisError> {
        Ok(Article {
            text: self.0.to_string(),
        })
    }
}

struct FailingClassifier;

impl SentimentClassifier for FailingClassifier {
    fn classify(&self, _text: &str) -> Result<Sentiment, AnalysisError> {
        Err(AnalysisError::Capability("classifier unavailable".to_string()))
    }
}

struct FailingSummarizer;

impl Summarizer for FailingSummarizer {
    fn summarize(&self, _text: &str, _options: &SummaryOptions) -> Result<String, AnalysisError> {
        Err(AnalysisError::Capability("summarizer out of memory".to_string()))
    }
}

fn router_with(
    classifier: Arc<dyn SentimentClassifier>,
    summarizer: Arc<dyn Summarizer>,
    fetcher: Arc<dyn ArticleFetcher>,
) -> Router {
    create_router(AnalysisContext::new(
        classifier,
        Arc::new(EnglishTokenizer::new()),
        summarizer,
        fetcher,
        AnalysisSettings::default(),
    ))
}

fn default_router(article: &'static str) -> Router {
    router_with(
        Arc::new(LexiconClassifier::new()),
        Arc::new(ExtractiveSummarizer::new()),
        Arc::new(StaticFetcher(article)),
    )
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn analyze_text_returns_full_result() {
    let text = "I love this product, it works great!";
    let (status, body) = send(default_router(""), post_json("/analyze/", json!({ "text": text }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], text);
    assert_eq!(body["sentiment"], "POSITIVE");
    assert_eq!(body["top_keywords"], json!(["love", "product", "works", "great"]));
    let summary = body["summary"].as_str().unwrap();
    assert!(!summary.is_empty());
    assert!(summary.split_whitespace().count() <= 150);
    assert!(body.get("url").is_none());
}

#[tokio::test]
async fn analyze_text_empty_input() {
    let (status, body) = send(default_router(""), post_json("/analyze/", json!({ "text": "" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["top_keywords"], json!([]));
    assert_eq!(body["sentiment"], "NEUTRAL");
    assert_eq!(body["summary"], "");
}

#[tokio::test]
async fn analyze_text_is_idempotent() {
    let router = default_router("");
    let text = "The new update is awful. The update broke the update screen and support was slow.";
    let (_, first) = send(router.clone(), post_json("/analyze/", json!({ "text": text }))).await;
    let (_, second) = send(router, post_json("/analyze/", json!({ "text": text }))).await;
    assert_eq!(first, second);
    assert_eq!(first["top_keywords"][0], "update");
}

#[tokio::test]
async fn analyze_text_capability_failure_is_server_error() {
    let router = router_with(
        Arc::new(FailingClassifier),
        Arc::new(ExtractiveSummarizer::new()),
        Arc::new(StaticFetcher("")),
    );
    let (status, body) = send(router, post_json("/analyze/", json!({ "text": "hello" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "classifier unavailable");
}

#[tokio::test]
async fn analyze_text_missing_field_is_client_error() {
    let (status, _) = send(default_router(""), post_json("/analyze/", json!({ "body": "x" }))).await;
    assert!(status.is_client_error());

    let request = Request::builder()
        .method("POST")
        .uri("/analyze/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send(default_router(""), request).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn analyze_url_returns_result_with_url() {
    let article = "Stocks rallied today in a great session. Investors were happy with strong earnings. \
        Stocks of technology companies led the gains.";
    let url = "http://news.example.com/markets";
    let (status, body) = send(default_router(article), post_json("/analyze-url/", json!({ "url": url }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], url);
    assert!(body.get("text").is_none());
    assert_eq!(body["sentiment"], "POSITIVE");
    assert_eq!(body["top_keywords"][0], "stocks");
    assert!(body["top_keywords"].as_array().unwrap().len() <= 5);
}

#[tokio::test]
async fn analyze_url_capability_failure_is_client_error() {
    let router = router_with(
        Arc::new(LexiconClassifier::new()),
        Arc::new(FailingSummarizer),
        Arc::new(StaticFetcher("Some article text.")),
    );
    let (status, body) = send(router, post_json("/analyze-url/", json!({ "url": "http://a.example" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "summarizer out of memory");
}

#[tokio::test]
async fn analyze_url_unreachable_host_is_client_error() {
    let fetcher = HttpArticleFetcher::new(Duration::from_secs(5), "textlens-test").unwrap();
    let router = router_with(
        Arc::new(LexiconClassifier::new()),
        Arc::new(ExtractiveSummarizer::new()),
        Arc::new(fetcher),
    );
    let (status, body) = send(
        router,
        post_json("/analyze-url/", json!({ "url": "http://not-a-real-domain.invalid" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("error sending request"), "detail was: {}", detail);
}

#[tokio::test]
async fn health_reports_version() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(default_router(""), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/analyze/")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = default_router("").oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
