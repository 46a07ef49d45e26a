// Web page fetching and main-text extraction.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::error::AnalysisError;

/// Readable content of a fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub text: String,
}

/// Given a URL, returns the page's main text or fails.
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    async fn fetch_article(&self, url: &str) -> Result<Article, AnalysisError>;
}

#[derive(Clone)]
pub struct HttpArticleFetcher {
    client: Client,
}

impl HttpArticleFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| AnalysisError::Fetch(format!("failed to build http client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ArticleFetcher for HttpArticleFetcher {
    async fn fetch_article(&self, url: &str) -> Result<Article, AnalysisError> {
        let parsed = Url::parse(url)
            .map_err(|e| AnalysisError::Fetch(format!("invalid url {}: {}", url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AnalysisError::Fetch(format!(
                "unsupported url scheme: {}",
                parsed.scheme()
            )));
        }

        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Fetch(format!(
                "article fetch failed with status: {}",
                status
            )));
        }
        let html = response.text().await?;
        debug!(url, bytes = html.len(), "fetched article page");

        let article = extract_article(&html)
            .ok_or_else(|| AnalysisError::Extract(format!("no article text found at {}", url)))?;
        info!(url, chars = article.text.chars().count(), "extracted article text");
        Ok(article)
    }
}

const CONTAINERS: [&str; 4] = ["article", "main", "[role=main]", "body"];
const SKIPPED: [&str; 7] = ["script", "style", "noscript", "nav", "footer", "header", "aside"];

/// Pulls the paragraph text out of an HTML document. Returns `None` when the
/// page has no paragraph text at all.
pub fn extract_article(html: &str) -> Option<Article> {
    let document = Html::parse_document(html);
    let paragraphs = Selector::parse("p").ok()?;

    for container in CONTAINERS {
        let Ok(selector) = Selector::parse(container) else {
            continue;
        };
        let Some(root) = document.select(&selector).next() else {
            continue;
        };
        let blocks: Vec<String> = root
            .select(&paragraphs)
            .filter(|p| !inside_skipped(p))
            .map(|p| collapse(&p.text().collect::<String>()))
            .filter(|t| !t.is_empty())
            .collect();
        if !blocks.is_empty() {
            return Some(Article {
                text: blocks.join("\n\n"),
            });
        }
    }
    None
}

fn inside_skipped(element: &ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| SKIPPED.contains(&a.value().name()))
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
