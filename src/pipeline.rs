// Analysis pipeline: sentiment, keywords and summary over one text.
//
// AnalysisContext owns the capability handles. It is built once at
// startup and cloned into every request; clones share the same handles.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::error::AnalysisError;
use crate::fetch::ArticleFetcher;
use crate::nlp::{
    extract_keywords, SentimentClassifier, SentimentLabel, SummaryOptions, Summarizer, Tokenizer,
    TOP_KEYWORDS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSettings {
    /// Sentiment input is cut to this many characters.
    pub sentiment_char_limit: usize,
    pub summary: SummaryOptions,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            sentiment_char_limit: 512,
            summary: SummaryOptions::default(),
        }
    }
}

/// What the result was computed from; serialized as a `text` or `url` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Text(String),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub source: Source,
    pub sentiment: SentimentLabel,
    pub top_keywords: Vec<String>,
    pub summary: String,
}

#[derive(Clone)]
pub struct AnalysisContext {
    classifier: Arc<dyn SentimentClassifier>,
    tokenizer: Arc<dyn Tokenizer>,
    summarizer: Arc<dyn Summarizer>,
    fetcher: Arc<dyn ArticleFetcher>,
    settings: AnalysisSettings,
}

impl AnalysisContext {
    pub fn new(
        classifier: Arc<dyn SentimentClassifier>,
        tokenizer: Arc<dyn Tokenizer>,
        summarizer: Arc<dyn Summarizer>,
        fetcher: Arc<dyn ArticleFetcher>,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            classifier,
            tokenizer,
            summarizer,
            fetcher,
            settings,
        }
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Classifies the first `sentiment_char_limit` characters of `text`.
    pub fn sentiment(&self, text: &str) -> Result<SentimentLabel, AnalysisError> {
        let input = truncate_chars(text, self.settings.sentiment_char_limit);
        Ok(self.classifier.classify(input)?.label)
    }

    pub fn keywords(&self, text: &str) -> Vec<String> {
        extract_keywords(self.tokenizer.as_ref(), text, TOP_KEYWORDS)
    }

    pub fn summarize(&self, text: &str) -> Result<String, AnalysisError> {
        self.summarizer.summarize(text, &self.settings.summary)
    }

    /// Runs sentiment, keyword extraction and summarization in that order.
    /// Blocking work is moved off the async executor.
    pub async fn analyze_text(&self, text: String) -> Result<AnalysisResult, AnalysisError> {
        let ctx = self.clone();
        tokio::task::spawn_blocking(move || ctx.run_steps(Source::Text(text.clone()), &text))
            .await?
    }

    /// Fetches the page at `url` and analyzes its extracted text.
    pub async fn analyze_url(&self, url: String) -> Result<AnalysisResult, AnalysisError> {
        let article = self.fetcher.fetch_article(&url).await?;
        let ctx = self.clone();
        tokio::task::spawn_blocking(move || ctx.run_steps(Source::Url(url), &article.text)).await?
    }

    fn run_steps(&self, source: Source, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let sentiment = self.sentiment(text)?;
        debug!(%sentiment, "sentiment step done");
        let top_keywords = self.keywords(text);
        debug!(count = top_keywords.len(), "keyword step done");
        let summary = self.summarize(text)?;
        debug!(chars = summary.len(), "summary step done");
        Ok(AnalysisResult {
            source,
            sentiment,
            top_keywords,
            summary,
        })
    }
}

/// Cuts at a character boundary, never inside a multi-byte char.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
