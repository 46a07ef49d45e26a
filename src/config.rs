// Service configuration, read from command-line flags with env fallbacks.

use anyhow::{anyhow, bail, Result};
use clap::Args;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::fetch::HttpArticleFetcher;
use crate::nlp::{EnglishTokenizer, ExtractiveSummarizer, LexiconClassifier, SummaryOptions};
use crate::pipeline::{AnalysisContext, AnalysisSettings};

#[derive(Args, Debug, Clone)]
pub struct ServiceConfig {
    /// Host to bind to
    #[arg(long, env = "TEXTLENS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "TEXTLENS_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Characters of input passed to the sentiment classifier
    #[arg(long, env = "TEXTLENS_SENTIMENT_CHAR_LIMIT", default_value_t = 512)]
    pub sentiment_char_limit: usize,

    /// Upper bound on summary length, in words
    #[arg(long, env = "TEXTLENS_SUMMARY_MAX_LENGTH", default_value_t = 150)]
    pub summary_max_length: usize,

    /// Lower bound on summary length, in words
    #[arg(long, env = "TEXTLENS_SUMMARY_MIN_LENGTH", default_value_t = 50)]
    pub summary_min_length: usize,

    /// Timeout for fetching a web page
    #[arg(long, env = "TEXTLENS_FETCH_TIMEOUT_SECS", default_value_t = 30)]
    pub fetch_timeout_secs: u64,

    #[arg(long, env = "TEXTLENS_USER_AGENT", default_value = concat!("textlens/", env!("CARGO_PKG_VERSION")))]
    pub user_agent: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "TEXTLENS_LOG_JSON", default_value_t = false)]
    pub log_json: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            sentiment_char_limit: 512,
            summary_max_length: 150,
            summary_min_length: 50,
            fetch_timeout_secs: 30,
            user_agent: concat!("textlens/", env!("CARGO_PKG_VERSION")).to_string(),
            log_json: false,
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sentiment_char_limit == 0 {
            bail!("sentiment char limit must be positive");
        }
        if self.summary_max_length == 0 {
            bail!("summary max length must be positive");
        }
        if self.summary_min_length > self.summary_max_length {
            bail!(
                "summary min length {} exceeds max length {}",
                self.summary_min_length,
                self.summary_max_length
            );
        }
        Ok(())
    }

    /// Resolves `host` (an IP literal or a hostname such as `localhost`) to
    /// the first address it maps to.
    pub async fn resolve_addr(&self) -> Result<SocketAddr> {
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await?
            .next()
            .ok_or_else(|| anyhow!("host {} resolved to no addresses", self.host))
    }

    pub fn settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            sentiment_char_limit: self.sentiment_char_limit,
            summary: SummaryOptions {
                max_length: self.summary_max_length,
                min_length: self.summary_min_length,
                do_sample: false,
            },
        }
    }

    /// Loads every capability once; the returned context is shared by all requests.
    pub fn build_context(&self) -> Result<AnalysisContext> {
        self.validate()?;
        let fetcher = HttpArticleFetcher::new(
            Duration::from_secs(self.fetch_timeout_secs),
            &self.user_agent,
        )?;
        Ok(AnalysisContext::new(
            Arc::new(LexiconClassifier::new()),
            Arc::new(EnglishTokenizer::new()),
            Arc::new(ExtractiveSummarizer::new()),
            Arc::new(fetcher),
            self.settings(),
        ))
    }
}
