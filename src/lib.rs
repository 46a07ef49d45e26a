// textlens: sentiment, keywords and a summary for a text or a web article.

pub mod config;
pub mod error;
pub mod fetch;
pub mod nlp;
pub mod pipeline;
pub mod server;

pub use config::ServiceConfig;
pub use error::AnalysisError;
pub use pipeline::{AnalysisContext, AnalysisResult, AnalysisSettings, Source};
