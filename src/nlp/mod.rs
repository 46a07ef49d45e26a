// NLP capabilities for textlens
pub mod keywords;
pub mod sentiment;
pub mod summarization;
pub mod tokenizer;

pub use keywords::{extract_keywords, TOP_KEYWORDS};
pub use sentiment::{LexiconClassifier, Sentiment, SentimentClassifier, SentimentLabel};
pub use summarization::{ExtractiveSummarizer, SummaryOptions, Summarizer};
pub use tokenizer::{EnglishTokenizer, Token, Tokenizer};
