// Text summarization using an extractive approach.
// Sentences are scored by the frequency of their content words and picked until
// the summary falls inside the configured word bounds.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::tokenizer::is_stopword;
use crate::error::AnalysisError;

static SENTENCE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?]+(?:[.!?]+|$)").unwrap());

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}']+").unwrap());

/// Length bounds are counted in words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOptions {
    pub max_length: usize,
    pub min_length: usize,
    pub do_sample: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_length: 150,
            min_length: 50,
            do_sample: false,
        }
    }
}

/// Produces a shorter text within the given length bounds.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String, AnalysisError>;
}

#[derive(Debug, Clone, Default)]
pub struct ExtractiveSummarizer;

impl ExtractiveSummarizer {
    pub fn new() -> Self {
        Self
    }
}

impl Summarizer for ExtractiveSummarizer {
    fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String, AnalysisError> {
        if options.do_sample {
            return Err(AnalysisError::Capability(
                "extractive summarizer does not support sampling".to_string(),
            ));
        }
        Ok(summarize_text_content(text, options))
    }
}

fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_words(s: &str, max: usize) -> String {
    s.split_whitespace().take(max).collect::<Vec<_>>().join(" ")
}

pub fn summarize_text_content(text: &str, options: &SummaryOptions) -> String {
    let total_words = word_count(text);
    if total_words == 0 {
        return String::new();
    }
    // Short input is already a summary of itself
    if total_words <= options.min_length {
        return truncate_words(text, options.max_length);
    }

    let sentences: Vec<String> = SENTENCE_PATTERN
        .find_iter(text)
        .map(|m| normalize_whitespace(m.as_str()))
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.is_empty() {
        return truncate_words(text, options.max_length);
    }

    // Content word frequencies
    let mut word_freq: HashMap<String, usize> = HashMap::new();
    for sentence in &sentences {
        for word in WORD_PATTERN.find_iter(sentence) {
            let word_str = word.as_str().to_lowercase();
            if !is_stopword(&word_str) && word_str.chars().count() > 2 {
                *word_freq.entry(word_str).or_insert(0) += 1;
            }
        }
    }

    let max_freq = word_freq.values().max().copied().unwrap_or(1) as f32;

    let mut sentence_scores: Vec<(usize, f32)> = sentences
        .iter()
        .enumerate()
        .map(|(idx, sentence)| {
            let words: Vec<_> = WORD_PATTERN.find_iter(sentence).collect();
            let mut score: f32 = words
                .iter()
                .filter_map(|w| word_freq.get(&w.as_str().to_lowercase()))
                .map(|&freq| freq as f32 / max_freq)
                .sum();
            // Normalize by sentence length to avoid bias toward long sentences
            if !words.is_empty() {
                score /= words.len() as f32;
            }
            // Leading sentences often carry the key information
            if idx == 0 {
                score *= 1.5;
            }
            (idx, score)
        })
        .collect();

    // Stable sort keeps earlier sentences first on equal scores
    sentence_scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut selected: Vec<usize> = Vec::new();
    let mut length = 0;
    for &(idx, _) in &sentence_scores {
        if length >= options.min_length {
            break;
        }
        let words = word_count(&sentences[idx]);
        if length + words > options.max_length {
            continue;
        }
        selected.push(idx);
        length += words;
    }

    if selected.is_empty() {
        // Every sentence overflows on its own; cut the best one at a word boundary
        let best = sentence_scores[0].0;
        return truncate_words(&sentences[best], options.max_length);
    }

    selected.sort_unstable();
    selected
        .iter()
        .map(|&idx| sentences[idx].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
