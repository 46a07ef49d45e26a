// Sentiment analysis using a lexicon-based approach.
// Word lists decide polarity; intensifiers scale a hit and a nearby negation flips it.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::AnalysisError;

/// Fixed label set produced by every classifier in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f32,
}

/// Maps text to a polarity label plus a confidence score.
pub trait SentimentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Sentiment, AnalysisError>;
}

// Positive words lexicon
static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "good", "great", "excellent", "wonderful", "fantastic", "amazing", "awesome",
        "love", "loved", "loves", "happy", "joy", "pleased", "delighted", "satisfied", "perfect",
        "beautiful", "brilliant", "outstanding", "superb", "magnificent", "marvelous",
        "terrific", "fabulous", "exceptional", "impressive", "remarkable", "best",
        "better", "positive", "advantage", "benefit", "success", "successful",
        "win", "winner", "winning", "accomplished", "achievement", "triumph",
        "enjoy", "pleasant", "comfortable", "excited", "exciting", "thrilled",
        "approve", "approved", "approval", "like", "liked", "favorite", "prefer",
        "works", "recommend", "helpful", "reliable", "nice", "glad", "fun",
    ]
    .iter()
    .copied()
    .collect()
});

// Negative words lexicon
static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "bad", "terrible", "awful", "horrible", "poor", "worst", "worse",
        "hate", "hated", "angry", "sad", "upset", "disappointed", "dissatisfied", "unhappy",
        "fail", "failure", "failed", "problem", "issue", "wrong", "error",
        "difficult", "hard", "tough", "struggle", "struggling", "broken",
        "pain", "painful", "hurt", "hurting", "damage", "damaged", "disaster",
        "negative", "loss", "lose", "losing", "lost", "defeat", "defeated",
        "reject", "rejected", "rejection", "dislike", "disliked", "unpleasant",
        "uncomfortable", "disappointing", "frustrate", "frustrated", "frustrating",
        "useless", "crash", "crisis", "fear", "killed", "dead", "war",
    ]
    .iter()
    .copied()
    .collect()
});

// Intensifiers
static INTENSIFIERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["very", "extremely", "absolutely", "really", "incredibly", "highly", "totally"]
        .iter()
        .copied()
        .collect()
});

// Negation words
static NEGATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "not", "no", "never", "nothing", "nobody", "nowhere", "neither", "nor", "none",
        "don't", "doesn't", "didn't", "isn't", "wasn't", "can't", "won't",
    ]
    .iter()
    .copied()
    .collect()
});

/// Lexicon classifier. Immutable after construction and safe to share.
#[derive(Debug, Clone, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentClassifier for LexiconClassifier {
    fn classify(&self, text: &str) -> Result<Sentiment, AnalysisError> {
        Ok(analyze_sentiment_text(text))
    }
}

pub fn analyze_sentiment_text(text: &str) -> Sentiment {
    let words: Vec<String> = text
        .to_lowercase()
        .replace('’', "'")
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    let mut positive_score = 0.0;
    let mut negative_score = 0.0;

    for (i, word) in words.iter().enumerate() {
        let multiplier = if i > 0 && INTENSIFIERS.contains(words[i - 1].as_str()) {
            1.5
        } else {
            1.0
        };

        // Negation in the previous 1-2 words
        let is_negated = (i > 0 && NEGATIONS.contains(words[i - 1].as_str()))
            || (i > 1 && NEGATIONS.contains(words[i - 2].as_str()));

        if POSITIVE_WORDS.contains(word.as_str()) {
            if is_negated {
                negative_score += multiplier;
            } else {
                positive_score += multiplier;
            }
        } else if NEGATIVE_WORDS.contains(word.as_str()) {
            if is_negated {
                positive_score += multiplier;
            } else {
                negative_score += multiplier;
            }
        }
    }

    let total_score = positive_score + negative_score;
    if total_score == 0.0 {
        return Sentiment {
            label: SentimentLabel::Neutral,
            score: 0.5,
        };
    }

    let pos_ratio = positive_score / total_score;
    let neg_ratio = negative_score / total_score;

    if pos_ratio > neg_ratio + 0.1 {
        Sentiment {
            label: SentimentLabel::Positive,
            score: pos_ratio,
        }
    } else if neg_ratio > pos_ratio + 0.1 {
        Sentiment {
            label: SentimentLabel::Negative,
            score: neg_ratio,
        }
    } else {
        Sentiment {
            label: SentimentLabel::Neutral,
            score: 0.5,
        }
    }
}
