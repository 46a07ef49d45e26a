// Frequency-based keyword extraction.

use std::collections::HashMap;

use super::tokenizer::Tokenizer;

pub const TOP_KEYWORDS: usize = 5;

/// Returns up to `limit` most frequent alphabetic, non-stopword tokens,
/// lower-cased. Equal counts keep first-occurrence order.
pub fn extract_keywords(tokenizer: &dyn Tokenizer, text: &str, limit: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for token in tokenizer.tokenize(text) {
        if !token.is_alpha || token.is_stop {
            continue;
        }
        let word = token.text.to_lowercase();
        match positions.get(&word) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(word.clone(), counts.len());
                counts.push((word, 1));
            }
        }
    }

    // sort_by is stable, so ties stay in insertion order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(word, _)| word).collect()
}
