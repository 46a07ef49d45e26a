// Tokenization and stopword flagging for English text.
// Splits words from punctuation and separates clitics the way common English
// tokenizers do ("don't" -> "do" + "n't"), so stopword lookups see the stem.
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// A single linguistic token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub is_alpha: bool,
    pub is_stop: bool,
}

/// Splits text into tokens annotated as alphabetic and/or stopword.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

// Numbers with separators, letter/digit runs (with inner apostrophes), or any single other symbol.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\p{N}+(?:[.,]\p{N}+)+|[\p{L}\p{N}]+(?:['’][\p{L}\p{N}]+)*|[^\s\p{L}\p{N}]").unwrap()
});

// Suffixes split off after an apostrophe, besides "n't".
const CLITICS: [&str; 6] = ["s", "re", "ve", "ll", "d", "m"];

// English stopwords, modeled on the spaCy `en` list.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything",
        "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became", "because",
        "become", "becomes", "becoming", "been", "before", "beforehand", "behind", "being",
        "below", "beside", "besides", "between", "beyond", "both", "bottom", "but", "by",
        "ca", "call", "can", "cannot", "could", "did", "do", "does", "doing", "done", "down",
        "due", "during", "each", "eight", "either", "eleven", "else", "elsewhere", "empty",
        "enough", "even", "ever", "every", "everyone", "everything", "everywhere", "except",
        "few", "fifteen", "fifty", "first", "five", "for", "former", "formerly", "forty",
        "four", "from", "front", "full", "further", "get", "give", "go", "had", "has", "have",
        "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers",
        "herself", "him", "himself", "his", "how", "however", "hundred", "i", "if", "in",
        "indeed", "into", "is", "it", "its", "itself", "just", "keep", "last", "latter",
        "latterly", "least", "less", "made", "make", "many", "may", "me", "meanwhile", "might",
        "mine", "more", "moreover", "most", "mostly", "move", "much", "must", "my", "myself",
        "name", "namely", "neither", "never", "nevertheless", "next", "nine", "no", "nobody",
        "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on",
        "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
        "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put", "quite",
        "rather", "re", "really", "regarding", "same", "say", "see", "seem", "seemed",
        "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
        "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
        "sometimes", "somewhere", "still", "such", "take", "ten", "than", "that", "the",
        "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
        "therefore", "therein", "thereupon", "these", "they", "third", "this", "those",
        "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
        "top", "toward", "towards", "twelve", "twenty", "two", "under", "unless", "until",
        "up", "upon", "us", "used", "using", "various", "very", "via", "was", "we", "well",
        "were", "what", "whatever", "when", "whence", "whenever", "where", "whereafter",
        "whereas", "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while",
        "whither", "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within",
        "without", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
        "n't", "'s", "'re", "'ve", "'ll", "'d", "'m",
    ]
    .iter()
    .copied()
    .collect()
});

/// Case-insensitive stopword check against the built-in English list.
pub fn is_stopword(word: &str) -> bool {
    STOP_WORDS.contains(word.to_lowercase().replace('’', "'").as_str())
}

/// Rule-based English tokenizer. Holds no state, so one instance can be
/// shared across any number of concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct EnglishTokenizer;

impl EnglishTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for EnglishTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        for m in TOKEN_PATTERN.find_iter(text) {
            for piece in split_clitic(m.as_str()) {
                tokens.push(make_token(piece));
            }
        }
        tokens
    }
}

fn make_token(text: &str) -> Token {
    Token {
        text: text.to_string(),
        is_alpha: !text.is_empty() && text.chars().all(char::is_alphabetic),
        is_stop: is_stopword(text),
    }
}

// "don't" -> ["do", "n't"], "it's" -> ["it", "'s"]. Names and elisions
// ("O'Neill", "l'hotel") and "rock'n'roll" stay whole.
fn split_clitic(word: &str) -> Vec<&str> {
    let apostrophes = word.chars().filter(|c| *c == '\'' || *c == '’').count();
    if apostrophes != 1 {
        return vec![word];
    }
    let lower = word.to_lowercase();
    if (lower.ends_with("n't") || lower.ends_with("n’t")) && word.chars().count() > 3 {
        // "n't" and "n’t" differ in byte length
        let suffix_len = if lower.ends_with("n't") { 3 } else { "n’t".len() };
        let split = word.len() - suffix_len;
        return vec![&word[..split], &word[split..]];
    }
    match word.find(['\'', '’']) {
        Some(idx) if idx > 0 => {
            let apostrophe_len = word[idx..].chars().next().map_or(1, char::len_utf8);
            let suffix = word[idx + apostrophe_len..].to_lowercase();
            if CLITICS.contains(&suffix.as_str()) {
                vec![&word[..idx], &word[idx..]]
            } else {
                vec![word]
            }
        }
        _ => vec![word],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_tokenize_separates_punctuation() {
        let tokens = EnglishTokenizer::new().tokenize("I love this product, it works great!");
        assert_eq!(
            texts(&tokens),
            vec!["I", "love", "this", "product", ",", "it", "works", "great", "!"]
        );
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(EnglishTokenizer::new().tokenize("").is_empty());
        assert!(EnglishTokenizer::new().tokenize("   \n\t").is_empty());
    }

    #[test]
    fn test_clitics_split() {
        let tokens = EnglishTokenizer::new().tokenize("don't it's can't");
        assert_eq!(texts(&tokens), vec!["do", "n't", "it", "'s", "ca", "n't"]);
        assert!(tokens.iter().all(|t| t.is_stop));
    }

    #[test]
    fn test_alpha_flags() {
        let tokens = EnglishTokenizer::new().tokenize("abc 123 x1 covid19 é");
        let flags: Vec<(&str, bool)> = tokens.iter().map(|t| (t.text.as_str(), t.is_alpha)).collect();
        assert_eq!(
            flags,
            vec![("abc", true), ("123", false), ("x1", false), ("covid19", false), ("é", true)]
        );
    }

    #[test]
    fn test_names_and_elisions_stay_whole() {
        let tokens = EnglishTokenizer::new().tokenize("O'Neill l'hotel we'll I’m");
        assert_eq!(texts(&tokens), vec!["O'Neill", "l'hotel", "we", "'ll", "I", "’m"]);
        assert!(!tokens[0].is_alpha);
        assert!(!tokens[1].is_alpha);
    }

    #[test]
    fn test_stopwords_case_insensitive() {
        assert!(is_stopword("The"));
        assert!(is_stopword("THE"));
        assert!(!is_stopword("product"));
        let tokens = EnglishTokenizer::new().tokenize("The Cat");
        assert!(tokens[0].is_stop);
        assert!(!tokens[1].is_stop);
    }

    #[test]
    fn test_numbers_kept_whole() {
        let tokens = EnglishTokenizer::new().tokenize("costs 1,299.50 today");
        assert_eq!(texts(&tokens), vec!["costs", "1,299.50", "today"]);
    }
}
