//! Fixed word and character lists behind the lexical heuristics.
//!
//! The online extractor and the batch builder use different keyword lists.
//! The classifier is trained on batch columns and served with online vectors,
//! so the two lists must not be merged without checking which one the
//! persisted model was fit on.

use crate::config::FeaturesConfig;

/// Known URL-shortener domains, matched as substrings of the lower-cased URL.
pub const SHORTENERS: &[&str] = &["bit.ly", "tinyurl.com", "t.co", "goo.gl", "buff.ly"];

/// Online extractor keywords (feature 14).
pub const SENSITIVE_KEYWORDS: &[&str] = &[
    "login", "bank", "paypal", "account", "password", "security", "verify",
];

/// Characters counted by feature 10.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()+=[]{}|;:,.<>?/~`";

/// Batch builder keywords (`suspicious_word_count`). Overlaps the online list only partially.
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "login", "verify", "update", "free", "secure", "bank", "account", "password", "confirm",
    "signin", "validate", "urgent", "limited", "win", "prize",
];

pub(crate) fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Lists used by the online extractor. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    pub shorteners: Vec<String>,
    pub sensitive_keywords: Vec<String>,
    pub special_chars: Vec<char>,
}

impl Lexicon {
    pub fn from_config(config: &FeaturesConfig) -> Self {
        let mut special_chars: Vec<char> = config.special_chars.chars().collect();
        special_chars.sort_unstable();
        special_chars.dedup();
        Self {
            shorteners: config.shorteners.iter().map(|s| s.to_lowercase()).collect(),
            sensitive_keywords: config
                .sensitive_keywords
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
            special_chars,
        }
    }

    pub fn is_special(&self, c: char) -> bool {
        self.special_chars.binary_search(&c).is_ok()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::from_config(&FeaturesConfig::default())
    }
}
