//! Lexical URL feature extraction for online classification.

pub mod lexicon;
pub mod url_parts;
mod extractor;

pub use extractor::UrlFeatureExtractor;
pub use lexicon::Lexicon;
pub use url_parts::ParsedUrl;

use serde::{Deserialize, Serialize};

/// Number of values the classifier expects per URL.
pub const FEATURE_DIM: usize = 15;

/// Names of the vector components, in model input order.
pub const FEATURE_NAMES: [&str; FEATURE_DIM] = [
    "url_length",
    "host_length",
    "host_label_count",
    "host_dot_count",
    "host_hyphen_count",
    "path_length",
    "query_length",
    "query_param_count",
    "digit_count",
    "special_char_count",
    "has_ip_pattern",
    "has_shortener",
    "path_has_double_slash",
    "sensitive_keyword_count",
    "has_percent_digits",
];

/// Fixed-size model input. Order is an implicit contract with the trained classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: [f32; FEATURE_DIM],
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }
}

/// Right-pad with zeros, then truncate, to exactly [`FEATURE_DIM`] values.
pub fn pad_to_dim(raw: &[f32]) -> FeatureVector {
    let mut values = [0.0f32; FEATURE_DIM];
    let copy = raw.len().min(FEATURE_DIM);
    values[..copy].copy_from_slice(&raw[..copy]);
    FeatureVector { values }
}
