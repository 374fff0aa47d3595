//! Online extractor: URL string → 15 lexical features.
//!
//! Deliberately narrower than the batch builder (naive host label count instead
//! of public-suffix decomposition, its own keyword list). See `batch::enrich`.

use super::{pad_to_dim, FeatureVector, Lexicon, ParsedUrl};
use crate::config::FeaturesConfig;
use regex::Regex;
use std::sync::OnceLock;

/// Dotted quad anywhere in the URL, bounded by word boundaries.
const IP_PATTERN: &str = r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b";

static IP_REGEX: OnceLock<Regex> = OnceLock::new();

fn ip_regex() -> &'static Regex {
    IP_REGEX.get_or_init(|| Regex::new(IP_PATTERN).expect("IP pattern"))
}

/// Pure, reentrant extractor. Build once at startup and share.
#[derive(Debug, Clone)]
pub struct UrlFeatureExtractor {
    lexicon: Lexicon,
    ip_pattern: &'static Regex,
}

impl UrlFeatureExtractor {
    pub fn new(config: FeaturesConfig) -> Self {
        Self::with_lexicon(Lexicon::from_config(&config))
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            ip_pattern: ip_regex(),
        }
    }

    /// Compute the feature vector for `url`. Total: never fails, never panics.
    pub fn extract(&self, url: &str) -> FeatureVector {
        let parsed = ParsedUrl::parse(url);
        let host = parsed.host().to_lowercase();
        let path = parsed.path.to_lowercase();
        let query = parsed.query.to_lowercase();
        let lower_url = url.to_lowercase();

        let mut raw: Vec<f32> = Vec::with_capacity(super::FEATURE_DIM);

        raw.push(char_len(url));
        raw.push(char_len(&host));
        raw.push(host.split('.').filter(|s| !s.is_empty()).count() as f32);
        raw.push(host.matches('.').count() as f32);
        raw.push(host.matches('-').count() as f32);
        raw.push(char_len(&path));
        raw.push(char_len(&query));
        raw.push(query_param_count(&parsed.query));
        raw.push(url.chars().filter(char::is_ascii_digit).count() as f32);
        raw.push(url.chars().filter(|c| self.lexicon.is_special(*c)).count() as f32);
        raw.push(flag(self.ip_pattern.is_match(url)));
        raw.push(flag(
            self.lexicon
                .shorteners
                .iter()
                .any(|s| lower_url.contains(s.as_str())),
        ));
        raw.push(flag(path.contains("//")));
        raw.push(
            self.lexicon
                .sensitive_keywords
                .iter()
                .filter(|w| lower_url.contains(w.as_str()))
                .count() as f32,
        );
        raw.push(flag(has_percent_digits(url)));

        pad_to_dim(&raw)
    }
}

impl Default for UrlFeatureExtractor {
    fn default() -> Self {
        Self::with_lexicon(Lexicon::default())
    }
}

fn char_len(s: &str) -> f32 {
    s.chars().count() as f32
}

fn flag(b: bool) -> f32 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// `&`-separated segment count; an empty query counts as zero parameters.
fn query_param_count(query: &str) -> f32 {
    if query.is_empty() {
        0.0
    } else {
        query.split('&').count() as f32
    }
}

/// A `%` is present and some `%`-split fragment contains a digit.
/// Heuristic only: does not check for valid `%XX` escapes.
fn has_percent_digits(url: &str) -> bool {
    url.contains('%')
        && url
            .split('%')
            .any(|fragment| fragment.chars().any(|c| c.is_ascii_digit()))
}
