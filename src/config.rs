//! Runtime configuration. Word lists default to the constants in
//! [`crate::features::lexicon`] and can be extended here without code changes.

use crate::features::lexicon::{self, owned};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentryConfig {
    /// Path to the ONNX URL classifier
    pub model_path: PathBuf,
    /// Path to the label encoder classes (JSON)
    pub labels_path: PathBuf,
    /// Online feature lists
    pub features: FeaturesConfig,
    /// Offline dataset jobs
    pub batch: BatchConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub shorteners: Vec<String>,
    pub sensitive_keywords: Vec<String>,
    pub special_chars: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Keyword list for `suspicious_word_count` (differs from the online list)
    pub suspicious_keywords: Vec<String>,
    /// Max rows kept per label when balancing
    pub per_label: usize,
    /// Sampling seed
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("url_classifier.onnx"),
            labels_path: PathBuf::from("labels.json"),
            features: FeaturesConfig::default(),
            batch: BatchConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            shorteners: owned(lexicon::SHORTENERS),
            sensitive_keywords: owned(lexicon::SENSITIVE_KEYWORDS),
            special_chars: lexicon::SPECIAL_CHARS.to_string(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            suspicious_keywords: owned(lexicon::SUSPICIOUS_KEYWORDS),
            per_label: 20_000,
            seed: 42,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl SentryConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<SentryConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}
