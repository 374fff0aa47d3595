//! Request handling: URL in, labelled prediction (or structured failure) out.
//!
//! Extractor, classifier and label encoder are built once at process start
//! and handed in; nothing here is global.

use crate::features::UrlFeatureExtractor;
use crate::model::{Classifier, LabelEncoder};
use crate::risk::{display_for, RiskLevel};
use crate::{Error, Result};
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub success: bool,
    pub prediction: String,
    pub confidence: f32,
    pub risk_level: RiskLevel,
    pub risk_color: &'static str,
    pub icon: &'static str,
    pub probabilities: BTreeMap<String, f32>,
    pub url: String,
    pub request_id: String,
    pub ts: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub success: bool,
    pub error: String,
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Ok(Prediction),
    Err(Failure),
}

impl PredictResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, PredictResponse::Ok(_))
    }
}

pub struct UrlClassifier {
    extractor: UrlFeatureExtractor,
    model: Arc<dyn Classifier>,
    labels: LabelEncoder,
}

impl UrlClassifier {
    pub fn new(
        extractor: UrlFeatureExtractor,
        model: Arc<dyn Classifier>,
        labels: LabelEncoder,
    ) -> Self {
        Self {
            extractor,
            model,
            labels,
        }
    }

    pub fn classify(&self, url: &str) -> Result<Prediction> {
        self.classify_with_id(url, Uuid::new_v4().to_string())
    }

    fn classify_with_id(&self, url: &str, request_id: String) -> Result<Prediction> {
        let features = self.extractor.extract(url);
        debug!(request_id = %request_id, features = ?features.as_slice(), "features extracted");

        let class_id = self.model.predict(&features)?;
        let proba = self.model.predict_proba(&features)?;
        let label = self.labels.inverse_transform(class_id)?.to_string();
        let display = display_for(&label);

        let confidence = proba
            .iter()
            .copied()
            .filter(|p| !p.is_nan())
            .fold(None, |acc: Option<f32>, p| Some(acc.map_or(p, |a| a.max(p))))
            .ok_or(Error::EmptyProbabilities)?;
        let probabilities: BTreeMap<String, f32> = self
            .labels
            .classes()
            .iter()
            .cloned()
            .zip(proba.iter().copied())
            .collect();

        info!(
            request_id = %request_id,
            prediction = %label,
            confidence,
            "url classified"
        );
        Ok(Prediction {
            success: true,
            prediction: label,
            confidence,
            risk_level: display.level,
            risk_color: display.color,
            icon: display.icon,
            probabilities,
            url: url.to_string(),
            request_id,
            ts: Utc::now().to_rfc3339(),
        })
    }

    /// Handle a `{"url": ...}` request body. Every error becomes a [`Failure`].
    pub fn handle(&self, request: &serde_json::Value) -> PredictResponse {
        let request_id = Uuid::new_v4().to_string();
        let result = request
            .get("url")
            .and_then(serde_json::Value::as_str)
            .ok_or(Error::MissingField("url"))
            .and_then(|url| self.classify_with_id(url, request_id.clone()));
        match result {
            Ok(p) => PredictResponse::Ok(p),
            Err(e) => {
                warn!(request_id = %request_id, error = %e, "prediction failed");
                PredictResponse::Err(Failure {
                    success: false,
                    error: e.to_string(),
                    request_id,
                })
            }
        }
    }

    /// Handle one raw JSON request line.
    pub fn handle_line(&self, line: &str) -> PredictResponse {
        match serde_json::from_str::<serde_json::Value>(line) {
            Ok(v) => self.handle(&v),
            Err(e) => {
                let request_id = Uuid::new_v4().to_string();
                warn!(request_id = %request_id, error = %e, "invalid request body");
                PredictResponse::Err(Failure {
                    success: false,
                    error: Error::from(e).to_string(),
                    request_id,
                })
            }
        }
    }
}
