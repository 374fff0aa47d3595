//! Classifier seam: anything that maps a feature vector to class probabilities.

mod labels;
mod onnx;

pub use labels::LabelEncoder;
pub use onnx::OnnxClassifier;

use crate::features::FeatureVector;
use crate::{Error, Result};

pub trait Classifier: Send + Sync {
    /// Per-class probabilities, indexed by class id.
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f32>>;

    /// Most probable class id.
    fn predict(&self, features: &FeatureVector) -> Result<usize> {
        let proba = self.predict_proba(features)?;
        argmax(&proba).ok_or(Error::EmptyProbabilities)
    }
}

/// Index of the largest value; the first one wins on ties. NaN never wins.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}
