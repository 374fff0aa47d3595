//! ONNX Runtime classifier. Input: [1, 15] f32. Output: class probabilities.
//! Uses `ort`; if the model file is missing, loads in unavailable mode and every
//! prediction fails with [`Error::ModelUnavailable`].

use super::Classifier;
use crate::features::{FeatureVector, FEATURE_DIM};
use crate::{Error, Result};
use ndarray::{Array2, CowArray};
use ort::{Environment, GraphOptimizationLevel, Session, SessionBuilder, Value};
use std::path::Path;

pub struct OnnxClassifier {
    session: Option<Session>,
}

impl OnnxClassifier {
    /// Load model from path. A missing file is not an error (see module docs).
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "ONNX model not found; classification disabled");
            return Ok(Self { session: None });
        }

        let environment = Environment::builder()
            .with_name("urlsentry")
            .build()?
            .into_arc();
        let session = SessionBuilder::new(&environment)?
            .with_optimization_level(GraphOptimizationLevel::Level1)?
            .with_model_from_file(path)?;

        tracing::info!(
            path = %path.display(),
            inputs = session.inputs.len(),
            outputs = session.outputs.len(),
            "ONNX model loaded"
        );
        Ok(Self {
            session: Some(session),
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }
}

impl Classifier for OnnxClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f32>> {
        let Some(ref session) = self.session else {
            return Err(Error::ModelUnavailable);
        };

        let arr = Array2::from_shape_fn((1, FEATURE_DIM), |(_, j)| features.values[j]);
        let input = CowArray::from(arr.into_dyn());
        let value = Value::from_array(session.allocator(), &input)?;
        let outputs = session.run(vec![value])?;

        // Converted sklearn classifiers emit [label, probabilities]; single-output models emit probabilities.
        let out = outputs
            .get(1)
            .or_else(|| outputs.first())
            .ok_or(Error::EmptyProbabilities)?;
        let tensor = out.try_extract::<f32>()?;
        let proba: Vec<f32> = tensor.view().iter().copied().collect();
        if proba.is_empty() {
            return Err(Error::EmptyProbabilities);
        }
        Ok(proba)
    }
}
