//! Crate-wide error type. Feature extraction itself never fails; errors come
//! from model inference, label decoding and the batch table jobs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("onnx runtime: {0}")]
    Onnx(#[from] ort::OrtError),

    /// Input table lacks a column the job cannot run without.
    #[error("required column '{0}' is missing from the input table")]
    MissingColumn(String),

    /// Request payload lacks a field (or it has the wrong type).
    #[error("request field '{0}' is missing or not a string")]
    MissingField(&'static str),

    #[error("classifier model is not loaded")]
    ModelUnavailable,

    #[error("class id {id} is out of range for {classes} known labels")]
    UnknownClass { id: usize, classes: usize },

    #[error("classifier returned no probabilities")]
    EmptyProbabilities,
}

pub type Result<T> = std::result::Result<T, Error>;
