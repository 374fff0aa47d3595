//! urlsentry — lexical URL classification.
//!
//! Modular structure:
//! - [`features`] — Online 15-dim URL feature extraction
//! - [`model`] — Classifier seam, ONNX inference, label decoding
//! - [`risk`] — Label → display metadata
//! - [`service`] — Request handling around extractor + classifier
//! - [`batch`] — Offline dataset sampling and training-table features
//! - [`logging`] — Tracing setup and JSON line output

pub mod batch;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod model;
pub mod risk;
pub mod service;

pub use config::SentryConfig;
pub use error::{Error, Result};
pub use features::{FeatureVector, UrlFeatureExtractor, FEATURE_DIM};
pub use logging::StructuredLogger;
pub use model::{Classifier, LabelEncoder, OnnxClassifier};
pub use risk::RiskDisplay;
pub use service::{PredictResponse, UrlClassifier};
