//! Label → risk display metadata.

mod engine;

pub use engine::{display_for, RiskDisplay, RiskLevel, BENIGN, MALICIOUS};
