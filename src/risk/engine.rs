//! Maps a decoded label to the risk metadata shown to callers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Safe,
    Malicious,
}

/// Display record for one label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskDisplay {
    pub level: RiskLevel,
    /// UI color class
    pub color: &'static str,
    /// Font Awesome icon class
    pub icon: &'static str,
}

pub const BENIGN: RiskDisplay = RiskDisplay {
    level: RiskLevel::Safe,
    color: "success",
    icon: "fa-check-circle",
};

pub const MALICIOUS: RiskDisplay = RiskDisplay {
    level: RiskLevel::Malicious,
    color: "danger",
    icon: "fa-skull-crossbones",
};

const TABLE: &[(&str, RiskDisplay)] = &[("benign", BENIGN), ("malicious", MALICIOUS)];

/// Total lookup. Any label outside the table is shown as malicious.
pub fn display_for(label: &str) -> RiskDisplay {
    TABLE
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, d)| *d)
        .unwrap_or(MALICIOUS)
}
