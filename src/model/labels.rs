//! Class id ↔ label mapping, as exported from the training run.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelsFile {
    Object { classes: Vec<String> },
    Bare(Vec<String>),
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Read `{"classes": [...]}` or a bare JSON array.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let classes = match serde_json::from_str::<LabelsFile>(&data)? {
            LabelsFile::Object { classes } | LabelsFile::Bare(classes) => classes,
        };
        Ok(Self { classes })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn inverse_transform(&self, id: usize) -> Result<&str> {
        self.classes
            .get(id)
            .map(String::as_str)
            .ok_or(Error::UnknownClass {
                id,
                classes: self.classes.len(),
            })
    }

    pub fn transform(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }
}

impl Default for LabelEncoder {
    fn default() -> Self {
        Self::new(vec!["benign".to_string(), "malicious".to_string()])
    }
}
