//! Core error types

use std::fmt;

use thiserror::Error;

/// A single validation violation, tied to the field that caused it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_violations(violations: &[Violation]) -> String {
    let lines: Vec<String> = violations.iter().map(|v| format!("  - {}", v)).collect();
    format!(
        "configuration has {} violation(s):\n{}",
        violations.len(),
        lines.join("\n")
    )
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("project not found: {path}")]
    ProjectNotFound { path: String },

    #[error("invalid sitekit.yaml: {message}")]
    InvalidConfig { message: String },

    #[error("missing manifest file: {file}")]
    MissingManifest { file: String },

    #[error("{}", format_violations(violations))]
    Validation { violations: Vec<Violation> },

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
