//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

#![allow(dead_code)] // Some variants/methods are for future use

use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Validation failed (variable set or topology)
    #[error("Validation failed: {message}")]
    #[diagnostic(code(sitekit::cli::validation))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Template resolution failed
    #[error("Render error: {message}")]
    #[diagnostic(code(sitekit::cli::render))]
    Render {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Project structure or loading error
    #[error("Project error: {message}")]
    #[diagnostic(code(sitekit::cli::project))]
    Project {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// The Kubernetes API rejected or failed an operation
    #[error("Cluster error: {message}")]
    #[diagnostic(code(sitekit::cli::cluster))]
    Cluster {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(sitekit::cli::io))]
    Io { message: String },

    /// Wrapped error for passthrough (stores the formatted message)
    #[error("{message}")]
    #[diagnostic(code(sitekit::cli::error))]
    Other { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation { .. } => exit_codes::VALIDATION_ERROR,
            CliError::Render { .. } => exit_codes::RENDER_ERROR,
            CliError::Project { .. } => exit_codes::PROJECT_ERROR,
            CliError::Cluster { .. } => exit_codes::CLUSTER_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            help: None,
        }
    }

    /// Create a validation error with help text
    pub fn validation_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
            help: None,
        }
    }

    /// Create a project error
    pub fn project(message: impl Into<String>) -> Self {
        Self::Project {
            message: message.into(),
            help: None,
        }
    }

    /// Create a cluster error
    pub fn cluster(message: impl Into<String>) -> Self {
        Self::Cluster {
            message: message.into(),
            help: None,
        }
    }

    /// Create a wrapped passthrough error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<sitekit_core::CoreError> for CliError {
    fn from(err: sitekit_core::CoreError) -> Self {
        match &err {
            sitekit_core::CoreError::Validation { .. } => CliError::Validation {
                message: err.to_string(),
                help: None,
            },
            sitekit_core::CoreError::ProjectNotFound { .. }
            | sitekit_core::CoreError::MissingManifest { .. }
            | sitekit_core::CoreError::InvalidConfig { .. } => CliError::Project {
                message: err.to_string(),
                help: None,
            },
            _ => CliError::Other {
                message: err.to_string(),
            },
        }
    }
}

impl From<sitekit_engine::EngineError> for CliError {
    fn from(err: sitekit_engine::EngineError) -> Self {
        match &err {
            sitekit_engine::EngineError::UndefinedPlaceholders { help, .. } => CliError::Render {
                message: err.to_string(),
                help: help.clone(),
            },
            sitekit_engine::EngineError::Core(core) => CliError::Validation {
                message: core.to_string(),
                help: None,
            },
            sitekit_engine::EngineError::TargetExists { .. } => CliError::Project {
                message: err.to_string(),
                help: Some(
                    "pick a different project name or remove the existing directory".to_string(),
                ),
            },
            sitekit_engine::EngineError::Io(_) => CliError::Io {
                message: err.to_string(),
            },
            _ => CliError::Render {
                message: err.to_string(),
                help: None,
            },
        }
    }
}

impl From<sitekit_kube::KubeError> for CliError {
    fn from(err: sitekit_kube::KubeError) -> Self {
        match &err {
            sitekit_kube::KubeError::Topology(_) => CliError::Validation {
                message: err.to_string(),
                help: None,
            },
            sitekit_kube::KubeError::ToolUnavailable { hint, .. } => CliError::Cluster {
                message: err.to_string(),
                help: Some(hint.clone()),
            },
            sitekit_kube::KubeError::Core(_) => CliError::Project {
                message: err.to_string(),
                help: None,
            },
            sitekit_kube::KubeError::Io(_) => CliError::Io {
                message: err.to_string(),
            },
            _ => CliError::Cluster {
                message: err.to_string(),
                help: None,
            },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
