//! Engine error types

use miette::Diagnostic;
use thiserror::Error;

use sitekit_core::CoreError;

#[derive(Error, Debug, Diagnostic)]
pub enum EngineError {
    /// One or more placeholders had no value. All of them are listed, not
    /// just the first encountered.
    #[error("template '{template}' references {count} undefined placeholder(s): {list}",
        count = names.len(),
        list = names.join(", "))]
    #[diagnostic(code(sitekit::engine::undefined_placeholder))]
    UndefinedPlaceholders {
        template: String,
        names: Vec<String>,
        #[help]
        help: Option<String>,
    },

    #[error("directory {path} already exists")]
    #[diagnostic(
        code(sitekit::engine::target_exists),
        help("pick a different project name or remove the existing directory")
    )]
    TargetExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(sitekit::engine::core))]
    Core(#[from] CoreError),

    #[error("generated .gitignore does not exclude {file}")]
    #[diagnostic(code(sitekit::engine::credentials_exposed))]
    CredentialsExposed { file: String },

    #[error("failed to serialize {what}: {message}")]
    #[diagnostic(code(sitekit::engine::serialize))]
    Serialize { what: String, message: String },

    #[error("IO error: {0}")]
    #[diagnostic(code(sitekit::engine::io))]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
