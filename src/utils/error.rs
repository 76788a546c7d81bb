use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitError {
    #[error("Failed to read {path:?}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("File {path} is not valid UTF-8")]
    EncodingError { path: String },

    #[error("Malformed manifest {path}: {source}")]
    ManifestParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Manifest {path} must contain a JSON object at the top level")]
    ManifestShapeError { path: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Secret generation failed: {message}")]
    SecretError { message: String },

    #[error("Cannot derive a project name from {path:?}")]
    ProjectNameError { path: PathBuf },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Manifest,
    Output,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl InitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            InitError::ReadError { .. } | InitError::EncodingError { .. } => ErrorCategory::Input,
            InitError::ManifestParseError { .. }
            | InitError::ManifestShapeError { .. }
            | InitError::SerializationError(_) => ErrorCategory::Manifest,
            InitError::WriteError { .. } => ErrorCategory::Output,
            InitError::ConfigError { .. }
            | InitError::InvalidConfigValueError { .. }
            | InitError::ProjectNameError { .. }
            | InitError::PatternError(_) => ErrorCategory::Configuration,
            InitError::IoError(_) | InitError::SecretError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Manifest => ErrorSeverity::High,
            // 部分檔案可能已寫入，目錄處於混合狀態
            ErrorCategory::Output | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            InitError::ReadError { path, .. } => format!(
                "Make sure {} exists and is readable; run the initializer from a fresh template checkout",
                path.display()
            ),
            InitError::EncodingError { path } => {
                format!("Convert {path} to UTF-8 before running the initializer")
            }
            InitError::ManifestParseError { path, .. } | InitError::ManifestShapeError { path } => {
                format!("Fix the JSON in {path}; it must be a single top-level object")
            }
            InitError::WriteError { path, .. } => format!(
                "Check permissions on {}; files written before the failure are not rolled back",
                path.display()
            ),
            InitError::ProjectNameError { .. } => {
                "Pass a target directory with a named final path component".to_string()
            }
            InitError::SecretError { .. } => {
                "The operating system random source is unavailable; retry on a healthy host"
                    .to_string()
            }
            InitError::ConfigError { .. }
            | InitError::InvalidConfigValueError { .. }
            | InitError::PatternError(_) => {
                "Review stack-init.toml and the command line flags".to_string()
            }
            InitError::SerializationError(_) | InitError::IoError(_) => {
                "Re-run with --verbose for details".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Could not read the template: {self}"),
            ErrorCategory::Manifest => format!("The package manifest is invalid: {self}"),
            ErrorCategory::Output => format!("Could not write the initialized project: {self}"),
            ErrorCategory::Configuration => format!("Invalid configuration: {self}"),
            ErrorCategory::System => format!("Initialization failed: {self}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, InitError>;
