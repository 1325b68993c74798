use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("Input file {path} does not exist")]
    InputNotFound { path: PathBuf },

    #[error("Cannot read input file {path}: {source}")]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write output file {path}: {source}")]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refused to overwrite existing file {path}")]
    OverwriteDeclined { path: PathBuf },

    #[error("Files do not contain an equal number of layers: {path} has {found}, expected {expected}")]
    LayerCountMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("Layer {layer} is out of range for document {document} ({available} layers available)")]
    LayerIndexOutOfRange {
        document: usize,
        layer: usize,
        available: usize,
    },

    #[error("No input files were given")]
    NoInputs,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Data,
    UserAbort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SpliceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SpliceError::InputNotFound { .. }
            | SpliceError::InputUnreadable { .. }
            | SpliceError::OutputUnwritable { .. }
            | SpliceError::IoError(_) => ErrorCategory::Io,
            SpliceError::OverwriteDeclined { .. } => ErrorCategory::UserAbort,
            SpliceError::LayerCountMismatch { .. }
            | SpliceError::LayerIndexOutOfRange { .. }
            | SpliceError::NoInputs
            | SpliceError::ValidationError { .. } => ErrorCategory::Data,
            SpliceError::ConfigError { .. }
            | SpliceError::MissingConfigError { .. }
            | SpliceError::InvalidConfigValueError { .. }
            | SpliceError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    /// 決定退出碼：Medium=2、High=1、Critical=3
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::UserAbort => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SpliceError::InputNotFound { path } => {
                format!("Check that {} exists and the path is spelled correctly", path.display())
            }
            SpliceError::InputUnreadable { path, .. } => {
                format!("Make sure you have permission to read {}", path.display())
            }
            SpliceError::OutputUnwritable { path, .. } => format!(
                "Make sure you have permission to write to {} or choose another --output-file",
                path.display()
            ),
            SpliceError::OverwriteDeclined { .. } => {
                "Pass a different --output-file or use --yes to overwrite".to_string()
            }
            SpliceError::LayerCountMismatch { .. } => {
                "Slice every input with the same layer height and model height".to_string()
            }
            SpliceError::LayerIndexOutOfRange { available, .. } => format!(
                "Choose a --start-layer below {} or use fewer input files",
                available
            ),
            SpliceError::NoInputs => "Pass at least one G-code file".to_string(),
            SpliceError::ConfigError { .. }
            | SpliceError::MissingConfigError { .. }
            | SpliceError::InvalidConfigValueError { .. }
            | SpliceError::ConfigValidationError { .. } => {
                "Check the command line arguments or the TOML job file".to_string()
            }
            SpliceError::ValidationError { .. } => "Run again with --verbose for details".to_string(),
            SpliceError::IoError(_) => "Check file permissions and free disk space".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SpliceError::InputNotFound { path } | SpliceError::InputUnreadable { path, .. } => {
                format!(
                    "File {} does not exist or you do not have permission to read it",
                    path.display()
                )
            }
            SpliceError::OutputUnwritable { path, .. } => {
                format!("You do not have permission to write to {}", path.display())
            }
            SpliceError::OverwriteDeclined { path } => {
                format!("Aborted, {} was left untouched", path.display())
            }
            SpliceError::LayerCountMismatch { .. } => {
                "Files do not contain an equal number of layers!".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpliceError>;
