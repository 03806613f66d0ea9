use thiserror::Error;

/// Error type for gtars-bbisource operations.
#[derive(Error, Debug)]
pub enum BbiSourceError {
    /// The underlying bigWig/bigBed reader failed.
    #[error("Error reading BBI file: {0}")]
    ReaderError(String),

    /// A BBI file could not be opened.
    #[error("Can't open BBI file {path}: {reason}")]
    OpenError { path: String, reason: String },

    /// A configuration value is out of range.
    #[error("Invalid bbi source config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for gtars-bbisource operations.
pub type Result<T> = std::result::Result<T, BbiSourceError>;
