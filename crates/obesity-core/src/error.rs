use std::error::Error;
use std::fmt;

/// Error taxonomy for the prediction pipeline.
///
/// `ArtifactLoad` is fatal at startup; the remaining variants are
/// per-request failures that abort the request but never the process.
#[derive(Debug)]
pub enum PipelineError {
    /// An artifact file is missing or corrupt.
    ArtifactLoad(String),
    /// Raw input failed a domain or vocabulary check.
    Validation {
        field: &'static str,
        message: String,
    },
    /// A categorical value has no code in its fitted encoder.
    UnknownCategory {
        field: &'static str,
        value: String,
    },
    /// The classifier rejected the encoded vector. Indicates an
    /// encoder/classifier contract violation, not a user-input problem.
    Inference(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::ArtifactLoad(msg) => write!(f, "failed to load artifacts: {}", msg),
            PipelineError::Validation { field, message } => {
                write!(f, "invalid value for {}: {}", field, message)
            }
            PipelineError::UnknownCategory { field, value } => {
                write!(f, "unknown category '{}' for field {}", value, field)
            }
            PipelineError::Inference(msg) => write!(f, "inference failed: {}", msg),
        }
    }
}

impl Error for PipelineError {}
