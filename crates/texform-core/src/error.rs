//! Error type for a compile attempt.
//!
//! Every variant is fatal to the current attempt: the caller gets one
//! pass/fail outcome and the `Display` text as diagnostic.

use thiserror::Error;

/// Fatal error of a compile attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// Writing the LaTeX source failed.
    #[error("failed to write LaTeX source: {0}")]
    StreamWrite(String),

    /// The engine output is not a well-formed PDF.
    #[error("cannot parse the PDF produced by LaTeX: {0}")]
    Parse(String),

    /// A required resource (page 1 resources, form link, form name) is absent.
    #[error("missing resource: {0}")]
    ResourceMissing(String),

    /// A required metadata field is absent on a form.
    #[error("form {form}: missing or invalid field /{field}")]
    FieldMissing {
        /// Key of the missing field.
        field: String,
        /// Resource name or object number identifying the form.
        form: String,
    },

    /// Bounding box or matrix has the wrong arity, or the matrix is not a
    /// pure translation.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// No extracted form carries the position of a fragment.
    #[error("no form object for text fragment {position}")]
    Correlation {
        /// 1-based fragment position.
        position: usize,
    },

    /// The external LaTeX run failed. The message is whatever the engine
    /// driver reported.
    #[error("LaTeX engine failed: {0}")]
    Engine(String),

    /// Any other error not covered by specific variants.
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for CompileError {
    fn from(err: std::io::Error) -> Self {
        CompileError::StreamWrite(err.to_string())
    }
}
