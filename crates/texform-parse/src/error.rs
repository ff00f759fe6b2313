//! Error types for the parsing and extraction layer.
//!
//! Uses [`thiserror`] for error derivation. [`BackendError`] carries lopdf
//! and extraction failures and converts into [`CompileError`].

use texform_core::CompileError;
use thiserror::Error;

/// Error type for parsing the engine output and extracting forms.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The PDF structure could not be parsed or an object has the wrong type.
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// A resource the extraction needs is absent.
    #[error("missing resource: {0}")]
    ResourceMissing(String),

    /// A metadata field is absent or not a usable number.
    #[error("form {form}: missing or invalid field /{field}")]
    FieldMissing { field: String, form: String },

    /// Bounding box or matrix is malformed or not a pure translation.
    #[error("geometry error: {0}")]
    Geometry(String),
}

impl BackendError {
    pub(crate) fn field(field: &str, form: impl Into<String>) -> Self {
        BackendError::FieldMissing {
            field: field.to_string(),
            form: form.into(),
        }
    }
}

impl From<BackendError> for CompileError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => CompileError::Parse(msg),
            BackendError::ResourceMissing(msg) => CompileError::ResourceMissing(msg),
            BackendError::FieldMissing { field, form } => {
                CompileError::FieldMissing { field, form }
            }
            BackendError::Geometry(msg) => CompileError::Geometry(msg),
        }
    }
}
