//! texform-parse: reading the PDF produced by the LaTeX engine.
//!
//! This crate opens the engine output with lopdf ([`CompiledDocument`]),
//! copies everything reachable from the first page's resources into a
//! [`ResourceRegistry`], and extracts the validated [`GeneratedForm`]s from
//! it with a [`FormExtractor`]. It depends on texform-core for shared data
//! types.
//!
//! [`GeneratedForm`]: texform_core::GeneratedForm

pub mod error;
pub mod forms;
pub mod lopdf_backend;
pub mod resources;

#[cfg(test)]
mod test_pdf;

pub use error::BackendError;
pub use forms::FormExtractor;
pub use lopdf_backend::CompiledDocument;
pub use resources::ResourceRegistry;
pub use texform_core;
