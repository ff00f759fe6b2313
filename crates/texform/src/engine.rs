//! Interface to the external LaTeX engine.

use texform_core::CompileError;
use thiserror::Error;

/// Failure reported by a [`TexEngine`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not be started or its files could not be handled.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The engine ran but did not produce a PDF. Holds the relevant part of
    /// its log.
    #[error("LaTeX run failed: {0}")]
    Failed(String),
}

impl From<EngineError> for CompileError {
    fn from(err: EngineError) -> Self {
        CompileError::Engine(err.to_string())
    }
}

/// Runs LaTeX on a source program and returns the PDF it produced.
///
/// Implementations own process management, working directories and
/// timeouts. The call blocks until the run is over.
pub trait TexEngine {
    fn run(&mut self, source: &[u8]) -> Result<Vec<u8>, EngineError>;
}

impl<F> TexEngine for F
where
    F: FnMut(&[u8]) -> Result<Vec<u8>, EngineError>,
{
    fn run(&mut self, source: &[u8]) -> Result<Vec<u8>, EngineError> {
        self(source)
    }
}
