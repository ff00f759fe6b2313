//! Converter configuration.

use texform_core::EngineKind;

/// Environment variable that marks the installed pdfTeX as predating the
/// color stack (version 1.40). Any value enables it.
pub const ANCIENT_PDFTEX_ENV: &str = "TEXFORM_ANCIENT_PDFTEX";

/// Options for one compile attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatexOptions {
    /// Engine the generated source targets.
    pub engine: EngineKind,
    /// Skip the pdfTeX version check and switch colors with `\color`
    /// instead of the PDF color stack.
    pub ancient_pdftex: bool,
}

impl LatexOptions {
    pub fn new(engine: EngineKind) -> Self {
        Self {
            engine,
            ancient_pdftex: false,
        }
    }

    /// Options for `engine`, with `ancient_pdftex` taken from
    /// [`ANCIENT_PDFTEX_ENV`].
    pub fn from_env(engine: EngineKind) -> Self {
        Self::new(engine).with_ancient_pdftex(std::env::var_os(ANCIENT_PDFTEX_ENV).is_some())
    }

    pub fn with_ancient_pdftex(mut self, ancient: bool) -> Self {
        self.ancient_pdftex = ancient;
        self
    }
}
