//! LaTeX engine variants and the PDF keys they use to hand back metadata.

/// The external LaTeX engine a compile attempt targets.
///
/// The variants differ in how colors are pushed and in how per-form
/// metadata reaches the PDF: pdfTeX and LuaTeX attach it to the Form
/// XObject itself, XeTeX writes separate metadata dictionaries linked from
/// the page resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EngineKind {
    #[default]
    Pdftex,
    Xetex,
    Luatex,
}

impl EngineKind {
    /// True if form metadata travels in a side-channel array rather than on
    /// the form dictionaries.
    pub fn uses_side_channel(self) -> bool {
        self == EngineKind::Xetex
    }

    /// Executable name conventionally used for this engine.
    pub fn program(self) -> &'static str {
        match self {
            EngineKind::Pdftex => "pdflatex",
            EngineKind::Xetex => "xelatex",
            EngineKind::Luatex => "lualatex",
        }
    }
}

/// Keys of the metadata written into the PDF for each form.
pub mod keys {
    /// Correlation identifier (1-based fragment position).
    pub const ID: &str = "TexformId";
    /// Box depth in units of 0.01 bp.
    pub const DEPTH: &str = "TexformDepth";
    /// Horizontal stretch factor.
    pub const STRETCH: &str = "TexformStretch";
    /// Side-channel only: reference to the Form XObject.
    pub const XFORM: &str = "TexformXForm";
    /// Side-channel only: resource key of the metadata array.
    pub const LINK: &str = "Texform";
}
