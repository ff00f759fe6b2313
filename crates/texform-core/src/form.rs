//! Compiled form objects.

use crate::geometry::{BBox, Vector};

/// The compiled rendering of one text fragment: a Form XObject produced by
/// the LaTeX engine, validated and ready to be placed.
///
/// The form is drawn by translating by `translation` relative to the
/// baseline origin of the text; `bbox` is its extent in form space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedForm {
    /// Resource name of the form in the engine's page resources (e.g. `Fm1`).
    pub name: String,
    /// Correlation identifier: the 1-based position of the fragment that
    /// produced this form.
    pub id: usize,
    /// Bounding box from the form's `/BBox`.
    pub bbox: BBox,
    /// Distance from baseline to the lowest extent, in units of 0.01 bp.
    pub depth: i32,
    /// Horizontal stretch factor the fragment was typeset with.
    pub stretch: f64,
    /// Offset from the baseline origin to the form origin.
    pub translation: Vector,
}

impl GeneratedForm {
    /// Depth in bp.
    pub fn depth_bp(&self) -> f64 {
        f64::from(self.depth) / 100.0
    }

    /// Width of the typeset box after applying the stretch factor.
    pub fn stretched_width(&self) -> f64 {
        self.bbox.width() * self.stretch
    }
}
