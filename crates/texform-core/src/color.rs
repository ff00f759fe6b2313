//! RGB colors as resolved by the style cascade.

/// Simple RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// Create a new RGB color with values in [0.0, 1.0].
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// A gray level, stored with equal channels.
    pub fn gray(level: f64) -> Self {
        Self::new(level, level, level)
    }

    /// Black color (0, 0, 0).
    pub fn black() -> Self {
        Self::gray(0.0)
    }

    /// White color (1, 1, 1).
    pub fn white() -> Self {
        Self::gray(1.0)
    }

    /// True if all three channels are equal.
    pub fn is_gray(&self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}
