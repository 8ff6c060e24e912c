//! Font loading and text-run rasterization primitives.
//!
//! This module defines the `FontDriver` trait, the seam between the overlay
//! layout code and whatever actually turns text into coverage (a TrueType
//! rasterizer in production, a deterministic block renderer in tests).

use anyhow::Result;
use std::path::Path;

/// Vertical metrics of a font at its loaded size, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from the top of the line box to the baseline.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box.
    pub descent: f32,
}

/// Coverage of a rasterized text run.
///
/// `origin_x`/`origin_y` locate the mask's upper-left pixel relative to the
/// upper-left corner of the run's line box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageMask {
    pub width: u32,
    pub height: u32,
    pub origin_x: i32,
    pub origin_y: i32,
    /// Row-major coverage, one byte per pixel, `width * height` long.
    pub coverage: Vec<u8>,
}

impl CoverageMask {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Coverage at mask-local `(x, y)`.
    pub fn at(&self, x: u32, y: u32) -> u8 {
        self.coverage[(y * self.width + x) as usize]
    }
}

/// Font driver trait.
///
/// Implementors handle:
/// - Font loading from a file at a fixed pixel size
/// - Line metrics and horizontal advance of a run
/// - Rasterizing a run to a coverage mask
///
/// The `TextRasterizer` uses this trait to lay out and blend the overlay.
pub trait FontDriver {
    /// Driver-specific font handle, already bound to a pixel size.
    type Font;

    /// Load a font file at `size_px`.
    ///
    /// # Returns
    /// Font handle, or error if the file is missing or is not a usable font
    fn load_font(&self, path: &Path, size_px: f32) -> Result<Self::Font>;

    /// Vertical metrics of `font`.
    fn line_metrics(&self, font: &Self::Font) -> LineMetrics;

    /// Horizontal distance the pen travels while drawing `text`.
    fn advance_width(&self, font: &Self::Font, text: &str) -> f32;

    /// Rasterize `text` with the pen starting at the left edge of a line box
    /// whose top is `y = 0`.
    fn rasterize_run(&self, font: &Self::Font, text: &str) -> CoverageMask;
}
