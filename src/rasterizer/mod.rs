// src/rasterizer/mod.rs

//! Text rasterization for the scene overlay.
//!
//! `TextRasterizer` owns the two overlay fonts (regular and bold) and blends
//! text runs into a canvas. The heavy lifting (parsing fonts, producing
//! coverage) is delegated to a `FontDriver`:
//!
//! ```text
//! text run  →  [FontDriver::rasterize_run]  →  CoverageMask  →  [blend]  →  canvas
//! ```
//!
//! Runs are positioned by the upper-left corner of their line box, or by the
//! upper-right corner for right-aligned values.

pub mod font_driver;
pub mod headless_font_driver;
pub mod rusttype_font_driver;

use crate::compositor::blend_coverage;
use crate::geometry::round_half_even;
use crate::rasterizer::font_driver::{FontDriver, LineMetrics};
use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use log::{info, trace};
use std::path::Path;

/// Which of the two overlay fonts a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Software text rasterizer holding the overlay fonts.
pub struct TextRasterizer<D: FontDriver> {
    driver: D,
    regular: D::Font,
    bold: D::Font,
}

impl<D: FontDriver> std::fmt::Debug for TextRasterizer<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRasterizer")
            .field("driver", &std::any::type_name::<D>())
            .field("metrics", &self.line_metrics(FontWeight::Regular))
            .finish_non_exhaustive()
    }
}

impl<D: FontDriver> TextRasterizer<D> {
    /// Load both overlay fonts at `size_px`.
    ///
    /// # Returns
    /// Initialized rasterizer, or error naming the font that failed to load
    pub fn load(driver: D, regular_path: &Path, bold_path: &Path, size_px: f32) -> Result<Self> {
        info!("TextRasterizer: Loading overlay fonts at {} px", size_px);

        let regular = driver
            .load_font(regular_path, size_px)
            .with_context(|| format!("Failed to load regular font '{}'", regular_path.display()))?;

        let bold = driver
            .load_font(bold_path, size_px)
            .with_context(|| format!("Failed to load bold font '{}'", bold_path.display()))?;

        Ok(Self::from_fonts(driver, regular, bold))
    }

    /// Wrap fonts the caller already loaded.
    pub fn from_fonts(driver: D, regular: D::Font, bold: D::Font) -> Self {
        Self { driver, regular, bold }
    }

    pub fn font(&self, weight: FontWeight) -> &D::Font {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }

    pub fn line_metrics(&self, weight: FontWeight) -> LineMetrics {
        self.driver.line_metrics(self.font(weight))
    }

    pub fn advance_width(&self, weight: FontWeight, text: &str) -> f32 {
        self.driver.advance_width(self.font(weight), text)
    }

    /// Draw `text` with its line box's upper-left corner at `(left, top)`.
    pub fn draw_text(
        &self,
        canvas: &mut RgbImage,
        weight: FontWeight,
        text: &str,
        left: f64,
        top: f64,
        color: Rgb<u8>,
    ) {
        let mask = self.driver.rasterize_run(self.font(weight), text);
        if mask.is_empty() {
            return;
        }
        let x0 = round_half_even(left) + mask.origin_x as i64;
        let y0 = round_half_even(top) + mask.origin_y as i64;
        trace!(
            "TextRasterizer: '{}' ({:?}) at ({}, {}), mask {}x{}",
            text,
            weight,
            x0,
            y0,
            mask.width,
            mask.height
        );
        for y in 0..mask.height {
            for x in 0..mask.width {
                blend_coverage(canvas, x0 + x as i64, y0 + y as i64, color, mask.at(x, y));
            }
        }
    }

    /// Draw `text` so that its advance ends at `right`.
    pub fn draw_text_right(
        &self,
        canvas: &mut RgbImage,
        weight: FontWeight,
        text: &str,
        right: f64,
        top: f64,
        color: Rgb<u8>,
    ) {
        let left = right - self.advance_width(weight, text) as f64;
        self.draw_text(canvas, weight, text, left, top, color);
    }
}

#[cfg(test)]
mod tests {
    use super::headless_font_driver::HeadlessFontDriver;
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn rasterizer() -> TextRasterizer<HeadlessFontDriver> {
        TextRasterizer::load(
            HeadlessFontDriver::new(),
            Path::new("regular.ttf"),
            Path::new("bold.ttf"),
            20.0,
        )
        .unwrap()
    }

    fn black_columns(canvas: &RgbImage) -> (u32, u32) {
        let xs: Vec<u32> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == BLACK)
            .map(|(x, _, _)| x)
            .collect();
        (*xs.iter().min().unwrap(), *xs.iter().max().unwrap())
    }

    #[test]
    fn load_rejects_bad_size() {
        let err = TextRasterizer::load(
            HeadlessFontDriver::new(),
            Path::new("regular.ttf"),
            Path::new("bold.ttf"),
            0.0,
        )
        .unwrap_err();
        assert!(format!("{err}").contains("regular font"));
    }

    #[test]
    fn debug_names_the_driver() {
        let shown = format!("{:?}", rasterizer());
        assert!(shown.contains("HeadlessFontDriver"), "{}", shown);
        assert!(shown.contains("ascent: 16.0"), "{}", shown);
    }

    #[test]
    fn draw_text_left_anchor() {
        let text = rasterizer();
        let mut canvas = RgbImage::from_pixel(100, 40, WHITE);
        text.draw_text(&mut canvas, FontWeight::Regular, "AB", 10.0, 0.0, BLACK);
        // Two 12 px cells with a 1 px inset on either side of each block.
        assert_eq!(black_columns(&canvas), (11, 32));
        // Blocks end on the baseline at ascent = 16.
        assert_eq!(*canvas.get_pixel(11, 15), BLACK);
        assert_eq!(*canvas.get_pixel(11, 16), WHITE);
        assert_eq!(*canvas.get_pixel(11, 1), WHITE);
    }

    #[test]
    fn draw_text_right_anchor() {
        let text = rasterizer();
        let mut canvas = RgbImage::from_pixel(100, 40, WHITE);
        text.draw_text_right(&mut canvas, FontWeight::Bold, "123", 90.0, 0.0, BLACK);
        assert_eq!(black_columns(&canvas), (55, 88));
    }

    #[test]
    fn text_clips_at_canvas_edges() {
        let text = rasterizer();
        let mut canvas = RgbImage::from_pixel(20, 20, WHITE);
        text.draw_text(&mut canvas, FontWeight::Regular, "XXXX", -6.0, -10.0, BLACK);
        assert!(canvas.pixels().any(|p| *p == BLACK));
    }
}
