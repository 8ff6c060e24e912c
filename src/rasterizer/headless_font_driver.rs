//! Headless font driver implementation.
//!
//! Renders every visible character as a solid block inside a fixed-pitch
//! cell, so text placement can be checked without shipping a font file.

use crate::rasterizer::font_driver::{CoverageMask, FontDriver, LineMetrics};
use anyhow::{ensure, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessFontDriver;

/// Metrics derived from the requested size, rounded to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessFont {
    /// Cell advance per character.
    pub advance: u32,
    pub ascent: u32,
    pub descent: u32,
    /// Height of the solid block drawn for a character, ending at the baseline.
    pub block_height: u32,
}

impl HeadlessFontDriver {
    pub fn new() -> Self {
        Self
    }

    /// Builds a font without touching the filesystem.
    pub fn font(&self, size_px: f32) -> HeadlessFont {
        HeadlessFont {
            advance: (size_px * 0.6).round().max(2.0) as u32,
            ascent: (size_px * 0.8).round() as u32,
            descent: (size_px * 0.2).round() as u32,
            block_height: (size_px * 0.7).round() as u32,
        }
    }
}

impl FontDriver for HeadlessFontDriver {
    type Font = HeadlessFont;

    fn load_font(&self, _path: &Path, size_px: f32) -> Result<Self::Font> {
        ensure!(size_px > 0.0, "Font size must be positive, got {}", size_px);
        Ok(self.font(size_px))
    }

    fn line_metrics(&self, font: &Self::Font) -> LineMetrics {
        LineMetrics {
            ascent: font.ascent as f32,
            descent: font.descent as f32,
        }
    }

    fn advance_width(&self, font: &Self::Font, text: &str) -> f32 {
        (text.chars().count() as u32 * font.advance) as f32
    }

    fn rasterize_run(&self, font: &Self::Font, text: &str) -> CoverageMask {
        let cells = text.chars().count() as u32;
        if cells == 0 {
            return CoverageMask::default();
        }
        let width = cells * font.advance;
        let height = font.block_height;
        let mut coverage = vec![0u8; (width * height) as usize];
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x0 = i as u32 * font.advance + 1;
            let x1 = (i as u32 + 1) * font.advance - 1;
            for y in 0..height {
                for x in x0..x1 {
                    coverage[(y * width + x) as usize] = 255;
                }
            }
        }
        CoverageMask {
            width,
            height,
            origin_x: 0,
            origin_y: font.ascent as i32 - height as i32,
            coverage,
        }
    }
}
