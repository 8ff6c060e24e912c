//! TrueType font driver backed by `rusttype`.

use crate::rasterizer::font_driver::{CoverageMask, FontDriver, LineMetrics};
use anyhow::{anyhow, Context, Result};
use log::debug;
use rusttype::{point, Font, PositionedGlyph, Scale};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct RustTypeFontDriver;

/// A parsed TrueType font bound to a pixel size.
#[derive(Clone)]
pub struct RustTypeFont {
    font: Font<'static>,
    scale: Scale,
}

impl std::fmt::Debug for RustTypeFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RustTypeFont")
            .field("glyphs", &self.font.glyph_count())
            .field("scale", &self.scale)
            .finish()
    }
}

impl RustTypeFontDriver {
    pub fn new() -> Self {
        Self
    }

    /// Parses an in-memory font.
    pub fn font_from_bytes(&self, bytes: Vec<u8>, size_px: f32) -> Result<RustTypeFont> {
        let font = Font::try_from_vec(bytes).ok_or_else(|| anyhow!("Data is not a valid TrueType font"))?;
        Ok(RustTypeFont {
            font,
            scale: Scale::uniform(size_px),
        })
    }

    fn layout<'a>(&self, font: &'a RustTypeFont, text: &str) -> Vec<PositionedGlyph<'a>> {
        let ascent = font.font.v_metrics(font.scale).ascent;
        font.font
            .layout(text, font.scale, point(0.0, ascent))
            .collect()
    }
}

impl FontDriver for RustTypeFontDriver {
    type Font = RustTypeFont;

    fn load_font(&self, path: &Path, size_px: f32) -> Result<Self::Font> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read font file '{}'", path.display()))?;
        let font = self
            .font_from_bytes(bytes, size_px)
            .with_context(|| format!("Failed to parse font file '{}'", path.display()))?;
        debug!("RustTypeFontDriver: loaded {} at {} px", path.display(), size_px);
        Ok(font)
    }

    fn line_metrics(&self, font: &Self::Font) -> LineMetrics {
        let v = font.font.v_metrics(font.scale);
        LineMetrics {
            ascent: v.ascent,
            descent: -v.descent,
        }
    }

    fn advance_width(&self, font: &Self::Font, text: &str) -> f32 {
        self.layout(font, text)
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    fn rasterize_run(&self, font: &Self::Font, text: &str) -> CoverageMask {
        let glyphs = self.layout(font, text);
        let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
            (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
            |(min_x, max_x, min_y, max_y), bb| {
                (
                    min_x.min(bb.min.x),
                    max_x.max(bb.max.x),
                    min_y.min(bb.min.y),
                    max_y.max(bb.max.y),
                )
            },
        );
        if min_x >= max_x || min_y >= max_y {
            return CoverageMask::default();
        }

        let width = (max_x - min_x) as u32;
        let height = (max_y - min_y) as u32;
        let mut coverage = vec![0u8; (width * height) as usize];
        for glyph in &glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, v| {
                let x = (bb.min.x - min_x) as u32 + gx;
                let y = (bb.min.y - min_y) as u32 + gy;
                let idx = (y * width + x) as usize;
                let value = (v * 255.0).round().clamp(0.0, 255.0) as u8;
                // Overlapping glyph boxes keep the stronger coverage.
                coverage[idx] = coverage[idx].max(value);
            });
        }
        CoverageMask {
            width,
            height,
            origin_x: min_x,
            origin_y: min_y,
            coverage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
    }

    fn mono(size_px: f32) -> RustTypeFont {
        RustTypeFontDriver::new()
            .load_font(&fixture("DejaVuSansMono.ttf"), size_px)
            .unwrap()
    }

    #[test]
    fn rejects_non_font_bytes() {
        let driver = RustTypeFontDriver::new();
        assert!(driver.font_from_bytes(b"definitely not a font".to_vec(), 20.0).is_err());
    }

    #[test]
    fn load_font_reports_missing_file() {
        let driver = RustTypeFontDriver::new();
        let err = driver
            .load_font(Path::new("/nonexistent/NotoMono-Regular.ttf"), 20.0)
            .unwrap_err();
        assert!(format!("{err}").contains("NotoMono-Regular.ttf"));
    }

    #[test]
    fn line_metrics_span_the_pixel_size() {
        let driver = RustTypeFontDriver::new();
        let metrics = driver.line_metrics(&mono(20.0));
        assert!(metrics.ascent > 15.0 && metrics.ascent < 17.0, "{:?}", metrics);
        assert!(metrics.descent > 3.0 && metrics.descent < 5.0, "{:?}", metrics);
        assert!((metrics.ascent + metrics.descent - 20.0).abs() < 0.01);
    }

    #[test]
    fn advance_counts_spaces_and_is_monospaced() {
        let driver = RustTypeFontDriver::new();
        let font = mono(20.0);
        let one = driver.advance_width(&font, " ");
        assert!(one > 0.0);
        assert!(driver.advance_width(&font, "  ") > one);
        let column = driver.advance_width(&font, &" ".repeat(13));
        assert!((column - 13.0 * one).abs() < 0.01);
        assert!((driver.advance_width(&font, "Wi") - 2.0 * one).abs() < 0.01);
        assert_eq!(driver.advance_width(&font, ""), 0.0);
    }

    #[test]
    fn run_mask_sits_inside_the_line_box() {
        let driver = RustTypeFontDriver::new();
        let font = mono(20.0);
        let metrics = driver.line_metrics(&font);

        let mask = driver.rasterize_run(&font, "Hg");
        assert!(!mask.is_empty());
        assert_eq!(mask.coverage.len(), (mask.width * mask.height) as usize);
        assert!(mask.coverage.iter().any(|&c| c > 127));
        assert!(mask.origin_x >= 0);
        assert!(mask.origin_y >= 0);
        let bottom = mask.origin_y as f32 + mask.height as f32;
        assert!(bottom <= (metrics.ascent + metrics.descent).ceil(), "bottom {}", bottom);
        assert!(mask.origin_x as u32 + mask.width <= driver.advance_width(&font, "Hg").ceil() as u32 + 1);
    }

    #[test]
    fn capitals_rest_on_the_baseline() {
        let driver = RustTypeFontDriver::new();
        let font = mono(20.0);
        let ascent = driver.line_metrics(&font).ascent;
        let mask = driver.rasterize_run(&font, "H");
        let bottom = mask.origin_y + mask.height as i32;
        assert!(bottom as f32 >= ascent.floor() && bottom as f32 <= ascent.ceil() + 1.0);
        // Lowest row of the glyph is ink, not padding.
        let last = mask.height - 1;
        assert!((0..mask.width).any(|x| mask.at(x, last) > 0));
    }

    #[test]
    fn whitespace_rasterizes_to_empty_mask() {
        let driver = RustTypeFontDriver::new();
        assert!(driver.rasterize_run(&mono(20.0), "   ").is_empty());
    }
}
