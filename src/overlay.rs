// src/overlay.rs

//! The score/episode/angle text block in the top-right corner.
//!
//! Each line is two runs in the same font: the label, left-anchored at the
//! block's x anchor, and the value, right-anchored at the end of a fixed-width
//! value column. Both runs sit on the second row of the line's text block,
//! one line advance below the line's anchor.

use image::{Rgb, RgbImage};

use crate::config::OverlayConfig;
use crate::rasterizer::font_driver::FontDriver;
use crate::rasterizer::{FontWeight, TextRasterizer};

/// One label/value pair of the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct HudLine {
    pub label: &'static str,
    pub value: String,
    pub weight: FontWeight,
    /// Vertical offset from the block anchor.
    pub offset_px: f64,
}

/// Builds the three overlay lines.
///
/// `screen_angle` is the pole angle in radians as drawn on screen (clockwise
/// positive).
pub fn hud_lines(score: u64, episode_num: u64, screen_angle: f64, config: &OverlayConfig) -> [HudLine; 3] {
    let [score_offset, episode_offset, angle_offset] = config.line_offsets_px;
    [
        HudLine {
            label: "Score",
            value: score.to_string(),
            weight: FontWeight::Bold,
            offset_px: score_offset,
        },
        HudLine {
            label: "Episode",
            value: episode_num.to_string(),
            weight: FontWeight::Regular,
            offset_px: episode_offset,
        },
        HudLine {
            label: "Angle",
            value: format_angle(screen_angle),
            weight: FontWeight::Regular,
            offset_px: angle_offset,
        },
    ]
}

/// Degrees rounded to two decimals, shortest form with at least one decimal,
/// followed by a degree sign: `0.0°`, `12.5°`, `-3.14°`.
pub fn format_angle(radians: f64) -> String {
    let mut degrees = round_to_hundredths(radians.to_degrees());
    if degrees == 0.0 {
        // Also folds -0.0.
        degrees = 0.0;
    }
    format!("{:?}°", degrees)
}

/// Rounds to two decimals on the exact binary value, ties to even. `2.675`
/// is stored just below itself and becomes `2.67`; the exact tie `0.125`
/// becomes `0.12`.
fn round_to_hundredths(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Draws `lines` onto `canvas`.
pub fn draw_overlay<D: FontDriver>(
    canvas: &mut RgbImage,
    text: &TextRasterizer<D>,
    config: &OverlayConfig,
    color: Rgb<u8>,
    lines: &[HudLine],
) {
    let anchor_x = canvas.width() as f64 * config.anchor_x_fraction;
    let anchor_y = canvas.height() as f64 * config.anchor_y_fraction;
    let column = " ".repeat(config.value_column_chars);

    for line in lines {
        let metrics = text.line_metrics(line.weight);
        let top = anchor_y + line.offset_px + metrics.ascent as f64 + config.line_spacing_px;
        // Values wider than the column start at the anchor instead.
        let column_width = text
            .advance_width(line.weight, &column)
            .max(text.advance_width(line.weight, &line.value));
        let value_right = anchor_x + column_width as f64;

        text.draw_text(canvas, line.weight, line.label, anchor_x, top, color);
        text.draw_text_right(canvas, line.weight, &line.value, value_right, top, color);
    }
}
