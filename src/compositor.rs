// src/compositor.rs

//! Pixel operations on an owned RGB canvas.
//!
//! Every function here writes into a canvas the caller owns (a per-frame
//! copy of a backdrop) and only reads the sprites it is given, so cached
//! scene assets are never modified. Writes outside the canvas are clipped.

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;
use log::trace;

use crate::geometry::{round_half_even, EdgeBox, ExpandedRotation};

/// Fills the inclusive pixel box `rect` with `color`.
pub fn fill_rect(canvas: &mut RgbImage, rect: EdgeBox, color: Rgb<u8>) {
    let Some((x0, x1)) = clip_span(rect.left, rect.right, canvas.width()) else {
        return;
    };
    let Some((y0, y1)) = clip_span(rect.top, rect.bottom, canvas.height()) else {
        return;
    };
    trace!("compositor: fill_rect x={}..={} y={}..={}", x0, x1, y0, y1);
    draw_filled_rect_mut(
        canvas,
        Rect::at(x0 as i32, y0 as i32).of_size(x1 - x0 + 1, y1 - y0 + 1),
        color,
    );
}

/// Fills a disk of `radius` around `(cx, cy)`.
///
/// Center and radius snap to whole pixels (half-to-even), so the footprint is
/// a `2r + 1` pixel wide midpoint circle.
pub fn fill_disk(canvas: &mut RgbImage, cx: f64, cy: f64, radius: f64, color: Rgb<u8>) {
    let r = round_half_even(radius).max(0);
    let x = round_half_even(cx);
    let y = round_half_even(cy);
    if clip_span(x.saturating_sub(r), x.saturating_add(r), canvas.width()).is_none()
        || clip_span(y.saturating_sub(r), y.saturating_add(r), canvas.height()).is_none()
    {
        return;
    }
    // Any part on canvas bounds the center to within `r` of it.
    draw_filled_circle_mut(canvas, (x as i32, y as i32), r as i32, color);
}

/// Rotates `sprite` counter-clockwise by `degrees` about its center.
///
/// The output grows to contain the whole rotated sprite; uncovered pixels are
/// fully transparent. Sampling is nearest-neighbour at destination pixel
/// centers. The source sprite is left untouched.
pub fn rotate_expanded(sprite: &RgbaImage, degrees: f64) -> RgbaImage {
    let (src_w, src_h) = sprite.dimensions();
    let rotation = ExpandedRotation::new(degrees, src_w, src_h);
    let mut out = RgbaImage::from_pixel(rotation.width, rotation.height, Rgba([0, 0, 0, 0]));

    for (x, y, px) in out.enumerate_pixels_mut() {
        let (sx, sy) = rotation.source_of(x, y);
        if sx >= 0.0 && sy >= 0.0 && sx < src_w as f64 && sy < src_h as f64 {
            *px = *sprite.get_pixel(sx as u32, sy as u32);
        }
    }
    out
}

/// Pastes `sprite` with its upper-left corner at `(left, top)`, using the
/// sprite's own alpha channel as the mask.
pub fn paste_masked(canvas: &mut RgbImage, sprite: &RgbaImage, left: i64, top: i64) {
    trace!(
        "compositor: paste {}x{} sprite at ({}, {})",
        sprite.width(),
        sprite.height(),
        left,
        top
    );
    let (w, h) = sprite.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let Some((x0, x1)) = clip_span(left, left.saturating_add(w as i64 - 1), canvas.width()) else {
        return;
    };
    let Some((y0, y1)) = clip_span(top, top.saturating_add(h as i64 - 1), canvas.height()) else {
        return;
    };
    // The clipped spans keep `x - left` and `y - top` inside the sprite.
    for y in y0..=y1 {
        let sy = (y as i64 - top) as u32;
        for x in x0..=x1 {
            let sx = (x as i64 - left) as u32;
            let Rgba([r, g, b, a]) = *sprite.get_pixel(sx, sy);
            if a == 0 {
                continue;
            }
            let dst = canvas.get_pixel_mut(x, y);
            *dst = blend(Rgb([r, g, b]), *dst, a);
        }
    }
}

/// Blends a solid `color` into the canvas at `(x, y)` with the given coverage.
/// Used for anti-aliased text.
pub fn blend_coverage(canvas: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>, coverage: u8) {
    if coverage == 0 || x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    *dst = blend(color, *dst, coverage);
}

/// `fg * a + bg * (255 - a)`, divided by 255 with rounding.
fn blend(fg: Rgb<u8>, bg: Rgb<u8>, alpha: u8) -> Rgb<u8> {
    let a = alpha as u32;
    let inv = 255 - a;
    let mix = |f: u8, b: u8| ((f as u32 * a + b as u32 * inv + 127) / 255) as u8;
    Rgb([mix(fg[0], bg[0]), mix(fg[1], bg[1]), mix(fg[2], bg[2])])
}

/// Clips an inclusive span to `0..limit`, or `None` if nothing remains.
fn clip_span(lo: i64, hi: i64, limit: u32) -> Option<(u32, u32)> {
    let lo = lo.max(0);
    let hi = hi.min(limit as i64 - 1);
    if limit == 0 || lo > hi {
        None
    } else {
        Some((lo as u32, hi as u32))
    }
}
