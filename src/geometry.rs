// src/geometry.rs

//! Pixel-space geometry shared by every frame.
//!
//! `ScaleContext` holds the constants derived once from the canvas
//! configuration and the native sprite sizes. The remaining helpers turn
//! per-frame simulation state into pixel positions: the cart box, the pole
//! vector and the bounds of a rotated sprite.
//!
//! Rounding uses round-half-to-even throughout so that pixel positions and
//! sprite sizes agree with the stock renderer (e.g. a 112.5 px pole is 112 px
//! tall and a cart edge at 262.5 lands on 262).

use anyhow::{ensure, Result};
use log::debug;

use crate::config::CanvasConfig;

/// Rounds to the nearest integer, ties to even.
pub fn round_half_even(v: f64) -> i64 {
    v.round_ties_even() as i64
}

/// Immutable pixel-space constants computed once per scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleContext {
    pub width: u32,
    pub height: u32,
    /// Pixels per simulation unit.
    pub scale: f64,
    /// Pixel x of simulation x = 0.
    pub x_offset: f64,
    /// Pixel y of the cart's resting line.
    pub y_offset: f64,
    pub cart_length: f64,
    pub cart_height: f64,
    pub marker_radius: f64,
    pub pole_width: f64,
    pub pole_height: f64,
    pub flame_width: f64,
    pub flame_height: f64,
}

impl ScaleContext {
    /// Derives the scene constants.
    ///
    /// `pole_native` and `flame_native` are the sprites' native `(width, height)`;
    /// their on-screen width follows from scaling them uniformly to a height of
    /// three simulation units.
    pub fn new(canvas: &CanvasConfig, pole_native: (u32, u32), flame_native: (u32, u32)) -> Result<Self> {
        ensure!(
            canvas.width > 0 && canvas.height > 0,
            "Canvas must have a non-zero size, got {}x{}",
            canvas.width,
            canvas.height
        );
        ensure!(
            canvas.animation_width > 0.0,
            "Animation width must be positive, got {}",
            canvas.animation_width
        );
        ensure!(
            pole_native.0 > 0 && pole_native.1 > 0,
            "Pole sprite has an empty size {:?}",
            pole_native
        );
        ensure!(
            flame_native.0 > 0 && flame_native.1 > 0,
            "Flame sprite has an empty size {:?}",
            flame_native
        );

        let width = canvas.width as f64;
        let height = canvas.height as f64;
        let scale = canvas.view_fraction * width / canvas.animation_width;

        let cart_length = 2.0 * scale;
        let cart_height = 0.6 * cart_length;

        let pole_height = 3.0 * scale;
        let pole_width = pole_native.0 as f64 * (pole_height / pole_native.1 as f64);

        let flame_height = 3.0 * scale;
        let flame_width = flame_native.0 as f64 * (flame_height / flame_native.1 as f64);

        let ctx = ScaleContext {
            width: canvas.width,
            height: canvas.height,
            scale,
            x_offset: width / 2.0,
            y_offset: height * canvas.rest_line_fraction,
            cart_length,
            cart_height,
            marker_radius: 0.05 * scale,
            pole_width,
            pole_height,
            flame_width,
            flame_height,
        };
        debug!("ScaleContext: {:?}", ctx);
        Ok(ctx)
    }

    /// Maps a simulation x coordinate to pixel x.
    pub fn to_pixel_x(&self, x_cart: f64) -> f64 {
        self.scale * x_cart + self.x_offset
    }

    /// Pixel size the pole sprite is pre-scaled to.
    pub fn pole_size_px(&self) -> (u32, u32) {
        (
            round_half_even(self.pole_width).max(1) as u32,
            round_half_even(self.pole_height).max(1) as u32,
        )
    }

    /// Pixel size the flame sprite is pre-scaled to.
    pub fn flame_size_px(&self) -> (u32, u32) {
        (
            round_half_even(self.flame_width).max(1) as u32,
            round_half_even(self.flame_height).max(1) as u32,
        )
    }
}

/// A box given by its inclusive pixel edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeBox {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl EdgeBox {
    /// Centers a `width` x `height` box on `(cx, cy)`, rounding each edge on
    /// its own. The result may be one pixel wider on either side.
    pub fn around(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        EdgeBox {
            left: round_half_even(cx - 0.5 * width),
            right: round_half_even(cx + 0.5 * width),
            top: round_half_even(cy - 0.5 * height),
            bottom: round_half_even(cy + 0.5 * height),
        }
    }
}

/// Offset from the cart pivot to the center of the pole sprite, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleVector {
    pub x: f64,
    pub y: f64,
}

impl PoleVector {
    /// Rotates `(0, -pole_height / 2)` by `angle` (screen convention, radians).
    pub fn new(angle: f64, pole_height: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let (vx, vy) = (0.0, -pole_height / 2.0);
        PoleVector {
            x: cos * vx - sin * vy,
            y: sin * vx + cos * vy,
        }
    }

    /// Pixel center of a sprite placed `factor` pole vectors away from the pivot.
    ///
    /// The x component is subtracted and the y component added, which is what
    /// lines the vector up with a sprite rotated counter-clockwise on screen.
    pub fn placed_from(&self, pivot: (f64, f64), factor: f64) -> (f64, f64) {
        (pivot.0 - factor * self.x, pivot.1 + factor * self.y)
    }
}

/// Inverse affine map of a rotation about an image's center with the canvas
/// grown to fit, mapping destination coordinates back into the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpandedRotation {
    /// `[a, b, c, d, e, f]`: `src_x = a*x + b*y + c`, `src_y = d*x + e*y + f`.
    pub matrix: [f64; 6],
    pub width: u32,
    pub height: u32,
}

impl ExpandedRotation {
    /// Builds the map for a counter-clockwise rotation by `degrees` of a
    /// `width` x `height` source.
    pub fn new(degrees: f64, width: u32, height: u32) -> Self {
        let (w, h) = (width as f64, height as f64);
        let theta = -degrees.to_radians();
        let (sin, cos) = theta.sin_cos();
        // Drop float noise so right angles produce exact bounds.
        let (cos, sin) = (round15(cos), round15(sin));

        let mut m = [cos, sin, 0.0, -sin, cos, 0.0];
        let (cx, cy) = (w / 2.0, h / 2.0);
        let (tx, ty) = apply(&m, -cx, -cy);
        m[2] = tx + cx;
        m[5] = ty + cy;

        let corners = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)];
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for (x, y) in corners {
            let (px, py) = apply(&m, x, y);
            min_x = min_x.min(px);
            max_x = max_x.max(px);
            min_y = min_y.min(py);
            max_y = max_y.max(py);
        }
        let new_w = (max_x.ceil() - min_x.floor()).max(0.0);
        let new_h = (max_y.ceil() - min_y.floor()).max(0.0);

        let (tx, ty) = apply(&m, -(new_w - w) / 2.0, -(new_h - h) / 2.0);
        m[2] = tx;
        m[5] = ty;

        ExpandedRotation {
            matrix: m,
            width: new_w as u32,
            height: new_h as u32,
        }
    }

    /// Source coordinates sampled for the destination pixel center `(x + 0.5, y + 0.5)`.
    pub fn source_of(&self, x: u32, y: u32) -> (f64, f64) {
        apply(&self.matrix, x as f64 + 0.5, y as f64 + 0.5)
    }
}

fn apply(m: &[f64; 6], x: f64, y: f64) -> (f64, f64) {
    (m[0] * x + m[1] * y + m[2], m[3] * x + m[4] * y + m[5])
}

fn round15(v: f64) -> f64 {
    (v * 1e15).round() / 1e15
}
