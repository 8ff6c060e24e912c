// src/renderer.rs

//! This module defines the `Scene`, the immutable rendering context, and the
//! per-frame `render` routine.
//!
//! A `Scene` is built once: it loads (or is handed) the backdrops, sprites
//! and fonts, derives the `ScaleContext` and pre-scales every raster. After
//! that it is only ever borrowed. Each call to `render` clones the selected
//! backdrop and draws onto that private copy, so frames never share a buffer
//! and the cached assets are never modified. A `Scene` can be shared between
//! threads without locking.

use anyhow::{Context, Result};
use log::{info, trace};

use crate::assets::{RawAssets, SceneAssets};
use crate::compositor::{fill_disk, fill_rect, paste_masked, rotate_expanded};
use crate::config::SceneConfig;
use crate::frame::{Frame, FrameInput};
use crate::geometry::{round_half_even, EdgeBox, PoleVector, ScaleContext};
use crate::overlay::{draw_overlay, hud_lines};
use crate::rasterizer::font_driver::FontDriver;
use crate::rasterizer::rusttype_font_driver::RustTypeFontDriver;
use crate::rasterizer::TextRasterizer;

/// Horizontal correction for the flame art, as a fraction of its width.
const FLAME_X_CORRECTION: f64 = 0.03;

/// Scene backed by TrueType fonts.
pub type DefaultScene = Scene<RustTypeFontDriver>;

/// Everything a frame needs, computed once.
pub struct Scene<D: FontDriver> {
    config: SceneConfig,
    ctx: ScaleContext,
    assets: SceneAssets,
    text: TextRasterizer<D>,
}

impl<D: FontDriver> std::fmt::Debug for Scene<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("config", &self.config)
            .field("ctx", &self.ctx)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

impl Scene<RustTypeFontDriver> {
    /// Loads every asset named by `config` from disk and prepares the scene.
    pub fn load(config: SceneConfig) -> Result<Self> {
        let raw = RawAssets::load(&config.assets).context("Failed to load scene rasters")?;
        let dir = config.assets.resolved_dir()?;
        let text = TextRasterizer::load(
            RustTypeFontDriver::new(),
            &dir.join(&config.assets.font_regular),
            &dir.join(&config.assets.font_bold),
            config.overlay.font_size_px,
        )
        .context("Failed to load overlay fonts")?;
        Self::from_parts(config, raw, text)
    }
}

impl<D: FontDriver> Scene<D> {
    /// Prepares a scene from already decoded rasters and loaded fonts.
    ///
    /// Runs the same validation and pre-scaling as `Scene::load`.
    pub fn from_parts(config: SceneConfig, raw: RawAssets, text: TextRasterizer<D>) -> Result<Self> {
        let ctx = ScaleContext::new(&config.canvas, raw.pole_size(), raw.flame_size())?;
        let assets = SceneAssets::prepare(raw, &ctx, &config.canvas)?;
        info!(
            "Scene ready: {}x{} canvas, {:.2} px per unit",
            ctx.width, ctx.height, ctx.scale
        );
        Ok(Self {
            config,
            ctx,
            assets,
            text,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn scale_context(&self) -> &ScaleContext {
        &self.ctx
    }

    pub fn assets(&self) -> &SceneAssets {
        &self.assets
    }

    /// Renders one frame.
    ///
    /// Fails without producing a frame if `episode_num` or `score` is
    /// negative. Cart positions and angles are not bounded; anything outside
    /// the canvas is clipped.
    pub fn render(&self, input: &FrameInput) -> Result<Frame> {
        input.validate()?;
        let ctx = &self.ctx;
        let palette = &self.config.palette;

        let mut scene = if input.game_over {
            self.assets.gameover.clone()
        } else {
            self.assets.background.clone()
        };

        // Cart
        let x_cart = ctx.to_pixel_x(input.x_cart);
        let y_cart = ctx.y_offset;
        let cart = EdgeBox::around(x_cart, y_cart, ctx.cart_length, ctx.cart_height);
        fill_rect(&mut scene, cart, palette.cart.to_rgb());
        fill_disk(&mut scene, x_cart, y_cart, ctx.marker_radius, palette.pivot_marker.to_rgb());

        // Pole; screen angles run clockwise.
        let angle = -input.angle;
        let pole = rotate_expanded(&self.assets.pole, angle.to_degrees());
        let pole_vector = PoleVector::new(angle, ctx.pole_height);
        let (pole_cx, pole_cy) = pole_vector.placed_from((x_cart, y_cart), 1.0);
        let pole_left = round_half_even(pole_cx - pole.width() as f64 / 2.0);
        let pole_top = round_half_even(pole_cy - pole.height() as f64 / 2.0);
        trace!(
            "render: cart {:?}, pole vector ({:.3}, {:.3}), pole at ({}, {})",
            cart,
            pole_vector.x,
            pole_vector.y,
            pole_left,
            pole_top
        );
        paste_masked(&mut scene, &pole, pole_left, pole_top);

        // Flame, beyond the pole tip. The vertical anchor is half the flame
        // width, which tucks its base over the tip.
        let flame = &self.assets.flame;
        let flame_w = flame.width() as f64;
        let (tip_x, tip_y) = pole_vector.placed_from((x_cart, y_cart), 2.0);
        let flame_left = round_half_even(tip_x - flame_w / 2.0 + FLAME_X_CORRECTION * flame_w);
        let flame_top = round_half_even(tip_y - flame_w / 2.0);
        paste_masked(&mut scene, flame, flame_left, flame_top);

        let lines = hud_lines(input.score as u64, input.episode_num as u64, angle, &self.config.overlay);
        draw_overlay(
            &mut scene,
            &self.text,
            &self.config.overlay,
            palette.text.to_rgb(),
            &lines,
        );

        Ok(Frame::new(scene))
    }

    /// `render` taking the five frame values directly.
    pub fn render_state(
        &self,
        x_cart: f64,
        angle: f64,
        game_over: bool,
        episode_num: i64,
        score: i64,
    ) -> Result<Frame> {
        self.render(&FrameInput::new(x_cart, angle, game_over, episode_num, score))
    }
}
