// src/assets.rs

//! Loading and one-time preparation of the scene's raster assets.
//!
//! Backdrops are resized to the canvas and sprites to their on-screen size
//! exactly once, when the scene is built. Frames only ever read the prepared
//! images.

use anyhow::{bail, Context, Result};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbImage, RgbaImage};
use log::{debug, info};
use std::path::Path;

use crate::config::{AssetConfig, CanvasConfig};
use crate::geometry::ScaleContext;

const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Rasters as decoded, before any scaling.
#[derive(Debug, Clone)]
pub struct RawAssets {
    pub background: DynamicImage,
    pub gameover: DynamicImage,
    pub pole: DynamicImage,
    pub flame: DynamicImage,
}

impl RawAssets {
    /// Decodes the four rasters named by `config` from its resource directory.
    pub fn load(config: &AssetConfig) -> Result<Self> {
        let dir = config.resolved_dir()?;
        info!("Loading scene rasters from {}", dir.display());
        Ok(RawAssets {
            background: open_image(&dir.join(&config.background))?,
            gameover: open_image(&dir.join(&config.gameover))?,
            pole: open_image(&dir.join(&config.pole))?,
            flame: open_image(&dir.join(&config.flame))?,
        })
    }

    pub fn pole_size(&self) -> (u32, u32) {
        self.pole.dimensions()
    }

    pub fn flame_size(&self) -> (u32, u32) {
        self.flame.dimensions()
    }
}

fn open_image(path: &Path) -> Result<DynamicImage> {
    let img = image::open(path).with_context(|| format!("Failed to load image '{}'", path.display()))?;
    debug!("Loaded {} ({}x{})", path.display(), img.width(), img.height());
    Ok(img)
}

/// Fails unless a `width` x `height` backdrop has the canvas's aspect ratio.
pub fn check_backdrop_ratio(canvas: &CanvasConfig, width: u32, height: u32) -> Result<()> {
    // Cross-multiplied so the comparison is exact.
    let lhs = canvas.width as u64 * height as u64;
    let rhs = canvas.height as u64 * width as u64;
    if lhs != rhs || width == 0 {
        bail!(
            "Background image must have ratio {}:{} (canvas {}x{}), got {}x{}",
            canvas.width / gcd(canvas.width, canvas.height).max(1),
            canvas.height / gcd(canvas.width, canvas.height).max(1),
            canvas.width,
            canvas.height,
            width,
            height
        );
    }
    Ok(())
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// The prepared, read-only images every frame draws from.
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub background: RgbImage,
    pub gameover: RgbImage,
    pub pole: RgbaImage,
    pub flame: RgbaImage,
}

impl SceneAssets {
    /// Validates the backdrop and scales everything to its final size.
    pub fn prepare(raw: RawAssets, ctx: &ScaleContext, canvas: &CanvasConfig) -> Result<Self> {
        let (bg_w, bg_h) = raw.background.dimensions();
        check_backdrop_ratio(canvas, bg_w, bg_h)?;

        let background = resize_rgb(&raw.background, ctx.width, ctx.height);
        let gameover = resize_rgb(&raw.gameover, ctx.width, ctx.height);

        let (pole_w, pole_h) = ctx.pole_size_px();
        let pole = resize_rgba(&raw.pole, pole_w, pole_h);
        let (flame_w, flame_h) = ctx.flame_size_px();
        let flame = resize_rgba(&raw.flame, flame_w, flame_h);

        debug!(
            "SceneAssets: backdrops {}x{}, pole {}x{}, flame {}x{}",
            ctx.width, ctx.height, pole_w, pole_h, flame_w, flame_h
        );

        Ok(SceneAssets {
            background,
            gameover,
            pole,
            flame,
        })
    }
}

fn resize_rgb(img: &DynamicImage, width: u32, height: u32) -> RgbImage {
    let rgb = img.to_rgb8();
    if rgb.dimensions() == (width, height) {
        return rgb;
    }
    image::imageops::resize(&rgb, width, height, RESIZE_FILTER)
}

fn resize_rgba(img: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    let rgba = img.to_rgba8();
    if rgba.dimensions() == (width, height) {
        return rgba;
    }
    image::imageops::resize(&rgba, width, height, RESIZE_FILTER)
}
