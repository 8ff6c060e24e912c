// src/config.rs

//! Defines the configuration structures for the cart-pole scene.
//!
//! The structs here can be deserialized from a JSON file to adjust the canvas,
//! asset locations, overlay layout and palette. Every field has a default, and
//! the defaults reproduce the stock scene: a 600x400 canvas showing 4.8
//! simulation units across 30% of its width.
//!
//! The configuration is consumed once, when a `Scene` is built. Nothing reads
//! it per frame.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::color::{Color, NamedColor};

// --- Top-Level Configuration Structure ---

/// Represents the complete configuration of a scene.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Canvas size and the simulation-to-pixel mapping.
    pub canvas: CanvasConfig,
    /// Where the backdrops, sprites and fonts live.
    pub assets: AssetConfig,
    /// Score/episode/angle text block.
    pub overlay: OverlayConfig,
    /// Colors of the drawn primitives.
    pub palette: PaletteConfig,
}

impl SceneConfig {
    /// Reads a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene config '{}'", path.display()))?;
        let config: SceneConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse scene config '{}'", path.display()))?;
        info!("Scene configuration loaded from {}", path.display());
        Ok(config)
    }
}

// --- Canvas Configuration ---

/// Canvas geometry and the mapping from simulation units to pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Width of the visible track in simulation units.
    pub animation_width: f64,
    /// Fraction of the canvas width that `animation_width` maps to.
    pub view_fraction: f64,
    /// Fraction of the canvas height, from the top, where the cart rests.
    pub rest_line_fraction: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            width: 600,
            height: 400,
            animation_width: 4.8,
            view_fraction: 0.3,
            rest_line_fraction: 0.7,
        }
    }
}

// --- Asset Configuration ---

/// Locations of the raster and font assets.
///
/// File names are joined onto `resource_dir`. A relative `resource_dir` is
/// resolved against the current working directory when the scene is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    pub resource_dir: PathBuf,
    pub background: String,
    pub gameover: String,
    /// Pole sprite; must carry an alpha channel to be masked correctly.
    pub pole: String,
    /// Flame sprite; must carry an alpha channel to be masked correctly.
    pub flame: String,
    pub font_bold: String,
    pub font_regular: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        AssetConfig {
            resource_dir: PathBuf::from("ui/resources"),
            background: "background.png".to_string(),
            gameover: "gameover.png".to_string(),
            pole: "pole.png".to_string(),
            flame: "flame.png".to_string(),
            font_bold: "NotoSansMono-Bold.ttf".to_string(),
            font_regular: "NotoMono-Regular.ttf".to_string(),
        }
    }
}

impl AssetConfig {
    /// Resolves `resource_dir` against the current working directory.
    pub fn resolved_dir(&self) -> Result<PathBuf> {
        if self.resource_dir.is_absolute() {
            return Ok(self.resource_dir.clone());
        }
        let cwd = std::env::current_dir().context("Failed to read current working directory")?;
        Ok(cwd.join(&self.resource_dir))
    }
}

// --- Overlay Configuration ---

/// Layout of the text block in the top-right corner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    /// Font size in pixels.
    pub font_size_px: f32,
    /// Left edge of the labels as a fraction of canvas width.
    pub anchor_x_fraction: f64,
    /// Top of the text block as a fraction of canvas height. Negative values
    /// start the block above the canvas.
    pub anchor_y_fraction: f64,
    /// Vertical offsets of the score, episode and angle lines from the anchor.
    pub line_offsets_px: [f64; 3],
    /// Width of the value column, measured in spaces of the line's font.
    pub value_column_chars: usize,
    /// Extra leading between stacked lines of one text block.
    pub line_spacing_px: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            font_size_px: 20.0,
            anchor_x_fraction: 0.73,
            anchor_y_fraction: -0.07,
            line_offsets_px: [0.0, 30.0, 50.0],
            value_column_chars: 13,
            line_spacing_px: 4.0,
        }
    }
}

// --- Palette Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub cart: Color,
    pub pivot_marker: Color,
    pub text: Color,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        PaletteConfig {
            cart: Color::Named(NamedColor::Black),
            pivot_marker: Color::Named(NamedColor::Red),
            text: Color::Named(NamedColor::Black),
        }
    }
}
