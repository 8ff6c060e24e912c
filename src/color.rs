// src/color.rs

//! Defines the colors (`NamedColor`, `Color`) used to paint the scene and
//! their conversion to concrete `image` pixels.

use image::Rgb;
use serde::{Deserialize, Serialize};

/// Colors the scene refers to by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedColor {
    Black,
    Red,
}

impl NamedColor {
    /// Returns the `Color::Rgb` representation of this named color.
    pub fn to_rgb_color(&self) -> Color {
        match self {
            NamedColor::Black => Color::Rgb(0, 0, 0),
            NamedColor::Red => Color::Rgb(255, 0, 0),
        }
    }
}

/// A color value as it appears in the scene configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// A named color.
    Named(NamedColor),
    /// An RGB true color, with each component from 0 to 255.
    Rgb(u8, u8, u8),
}

impl Default for Color {
    fn default() -> Self {
        Color::Named(NamedColor::Black)
    }
}

impl Color {
    /// Resolves to an opaque RGB pixel.
    pub fn to_rgb(self) -> Rgb<u8> {
        match self {
            Color::Named(named) => named.to_rgb_color().to_rgb(),
            Color::Rgb(r, g, b) => Rgb([r, g, b]),
        }
    }
}

impl From<NamedColor> for Color {
    fn from(named: NamedColor) -> Self {
        Color::Named(named)
    }
}
