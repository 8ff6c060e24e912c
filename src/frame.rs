// src/frame.rs

//! Per-frame input and output types.

use anyhow::{ensure, Result};
use image::{Rgb, RgbImage};

/// Simulation state for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Cart position in simulation units, 0 at the canvas center.
    pub x_cart: f64,
    /// Pole angle in radians, counter-clockwise positive.
    pub angle: f64,
    pub game_over: bool,
    pub episode_num: i64,
    pub score: i64,
}

impl FrameInput {
    pub fn new(x_cart: f64, angle: f64, game_over: bool, episode_num: i64, score: i64) -> Self {
        Self {
            x_cart,
            angle,
            game_over,
            episode_num,
            score,
        }
    }

    /// Checks the counters are non-negative.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.episode_num >= 0,
            "Episode number must be a non-negative integer, got {}",
            self.episode_num
        );
        ensure!(
            self.score >= 0,
            "Score must be a non-negative integer, got {}",
            self.score
        );
        Ok(())
    }
}

/// A rendered frame: dense row-major RGB, 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    image: RgbImage,
}

impl Frame {
    pub(crate) fn new(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// `(height, width, channels)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.image.height() as usize, self.image.width() as usize, 3)
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.image.get_pixel(x, y).0
    }

    /// Raw bytes, row-major, length `height * width * 3`.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.image.into_raw()
    }
}

impl From<Frame> for RgbImage {
    fn from(frame: Frame) -> Self {
        frame.image
    }
}

impl std::ops::Index<(u32, u32)> for Frame {
    type Output = Rgb<u8>;

    fn index(&self, (x, y): (u32, u32)) -> &Self::Output {
        self.image.get_pixel(x, y)
    }
}
