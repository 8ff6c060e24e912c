//! Synthetic scene harness for integration tests.
//!
//! Builds a stock 600x400 scene from uniform in-memory rasters and the
//! headless font driver, so no asset files are needed.

use cartpole_frame::{HeadlessFontDriver, RawAssets, Scene, SceneConfig, TextRasterizer};
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

pub const SKY: [u8; 3] = [200, 220, 255];
pub const DUSK: [u8; 3] = [60, 0, 0];
pub const WOOD: [u8; 3] = [139, 69, 19];
pub const BLACK: [u8; 3] = [0, 0, 0];

/// Rows below this hold no overlay text.
pub const OVERLAY_BOTTOM: u32 = 80;

pub struct SceneHarness {
    pub scene: Scene<HeadlessFontDriver>,
}

impl SceneHarness {
    /// Stock scene with an opaque orange flame.
    pub fn new() -> Self {
        Self::build(Rgba([255, 140, 0, 255]))
    }

    /// Stock scene whose flame is fully transparent. The flame's fixed
    /// horizontal correction is not mirror-symmetric, so symmetry checks hide it.
    pub fn without_flame() -> Self {
        Self::build(Rgba([0, 0, 0, 0]))
    }

    fn build(flame: Rgba<u8>) -> Self {
        let raw = RawAssets {
            background: DynamicImage::ImageRgb8(RgbImage::from_pixel(600, 400, Rgb(SKY))),
            gameover: DynamicImage::ImageRgb8(RgbImage::from_pixel(600, 400, Rgb(DUSK))),
            pole: DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                20,
                200,
                Rgba([WOOD[0], WOOD[1], WOOD[2], 255]),
            )),
            flame: DynamicImage::ImageRgba8(RgbaImage::from_pixel(100, 150, flame)),
        };
        let text = TextRasterizer::load(
            HeadlessFontDriver::new(),
            Path::new("NotoMono-Regular.ttf"),
            Path::new("NotoSansMono-Bold.ttf"),
            20.0,
        )
        .expect("headless fonts always load");
        let scene = Scene::from_parts(SceneConfig::default(), raw, text).expect("synthetic scene is valid");
        Self { scene }
    }
}
