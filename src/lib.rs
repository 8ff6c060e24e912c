// src/lib.rs

//! Renders single frames of a cart-and-pole balancing simulation.
//!
//! Build a [`Scene`] once (from asset files with [`Scene::load`], or from
//! in-memory rasters with [`Scene::from_parts`]), then call
//! [`Scene::render`] for every frame. Each call returns a freshly allocated
//! 3-channel [`Frame`] showing the backdrop, the cart, the rotated pole, the
//! flame at the pole tip and the score/episode/angle overlay.

pub mod assets;
pub mod color;
pub mod compositor;
pub mod config;
pub mod frame;
pub mod geometry;
pub mod global;
pub mod overlay;
pub mod rasterizer;
pub mod renderer;

pub use assets::RawAssets;
pub use config::SceneConfig;
pub use frame::{Frame, FrameInput};
pub use geometry::ScaleContext;
pub use rasterizer::headless_font_driver::HeadlessFontDriver;
pub use rasterizer::rusttype_font_driver::RustTypeFontDriver;
pub use rasterizer::{FontWeight, TextRasterizer};
pub use renderer::{DefaultScene, Scene};
