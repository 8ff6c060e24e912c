// src/global.rs

//! A process-wide scene behind a single initialization call.
//!
//! Drivers that prefer a free `render` function call `init` once at startup
//! and `render` per frame. The scene is built exactly once; it is never
//! mutated afterwards.

use anyhow::{anyhow, Result};
use log::warn;
use once_cell::sync::OnceCell;

use crate::config::SceneConfig;
use crate::frame::{Frame, FrameInput};
use crate::renderer::DefaultScene;

static SCENE: OnceCell<DefaultScene> = OnceCell::new();

/// Loads the global scene from `config`.
///
/// If the scene already exists it is returned unchanged and `config` is ignored.
pub fn init(config: SceneConfig) -> Result<&'static DefaultScene> {
    if let Some(scene) = SCENE.get() {
        warn!("Global scene already initialized; ignoring new configuration");
        return Ok(scene);
    }
    SCENE.get_or_try_init(|| DefaultScene::load(config))
}

/// The global scene, if `init` has succeeded.
pub fn scene() -> Option<&'static DefaultScene> {
    SCENE.get()
}

/// Renders one frame with the global scene.
pub fn render(x_cart: f64, angle: f64, game_over: bool, episode_num: i64, score: i64) -> Result<Frame> {
    let scene = SCENE
        .get()
        .ok_or_else(|| anyhow!("Scene not initialized; call global::init first"))?;
    scene.render(&FrameInput::new(x_cart, angle, game_over, episode_num, score))
}
