//! Native photo wall: the landing view's rotating images in a raylib window.

pub mod engine;
pub mod sprite;
pub mod texture_loader;

use std::time::Duration;

use anyhow::{Context, Result};
use raylib::prelude::*;

use crate::catalog::CatalogLoader;
use crate::config::Config;
use crate::constants::*;
use crate::wall::engine::WallEngine;

pub fn run(config: &Config) -> Result<()> {
    let loader = CatalogLoader::new(
        &config.wall.server_url,
        Duration::from_secs(config.wall.timeout_secs),
    )
    .context("building catalog client")?;

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title("Tiny Suitcase")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut engine = WallEngine::new(config.rotation.clone());
    engine.initialize(&mut rl, &thread, &loader);

    // Everything is drawn at a fixed size, then scaled to the window.
    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow::anyhow!("failed to create render texture: {e}"))?;

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        engine.render_frame(dt, &mut rl, &thread, &mut framebuffer);

        let mut d = rl.begin_drawing(&thread);
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;

        // Render textures are stored upside down.
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, RENDER_WIDTH as f32, -(RENDER_HEIGHT as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }

    engine.shutdown();
    Ok(())
}
