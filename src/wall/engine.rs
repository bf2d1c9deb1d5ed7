use std::collections::HashMap;

use raylib::prelude::*;
use tracing::{debug, info, warn};

use crate::catalog::CatalogLoader;
use crate::config::RotationConfig;
use crate::constants::*;
use crate::rotation::RotationScheduler;
use crate::ticker::{CaptionCycle, NavTheme, ScrollNav};
use crate::wall::sprite::Sprite;
use crate::wall::texture_loader::load_texture_with_exif_rotation;

const SCROLL_STEP: f32 = 40.0;
const NAV_HEIGHT: i32 = 64;

pub struct WallEngine {
    scheduler: RotationScheduler,
    sprites: HashMap<String, Sprite>,
    caption: CaptionCycle,
    nav: ScrollNav,
    scroll_y: f32,
    clock: f64,
}

impl WallEngine {
    pub fn new(config: RotationConfig) -> Self {
        Self {
            scheduler: RotationScheduler::new(config),
            sprites: HashMap::new(),
            caption: CaptionCycle::cities(),
            nav: ScrollNav::default(),
            scroll_y: 0.0,
            clock: 0.0,
        }
    }

    /// Loads the catalog once, then uploads every image. Images that fail to
    /// download or decode are dropped from the rotation; returns how many loaded.
    pub fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, loader: &CatalogLoader) -> usize {
        let catalog = loader.load();
        let names = catalog.images().to_vec();
        self.scheduler.on_catalog_ready(catalog, self.clock);

        for name in names {
            let texture = loader
                .fetch_image(&name)
                .map_err(anyhow::Error::from)
                .and_then(|bytes| load_texture_with_exif_rotation(rl, thread, &name, &bytes));
            match texture {
                Ok(texture) => {
                    self.sprites.insert(name, Sprite::new(texture));
                }
                Err(e) => {
                    warn!(image = %name, error = %e, "skipping image");
                    self.scheduler.forget(&name, self.clock);
                }
            }
        }

        info!(loaded = self.sprites.len(), active = self.scheduler.len(), "wall ready");
        self.sprites.len()
    }

    pub fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, framebuffer: &mut RenderTexture2D) {
        self.clock += f64::from(dt);
        let replaced = self.scheduler.tick(self.clock);
        if replaced > 0 {
            debug!(replaced, active = self.scheduler.len(), "rotated images");
        }

        self.caption.update(dt);

        self.scroll_y = (self.scroll_y - rl.get_mouse_wheel_move() * SCROLL_STEP).max(0.0);
        if let Some(theme) = self.nav.update(self.scroll_y) {
            debug!(?theme, "nav theme changed");
        }

        let mut d = rl.begin_texture_mode(thread, framebuffer);
        d.clear_background(Color::new(246, 241, 232, 255));

        let span = self.scheduler.config().span;
        for active in self.scheduler.visible(self.clock) {
            if let Some(sprite) = self.sprites.get(&active.id) {
                sprite.draw(&mut d, active, self.clock, span);
            }
        }

        let (bar, ink) = match self.nav.theme() {
            NavTheme::Light => (Color::new(255, 255, 255, 200), Color::BLACK),
            NavTheme::Dark => (Color::new(20, 20, 20, 230), Color::WHITE),
        };
        d.draw_rectangle(0, 0, RENDER_WIDTH, NAV_HEIGHT, bar);
        d.draw_text("TINY SUITCASE", 32, 18, 30, ink);
        d.draw_text("About    Services    Work", RENDER_WIDTH - 460, 22, 24, ink);

        d.draw_text("TINY SUITCASE STUDIOS", 64, RENDER_HEIGHT - 200, 48, Color::BLACK);
        d.draw_text("OPERATING FROM", 64, RENDER_HEIGHT - 140, 40, Color::BLACK);
        d.draw_text(self.caption.current(), 64, RENDER_HEIGHT - 88, 40, Color::BLACK);
    }

    pub fn shutdown(&mut self) {
        self.scheduler.teardown();
        self.sprites.clear();
    }
}
