use raylib::prelude::*;

use crate::constants::*;
use crate::rotation::ActivePlacement;

/// One catalog image on the wall; where it is comes from its current placement.
pub struct Sprite {
    image: Texture2D,
}

impl Sprite {
    pub fn new(image: Texture2D) -> Self {
        Self { image }
    }

    pub fn draw(&self, d: &mut impl RaylibDraw, active: &ActivePlacement, now: f64, span: f32) {
        let placement = &active.placement;

        // Enters past the right edge, leaves past the left one.
        let progress = active.progress(now);
        let x = span - progress * (span + placement.width);
        let y = RENDER_HEIGHT as f32 * placement.band;

        let tex_width = self.image.width() as f32;
        let tex_height = self.image.height() as f32;

        // Crop the texture to the placement's aspect instead of stretching it.
        let dest_aspect = placement.width / placement.height;
        let (src_width, src_height) = if tex_width / tex_height > dest_aspect {
            (tex_height * dest_aspect, tex_height)
        } else {
            (tex_width, tex_width / dest_aspect)
        };

        d.draw_texture_pro(
            &self.image,
            Rectangle::new(
                (tex_width - src_width) * 0.5,
                (tex_height - src_height) * 0.5,
                src_width,
                src_height,
            ),
            Rectangle::new(x, y, placement.width, placement.height),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }
}
