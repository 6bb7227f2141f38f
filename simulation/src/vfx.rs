use crate::theme::{Color, Theme, VFX_SLOT};

const EASE: f32 = 0.15;
const SNAP: f32 = 0.5;
const VISIBLE_RADIUS: f32 = 0.1;
const OUTLINE_ALPHA: u8 = 50;
const FILL_ALPHA: u8 = 20;

/// Ring drawn around the player while the field is held. Eases open to the
/// field range and closed again on release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttractionVfx {
    pub current_radius: f32,
    pub target_radius: f32,
}

impl AttractionVfx {
    pub fn update(&mut self, active: bool, range: f32) {
        self.target_radius = if active { range.max(0.0) } else { 0.0 };
        let gap = self.target_radius - self.current_radius;
        if gap.abs() < SNAP {
            self.current_radius = self.target_radius;
        } else {
            self.current_radius += gap * EASE;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.current_radius > VISIBLE_RADIUS
    }

    pub fn outline_color(theme: &Theme) -> Color {
        theme.color(VFX_SLOT).with_alpha(OUTLINE_ALPHA)
    }

    pub fn fill_color(theme: &Theme) -> Color {
        theme.color(VFX_SLOT).with_alpha(FILL_ALPHA)
    }
}
