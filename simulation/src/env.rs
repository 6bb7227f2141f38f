//! Everything the simulation needs from its host: input, drawing, sound and
//! randomness. Hosts implement these traits; the world only sees a [`Frame`].

use crate::theme::Color;
use common::shapes::Aabb;
use nalgebra::Vector2;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Held to pull (or push) enemies around the player.
    Attract,
    Spawn,
    NextTheme,
    ToggleMode,
}

pub trait InputState {
    /// True while the key bound to `action` is held.
    fn is_down(&self, action: Action) -> bool;
    /// True only on the frame the key went down.
    fn was_pressed(&self, action: Action) -> bool;
}

pub trait RandomSource {
    /// Uniform integer in `[low, high]`. Returns `low` when the range is empty.
    fn range_inclusive(&mut self, low: i32, high: i32) -> i32;
}

impl<R: rand::Rng + ?Sized> RandomSource for R {
    fn range_inclusive(&mut self, low: i32, high: i32) -> i32 {
        if low >= high {
            return low;
        }
        self.gen_range(low..=high)
    }
}

/// Fire-and-forget sound cues. Takes `&self` so a sink can be shared with
/// an audio thread.
pub trait SoundSink {
    fn play_spawn(&self);
    fn play_bounce(&self, speed: f32);
}

/// Drawing primitives, all in screen coordinates.
pub trait Renderer {
    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32, color: Color);
    fn circle_outline(&mut self, center: Vector2<f32>, radius: f32, color: Color);
    fn rect_outline(&mut self, bounds: Aabb, thickness: f32, color: Color);
    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
}

/// Screen size plus a zoom about the screen centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub zoom: f32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Viewport {
            width,
            height,
            zoom: 1.0,
        }
    }

    fn effective_zoom(&self) -> f32 {
        if self.zoom.is_finite() && self.zoom > 0.0 {
            self.zoom
        } else {
            1.0
        }
    }

    pub fn center(&self) -> Vector2<f32> {
        Vector2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }

    /// World rectangle currently on screen. This is also the arena the
    /// entities bounce inside.
    pub fn visible_world(&self) -> Aabb {
        let center = self.center();
        let zoom = self.effective_zoom();
        let half_w = self.width.max(0) as f32 * 0.5 / zoom;
        let half_h = self.height.max(0) as f32 * 0.5 / zoom;
        Aabb::new(
            center.x - half_w,
            center.y - half_h,
            center.x + half_w,
            center.y + half_h,
        )
    }

    pub fn to_screen(&self, world: Vector2<f32>) -> Vector2<f32> {
        let center = self.center();
        center + (world - center) * self.effective_zoom()
    }

    pub fn rect_to_screen(&self, bounds: Aabb) -> Aabb {
        let min = self.to_screen(Vector2::new(bounds.x_min, bounds.y_min));
        let max = self.to_screen(Vector2::new(bounds.x_max, bounds.y_max));
        Aabb::new(min.x, min.y, max.x, max.y)
    }

    pub fn scale(&self, length: f32) -> f32 {
        length * self.effective_zoom()
    }
}

/// Per-step view of the host handed to [`crate::World::step`].
pub struct Frame<'a> {
    pub dt: f32,
    pub viewport: Viewport,
    pub input: &'a dyn InputState,
    pub rng: &'a mut dyn RandomSource,
    pub sound: &'a dyn SoundSink,
}

/// Latches sound requests for an audio callback to pick up. Relaxed
/// ordering: a cue that lands one buffer late is fine.
#[derive(Debug, Default)]
pub struct AudioTriggers {
    spawn: AtomicBool,
    bounce: AtomicBool,
    bounce_speed: AtomicU32,
}

impl AudioTriggers {
    pub fn take_spawn(&self) -> bool {
        self.spawn.swap(false, Ordering::Relaxed)
    }

    /// Pending bounce cue with the speed of the most recent bounce.
    pub fn take_bounce(&self) -> Option<f32> {
        if self.bounce.swap(false, Ordering::Relaxed) {
            Some(f32::from_bits(self.bounce_speed.load(Ordering::Relaxed)))
        } else {
            None
        }
    }
}

impl SoundSink for AudioTriggers {
    fn play_spawn(&self) {
        self.spawn.store(true, Ordering::Relaxed);
    }

    fn play_bounce(&self, speed: f32) {
        self.bounce_speed.store(speed.to_bits(), Ordering::Relaxed);
        self.bounce.store(true, Ordering::Relaxed);
    }
}
