use crate::entity::EntityStore;
use crate::env::{Renderer, Viewport};
use crate::theme::{Color, Theme};
use crate::vfx::AttractionVfx;
use collisions::InteractionMode;
use nalgebra::Vector2;
use quadtree::QuadTree;

const UI_TEXT_SIZE: f32 = 20.0;
const UI_MARGIN: f32 = 10.0;
const FPS_TEXT_WIDTH: f32 = 90.0;
const LEAF_TEXT_SIZE: f32 = 10.0;

/// Frames per second, refreshed once per simulated second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f32,
    fps: u32,
}

impl FpsCounter {
    pub fn tick(&mut self, dt: f32) {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed >= 1.0 {
            self.fps = self.frames;
            self.frames = 0;
            self.elapsed = 0.0;
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

pub fn draw_entities(renderer: &mut dyn Renderer, store: &EntityStore, theme: &Theme, viewport: &Viewport) {
    for (_, entity) in store.iter() {
        if entity.radius <= 0.0 {
            continue;
        }
        renderer.fill_circle(
            viewport.to_screen(entity.position),
            viewport.scale(entity.radius),
            theme.color(entity.color_slot),
        );
    }
}

pub fn draw_field(
    renderer: &mut dyn Renderer,
    vfx: &AttractionVfx,
    center: Vector2<f32>,
    theme: &Theme,
    viewport: &Viewport,
) {
    if !vfx.is_visible() {
        return;
    }
    let center = viewport.to_screen(center);
    let radius = viewport.scale(vfx.current_radius);
    renderer.fill_circle(center, radius, AttractionVfx::fill_color(theme));
    renderer.circle_outline(center, radius, AttractionVfx::outline_color(theme));
}

fn depth_color(depth: u32) -> Color {
    match depth {
        0 => Color::GREEN.with_alpha(100),
        1 => Color::rgba(0, 200, 255, 80),
        2 => Color::YELLOW.with_alpha(60),
        3 => Color::ORANGE.with_alpha(50),
        _ => Color::RED.with_alpha(40),
    }
}

/// Node outlines, thinner with depth, and the resident count of each
/// non-empty leaf.
pub fn draw_quadtree(renderer: &mut dyn Renderer, tree: &QuadTree, viewport: &Viewport) {
    tree.for_each_node(|node| {
        let bounds = viewport.rect_to_screen(node.bounds);
        let thickness = (2.0 - node.depth as f32 * 0.3).max(0.5);
        renderer.rect_outline(bounds, thickness, depth_color(node.depth));
        if node.is_leaf && node.entity_count > 0 {
            renderer.text(
                &node.entity_count.to_string(),
                bounds.x_min + 2.0,
                bounds.y_min + 2.0,
                LEAF_TEXT_SIZE,
                Color::WHITE.with_alpha(150),
            );
        }
    });
}

pub struct UiState<'a> {
    pub theme: &'a Theme,
    pub fps: u32,
    pub mode: InteractionMode,
    pub entity_count: usize,
    pub tree: Option<&'a QuadTree>,
}

/// Theme name top-left, FPS top-right, mode underneath. Quadtree stats
/// join in when the overlay is on.
pub fn draw_ui(renderer: &mut dyn Renderer, viewport: &Viewport, ui: &UiState<'_>) {
    let fg = ui.theme.foreground;
    renderer.text(&ui.theme.name, UI_MARGIN, UI_MARGIN, UI_TEXT_SIZE, fg);
    renderer.text(
        &format!("FPS: {}", ui.fps),
        viewport.width as f32 - FPS_TEXT_WIDTH - UI_MARGIN,
        UI_MARGIN,
        UI_TEXT_SIZE,
        fg,
    );
    renderer.text(
        &format!("Mode: {}", ui.mode.label()),
        UI_MARGIN,
        UI_MARGIN + 30.0,
        UI_TEXT_SIZE,
        fg,
    );
    renderer.text(
        &format!("Entities: {}", ui.entity_count),
        UI_MARGIN,
        UI_MARGIN + 60.0,
        UI_TEXT_SIZE,
        fg,
    );
    if let Some(tree) = ui.tree {
        renderer.text(
            &format!("Quadtree: {}", tree.stats()),
            UI_MARGIN,
            UI_MARGIN + 90.0,
            UI_TEXT_SIZE,
            Color::YELLOW,
        );
    }
}
