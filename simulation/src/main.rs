//! Headless driver: runs the simulation against scripted input and a
//! counting renderer, logging what happens.

use anyhow::Context;
use nalgebra::Vector2;
use rand::prelude::*;
use simulation::{
    Action, AudioTriggers, Color, Frame, InputState, Renderer, SimConfig, ThemeSet, Viewport, World,
};
use std::collections::HashSet;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DT: f32 = 1.0 / 60.0;

#[derive(Default)]
struct ScriptedInput {
    down: HashSet<Action>,
    pressed: HashSet<Action>,
}

impl ScriptedInput {
    /// Circles the player, spawns on a cadence, pulses the field and flips
    /// the mode and theme once each along the way.
    fn advance(&mut self, step: u32, config: &SimConfig) {
        self.down.clear();
        self.pressed.clear();

        let held = match (step / 60) % 4 {
            0 => Action::MoveRight,
            1 => Action::MoveDown,
            2 => Action::MoveLeft,
            _ => Action::MoveUp,
        };
        self.down.insert(held);
        if (step / 90) % 2 == 1 {
            self.down.insert(Action::Attract);
        }

        if config.headless_spawn_every > 0 && step % config.headless_spawn_every == 0 {
            self.pressed.insert(Action::Spawn);
        }
        if step == config.headless_steps / 2 {
            self.pressed.insert(Action::ToggleMode);
            self.pressed.insert(Action::NextTheme);
        }
    }
}

impl InputState for ScriptedInput {
    fn is_down(&self, action: Action) -> bool {
        self.down.contains(&action)
    }

    fn was_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }
}

#[derive(Default)]
struct CountingRenderer {
    circles: usize,
    outlines: usize,
    rects: usize,
    texts: usize,
}

impl Renderer for CountingRenderer {
    fn fill_circle(&mut self, _center: Vector2<f32>, _radius: f32, _color: Color) {
        self.circles += 1;
    }

    fn circle_outline(&mut self, _center: Vector2<f32>, _radius: f32, _color: Color) {
        self.outlines += 1;
    }

    fn rect_outline(&mut self, _bounds: common::shapes::Aabb, _thickness: f32, _color: Color) {
        self.rects += 1;
    }

    fn text(&mut self, _text: &str, _x: f32, _y: f32, _size: f32, _color: Color) {
        self.texts += 1;
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = SimConfig::load_or_default();
    config.validate().context("invalid simulation config")?;
    info!(
        width = config.viewport_width,
        height = config.viewport_height,
        broad_phase = ?config.broad_phase,
        steps = config.headless_steps,
        "starting headless run"
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let audio = AudioTriggers::default();
    let mut input = ScriptedInput::default();
    let mut renderer = CountingRenderer::default();
    let viewport = Viewport::new(config.viewport_width, config.viewport_height);
    let mut world = World::new(config.clone(), ThemeSet::default());

    let (mut spawn_cues, mut bounce_cues, mut destroyed) = (0u32, 0u32, 0usize);
    for step in 0..config.headless_steps {
        input.advance(step, &config);
        let mut frame = Frame {
            dt: DT,
            viewport,
            input: &input,
            rng: &mut rng,
            sound: &audio,
        };
        let report = world.step(&mut frame);
        world.render(&mut renderer);

        if audio.take_spawn() {
            spawn_cues += 1;
        }
        if let Some(speed) = audio.take_bounce() {
            bounce_cues += 1;
            debug!(step, speed, "bounce");
        }
        destroyed += report.collisions.destroyed;
        if step % 60 == 0 {
            info!(
                step,
                entities = world.store().len(),
                fps = world.fps(),
                quadtree = %world.tree().stats(),
                "progress"
            );
        }
    }

    info!(
        entities = world.store().len(),
        destroyed,
        spawn_cues,
        bounce_cues,
        circles = renderer.circles,
        outlines = renderer.outlines,
        rects = renderer.rects,
        texts = renderer.texts,
        mode = world.mode().label(),
        theme = %world.theme().name,
        "headless run finished"
    );
    Ok(())
}
