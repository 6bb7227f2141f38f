use crate::config::SimConfig;
use crate::entity::{EntityId, EntityStore};
use crate::env::{Action, Frame, Renderer, SoundSink, Viewport};
use crate::lifecycle;
use crate::movement::{self, FieldSource};
use crate::physics::{self, CollisionReport};
use crate::render::{self, FpsCounter, UiState};
use crate::spring;
use crate::theme::{Theme, ThemeSet};
use crate::vfx::AttractionVfx;
use collisions::InteractionMode;
use nalgebra::Vector2;
use quadtree::QuadTree;
use tracing::{debug, trace};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct StepReport {
    pub spawned: Option<EntityId>,
    pub collisions: CollisionReport,
    /// Entities reflected off an arena edge.
    pub bounces: usize,
    pub settled_springs: usize,
    pub removed: Vec<EntityId>,
}

/// The whole simulation: entities, the spatial index and the global mode.
pub struct World {
    config: SimConfig,
    store: EntityStore,
    player: EntityId,
    mode: InteractionMode,
    themes: ThemeSet,
    tree: QuadTree,
    pairs: Vec<(u32, u32)>,
    vfx: AttractionVfx,
    viewport: Viewport,
    fps: FpsCounter,
    spawned: u32,
}

impl World {
    /// Empty arena with the player in the middle of the configured viewport.
    pub fn new(config: SimConfig, themes: ThemeSet) -> Self {
        let viewport = Viewport::new(config.viewport_width, config.viewport_height);
        let tree = QuadTree::new_with_config(viewport.visible_world(), config.quadtree);
        let mut store = EntityStore::new();
        let player = lifecycle::spawn_player(&mut store, &config, viewport.center());
        World {
            config,
            store,
            player,
            mode: InteractionMode::default(),
            themes,
            tree,
            pairs: Vec::new(),
            vfx: AttractionVfx::default(),
            viewport,
            fps: FpsCounter::default(),
            spawned: 0,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    pub fn theme(&self) -> &Theme {
        self.themes.current()
    }

    pub fn tree(&self) -> &QuadTree {
        &self.tree
    }

    pub fn vfx(&self) -> &AttractionVfx {
        &self.vfx
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn set_debug_quadtree(&mut self, enabled: bool) {
        self.config.debug_quadtree = enabled;
    }

    /// Spawns the next enemy at `position`, counting towards the spike
    /// cadence like a key press would.
    pub fn spawn_enemy_at(&mut self, position: Vector2<f32>, sound: &dyn SoundSink) -> EntityId {
        self.spawned += 1;
        lifecycle::spawn_enemy(&mut self.store, &self.config, position, self.spawned, sound)
    }

    fn field_range(&self) -> f32 {
        let shorter = self.viewport.width.min(self.viewport.height).max(0) as f32;
        shorter * self.config.attraction_range_fraction
    }

    /// One tick: input, movement, collisions, walls, springs, effects.
    pub fn step(&mut self, frame: &mut Frame<'_>) -> StepReport {
        let dt = if frame.dt.is_finite() { frame.dt.max(0.0) } else { 0.0 };
        self.viewport = frame.viewport;
        self.fps.tick(dt);
        let arena = self.viewport.visible_world();
        let mut report = StepReport::default();

        if frame.input.was_pressed(Action::Spawn) {
            let position =
                lifecycle::random_spawn_position(&self.viewport, self.config.spawn_margin, &mut *frame.rng);
            report.spawned = Some(self.spawn_enemy_at(position, frame.sound));
        }
        if frame.input.was_pressed(Action::NextTheme) {
            let theme = self.themes.advance();
            debug!(theme = %theme.name, "theme changed");
        }
        if frame.input.was_pressed(Action::ToggleMode) {
            self.mode = self.mode.toggled();
            debug!(mode = self.mode.label(), "interaction mode toggled");
        }

        movement::steer_player(&mut self.store, self.player, frame.input, self.config.player_speed);
        let attracting = frame.input.is_down(Action::Attract);
        let field = match self.store.get(self.player) {
            Some(player) if attracting => Some(FieldSource {
                position: player.position,
                range: self.field_range(),
                mode: self.mode,
            }),
            _ => None,
        };
        movement::steer_enemies(&mut self.store, field.as_ref(), &mut *frame.rng, &self.config, dt);
        movement::integrate(&mut self.store, dt);

        report.collisions = physics::resolve_collisions(
            &mut self.store,
            &mut self.tree,
            &mut self.pairs,
            arena,
            self.mode,
            &self.config,
        );
        report.bounces = physics::bounce_off_walls(&mut self.store, &arena, frame.sound);

        let springs = spring::animate_springs(&mut self.store, dt);
        report.settled_springs = springs.settled;
        report.removed = springs.removed;
        if !report.removed.is_empty() {
            debug!(removed = report.removed.len(), remaining = self.store.len(), "entities removed");
        }

        let range = self.field_range();
        self.vfx.update(attracting, range);

        trace!(
            entities = self.store.len(),
            contacts = report.collisions.contacts,
            bounces = report.bounces,
            "step"
        );
        report
    }

    /// Draws the field ring, the entities, the optional quadtree overlay
    /// and the UI, back to front.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        let theme = self.themes.current();
        if let Some(player) = self.store.get(self.player) {
            render::draw_field(renderer, &self.vfx, player.position, theme, &self.viewport);
        }
        render::draw_entities(renderer, &self.store, theme, &self.viewport);
        if self.config.debug_quadtree {
            render::draw_quadtree(renderer, &self.tree, &self.viewport);
        }
        let ui = UiState {
            theme,
            fps: self.fps.fps(),
            mode: self.mode,
            entity_count: self.store.len(),
            tree: self.config.debug_quadtree.then_some(&self.tree),
        };
        render::draw_ui(renderer, &self.viewport, &ui);
    }
}
