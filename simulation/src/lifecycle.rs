use crate::config::SimConfig;
use crate::entity::{Entity, EntityId, EntityKind, EntityStore, Tags};
use crate::env::{RandomSource, SoundSink, Viewport};
use crate::spring::Spring;
use crate::theme::{ENEMY_SLOT, PLAYER_SLOT, SPIKE_SLOT};
use nalgebra::Vector2;
use tracing::debug;

/// Starts the collapse of `entity`. Returns false when it is already
/// collapsing or has nothing left to shrink.
pub fn trigger_destruction(entity: &mut Entity, config: &SimConfig) -> bool {
    if entity.is_dying() || entity.radius <= 0.0 {
        return false;
    }
    // keep any in-flight growth speed so the collapse starts smoothly
    let velocity = entity.spring.map_or(0.0, |spring| spring.velocity);
    let mut spring = Spring::new(entity.radius, 0.0, config.destroy_spring);
    spring.velocity = velocity;
    entity.spring = Some(spring);
    true
}

pub fn spawn_player(store: &mut EntityStore, config: &SimConfig, position: Vector2<f32>) -> EntityId {
    let player = Entity::new(EntityKind::Player, position, config.player_radius, PLAYER_SLOT);
    let id = store.insert(player);
    debug!(entity = id.index(), x = position.x, y = position.y, "player spawned");
    id
}

/// Adds a growing enemy. `ordinal` is the 1-based spawn count; every
/// `spike_every`-th enemy comes out lethal.
pub fn spawn_enemy(
    store: &mut EntityStore,
    config: &SimConfig,
    position: Vector2<f32>,
    ordinal: u32,
    sound: &dyn SoundSink,
) -> EntityId {
    let spike = config.spike_every > 0 && ordinal % config.spike_every == 0;
    let slot = if spike { SPIKE_SLOT } else { ENEMY_SLOT };
    let start = config.enemy_radius * config.spawn_start_fraction;

    let mut enemy = Entity::new(EntityKind::Enemy, position, start, slot);
    enemy.tags = Tags::DESTRUCTIBLE;
    if spike {
        enemy.tags.insert(Tags::LETHAL);
    }
    enemy.spring = Some(Spring::new(start, config.enemy_radius, config.spawn_spring));

    let id = store.insert(enemy);
    sound.play_spawn();
    debug!(entity = id.index(), spike, x = position.x, y = position.y, "enemy spawned");
    id
}

/// Random integer point on screen, `margin` away from every edge.
pub fn random_spawn_position(
    viewport: &Viewport,
    margin: f32,
    rng: &mut dyn RandomSource,
) -> Vector2<f32> {
    let area = viewport.visible_world().inset(margin);
    let x = rng.range_inclusive(area.x_min.ceil() as i32, area.x_max.floor() as i32);
    let y = rng.range_inclusive(area.y_min.ceil() as i32, area.y_max.floor() as i32);
    Vector2::new(x as f32, y as f32)
}

/// What a touching pair does to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    Elastic,
    DestroyBoth,
    DestroyFirst,
    DestroySecond,
}

impl PairOutcome {
    /// Two lethal entities only destroy each other when both are also
    /// destructible; otherwise a lethal side kills a destructible one.
    pub fn classify(a: Tags, b: Tags) -> Self {
        if a.is_lethal() && b.is_lethal() {
            return if a.is_destructible() && b.is_destructible() {
                PairOutcome::DestroyBoth
            } else {
                PairOutcome::Elastic
            };
        }
        if a.is_lethal() && b.is_destructible() {
            PairOutcome::DestroySecond
        } else if b.is_lethal() && a.is_destructible() {
            PairOutcome::DestroyFirst
        } else {
            PairOutcome::Elastic
        }
    }
}
