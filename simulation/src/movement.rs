use crate::config::SimConfig;
use crate::entity::{EntityId, EntityKind, EntityStore};
use crate::env::{Action, InputState, RandomSource};
use collisions::InteractionMode;
use nalgebra::Vector2;

/// Arrow-key velocity. Right wins over left and down wins over up when
/// both are held.
pub fn player_velocity(input: &dyn InputState, speed: f32) -> Vector2<f32> {
    let mut velocity = Vector2::zeros();
    if input.is_down(Action::MoveLeft) {
        velocity.x = -speed;
    }
    if input.is_down(Action::MoveRight) {
        velocity.x = speed;
    }
    if input.is_down(Action::MoveUp) {
        velocity.y = -speed;
    }
    if input.is_down(Action::MoveDown) {
        velocity.y = speed;
    }
    velocity
}

pub fn steer_player(store: &mut EntityStore, player: EntityId, input: &dyn InputState, speed: f32) {
    if let Some(entity) = store.get_mut(player) {
        entity.velocity = player_velocity(input, speed);
    }
}

/// Velocity change from the field around `source`. Falls off linearly to
/// zero at `range`; pulls towards the source when attracting and pushes
/// away when repelling.
pub fn field_impulse(
    position: Vector2<f32>,
    source: Vector2<f32>,
    range: f32,
    accel: f32,
    mode: InteractionMode,
    dt: f32,
) -> Vector2<f32> {
    let to_source = source - position;
    let distance = to_source.norm();
    if distance <= 0.0 || distance >= range {
        return Vector2::zeros();
    }
    let strength = accel * (1.0 - distance / range);
    let direction = to_source / distance;
    match mode {
        InteractionMode::Attract => direction * strength * dt,
        InteractionMode::Repel => -direction * strength * dt,
    }
}

pub struct FieldSource {
    pub position: Vector2<f32>,
    pub range: f32,
    pub mode: InteractionMode,
}

/// Gives fresh enemies a random heading and applies the player's field
/// while it is active.
pub fn steer_enemies(
    store: &mut EntityStore,
    field: Option<&FieldSource>,
    rng: &mut dyn RandomSource,
    config: &SimConfig,
    dt: f32,
) {
    let speed = config.enemy_speed.round() as i32;
    for (_, entity) in store.iter_mut() {
        if entity.kind != EntityKind::Enemy {
            continue;
        }
        if !entity.heading_set {
            entity.velocity = Vector2::new(
                rng.range_inclusive(-speed, speed) as f32,
                rng.range_inclusive(-speed, speed) as f32,
            );
            entity.heading_set = true;
        }
        if let Some(field) = field {
            entity.velocity += field_impulse(
                entity.position,
                field.position,
                field.range,
                config.attraction_accel,
                field.mode,
                dt,
            );
        }
    }
}

pub fn integrate(store: &mut EntityStore, dt: f32) {
    for (_, entity) in store.iter_mut() {
        entity.position += entity.velocity * dt;
    }
}
