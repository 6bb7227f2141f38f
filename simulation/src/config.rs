use crate::physics::BroadPhase;
use quadtree::QuadtreeError;
use std::env;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("viewport must be positive, got {width}x{height}")]
    InvalidViewport { width: i32, height: i32 },
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
    #[error("{which} spring needs stiffness > 0 and damping in [0, 1]")]
    InvalidSpring { which: &'static str },
    #[error(transparent)]
    Quadtree(#[from] QuadtreeError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub stiffness: f32,
    /// Fraction of velocity kept per second.
    pub damping: f32,
}

impl SpringParams {
    fn is_valid(&self) -> bool {
        self.stiffness.is_finite()
            && self.stiffness > 0.0
            && (0.0..=1.0).contains(&self.damping)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub viewport_width: i32,
    pub viewport_height: i32,

    pub player_radius: f32,
    pub player_speed: f32,
    pub enemy_radius: f32,
    /// Initial enemy velocity is drawn from `[-enemy_speed, enemy_speed]` per axis.
    pub enemy_speed: f32,

    /// Distance kept from the screen edge when picking a spawn point.
    pub spawn_margin: f32,
    /// Newly spawned enemies start at this fraction of their radius and grow.
    pub spawn_start_fraction: f32,
    pub spawn_spring: SpringParams,
    pub destroy_spring: SpringParams,
    /// Every Nth spawned enemy is also lethal. 0 disables spikes.
    pub spike_every: u32,

    pub restitution: f32,
    pub attraction_accel: f32,
    /// Field range as a fraction of the shorter screen side.
    pub attraction_range_fraction: f32,

    pub broad_phase: BroadPhase,
    pub quadtree: quadtree::Config,
    pub debug_quadtree: bool,

    pub seed: u64,
    pub headless_steps: u32,
    pub headless_spawn_every: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            viewport_width: 800,
            viewport_height: 450,
            player_radius: 20.0,
            player_speed: 200.0,
            enemy_radius: 15.0,
            enemy_speed: 100.0,
            spawn_margin: 50.0,
            spawn_start_fraction: 0.3,
            spawn_spring: SpringParams {
                stiffness: 300.0,
                damping: 0.001,
            },
            destroy_spring: SpringParams {
                stiffness: 700.0,
                damping: 0.00001,
            },
            spike_every: 5,
            restitution: collisions::DEFAULT_RESTITUTION,
            attraction_accel: 300.0,
            attraction_range_fraction: 0.5,
            broad_phase: BroadPhase::default(),
            quadtree: quadtree::Config::default(),
            debug_quadtree: false,
            seed: 0x5eed,
            headless_steps: 600,
            headless_spawn_every: 30,
        }
    }
}

fn env_override<T: FromStr>(name: &str, slot: &mut T) {
    let Ok(raw) = env::var(name) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *slot = value,
        Err(_) => warn!(var = name, value = %raw, "ignoring unparsable override"),
    }
}

impl SimConfig {
    /// Defaults overridden by `SWARM_*` environment variables. Bad values
    /// are logged and skipped.
    pub fn load_or_default() -> Self {
        let mut config = SimConfig::default();
        env_override("SWARM_VIEWPORT_WIDTH", &mut config.viewport_width);
        env_override("SWARM_VIEWPORT_HEIGHT", &mut config.viewport_height);
        env_override("SWARM_RESTITUTION", &mut config.restitution);
        env_override("SWARM_SPIKE_EVERY", &mut config.spike_every);
        env_override("SWARM_BROAD_PHASE", &mut config.broad_phase);
        env_override("SWARM_NODE_CAPACITY", &mut config.quadtree.node_capacity);
        env_override("SWARM_MAX_DEPTH", &mut config.quadtree.max_depth);
        env_override("SWARM_DEBUG_QUADTREE", &mut config.debug_quadtree);
        env_override("SWARM_SEED", &mut config.seed);
        env_override("SWARM_STEPS", &mut config.headless_steps);
        env_override("SWARM_SPAWN_EVERY", &mut config.headless_spawn_every);
        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport_width <= 0 || self.viewport_height <= 0 {
            return Err(ConfigError::InvalidViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        let positive = [
            ("player_radius", self.player_radius),
            ("enemy_radius", self.enemy_radius),
            ("player_speed", self.player_speed),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        let non_negative = [
            ("enemy_speed", self.enemy_speed),
            ("spawn_margin", self.spawn_margin),
            ("attraction_accel", self.attraction_accel),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        let unit = [
            ("restitution", self.restitution),
            ("spawn_start_fraction", self.spawn_start_fraction),
            ("attraction_range_fraction", self.attraction_range_fraction),
        ];
        for (field, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        if !self.spawn_spring.is_valid() {
            return Err(ConfigError::InvalidSpring { which: "spawn" });
        }
        if !self.destroy_spring.is_valid() {
            return Err(ConfigError::InvalidSpring { which: "destroy" });
        }
        self.quadtree.validate()?;
        Ok(())
    }
}
