//! Swarm arena: a player circle, spawned enemies, spring-driven growth and
//! collapse, and a quadtree-accelerated collision step.
//!
//! The crate owns the simulation state only. Input, drawing, sound and
//! randomness come in through the traits in [`env`], so the same [`World`]
//! runs under a window, a test harness or the headless `swarm` binary.

pub mod config;
pub mod entity;
pub mod env;
pub mod lifecycle;
pub mod movement;
pub mod physics;
pub mod render;
pub mod spring;
pub mod theme;
pub mod vfx;
pub mod world;

pub use collisions::InteractionMode;
pub use config::{ConfigError, SimConfig, SpringParams};
pub use entity::{Entity, EntityId, EntityKind, EntityStore, Tags};
pub use env::{Action, AudioTriggers, Frame, InputState, RandomSource, Renderer, SoundSink, Viewport};
pub use physics::{BroadPhase, CollisionReport};
pub use spring::Spring;
pub use theme::{Color, Theme, ThemeSet};
pub use world::{StepReport, World};
