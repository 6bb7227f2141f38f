//! Arena-backed region quadtree over axis-aligned boxes.
//!
//! Nodes live in a single `Vec` and address their children by index; the root
//! is always node 0, so index 0 doubles as the "no child" sentinel. Entities
//! straddling a split line are stored in every child they touch, which means
//! queries may report the same entity more than once.

mod collision_pairs;
mod config;
mod core;
mod query;
mod stats;
mod types;

pub use config::{Config, MAX_DEPTH, MAX_DEPTH_LIMIT, NODE_CAPACITY};
pub use stats::{NodeView, QuadtreeStats};
pub use types::SpatialEntity;

use common::shapes::Aabb;
use fxhash::FxHashSet;
use types::Node;

pub struct QuadTree {
    nodes: Vec<Node>,
    world_bounds: Aabb,
    node_capacity: usize,
    max_depth: u32,
    total_entities: usize,
    node_count: usize,
    max_depth_reached: u32,
    dropped_entities: usize,
    pair_dedupe: FxHashSet<u64>,
}
