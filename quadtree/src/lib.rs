pub mod error;
pub mod quadtree;

pub use error::{QuadtreeError, QuadtreeResult};
pub use quadtree::{Config, NodeView, QuadTree, QuadtreeStats, SpatialEntity};
pub use quadtree::{MAX_DEPTH, NODE_CAPACITY};
