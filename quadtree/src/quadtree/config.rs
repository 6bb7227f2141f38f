use crate::error::{QuadtreeError, QuadtreeResult};

/// Entities a node holds before it subdivides. Also the hard bound of a
/// node's inline entity storage.
pub const NODE_CAPACITY: usize = 16;

/// Default depth ceiling; the root is depth 0.
pub const MAX_DEPTH: u32 = 8;

/// Largest depth ceiling a config may ask for.
pub const MAX_DEPTH_LIMIT: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub node_capacity: usize,
    pub max_depth: u32,
}

impl Config {
    pub fn validate(&self) -> QuadtreeResult<()> {
        if self.node_capacity == 0 || self.node_capacity > NODE_CAPACITY {
            return Err(QuadtreeError::InvalidNodeCapacity {
                node_capacity: self.node_capacity,
                max: NODE_CAPACITY,
            });
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(QuadtreeError::InvalidMaxDepth {
                max_depth: self.max_depth,
                max: MAX_DEPTH_LIMIT,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            node_capacity: NODE_CAPACITY,
            max_depth: MAX_DEPTH,
        }
    }
}
