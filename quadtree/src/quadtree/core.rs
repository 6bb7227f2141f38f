use super::types::{Node, SpatialEntity, CHILD_COUNT, ROOT};
use super::{Config, QuadTree, NODE_CAPACITY};
use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::Aabb;
use fxhash::FxHashSet;

impl QuadTree {
    pub fn new(world_bounds: Aabb) -> Self {
        Self::new_with_config(world_bounds, Config::default())
    }

    /// Out-of-range config values are clamped rather than rejected; use
    /// `Config::validate` first when that matters.
    pub fn new_with_config(world_bounds: Aabb, config: Config) -> Self {
        let node_capacity = config.node_capacity.clamp(1, NODE_CAPACITY);
        let max_depth = config.max_depth.min(super::MAX_DEPTH_LIMIT);
        let mut nodes = Vec::with_capacity(1 + CHILD_COUNT * 8);
        nodes.push(Node::new_leaf(world_bounds, 0));
        Self {
            nodes,
            world_bounds,
            node_capacity,
            max_depth,
            total_entities: 0,
            node_count: 1,
            max_depth_reached: 0,
            dropped_entities: 0,
            pair_dedupe: FxHashSet::default(),
        }
    }

    pub fn try_new(world_bounds: Aabb, config: Config) -> QuadtreeResult<Self> {
        validate_extent(&world_bounds)?;
        config.validate()?;
        Ok(Self::new_with_config(world_bounds, config))
    }

    pub fn world_bounds(&self) -> Aabb {
        self.world_bounds
    }

    /// Drops every node but the root and empties it. The node arena keeps its
    /// allocation so a per-frame rebuild does not hit the allocator.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        let root = &mut self.nodes[ROOT as usize];
        *root = Node::new_leaf(self.world_bounds, 0);
        self.total_entities = 0;
        self.node_count = 1;
        self.max_depth_reached = 0;
        self.dropped_entities = 0;
    }

    /// Clears the tree and moves the root to new world bounds, e.g. after the
    /// viewport was resized.
    pub fn reset(&mut self, world_bounds: Aabb) {
        self.world_bounds = world_bounds;
        self.clear();
    }

    /// Inserts `index` into every leaf its bounds touch. Bounds with
    /// non-finite coordinates are ignored, and so is an entity landing in a
    /// full leaf that can no longer subdivide.
    ///
    /// The root leaf takes any bounds, but once it has split an entity lying
    /// fully outside the world bounds reaches no child and is dropped. It
    /// still counts towards `total_entities`; every drop is counted by
    /// `dropped_entities`.
    pub fn insert(&mut self, index: u32, bounds: Aabb) {
        if !bounds_are_finite(&bounds) {
            return;
        }
        self.insert_into(ROOT, SpatialEntity { index, bounds });
        self.total_entities += 1;
    }

    fn insert_into(&mut self, node_idx: u32, entity: SpatialEntity) {
        let node = &mut self.nodes[node_idx as usize];
        if !node.is_leaf() {
            let children = node.children;
            self.insert_into_children(children, entity);
            return;
        }

        if node.entities.len() < self.node_capacity {
            node.entities.push(entity);
            return;
        }

        if node.depth < self.max_depth {
            let children = self.subdivide(node_idx);
            let residents = std::mem::take(&mut self.nodes[node_idx as usize].entities);
            for resident in residents {
                self.insert_into_children(children, resident);
            }
            self.insert_into_children(children, entity);
            return;
        }

        // At the depth ceiling the inline storage is the last word.
        if node.entities.len() < NODE_CAPACITY {
            node.entities.push(entity);
        } else {
            self.dropped_entities += 1;
        }
    }

    #[inline(always)]
    fn insert_into_children(&mut self, children: [u32; CHILD_COUNT], entity: SpatialEntity) {
        let mut placed = false;
        for child in children {
            if self.nodes[child as usize].bounds.intersects(&entity.bounds) {
                self.insert_into(child, entity);
                placed = true;
            }
        }
        if !placed {
            self.dropped_entities += 1;
        }
    }

    fn subdivide(&mut self, node_idx: u32) -> [u32; CHILD_COUNT] {
        let (bounds, depth) = {
            let node = &self.nodes[node_idx as usize];
            (node.bounds, node.depth + 1)
        };

        let mut children = [0u32; CHILD_COUNT];
        for (slot, quadrant) in children.iter_mut().zip(bounds.quadrants()) {
            *slot = self.nodes.len() as u32;
            self.nodes.push(Node::new_leaf(quadrant, depth));
        }
        self.nodes[node_idx as usize].children = children;

        self.node_count += CHILD_COUNT;
        self.max_depth_reached = self.max_depth_reached.max(depth);
        children
    }
}

fn bounds_are_finite(bounds: &Aabb) -> bool {
    bounds.x_min.is_finite()
        && bounds.y_min.is_finite()
        && bounds.x_max.is_finite()
        && bounds.y_max.is_finite()
}

fn validate_extent(bounds: &Aabb) -> QuadtreeResult<()> {
    if bounds.is_valid() {
        Ok(())
    } else {
        Err(QuadtreeError::InvalidExtent {
            x_min: bounds.x_min,
            y_min: bounds.y_min,
            x_max: bounds.x_max,
            y_max: bounds.y_max,
        })
    }
}
