use super::types::{NodeStack, ROOT};
use super::QuadTree;
use common::shapes::Aabb;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuadtreeStats {
    pub node_count: usize,
    pub total_entities: usize,
    pub max_depth_reached: u32,
    pub dropped_entities: usize,
}

impl fmt::Display for QuadtreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} entities, depth {}",
            self.node_count, self.total_entities, self.max_depth_reached
        )
    }
}

/// Read-only snapshot of one node, handed out by [`QuadTree::for_each_node`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeView {
    pub bounds: Aabb,
    pub depth: u32,
    pub is_leaf: bool,
    pub entity_count: usize,
}

impl QuadTree {
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of accepted `insert` calls since the last clear, counting an
    /// entity once no matter how many leaves hold it.
    pub fn total_entities(&self) -> usize {
        self.total_entities
    }

    pub fn max_depth_reached(&self) -> u32 {
        self.max_depth_reached
    }

    /// Entity placements refused since the last clear: full leaves at the
    /// depth ceiling, and bounds outside a split root. A straddling entity
    /// refused by one leaf but kept by another counts too.
    pub fn dropped_entities(&self) -> usize {
        self.dropped_entities
    }

    pub fn is_empty(&self) -> bool {
        self.total_entities == 0
    }

    pub fn stats(&self) -> QuadtreeStats {
        QuadtreeStats {
            node_count: self.node_count,
            total_entities: self.total_entities,
            max_depth_reached: self.max_depth_reached,
            dropped_entities: self.dropped_entities,
        }
    }

    /// Visits every node parent-first in NW, NE, SW, SE order.
    pub fn for_each_node<F>(&self, mut f: F)
    where
        F: FnMut(NodeView),
    {
        let mut stack = NodeStack::new();
        stack.push(ROOT);
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx as usize];
            f(NodeView {
                bounds: node.bounds,
                depth: node.depth,
                is_leaf: node.is_leaf(),
                entity_count: node.entities.len(),
            });
            if !node.is_leaf() {
                for &child in node.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
    }
}
