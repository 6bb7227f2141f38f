use super::config::NODE_CAPACITY;
use common::shapes::Aabb;
use smallvec::SmallVec;

pub(crate) const NO_CHILD: u32 = 0;
pub(crate) const ROOT: u32 = 0;

/// Order of `Node::children`: NW, NE, SW, SE.
pub(crate) const CHILD_COUNT: usize = 4;

/// Lightweight handle stored by value inside nodes. Does not own the entity;
/// `index` points back into the caller's own storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialEntity {
    pub index: u32,
    pub bounds: Aabb,
}

pub(crate) struct Node {
    pub(crate) bounds: Aabb,
    pub(crate) children: [u32; CHILD_COUNT],
    pub(crate) entities: SmallVec<[SpatialEntity; NODE_CAPACITY]>,
    pub(crate) depth: u32,
}

impl Node {
    #[inline(always)]
    pub(crate) fn new_leaf(bounds: Aabb, depth: u32) -> Self {
        Self {
            bounds,
            children: [NO_CHILD; CHILD_COUNT],
            entities: SmallVec::new(),
            depth,
        }
    }

    #[inline(always)]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children[0] == NO_CHILD
    }
}

pub(crate) type NodeStack = SmallVec<[u32; 64]>;
