use super::types::{NodeStack, ROOT};
use super::QuadTree;
use common::shapes::Aabb;

impl QuadTree {
    /// Indices of entities whose cached bounds intersect `query_bounds`, at
    /// most `max_results` of them. An entity stored in several leaves is
    /// reported once per leaf.
    pub fn query(&self, query_bounds: Aabb, max_results: usize) -> Vec<u32> {
        let mut results = Vec::new();
        self.query_into(query_bounds, max_results, &mut results);
        results
    }

    /// Buffer-reusing form of [`QuadTree::query`]. Clears `results` first and
    /// returns how many indices were written; matches past `max_results` are
    /// dropped silently.
    pub fn query_into(&self, query_bounds: Aabb, max_results: usize, results: &mut Vec<u32>) -> usize {
        results.clear();
        if max_results == 0 {
            return 0;
        }
        self.walk_matches(query_bounds, |index| {
            results.push(index);
            results.len() < max_results
        });
        results.len()
    }

    /// Unbounded callback form. `f` runs once per matching node membership,
    /// so callers that need each entity once must dedupe.
    pub fn query_with<F>(&self, query_bounds: Aabb, mut f: F)
    where
        F: FnMut(u32),
    {
        self.walk_matches(query_bounds, |index| {
            f(index);
            true
        });
    }

    /// Depth-first NW, NE, SW, SE walk; stops as soon as `visit` returns false.
    fn walk_matches<F>(&self, query_bounds: Aabb, mut visit: F)
    where
        F: FnMut(u32) -> bool,
    {
        let mut stack = NodeStack::new();
        stack.push(ROOT);

        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx as usize];
            if !node.bounds.intersects(&query_bounds) {
                continue;
            }

            if node.is_leaf() {
                for entity in &node.entities {
                    if entity.bounds.intersects(&query_bounds) && !visit(entity.index) {
                        return;
                    }
                }
                continue;
            }

            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
    }
}
