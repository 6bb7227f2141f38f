use super::types::{NodeStack, ROOT};
use super::QuadTree;

impl QuadTree {
    /// Broad phase: every pair of distinct entities sharing a leaf whose
    /// cached bounds intersect, as `(low, high)` in ascending order. Pairs
    /// seen in several leaves are reported once.
    pub fn candidate_pairs(&mut self, pairs: &mut Vec<(u32, u32)>) {
        pairs.clear();
        let pair_dedupe = &mut self.pair_dedupe;
        pair_dedupe.clear();

        let mut stack = NodeStack::new();
        stack.push(ROOT);

        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx as usize];
            if !node.is_leaf() {
                stack.extend(node.children.iter().copied());
                continue;
            }

            let members = node.entities.as_slice();
            for (i, a) in members.iter().enumerate() {
                for b in &members[i + 1..] {
                    if a.index == b.index || !a.bounds.intersects(&b.bounds) {
                        continue;
                    }
                    let (min, max) = if a.index < b.index {
                        (a.index, b.index)
                    } else {
                        (b.index, a.index)
                    };
                    let key = (u64::from(min) << 32) | u64::from(max);
                    if pair_dedupe.insert(key) {
                        pairs.push((min, max));
                    }
                }
            }
        }

        pairs.sort_unstable();
    }
}
