use crate::config::SimConfig;
use crate::entity::{Entity, EntityStore};
use crate::env::SoundSink;
use crate::lifecycle::{trigger_destruction, PairOutcome};
use collisions::{circles_overlap, reflect_in_bounds, resolve_elastic, InteractionMode};
use common::shapes::Aabb;
use quadtree::QuadTree;
use std::collections::BTreeSet;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, trace};

/// How candidate pairs are found before the circle test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BroadPhase {
    /// Leaf pairs from the quadtree.
    #[default]
    Quadtree,
    /// Every pair; reference for small scenes.
    AllPairs,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown broad phase '{0}'")]
pub struct UnknownBroadPhase(pub String);

impl FromStr for BroadPhase {
    type Err = UnknownBroadPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quadtree" => Ok(BroadPhase::Quadtree),
            "all-pairs" | "all_pairs" | "allpairs" => Ok(BroadPhase::AllPairs),
            _ => Err(UnknownBroadPhase(s.to_string())),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollisionReport {
    pub candidates: usize,
    pub contacts: usize,
    pub impulses: usize,
    pub destroyed: usize,
}

/// Rebuilds the tree over `world` grown to cover every live entity, so no
/// entity falls outside the root, and inserts each one by slot index.
pub fn rebuild_index(tree: &mut QuadTree, store: &EntityStore, world: Aabb) {
    let bounds = store
        .iter()
        .map(|(_, entity)| entity.bounds())
        .filter(Aabb::is_valid)
        .fold(world, |covered, bounds| covered.union(&bounds));
    if tree.world_bounds() == bounds {
        tree.clear();
    } else {
        tree.reset(bounds);
    }
    for (id, entity) in store.iter() {
        tree.insert(id.index(), entity.bounds());
    }
}

/// Fills `pairs` with ascending `(i, j)` index pairs, `i < j`, each once.
pub fn collect_pairs(
    broad_phase: BroadPhase,
    tree: &mut QuadTree,
    store: &EntityStore,
    pairs: &mut Vec<(u32, u32)>,
) {
    match broad_phase {
        BroadPhase::Quadtree => tree.candidate_pairs(pairs),
        BroadPhase::AllPairs => {
            pairs.clear();
            let live: Vec<u32> = store.iter().map(|(id, _)| id.index()).collect();
            for (n, &a) in live.iter().enumerate() {
                for &b in &live[n + 1..] {
                    pairs.push((a, b));
                }
            }
        }
    }
}

/// Narrow phase and response for one pair. Returns `None` when the circles
/// miss.
pub fn resolve_pair(
    a: &mut Entity,
    b: &mut Entity,
    mode: InteractionMode,
    config: &SimConfig,
) -> Option<CollisionReport> {
    let mut body_a = a.body();
    let mut body_b = b.body();
    if !circles_overlap(&body_a, &body_b) {
        return None;
    }
    let mut report = CollisionReport {
        contacts: 1,
        ..Default::default()
    };

    match PairOutcome::classify(a.tags, b.tags) {
        PairOutcome::Elastic => {
            let resolution = resolve_elastic(&mut body_a, &mut body_b, mode, config.restitution)?;
            if resolution.impulse.is_some() {
                report.impulses = 1;
            }
            a.apply_body(&body_a);
            b.apply_body(&body_b);
        }
        PairOutcome::DestroyBoth => {
            report.destroyed += trigger_destruction(a, config) as usize;
            report.destroyed += trigger_destruction(b, config) as usize;
        }
        PairOutcome::DestroyFirst => {
            report.destroyed += trigger_destruction(a, config) as usize;
        }
        PairOutcome::DestroySecond => {
            report.destroyed += trigger_destruction(b, config) as usize;
        }
    }
    Some(report)
}

/// Resolves slots `i` and `j` and reports how far each one moved.
fn resolve_indices(
    store: &mut EntityStore,
    i: u32,
    j: u32,
    mode: InteractionMode,
    config: &SimConfig,
) -> Option<(CollisionReport, [f32; 2])> {
    let (a_id, b_id) = (store.id_at(i)?, store.id_at(j)?);
    let (a, b) = store.pair_mut(a_id, b_id)?;
    let (before_a, before_b) = (a.position, b.position);
    let pair = resolve_pair(a, b, mode, config)?;
    let moved = [(a.position - before_a).norm(), (b.position - before_b).norm()];
    if pair.destroyed > 0 {
        debug!(a = i, b = j, destroyed = pair.destroyed, "lethal contact");
    }
    Some((pair, moved))
}

fn accumulate(report: &mut CollisionReport, pair: &CollisionReport) {
    report.contacts += pair.contacts;
    report.impulses += pair.impulses;
    report.destroyed += pair.destroyed;
}

/// Resolves `pairs` in the given order.
fn resolve_listed(
    store: &mut EntityStore,
    pairs: &[(u32, u32)],
    mode: InteractionMode,
    config: &SimConfig,
) -> CollisionReport {
    let mut report = CollisionReport {
        candidates: pairs.len(),
        ..Default::default()
    };
    for &(i, j) in pairs {
        if let Some((pair, _)) = resolve_indices(store, i, j, mode, config) {
            accumulate(&mut report, &pair);
        }
    }
    report
}

// Covers rounding between cached tree bounds and bounds rebuilt from a
// moved position.
const REQUERY_SLACK: f32 = 1e-3;

/// Resolves the tree's candidate pairs in ascending order. A body pushed by
/// a correction is queried again, with every body's accumulated movement
/// as margin against the stale cached bounds, and each new neighbour whose
/// pair sorts after the current one is queued. The outcome matches the
/// exhaustive scan.
fn resolve_from_tree(
    store: &mut EntityStore,
    tree: &mut QuadTree,
    pairs: &mut Vec<(u32, u32)>,
    mode: InteractionMode,
    config: &SimConfig,
) -> CollisionReport {
    tree.candidate_pairs(pairs);
    let mut pending: BTreeSet<(u32, u32)> = pairs.iter().copied().collect();
    let mut drift = vec![0.0f32; store.slot_count()];
    let mut max_drift = 0.0f32;
    let mut neighbours = Vec::new();
    let mut report = CollisionReport::default();

    while let Some((i, j)) = pending.pop_first() {
        report.candidates += 1;
        let Some((pair, moved)) = resolve_indices(store, i, j, mode, config) else {
            continue;
        };
        accumulate(&mut report, &pair);

        for (index, distance) in [(i, moved[0]), (j, moved[1])] {
            if distance <= 0.0 {
                continue;
            }
            let Some(slot) = drift.get_mut(index as usize) else {
                continue;
            };
            *slot += distance;
            max_drift = max_drift.max(*slot);

            let Some(bounds) = store.id_at(index).and_then(|id| store.get(id)).map(|e| e.bounds()) else {
                continue;
            };
            neighbours.clear();
            tree.query_with(bounds.expand(max_drift + REQUERY_SLACK), |other| neighbours.push(other));
            neighbours.sort_unstable();
            neighbours.dedup();
            for &other in &neighbours {
                let queued = (index.min(other), index.max(other));
                if other != index && queued > (i, j) {
                    pending.insert(queued);
                }
            }
        }
    }
    report
}

/// Rebuilds the index, gathers candidates and resolves them in ascending
/// pair order against current positions. The quadtree path falls back to
/// the exhaustive scan when the tree had to drop entities.
pub fn resolve_collisions(
    store: &mut EntityStore,
    tree: &mut QuadTree,
    pairs: &mut Vec<(u32, u32)>,
    world: Aabb,
    mode: InteractionMode,
    config: &SimConfig,
) -> CollisionReport {
    rebuild_index(tree, store, world);

    let report = match config.broad_phase {
        BroadPhase::Quadtree if tree.dropped_entities() == 0 => {
            resolve_from_tree(store, tree, pairs, mode, config)
        }
        broad_phase => {
            if broad_phase == BroadPhase::Quadtree {
                debug!(dropped = tree.dropped_entities(), "quadtree dropped entities, scanning all pairs");
            }
            collect_pairs(BroadPhase::AllPairs, tree, store, pairs);
            resolve_listed(store, pairs, mode, config)
        }
    };
    trace!(
        candidates = report.candidates,
        contacts = report.contacts,
        impulses = report.impulses,
        "collisions resolved"
    );
    report
}

/// Reflects every entity off the arena edges and cues a bounce sound per
/// reflected axis. Returns the number of entities that bounced.
pub fn bounce_off_walls(store: &mut EntityStore, world: &Aabb, sound: &dyn SoundSink) -> usize {
    let mut bounced = 0;
    for (_, entity) in store.iter_mut() {
        let mut body = entity.body();
        let hit = reflect_in_bounds(&mut body, world);
        if !hit.any() {
            continue;
        }
        entity.apply_body(&body);
        bounced += 1;
        for speed in [hit.x, hit.y].into_iter().flatten() {
            sound.play_bounce(speed);
        }
    }
    bounced
}
