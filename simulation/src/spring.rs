use crate::config::SpringParams;
use crate::entity::{EntityId, EntityStore};
use tracing::debug;

/// Distance and speed below which a spring counts as settled.
pub const SETTLE_EPSILON: f32 = 0.1;

/// Damped spring driving a scalar (an entity's radius) towards a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub current: f32,
    pub target: f32,
    pub velocity: f32,
    pub stiffness: f32,
    /// Fraction of velocity kept per second.
    pub damping: f32,
}

impl Spring {
    pub fn new(current: f32, target: f32, params: SpringParams) -> Self {
        Spring {
            current,
            target,
            velocity: 0.0,
            stiffness: params.stiffness,
            damping: params.damping.clamp(0.0, 1.0),
        }
    }

    /// Advances one step and reports whether the spring came to rest.
    /// A settled spring snaps exactly onto its target.
    pub fn step(&mut self, dt: f32) -> bool {
        let force = (self.target - self.current) * self.stiffness;
        self.velocity += force * dt;
        self.velocity *= self.damping.powf(dt);
        self.current += self.velocity * dt;

        if self.is_settled() {
            self.current = self.target;
            self.velocity = 0.0;
            true
        } else {
            false
        }
    }

    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < SETTLE_EPSILON && self.velocity.abs() < SETTLE_EPSILON
    }

    /// A spring heading to zero ends with the entity's removal.
    pub fn collapses(&self) -> bool {
        self.target <= 0.0
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SpringReport {
    pub settled: usize,
    pub removed: Vec<EntityId>,
}

/// Steps every attached spring and mirrors it into the entity radius.
/// Settled springs detach; settled collapsing springs remove their entity.
pub fn animate_springs(store: &mut EntityStore, dt: f32) -> SpringReport {
    let mut report = SpringReport::default();
    for (id, entity) in store.iter_mut() {
        let Some(spring) = entity.spring.as_mut() else {
            continue;
        };
        let settled = spring.step(dt);
        entity.radius = spring.current.max(0.0);
        if !settled {
            continue;
        }
        report.settled += 1;
        if spring.collapses() {
            report.removed.push(id);
        } else {
            entity.spring = None;
        }
    }
    for &id in &report.removed {
        store.remove(id);
        debug!(entity = id.index(), "collapsed entity removed");
    }
    report
}
