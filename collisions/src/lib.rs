//! Circle-circle narrow phase and the equal-mass response used by the
//! simulation step: positional correction, restitution impulse and
//! reflection off the world boundary.

use common::shapes::Aabb;
use nalgebra::{Isometry2, Vector2};
use parry2d::query;
use parry2d::shape::Ball;

/// Velocity kept along the contact normal after an impulse.
pub const DEFAULT_RESTITUTION: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub radius: f32,
}

impl Body {
    pub fn new(position: Vector2<f32>, velocity: Vector2<f32>, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_circle(self.position.x, self.position.y, self.radius.max(0.0))
    }
}

/// Global switch that decides when an impulse fires. It flips the trigger
/// condition, not the direction of the impulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Resolve bodies closing in on each other.
    #[default]
    Repel,
    /// Resolve bodies drifting apart, which pulls them back together.
    Attract,
}

impl InteractionMode {
    pub fn toggled(self) -> Self {
        match self {
            InteractionMode::Repel => InteractionMode::Attract,
            InteractionMode::Attract => InteractionMode::Repel,
        }
    }

    /// `closing` is the relative velocity along the normal pointing from the
    /// first body to the second; negative means approaching.
    pub fn should_resolve(self, closing: f32) -> bool {
        match self {
            InteractionMode::Repel => closing < 0.0,
            InteractionMode::Attract => closing > 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InteractionMode::Repel => "REPEL",
            InteractionMode::Attract => "ATTRACT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from `a` towards `b`, or zero when the centres coincide.
    pub normal: Vector2<f32>,
    pub distance: f32,
    pub overlap: f32,
}

/// Closed test: circles whose outlines just touch overlap.
pub fn circles_overlap(a: &Body, b: &Body) -> bool {
    let ball_a = Ball::new(a.radius.max(0.0));
    let ball_b = Ball::new(b.radius.max(0.0));
    let pos_a = Isometry2::translation(a.position.x, a.position.y);
    let pos_b = Isometry2::translation(b.position.x, b.position.y);
    query::intersection_test(&pos_a, &ball_a, &pos_b, &ball_b).unwrap_or(false)
}

pub fn contact(a: &Body, b: &Body) -> Option<Contact> {
    if !circles_overlap(a, b) {
        return None;
    }
    let delta = b.position - a.position;
    let distance = delta.norm();
    let normal = if distance > 0.0 {
        delta / distance
    } else {
        Vector2::zeros()
    };
    Some(Contact {
        normal,
        distance,
        overlap: (a.radius + b.radius - distance).max(0.0),
    })
}

/// Pushes both bodies apart by half the overlap each.
pub fn separate(a: &mut Body, b: &mut Body, contact: &Contact) {
    let correction = contact.normal * (contact.overlap * 0.5);
    a.position -= correction;
    b.position += correction;
}

/// Equal-mass impulse along the contact normal. Returns the impulse
/// magnitude when one was applied.
pub fn apply_impulse(
    a: &mut Body,
    b: &mut Body,
    contact: &Contact,
    mode: InteractionMode,
    restitution: f32,
) -> Option<f32> {
    let closing = (b.velocity - a.velocity).dot(&contact.normal);
    if !mode.should_resolve(closing) {
        return None;
    }
    // inverse masses of 1 + 1
    let impulse = -(1.0 + restitution) * closing / 2.0;
    let change = contact.normal * impulse;
    a.velocity -= change;
    b.velocity += change;
    Some(impulse.abs())
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Resolution {
    pub overlap: f32,
    pub impulse: Option<f32>,
}

/// Narrow phase plus elastic response for one pair. `None` when the circles
/// do not overlap.
pub fn resolve_elastic(
    a: &mut Body,
    b: &mut Body,
    mode: InteractionMode,
    restitution: f32,
) -> Option<Resolution> {
    let contact = contact(a, b)?;
    separate(a, b, &contact);
    let impulse = apply_impulse(a, b, &contact, mode, restitution);
    Some(Resolution {
        overlap: contact.overlap,
        impulse,
    })
}

/// Speeds of the velocity components reflected by [`reflect_in_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundaryHit {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

impl BoundaryHit {
    pub fn any(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }
}

/// Keeps the circle inside `bounds`. Crossing a side negates that velocity
/// component and clamps the centre to exactly one radius from the side.
pub fn reflect_in_bounds(body: &mut Body, bounds: &Aabb) -> BoundaryHit {
    let radius = body.radius.max(0.0);
    let x = reflect_axis(
        &mut body.position.x,
        &mut body.velocity.x,
        bounds.x_min + radius,
        bounds.x_max - radius,
    );
    let y = reflect_axis(
        &mut body.position.y,
        &mut body.velocity.y,
        bounds.y_min + radius,
        bounds.y_max - radius,
    );
    BoundaryHit { x, y }
}

fn reflect_axis(position: &mut f32, velocity: &mut f32, low: f32, high: f32) -> Option<f32> {
    if *position >= low && *position <= high {
        return None;
    }
    // world narrower than the circle: pin to the middle
    let (low, high) = if low <= high {
        (low, high)
    } else {
        let mid = (low + high) * 0.5;
        (mid, mid)
    };
    *velocity = -*velocity;
    *position = position.clamp(low, high);
    Some(velocity.abs())
}
