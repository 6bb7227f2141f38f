/// Axis-aligned bounding box stored as min/max corners.
///
/// All tests are closed-interval: boxes that only share an edge or a corner
/// intersect, and a point on the border is contained.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl Aabb {
    pub fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Box of a circle, `position ± radius` on both axes.
    pub fn from_circle(x: f32, y: f32, radius: f32) -> Self {
        Self {
            x_min: x - radius,
            y_min: y - radius,
            x_max: x + radius,
            y_max: y + radius,
        }
    }

    /// Box of the given size with its top-left corner at the origin.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.x_min + self.x_max) * 0.5,
            (self.y_min + self.y_max) * 0.5,
        )
    }

    /// Finite coordinates with `min <= max` on both axes.
    pub fn is_valid(&self) -> bool {
        self.x_min.is_finite()
            && self.y_min.is_finite()
            && self.x_max.is_finite()
            && self.y_max.is_finite()
            && self.x_min <= self.x_max
            && self.y_min <= self.y_max
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.x_max < other.x_min
            || self.x_min > other.x_max
            || self.y_max < other.y_min
            || self.y_min > other.y_max)
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    // Check that `inner` lies fully inside this box
    pub fn contains(&self, inner: &Aabb) -> bool {
        self.x_min <= inner.x_min
            && self.x_max >= inner.x_max
            && self.y_min <= inner.y_min
            && self.y_max >= inner.y_max
    }

    /// Splits at the midpoint of both axes, returned as `[NW, NE, SW, SE]`
    /// with y growing downwards (screen space).
    pub fn quadrants(&self) -> [Aabb; 4] {
        let (x_mid, y_mid) = self.center();
        [
            Aabb::new(self.x_min, self.y_min, x_mid, y_mid),
            Aabb::new(x_mid, self.y_min, self.x_max, y_mid),
            Aabb::new(self.x_min, y_mid, x_mid, self.y_max),
            Aabb::new(x_mid, y_mid, self.x_max, self.y_max),
        ]
    }

    /// Shrinks every side by `margin`. A margin larger than half the extent
    /// collapses that axis onto its midpoint instead of inverting it.
    pub fn inset(&self, margin: f32) -> Aabb {
        let (cx, cy) = self.center();
        let (x_min, x_max) = if self.x_min + margin <= self.x_max - margin {
            (self.x_min + margin, self.x_max - margin)
        } else {
            (cx, cx)
        };
        let (y_min, y_max) = if self.y_min + margin <= self.y_max - margin {
            (self.y_min + margin, self.y_max - margin)
        } else {
            (cy, cy)
        };
        Aabb::new(x_min, y_min, x_max, y_max)
    }

    /// Grows every side by `margin`.
    pub fn expand(&self, margin: f32) -> Aabb {
        Aabb::new(
            self.x_min - margin,
            self.y_min - margin,
            self.x_max + margin,
            self.y_max + margin,
        )
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(
            self.x_min.min(other.x_min),
            self.y_min.min(other.y_min),
            self.x_max.max(other.x_max),
            self.y_max.max(other.y_max),
        )
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}
