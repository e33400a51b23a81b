//! Entities, their physics bodies and scheduled movement

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::CategoryMask;
use crate::consts::TIME_EPSILON;

/// Scene-local entity identifier
pub type EntityId = u32;

/// What an entity is, independent of its physics masks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Monster,
    Projectile,
}

/// Collision footprint, centred on the entity position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect { size: Vec2 },
    Circle { radius: f32 },
}

impl Shape {
    /// Check whether two shapes overlap at the given centres
    pub fn overlaps(&self, pos: Vec2, other: &Shape, other_pos: Vec2) -> bool {
        match (*self, *other) {
            (Shape::Rect { size: a }, Shape::Rect { size: b }) => {
                let d = (pos - other_pos).abs();
                let reach = (a + b) * 0.5;
                d.x < reach.x && d.y < reach.y
            }
            (Shape::Circle { radius: a }, Shape::Circle { radius: b }) => {
                pos.distance_squared(other_pos) < (a + b) * (a + b)
            }
            (Shape::Rect { size }, Shape::Circle { radius }) => {
                circle_rect_overlap(other_pos, radius, pos, size)
            }
            (Shape::Circle { radius }, Shape::Rect { size }) => {
                circle_rect_overlap(pos, radius, other_pos, size)
            }
        }
    }
}

fn circle_rect_overlap(center: Vec2, radius: f32, rect_pos: Vec2, rect_size: Vec2) -> bool {
    let half = rect_size * 0.5;
    let closest = center.clamp(rect_pos - half, rect_pos + half);
    center.distance_squared(closest) < radius * radius
}

/// Physics masks attached to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicsBody {
    /// What this body is
    pub category: CategoryMask,
    /// Categories this body reports contacts against
    pub contact_test: CategoryMask,
    /// Categories the solver would physically separate from (always none here)
    pub collision: CategoryMask,
}

impl PhysicsBody {
    /// A body that reports contacts but never bounces
    pub fn sensor(category: CategoryMask, contact_test: CategoryMask) -> Self {
        Self {
            category,
            contact_test,
            collision: CategoryMask::NONE,
        }
    }

    /// True if a contact between these two bodies should be reported
    pub fn tests_against(&self, other: &PhysicsBody) -> bool {
        self.contact_test.intersects(other.category) || other.contact_test.intersects(self.category)
    }
}

/// Constant-velocity move to a target over a fixed duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub start: Vec2,
    pub target: Vec2,
    /// Seconds to reach the target
    pub duration: f32,
    /// Seconds elapsed so far
    pub elapsed: f32,
}

impl Motion {
    pub fn new(start: Vec2, target: Vec2, duration: f32) -> Self {
        Self {
            start,
            target,
            duration,
            elapsed: 0.0,
        }
    }

    /// Total displacement covered by the move
    #[inline]
    pub fn displacement(&self) -> Vec2 {
        self.target - self.start
    }

    /// Constant velocity in units per second
    pub fn velocity(&self) -> Vec2 {
        if self.duration <= 0.0 {
            return Vec2::ZERO;
        }
        self.displacement() / self.duration
    }

    /// Position at the current elapsed time
    pub fn position(&self) -> Vec2 {
        if self.duration <= 0.0 {
            return self.target;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.start.lerp(self.target, t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed + TIME_EPSILON >= self.duration
    }

    /// Advance by `dt`, returning the new position
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        self.elapsed = (self.elapsed + dt).min(self.duration.max(0.0));
        self.position()
    }
}

/// A sprite in the play field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub shape: Shape,
    pub body: PhysicsBody,
    /// Scheduled move; the entity is removed when it completes
    pub motion: Option<Motion>,
}

impl Entity {
    /// Velocity implied by the scheduled move (zero when stationary)
    pub fn velocity(&self) -> Vec2 {
        self.motion.map(|m| m.velocity()).unwrap_or(Vec2::ZERO)
    }

    pub fn overlaps(&self, other: &Entity) -> bool {
        self.shape.overlaps(self.pos, &other.shape, other.pos)
    }
}
