//! Monster spawning and projectile firing
//!
//! Both produce entities with a scheduled move; the owning scene removes
//! them once the move completes.

use glam::Vec2;
use rand::Rng;

use super::category::CategoryMask;
use super::entity::{Entity, EntityId, EntityKind, Motion, PhysicsBody, Shape};
use crate::consts::*;

/// Create a monster just beyond the right edge, heading for the left edge.
///
/// The vertical position keeps the whole sprite inside the field. Traversal
/// time is drawn from `[MONSTER_MIN_DURATION, MONSTER_MAX_DURATION]`.
pub fn spawn_monster(id: EntityId, field: Vec2, size: Vec2, rng: &mut impl Rng) -> Entity {
    let half = size * 0.5;
    let min_y = half.y;
    let max_y = field.y - half.y;
    // Field shorter than the sprite: no valid band, use the centre line
    let y = if max_y > min_y {
        rng.random_range(min_y..=max_y)
    } else {
        field.y * 0.5
    };
    let duration = rng.random_range(MONSTER_MIN_DURATION..=MONSTER_MAX_DURATION);

    let start = Vec2::new(field.x + half.x, y);
    let target = Vec2::new(-half.x, y);

    Entity {
        id,
        kind: EntityKind::Monster,
        pos: start,
        shape: Shape::Rect { size },
        body: PhysicsBody::sensor(CategoryMask::MONSTER, CategoryMask::PROJECTILE),
        motion: Some(Motion::new(start, target, duration)),
    }
}

/// Fire a projectile from `from` toward the touch point `towards`.
///
/// Returns `None` when the shot points backward (negative horizontal offset)
/// or when there is no direction at all. Accepted shots travel
/// `PROJECTILE_RANGE` units along the aim over `PROJECTILE_DURATION`.
pub fn fire_projectile(id: EntityId, from: Vec2, towards: Vec2, radius: f32) -> Option<Entity> {
    let offset = towards - from;
    if offset.x < 0.0 {
        return None;
    }
    let direction = offset.try_normalize()?;
    let target = from + direction * PROJECTILE_RANGE;

    Some(Entity {
        id,
        kind: EntityKind::Projectile,
        pos: from,
        shape: Shape::Circle { radius },
        body: PhysicsBody::sensor(CategoryMask::PROJECTILE, CategoryMask::MONSTER),
        motion: Some(Motion::new(from, target, PROJECTILE_DURATION)),
    })
}
