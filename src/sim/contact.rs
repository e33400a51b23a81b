//! Contact detection and classification
//!
//! The overlap pass reports a pair once, on the tick it starts touching.
//! Classification turns an unordered pair of bodies into a game rule.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryMask};
use super::entity::{Entity, EntityId};

/// One side of a reported contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBody {
    pub entity: EntityId,
    pub category: CategoryMask,
}

impl From<&Entity> for ContactBody {
    fn from(entity: &Entity) -> Self {
        Self {
            entity: entity.id,
            category: entity.body.category,
        }
    }
}

/// Game meaning of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    MonsterHitByProjectile {
        monster: EntityId,
        projectile: EntityId,
    },
    PlayerHitByMonster {
        player: EntityId,
        monster: EntityId,
    },
    Ignored,
}

/// Classify a contact regardless of the order the bodies were reported in.
///
/// The pair is sorted by ascending category mask, with the lower mask first
/// and equal masks ordered by entity id. Monster (0b1) therefore always leads
/// against both Projectile (0b10) and Player (0b100).
pub fn classify_contact(a: ContactBody, b: ContactBody) -> ContactKind {
    let (first, second) = if (a.category, a.entity) <= (b.category, b.entity) {
        (a, b)
    } else {
        (b, a)
    };

    if first.category.contains(Category::Monster) && second.category.contains(Category::Projectile) {
        return ContactKind::MonsterHitByProjectile {
            monster: first.entity,
            projectile: second.entity,
        };
    }
    if first.category.contains(Category::Monster) && second.category.contains(Category::Player) {
        return ContactKind::PlayerHitByMonster {
            player: second.entity,
            monster: first.entity,
        };
    }
    ContactKind::Ignored
}

/// Tracks which pairs were touching on the previous pass
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    touching: BTreeSet<(EntityId, EntityId)>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find pairs that began touching since the last pass.
    ///
    /// Only pairs where at least one body tests against the other are
    /// considered. Results are ordered by entity id for determinism.
    pub fn begin_contacts(&mut self, entities: &[Entity]) -> Vec<(ContactBody, ContactBody)> {
        let mut now = BTreeSet::new();
        let mut began = Vec::new();

        for (i, a) in entities.iter().enumerate() {
            for b in &entities[i + 1..] {
                if !a.body.tests_against(&b.body) || !a.overlaps(b) {
                    continue;
                }
                let key = (a.id.min(b.id), a.id.max(b.id));
                now.insert(key);
                if !self.touching.contains(&key) {
                    began.push((key, ContactBody::from(a), ContactBody::from(b)));
                }
            }
        }

        self.touching = now;
        began.sort_by_key(|(key, _, _)| *key);
        began.into_iter().map(|(_, a, b)| (a, b)).collect()
    }

    /// Forget any pair involving a removed entity
    pub fn forget(&mut self, id: EntityId) {
        self.touching.retain(|&(a, b)| a != id && b != id);
    }

    pub fn clear(&mut self) {
        self.touching.clear();
    }
}
