//! Play and game-over scenes
//!
//! A `PlayScene` owns every entity, the hit counters and its spawn timer.
//! A `GameOverScene` only knows the outcome and when to restart.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::category::CategoryMask;
use super::contact::{ContactKind, ContactTracker, classify_contact};
use super::entity::{Entity, EntityId, EntityKind, PhysicsBody, Shape};
use super::schedule::{Action, Scheduler};
use super::spawn::{fire_projectile, spawn_monster};
use super::state::{GameState, SceneTransition};
use crate::consts::*;

/// Field and sprite dimensions, fixed for a scene's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    pub field: Vec2,
    pub player_size: Vec2,
    pub monster_size: Vec2,
    pub projectile_radius: f32,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            field: Vec2::new(1024.0, 768.0),
            player_size: Vec2::new(54.0, 60.0),
            monster_size: Vec2::new(48.0, 40.0),
            projectile_radius: 8.0,
        }
    }
}

/// Why an entity left the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Finished its scheduled move (off-screen)
    Arrived,
    /// Destroyed by a contact
    Hit,
}

/// Things that happened in a scene since events were last drained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    MonsterSpawned { id: EntityId, y: f32, duration: f32 },
    ProjectileFired { id: EntityId, target: Vec2 },
    ShotRejected { towards: Vec2 },
    Removed { id: EntityId, kind: EntityKind, reason: RemovalReason },
    Contact(ContactKind),
}

/// The active play-through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayScene {
    pub layout: SceneLayout,
    pub state: GameState,
    /// Seconds since the scene started
    pub time: f32,
    /// All live entities, sorted by id
    pub entities: Vec<Entity>,
    player: EntityId,
    scheduler: Scheduler,
    #[serde(skip)]
    contacts: ContactTracker,
    #[serde(skip)]
    events: Vec<SceneEvent>,
    /// Seconds until the autopilot may fire again
    pub(crate) autopilot_cooldown: f32,
    next_id: EntityId,
}

impl PlayScene {
    /// Start a fresh play-through: player placed, counters zero, spawn timer armed
    pub fn new(layout: SceneLayout) -> Self {
        let mut scene = Self {
            layout,
            state: GameState::new(),
            time: 0.0,
            entities: Vec::new(),
            player: 0,
            scheduler: Scheduler::new(),
            contacts: ContactTracker::new(),
            events: Vec::new(),
            autopilot_cooldown: 0.0,
            next_id: 1,
        };

        let id = scene.next_entity_id();
        scene.entities.push(Entity {
            id,
            kind: EntityKind::Player,
            pos: Vec2::new(
                layout.field.x * PLAYER_X_FRACTION,
                layout.field.y * 0.5,
            ),
            shape: Shape::Rect {
                size: layout.player_size,
            },
            body: PhysicsBody::sensor(CategoryMask::PLAYER, CategoryMask::MONSTER),
            motion: None,
        });
        scene.player = id;

        scene
            .scheduler
            .schedule_recurring(SPAWN_INTERVAL, Action::SpawnMonster);
        scene
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn player_id(&self) -> EntityId {
        self.player
    }

    /// The player entity (always present)
    pub fn player(&self) -> Option<&Entity> {
        self.entity(self.player)
    }

    pub fn player_pos(&self) -> Vec2 {
        self.player().map(|p| p.pos).unwrap_or(Vec2::ZERO)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|i| &self.entities[i])
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entity(id).is_some()
    }

    /// Iterate live entities of one kind
    pub fn entities_of(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.kind == kind)
    }

    pub fn monster_count(&self) -> usize {
        self.entities_of(EntityKind::Monster).count()
    }

    /// Drain events recorded since the last call
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    /// Peek at undrained events
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    pub(crate) fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    /// Spawn one monster off the right edge
    pub fn spawn_monster(&mut self, rng: &mut impl Rng) -> EntityId {
        let id = self.next_entity_id();
        let monster = spawn_monster(id, self.layout.field, self.layout.monster_size, rng);
        let duration = monster.motion.map(|m| m.duration).unwrap_or_default();
        log::debug!("Spawned monster {} at y={:.1} ({:.2}s)", id, monster.pos.y, duration);
        self.events.push(SceneEvent::MonsterSpawned {
            id,
            y: monster.pos.y,
            duration,
        });
        // Ids only grow, so pushing keeps the list sorted
        self.entities.push(monster);
        id
    }

    /// Fire from the player toward a touch point. Backward shots are dropped.
    pub fn fire_projectile(&mut self, towards: Vec2) -> Option<EntityId> {
        let from = self.player_pos();
        // Only consume an id for accepted shots
        let id = self.next_id;
        let Some(projectile) = fire_projectile(id, from, towards, self.layout.projectile_radius)
        else {
            log::debug!("Rejected shot toward ({:.1}, {:.1})", towards.x, towards.y);
            self.events.push(SceneEvent::ShotRejected { towards });
            return None;
        };
        self.next_id += 1;

        let target = projectile.motion.map(|m| m.target).unwrap_or(from);
        self.events.push(SceneEvent::ProjectileFired { id, target });
        self.entities.push(projectile);
        Some(id)
    }

    /// Remove an entity; its scheduled move goes with it
    pub fn remove_entity(&mut self, id: EntityId, reason: RemovalReason) -> Option<Entity> {
        let index = self.entities.binary_search_by_key(&id, |e| e.id).ok()?;
        let entity = self.entities.remove(index);
        self.contacts.forget(id);
        self.events.push(SceneEvent::Removed {
            id,
            kind: entity.kind,
            reason,
        });
        Some(entity)
    }

    /// Move every entity along its scheduled path and remove arrivals
    pub fn advance_entities(&mut self, dt: f32) {
        let mut arrived = Vec::new();
        for entity in &mut self.entities {
            if let Some(motion) = entity.motion.as_mut() {
                entity.pos = motion.advance(dt);
                if motion.is_finished() {
                    arrived.push(entity.id);
                }
            }
        }
        for id in arrived {
            self.remove_entity(id, RemovalReason::Arrived);
        }
    }

    /// Report contacts that began since the last pass, classified.
    ///
    /// Pairs are not resolved here; `tick` resolves them one at a time.
    pub fn begin_contacts(&mut self) -> Vec<ContactKind> {
        self.contacts
            .begin_contacts(&self.entities)
            .into_iter()
            .map(|(a, b)| classify_contact(a, b))
            .collect()
    }
}

/// Apply a classified contact to the scene.
///
/// Removes the entities the rule consumes and updates the counters. A contact
/// naming an entity that is already gone is dropped without counting, so a
/// pair removed earlier in the same tick never scores twice.
pub fn resolve(scene: &mut PlayScene, kind: ContactKind) -> Option<SceneTransition> {
    match kind {
        ContactKind::MonsterHitByProjectile {
            monster,
            projectile,
        } => {
            if !scene.contains(monster) || !scene.contains(projectile) {
                return None;
            }
            log::debug!("Monster {} hit by projectile {}", monster, projectile);
            scene.remove_entity(projectile, RemovalReason::Hit);
            scene.remove_entity(monster, RemovalReason::Hit);
        }
        ContactKind::PlayerHitByMonster { player, monster } => {
            if !scene.contains(player) || !scene.contains(monster) {
                return None;
            }
            log::debug!("Player hit by monster {}", monster);
            scene.remove_entity(monster, RemovalReason::Hit);
        }
        ContactKind::Ignored => return None,
    }

    scene.events.push(SceneEvent::Contact(kind));
    scene.state.record(kind)
}

/// The screen shown after a play-through ends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOverScene {
    pub won: bool,
    scheduler: Scheduler,
}

impl GameOverScene {
    pub fn new(won: bool) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(RESTART_DELAY, Action::Restart);
        Self { won, scheduler }
    }

    pub fn message(&self) -> &'static str {
        if self.won { "You won!" } else { "You lose" }
    }

    /// Count down to the automatic restart
    pub fn advance(&mut self, dt: f32) -> Option<SceneTransition> {
        self.scheduler
            .advance(dt)
            .into_iter()
            .any(|a| a == Action::Restart)
            .then_some(SceneTransition::Restart)
    }
}

/// The scene currently presented
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Scene {
    Playing(PlayScene),
    GameOver(GameOverScene),
}

impl Scene {
    pub fn is_playing(&self) -> bool {
        matches!(self, Scene::Playing(_))
    }

    pub fn as_playing(&self) -> Option<&PlayScene> {
        match self {
            Scene::Playing(scene) => Some(scene),
            Scene::GameOver(_) => None,
        }
    }

    pub fn as_playing_mut(&mut self) -> Option<&mut PlayScene> {
        match self {
            Scene::Playing(scene) => Some(scene),
            Scene::GameOver(_) => None,
        }
    }

    /// Short description for logs
    pub fn label(&self) -> String {
        match self {
            Scene::Playing(_) => "Playing".to_string(),
            Scene::GameOver(over) => format!("GameOver ({})", over.message()),
        }
    }
}
