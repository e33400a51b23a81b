//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod category;
pub mod contact;
pub mod entity;
pub mod scene;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use category::{Category, CategoryMask};
pub use contact::{ContactBody, ContactKind, ContactTracker, classify_contact};
pub use entity::{Entity, EntityId, EntityKind, Motion, PhysicsBody, Shape};
pub use scene::{
    GameOverScene, PlayScene, RemovalReason, Scene, SceneEvent, SceneLayout, resolve,
};
pub use schedule::{Action, Scheduler, TimerId};
pub use spawn::{fire_projectile, spawn_monster};
pub use state::{GameState, SceneTransition};
pub use tick::{TickInput, autopilot_aim, tick, tick_playing};
