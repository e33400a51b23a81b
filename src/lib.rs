//! Monster Shooter - a side-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (categories, spawning, contacts, scenes)
//! - `engine`: Host adapter (presentation surface, transitions)
//! - `settings`: Data-driven configuration

pub mod engine;
pub mod settings;
pub mod sim;

pub use engine::{Game, LogView, Transition, TransitionKind, View};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Seconds between monster spawns
    pub const SPAWN_INTERVAL: f32 = 1.0;
    /// Monster traversal time bounds (seconds, uniform)
    pub const MONSTER_MIN_DURATION: f32 = 2.0;
    pub const MONSTER_MAX_DURATION: f32 = 4.0;

    /// Distance a projectile travels along its aim direction
    pub const PROJECTILE_RANGE: f32 = 1000.0;
    /// Time a projectile takes to cover `PROJECTILE_RANGE`
    pub const PROJECTILE_DURATION: f32 = 2.0;

    /// Win once more than this many monsters are destroyed
    pub const WIN_THRESHOLD: u32 = 30;
    /// Lose once the player is hit more than this many times
    pub const LOSS_THRESHOLD: u32 = 3;

    /// Game over screen hold time before restarting
    pub const RESTART_DELAY: f32 = 3.0;
    /// Flip transition length
    pub const TRANSITION_DURATION: f32 = 0.5;

    /// Minimum seconds between autopilot shots
    pub const AUTOPILOT_FIRE_INTERVAL: f32 = 0.3;

    /// Player sits at this fraction of the field width, vertically centred
    pub const PLAYER_X_FRACTION: f32 = 0.1;

    /// Slack for float accumulation when comparing elapsed time to a deadline
    pub const TIME_EPSILON: f32 = 1e-4;

    /// Undrained scene events a `Game` keeps; older ones are dropped first
    pub const MAX_PENDING_EVENTS: usize = 1024;
}
