//! Game counters and terminal thresholds
//!
//! Counters belong to one play scene and live as long as it does. A fresh
//! scene starts from zero.

use serde::{Deserialize, Serialize};

use super::contact::ContactKind;
use crate::consts::{LOSS_THRESHOLD, WIN_THRESHOLD};

/// Request to leave the current scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneTransition {
    /// Playing → GameOver
    GameOver { won: bool },
    /// GameOver → a fresh Playing scene
    Restart,
}

/// Per-scene hit counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub monsters_destroyed: u32,
    pub times_player_hit: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a classified contact and report a terminal transition if a
    /// threshold has been crossed.
    pub fn record(&mut self, kind: ContactKind) -> Option<SceneTransition> {
        match kind {
            ContactKind::MonsterHitByProjectile { .. } => {
                self.monsters_destroyed += 1;
                self.has_won().then_some(SceneTransition::GameOver { won: true })
            }
            ContactKind::PlayerHitByMonster { .. } => {
                self.times_player_hit += 1;
                self.has_lost().then_some(SceneTransition::GameOver { won: false })
            }
            ContactKind::Ignored => None,
        }
    }

    pub fn has_won(&self) -> bool {
        self.monsters_destroyed > WIN_THRESHOLD
    }

    pub fn has_lost(&self) -> bool {
        self.times_player_hit > LOSS_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIT: ContactKind = ContactKind::MonsterHitByProjectile {
        monster: 1,
        projectile: 2,
    };
    const OUCH: ContactKind = ContactKind::PlayerHitByMonster {
        player: 1,
        monster: 2,
    };

    #[test]
    fn test_counters_persist_across_calls() {
        let mut state = GameState::new();
        state.record(HIT);
        state.record(HIT);
        state.record(OUCH);
        assert_eq!(state.monsters_destroyed, 2);
        assert_eq!(state.times_player_hit, 1);
    }

    #[test]
    fn test_win_after_threshold() {
        let mut state = GameState::new();
        for _ in 0..WIN_THRESHOLD {
            assert_eq!(state.record(HIT), None);
        }
        assert_eq!(state.record(HIT), Some(SceneTransition::GameOver { won: true }));
    }

    #[test]
    fn test_loss_after_threshold() {
        let mut state = GameState::new();
        for _ in 0..LOSS_THRESHOLD {
            assert_eq!(state.record(OUCH), None);
        }
        assert_eq!(state.record(OUCH), Some(SceneTransition::GameOver { won: false }));
    }

    #[test]
    fn test_ignored_changes_nothing() {
        let mut state = GameState::new();
        assert_eq!(state.record(ContactKind::Ignored), None);
        assert_eq!(state, GameState::default());
    }
}
