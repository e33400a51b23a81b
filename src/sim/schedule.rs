//! Scene-owned scheduled actions
//!
//! A scheduler lives inside a scene. Dropping the scene drops every pending
//! action with it, so nothing fires for a scene that is no longer presented.

use serde::{Deserialize, Serialize};

use crate::consts::TIME_EPSILON;

/// Actions a scene can schedule on itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    SpawnMonster,
    Restart,
}

pub type TimerId = u32;

/// Most firings one recurring timer reports from a single `advance`
pub const MAX_CATCH_UP: u32 = 64;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer {
    id: TimerId,
    action: Action,
    /// Seconds until the next firing
    remaining: f32,
    /// Re-arm interval for recurring timers
    interval: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_id: TimerId,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` now and then every `interval` seconds, forever.
    ///
    /// The first firing happens on the next `advance`.
    pub fn schedule_recurring(&mut self, interval: f32, action: Action) -> TimerId {
        self.push(action, 0.0, Some(interval.max(TIME_EPSILON)))
    }

    /// Run `action` once after `delay` seconds
    pub fn schedule_once(&mut self, delay: f32, action: Action) -> TimerId {
        self.push(action, delay, None)
    }

    fn push(&mut self, action: Action, remaining: f32, interval: Option<f32>) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            action,
            remaining,
            interval,
        });
        id
    }

    pub fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Advance time and collect every action that came due, in firing order.
    ///
    /// A recurring timer fires as many times as its interval fits in `dt`,
    /// at most `MAX_CATCH_UP` times. Firings past the cap are skipped and the
    /// timer stays on its original phase.
    pub fn advance(&mut self, dt: f32) -> Vec<Action> {
        let mut due: Vec<(f32, TimerId, Action)> = Vec::new();

        for timer in &mut self.timers {
            timer.remaining -= dt;
            if timer.remaining > TIME_EPSILON {
                continue;
            }
            // Time at which each firing happened, relative to the end of the step
            let Some(interval) = timer.interval else {
                due.push((timer.remaining, timer.id, timer.action));
                timer.remaining = f32::INFINITY;
                continue;
            };

            let first = f64::from(timer.remaining);
            let step = f64::from(interval);
            let firings = ((f64::from(TIME_EPSILON) - first) / step).floor() + 1.0;
            for k in 0..firings.min(f64::from(MAX_CATCH_UP)) as u32 {
                let at = first + f64::from(k) * step;
                due.push((at as f32, timer.id, timer.action));
            }
            timer.remaining = (first + firings * step) as f32;
            if timer.remaining <= TIME_EPSILON {
                timer.remaining = interval;
            }
        }

        self.timers.retain(|t| t.remaining.is_finite());
        // Earliest firing first (most negative remaining), then by timer id
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, _, action)| action).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recurring_fires_immediately_then_each_interval() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_recurring(1.0, Action::SpawnMonster);

        assert_eq!(scheduler.advance(0.0), vec![Action::SpawnMonster]);
        assert!(scheduler.advance(0.5).is_empty());
        assert_eq!(scheduler.advance(0.5), vec![Action::SpawnMonster]);
        assert_eq!(scheduler.advance(2.0).len(), 2);
        assert!(!scheduler.is_empty());
    }

    #[test]
    fn test_once_fires_after_delay_and_is_dropped() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(3.0, Action::Restart);

        assert!(scheduler.advance(2.9).is_empty());
        assert_eq!(scheduler.advance(0.1), vec![Action::Restart]);
        assert!(scheduler.is_empty());
        assert!(scheduler.advance(10.0).is_empty());
    }

    #[test]
    fn test_small_steps_accumulate() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(1.0, Action::Restart);

        let fired: usize = (0..60).map(|_| scheduler.advance(1.0 / 60.0).len()).sum();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_huge_step_is_capped() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_recurring(1.0, Action::SpawnMonster);

        let fired = scheduler.advance(1.0e8);
        assert_eq!(fired.len(), MAX_CATCH_UP as usize);

        // Back on a one-second cadence afterwards
        assert!(scheduler.advance(0.5).is_empty());
        assert_eq!(scheduler.advance(0.5), vec![Action::SpawnMonster]);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let spawn = scheduler.schedule_recurring(1.0, Action::SpawnMonster);
        scheduler.schedule_once(1.0, Action::Restart);

        scheduler.cancel(spawn);
        assert_eq!(scheduler.advance(1.0), vec![Action::Restart]);

        scheduler.schedule_recurring(1.0, Action::SpawnMonster);
        scheduler.cancel_all();
        assert!(scheduler.advance(5.0).is_empty());
    }
}
