//! Monster Shooter entry point
//!
//! Runs a headless session: the autopilot plays, a logging view reports every
//! scene change. Pass a settings JSON path as the first argument to override
//! defaults.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use monster_shooter::consts::SIM_DT;
use monster_shooter::sim::{ContactKind, EntityKind, RemovalReason, SceneEvent};
use monster_shooter::{Game, LogView, Settings};

fn main() {
    env_logger::init();
    log::info!("Monster Shooter (headless) starting...");

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load(path.as_deref());

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Game initialized with seed: {}", seed);

    let mut game = Game::new(&settings, seed).with_view(Box::new(LogView));

    let steps = (settings.demo_seconds / SIM_DT).round() as u64;
    let mut kills = 0u32;
    let mut hits = 0u32;
    let mut escaped = 0u32;
    for _ in 0..steps {
        game.frame(SIM_DT);
        for event in game.take_events() {
            match event {
                SceneEvent::Contact(ContactKind::MonsterHitByProjectile { .. }) => kills += 1,
                SceneEvent::Contact(ContactKind::PlayerHitByMonster { .. }) => hits += 1,
                SceneEvent::Removed {
                    kind: EntityKind::Monster,
                    reason: RemovalReason::Arrived,
                    ..
                } => escaped += 1,
                _ => {}
            }
        }
    }

    log::info!(
        "Session over after {:.0}s: {} monsters destroyed, {} hits taken, {} escaped",
        settings.demo_seconds,
        kills,
        hits,
        escaped
    );
}
