//! Fixed timestep simulation tick
//!
//! Core game loop that advances the presented scene deterministically.

use glam::Vec2;
use rand::Rng;

use super::entity::EntityKind;
use super::scene::{PlayScene, Scene, resolve};
use super::schedule::Action;
use super::state::SceneTransition;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Touches released since the last tick, oldest first (one shot each)
    pub touches: Vec<Vec2>,
    /// Idle/demo mode - autopilot aims at monsters
    pub autopilot: bool,
}

/// Advance the presented scene by one fixed timestep.
///
/// Returns the transition the scene asked for, if any. The caller decides
/// whether it can be presented.
pub fn tick(
    scene: &mut Scene,
    input: &TickInput,
    rng: &mut impl Rng,
    dt: f32,
) -> Option<SceneTransition> {
    match scene {
        Scene::Playing(play) => tick_playing(play, input, rng, dt),
        Scene::GameOver(over) => over.advance(dt),
    }
}

/// One step of the play scene:
/// 1. due spawns, 2. touch input, 3. movement and arrivals, 4. contacts.
///
/// Contacts are resolved one at a time; the first terminal transition ends
/// the step so nothing else happens in a finished play-through.
pub fn tick_playing(
    scene: &mut PlayScene,
    input: &TickInput,
    rng: &mut impl Rng,
    dt: f32,
) -> Option<SceneTransition> {
    scene.time += dt;

    let due = scene.scheduler_mut().advance(dt);
    for action in due {
        if action == Action::SpawnMonster {
            scene.spawn_monster(rng);
        }
    }

    for &point in &input.touches {
        scene.fire_projectile(point);
    }
    if input.autopilot {
        scene.autopilot_cooldown = (scene.autopilot_cooldown - dt).max(0.0);
        if input.touches.is_empty() && scene.autopilot_cooldown <= 0.0 {
            if let Some(point) = autopilot_aim(scene) {
                scene.fire_projectile(point);
                scene.autopilot_cooldown = AUTOPILOT_FIRE_INTERVAL;
            }
        }
    }

    scene.advance_entities(dt);

    for kind in scene.begin_contacts() {
        if let Some(transition) = resolve(scene, kind) {
            return Some(transition);
        }
    }

    None
}

/// Pick a touch point that leads the nearest monster ahead of the player
pub fn autopilot_aim(scene: &PlayScene) -> Option<Vec2> {
    let player = scene.player_pos();
    let front = player.x + scene.layout.player_size.x * 0.5;
    let speed = PROJECTILE_RANGE / PROJECTILE_DURATION;

    let target = scene
        .entities_of(EntityKind::Monster)
        .filter(|m| m.pos.x > front && m.pos.x < scene.layout.field.x)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))?;

    let lead = player.distance(target.pos) / speed;
    let mut aim = target.pos + target.velocity() * lead;
    // Never aim behind the player
    aim.x = aim.x.max(player.x + 1.0);
    Some(aim)
}
