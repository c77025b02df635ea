//! Obstacle spawning, scrolling and pruning

use rand::Rng;

use super::state::{GameEvent, Obstacle, Playfield, SimulationState};
use crate::consts::*;

/// Valid range for an obstacle's gap top.
///
/// Keeps at least one bird-height between the gap and either boundary. When
/// the playfield is too short for that, the band collapses to a single
/// centred offset that never starts above the ceiling.
pub fn gap_band(playfield: &Playfield) -> (f32, f32) {
    let min = playfield.boundary_top + BIRD_SIZE;
    let max = playfield.boundary_bottom - GAP_HEIGHT - BIRD_SIZE;
    if max >= min {
        (min, max)
    } else {
        let centred = ((playfield.boundary_top + playfield.boundary_bottom - GAP_HEIGHT) / 2.0)
            .max(playfield.boundary_top);
        (centred, centred)
    }
}

/// Uniform gap offset inside [`gap_band`]
pub fn random_gap_y<R: Rng>(playfield: &Playfield, rng: &mut R) -> f32 {
    let (min, max) = gap_band(playfield);
    if max > min {
        rng.random_range(min..=max)
    } else {
        min
    }
}

/// Scroll every obstacle left and drop those fully off-screen.
/// Returns the removed IDs in spawn order.
pub fn advance(obstacles: &mut Vec<Obstacle>) -> Vec<u64> {
    let mut removed = Vec::new();
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= OBSTACLE_SPEED;
    }
    obstacles.retain(|o| {
        if o.is_offscreen() {
            removed.push(o.id);
            false
        } else {
            true
        }
    });
    removed
}

/// Spawn rule: below the cap, and the newest obstacle has travelled far
/// enough from the right edge (distance based, so tick jitter can't bunch
/// obstacles up).
pub fn should_spawn(obstacles: &[Obstacle], playfield: &Playfield) -> bool {
    if obstacles.len() >= MAX_OBSTACLES {
        return false;
    }
    match obstacles.last() {
        None => true,
        Some(last) => playfield.width - last.x >= SPAWN_SPACING,
    }
}

/// Move, prune and maybe spawn, recording events
pub fn step(state: &mut SimulationState, events: &mut Vec<GameEvent>) {
    for id in advance(&mut state.obstacles) {
        log::debug!("Obstacle {} left the screen", id);
        events.push(GameEvent::ObstacleRemoved { id });
    }

    if should_spawn(&state.obstacles, &state.playfield) {
        let id = state.next_obstacle_id();
        let playfield = state.playfield;
        let gap_y = random_gap_y(&playfield, state.rng_mut());
        state.obstacles.push(Obstacle {
            id,
            x: playfield.width,
            gap_y,
        });
        log::debug!("Spawned obstacle {} with gap at {:.1}", id, gap_y);
        events.push(GameEvent::ObstacleSpawned { id });
    }
}
