//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`SimulationState`]; the presentation
//! layer only ever sees a [`Snapshot`].

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cheat::CheatCode;
use super::collision::HitCause;
use super::timers::Timers;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started yet, bird hovers until the first jump
    Idle,
    /// Simulation running
    Active,
    /// Run ended, frozen until retry
    GameOver,
}

/// Screen geometry the simulation runs inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    /// Lowest y the bird's top edge may reach (bottom of the ceiling band)
    pub boundary_top: f32,
    /// Highest y the bird's bottom edge may reach (top of the floor band)
    pub boundary_bottom: f32,
    /// Fixed horizontal position of the bird's left edge
    pub bird_x: f32,
}

impl Playfield {
    /// Derive boundaries from the screen size.
    ///
    /// Screens taller than 16:9 get equal ceiling and floor bands so the
    /// flyable area keeps that aspect ratio.
    pub fn new(width: f32, height: f32) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let band = ((height - width * MAX_PLAYFIELD_ASPECT) / 2.0).max(0.0);
        let boundary_top = band;
        // Never narrower than the bird itself
        let boundary_bottom = (height - band).max(boundary_top + BIRD_SIZE);

        Self {
            width,
            height,
            boundary_top,
            boundary_bottom,
            bird_x: width / 4.0,
        }
    }

    /// Largest valid bird y (top edge)
    #[inline]
    pub fn max_bird_y(&self) -> f32 {
        self.boundary_bottom - BIRD_SIZE
    }

    /// Vertically centred starting position
    #[inline]
    pub fn initial_bird_y(&self) -> f32 {
        (self.boundary_top + self.max_bird_y()) / 2.0
    }

    #[inline]
    pub fn clamp_bird_y(&self, y: f32) -> f32 {
        y.clamp(self.boundary_top, self.max_bird_y())
    }
}

/// The player-controlled bird
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Left edge (constant for the whole run)
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Vertical velocity in pixels per tick (positive is down)
    pub velocity: f32,
}

impl Bird {
    pub fn new(playfield: &Playfield) -> Self {
        Self {
            x: playfield.bird_x,
            y: playfield.initial_bird_y(),
            velocity: 0.0,
        }
    }
}

/// A pipe pair with an open gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u64,
    /// Left edge
    pub x: f32,
    /// Top of the gap
    pub gap_y: f32,
}

impl Obstacle {
    /// Trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }

    /// Bottom of the gap
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_y + GAP_HEIGHT
    }

    /// Fully scrolled off the left side
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right() <= 0.0
    }
}

/// Everything that happened during a tick, in order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First jump left the Idle phase
    RunStarted,
    Jumped,
    ObstacleSpawned { id: u64 },
    ObstacleRemoved { id: u64 },
    /// Obstacle credited for score (once per id)
    ObstaclePassed { id: u64, points: u64 },
    /// Collision detected; `damaged` is false while invincible
    Hit { cause: HitCause, damaged: bool },
    LifeLost { lives_left: u8 },
    InvincibilityEnded,
    CheatActivated,
    GameOver { score: u64, new_high_score: bool },
    /// Retry returned the game to Idle
    Reset,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub playfield: Playfield,
    pub phase: GamePhase,
    pub lives: u8,
    pub score: u64,
    /// Best score seen this session (seeded from the leaderboard)
    pub high_score: u64,
    pub invincible: bool,
    /// Cheat side channel: permanent invincibility and bonus points
    pub cheat_mode: bool,
    /// Visual cue raised briefly after each credited pass
    pub score_pulse: bool,
    /// Disables the idle hover and the score pulse
    pub reduced_motion: bool,
    /// Simulation tick counter (frozen during GameOver)
    pub time_ticks: u64,
    pub bird: Bird,
    /// Active obstacles in spawn order (== horizontal order)
    pub obstacles: Vec<Obstacle>,
    /// Obstacle ids already credited for score
    pub passed: BTreeSet<u64>,
    pub timers: Timers,
    pub cheat: CheatCode,
    /// Next obstacle ID
    next_id: u64,
}

impl SimulationState {
    /// Create a fresh Idle state with the given seed
    pub fn new(playfield: Playfield, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            playfield,
            phase: GamePhase::Idle,
            lives: STARTING_LIVES,
            score: 0,
            high_score: 0,
            invincible: false,
            cheat_mode: false,
            score_pulse: false,
            reduced_motion: false,
            time_ticks: 0,
            bird: Bird::new(&playfield),
            obstacles: Vec::new(),
            passed: BTreeSet::new(),
            timers: Timers::default(),
            cheat: CheatCode::default(),
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID (monotonic, never reused)
    pub fn next_obstacle_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Score granted per passed obstacle
    pub fn points_per_obstacle(&self) -> u64 {
        if self.cheat_mode {
            CHEAT_POINTS_PER_OBSTACLE
        } else {
            POINTS_PER_OBSTACLE
        }
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            bird_y: self.bird.y,
            bird_velocity: self.bird.velocity,
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    x: o.x,
                    gap_y: o.gap_y,
                })
                .collect(),
            phase: self.phase,
            lives: self.lives,
            score: self.score,
            high_score: self.high_score,
            invincible: self.invincible,
            score_pulse: self.score_pulse,
        }
    }
}

/// Obstacle as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleView {
    pub id: u64,
    pub x: f32,
    pub gap_y: f32,
}

/// Per-tick read-only snapshot handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub bird_y: f32,
    pub bird_velocity: f32,
    pub obstacles: Vec<ObstacleView>,
    pub phase: GamePhase,
    pub lives: u8,
    pub score: u64,
    pub high_score: u64,
    pub invincible: bool,
    pub score_pulse: bool,
}
