//! Flappy Fish - A side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `platform`: Native/browser abstraction (fixed-step clock, key-value storage, logging)
//! - `highscores`: Persisted leaderboard
//! - `settings`: Player preferences
//! - `game`: Controller tying the simulation to its collaborators

pub mod game;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::{Game, ScoreRecord};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (20 ms, 50 Hz)
    pub const TICK_SECS: f32 = 0.020;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the clock will accept (seconds)
    pub const MAX_FRAME_SECS: f32 = 0.1;

    /// Downward acceleration (pixels per tick²)
    pub const GRAVITY_ACCEL: f32 = 1.0;
    /// Velocity set by a jump (pixels per tick, negative is up)
    pub const JUMP_IMPULSE: f32 = -15.0;
    /// Square hitbox edge length
    pub const BIRD_SIZE: f32 = 50.0;

    /// Idle "breathing" hover before the first jump
    pub const HOVER_AMPLITUDE: f32 = 10.0;
    /// Radians per tick (~1.25 s period)
    pub const HOVER_RATE: f32 = 0.1;

    /// Obstacle column width
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    /// Height of the open gap in each obstacle
    pub const GAP_HEIGHT: f32 = 200.0;
    /// Horizontal scroll speed (pixels per tick)
    pub const OBSTACLE_SPEED: f32 = 5.0;
    /// Nominal spawn interval
    pub const SPAWN_INTERVAL: f32 = 2000.0;
    /// Distance the newest obstacle travels before the next spawns (pixels)
    pub const SPAWN_SPACING: f32 = SPAWN_INTERVAL / 3.0;
    /// Maximum obstacles on screen at once
    pub const MAX_OBSTACLES: usize = 3;

    /// Lives at the start of a run
    pub const STARTING_LIVES: u8 = 3;
    /// 2000 ms of invincibility after taking damage
    pub const INVINCIBILITY_GRACE_TICKS: u64 = 100;

    /// Score per passed obstacle
    pub const POINTS_PER_OBSTACLE: u64 = 2;
    /// Score per passed obstacle while cheat mode is on
    pub const CHEAT_POINTS_PER_OBSTACLE: u64 = 3;
    /// 300 ms score pulse cue
    pub const SCORE_PULSE_TICKS: u64 = 15;

    /// Playfield taller than this aspect ratio gets ceiling/floor bands
    pub const MAX_PLAYFIELD_ASPECT: f32 = 16.0 / 9.0;

    /// Entries kept on the leaderboard
    pub const MAX_HIGH_SCORES: usize = 100;
    /// Rows shown in the "TOP PLAYERS" table
    pub const LEADERBOARD_DISPLAY: usize = 7;
    /// Longest accepted player name (characters)
    pub const MAX_PLAYER_NAME_LEN: usize = 15;
}
