//! Game controller
//!
//! Owns the simulation and its collaborators: the fixed-step clock, the
//! leaderboard, player settings and the storage they persist to. Input
//! handlers queue commands here; the host calls [`Game::update`] once per
//! frame and renders [`Game::snapshot`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::highscores::{HighScoreEntry, HighScores};
use crate::platform::{Storage, Ticker};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, Playfield, SimulationState, Snapshot, TickInput, tick};

/// A finished run, handed to the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub player_name: String,
    pub score: u64,
    pub timestamp: DateTime<Utc>,
}

pub struct Game<S: Storage> {
    state: SimulationState,
    ticker: Ticker,
    /// Commands queued since the last tick
    input: TickInput,
    highscores: HighScores,
    settings: Settings,
    storage: S,
    /// Most recent finished run and the rank it reached
    last_record: Option<(ScoreRecord, Option<usize>)>,
    focused: bool,
    // FPS tracking
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl<S: Storage> Game<S> {
    /// New game with a random seed
    pub fn new(playfield: Playfield, storage: S) -> Self {
        Self::with_seed(playfield, storage, rand::random())
    }

    pub fn with_seed(playfield: Playfield, storage: S, seed: u64) -> Self {
        let highscores = HighScores::load(&storage);
        let settings = Settings::load(&storage);

        let mut state = SimulationState::new(playfield, seed);
        state.high_score = highscores.top_score().unwrap_or(0);
        state.reduced_motion = !settings.motion_enabled();

        let mut ticker = Ticker::default();
        ticker.start();

        log::info!(
            "Game initialized with seed: {} ({}x{} playfield)",
            seed,
            playfield.width,
            playfield.height
        );

        Self {
            state,
            ticker,
            input: TickInput::default(),
            highscores,
            settings,
            storage,
            last_record: None,
            focused: true,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Tap/press. Ignored once the run is over.
    pub fn jump(&mut self) {
        if self.state.phase != GamePhase::GameOver {
            self.input.jump = true;
        }
    }

    /// Raw keystroke (cheat code side channel)
    pub fn key(&mut self, key: char) {
        if self.state.phase != GamePhase::GameOver {
            self.input.keys.push(key);
        }
    }

    /// Retry button. Only valid on the game over screen; returns whether it applied.
    pub fn retry(&mut self) -> bool {
        if self.state.phase != GamePhase::GameOver {
            return false;
        }
        self.state.retry();
        self.input = TickInput::default();
        self.ticker.start();
        true
    }

    /// Advance by a frame's worth of wall time, returning the events of every
    /// tick that ran
    pub fn update(&mut self, frame_dt: f32) -> Vec<GameEvent> {
        let due = self.ticker.advance(frame_dt);
        let mut events = Vec::new();
        for _ in 0..due {
            events.extend(self.step());
            if !self.ticker.is_running() {
                break;
            }
        }
        events
    }

    /// Run exactly one tick, consuming the queued commands
    pub fn step(&mut self) -> Vec<GameEvent> {
        let input = std::mem::take(&mut self.input);
        let events = tick(&mut self.state, &input);

        for event in &events {
            if let GameEvent::GameOver { score, .. } = *event {
                self.finish_run(score);
            }
        }
        events
    }

    /// Terminal transition side effects: suspend the clock and persist
    fn finish_run(&mut self, score: u64) {
        self.ticker.stop();

        let record = ScoreRecord {
            player_name: self.settings.player_name.clone(),
            score,
            timestamp: Utc::now(),
        };
        let rank = self
            .highscores
            .submit(&record.player_name, record.score, record.timestamp);
        if let Some(rank) = rank {
            log::info!("{} placed #{} with {}", record.player_name, rank, score);
        }
        if let Err(e) = self.highscores.save(&mut self.storage) {
            log::warn!("Save skipped: {}", e);
        }
        self.last_record = Some((record, rank));
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Whether the clock is producing ticks (false while game over)
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_running()
    }

    /// Rows for the "TOP PLAYERS" table
    pub fn leaderboard(&self) -> &[HighScoreEntry] {
        self.highscores.display_rows()
    }

    pub fn highscores(&self) -> &HighScores {
        &self.highscores
    }

    /// The last finished run and its leaderboard rank, if it placed
    pub fn last_record(&self) -> Option<(&ScoreRecord, Option<usize>)> {
        self.last_record.as_ref().map(|(r, rank)| (r, *rank))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Name entry on the title screen
    pub fn set_player_name(&mut self, name: &str) {
        self.settings.set_player_name(name);
        self.save_settings();
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.settings.reduced_motion = reduced;
        self.state.reduced_motion = reduced;
        self.save_settings();
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save(&mut self.storage) {
            log::warn!("Settings not saved: {}", e);
        }
    }

    /// Window focus changes (mutes the soundtrack when configured to)
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Volume for the background video's soundtrack
    pub fn music_volume(&self) -> f32 {
        if !self.focused && self.settings.mute_on_blur {
            0.0
        } else {
            self.settings.effective_music_volume()
        }
    }

    /// Record a rendered frame at `time_ms` (monotonic milliseconds)
    pub fn record_frame(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest to newest frame
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                let intervals = (self.frame_times.len() - 1) as f64;
                self.fps = (intervals * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    /// Frames per second, when the FPS overlay is enabled
    pub fn fps(&self) -> Option<u32> {
        self.settings.show_fps.then_some(self.fps)
    }

    /// Tear down, handing back the storage backend
    pub fn into_storage(mut self) -> S {
        self.ticker.stop();
        self.storage
    }
}
