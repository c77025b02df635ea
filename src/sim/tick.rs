//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Each tick runs
//! commands → due timers → physics → obstacle movement/spawn → collision →
//! pass scoring → state transitions, always in that order.

use super::collision::{HitCause, detect_hits, detect_passes};
use super::obstacles;
use super::physics;
use super::state::{Bird, GameEvent, GamePhase, SimulationState};
use super::timers::TimerKind;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump/tap (edge-triggered)
    pub jump: bool,
    /// Retry after game over
    pub retry: bool,
    /// Raw keystrokes, fed to the cheat code matcher
    pub keys: Vec<char>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut SimulationState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Frozen until retry
    if state.phase == GamePhase::GameOver {
        if input.retry {
            state.retry();
            events.push(GameEvent::Reset);
        }
        return events;
    }

    for &key in &input.keys {
        if state.cheat.feed(key) {
            state.activate_cheat();
            events.push(GameEvent::CheatActivated);
        }
    }

    state.time_ticks += 1;

    match state.phase {
        GamePhase::Idle => {
            if input.jump {
                // The first tap starts the run instead of flapping
                state.phase = GamePhase::Active;
                log::info!("Run started (seed {})", state.seed);
                events.push(GameEvent::RunStarted);
            } else {
                physics::hover(
                    &mut state.bird,
                    &state.playfield,
                    state.time_ticks,
                    !state.reduced_motion,
                );
            }
        }

        GamePhase::Active => {
            if input.jump {
                physics::apply_jump(&mut state.bird);
                events.push(GameEvent::Jumped);
            }

            state.fire_timers(&mut events);

            physics::step_gravity(&mut state.bird, &state.playfield);

            obstacles::step(state, &mut events);

            let hits = detect_hits(&state.bird, &state.obstacles, &state.playfield);
            let passes = detect_passes(&state.bird, &state.obstacles, &state.passed);

            for id in passes {
                state.credit_pass(id, &mut events);
            }
            for cause in hits {
                state.apply_hit(cause, &mut events);
                if state.phase == GamePhase::GameOver {
                    break;
                }
            }
        }

        GamePhase::GameOver => {}
    }

    events
}

impl SimulationState {
    /// Fire due one-shot timers from the current epoch
    pub fn fire_timers(&mut self, events: &mut Vec<GameEvent>) {
        for kind in self.timers.fire_due(self.time_ticks) {
            match kind {
                TimerKind::InvincibilityExpiry => {
                    // Cheat invincibility is permanent
                    if !self.cheat_mode && self.invincible {
                        self.invincible = false;
                        events.push(GameEvent::InvincibilityEnded);
                    }
                }
                TimerKind::ScorePulseEnd => {
                    self.score_pulse = false;
                }
            }
        }
    }

    /// Credit an obstacle exactly once
    pub fn credit_pass(&mut self, id: u64, events: &mut Vec<GameEvent>) {
        if !self.passed.insert(id) {
            return;
        }
        let points = self.points_per_obstacle();
        self.score += points;
        log::debug!("Passed obstacle {} (+{}, score {})", id, points, self.score);
        events.push(GameEvent::ObstaclePassed { id, points });

        if !self.reduced_motion {
            self.score_pulse = true;
            self.timers
                .schedule(TimerKind::ScorePulseEnd, self.time_ticks, SCORE_PULSE_TICKS);
        }
    }

    /// React to a collision: damage, grace window, or game over
    pub fn apply_hit(&mut self, cause: HitCause, events: &mut Vec<GameEvent>) {
        if self.phase != GamePhase::Active {
            return;
        }
        if self.invincible {
            events.push(GameEvent::Hit {
                cause,
                damaged: false,
            });
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        log::debug!("Hit {:?}, {} lives left", cause, self.lives);
        events.push(GameEvent::Hit {
            cause,
            damaged: true,
        });
        events.push(GameEvent::LifeLost {
            lives_left: self.lives,
        });

        if self.lives == 0 {
            self.end_run(events);
        } else {
            self.invincible = true;
            self.timers.schedule(
                TimerKind::InvincibilityExpiry,
                self.time_ticks,
                INVINCIBILITY_GRACE_TICKS,
            );
        }
    }

    /// Permanent invincibility and bonus points until the next retry
    pub fn activate_cheat(&mut self) {
        log::info!("Cheat mode activated");
        self.cheat_mode = true;
        self.invincible = true;
        self.timers.cancel(TimerKind::InvincibilityExpiry);
    }

    /// Terminal transition: freeze and record the high score
    fn end_run(&mut self, events: &mut Vec<GameEvent>) {
        self.phase = GamePhase::GameOver;
        self.timers.cancel_all();
        self.score_pulse = false;

        let new_high_score = self.score > self.high_score;
        self.high_score = self.high_score.max(self.score);
        log::info!(
            "Game over: score {} (best {}{})",
            self.score,
            self.high_score,
            if new_high_score { ", new record" } else { "" }
        );
        events.push(GameEvent::GameOver {
            score: self.score,
            new_high_score,
        });
    }

    /// Back to Idle with a fresh run. Keeps the high score and RNG stream.
    pub fn retry(&mut self) {
        self.bird = Bird::new(&self.playfield);
        self.lives = STARTING_LIVES;
        self.score = 0;
        self.invincible = false;
        self.cheat_mode = false;
        self.score_pulse = false;
        self.obstacles.clear();
        self.passed.clear();
        self.timers.advance_epoch();
        self.cheat.reset();
        self.phase = GamePhase::Idle;
        log::info!("Retry: back to idle");
    }
}
