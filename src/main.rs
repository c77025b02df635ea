//! Flappy Fish entry point
//!
//! Native builds run a headless session with an autopilot at the real tick
//! rate and print the leaderboard. The browser host drives [`Game`] directly.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{Duration, Instant};

    use flappy_fish::Game;
    use flappy_fish::consts::{BIRD_SIZE, GAP_HEIGHT, TICK_SECS};
    use flappy_fish::platform::{self, FileStorage, MemoryStorage, Storage};
    use flappy_fish::sim::{GamePhase, Playfield, SimulationState};

    /// Give up on a run that outlives this many ticks (one minute)
    const MAX_TICKS: u64 = 3000;

    /// Flap when the fish sinks below the centre of the gap ahead
    fn autopilot(state: &SimulationState) -> bool {
        let bird_center = state.bird.y + BIRD_SIZE / 2.0;
        let target = state
            .obstacles
            .iter()
            .find(|o| o.right() >= state.bird.x)
            .map(|o| o.gap_y + GAP_HEIGHT / 2.0)
            .unwrap_or(state.playfield.height / 2.0);
        bird_center > target && state.bird.velocity >= 0.0
    }

    platform::init_logging();
    log::info!("Flappy Fish (native) starting...");

    let storage: Box<dyn Storage> = match FileStorage::in_data_dir() {
        Ok(storage) => {
            log::info!("Saving to {}", storage.dir().display());
            Box::new(storage)
        }
        Err(e) => {
            log::warn!("{}; scores will not outlive this session", e);
            Box::new(MemoryStorage::new())
        }
    };

    let mut game = Game::new(Playfield::new(400.0, 800.0), storage);
    game.jump();

    let started = Instant::now();
    let mut last_frame = started;
    while game.phase() != GamePhase::GameOver && game.state().time_ticks < MAX_TICKS {
        std::thread::sleep(Duration::from_secs_f32(TICK_SECS));
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        if game.phase() == GamePhase::Active && autopilot(game.state()) {
            game.jump();
        }
        game.update(dt);
        game.record_frame(now.duration_since(started).as_secs_f64() * 1000.0);
    }

    let state = game.state();
    log::info!(
        "Run ended after {} ticks: score {}, lives {}",
        state.time_ticks,
        state.score,
        state.lives
    );
    match game.last_record() {
        Some((record, Some(rank))) => log::info!("{} placed #{}", record.player_name, rank),
        Some((record, None)) => log::info!("{} did not place", record.player_name),
        None => log::info!("Run cut off before game over"),
    }

    log::info!("TOP PLAYERS");
    for (i, entry) in game.leaderboard().iter().enumerate() {
        log::info!("{:>2}. {:<15} {:>6}  {}", i + 1, entry.name, entry.score, entry.date);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
