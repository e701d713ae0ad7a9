//! Sky Raid entry point
//!
//! Runs the simulation headless with the autopilot at the controls, feeding
//! events through the sound board and building a draw list every frame the
//! way a graphical host would.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use clap::Parser;

    use sky_raid::audio::SoundBoard;
    use sky_raid::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, SIM_DT};
    use sky_raid::highscores::HighScoreEntry;
    use sky_raid::render::build_draw_list;
    use sky_raid::render::shapes::to_clip_space;
    use sky_raid::render::vertex::as_bytes;
    use sky_raid::sim::{GameEvent, GameState};
    use sky_raid::{FrameLoop, HighScores, Settings, Tuning};

    #[derive(Debug, Parser)]
    #[command(name = "sky-raid", about = "Run the shooter simulation headless")]
    struct CliArgs {
        /// Seed for the deterministic simulation
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Number of frames to simulate
        #[arg(long, default_value_t = 3600)]
        frames: u32,

        /// JSON tuning file; built-in balance when omitted
        #[arg(long, value_name = "PATH")]
        tuning: Option<PathBuf>,

        /// JSON settings file
        #[arg(long, value_name = "PATH", default_value = "settings.json")]
        settings: PathBuf,

        /// JSON high score file
        #[arg(long, value_name = "PATH", default_value = "highscores.json")]
        scores: PathBuf,
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let args = CliArgs::parse();
        log::info!("Sky Raid (headless) starting, seed {}", args.seed);

        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)
                .with_context(|| format!("failed to load tuning from {}", path.display()))?,
            None => Tuning::default(),
        };
        let settings = Settings::load(&args.settings);
        let mut scores = HighScores::load(&args.scores);
        let board = SoundBoard::new(&tuning);

        let mut game = FrameLoop::new(GameState::new(args.seed, tuning));
        game.input.autopilot = true;

        let mut runs = 0u32;
        let mut commands = 0usize;
        let mut vertex_bytes = 0usize;
        for frame in 0..args.frames {
            let time_ms = f64::from(frame + 1) * f64::from(SIM_DT) * 1000.0;
            game.advance(SIM_DT, time_ms);

            let events = game.drain_events();
            for cue in board.cues(&events, &settings) {
                log::debug!("sound: {:?}", cue);
            }
            let list = build_draw_list(&game.state, &settings);
            commands += list.commands.len();
            // What a GPU host would upload for the filled rects
            let mut vertices = list.fill_vertices();
            to_clip_space(&mut vertices, CANVAS_WIDTH, CANVAS_HEIGHT);
            vertex_bytes += as_bytes(&vertices).len();

            for event in &events {
                if let GameEvent::GameOver { score, kills } = *event {
                    runs += 1;
                    let entry = HighScoreEntry {
                        score,
                        kills,
                        ticks_survived: game.state.run_ticks,
                        timestamp: unix_millis(),
                    };
                    match scores.add_score(entry) {
                        Some(rank) => log::info!("Run {} scored {} (rank {})", runs, score, rank),
                        None => log::info!("Run {} scored {}", runs, score),
                    }
                }
            }
        }

        if runs > 0 {
            scores
                .save(&args.scores)
                .with_context(|| format!("failed to save {}", args.scores.display()))?;
        }

        println!(
            "{} frames, {} finished runs, current score {}, {} kills",
            args.frames, runs, game.state.score, game.state.kills
        );
        println!("{} draw commands, {} vertex bytes", commands, vertex_bytes);
        if let Some(best) = scores.top_score() {
            println!("Best score: {}", best);
        }
        Ok(())
    }

    fn unix_millis() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // A browser host drives sky_raid::FrameLoop directly
}
