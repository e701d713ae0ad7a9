//! Fixed timestep frame driver
//!
//! Converts variable frame times into whole simulation ticks and keeps the
//! held input between frames.

use crate::consts::*;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Game instance driving the simulation
pub struct FrameLoop {
    pub state: GameState,
    pub input: TickInput,
    accumulator: f32,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
    last_phase: GamePhase,
}

impl FrameLoop {
    pub fn new(state: GameState) -> Self {
        let last_phase = state.phase;
        Self {
            state,
            input: TickInput::default(),
            accumulator: 0.0,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
            last_phase,
        }
    }

    /// Queue one shot for the next tick
    pub fn press_shoot(&mut self) {
        self.input.shoot = true;
    }

    /// Queue a run start for the next tick
    pub fn press_start(&mut self) {
        self.input.start = true;
    }

    /// Run simulation ticks for a frame that took `dt` seconds.
    /// `time` is a monotonic timestamp in milliseconds (for FPS only).
    /// Returns the number of ticks run.
    pub fn advance(&mut self, dt: f32, time: f64) -> u32 {
        // A bogus frame time would poison the accumulator for good
        let dt = if dt.is_finite() { dt.clamp(0.0, 0.1) } else { 0.0 };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.shoot = false;
            self.input.start = false;
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        self.track_fps(time);

        let current_phase = self.state.phase;
        if current_phase != self.last_phase {
            log::info!("Phase {:?} -> {:?}", self.last_phase, current_phase);
            self.last_phase = current_phase;
        }

        substeps
    }

    fn track_fps(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample is the one we'll overwrite next
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW as f64 - 1.0) * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Hand this frame's events to presentation code
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}
