//! Sky Raid - A side-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawner, collisions, game state)
//! - `frame_loop`: Fixed timestep driver
//! - `render`: Draw list generation (device-agnostic)
//! - `audio`: Sound cue mapping for game events
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod frame_loop;
pub mod highscores;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use frame_loop::FrameLoop;
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one arcade frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    /// Height of the ground strip along the bottom edge
    pub const GROUND_HEIGHT: f32 = 80.0;
}

/// Convert a duration in milliseconds to whole simulation ticks
#[inline]
pub fn ms_to_ticks(ms: u32) -> u32 {
    (ms as f32 / (consts::SIM_DT * 1000.0)).round() as u32
}

/// Lowest y a ship of the given height may occupy (top edge of the ground)
#[inline]
pub fn flight_floor(height: f32) -> f32 {
    consts::CANVAS_HEIGHT - consts::GROUND_HEIGHT - height
}

/// Axis-aligned rectangle, top-left origin, y pointing down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Shrink toward the center, keeping `factor` of each dimension
    pub fn shrunk(&self, factor: f32) -> Self {
        let inset = self.size * (1.0 - factor) * 0.5;
        Self {
            pos: self.pos + inset,
            size: self.size - inset * 2.0,
        }
    }
}

/// Anything with a collision box
pub trait Bounds {
    fn bounds(&self) -> Rect;
}

impl Bounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}
