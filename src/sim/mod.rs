//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{detect_collision, overlaps};
pub use spawner::Spawner;
pub use state::{
    Background, Bullet, Direction, Enemy, EnemyBullet, Explosion, GameEvent, GamePhase, GameState,
    Invincibility, Player,
};
pub use tick::{TickInput, tick};
