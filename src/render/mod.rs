//! Draw list generation
//!
//! Walks the game state in painter's order and emits device-agnostic draw
//! commands. A backend maps sprites to textures and uploads the filled rects
//! as colored triangles.

pub mod shapes;
pub mod vertex;

pub use vertex::Vertex;

use glam::Vec2;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameState, Invincibility};
use crate::tuning::Tuning;
use crate::Rect;

pub const BACKGROUND_SPRITE: &str = "background.jpg";
pub const EXPLOSION_SPRITE: &str = "explosion.png";

/// Health bar geometry
const HEALTH_BAR_WIDTH_FRACTION: f32 = 0.3;
const HEALTH_BAR_HEIGHT: f32 = 4.0;
const HEALTH_BAR_GAP: f32 = 2.0;

/// Which image a sprite command draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background,
    Player,
    PlayerBullet,
    /// Roster index
    Enemy(usize),
    /// Roster index of the shooter
    EnemyBullet(usize),
    Explosion,
}

impl Sprite {
    /// Image path for this sprite
    pub fn asset<'a>(&self, tuning: &'a Tuning) -> Option<&'a str> {
        match *self {
            Sprite::Background => Some(BACKGROUND_SPRITE),
            Sprite::Player => Some(tuning.player.sprite.as_str()),
            Sprite::PlayerBullet => Some(tuning.player.bullet_sprite.as_str()),
            Sprite::Enemy(kind) => tuning.enemies.types.get(kind).map(|t| t.sprite.as_str()),
            Sprite::EnemyBullet(kind) => tuning
                .enemies
                .types
                .get(kind)
                .map(|t| t.bullet_sprite.as_str()),
            Sprite::Explosion => Some(EXPLOSION_SPRITE),
        }
    }
}

/// One draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Sprite {
        sprite: Sprite,
        rect: Rect,
        alpha: f32,
        /// Mirror horizontally about the rect center
        flip_x: bool,
    },
    Fill {
        rect: Rect,
        color: [f32; 4],
    },
}

/// A frame's draw commands, back to front
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    fn sprite(&mut self, sprite: Sprite, rect: Rect) {
        self.commands.push(DrawCmd::Sprite {
            sprite,
            rect,
            alpha: 1.0,
            flip_x: false,
        });
    }

    fn fill(&mut self, rect: Rect, color: [f32; 4]) {
        self.commands.push(DrawCmd::Fill { rect, color });
    }

    /// Health bar centered above a ship
    fn health_bar(&mut self, ship: &Rect, fraction: f32) {
        let width = ship.size.x * HEALTH_BAR_WIDTH_FRACTION;
        let x = ship.pos.x + (ship.size.x - width) / 2.0;
        let y = ship.pos.y - HEALTH_BAR_HEIGHT - HEALTH_BAR_GAP;
        self.fill(
            Rect::new(x, y, width, HEALTH_BAR_HEIGHT),
            vertex::colors::HEALTH_EMPTY,
        );
        self.fill(
            Rect::new(x, y, width * fraction.clamp(0.0, 1.0), HEALTH_BAR_HEIGHT),
            vertex::colors::HEALTH_FULL,
        );
    }

    /// Tessellate every fill command into colored triangles, in order
    pub fn fill_vertices(&self) -> Vec<Vertex> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Fill { rect, color } => Some(shapes::quad(rect, *color)),
                DrawCmd::Sprite { .. } => None,
            })
            .flatten()
            .collect()
    }

    pub fn sprites(&self) -> impl Iterator<Item = &DrawCmd> {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Sprite { .. }))
    }
}

/// Build the draw list for the current frame
pub fn build_draw_list(state: &GameState, settings: &Settings) -> DrawList {
    let mut list = DrawList::default();
    let flicker_ticks = state.flicker_ticks();
    let visible = |inv: &Invincibility| {
        !settings.effective_flicker() || inv.visible(state.time_ticks, flicker_ticks)
    };

    // Scrolling background, two copies side by side
    let bg = &state.background;
    list.sprite(Sprite::Background, Rect::new(bg.x, 0.0, bg.width, bg.height));
    list.sprite(
        Sprite::Background,
        Rect::new(bg.x + bg.width, 0.0, bg.width, bg.height),
    );

    list.fill(
        Rect::new(0.0, CANVAS_HEIGHT - GROUND_HEIGHT, CANVAS_WIDTH, GROUND_HEIGHT),
        vertex::colors::GROUND,
    );

    let player = &state.player;
    let player_rect = Rect {
        pos: player.pos,
        size: player.size,
    };
    if visible(&player.invincibility) {
        list.sprite(Sprite::Player, player_rect);
    }
    if settings.show_health_bars {
        list.health_bar(&player_rect, player.health_fraction());
    }

    for explosion in &state.explosions {
        let half = Vec2::splat(explosion.size / 2.0);
        list.commands.push(DrawCmd::Sprite {
            sprite: Sprite::Explosion,
            rect: Rect {
                pos: explosion.pos - half,
                size: half * 2.0,
            },
            alpha: explosion.opacity.clamp(0.0, 1.0),
            flip_x: false,
        });
    }

    for bullet in &player.bullets {
        list.sprite(
            Sprite::PlayerBullet,
            Rect {
                pos: bullet.pos,
                size: bullet.size,
            },
        );
    }

    for enemy in &state.enemies {
        let rect = Rect {
            pos: enemy.pos,
            size: enemy.size,
        };
        // Enemy art faces right; mirror it toward the player
        if visible(&enemy.invincibility) {
            list.commands.push(DrawCmd::Sprite {
                sprite: Sprite::Enemy(enemy.kind),
                rect,
                alpha: 1.0,
                flip_x: true,
            });
        }
        if settings.show_health_bars {
            list.health_bar(&rect, enemy.health_fraction());
        }
        for bullet in &enemy.bullets {
            list.sprite(
                Sprite::EnemyBullet(bullet.kind),
                Rect {
                    pos: bullet.pos,
                    size: bullet.size,
                },
            );
        }
    }

    list
}
