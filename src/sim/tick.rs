//! Fixed timestep simulation tick
//!
//! One call advances every entity by one arcade frame and resolves hits.

use super::collision::overlaps;
use super::state::{Direction, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire one bullet (edge-triggered)
    pub shoot: bool,
    /// Start a new run from the menu or game over screen
    pub start: bool,
    /// Demo mode - AI flies the ship
    pub autopilot: bool,
}

/// Ticks between autopilot shots
const AUTOPILOT_FIRE_TICKS: u64 = 15;
/// How far ahead (in pixels) the autopilot watches for incoming bullets
const AUTOPILOT_DANGER_RANGE: f32 = 180.0;

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }
    let input = &input;

    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => {
            // Backdrop keeps scrolling and the last explosion finishes fading
            state.background.update();
            update_explosions(state);

            if input.start {
                state.start_run();
            }
        }

        GamePhase::Playing => {
            state.run_ticks += 1;
            state.background.update();

            // Player
            if input.left {
                state.player.move_dir(Direction::Left);
            }
            if input.right {
                state.player.move_dir(Direction::Right);
            }
            if input.up {
                state.player.move_dir(Direction::Up);
            }
            if input.down {
                state.player.move_dir(Direction::Down);
            }
            if input.shoot {
                state.player.shoot();
                state.push_event(GameEvent::PlayerFired);
            }
            state.player.invincibility.tick();

            update_explosions(state);

            state.player.bullets.retain_mut(|b| {
                b.update();
                b.alive()
            });

            let due = state.spawner.tick(&mut state.rng);
            for _ in 0..due {
                state.spawn_enemy();
            }

            update_enemies(state);
        }
    }
}

fn update_explosions(state: &mut GameState) {
    state.explosions.retain_mut(|e| {
        e.update();
        e.alive()
    });
}

/// Move every enemy, then resolve its hits against the player
fn update_enemies(state: &mut GameState) {
    let shrink = state.tuning.collision_shrink;
    let enemies = std::mem::take(&mut state.enemies);
    let mut survivors = Vec::with_capacity(enemies.len());
    let mut game_over = false;

    for mut enemy in enemies {
        if game_over {
            // The run is over; leave the rest of the wave where it is
            survivors.push(enemy);
            continue;
        }

        if enemy.update() {
            state.push_event(GameEvent::EnemyFired { kind: enemy.kind });
        }
        enemy.invincibility.tick();

        // Enemy bullets vs player; bullets pass through while invincible
        let mut i = 0;
        while i < enemy.bullets.len() {
            if !state.player.is_invincible() && overlaps(&enemy.bullets[i], &state.player, shrink)
            {
                enemy.bullets.remove(i);
                state.player.health = state.player.health.saturating_sub(1);
                let health = state.player.health;
                state.push_event(GameEvent::PlayerHit { health });
                if health == 0 {
                    let (center, size) = (state.player.center(), state.player.size.y);
                    state.explode(center, size);
                    game_over = true;
                    break;
                }
                state.player.make_invincible();
                continue;
            }
            i += 1;
        }
        if game_over {
            survivors.push(enemy);
            continue;
        }

        // Player bullets vs enemy, newest first
        let mut destroyed = false;
        for i in (0..state.player.bullets.len()).rev() {
            if enemy.is_invincible() || !overlaps(&state.player.bullets[i], &enemy, shrink) {
                continue;
            }
            state.player.bullets.remove(i);
            enemy.health = enemy.health.saturating_sub(1);
            state.push_event(GameEvent::EnemyHit {
                id: enemy.id,
                health: enemy.health,
            });
            if enemy.health == 0 {
                state.explode(enemy.center(), enemy.size.max_element());
                state.score += enemy.score;
                state.kills += 1;
                state.push_event(GameEvent::EnemyDestroyed {
                    id: enemy.id,
                    kind: enemy.kind,
                });
                destroyed = true;
                break;
            }
            enemy.make_invincible();
        }
        if destroyed {
            continue;
        }

        // Ramming is instantly fatal
        if !state.player.is_invincible() && overlaps(&state.player, &enemy, shrink) {
            state.player.health = 0;
            state.push_event(GameEvent::PlayerHit { health: 0 });
            let (center, size) = (state.player.center(), state.player.size.max_element());
            state.explode(center, size);
            game_over = true;
            continue;
        }

        if enemy.alive() {
            survivors.push(enemy);
        }
    }

    state.enemies = survivors;

    if game_over {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::GameOver {
            score: state.score,
            kills: state.kills,
        });
        log::info!(
            "Game over after {} ticks: score {}, kills {}",
            state.run_ticks,
            state.score,
            state.kills
        );
    }
}

/// Demo pilot: dodge the nearest incoming bullet, otherwise line up with the
/// closest enemy and keep firing
fn autopilot(state: &GameState, input: &mut TickInput) {
    input.left = false;
    input.right = false;
    input.up = false;
    input.down = false;
    input.shoot = false;

    if state.phase != GamePhase::Playing {
        input.start = true;
        return;
    }

    let player = &state.player;
    let center = player.center();

    let threat = state
        .enemies
        .iter()
        .flat_map(|e| e.bullets.iter())
        .filter(|b| {
            let dx = b.pos.x - (player.pos.x + player.size.x);
            let bullet_mid = b.pos.y + b.size.y / 2.0;
            (-player.size.x..AUTOPILOT_DANGER_RANGE).contains(&dx)
                && (bullet_mid - center.y).abs() < player.size.y
        })
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    let target_y = if let Some(bullet) = threat {
        // Slip to whichever side has more room
        let bullet_mid = bullet.pos.y + bullet.size.y / 2.0;
        let above = bullet_mid - player.size.y * 1.5;
        let below = bullet_mid + player.size.y * 1.5;
        let room_above = above - player.size.y / 2.0 > 0.0;
        if room_above && (center.y <= bullet_mid || below > lowest_center_y(player.size.y)) {
            above
        } else {
            below
        }
    } else if let Some(enemy) = state
        .enemies
        .iter()
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
    {
        enemy.center().y
    } else {
        CANVAS_HEIGHT / 2.0 - GROUND_HEIGHT / 2.0
    };

    let dy = target_y - center.y;
    if dy.abs() > player.speed {
        input.up = dy < 0.0;
        input.down = dy > 0.0;
    }

    // Hold a standoff distance from the enemy line
    let home_x = CANVAS_WIDTH * 0.15;
    if player.pos.x < home_x - player.speed {
        input.right = true;
    } else if player.pos.x > home_x + player.speed {
        input.left = true;
    }

    input.shoot = state.run_ticks % AUTOPILOT_FIRE_TICKS == 0;
}

/// Lowest center y a ship of this height can reach
fn lowest_center_y(height: f32) -> f32 {
    crate::flight_floor(height) + height / 2.0
}
