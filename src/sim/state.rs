//! Game state and core simulation types
//!
//! Entity timers are counted in ticks; tuning durations in milliseconds are
//! converted once when an entity is created.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::spawner::Spawner;
use crate::consts::*;
use crate::tuning::{EnemyType, ProjectileTuning, Tuning};
use crate::{Bounds, Rect, flight_floor, ms_to_ticks};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the player to start a run
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a restart
    GameOver,
}

/// Something presentation code may want to react to (sounds, HUD, saves)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RunStarted,
    PlayerFired,
    /// Index into the enemy roster
    EnemyFired { kind: usize },
    EnemySpawned { id: u32, kind: usize },
    PlayerHit { health: u8 },
    EnemyHit { id: u32, health: u8 },
    EnemyDestroyed { id: u32, kind: usize },
    Explosion { pos: Vec2, size: f32 },
    GameOver { score: u64, kills: u32 },
}

/// Movement directions for the player ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Invincibility window with flicker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Invincibility {
    pub ticks_left: u32,
}

impl Invincibility {
    #[inline]
    pub fn active(&self) -> bool {
        self.ticks_left > 0
    }

    pub fn start(&mut self, ticks: u32) {
        self.ticks_left = ticks;
    }

    pub fn tick(&mut self) {
        self.ticks_left = self.ticks_left.saturating_sub(1);
    }

    /// Whether the sprite shows this tick. Flickers while active.
    pub fn visible(&self, tick: u64, flicker_ticks: u32) -> bool {
        if !self.active() || flicker_ticks < 2 {
            return true;
        }
        (tick % flicker_ticks as u64) < (flicker_ticks as u64 / 2)
    }
}

/// Scrolling backdrop, drawn twice side by side
#[derive(Debug, Clone)]
pub struct Background {
    pub x: f32,
    pub speed: f32,
    pub width: f32,
    pub height: f32,
}

impl Background {
    pub fn new(speed: f32) -> Self {
        Self {
            x: 0.0,
            speed,
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }

    pub fn update(&mut self) {
        self.x -= self.speed;
        if self.x <= -self.width {
            self.x = 0.0;
        }
    }
}

/// A player shot, flying right
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, tuning: &ProjectileTuning) -> Self {
        Self {
            pos,
            size: Vec2::new(tuning.width, tuning.height),
            speed: tuning.speed,
        }
    }

    pub fn update(&mut self) {
        self.pos.x += self.speed;
    }

    /// Still on screen
    pub fn alive(&self) -> bool {
        self.pos.x < CANVAS_WIDTH
    }
}

impl Bounds for Bullet {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// An enemy shot, flying left
#[derive(Debug, Clone)]
pub struct EnemyBullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Roster index of the ship that fired it (selects the sprite)
    pub kind: usize,
}

impl EnemyBullet {
    pub fn new(pos: Vec2, kind: usize, tuning: &ProjectileTuning) -> Self {
        Self {
            pos,
            size: Vec2::new(tuning.width, tuning.height),
            speed: tuning.speed,
            kind,
        }
    }

    pub fn update(&mut self) {
        self.pos.x -= self.speed;
    }

    pub fn alive(&self) -> bool {
        self.pos.x > 0.0
    }
}

impl Bounds for EnemyBullet {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: u8,
    pub max_health: u8,
    pub invincibility: Invincibility,
    invincibility_ticks: u32,
    bullet: ProjectileTuning,
    pub bullets: Vec<Bullet>,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let p = &tuning.player;
        let size = Vec2::new(p.height * p.aspect, p.height);
        Self {
            pos: Vec2::new(p.start_x, CANVAS_HEIGHT / 2.0 - size.y / 2.0),
            size,
            speed: p.speed,
            health: p.max_health,
            max_health: p.max_health,
            invincibility: Invincibility::default(),
            invincibility_ticks: ms_to_ticks(p.invincibility_ms),
            bullet: tuning.player_bullet,
            bullets: Vec::new(),
        }
    }

    /// Step one move in `dir`, unless already at that edge
    pub fn move_dir(&mut self, dir: Direction) {
        match dir {
            Direction::Left if self.pos.x > 0.0 => self.pos.x -= self.speed,
            Direction::Right if self.pos.x < CANVAS_WIDTH - self.size.x => {
                self.pos.x += self.speed
            }
            Direction::Up if self.pos.y > 0.0 => self.pos.y -= self.speed,
            Direction::Down if self.pos.y < flight_floor(self.size.y) => {
                self.pos.y += self.speed
            }
            _ => {}
        }
    }

    /// Fire a bullet from the ship's nose
    pub fn shoot(&mut self) {
        let muzzle = Vec2::new(self.pos.x + self.size.x, self.pos.y + self.size.y / 2.0);
        self.bullets.push(Bullet::new(muzzle, &self.bullet));
    }

    pub fn make_invincible(&mut self) {
        self.invincibility.start(self.invincibility_ticks);
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility.active()
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.max_health as f32
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// An enemy ship hovering on the right half of the arena
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    /// Roster index
    pub kind: usize,
    pub pos: Vec2,
    pub size: Vec2,
    pub base_speed: f32,
    pub vertical_speed: f32,
    /// +1 moving down, -1 moving up
    pub direction: f32,
    pub movement_timer: u32,
    flip_period: u32,
    pub heading_right: bool,
    pub health: u8,
    pub max_health: u8,
    pub score: u64,
    pub invincibility: Invincibility,
    invincibility_ticks: u32,
    shoot_interval: u32,
    /// Ticks since the last shot; `None` until the first shot
    since_last_shot: Option<u32>,
    bullet: ProjectileTuning,
    pub bullets: Vec<EnemyBullet>,
}

impl Enemy {
    /// Create an enemy of roster entry `kind` just off the right edge
    pub fn new(id: u32, kind: usize, ty: &EnemyType, tuning: &Tuning, rng: &mut Pcg32) -> Self {
        let size = Vec2::new(ty.width(), ty.height);
        let y = rng.random::<f32>() * flight_floor(size.y);
        Self {
            id,
            kind,
            pos: Vec2::new(CANVAS_WIDTH + size.x, y),
            size,
            base_speed: ty.speed,
            vertical_speed: ty.speed * tuning.enemies.vertical_speed_factor,
            direction: 1.0,
            movement_timer: 0,
            flip_period: tuning.enemies.flip_period_ticks,
            heading_right: false,
            health: ty.max_health,
            max_health: ty.max_health,
            score: ty.score,
            invincibility: Invincibility::default(),
            invincibility_ticks: ms_to_ticks(tuning.enemies.invincibility_ms),
            shoot_interval: ms_to_ticks(ty.shoot_interval_ms),
            since_last_shot: None,
            bullet: tuning.enemy_bullet,
            bullets: Vec::new(),
        }
    }

    /// Advance movement, own bullets, and firing. Returns true if it fired.
    pub fn update(&mut self) -> bool {
        // Bob up and down between the ceiling and the ground
        self.pos.y += self.vertical_speed * self.direction;
        if self.pos.y <= 0.0 || self.pos.y >= flight_floor(self.size.y) {
            self.direction = -self.direction;
        }

        self.movement_timer += 1;
        if self.movement_timer > self.flip_period {
            self.heading_right = !self.heading_right;
            self.movement_timer = 0;
        }

        self.pos.x += if self.heading_right {
            self.base_speed
        } else {
            -self.base_speed
        };
        // Stay on the right half
        self.pos.x = self
            .pos
            .x
            .min(CANVAS_WIDTH - self.size.x)
            .max(CANVAS_WIDTH / 2.0);

        self.bullets.retain_mut(|b| {
            b.update();
            b.alive()
        });

        self.try_shoot()
    }

    fn try_shoot(&mut self) -> bool {
        if let Some(elapsed) = self.since_last_shot.as_mut() {
            *elapsed += 1;
        }
        let ready = self
            .since_last_shot
            .is_none_or(|elapsed| elapsed > self.shoot_interval);
        if ready {
            let muzzle = Vec2::new(self.pos.x, self.pos.y + self.size.y / 2.0);
            self.bullets
                .push(EnemyBullet::new(muzzle, self.kind, &self.bullet));
            self.since_last_shot = Some(0);
        }
        ready
    }

    pub fn make_invincible(&mut self) {
        self.invincibility.start(self.invincibility_ticks);
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility.active()
    }

    /// Not yet drifted off the left edge
    pub fn alive(&self) -> bool {
        self.pos.x > -self.size.x
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.max_health as f32
    }
}

impl Bounds for Enemy {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A fading explosion sprite
#[derive(Debug, Clone)]
pub struct Explosion {
    /// Center point
    pub pos: Vec2,
    pub size: f32,
    pub opacity: f32,
    pub fade_speed: f32,
}

impl Explosion {
    pub fn new(pos: Vec2, size: f32, fade_speed: f32) -> Self {
        Self {
            pos,
            size,
            opacity: 1.0,
            fade_speed,
        }
    }

    pub fn update(&mut self) {
        self.opacity -= self.fade_speed;
    }

    pub fn alive(&self) -> bool {
        self.opacity > 0.0
    }
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter (never reset)
    pub time_ticks: u64,
    /// Ticks spent in the current run
    pub run_ticks: u64,
    pub score: u64,
    pub kills: u32,
    pub background: Background,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub explosions: Vec<Explosion>,
    pub spawner: Spawner,
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game sitting at the menu
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            time_ticks: 0,
            run_ticks: 0,
            score: 0,
            kills: 0,
            background: Background::new(tuning.background_speed),
            player: Player::new(&tuning),
            enemies: Vec::new(),
            explosions: Vec::new(),
            spawner: Spawner::new(&tuning.spawner),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Reset run-scoped state and start playing
    pub fn start_run(&mut self) {
        self.player = Player::new(&self.tuning);
        self.enemies.clear();
        self.explosions.clear();
        self.spawner.reset();
        self.score = 0;
        self.kills = 0;
        self.run_ticks = 0;
        self.phase = GamePhase::Playing;
        self.push_event(GameEvent::RunStarted);
        log::info!("Run started (seed {})", self.seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn one enemy of a random roster type
    pub fn spawn_enemy(&mut self) -> u32 {
        let kind = self.rng.random_range(0..self.tuning.enemies.types.len());
        let id = self.next_entity_id();
        let enemy = Enemy::new(
            id,
            kind,
            &self.tuning.enemies.types[kind],
            &self.tuning,
            &mut self.rng,
        );
        log::debug!("Spawned enemy {} ({})", id, self.tuning.enemies.types[kind].name);
        self.enemies.push(enemy);
        self.push_event(GameEvent::EnemySpawned { id, kind });
        id
    }

    /// Start an explosion centered at `pos`
    pub fn explode(&mut self, pos: Vec2, size: f32) {
        self.explosions
            .push(Explosion::new(pos, size, self.tuning.explosion_fade));
        self.push_event(GameEvent::Explosion { pos, size });
    }

    /// Flicker period in ticks
    pub fn flicker_ticks(&self) -> u32 {
        ms_to_ticks(self.tuning.flicker_ms)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    #[test]
    fn test_background_wraps() {
        let mut bg = Background::new(1.0);
        for _ in 0..799 {
            bg.update();
        }
        assert_eq!(bg.x, -799.0);
        bg.update();
        assert_eq!(bg.x, 0.0);
    }

    #[test]
    fn test_player_spawn_position() {
        let player = Player::new(&tuning());
        assert_eq!(player.pos, Vec2::new(20.0, 280.0));
        assert_eq!(player.size, Vec2::new(40.0, 40.0));
        assert_eq!(player.health, 3);
    }

    #[test]
    fn test_player_stops_at_edges() {
        let mut player = Player::new(&tuning());
        for _ in 0..100 {
            player.move_dir(Direction::Left);
            player.move_dir(Direction::Up);
        }
        assert_eq!(player.pos, Vec2::new(0.0, 0.0));

        for _ in 0..200 {
            player.move_dir(Direction::Right);
            player.move_dir(Direction::Down);
        }
        assert_eq!(player.pos.x, 760.0);
        // Can't dip into the ground strip
        assert_eq!(player.pos.y, 480.0);
    }

    #[test]
    fn test_player_shoot_from_nose() {
        let mut player = Player::new(&tuning());
        player.shoot();
        assert_eq!(player.bullets.len(), 1);
        assert_eq!(player.bullets[0].pos, Vec2::new(60.0, 300.0));
        player.bullets[0].update();
        assert_eq!(player.bullets[0].pos.x, 67.0);
    }

    #[test]
    fn test_invincibility_flicker() {
        let mut inv = Invincibility::default();
        assert!(inv.visible(1, 6));
        inv.start(120);
        let shown = (0..6).filter(|&t| inv.visible(t, 6)).count();
        assert_eq!(shown, 3);
        for _ in 0..120 {
            inv.tick();
        }
        assert!(!inv.active());
    }

    #[test]
    fn test_enemy_spawns_offscreen_above_ground() {
        let t = tuning();
        let mut rng = Pcg32::seed_from_u64(7);
        for kind in 0..t.enemies.types.len() {
            let enemy = Enemy::new(1, kind, &t.enemies.types[kind], &t, &mut rng);
            assert_eq!(enemy.pos.x, CANVAS_WIDTH + enemy.size.x);
            assert!(enemy.pos.y >= 0.0 && enemy.pos.y <= flight_floor(enemy.size.y));
            assert_eq!(enemy.vertical_speed, enemy.base_speed * 0.5);
        }
    }

    #[test]
    fn test_enemy_clamped_to_right_half() {
        let t = tuning();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemy = Enemy::new(1, 3, &t.enemies.types[3], &t, &mut rng);
        enemy.update();
        assert_eq!(enemy.pos.x, CANVAS_WIDTH - enemy.size.x);

        for _ in 0..1000 {
            enemy.update();
            assert!(enemy.pos.x >= CANVAS_WIDTH / 2.0);
            assert!(enemy.pos.x <= CANVAS_WIDTH - enemy.size.x);
        }
        assert!(enemy.alive());
    }

    #[test]
    fn test_enemy_heading_flips_after_period() {
        let t = tuning();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = Enemy::new(1, 0, &t.enemies.types[0], &t, &mut rng);
        for _ in 0..120 {
            enemy.update();
        }
        assert!(!enemy.heading_right);
        enemy.update();
        assert!(enemy.heading_right);
        assert_eq!(enemy.movement_timer, 0);
    }

    #[test]
    fn test_enemy_bounces_off_ceiling() {
        let t = tuning();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = Enemy::new(1, 0, &t.enemies.types[0], &t, &mut rng);
        enemy.pos.y = 0.5;
        enemy.direction = -1.0;
        enemy.update();
        assert_eq!(enemy.direction, 1.0);
    }

    #[test]
    fn test_enemy_fire_cadence() {
        let t = tuning();
        let mut rng = Pcg32::seed_from_u64(1);
        // Type 1 shoots every 2000ms = 120 ticks
        let mut enemy = Enemy::new(1, 0, &t.enemies.types[0], &t, &mut rng);
        assert!(enemy.update(), "first update fires immediately");
        let mut shots = vec![0u32];
        for tick in 1..400 {
            if enemy.update() {
                shots.push(tick);
            }
        }
        assert_eq!(shots[1] - shots[0], 121);
        assert_eq!(shots[2] - shots[1], 121);
    }

    #[test]
    fn test_enemy_bullets_leave_left_edge() {
        let t = tuning();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = Enemy::new(1, 2, &t.enemies.types[2], &t, &mut rng);
        enemy.update();
        assert_eq!(enemy.bullets.len(), 1);
        assert_eq!(enemy.bullets[0].kind, 2);

        enemy
            .bullets
            .push(EnemyBullet::new(Vec2::new(3.0, 100.0), 2, &t.enemy_bullet));
        enemy.update();
        assert_eq!(enemy.bullets.len(), 1, "bullet past the left edge is dropped");
    }

    #[test]
    fn test_explosion_fades_out() {
        let mut e = Explosion::new(Vec2::ZERO, 40.0, 0.05);
        let mut ticks = 0;
        while e.alive() {
            e.update();
            ticks += 1;
        }
        assert!((19..=21).contains(&ticks));
    }

    #[test]
    fn test_start_run_resets() {
        let mut state = GameState::new(42, tuning());
        assert_eq!(state.phase, GamePhase::Menu);
        state.start_run();
        state.spawn_enemy();
        state.player.health = 1;
        state.score = 500;
        state.start_run();
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.health, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        let started = state
            .drain_events()
            .iter()
            .filter(|e| **e == GameEvent::RunStarted)
            .count();
        assert_eq!(started, 2);
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(42, tuning());
        let a = state.spawn_enemy();
        let b = state.spawn_enemy();
        assert_ne!(a, b);
    }
}
