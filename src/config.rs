/// Gameplay constants.
///
/// `GameConfig::default()` reproduces the arcade tuning. Everything lives in
/// one struct so tests can shrink intervals or move thresholds without
/// touching global state.
use crate::geometry::{Vec2, Viewport};

// ── Viewport & pacing ────────────────────────────────────────────────────────

pub const VIEWPORT_WIDTH: f32 = 1600.0;
pub const VIEWPORT_HEIGHT: f32 = 900.0;
pub const DEFAULT_FPS: u32 = 50;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub viewport: Viewport,

    // Player
    pub player_start: Vec2,
    pub player_size: (f32, f32),
    pub player_speed: f32,
    pub starting_lives: u32,

    // Weapon tiers: score needed for tier 1 and tier 2.
    pub tier_thresholds: [u32; 2],
    pub projectile_speed: f32,

    // Background scroll / boss entrance
    pub scroll_speed: u64,
    pub scroll_period: u64,
    pub scroll_distance: u64,

    // Enemies
    pub enemy_spawn_interval: u64,
    pub enemy_size: (f32, f32),
    pub enemy_speed_x: (i32, i32),
    pub enemy_speed_y: (i32, i32),
    pub enemy_spawn_margin: f32,
    pub enemy_bomb_interval: (u64, u64),
    pub enemy_stop_top: f32,
    pub enemy_stop_bottom_margin: f32,
    pub enemy_bound_right_margin: f32,

    // Bombs
    pub bomb_speed: f32,
    pub bomb_radius: (u32, u32),

    // Boss
    pub boss_size: f32,
    pub boss_speed: f32,
    pub boss_max_x: f32,
    pub boss_hp: u32,
    pub boss_bomb_interval: u64,

    // Drops & scoring
    pub drop_size: f32,
    pub drop_speed: f32,
    pub drop_chance: f64,
    pub enemy_points: u32,
    pub bomb_points: u32,
    pub drop_points: u32,

    // Explosion lifetimes
    pub enemy_explosion_life: i32,
    pub bomb_explosion_life: i32,
    pub explosion_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            viewport: Viewport::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),

            player_start: Vec2::new(900.0, 400.0),
            player_size: (100.0, 100.0),
            player_speed: 10.0,
            starting_lives: 3,

            tier_thresholds: [50, 100],
            projectile_speed: 10.0,

            scroll_speed: 8,
            scroll_period: 3200,
            scroll_distance: 9600,

            enemy_spawn_interval: 200,
            enemy_size: (80.0, 80.0),
            enemy_speed_x: (-10, -6),
            enemy_speed_y: (-6, 6),
            enemy_spawn_margin: 200.0,
            enemy_bomb_interval: (50, 200),
            enemy_stop_top: 50.0,
            enemy_stop_bottom_margin: 200.0,
            enemy_bound_right_margin: 100.0,

            bomb_speed: 6.0,
            bomb_radius: (10, 50),

            boss_size: 200.0,
            boss_speed: 5.0,
            boss_max_x: 1400.0,
            boss_hp: 15,
            boss_bomb_interval: 30,

            drop_size: 15.0,
            drop_speed: 9.0,
            drop_chance: 0.5,
            enemy_points: 10,
            bomb_points: 1,
            drop_points: 10,

            enemy_explosion_life: 100,
            bomb_explosion_life: 50,
            explosion_size: 90.0,
        }
    }
}

impl GameConfig {
    /// Tick at which scrolling stops and the boss arrives.
    pub fn boss_tick(&self) -> u64 {
        self.scroll_distance / self.scroll_speed.max(1)
    }
}
