/// Enemies fly in from the right edge, stop, then bomb the player.
use rand::seq::SliceRandom;
use rand::Rng;

use crate::assets::SpriteId;
use crate::config::GameConfig;
use crate::entities::{Body, BoundsPolicy};
use crate::geometry::{Rect, Vec2};

const ALIEN_SPRITES: [SpriteId; 3] = [SpriteId::Alien1, SpriteId::Alien2, SpriteId::Alien3];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Approaching,
    /// Terminal: stopped and dropping bombs.
    Idle,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub velocity: Vec2,
    /// Center x below which the enemy stops.
    pub bound: f32,
    pub state: EnemyState,
    /// Ticks between bombs once idle.
    pub bomb_interval: u64,
    pub sprite: SpriteId,
}

impl Enemy {
    /// New enemy centred on the right edge at a random height.
    pub fn spawn(config: &GameConfig, rng: &mut impl Rng) -> Self {
        let vp = &config.viewport;
        let margin = config.enemy_spawn_margin as i32;
        let cy = rng.gen_range(margin..=(vp.height as i32 - margin).max(margin));
        let (vx_min, vx_max) = config.enemy_speed_x;
        let (vy_min, vy_max) = config.enemy_speed_y;
        let bound_min = (vp.width / 2.0) as i32;
        let bound_max = (vp.width - config.enemy_bound_right_margin) as i32;
        let (int_min, int_max) = config.enemy_bomb_interval;
        let (w, h) = config.enemy_size;

        Enemy {
            rect: Rect::from_center(Vec2::new(vp.width, cy as f32), w, h),
            velocity: Vec2::new(
                rng.gen_range(vx_min..=vx_max) as f32,
                rng.gen_range(vy_min..=vy_max) as f32,
            ),
            bound: rng.gen_range(bound_min..=bound_max.max(bound_min)) as f32,
            state: EnemyState::Approaching,
            bomb_interval: rng.gen_range(int_min.max(1)..=int_max.max(1)),
            sprite: *ALIEN_SPRITES.choose(rng).unwrap_or(&SpriteId::Alien1),
        }
    }

    /// Check the stop condition, then move.
    ///
    /// The enemy stops once its center passes `bound` or leaves the safe
    /// vertical band. Returns `true` on the tick it goes idle.
    pub fn update(&mut self, config: &GameConfig) -> bool {
        let mut stopped = false;
        if self.state == EnemyState::Approaching && self.should_stop(config) {
            self.velocity = Vec2::ZERO;
            self.state = EnemyState::Idle;
            stopped = true;
        }
        self.advance(&config.viewport);
        stopped
    }

    fn should_stop(&self, config: &GameConfig) -> bool {
        let c = self.rect.center();
        c.x < self.bound
            || c.y < config.enemy_stop_top
            || c.y > config.viewport.height - config.enemy_stop_bottom_margin
    }

    pub fn is_idle(&self) -> bool {
        self.state == EnemyState::Idle
    }

    /// Idle enemies bomb on every multiple of their interval.
    pub fn bombs_on(&self, tick: u64) -> bool {
        self.is_idle() && tick % self.bomb_interval == 0
    }
}

impl Body for Enemy {
    fn rect(&self) -> Rect {
        self.rect
    }
    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }
    fn velocity(&self) -> Vec2 {
        self.velocity
    }
    fn bounds_policy(&self) -> BoundsPolicy {
        BoundsPolicy::Free
    }
}
