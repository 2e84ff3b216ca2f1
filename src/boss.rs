/// The boss: arrives once scrolling ends, bobs up and down, and bombs the
/// player until its hit points run out.
use rand::Rng;

use crate::assets::SpriteId;
use crate::config::GameConfig;
use crate::entities::{Body, BoundsPolicy, Bomb};
use crate::geometry::{Rect, Vec2};

#[derive(Clone, Debug)]
pub struct Boss {
    pub rect: Rect,
    /// Signed; flips when the boss reaches the top or bottom edge.
    pub vertical_speed: f32,
    pub approach_speed: f32,
    /// The boss stops advancing once its left edge reaches this x.
    pub max_x: f32,
    pub hp: u32,
    pub bombs_dropped: u32,
}

#[derive(Debug)]
pub enum BossUpdate {
    Active { bomb: Option<Bomb> },
    /// HP is zero; the caller removes the boss.
    Defeated,
}

impl Boss {
    /// Just beyond the right edge, vertically centred.
    pub fn spawn(config: &GameConfig) -> Self {
        let size = config.boss_size;
        let vp = &config.viewport;
        Boss {
            rect: Rect::from_center(Vec2::new(vp.width + size / 2.0, vp.height / 2.0), size, size),
            vertical_speed: config.boss_speed,
            approach_speed: config.boss_speed.abs(),
            max_x: config.boss_max_x,
            hp: config.boss_hp,
            bombs_dropped: 0,
        }
    }

    /// Take one hit. Returns the remaining HP.
    pub fn damage(&mut self) -> u32 {
        self.hp = self.hp.saturating_sub(1);
        self.hp
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    pub fn update(&mut self, tick: u64, target: &Rect, config: &GameConfig, rng: &mut impl Rng) -> BossUpdate {
        if self.is_defeated() {
            return BossUpdate::Defeated;
        }

        let vp = &config.viewport;
        let heading = self.vertical_speed;
        self.advance(vp);
        if (heading < 0.0 && self.rect.top() <= 0.0) || (heading > 0.0 && self.rect.bottom() >= vp.height) {
            self.vertical_speed = -self.vertical_speed;
        }

        let bomb = if tick % config.boss_bomb_interval.max(1) == 0 {
            self.bombs_dropped += 1;
            Some(Bomb::aimed(&self.rect, target, config, rng))
        } else {
            None
        };
        BossUpdate::Active { bomb }
    }

    pub fn sprite(&self) -> SpriteId {
        SpriteId::Boss
    }
}

impl Body for Boss {
    fn rect(&self) -> Rect {
        self.rect
    }
    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }
    /// Leftward until `max_x`, never overshooting it.
    fn velocity(&self) -> Vec2 {
        let overshoot = self.rect.left() - self.max_x;
        let vx = if overshoot > 0.0 {
            -self.approach_speed.min(overshoot)
        } else {
            0.0
        };
        Vec2::new(vx, self.vertical_speed)
    }
    fn bounds_policy(&self) -> BoundsPolicy {
        BoundsPolicy::Clamp
    }
}
