/// Shared entity contract plus the small entity kinds (bombs, pickups,
/// explosions) that carry no state machine of their own.
use rand::seq::SliceRandom;
use rand::Rng;

use crate::assets::{SpriteId, Tint};
use crate::config::GameConfig;
use crate::geometry::{direction_to, fully_inside, Rect, Vec2, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
    Quit,
}

// ── Moving entity contract ───────────────────────────────────────────────────

/// What happens to a body whose box crosses the viewport edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundsPolicy {
    /// Removed as soon as any edge leaves the viewport.
    RemoveOnExit,
    /// Pushed back fully inside the viewport.
    Clamp,
    /// No bounds handling (enemies enter from beyond the right edge).
    Free,
}

pub trait Body {
    fn rect(&self) -> Rect;
    fn rect_mut(&mut self) -> &mut Rect;
    fn velocity(&self) -> Vec2;
    fn bounds_policy(&self) -> BoundsPolicy;

    /// Apply one tick of linear motion.
    ///
    /// Returns `false` when the body left the viewport and must be removed.
    fn advance(&mut self, viewport: &Viewport) -> bool {
        let velocity = self.velocity();
        self.rect_mut().translate(velocity);
        match self.bounds_policy() {
            BoundsPolicy::RemoveOnExit => fully_inside(&self.rect(), viewport),
            BoundsPolicy::Clamp => {
                viewport.clamp(self.rect_mut());
                true
            }
            BoundsPolicy::Free => true,
        }
    }
}

/// Removes every body whose box overlaps `target`, returning the count.
pub fn remove_touching<B: Body>(group: &mut Vec<B>, target: &Rect) -> usize {
    let before = group.len();
    group.retain(|b| !b.rect().overlaps(target));
    before - group.len()
}

// ── Bombs ────────────────────────────────────────────────────────────────────

pub const BOMB_TINTS: [Tint; 6] = [
    Tint::Red,
    Tint::Green,
    Tint::Blue,
    Tint::Yellow,
    Tint::Magenta,
    Tint::Cyan,
];

#[derive(Clone, Debug)]
pub struct Bomb {
    pub rect: Rect,
    /// Unit vector fixed at creation.
    pub direction: Vec2,
    pub speed: f32,
    /// Cosmetic only.
    pub radius: u32,
    pub tint: Tint,
}

impl Bomb {
    /// Bomb released from the bottom-center of `dropper`, aimed at `target`.
    pub fn aimed(dropper: &Rect, target: &Rect, config: &GameConfig, rng: &mut impl Rng) -> Self {
        let (min_r, max_r) = config.bomb_radius;
        let radius = rng.gen_range(min_r..=max_r);
        let tint = *BOMB_TINTS.choose(rng).unwrap_or(&Tint::Red);
        let size = 2.0 * radius as f32;
        let origin = dropper.center();
        let center = Vec2::new(origin.x, origin.y + dropper.h / 2.0);
        Bomb {
            rect: Rect::from_center(center, size, size),
            direction: direction_to(dropper, target),
            speed: config.bomb_speed,
            radius,
            tint,
        }
    }
}

impl Body for Bomb {
    fn rect(&self) -> Rect {
        self.rect
    }
    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }
    fn velocity(&self) -> Vec2 {
        self.direction.scaled(self.speed)
    }
    fn bounds_policy(&self) -> BoundsPolicy {
        BoundsPolicy::RemoveOnExit
    }
}

// ── Pickups ────────────────────────────────────────────────────────────────────

/// Score pickup left behind by a destroyed enemy.
#[derive(Clone, Debug)]
pub struct Pickup {
    pub rect: Rect,
    pub speed: f32,
}

impl Pickup {
    pub fn at(center: Vec2, config: &GameConfig) -> Self {
        Pickup {
            rect: Rect::from_center(center, config.drop_size, config.drop_size),
            speed: config.drop_speed,
        }
    }
}

impl Body for Pickup {
    fn rect(&self) -> Rect {
        self.rect
    }
    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }
    fn velocity(&self) -> Vec2 {
        Vec2::new(-self.speed, 0.0)
    }
    fn bounds_policy(&self) -> BoundsPolicy {
        BoundsPolicy::RemoveOnExit
    }
}

// ── Explosions ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Explosion {
    pub rect: Rect,
    /// Remaining ticks; removed once it drops below zero.
    pub life: i32,
}

impl Explosion {
    pub fn at(center: Vec2, life: i32, size: f32) -> Self {
        Explosion {
            rect: Rect::from_center(center, size, size),
            life,
        }
    }

    /// Count down one tick. Returns `false` once expired.
    pub fn update(&mut self) -> bool {
        self.life -= 1;
        self.life >= 0
    }

    /// Alternates between the two frames every 10 ticks.
    pub fn sprite(&self) -> SpriteId {
        if (self.life / 10) % 2 == 0 {
            SpriteId::Explosion
        } else {
            SpriteId::ExplosionFlipped
        }
    }
}
