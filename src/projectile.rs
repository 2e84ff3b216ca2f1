/// Player beams.
use crate::assets::SpriteId;
use crate::boss::Boss;
use crate::config::GameConfig;
use crate::entities::{Body, BoundsPolicy};
use crate::geometry::{Rect, Vec2, Viewport};
use crate::player::{Facing, WeaponTier};

#[derive(Clone, Debug)]
pub struct Projectile {
    pub rect: Rect,
    /// Unit vector.
    pub direction: Vec2,
    pub speed: f32,
    pub tier: WeaponTier,
}

/// Outcome of one projectile update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flight {
    Flying,
    Exited,
    /// Struck a boss, which has `remaining_hp` left.
    HitBoss { remaining_hp: u32 },
}

/// Beam box when fired horizontally.
pub fn beam_size(tier: WeaponTier) -> (f32, f32) {
    match tier {
        WeaponTier::Basic => (60.0, 20.0),
        WeaponTier::Wide => (40.0, 40.0),
        WeaponTier::Heavy => (80.0, 40.0),
    }
}

impl Projectile {
    /// Spawn one body-length ahead of `shooter` along `facing`.
    pub fn launch(shooter: &Rect, facing: Facing, tier: WeaponTier, config: &GameConfig) -> Self {
        let direction = facing.unit();
        let (w, h) = beam_size(tier);
        let (w, h) = if facing.is_diagonal() {
            // Bounding box of the sprite rotated by 45°.
            let side = (w + h) * std::f32::consts::FRAC_1_SQRT_2;
            (side, side)
        } else if facing.step().0 == 0 {
            (h, w)
        } else {
            (w, h)
        };
        let origin = shooter.center();
        let center = Vec2::new(
            origin.x + shooter.w * direction.x,
            origin.y + shooter.h * direction.y,
        );
        Projectile {
            rect: Rect::from_center(center, w, h),
            direction,
            speed: config.projectile_speed,
            tier,
        }
    }

    /// Move, drop out if the beam left the viewport, then test the bosses.
    ///
    /// Only the first live boss struck takes damage.
    pub fn update(&mut self, viewport: &Viewport, bosses: &mut [Boss]) -> Flight {
        if !self.advance(viewport) {
            return Flight::Exited;
        }
        match bosses.iter_mut().find(|b| !b.is_defeated() && b.rect.overlaps(&self.rect)) {
            Some(boss) => Flight::HitBoss {
                remaining_hp: boss.damage(),
            },
            None => Flight::Flying,
        }
    }

    pub fn sprite(&self) -> SpriteId {
        match self.tier {
            WeaponTier::Basic => SpriteId::Beam,
            WeaponTier::Wide => SpriteId::Beam1,
            WeaponTier::Heavy => SpriteId::Beam2,
        }
    }
}

impl Body for Projectile {
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
