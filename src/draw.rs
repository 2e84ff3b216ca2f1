/// Draw requests: the only thing the core hands to a renderer.
use crate::assets::{SpriteId, Tint};
use crate::boss::Boss;
use crate::enemy::Enemy;
use crate::entities::{Bomb, Explosion, Pickup};
use crate::geometry::{Rect, Vec2};
use crate::player::{Player, WeaponTier};
use crate::projectile::Projectile;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawRequest {
    /// Full-viewport background tile with its left edge at `x`.
    Backdrop { id: SpriteId, x: f32 },
    Sprite { id: SpriteId, rect: Rect },
    Circle { center: Vec2, radius: u32, tint: Tint },
    Hud {
        score: u32,
        lives: u32,
        tier: WeaponTier,
        boss_hp: Option<u32>,
    },
    GameOver { score: u32 },
}

pub trait Drawable {
    fn draw_request(&self) -> DrawRequest;
}

impl Drawable for Player {
    fn draw_request(&self) -> DrawRequest {
        DrawRequest::Sprite {
            id: self.sprite(),
            rect: self.rect,
        }
    }
}

impl Drawable for Projectile {
    fn draw_request(&self) -> DrawRequest {
        DrawRequest::Sprite {
            id: self.sprite(),
            rect: self.rect,
        }
    }
}

impl Drawable for Enemy {
    fn draw_request(&self) -> DrawRequest {
        DrawRequest::Sprite {
            id: self.sprite,
            rect: self.rect,
        }
    }
}

impl Drawable for Boss {
    fn draw_request(&self) -> DrawRequest {
        DrawRequest::Sprite {
            id: self.sprite(),
            rect: self.rect,
        }
    }
}

impl Drawable for Bomb {
    fn draw_request(&self) -> DrawRequest {
        DrawRequest::Circle {
            center: self.rect.center(),
            radius: self.radius,
            tint: self.tint,
        }
    }
}

impl Drawable for Pickup {
    fn draw_request(&self) -> DrawRequest {
        DrawRequest::Sprite {
            id: SpriteId::Pickup,
            rect: self.rect,
        }
    }
}

impl Drawable for Explosion {
    fn draw_request(&self) -> DrawRequest {
        DrawRequest::Sprite {
            id: self.sprite(),
            rect: self.rect,
        }
    }
}
