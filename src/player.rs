/// The player character: eight-way movement, weapon tiers, firing.
use crate::assets::SpriteId;
use crate::config::GameConfig;
use crate::geometry::{fully_inside, Rect, Vec2, Viewport};
use crate::projectile::Projectile;
use crate::score::Scoreboard;

// ── Input ────────────────────────────────────────────────────────────────────

/// Direction keys currently held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectionKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionKeys {
    /// Sum of the unit steps of every held key; opposite keys cancel.
    pub fn net_step(&self) -> (i8, i8) {
        let mut dx = 0;
        let mut dy = 0;
        if self.up {
            dy -= 1;
        }
        if self.down {
            dy += 1;
        }
        if self.left {
            dx -= 1;
        }
        if self.right {
            dx += 1;
        }
        (dx, dy)
    }
}

// ── Facing ───────────────────────────────────────────────────────────────────

/// One of the eight compass directions. Never `(0, 0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Facing {
    dx: i8,
    dy: i8,
}

impl Facing {
    pub const RIGHT: Facing = Facing { dx: 1, dy: 0 };

    pub fn from_step(dx: i8, dy: i8) -> Option<Facing> {
        if (dx, dy) == (0, 0) || dx.abs() > 1 || dy.abs() > 1 {
            return None;
        }
        Some(Facing { dx, dy })
    }

    pub fn step(&self) -> (i8, i8) {
        (self.dx, self.dy)
    }

    pub fn unit(&self) -> Vec2 {
        Vec2::new(self.dx as f32, self.dy as f32).normalized()
    }

    pub fn is_diagonal(&self) -> bool {
        self.dx != 0 && self.dy != 0
    }

    pub fn sprite(&self) -> SpriteId {
        match (self.dx, self.dy) {
            (1, 0) => SpriteId::PlayerRight,
            (1, -1) => SpriteId::PlayerUpRight,
            (0, -1) => SpriteId::PlayerUp,
            (-1, -1) => SpriteId::PlayerUpLeft,
            (-1, 0) => SpriteId::PlayerLeft,
            (-1, 1) => SpriteId::PlayerDownLeft,
            (0, 1) => SpriteId::PlayerDown,
            _ => SpriteId::PlayerDownRight,
        }
    }
}

impl Default for Facing {
    fn default() -> Self {
        Facing::RIGHT
    }
}

// ── Weapon tiers ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WeaponTier {
    #[default]
    Basic,
    Wide,
    Heavy,
}

impl WeaponTier {
    pub fn from_index(index: u8) -> Option<WeaponTier> {
        match index {
            0 => Some(WeaponTier::Basic),
            1 => Some(WeaponTier::Wide),
            2 => Some(WeaponTier::Heavy),
            _ => None,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            WeaponTier::Basic => 0,
            WeaponTier::Wide => 1,
            WeaponTier::Heavy => 2,
        }
    }
}

/// Which sprite overrides the facing sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayerMood {
    #[default]
    Normal,
    /// Just destroyed an enemy.
    Happy,
    /// Just took a bomb.
    Hit,
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub facing: Facing,
    pub speed: f32,
    pub tier: WeaponTier,
    pub mood: PlayerMood,
    /// Shots requested this frame that have not become projectiles yet.
    pending_shots: u32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let (w, h) = config.player_size;
        Player {
            rect: Rect::from_center(config.player_start, w, h),
            facing: Facing::RIGHT,
            speed: config.player_speed,
            tier: WeaponTier::Basic,
            mood: PlayerMood::Normal,
            pending_shots: 0,
        }
    }

    /// Move by `speed` per held key as one atomic step.
    ///
    /// If the destination is not fully inside the viewport the whole move is
    /// dropped, diagonals included. Facing (and the mood sprite) still follow
    /// a nonzero net step. Returns whether the position changed.
    pub fn move_by(&mut self, keys: DirectionKeys, viewport: &Viewport) -> bool {
        let (dx, dy) = keys.net_step();
        let Some(facing) = Facing::from_step(dx, dy) else {
            return false;
        };
        self.facing = facing;
        self.mood = PlayerMood::Normal;

        let delta = Vec2::new(dx as f32 * self.speed, dy as f32 * self.speed);
        let moved = self.rect.translated(delta);
        if !fully_inside(&moved, viewport) {
            return false;
        }
        self.rect = moved;
        true
    }

    /// Switch weapon tier if the score allows it. Tier 0 is always allowed.
    ///
    /// A successful switch resets the shot queue.
    pub fn set_weapon_tier(&mut self, tier: WeaponTier, scoreboard: &Scoreboard) -> bool {
        if !scoreboard.can_unlock(tier) {
            tracing::debug!(
                tier = tier.index(),
                score = scoreboard.score,
                "weapon tier locked"
            );
            return false;
        }
        self.tier = tier;
        self.pending_shots = 0;
        true
    }

    pub fn queue_shot(&mut self) {
        self.pending_shots += 1;
    }

    pub fn pending_shots(&self) -> u32 {
        self.pending_shots
    }

    /// Turn every queued shot into a projectile.
    pub fn release_shots(&mut self, config: &GameConfig) -> Vec<Projectile> {
        let shots = std::mem::take(&mut self.pending_shots);
        (0..shots).map(|_| self.fire(config)).collect()
    }

    /// One projectile of the current tier along the current facing.
    pub fn fire(&self, config: &GameConfig) -> Projectile {
        Projectile::launch(&self.rect, self.facing, self.tier, config)
    }

    pub fn sprite(&self) -> SpriteId {
        match self.mood {
            PlayerMood::Normal => self.facing.sprite(),
            PlayerMood::Happy => SpriteId::PlayerHappy,
            PlayerMood::Hit => SpriteId::PlayerHit,
        }
    }
}
