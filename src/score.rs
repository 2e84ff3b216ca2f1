/// Score and remaining lives.
use crate::player::WeaponTier;

#[derive(Clone, Debug, PartialEq)]
pub struct Scoreboard {
    pub score: u32,
    pub lives: u32,
    /// Score needed to unlock tier 1 and tier 2.
    thresholds: [u32; 2],
}

/// Result of taking a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeLoss {
    Survived { remaining: u32 },
    /// Lives just reached zero. Reported once; later calls return `AlreadyOut`.
    GameOver,
    AlreadyOut,
}

impl Scoreboard {
    pub fn new(lives: u32, thresholds: [u32; 2]) -> Self {
        Scoreboard {
            score: 0,
            lives,
            thresholds,
        }
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn decrement_life(&mut self) -> LifeLoss {
        if self.lives == 0 {
            return LifeLoss::AlreadyOut;
        }
        self.lives -= 1;
        if self.lives == 0 {
            LifeLoss::GameOver
        } else {
            LifeLoss::Survived {
                remaining: self.lives,
            }
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    pub fn threshold(&self, tier: WeaponTier) -> u32 {
        match tier {
            WeaponTier::Basic => 0,
            WeaponTier::Wide => self.thresholds[0],
            WeaponTier::Heavy => self.thresholds[1],
        }
    }

    pub fn can_unlock(&self, tier: WeaponTier) -> bool {
        self.score >= self.threshold(tier)
    }
}
