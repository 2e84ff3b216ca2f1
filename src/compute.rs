/// Frame-stepped game logic.
///
/// `tick` advances a `GameState` by exactly one frame, in a fixed order, and
/// reports what happened plus what to draw. All randomness comes through the
/// injected RNG so callers control determinism (tests use a seeded RNG).
use rand::Rng;

use crate::assets::SpriteId;
use crate::boss::{Boss, BossUpdate};
use crate::config::GameConfig;
use crate::draw::{DrawRequest, Drawable};
use crate::enemy::Enemy;
use crate::entities::{remove_touching, Body, Bomb, Explosion, GameStatus, Pickup};
use crate::player::{DirectionKeys, Player, PlayerMood, WeaponTier};
use crate::projectile::{Flight, Projectile};
use crate::score::{LifeLoss, Scoreboard};

// ── Input & reporting ────────────────────────────────────────────────────────

/// One-shot commands, applied in the order they were received.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Fire,
    SelectTier(WeaponTier),
    Quit,
}

#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    pub held: DirectionKeys,
    pub commands: Vec<Command>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    TierChanged(WeaponTier),
    TierLocked(WeaponTier),
    Fired(WeaponTier),
    EnemySpawned,
    EnemyIdle,
    EnemyDestroyed,
    PickupDropped,
    BombShot,
    PlayerHit { lives: u32 },
    GameOver { score: u32 },
    BossArrived,
    PickupCollected,
    BossHit { remaining_hp: u32 },
    BossDefeated,
    Quit,
}

#[derive(Clone, Debug)]
pub struct TickReport {
    pub status: GameStatus,
    pub events: Vec<GameEvent>,
    pub draws: Vec<DrawRequest>,
}

// ── State ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub explosions: Vec<Explosion>,
    pub pickups: Vec<Pickup>,
    /// Zero or one boss.
    pub bosses: Vec<Boss>,
    pub scoreboard: Scoreboard,
    pub status: GameStatus,
    pub tick: u64,
}

pub fn init_state(config: GameConfig) -> GameState {
    GameState {
        player: Player::new(&config),
        projectiles: Vec::new(),
        enemies: Vec::new(),
        bombs: Vec::new(),
        explosions: Vec::new(),
        pickups: Vec::new(),
        bosses: Vec::new(),
        scoreboard: Scoreboard::new(config.starting_lives, config.tier_thresholds),
        status: GameStatus::Playing,
        tick: 0,
        config,
    }
}

// ── Collision sweep ──────────────────────────────────────────────────────────

/// Pairs members of `a` with the members of `b` they overlap, in order.
///
/// Each member of `a` consumes every still-unconsumed member of `b` touching
/// it; a consumed `b` is skipped by later members of `a`, so one beam is used
/// up by one target. Nothing is removed while scanning.
pub fn sweep<A: Body, B: Body>(a: &[A], b: &[B]) -> (Vec<bool>, Vec<bool>) {
    let mut hit_a = vec![false; a.len()];
    let mut hit_b = vec![false; b.len()];
    for (ia, item_a) in a.iter().enumerate() {
        let ra = item_a.rect();
        for (ib, item_b) in b.iter().enumerate() {
            if !hit_b[ib] && ra.overlaps(&item_b.rect()) {
                hit_a[ia] = true;
                hit_b[ib] = true;
            }
        }
    }
    (hit_a, hit_b)
}

/// Moves the marked members out of `group`, preserving order on both sides.
fn take_marked<T>(group: &mut Vec<T>, marks: &[bool]) -> Vec<T> {
    let mut kept = Vec::with_capacity(group.len());
    let mut taken = Vec::new();
    for (item, &marked) in group.drain(..).zip(marks) {
        if marked {
            taken.push(item);
        } else {
            kept.push(item);
        }
    }
    *group = kept;
    taken
}

// ── Background ───────────────────────────────────────────────────────────────

/// Scrolling backdrop while the stage runs, a still one once the boss is due.
pub fn backdrop(tick: u64, config: &GameConfig) -> Vec<DrawRequest> {
    let travelled = tick * config.scroll_speed;
    if travelled >= config.scroll_distance {
        return vec![DrawRequest::Backdrop {
            id: SpriteId::Background,
            x: 0.0,
        }];
    }
    let x = (travelled % config.scroll_period.max(1)) as f32;
    let w = config.viewport.width;
    vec![
        DrawRequest::Backdrop {
            id: SpriteId::Background,
            x: -x,
        },
        DrawRequest::Backdrop {
            id: SpriteId::BackgroundFlipped,
            x: w - x,
        },
        DrawRequest::Backdrop {
            id: SpriteId::Background,
            x: 2.0 * w - x,
        },
    ]
}

// ── Phases ───────────────────────────────────────────────────────────────────
//
// Each phase mutates the state in place and appends what happened to `events`.
// `tick` runs them in order; they are public so a single pass can be checked
// in isolation.

/// Apply quit / tier / fire commands in order, then release queued shots.
///
/// Shots queued before a tier change leave at the tier they were fired with.
/// Returns `false` if a quit command was seen.
pub fn apply_commands(state: &mut GameState, commands: &[Command], events: &mut Vec<GameEvent>) -> bool {
    for command in commands {
        match *command {
            Command::Quit => {
                tracing::info!(tick = state.tick, score = state.scoreboard.score, "quit requested");
                state.status = GameStatus::Quit;
                events.push(GameEvent::Quit);
                return false;
            }
            Command::SelectTier(tier) => {
                release_shots(state, events);
                if state.player.set_weapon_tier(tier, &state.scoreboard) {
                    events.push(GameEvent::TierChanged(tier));
                } else {
                    events.push(GameEvent::TierLocked(tier));
                }
            }
            Command::Fire => state.player.queue_shot(),
        }
    }
    release_shots(state, events);
    true
}

fn release_shots(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for shot in state.player.release_shots(&state.config) {
        events.push(GameEvent::Fired(shot.tier));
        state.projectiles.push(shot);
    }
}

/// A new enemy every `enemy_spawn_interval` ticks, then bombs from idle ones.
pub fn spawn_enemies(state: &mut GameState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    let now = state.tick;
    let config = &state.config;

    if now % config.enemy_spawn_interval.max(1) == 0 {
        let enemy = Enemy::spawn(config, rng);
        tracing::debug!(
            tick = now,
            y = enemy.rect.center().y,
            bound = enemy.bound,
            interval = enemy.bomb_interval,
            "enemy spawned"
        );
        state.enemies.push(enemy);
        events.push(GameEvent::EnemySpawned);
    }

    for enemy in state.enemies.iter().filter(|e| e.bombs_on(now)) {
        state
            .bombs
            .push(Bomb::aimed(&enemy.rect, &state.player.rect, config, rng));
    }
}

/// Projectiles ↔ enemies: both sides removed on contact.
pub fn resolve_enemy_hits(state: &mut GameState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    let config = &state.config;
    let (enemy_hits, beam_hits) = sweep(state.enemies.as_slice(), state.projectiles.as_slice());
    let destroyed = take_marked(&mut state.enemies, &enemy_hits);
    take_marked(&mut state.projectiles, &beam_hits);

    for enemy in destroyed {
        let center = enemy.rect.center();
        state.explosions.push(Explosion::at(
            center,
            config.enemy_explosion_life,
            config.explosion_size,
        ));
        state.scoreboard.add_score(config.enemy_points);
        state.player.mood = PlayerMood::Happy;
        events.push(GameEvent::EnemyDestroyed);
        tracing::debug!(tick = state.tick, score = state.scoreboard.score, "enemy destroyed");
        if rng.gen_bool(config.drop_chance) {
            state.pickups.push(Pickup::at(center, config));
            events.push(GameEvent::PickupDropped);
        }
    }
}

/// Projectiles ↔ bombs: both sides removed on contact.
pub fn resolve_bomb_hits(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let config = &state.config;
    let (bomb_hits, beam_hits) = sweep(state.bombs.as_slice(), state.projectiles.as_slice());
    let shot_down = take_marked(&mut state.bombs, &bomb_hits);
    take_marked(&mut state.projectiles, &beam_hits);

    for bomb in shot_down {
        state.explosions.push(Explosion::at(
            bomb.rect.center(),
            config.bomb_explosion_life,
            config.explosion_size,
        ));
        state.scoreboard.add_score(config.bomb_points);
        events.push(GameEvent::BombShot);
    }
}

/// Bombs ↔ player: touching bombs are removed and cost one life in total.
/// Returns `false` once the last life is gone.
pub fn resolve_player_hits(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if remove_touching(&mut state.bombs, &state.player.rect) == 0 {
        return true;
    }
    state.player.mood = PlayerMood::Hit;
    match state.scoreboard.decrement_life() {
        LifeLoss::Survived { remaining } => {
            tracing::info!(tick = state.tick, lives = remaining, "player hit");
            events.push(GameEvent::PlayerHit { lives: remaining });
            true
        }
        LifeLoss::GameOver | LifeLoss::AlreadyOut => {
            let score = state.scoreboard.score;
            tracing::info!(tick = state.tick, score, "game over");
            state.status = GameStatus::GameOver;
            events.push(GameEvent::PlayerHit { lives: 0 });
            events.push(GameEvent::GameOver { score });
            false
        }
    }
}

/// The boss arrives on the tick the scroll distance is covered.
pub fn spawn_boss(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.tick == state.config.boss_tick() {
        tracing::info!(tick = state.tick, hp = state.config.boss_hp, "boss arrived");
        state.bosses.push(Boss::spawn(&state.config));
        events.push(GameEvent::BossArrived);
    }
}

/// Pickups ↔ player.
pub fn collect_pickups(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let collected = remove_touching(&mut state.pickups, &state.player.rect);
    for _ in 0..collected {
        state.scoreboard.add_score(state.config.drop_points);
        events.push(GameEvent::PickupCollected);
    }
}

/// Move every entity one step and queue its draw request: boss, player,
/// projectiles, enemies, bombs, explosions, HUD, pickups.
pub fn update_and_draw(
    state: &mut GameState,
    held: DirectionKeys,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
    draws: &mut Vec<DrawRequest>,
) {
    let GameState {
        config,
        player,
        projectiles,
        enemies,
        bombs,
        explosions,
        pickups,
        bosses,
        scoreboard,
        tick: now,
        ..
    } = state;
    let config: &GameConfig = config;
    let now = *now;
    let viewport = config.viewport;

    let target = player.rect;
    bosses.retain_mut(|boss| match boss.update(now, &target, config, rng) {
        BossUpdate::Defeated => {
            tracing::info!(tick = now, bombs = boss.bombs_dropped, "boss defeated");
            events.push(GameEvent::BossDefeated);
            false
        }
        BossUpdate::Active { bomb } => {
            bombs.extend(bomb);
            draws.push(boss.draw_request());
            true
        }
    });

    player.move_by(held, &viewport);
    draws.push(player.draw_request());

    projectiles.retain_mut(|beam| match beam.update(&viewport, bosses) {
        Flight::Flying => {
            draws.push(beam.draw_request());
            true
        }
        Flight::Exited => false,
        Flight::HitBoss { remaining_hp } => {
            tracing::debug!(tick = now, remaining_hp, "boss hit");
            events.push(GameEvent::BossHit { remaining_hp });
            false
        }
    });

    for enemy in enemies.iter_mut() {
        if enemy.update(config) {
            events.push(GameEvent::EnemyIdle);
        }
        draws.push(enemy.draw_request());
    }

    bombs.retain_mut(|bomb| {
        let alive = bomb.advance(&viewport);
        if alive {
            draws.push(bomb.draw_request());
        }
        alive
    });

    explosions.retain_mut(|explosion| {
        let alive = explosion.update();
        if alive {
            draws.push(explosion.draw_request());
        }
        alive
    });

    draws.push(hud(scoreboard, player, bosses));

    pickups.retain_mut(|pickup| {
        let alive = pickup.advance(&viewport);
        if alive {
            draws.push(pickup.draw_request());
        }
        alive
    });
}

fn hud(scoreboard: &Scoreboard, player: &Player, bosses: &[Boss]) -> DrawRequest {
    DrawRequest::Hud {
        score: scoreboard.score,
        lives: scoreboard.lives,
        tier: player.tier,
        boss_hp: bosses.first().map(|b| b.hp),
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the game by one frame.
///
/// Once the game is over (or quit) this is a no-op that reports the terminal
/// status again.
pub fn tick(state: &mut GameState, input: &FrameInput, rng: &mut impl Rng) -> TickReport {
    let mut events = Vec::new();
    let mut draws = Vec::new();

    if state.status != GameStatus::Playing {
        return TickReport {
            status: state.status,
            events,
            draws,
        };
    }

    // 1. Commands
    if !apply_commands(state, &input.commands, &mut events) {
        return TickReport {
            status: state.status,
            events,
            draws,
        };
    }

    // 2. Background
    draws.extend(backdrop(state.tick, &state.config));

    // 3–4. Enemy spawn, idle-enemy bombs
    spawn_enemies(state, rng, &mut events);

    // 5–6. Projectiles against enemies, then against bombs
    resolve_enemy_hits(state, rng, &mut events);
    resolve_bomb_hits(state, &mut events);

    // 7. Bombs against the player; the frame ends here on game over
    if !resolve_player_hits(state, &mut events) {
        draws.push(state.player.draw_request());
        draws.push(DrawRequest::GameOver {
            score: state.scoreboard.score,
        });
        draws.push(hud(&state.scoreboard, &state.player, &state.bosses));
        return TickReport {
            status: state.status,
            events,
            draws,
        };
    }

    // 8–9. Boss entrance, pickups
    spawn_boss(state, &mut events);
    collect_pickups(state, &mut events);

    // 10. Update & draw
    update_and_draw(state, input.held, rng, &mut events, &mut draws);

    // 11. Advance
    state.tick += 1;

    TickReport {
        status: state.status,
        events,
        draws,
    }
}
