use kokaton_shooter::assets::{SpriteId, Tint};
use kokaton_shooter::boss::Boss;
use kokaton_shooter::compute::*;
use kokaton_shooter::config::GameConfig;
use kokaton_shooter::draw::DrawRequest;
use kokaton_shooter::enemy::{Enemy, EnemyState};
use kokaton_shooter::entities::{Bomb, Explosion, GameStatus, Pickup};
use kokaton_shooter::geometry::{Rect, Vec2};
use kokaton_shooter::player::{DirectionKeys, PlayerMood, WeaponTier};
use kokaton_shooter::projectile::Projectile;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_state() -> GameState {
    init_state(GameConfig::default())
}

/// A state one tick in, so the tick-0 enemy spawn does not interfere.
fn quiet_state() -> GameState {
    let mut s = make_state();
    s.tick = 1;
    s
}

fn no_input() -> FrameInput {
    FrameInput::default()
}

fn commands(list: &[Command]) -> FrameInput {
    FrameInput {
        held: DirectionKeys::default(),
        commands: list.to_vec(),
    }
}

fn beam_at(center: Vec2) -> Projectile {
    Projectile {
        rect: Rect::from_center(center, 60.0, 20.0),
        direction: Vec2::new(1.0, 0.0),
        speed: 10.0,
        tier: WeaponTier::Basic,
    }
}

fn idle_enemy_at(center: Vec2) -> Enemy {
    Enemy {
        rect: Rect::from_center(center, 80.0, 80.0),
        velocity: Vec2::ZERO,
        bound: 800.0,
        state: EnemyState::Idle,
        bomb_interval: 50,
        sprite: SpriteId::Alien1,
    }
}

fn still_bomb_at(center: Vec2) -> Bomb {
    Bomb {
        rect: Rect::from_center(center, 20.0, 20.0),
        direction: Vec2::ZERO,
        speed: 6.0,
        radius: 10,
        tint: Tint::Yellow,
    }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_defaults() {
    let s = make_state();
    assert_eq!(s.tick, 0);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.scoreboard.score, 0);
    assert_eq!(s.scoreboard.lives, 3);
    assert_eq!(s.player.rect.center(), Vec2::new(900.0, 400.0));
    assert!(s.enemies.is_empty());
    assert!(s.projectiles.is_empty());
    assert!(s.bombs.is_empty());
    assert!(s.bosses.is_empty());
}

#[test]
fn first_tick_spawns_an_enemy() {
    let mut s = make_state();
    let report = tick(&mut s, &no_input(), &mut seeded_rng());
    assert_eq!(report.status, GameStatus::Playing);
    assert!(report.events.contains(&GameEvent::EnemySpawned));
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.tick, 1);
    assert!(report.draws.contains(&DrawRequest::Hud {
        score: 0,
        lives: 3,
        tier: WeaponTier::Basic,
        boss_hp: None,
    }));
}

#[test]
fn enemies_spawn_every_interval() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    let mut spawned = 0;
    // Keep the player out of harm's way
    s.player.rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    for _ in 0..=400 {
        s.bombs.clear();
        let report = tick(&mut s, &no_input(), &mut rng);
        spawned += report
            .events
            .iter()
            .filter(|e| **e == GameEvent::EnemySpawned)
            .count();
    }
    assert_eq!(spawned, 3);
}

// ── Projectiles vs enemies ────────────────────────────────────────────────────

#[test]
fn beam_destroys_enemy() {
    let mut s = quiet_state();
    s.enemies.push(idle_enemy_at(Vec2::new(700.0, 450.0)));
    s.projectiles.push(beam_at(Vec2::new(680.0, 450.0)));
    let mut events = Vec::new();

    resolve_enemy_hits(&mut s, &mut seeded_rng(), &mut events);

    assert!(s.enemies.is_empty());
    assert!(s.projectiles.is_empty());
    assert_eq!(s.scoreboard.score, 10);
    assert_eq!(s.explosions.len(), 1);
    assert_eq!(s.explosions[0].life, 100);
    assert_eq!(s.explosions[0].rect.center(), Vec2::new(700.0, 450.0));
    assert_eq!(s.player.mood, PlayerMood::Happy);
    assert!(events.contains(&GameEvent::EnemyDestroyed));
}

#[test]
fn beam_is_spent_on_first_enemy() {
    let mut s = quiet_state();
    s.enemies.push(idle_enemy_at(Vec2::new(700.0, 450.0)));
    s.enemies.push(idle_enemy_at(Vec2::new(740.0, 450.0)));
    s.enemies.push(idle_enemy_at(Vec2::new(300.0, 200.0)));
    s.projectiles.push(beam_at(Vec2::new(720.0, 450.0)));
    let mut events = Vec::new();

    resolve_enemy_hits(&mut s, &mut seeded_rng(), &mut events);

    assert_eq!(s.enemies.len(), 2);
    assert_eq!(s.enemies[0].rect.center(), Vec2::new(740.0, 450.0));
    assert!(s.projectiles.is_empty());
    assert_eq!(s.scoreboard.score, 10);
    assert_eq!(s.explosions.len(), 1);
}

#[test]
fn enemy_hit_by_two_beams_consumes_both() {
    let mut s = quiet_state();
    s.enemies.push(idle_enemy_at(Vec2::new(700.0, 450.0)));
    s.projectiles.push(beam_at(Vec2::new(680.0, 450.0)));
    s.projectiles.push(beam_at(Vec2::new(700.0, 430.0)));
    let mut events = Vec::new();

    resolve_enemy_hits(&mut s, &mut seeded_rng(), &mut events);

    assert!(s.enemies.is_empty());
    assert!(s.projectiles.is_empty());
    assert_eq!(s.scoreboard.score, 10);
}

#[test]
fn certain_drop_chance_always_leaves_pickup() {
    let mut cfg = GameConfig::default();
    cfg.drop_chance = 1.0;
    let mut s = init_state(cfg);
    s.enemies.push(idle_enemy_at(Vec2::new(700.0, 450.0)));
    s.projectiles.push(beam_at(Vec2::new(680.0, 450.0)));
    let mut events = Vec::new();

    resolve_enemy_hits(&mut s, &mut seeded_rng(), &mut events);

    assert_eq!(s.pickups.len(), 1);
    assert_eq!(s.pickups[0].rect.center(), Vec2::new(700.0, 450.0));
    assert!(events.contains(&GameEvent::PickupDropped));
}

#[test]
fn zero_drop_chance_never_leaves_pickup() {
    let mut cfg = GameConfig::default();
    cfg.drop_chance = 0.0;
    let mut s = init_state(cfg);
    let mut rng = seeded_rng();
    for _ in 0..20 {
        s.enemies.push(idle_enemy_at(Vec2::new(700.0, 450.0)));
        s.projectiles.push(beam_at(Vec2::new(680.0, 450.0)));
        let mut events = Vec::new();
        resolve_enemy_hits(&mut s, &mut rng, &mut events);
    }
    assert!(s.pickups.is_empty());
    assert_eq!(s.scoreboard.score, 200);
}

#[test]
fn sweep_marks_both_sides() {
    let enemies = vec![
        idle_enemy_at(Vec2::new(100.0, 100.0)),
        idle_enemy_at(Vec2::new(500.0, 500.0)),
    ];
    let beams = vec![
        beam_at(Vec2::new(500.0, 500.0)),
        beam_at(Vec2::new(1000.0, 100.0)),
    ];
    let (hit_enemies, hit_beams) = sweep(enemies.as_slice(), beams.as_slice());
    assert_eq!(hit_enemies, vec![false, true]);
    assert_eq!(hit_beams, vec![true, false]);
}

#[test]
fn sweep_skips_consumed_members() {
    let enemies = vec![
        idle_enemy_at(Vec2::new(500.0, 500.0)),
        idle_enemy_at(Vec2::new(520.0, 500.0)),
    ];
    let beams = vec![beam_at(Vec2::new(510.0, 500.0))];
    let (hit_enemies, hit_beams) = sweep(enemies.as_slice(), beams.as_slice());
    assert_eq!(hit_enemies, vec![true, false]);
    assert_eq!(hit_beams, vec![true]);
}

// ── Projectiles vs bombs ──────────────────────────────────────────────────────

#[test]
fn shooting_a_bomb_scores_one() {
    let mut s = quiet_state();
    s.bombs.push(still_bomb_at(Vec2::new(700.0, 450.0)));
    s.projectiles.push(beam_at(Vec2::new(690.0, 450.0)));
    let mut events = Vec::new();

    resolve_bomb_hits(&mut s, &mut events);

    assert!(s.bombs.is_empty());
    assert!(s.projectiles.is_empty());
    assert_eq!(s.scoreboard.score, 1);
    assert_eq!(s.explosions.len(), 1);
    assert_eq!(s.explosions[0].life, 50);
    assert_eq!(events, vec![GameEvent::BombShot]);
}

#[test]
fn beam_shoots_down_one_bomb() {
    let mut s = quiet_state();
    s.bombs.push(still_bomb_at(Vec2::new(700.0, 450.0)));
    s.bombs.push(still_bomb_at(Vec2::new(715.0, 450.0)));
    s.projectiles.push(beam_at(Vec2::new(710.0, 450.0)));
    let mut events = Vec::new();

    resolve_bomb_hits(&mut s, &mut events);

    assert_eq!(s.bombs.len(), 1);
    assert_eq!(s.bombs[0].rect.center(), Vec2::new(715.0, 450.0));
    assert!(s.projectiles.is_empty());
    assert_eq!(s.scoreboard.score, 1);
    assert_eq!(events, vec![GameEvent::BombShot]);
}

// ── Bombs vs player ───────────────────────────────────────────────────────────

#[test]
fn bomb_on_player_costs_a_life() {
    let mut s = quiet_state();
    s.bombs.push(still_bomb_at(s.player.rect.center()));

    let report = tick(&mut s, &no_input(), &mut seeded_rng());

    assert_eq!(s.scoreboard.lives, 2);
    assert!(s.bombs.is_empty());
    assert_eq!(s.player.mood, PlayerMood::Hit);
    assert!(report.events.contains(&GameEvent::PlayerHit { lives: 2 }));
    assert!(report.draws.iter().any(|d| matches!(
        d,
        DrawRequest::Sprite {
            id: SpriteId::PlayerHit,
            ..
        }
    )));
}

#[test]
fn simultaneous_bombs_cost_one_life() {
    let mut s = quiet_state();
    let c = s.player.rect.center();
    s.bombs.push(still_bomb_at(c));
    s.bombs.push(still_bomb_at(Vec2::new(c.x + 30.0, c.y)));

    tick(&mut s, &no_input(), &mut seeded_rng());

    assert_eq!(s.scoreboard.lives, 2);
    assert!(s.bombs.is_empty());
}

#[test]
fn last_life_ends_game_once() {
    let mut s = quiet_state();
    s.scoreboard.lives = 1;
    s.scoreboard.add_score(42);
    s.bombs.push(still_bomb_at(s.player.rect.center()));
    let mut rng = seeded_rng();

    let report = tick(&mut s, &no_input(), &mut rng);
    assert_eq!(report.status, GameStatus::GameOver);
    assert_eq!(s.scoreboard.lives, 0);
    assert_eq!(
        report
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count(),
        1
    );
    assert!(report.events.contains(&GameEvent::GameOver { score: 42 }));
    assert!(report.draws.contains(&DrawRequest::GameOver { score: 42 }));
    // The frame stops short of the counter advance
    assert_eq!(s.tick, 1);

    // Frozen from here on
    s.bombs.push(still_bomb_at(s.player.rect.center()));
    let again = tick(&mut s, &commands(&[Command::Fire]), &mut rng);
    assert_eq!(again.status, GameStatus::GameOver);
    assert!(again.events.is_empty());
    assert!(again.draws.is_empty());
    assert!(s.projectiles.is_empty());
    assert_eq!(s.scoreboard.lives, 0);
    assert_eq!(s.tick, 1);
}

// ── Commands ──────────────────────────────────────────────────────────────────

#[test]
fn tier_select_respects_score() {
    let mut s = quiet_state();
    let mut events = Vec::new();

    apply_commands(&mut s, &[Command::SelectTier(WeaponTier::Wide)], &mut events);
    assert_eq!(s.player.tier, WeaponTier::Basic);
    assert_eq!(events, vec![GameEvent::TierLocked(WeaponTier::Wide)]);

    s.scoreboard.add_score(50);
    events.clear();
    apply_commands(&mut s, &[Command::SelectTier(WeaponTier::Wide)], &mut events);
    assert_eq!(s.player.tier, WeaponTier::Wide);
    assert_eq!(events, vec![GameEvent::TierChanged(WeaponTier::Wide)]);
}

#[test]
fn fire_before_tier_change_keeps_old_tier() {
    let mut s = quiet_state();
    s.scoreboard.add_score(50);
    let mut events = Vec::new();
    apply_commands(
        &mut s,
        &[Command::Fire, Command::SelectTier(WeaponTier::Wide), Command::Fire],
        &mut events,
    );
    let tiers: Vec<WeaponTier> = s.projectiles.iter().map(|p| p.tier).collect();
    assert_eq!(tiers, vec![WeaponTier::Basic, WeaponTier::Wide]);
    assert_eq!(
        events,
        vec![
            GameEvent::Fired(WeaponTier::Basic),
            GameEvent::TierChanged(WeaponTier::Wide),
            GameEvent::Fired(WeaponTier::Wide),
        ]
    );
    assert_eq!(s.player.pending_shots(), 0);
}

#[test]
fn locked_tier_does_not_cancel_fire() {
    let mut s = quiet_state();
    let mut events = Vec::new();
    apply_commands(
        &mut s,
        &[Command::Fire, Command::SelectTier(WeaponTier::Heavy)],
        &mut events,
    );
    assert_eq!(s.projectiles.len(), 1);
    assert_eq!(s.projectiles[0].tier, WeaponTier::Basic);
    assert!(events.contains(&GameEvent::Fired(WeaponTier::Basic)));
}

#[test]
fn fired_beam_moves_in_same_tick() {
    let mut s = quiet_state();
    tick(&mut s, &commands(&[Command::Fire]), &mut seeded_rng());
    assert_eq!(s.projectiles.len(), 1);
    assert_eq!(s.projectiles[0].rect.center(), Vec2::new(1010.0, 400.0));
}

#[test]
fn quit_stops_the_frame() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    let report = tick(&mut s, &commands(&[Command::Quit, Command::Fire]), &mut rng);
    assert_eq!(report.status, GameStatus::Quit);
    assert_eq!(report.events, vec![GameEvent::Quit]);
    assert!(report.draws.is_empty());
    assert!(s.projectiles.is_empty());
    assert_eq!(s.tick, 1);

    let again = tick(&mut s, &no_input(), &mut rng);
    assert_eq!(again.status, GameStatus::Quit);
    assert_eq!(s.tick, 1);
}

#[test]
fn held_keys_move_player() {
    let mut s = quiet_state();
    let input = FrameInput {
        held: DirectionKeys {
            up: true,
            ..DirectionKeys::default()
        },
        commands: Vec::new(),
    };
    tick(&mut s, &input, &mut seeded_rng());
    assert_eq!(s.player.rect.center(), Vec2::new(900.0, 390.0));
    assert_eq!(s.player.sprite(), SpriteId::PlayerUp);
}

// ── Enemies over time ─────────────────────────────────────────────────────────

#[test]
fn enemy_goes_idle_and_bombs_on_schedule() {
    let mut s = quiet_state();
    s.enemies.push(Enemy {
        rect: Rect::from_center(Vec2::new(790.0, 450.0), 80.0, 80.0),
        velocity: Vec2::new(-8.0, 3.0),
        bound: 800.0,
        state: EnemyState::Approaching,
        bomb_interval: 50,
        sprite: SpriteId::Alien2,
    });
    let mut rng = seeded_rng();

    let report = tick(&mut s, &no_input(), &mut rng);
    assert!(report.events.contains(&GameEvent::EnemyIdle));
    assert_eq!(s.enemies[0].state, EnemyState::Idle);

    while s.tick < 50 {
        let report = tick(&mut s, &no_input(), &mut rng);
        assert!(!report.events.contains(&GameEvent::EnemyIdle));
        assert!(s.bombs.is_empty());
    }
    assert_eq!(s.enemies[0].rect.center(), Vec2::new(790.0, 450.0));

    tick(&mut s, &no_input(), &mut rng);
    assert_eq!(s.bombs.len(), 1);
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[test]
fn touching_pickup_scores_ten() {
    let mut s = quiet_state();
    s.pickups.push(Pickup::at(s.player.rect.center(), &s.config));
    let report = tick(&mut s, &no_input(), &mut seeded_rng());
    assert!(s.pickups.is_empty());
    assert_eq!(s.scoreboard.score, 10);
    assert!(report.events.contains(&GameEvent::PickupCollected));
}

#[test]
fn pickup_leaving_viewport_is_removed() {
    let mut s = quiet_state();
    s.pickups.push(Pickup::at(Vec2::new(10.0, 800.0), &s.config));
    tick(&mut s, &no_input(), &mut seeded_rng());
    assert!(s.pickups.is_empty());
    assert_eq!(s.scoreboard.score, 0);
}

// ── Boss phase ────────────────────────────────────────────────────────────────

#[test]
fn boss_arrives_when_scroll_ends() {
    let cfg = GameConfig::default();
    assert_eq!(cfg.boss_tick(), 1200);

    let mut s = make_state();
    let mut rng = seeded_rng();
    s.tick = 1199;
    let report = tick(&mut s, &no_input(), &mut rng);
    assert!(!report.events.contains(&GameEvent::BossArrived));
    assert!(s.bosses.is_empty());

    let report = tick(&mut s, &no_input(), &mut rng);
    assert!(report.events.contains(&GameEvent::BossArrived));
    assert_eq!(s.bosses.len(), 1);
    assert!(report.draws.iter().any(|d| matches!(
        d,
        DrawRequest::Hud {
            boss_hp: Some(15),
            ..
        }
    )));
}

#[test]
fn boss_removed_the_tick_after_last_hit() {
    let mut s = quiet_state();
    let mut boss = Boss::spawn(&s.config);
    boss.rect = Rect::new(1200.0, 350.0, 200.0, 200.0);
    boss.hp = 1;
    s.bosses.push(boss);
    s.projectiles.push(beam_at(Vec2::new(1190.0, 450.0)));
    let mut rng = seeded_rng();

    let report = tick(&mut s, &no_input(), &mut rng);
    assert!(report.events.contains(&GameEvent::BossHit { remaining_hp: 0 }));
    assert!(!report.events.contains(&GameEvent::BossDefeated));
    assert!(s.projectiles.is_empty());
    assert_eq!(s.bosses.len(), 1);

    let report = tick(&mut s, &no_input(), &mut rng);
    assert!(report.events.contains(&GameEvent::BossDefeated));
    assert!(s.bosses.is_empty());
}

#[test]
fn boss_hit_decrements_by_one() {
    let mut s = quiet_state();
    let mut boss = Boss::spawn(&s.config);
    boss.rect = Rect::new(1200.0, 350.0, 200.0, 200.0);
    s.bosses.push(boss);
    s.projectiles.push(beam_at(Vec2::new(1190.0, 420.0)));
    s.projectiles.push(beam_at(Vec2::new(1190.0, 480.0)));

    let report = tick(&mut s, &no_input(), &mut seeded_rng());
    assert_eq!(s.bosses[0].hp, 13);
    assert!(report.events.contains(&GameEvent::BossHit { remaining_hp: 14 }));
    assert!(report.events.contains(&GameEvent::BossHit { remaining_hp: 13 }));
}

// ── Background ────────────────────────────────────────────────────────────────

#[test]
fn backdrop_scrolls_then_stops() {
    let cfg = GameConfig::default();
    let xs = |t: u64| -> Vec<(SpriteId, f32)> {
        backdrop(t, &cfg)
            .into_iter()
            .filter_map(|d| match d {
                DrawRequest::Backdrop { id, x } => Some((id, x)),
                _ => None,
            })
            .collect()
    };

    assert_eq!(
        xs(0),
        vec![
            (SpriteId::Background, 0.0),
            (SpriteId::BackgroundFlipped, 1600.0),
            (SpriteId::Background, 3200.0),
        ]
    );
    assert_eq!(
        xs(100),
        vec![
            (SpriteId::Background, -800.0),
            (SpriteId::BackgroundFlipped, 800.0),
            (SpriteId::Background, 2400.0),
        ]
    );
    // Wraps every scroll period
    assert_eq!(xs(400), xs(0));
    assert_eq!(xs(1200), vec![(SpriteId::Background, 0.0)]);
    assert_eq!(xs(5000), vec![(SpriteId::Background, 0.0)]);
}

// ── Draw order ────────────────────────────────────────────────────────────────

fn label(d: &DrawRequest) -> &'static str {
    match d {
        DrawRequest::Backdrop { .. } => "backdrop",
        DrawRequest::Circle { .. } => "bomb",
        DrawRequest::Hud { .. } => "hud",
        DrawRequest::GameOver { .. } => "game-over",
        DrawRequest::Sprite { id, .. } => match id {
            SpriteId::Boss => "boss",
            SpriteId::Beam | SpriteId::Beam1 | SpriteId::Beam2 => "beam",
            SpriteId::Alien1 | SpriteId::Alien2 | SpriteId::Alien3 => "enemy",
            SpriteId::Explosion | SpriteId::ExplosionFlipped => "explosion",
            SpriteId::Pickup => "pickup",
            _ => "player",
        },
    }
}

#[test]
fn draws_follow_layer_order() {
    let mut s = quiet_state();
    let mut boss = Boss::spawn(&s.config);
    boss.rect = Rect::new(1200.0, 350.0, 200.0, 200.0);
    s.bosses.push(boss);
    s.enemies.push(idle_enemy_at(Vec2::new(600.0, 200.0)));
    s.bombs.push(Bomb {
        direction: Vec2::new(1.0, 0.0),
        ..still_bomb_at(Vec2::new(300.0, 700.0))
    });
    s.explosions.push(Explosion::at(Vec2::new(100.0, 100.0), 100, 90.0));
    s.pickups.push(Pickup::at(Vec2::new(500.0, 800.0), &s.config));
    s.projectiles.push(beam_at(Vec2::new(200.0, 300.0)));

    let report = tick(&mut s, &no_input(), &mut seeded_rng());
    let order: Vec<&str> = report.draws.iter().map(label).collect();
    assert_eq!(
        order,
        vec![
            "backdrop",
            "backdrop",
            "backdrop",
            "boss",
            "player",
            "beam",
            "enemy",
            "bomb",
            "explosion",
            "hud",
            "pickup",
        ]
    );
    assert_eq!(s.explosions[0].life, 99);
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_game() {
    let mut a = make_state();
    let mut b = make_state();
    let mut rng_a = StdRng::seed_from_u64(7);
    let mut rng_b = StdRng::seed_from_u64(7);

    for t in 0..800u64 {
        let input = FrameInput {
            held: DirectionKeys {
                up: t % 120 < 60,
                down: t % 120 >= 60,
                ..DirectionKeys::default()
            },
            commands: if t % 8 == 0 { vec![Command::Fire] } else { Vec::new() },
        };
        let ra = tick(&mut a, &input, &mut rng_a);
        let rb = tick(&mut b, &input, &mut rng_b);
        assert_eq!(ra.status, rb.status);
        assert_eq!(ra.events, rb.events);
        assert_eq!(ra.draws, rb.draws);
    }
    assert_eq!(a.scoreboard, b.scoreboard);
}
