//! Combat domain: unit tests for resource clamping and notification, the
//! damage boundary, attack aim, spell phases, and hit-stop.

use bevy::prelude::*;

use super::components::{
    AttackDirection, AttackState, EnemyKnockback, Health, Invincible, Mana, SpellPhase,
    SpellState, select_direction,
};
use super::resources::{AttackTuning, HitStop};
use super::systems::{apply_player_hit, attack_box};

// -----------------------------------------------------------------------------
// Health tests
// -----------------------------------------------------------------------------

#[test]
fn test_health_clamps_above_max_and_below_zero() {
    let mut health = Health::new(5);
    assert!(!health.set(9));
    assert_eq!(health.current(), 5);

    assert!(health.set(-3));
    assert_eq!(health.current(), 0);
}

#[test]
fn test_health_changed_only_on_actual_change() {
    let mut health = Health::new(5);

    // Zero damage at full health clamps to the same value: no notification.
    assert!(!health.take_damage(0.0));
    assert!(health.take_damage(1.0));
    assert_eq!(health.current(), 4);

    // Healing past max lands on max, which is a change from 4.
    assert!(health.heal(20));
    assert_eq!(health.current(), 5);
    assert!(!health.heal(1));
}

#[test]
fn test_overkill_damage_saturates_at_zero() {
    let mut health = Health::new(5);
    health.set(3);
    assert!(health.take_damage(10.0));
    assert_eq!(health.current(), 0);

    // Further damage at zero is silent.
    assert!(!health.take_damage(4.0));
}

#[test]
fn test_fractional_damage_rounds_to_nearest() {
    let mut health = Health::new(10);
    health.take_damage(2.4);
    assert_eq!(health.current(), 8);
    health.take_damage(2.6);
    assert_eq!(health.current(), 5);
}

// -----------------------------------------------------------------------------
// Mana tests
// -----------------------------------------------------------------------------

#[test]
fn test_mana_spend_is_all_or_nothing() {
    let mut mana = Mana::new(100.0);
    mana.set(20.0);

    assert!(!mana.try_spend(30.0));
    assert_eq!(mana.current(), 20.0);

    assert!(mana.try_spend(20.0));
    assert_eq!(mana.current(), 0.0);
}

#[test]
fn test_mana_gain_clamps_and_ratio_tracks() {
    let mut mana = Mana::new(100.0);
    mana.set(95.0);
    mana.gain(8.0);
    assert_eq!(mana.current(), 100.0);
    assert_eq!(mana.ratio(), 1.0);

    mana.set(25.0);
    assert!((mana.ratio() - 0.25).abs() < f32::EPSILON);
    assert!(mana.has(25.0));
    assert!(!mana.has(25.1));
}

// -----------------------------------------------------------------------------
// Damage boundary tests
// -----------------------------------------------------------------------------

#[test]
fn test_player_hit_arms_invincibility_and_hit_stop() {
    let mut health = Health::new(5);
    let mut invincible = Invincible::default();
    let mut hit_stop = HitStop::default();

    let changed = apply_player_hit(&mut health, &mut invincible, &mut hit_stop, 1.0, 1.0);
    assert!(changed);
    assert_eq!(health.current(), 4);
    assert!(invincible.is_active());
    assert_eq!(hit_stop.scale, hit_stop.stop_scale);
    assert_eq!(hit_stop.delay_remaining, hit_stop.delay);
}

#[test]
fn test_active_invincibility_gates_further_hits() {
    let mut health = Health::new(5);
    let mut invincible = Invincible::default();
    let mut hit_stop = HitStop::default();

    apply_player_hit(&mut health, &mut invincible, &mut hit_stop, 1.0, 1.0);

    // The contact system skips the hit entirely while the window is open.
    if !invincible.is_active() {
        apply_player_hit(&mut health, &mut invincible, &mut hit_stop, 1.0, 1.0);
    }
    assert_eq!(health.current(), 4);

    // Window elapses, the next hit lands.
    invincible.timer = 0.0;
    apply_player_hit(&mut health, &mut invincible, &mut hit_stop, 1.0, 1.0);
    assert_eq!(health.current(), 3);
}

// -----------------------------------------------------------------------------
// Attack direction and placement tests
// -----------------------------------------------------------------------------

#[test]
fn test_direction_precedence() {
    assert_eq!(select_direction(0.0, true), AttackDirection::Side);
    assert_eq!(select_direction(0.0, false), AttackDirection::Side);
    // Aiming down while grounded falls back to side.
    assert_eq!(select_direction(-1.0, true), AttackDirection::Side);
    assert_eq!(select_direction(-1.0, false), AttackDirection::Down);
    assert_eq!(select_direction(1.0, true), AttackDirection::Up);
    assert_eq!(select_direction(1.0, false), AttackDirection::Up);
}

#[test]
fn test_attack_box_follows_facing() {
    let tuning = AttackTuning::default();

    let (right, area) = attack_box(AttackDirection::Side, 1.0, &tuning);
    let (left, _) = attack_box(AttackDirection::Side, -1.0, &tuning);
    assert_eq!(right.x, tuning.side_offset);
    assert_eq!(left.x, -tuning.side_offset);
    assert_eq!(area, tuning.side_area);

    // Vertical boxes ignore facing.
    let (up, _) = attack_box(AttackDirection::Up, -1.0, &tuning);
    assert_eq!(up, Vec2::new(0.0, tuning.up_offset));
    let (down, _) = attack_box(AttackDirection::Down, 1.0, &tuning);
    assert_eq!(down, Vec2::new(0.0, -tuning.down_offset));
}

#[test]
fn test_attack_cooldown_gate() {
    let attack = AttackState { since_last: 0.2 };
    assert!(!attack.ready(0.35));
    assert!(attack.ready(0.2));
}

// -----------------------------------------------------------------------------
// Spell phase tests
// -----------------------------------------------------------------------------

#[test]
fn test_spell_fires_once_at_end_of_windup() {
    let mut spell = SpellState::default();
    assert!(spell.ready());

    spell.begin(0.15, 0.8, AttackDirection::Side);
    assert!(spell.is_casting());
    assert!(!spell.ready());

    let dt = 1.0 / 60.0;
    let mut fired = 0;
    for _ in 0..60 {
        if spell.tick(dt, 0.25) {
            fired += 1;
        }
    }
    assert_eq!(fired, 1);
    assert_eq!(spell.phase, SpellPhase::Idle);
}

#[test]
fn test_spell_cooldown_blocks_recast_after_recovery() {
    let mut spell = SpellState::default();
    spell.begin(0.1, 0.8, AttackDirection::Up);

    let dt = 1.0 / 60.0;
    // Windup plus recovery is well under the cooldown.
    for _ in 0..30 {
        spell.tick(dt, 0.2);
    }
    assert_eq!(spell.phase, SpellPhase::Idle);
    assert!(!spell.ready());

    for _ in 0..30 {
        spell.tick(dt, 0.2);
    }
    assert!(spell.ready());
}

// -----------------------------------------------------------------------------
// Hit-stop tests
// -----------------------------------------------------------------------------

#[test]
fn test_hit_stop_restores_after_delay() {
    let mut hit_stop = HitStop::default();
    hit_stop.strike();
    assert_eq!(hit_stop.scale, hit_stop.stop_scale);

    // Scale holds at the floor for the full delay.
    let scale = hit_stop.tick(0.5);
    assert_eq!(scale, hit_stop.stop_scale);

    // Then ramps back and caps at nominal speed.
    let mut scale = hit_stop.scale;
    for _ in 0..30 {
        scale = hit_stop.tick(0.05);
    }
    assert_eq!(scale, 1.0);
}

#[test]
fn test_second_strike_rearms_delay_instead_of_compounding() {
    let mut hit_stop = HitStop::default();
    hit_stop.strike();
    hit_stop.tick(0.3);
    assert!((hit_stop.delay_remaining - 0.2).abs() < 1e-4);

    hit_stop.strike();
    assert_eq!(hit_stop.delay_remaining, hit_stop.delay);
    assert_eq!(hit_stop.scale, hit_stop.stop_scale);
}

// -----------------------------------------------------------------------------
// Enemy knockback tests
// -----------------------------------------------------------------------------

#[test]
fn test_enemy_knockback_expires_after_length() {
    let mut knockback = EnemyKnockback::new(0.3, 1.4);
    knockback.active = true;

    let dt = 1.0 / 60.0;
    let mut ticks = 0;
    while knockback.active && ticks < 60 {
        knockback.tick(dt);
        ticks += 1;
    }
    assert!(!knockback.active);
    assert_eq!(knockback.timer, 0.0);
    // 0.3 seconds at 60 ticks per second, plus the release tick.
    assert!((18..=20).contains(&ticks));
}
