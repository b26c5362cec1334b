//! Movement domain: unit tests for jump arbitration, dash phases, and
//! knockback step budgets.

use avian2d::prelude::LinearVelocity;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

use super::systems::movement::{LaunchPath, apply_knockback, launch_path};
use super::{DashPhase, DashState, JumpState, KnockbackState, MovementTuning, Player, PlayerState};

const DT: f32 = 1.0 / 60.0;
const COYOTE_TIME: f32 = 0.12;
const BUFFER_TICKS: i32 = 8;

/// One tick of the bookkeeping the update system performs.
fn tick_bookkeeping(jump: &mut JumpState, grounded: bool, pressed: bool) {
    if grounded {
        jump.refresh_grounded(COYOTE_TIME);
    } else {
        jump.tick_airborne(DT);
    }
    jump.buffer_counter = if pressed {
        BUFFER_TICKS
    } else {
        jump.buffer_counter - 1
    };
}

// -----------------------------------------------------------------------------
// Jump buffer + coyote tests
// -----------------------------------------------------------------------------

#[test]
fn test_grounded_press_launches_buffered() {
    let mut jump = JumpState::default();
    tick_bookkeeping(&mut jump, true, true);

    assert_eq!(
        launch_path(false, true, &jump, true, 1),
        Some(LaunchPath::Buffered)
    );
}

#[test]
fn test_buffered_jump_survives_leaving_ground_within_coyote() {
    let mut jump = JumpState::default();
    // Press while grounded, then walk off the ledge for two ticks without
    // pressing again.
    tick_bookkeeping(&mut jump, true, true);
    tick_bookkeeping(&mut jump, false, false);
    tick_bookkeeping(&mut jump, false, false);

    assert!(jump.buffer_counter > 0);
    assert!(jump.coyote_counter > 0.0);
    assert_eq!(
        launch_path(false, false, &jump, false, 1),
        Some(LaunchPath::Buffered)
    );
}

#[test]
fn test_press_after_coyote_expires_does_not_ground_jump() {
    let mut jump = JumpState::default();
    tick_bookkeeping(&mut jump, true, false);
    // Fall for well past the coyote window, then press.
    for _ in 0..10 {
        tick_bookkeeping(&mut jump, false, false);
    }
    tick_bookkeeping(&mut jump, false, true);

    assert!(jump.coyote_counter <= 0.0);
    // The grounded path is closed; only the air-jump path may fire.
    assert_eq!(launch_path(false, false, &jump, true, 1), Some(LaunchPath::Air));
    assert_eq!(launch_path(false, false, &jump, true, 0), None);
}

#[test]
fn test_buffer_decays_and_goes_stale() {
    let mut jump = JumpState::default();
    tick_bookkeeping(&mut jump, true, true);
    for _ in 0..BUFFER_TICKS {
        tick_bookkeeping(&mut jump, true, false);
    }
    assert!(jump.buffer_counter <= 0);
    assert_eq!(launch_path(false, true, &jump, false, 1), None);
}

#[test]
fn test_already_jumping_blocks_both_paths() {
    let mut jump = JumpState::default();
    tick_bookkeeping(&mut jump, true, true);
    assert_eq!(launch_path(true, true, &jump, true, 1), None);
}

// -----------------------------------------------------------------------------
// Air-jump budget tests
// -----------------------------------------------------------------------------

#[test]
fn test_buffered_launch_does_not_consume_air_jump() {
    let mut jump = JumpState::default();
    tick_bookkeeping(&mut jump, true, true);

    // Launch #1: grounded/buffered path. The system increments the air-jump
    // counter only on the air path.
    assert_eq!(
        launch_path(false, true, &jump, true, 1),
        Some(LaunchPath::Buffered)
    );
    assert_eq!(jump.air_jumps_used, 0);

    // Airborne until both buffer and coyote are stale, then press again:
    // air path fires and the counter goes to 1.
    for _ in 0..10 {
        tick_bookkeeping(&mut jump, false, false);
    }
    tick_bookkeeping(&mut jump, false, true);
    assert_eq!(launch_path(false, false, &jump, true, 1), Some(LaunchPath::Air));
    jump.air_jumps_used += 1;

    // A third press while airborne is a no-op.
    tick_bookkeeping(&mut jump, false, true);
    assert_eq!(launch_path(false, false, &jump, true, 1), None);
}

#[test]
fn test_air_jump_budget_resets_on_ground_contact() {
    let mut jump = JumpState {
        air_jumps_used: 2,
        ..Default::default()
    };
    tick_bookkeeping(&mut jump, true, false);
    assert_eq!(jump.air_jumps_used, 0);
    assert_eq!(jump.coyote_counter, COYOTE_TIME);
}

// -----------------------------------------------------------------------------
// Dash phase tests
// -----------------------------------------------------------------------------

#[test]
fn test_dash_runs_to_completion_then_cools() {
    let mut dash = DashState::default();
    assert!(dash.can_start());

    dash.start(0.18);
    assert_eq!(dash.phase, DashPhase::Active);
    assert!(!dash.can_start());

    // Active phase: ends exactly once.
    let mut ended_ticks = 0;
    for _ in 0..20 {
        if dash.tick(DT, 0.4) {
            ended_ticks += 1;
        }
    }
    assert_eq!(ended_ticks, 1);
    assert_eq!(dash.phase, DashPhase::Cooling);

    // Cooldown elapses back to Idle without another "ended" signal.
    for _ in 0..30 {
        assert!(!dash.tick(DT, 0.4));
    }
    assert_eq!(dash.phase, DashPhase::Idle);
}

#[test]
fn test_dash_once_per_airborne_excursion() {
    let mut dash = DashState::default();
    dash.start(0.18);

    // Run the full dash and cooldown out.
    for _ in 0..60 {
        dash.tick(DT, 0.4);
    }
    assert_eq!(dash.phase, DashPhase::Idle);

    // Cooldown is over but the air lock still holds until grounded.
    assert!(!dash.can_start());
    dash.used_in_air = false;
    assert!(dash.can_start());
}

#[test]
fn test_dash_rejected_while_cooling() {
    let mut dash = DashState::default();
    dash.start(0.18);
    for _ in 0..12 {
        dash.tick(DT, 0.4);
    }
    assert_eq!(dash.phase, DashPhase::Cooling);
    dash.used_in_air = false;
    assert!(!dash.can_start());
}

// -----------------------------------------------------------------------------
// Knockback step budget tests
// -----------------------------------------------------------------------------

#[test]
fn test_knockback_axes_are_independent() {
    let mut knockback = KnockbackState::default();
    knockback.arm_x();
    knockback.arm_y(true);

    // Stepping X against its budget leaves the Y counter untouched.
    knockback.step_x(4);
    knockback.step_x(4);
    assert_eq!(knockback.steps_x, 2);
    assert_eq!(knockback.steps_y, 0);
    assert!(knockback.y_active);

    knockback.step_y(4);
    assert_eq!(knockback.steps_x, 2);
    assert_eq!(knockback.steps_y, 1);
}

#[test]
fn test_knockback_budget_exhaustion_clears_axis_and_counter() {
    let mut knockback = KnockbackState::default();
    knockback.arm_x();

    for _ in 0..3 {
        knockback.step_x(3);
        assert!(knockback.x_active);
    }
    // Budget spent: the next step force-clears and resets the counter.
    knockback.step_x(3);
    assert!(!knockback.x_active);
    assert_eq!(knockback.steps_x, 0);
}

#[test]
fn test_knockback_stop_resets_counter() {
    let mut knockback = KnockbackState::default();
    knockback.arm_y(false);
    knockback.step_y(8);
    knockback.step_y(8);
    assert_eq!(knockback.steps_y, 2);

    knockback.stop_y();
    assert!(!knockback.y_active);
    assert_eq!(knockback.steps_y, 0);
}

#[test]
fn test_dash_velocity_survives_armed_knockback() {
    let mut world = World::new();
    let tuning = MovementTuning::default();
    let dash_velocity = tuning.dash_speed;
    world.insert_resource(tuning);

    let mut knockback = KnockbackState::default();
    knockback.arm_x();
    let player = world
        .spawn((
            Player,
            PlayerState {
                dashing: true,
                ..Default::default()
            },
            JumpState::default(),
            knockback,
            LinearVelocity(Vec2::new(dash_velocity, 0.0)),
        ))
        .id();

    world.run_system_once(apply_knockback).unwrap();

    // The dash owns the actor: velocity untouched, step budget frozen, the
    // armed axis still pending for when the dash ends.
    let velocity = world.get::<LinearVelocity>(player).unwrap();
    assert_eq!(velocity.x, dash_velocity);
    let knockback = world.get::<KnockbackState>(player).unwrap();
    assert!(knockback.x_active);
    assert_eq!(knockback.steps_x, 0);
}

#[test]
fn test_knockback_overrides_velocity_once_dash_ends() {
    let mut world = World::new();
    let tuning = MovementTuning::default();
    let knockback_speed = tuning.knockback_x_speed;
    world.insert_resource(tuning);

    let mut knockback = KnockbackState::default();
    knockback.arm_x();
    let player = world
        .spawn((
            Player,
            PlayerState::default(),
            JumpState::default(),
            knockback,
            LinearVelocity(Vec2::new(260.0, 0.0)),
        ))
        .id();

    world.run_system_once(apply_knockback).unwrap();

    // Facing right, so the recoil pushes left and the budget starts counting.
    let velocity = world.get::<LinearVelocity>(player).unwrap();
    assert_eq!(velocity.x, -knockback_speed);
    let knockback = world.get::<KnockbackState>(player).unwrap();
    assert_eq!(knockback.steps_x, 1);
}

#[test]
fn test_rearming_does_not_reset_running_counter() {
    let mut knockback = KnockbackState::default();
    knockback.arm_x();
    knockback.step_x(6);
    knockback.step_x(6);
    knockback.arm_x();
    assert_eq!(knockback.steps_x, 2);
}
