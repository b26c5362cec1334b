//! Movement domain: the per-tick locomotion state machines.
//!
//! Tick ordering matters: jump bookkeeping runs before everything, the dash
//! owns the actor while active, and knockback is applied after voluntary
//! motion so it overrides whatever movement and jump wrote this tick.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::EffectRequest;
use crate::effects::EffectKind;
use crate::movement::{
    DashPhase, DashState, JumpState, KnockbackState, MovementInput, MovementTuning, Player,
    PlayerState,
};

/// Grace counters update every tick, even mid-dash.
pub(crate) fn update_jump_bookkeeping(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut PlayerState, &mut JumpState), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut state, mut jump) in &mut query {
        if state.on_ground {
            state.jumping = false;
            jump.refresh_grounded(tuning.coyote_time);
        } else {
            jump.tick_airborne(dt);
        }

        jump.buffer_counter = if input.jump_just_pressed {
            tuning.jump_buffer_ticks
        } else {
            jump.buffer_counter - 1
        };
    }
}

/// Advances the dash phase machine. While active the dash fully owns the
/// actor: velocity is forced along the facing and every other control system
/// sees `dashing` and skips its tick.
pub(crate) fn tick_dash(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut PlayerState, &mut DashState, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut state, mut dash, mut velocity) in &mut query {
        let ended = dash.tick(dt, tuning.dash_cooldown);

        if dash.phase == DashPhase::Active {
            velocity.x = state.facing_sign() * tuning.dash_speed;
            velocity.y = 0.0;
        }

        if ended {
            state.dashing = false;
            debug!("Dash ended, cooling for {}s", tuning.dash_cooldown);
        }
    }
}

/// Facing flips to match the sign of nonzero horizontal input; zero input
/// holds the last facing.
pub(crate) fn update_facing(
    input: Res<MovementInput>,
    mut query: Query<&mut PlayerState, With<Player>>,
) {
    for mut state in &mut query {
        if state.controls_locked() {
            continue;
        }

        if input.axis.x > 0.0 {
            state.looking_right = true;
        } else if input.axis.x < 0.0 {
            state.looking_right = false;
        }
    }
}

/// Velocity-control locomotion: horizontal velocity is set directly, the
/// vertical component is left untouched.
pub(crate) fn apply_horizontal_movement(
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&PlayerState, &mut LinearVelocity), With<Player>>,
) {
    for (state, mut velocity) in &mut query {
        if state.controls_locked() {
            continue;
        }

        velocity.x = tuning.walk_speed * input.axis.x;
    }
}

/// Which launch path fires this tick, if any. The two paths are mutually
/// exclusive: a successful buffered jump never consumes an air-jump slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LaunchPath {
    Buffered,
    Air,
}

pub(crate) fn launch_path(
    jumping: bool,
    on_ground: bool,
    jump: &JumpState,
    jump_just_pressed: bool,
    max_air_jumps: u8,
) -> Option<LaunchPath> {
    if jumping {
        return None;
    }
    if jump.buffered_launch_ready() {
        Some(LaunchPath::Buffered)
    } else if !on_ground && jump.air_jumps_used < max_air_jumps && jump_just_pressed {
        Some(LaunchPath::Air)
    } else {
        None
    }
}

pub(crate) fn apply_jump(
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut PlayerState, &mut JumpState, &mut LinearVelocity), With<Player>>,
) {
    for (mut state, mut jump, mut velocity) in &mut query {
        if state.controls_locked() {
            continue;
        }

        // Short-hop height control: releasing mid-ascent cuts the jump.
        // Threshold is vy > 0, and `jumping` clears even when the cut itself
        // is disabled.
        if input.jump_just_released && velocity.y > 0.0 {
            if tuning.short_hop {
                velocity.y = 0.0;
            }
            state.jumping = false;
        }

        match launch_path(
            state.jumping,
            state.on_ground,
            &jump,
            input.jump_just_pressed,
            tuning.max_air_jumps,
        ) {
            Some(LaunchPath::Buffered) => {
                velocity.y = tuning.jump_force;
                state.jumping = true;
                debug!(
                    "Buffered jump: buffer={}, coyote={:.3}",
                    jump.buffer_counter, jump.coyote_counter
                );
            }
            Some(LaunchPath::Air) => {
                velocity.y = tuning.jump_force;
                state.jumping = true;
                jump.air_jumps_used += 1;
                debug!("Air jump {}/{}", jump.air_jumps_used, tuning.max_air_jumps);
            }
            None => {}
        }
    }
}

pub(crate) fn start_dash(
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut effects: MessageWriter<EffectRequest>,
    mut query: Query<
        (
            &Transform,
            &mut PlayerState,
            &mut DashState,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
) {
    for (transform, mut state, mut dash, mut velocity) in &mut query {
        if state.controls_locked() {
            continue;
        }

        if input.dash_just_pressed && dash.can_start() {
            dash.start(tuning.dash_time);
            state.dashing = true;
            velocity.x = state.facing_sign() * tuning.dash_speed;
            velocity.y = 0.0;
            if state.on_ground {
                effects.write(EffectRequest {
                    kind: EffectKind::DashTrail,
                    position: transform.translation.truncate(),
                    flip_x: !state.looking_right,
                    angle: 0.0,
                });
            }
            debug!("Dash started, facing_sign={}", state.facing_sign());
        }

        // The air-dash lock releases only on touching ground.
        if state.on_ground {
            dash.used_in_air = false;
        }
    }
}

/// Forced displacement, applied last so it overwrites whatever velocity
/// movement and jump set earlier this tick. Axes are independent.
pub(crate) fn apply_knockback(
    tuning: Res<MovementTuning>,
    mut query: Query<
        (
            &PlayerState,
            &mut KnockbackState,
            &mut JumpState,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
) {
    for (state, mut knockback, mut jump, mut velocity) in &mut query {
        // The dash owns the actor: armed knockback neither moves it nor
        // spends its step budget until the dash ends.
        if state.dashing {
            continue;
        }

        if knockback.x_active {
            // Pushed backward, away from the facing direction.
            velocity.x = if state.looking_right {
                -tuning.knockback_x_speed
            } else {
                tuning.knockback_x_speed
            };
            velocity.y = 0.0;
        }

        if knockback.y_active {
            velocity.y = if knockback.y_upward {
                tuning.knockback_y_speed
            } else {
                -tuning.knockback_y_speed
            };
            // Knockback counts as an airborne reset: jumps can recover.
            jump.air_jumps_used = 0;
        }

        knockback.step_x(tuning.knockback_x_steps);
        knockback.step_y(tuning.knockback_y_steps);
        if state.on_ground {
            knockback.stop_y();
        }
    }
}

/// Manual gravity, suspended while a dash or a vertical knockback owns the
/// vertical velocity.
pub(crate) fn apply_gravity(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&PlayerState, &KnockbackState, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (state, knockback, mut velocity) in &mut query {
        if state.dashing || knockback.y_active {
            continue;
        }

        velocity.y -= tuning.gravity * dt;
    }
}
