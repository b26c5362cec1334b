//! Movement domain: tuning and input resources.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct MovementTuning {
    pub walk_speed: f32,
    pub jump_force: f32,
    pub gravity: f32,
    /// Jump buffer window in ticks, not seconds.
    pub jump_buffer_ticks: i32,
    pub coyote_time: f32,
    pub max_air_jumps: u8,
    /// Enables the short-hop cut when the jump button is released mid-ascent.
    pub short_hop: bool,
    pub dash_speed: f32,
    pub dash_time: f32,
    pub dash_cooldown: f32,
    pub knockback_x_speed: f32,
    pub knockback_y_speed: f32,
    pub knockback_x_steps: u32,
    pub knockback_y_steps: u32,
    pub ground_probe_distance: f32,
    /// Horizontal offset of the two edge probes from the feet center.
    pub ground_probe_spread: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            walk_speed: 260.0,
            jump_force: 640.0,
            gravity: 1700.0,
            jump_buffer_ticks: 8,
            coyote_time: 0.12,
            max_air_jumps: 1,
            short_hop: true,
            dash_speed: 820.0,
            dash_time: 0.18,
            dash_cooldown: 0.4,
            knockback_x_speed: 340.0,
            knockback_y_speed: 420.0,
            knockback_x_steps: 6,
            knockback_y_steps: 8,
            ground_probe_distance: 6.0,
            ground_probe_spread: 11.0,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub jump_just_released: bool,
    pub dash_just_pressed: bool,
}
