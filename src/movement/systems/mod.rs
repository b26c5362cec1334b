//! Movement domain: system modules for the locomotion tick.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::detect_ground;
pub(crate) use input::read_input;
pub(crate) use movement::{
    apply_gravity, apply_horizontal_movement, apply_jump, apply_knockback, start_dash, tick_dash,
    update_facing, update_jump_bookkeeping,
};
