//! Movement domain: locomotion plugin wiring and public exports.

mod bootstrap;
mod components;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{
    DashPhase, DashState, GameLayer, Ground, JumpState, KnockbackState, Player, PlayerState,
};
pub use resources::{MovementInput, MovementTuning};

pub(crate) use bootstrap::PLAYER_SIZE;

use bevy::prelude::*;

use crate::core::PlayerTick;
use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{
    apply_gravity, apply_horizontal_movement, apply_jump, apply_knockback, detect_ground,
    read_input, start_dash, tick_dash, update_facing, update_jump_bookkeeping,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_systems(Startup, spawn_player)
            .add_systems(Update, read_input.in_set(PlayerTick::Input))
            .add_systems(Update, detect_ground.in_set(PlayerTick::Sense))
            .add_systems(
                Update,
                update_jump_bookkeeping.in_set(PlayerTick::Bookkeeping),
            )
            .add_systems(Update, tick_dash.in_set(PlayerTick::Dash))
            .add_systems(
                Update,
                (update_facing, apply_horizontal_movement, apply_jump, start_dash)
                    .chain()
                    .in_set(PlayerTick::Act),
            )
            .add_systems(
                Update,
                (apply_knockback, apply_gravity)
                    .chain()
                    .in_set(PlayerTick::React),
            );
    }
}
