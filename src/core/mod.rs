//! Core domain: camera, arena geometry, and the fixed intra-tick ordering.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, Ground};

/// Fixed ordering of the player simulation tick. Later stages intentionally
/// override earlier ones: knockback in `React` overwrites whatever velocity
/// the `Act` stage set.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerTick {
    /// Sample logical inputs once per tick.
    Input,
    /// Ground sensing.
    Sense,
    /// Jump grace counters; runs even mid-dash.
    Bookkeeping,
    /// Dash phase machine; owns the actor while active.
    Dash,
    /// Voluntary control: facing, movement, jump, dash start.
    Act,
    /// Attack and spell resolution, heal channel.
    Resolve,
    /// Forced motion: knockback, then gravity.
    React,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Gravity(Vec2::NEG_Y * 1700.0))
            .configure_sets(
                Update,
                (
                    PlayerTick::Input,
                    PlayerTick::Sense,
                    PlayerTick::Bookkeeping,
                    PlayerTick::Dash,
                    PlayerTick::Act,
                    PlayerTick::Resolve,
                    PlayerTick::React,
                )
                    .chain(),
            )
            .add_systems(Startup, (setup_camera, spawn_arena));
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Static test arena: one floor slab and two raised platforms, all on the
/// Ground layer so the player's probes and the Y-knockback reset see them.
fn spawn_arena(mut commands: Commands) {
    let slabs = [
        (Vec2::new(0.0, -120.0), Vec2::new(1200.0, 40.0)),
        (Vec2::new(-380.0, 20.0), Vec2::new(220.0, 24.0)),
        (Vec2::new(380.0, 20.0), Vec2::new(220.0, 24.0)),
    ];

    for (position, size) in slabs {
        commands.spawn((
            Ground,
            Sprite {
                color: Color::srgb(0.25, 0.23, 0.28),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(
                GameLayer::Ground,
                [GameLayer::Player, GameLayer::Enemy, GameLayer::Projectile],
            ),
        ));
    }
}
