//! Movement domain: player bootstrap.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{AttackState, CombatTuning, HealChannel, Health, Invincible, Mana, SpellState};
use crate::movement::{DashState, GameLayer, JumpState, KnockbackState, Player, PlayerState};

pub(crate) const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);

pub(crate) fn spawn_player(mut commands: Commands, tuning: Res<CombatTuning>) {
    commands.spawn((
        // Identity & movement state
        (
            Player,
            PlayerState::default(),
            JumpState::default(),
            DashState::default(),
            KnockbackState::default(),
        ),
        // Combat state
        (
            Health::new(tuning.max_health),
            Mana::new(tuning.max_mana),
            Invincible::default(),
            AttackState::default(),
            SpellState::default(),
            HealChannel::default(),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.92),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, 80.0, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // gravity is applied by the movement tick
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground]),
        ),
    ));

    info!(
        "Player spawned: health={}, mana={}",
        tuning.max_health, tuning.max_mana
    );
}
