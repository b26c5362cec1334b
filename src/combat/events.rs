//! Combat domain: combat-related messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::effects::EffectKind;

/// Fired only when the player's clamped health actually changed.
#[derive(Debug)]
pub struct HealthChangedEvent;

impl Message for HealthChangedEvent {}

/// The damage-reception contract: damage plus a knockback impulse along
/// `-direction * force`, applied by the target on receipt.
#[derive(Debug)]
pub struct EnemyHitEvent {
    pub target: Entity,
    pub damage: f32,
    /// Unit vector from the target toward the attacker.
    pub direction: Vec2,
    pub force: f32,
}

impl Message for EnemyHitEvent {}

/// Fire-and-forget "play effect at pose" request. The core does not own the
/// spawned effect's lifetime.
#[derive(Debug)]
pub struct EffectRequest {
    pub kind: EffectKind,
    pub position: Vec2,
    pub flip_x: bool,
    /// Rotation in degrees, used to angle slashes up and down.
    pub angle: f32,
}

impl Message for EffectRequest {}
