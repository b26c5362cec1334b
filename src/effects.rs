//! Visual effect spawner: consumes fire-and-forget requests and owns the
//! spawned sprites' lifetimes.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::EffectRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Slash,
    DashTrail,
    SpellBurst,
    HitSpark,
}

#[derive(Component, Debug)]
pub(crate) struct EffectLifetime(pub f32);

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (spawn_requested_effects, cleanup_expired_effects));
    }
}

pub(crate) fn spawn_requested_effects(
    mut requests: MessageReader<EffectRequest>,
    mut commands: Commands,
) {
    for request in requests.read() {
        let (color, size, lifetime) = match request.kind {
            EffectKind::Slash => (Color::srgba(0.95, 0.95, 1.0, 0.7), Vec2::new(44.0, 30.0), 0.12),
            EffectKind::DashTrail => {
                (Color::srgba(0.6, 0.7, 1.0, 0.5), Vec2::new(36.0, 20.0), 0.2)
            }
            EffectKind::SpellBurst => {
                (Color::srgba(1.0, 0.6, 0.2, 0.8), Vec2::new(40.0, 40.0), 0.25)
            }
            EffectKind::HitSpark => {
                (Color::srgba(1.0, 0.3, 0.3, 0.8), Vec2::new(18.0, 18.0), 0.1)
            }
        };

        commands.spawn((
            EffectLifetime(lifetime),
            Sprite {
                color,
                custom_size: Some(size),
                flip_x: request.flip_x,
                ..default()
            },
            Transform::from_xyz(request.position.x, request.position.y, 2.0)
                .with_rotation(Quat::from_rotation_z(request.angle.to_radians())),
        ));
    }
}

pub(crate) fn cleanup_expired_effects(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut EffectLifetime)>,
) {
    let dt = time.delta_secs();
    for (entity, mut lifetime) in &mut query {
        lifetime.0 -= dt;
        if lifetime.0 <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
