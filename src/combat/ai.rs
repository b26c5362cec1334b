//! Combat domain: enemy pursuit and contact attacks.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use rand::Rng;

use crate::combat::components::{Enemy, EnemyHealth, EnemyKnockback, Health, Invincible};
use crate::combat::events::{EffectRequest, HealthChangedEvent};
use crate::combat::resources::{CombatTuning, HitStop};
use crate::combat::systems::apply_player_hit;
use crate::effects::EffectKind;
use crate::movement::{GameLayer, PLAYER_SIZE, Player};

pub(crate) const ENEMY_SIZE: Vec2 = Vec2::new(28.0, 36.0);
const ENEMY_HEALTH: f32 = 40.0;
const ENEMY_CONTACT_DAMAGE: f32 = 1.0;
const ENEMY_CHASE_SPEED: f32 = 90.0;
const ENEMY_KNOCKBACK_LENGTH: f32 = 0.3;
const ENEMY_KNOCKBACK_FACTOR: f32 = 1.4;
const PLAYER_HALF: Vec2 = Vec2::new(PLAYER_SIZE.x / 2.0, PLAYER_SIZE.y / 2.0);

pub(crate) fn spawn_enemies(mut commands: Commands) {
    let mut rng = rand::rng();

    for base_x in [-300.0_f32, 180.0, 420.0] {
        let x = base_x + rng.random_range(-40.0..40.0);
        commands.spawn((
            Enemy {
                contact_damage: ENEMY_CONTACT_DAMAGE,
                chase_speed: ENEMY_CHASE_SPEED,
            },
            EnemyHealth {
                current: ENEMY_HEALTH,
            },
            EnemyKnockback::new(ENEMY_KNOCKBACK_LENGTH, ENEMY_KNOCKBACK_FACTOR),
            Sprite {
                color: Color::srgb(0.75, 0.25, 0.3),
                custom_size: Some(ENEMY_SIZE),
                ..default()
            },
            Transform::from_xyz(x, -60.0, 0.0),
            RigidBody::Dynamic,
            Collider::rectangle(ENEMY_SIZE.x, ENEMY_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Enemy, [GameLayer::Ground]),
        ));
    }
}

pub(crate) fn tick_enemy_knockback(time: Res<Time>, mut query: Query<&mut EnemyKnockback>) {
    let dt = time.delta_secs();
    for mut knockback in &mut query {
        knockback.tick(dt);
    }
}

/// Horizontal pursuit of the player, suppressed while displacing.
pub(crate) fn enemy_chase(
    player_query: Query<&Transform, With<Player>>,
    mut enemy_query: Query<
        (&Transform, &Enemy, &EnemyKnockback, &mut LinearVelocity),
        Without<Player>,
    >,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let player_x = player_transform.translation.x;

    for (transform, enemy, knockback, mut velocity) in &mut enemy_query {
        if knockback.active {
            continue;
        }

        let dx = player_x - transform.translation.x;
        velocity.x = if dx.abs() > 8.0 {
            dx.signum() * enemy.chase_speed
        } else {
            0.0
        };
    }
}

/// Contact attack against the player. The invincibility window is checked at
/// this boundary: while it is active the damage path is never entered.
pub(crate) fn enemy_contact_attack(
    tuning: Res<CombatTuning>,
    mut hit_stop: ResMut<HitStop>,
    mut health_changed: MessageWriter<HealthChangedEvent>,
    mut effects: MessageWriter<EffectRequest>,
    mut player_query: Query<(&Transform, &mut Health, &mut Invincible), With<Player>>,
    enemy_query: Query<(&Transform, &Enemy), Without<Player>>,
) {
    let Ok((player_transform, mut health, mut invincible)) = player_query.single_mut() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (enemy_transform, enemy) in &enemy_query {
        let enemy_pos = enemy_transform.translation.truncate();
        let gap = (player_pos - enemy_pos).abs();
        let touching =
            gap.x < PLAYER_HALF.x + ENEMY_SIZE.x / 2.0 && gap.y < PLAYER_HALF.y + ENEMY_SIZE.y / 2.0;

        if !touching || invincible.is_active() {
            continue;
        }

        let changed = apply_player_hit(
            &mut health,
            &mut invincible,
            &mut hit_stop,
            enemy.contact_damage,
            tuning.invincibility_time,
        );
        if changed {
            health_changed.write(HealthChangedEvent);
        }
        effects.write(EffectRequest {
            kind: EffectKind::HitSpark,
            position: player_pos,
            flip_x: false,
            angle: 0.0,
        });
        info!(
            "Player struck for {}: health {}/{}",
            enemy.contact_damage,
            health.current(),
            health.max()
        );
    }
}
