//! Combat domain: attack and spell resolution, player damage, hit-stop, and
//! the enemy side of the damage-reception contract.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{
    AttackDirection, AttackState, Enemy, EnemyHealth, EnemyKnockback, Fireball, HealChannel,
    Health, Invincible, Mana, SpellPhase, SpellState, select_direction,
};
use crate::combat::events::{EffectRequest, EnemyHitEvent, HealthChangedEvent};
use crate::combat::resources::{AttackTuning, CombatInput, CombatTuning, HitStop, SpellTuning};
use crate::effects::EffectKind;
use crate::movement::{
    GameLayer, KnockbackState, MovementInput, MovementTuning, Player, PlayerState,
};

pub(crate) fn read_combat_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<CombatInput>,
) {
    input.attack_just_pressed =
        keyboard.just_pressed(KeyCode::KeyZ) || keyboard.just_pressed(KeyCode::KeyU);
    input.cast_just_pressed =
        keyboard.just_pressed(KeyCode::KeyC) || keyboard.just_pressed(KeyCode::KeyO);
    input.heal_held = keyboard.pressed(KeyCode::KeyX) || keyboard.pressed(KeyCode::KeyI);
}

pub(crate) fn tick_invincibility(time: Res<Time>, mut query: Query<&mut Invincible>) {
    let dt = time.delta_secs();
    for mut invincible in &mut query {
        if invincible.timer > 0.0 {
            invincible.timer -= dt;
        }
    }
}

/// Runs on real time: the whole point is to manipulate the virtual clock.
pub(crate) fn tick_hit_stop(
    real_time: Res<Time<Real>>,
    mut hit_stop: ResMut<HitStop>,
    mut virtual_time: ResMut<Time<Virtual>>,
) {
    let scale = hit_stop.tick(real_time.delta_secs());
    virtual_time.set_relative_speed(scale);
}

/// The full struck-player routine: clamped damage, invincibility window,
/// hit-stop. The caller must have checked the invincibility window already;
/// this routine completes before returning, so a hit is atomic from the
/// attacker's viewpoint. Returns whether health actually changed.
pub(crate) fn apply_player_hit(
    health: &mut Health,
    invincible: &mut Invincible,
    hit_stop: &mut HitStop,
    damage: f32,
    invincibility_time: f32,
) -> bool {
    let changed = health.take_damage(damage);
    invincible.arm(invincibility_time);
    hit_stop.strike();
    changed
}

/// Hitbox anchor offset and extents for a resolved attack direction.
pub(crate) fn attack_box(
    direction: AttackDirection,
    facing_sign: f32,
    tuning: &AttackTuning,
) -> (Vec2, Vec2) {
    match direction {
        AttackDirection::Side => (
            Vec2::new(tuning.side_offset * facing_sign, 0.0),
            tuning.side_area,
        ),
        AttackDirection::Up => (Vec2::new(0.0, tuning.up_offset), tuning.up_area),
        AttackDirection::Down => (Vec2::new(0.0, -tuning.down_offset), tuning.down_area),
    }
}

pub(crate) fn resolve_attacks(
    time: Res<Time>,
    input: Res<CombatInput>,
    move_input: Res<MovementInput>,
    tuning: Res<AttackTuning>,
    movement_tuning: Res<MovementTuning>,
    spatial_query: SpatialQuery,
    mut effects: MessageWriter<EffectRequest>,
    mut hits: MessageWriter<EnemyHitEvent>,
    mut query: Query<
        (
            &Transform,
            &PlayerState,
            &mut AttackState,
            &mut KnockbackState,
            &mut Mana,
        ),
        With<Player>,
    >,
    enemy_query: Query<&Transform, (With<EnemyHealth>, Without<Player>)>,
) {
    let dt = time.delta_secs();

    for (transform, state, mut attack, mut knockback, mut mana) in &mut query {
        if state.controls_locked() {
            continue;
        }

        attack.since_last += dt;
        if !(input.attack_just_pressed && attack.ready(tuning.cooldown)) {
            continue;
        }
        attack.since_last = 0.0;

        let direction = select_direction(move_input.axis.y, state.on_ground);
        let (offset, area) = attack_box(direction, state.facing_sign(), &tuning);
        let origin = transform.translation.truncate() + offset;

        let angle = match direction {
            AttackDirection::Side => 0.0,
            AttackDirection::Up => 90.0,
            AttackDirection::Down => -90.0,
        };
        effects.write(EffectRequest {
            kind: EffectKind::Slash,
            position: origin,
            flip_x: !state.looking_right,
            angle,
        });

        let filter = SpatialQueryFilter::from_mask(GameLayer::Enemy);
        let shape = Collider::rectangle(area.x, area.y);
        let overlapping = spatial_query.shape_intersections(&shape, origin, 0.0, &filter);

        if overlapping.is_empty() {
            continue;
        }

        // Recoil: any overlap arms the attacker's own knockback on the
        // matching axis. A down attack recoils upward (pogo), an up attack
        // recoils downward.
        let force = match direction {
            AttackDirection::Side => {
                knockback.arm_x();
                movement_tuning.knockback_x_speed
            }
            AttackDirection::Up => {
                knockback.arm_y(false);
                movement_tuning.knockback_y_speed
            }
            AttackDirection::Down => {
                knockback.arm_y(true);
                movement_tuning.knockback_y_speed
            }
        };

        let mut landed = 0;
        for target in overlapping {
            // Targets without the damage-reception capability are skipped.
            let Ok(target_transform) = enemy_query.get(target) else {
                continue;
            };
            let toward_attacker = (transform.translation.truncate()
                - target_transform.translation.truncate())
            .normalize_or_zero();
            hits.write(EnemyHitEvent {
                target,
                damage: tuning.damage,
                direction: toward_attacker,
                force,
            });
            mana.gain(tuning.mana_on_hit);
            landed += 1;
        }

        debug!("Attack {:?}: {} hits landed", direction, landed);
    }
}

pub(crate) fn resolve_spells(
    time: Res<Time>,
    input: Res<CombatInput>,
    move_input: Res<MovementInput>,
    tuning: Res<SpellTuning>,
    attack_tuning: Res<AttackTuning>,
    mut commands: Commands,
    mut effects: MessageWriter<EffectRequest>,
    mut query: Query<(&Transform, &mut PlayerState, &mut SpellState, &mut Mana), With<Player>>,
) {
    let dt = time.delta_secs();

    for (transform, mut state, mut spell, mut mana) in &mut query {
        // An in-flight cast always runs to completion, even through a dash.
        let fired = spell.tick(dt, tuning.recovery);
        if fired {
            let position = transform.translation.truncate();
            match spell.direction {
                AttackDirection::Side => {
                    let sign = state.facing_sign();
                    spawn_fireball(
                        &mut commands,
                        position + Vec2::new(attack_tuning.side_offset * sign, 0.0),
                        sign,
                        &tuning,
                    );
                }
                AttackDirection::Up => {
                    effects.write(EffectRequest {
                        kind: EffectKind::SpellBurst,
                        position: position + Vec2::new(0.0, attack_tuning.up_offset),
                        flip_x: false,
                        angle: 90.0,
                    });
                }
                AttackDirection::Down => {
                    effects.write(EffectRequest {
                        kind: EffectKind::SpellBurst,
                        position: position - Vec2::new(0.0, attack_tuning.down_offset),
                        flip_x: false,
                        angle: -90.0,
                    });
                }
            }
            debug!("Spell fired: {:?}", spell.direction);
        }

        if spell.phase == SpellPhase::Idle && state.casting {
            state.casting = false;
        }

        if state.controls_locked() {
            continue;
        }

        if input.cast_just_pressed && spell.ready() && mana.try_spend(tuning.mana_cost) {
            let direction = select_direction(move_input.axis.y, state.on_ground);
            spell.begin(tuning.windup, tuning.cooldown, direction);
            state.casting = true;
            debug!(
                "Cast started: {:?}, mana left {:.1}",
                direction,
                mana.current()
            );
        }
    }
}

fn spawn_fireball(commands: &mut Commands, position: Vec2, sign: f32, tuning: &SpellTuning) {
    commands.spawn((
        Fireball {
            damage: tuning.fireball_damage,
            hit_force: tuning.fireball_force,
            speed: tuning.fireball_speed,
            lifetime: tuning.fireball_lifetime,
            direction: sign,
        },
        Sprite {
            color: Color::srgb(1.0, 0.55, 0.15),
            custom_size: Some(Vec2::new(16.0, 10.0)),
            flip_x: sign < 0.0,
            ..default()
        },
        Transform::from_xyz(position.x, position.y, 1.0),
    ));
}

/// Heal channel: grounded, idle and uninterrupted, mana drains into health
/// one point per tick interval. Broken by movement, damage inputs, or
/// releasing the button.
pub(crate) fn channel_heal(
    time: Res<Time>,
    input: Res<CombatInput>,
    move_input: Res<MovementInput>,
    tuning: Res<CombatTuning>,
    mut health_changed: MessageWriter<HealthChangedEvent>,
    mut query: Query<
        (
            &mut PlayerState,
            &mut HealChannel,
            &mut Health,
            &mut Mana,
            &Invincible,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (mut state, mut channel, mut health, mut mana, invincible) in &mut query {
        let drain = tuning.heal_mana_drain * dt;
        let can_channel = input.heal_held
            && state.on_ground
            && move_input.axis.x == 0.0
            && !state.controls_locked()
            && !state.casting
            && !invincible.is_active()
            && health.current() < health.max()
            && mana.has(drain);

        if !can_channel {
            state.healing = false;
            channel.progress = 0.0;
            continue;
        }

        state.healing = true;
        let next = mana.current() - drain;
        mana.set(next);
        channel.progress += dt;
        if channel.progress >= tuning.heal_tick_time {
            channel.progress = 0.0;
            if health.heal(1) {
                health_changed.write(HealthChangedEvent);
                debug!("Heal tick: health now {}", health.current());
            }
        }
    }
}

/// Receiving side of the damage-reception contract. Targets apply damage and,
/// only when not already displacing, a knockback impulse along
/// `-direction * force`.
pub(crate) fn apply_enemy_hits(
    mut hits: MessageReader<EnemyHitEvent>,
    mut effects: MessageWriter<EffectRequest>,
    mut query: Query<(
        &Transform,
        &mut EnemyHealth,
        &mut EnemyKnockback,
        &mut LinearVelocity,
    )>,
) {
    for hit in hits.read() {
        let Ok((transform, mut health, mut knockback, mut velocity)) = query.get_mut(hit.target)
        else {
            // Target vanished or lacks the capability: skipped, not an error.
            continue;
        };

        health.current -= hit.damage;

        if !knockback.active {
            let impulse = -hit.direction * hit.force * knockback.factor;
            velocity.x += impulse.x;
            velocity.y += impulse.y;
            knockback.active = true;
            knockback.timer = 0.0;
        }

        effects.write(EffectRequest {
            kind: EffectKind::HitSpark,
            position: transform.translation.truncate(),
            flip_x: false,
            angle: 0.0,
        });
    }
}

pub(crate) fn despawn_dead_enemies(
    mut commands: Commands,
    query: Query<(Entity, &EnemyHealth, &Transform), With<Enemy>>,
    mut effects: MessageWriter<EffectRequest>,
) {
    for (entity, health, transform) in &query {
        if health.current <= 0.0 {
            effects.write(EffectRequest {
                kind: EffectKind::HitSpark,
                position: transform.translation.truncate(),
                flip_x: false,
                angle: 0.0,
            });
            commands.entity(entity).despawn();
            info!("Enemy defeated");
        }
    }
}

pub(crate) fn update_fireballs(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut commands: Commands,
    mut hits: MessageWriter<EnemyHitEvent>,
    enemy_query: Query<&Transform, (With<EnemyHealth>, Without<Fireball>)>,
    mut query: Query<(Entity, &mut Fireball, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (entity, mut fireball, mut transform) in &mut query {
        transform.translation.x += fireball.direction * fireball.speed * dt;
        fireball.lifetime -= dt;
        if fireball.lifetime <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }

        let position = transform.translation.truncate();
        let filter = SpatialQueryFilter::from_mask(GameLayer::Enemy);
        let shape = Collider::circle(8.0);
        let overlapping = spatial_query.shape_intersections(&shape, position, 0.0, &filter);

        let mut hit_any = false;
        for target in overlapping {
            let Ok(target_transform) = enemy_query.get(target) else {
                continue;
            };
            let toward_attacker =
                (position - target_transform.translation.truncate()).normalize_or_zero();
            hits.write(EnemyHitEvent {
                target,
                damage: fireball.damage,
                direction: toward_attacker,
                force: fireball.hit_force,
            });
            hit_any = true;
        }

        if hit_any {
            commands.entity(entity).despawn();
        }
    }
}
