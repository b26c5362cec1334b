//! Combat domain: plugin wiring and public exports.

mod ai;
mod components;
mod events;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{AttackState, HealChannel, Health, Invincible, Mana, SpellState};
pub use events::{EffectRequest, EnemyHitEvent, HealthChangedEvent};
pub use resources::{AttackTuning, CombatInput, CombatTuning, HitStop, SpellTuning};

use bevy::prelude::*;

use crate::combat::ai::{enemy_chase, enemy_contact_attack, spawn_enemies, tick_enemy_knockback};
use crate::combat::systems::{
    apply_enemy_hits, channel_heal, despawn_dead_enemies, read_combat_input, resolve_attacks,
    resolve_spells, tick_hit_stop, tick_invincibility, update_fireballs,
};
use crate::core::PlayerTick;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AttackTuning>()
            .init_resource::<SpellTuning>()
            .init_resource::<CombatTuning>()
            .init_resource::<CombatInput>()
            .init_resource::<HitStop>()
            .add_message::<HealthChangedEvent>()
            .add_message::<EnemyHitEvent>()
            .add_message::<EffectRequest>()
            .add_systems(Startup, spawn_enemies)
            .add_systems(Update, read_combat_input.in_set(PlayerTick::Input))
            .add_systems(
                Update,
                (tick_invincibility, tick_hit_stop).in_set(PlayerTick::Bookkeeping),
            )
            .add_systems(
                Update,
                (resolve_attacks, resolve_spells, channel_heal)
                    .chain()
                    .in_set(PlayerTick::Resolve),
            )
            .add_systems(
                Update,
                (
                    tick_enemy_knockback,
                    enemy_chase,
                    enemy_contact_attack,
                    apply_enemy_hits,
                    update_fireballs,
                    despawn_dead_enemies,
                )
                    .chain()
                    .after(PlayerTick::React),
            );
    }
}
