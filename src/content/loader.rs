//! Loader for the RON tuning file at startup.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use super::data::{CombatOverrides, MovementOverrides, TuningFile};
use crate::combat::{AttackTuning, CombatTuning, SpellTuning};
use crate::movement::MovementTuning;

const TUNING_PATH: &str = "assets/tuning.ron";

/// Error type for tuning load failures.
#[derive(Debug)]
pub struct TuningLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for TuningLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

pub(crate) fn load_tuning(path: &Path) -> Result<TuningFile, TuningLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| TuningLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    ron_options()
        .from_str(&contents)
        .map_err(|e| TuningLoadError {
            file: file_name,
            message: format!("Parse error: {}", e),
        })
}

/// Runs in PreStartup so the resources are final before the player spawns.
pub(crate) fn load_and_apply_tuning(
    mut movement: ResMut<MovementTuning>,
    mut attack: ResMut<AttackTuning>,
    mut spell: ResMut<SpellTuning>,
    mut combat: ResMut<CombatTuning>,
) {
    let file = match load_tuning(Path::new(TUNING_PATH)) {
        Ok(file) => file,
        Err(e) => {
            warn!("{}; keeping default tuning", e);
            return;
        }
    };

    apply_movement(&file.movement, &mut movement);
    apply_combat(&file.combat, &mut attack, &mut spell, &mut combat);
    info!("Tuning loaded from {}", TUNING_PATH);
}

/// Assigns an override only when it is present and positive.
fn set_positive(name: &str, value: Option<f32>, target: &mut f32) {
    if let Some(v) = value {
        if v > 0.0 {
            *target = v;
        } else {
            warn!("Ignoring non-positive tuning value {}: {}", name, v);
        }
    }
}

fn apply_movement(overrides: &MovementOverrides, tuning: &mut MovementTuning) {
    set_positive("walk_speed", overrides.walk_speed, &mut tuning.walk_speed);
    set_positive("jump_force", overrides.jump_force, &mut tuning.jump_force);
    set_positive("gravity", overrides.gravity, &mut tuning.gravity);
    set_positive("coyote_time", overrides.coyote_time, &mut tuning.coyote_time);
    set_positive("dash_speed", overrides.dash_speed, &mut tuning.dash_speed);
    set_positive("dash_time", overrides.dash_time, &mut tuning.dash_time);
    set_positive(
        "dash_cooldown",
        overrides.dash_cooldown,
        &mut tuning.dash_cooldown,
    );
    set_positive(
        "knockback_x_speed",
        overrides.knockback_x_speed,
        &mut tuning.knockback_x_speed,
    );
    set_positive(
        "knockback_y_speed",
        overrides.knockback_y_speed,
        &mut tuning.knockback_y_speed,
    );

    if let Some(ticks) = overrides.jump_buffer_ticks {
        if ticks > 0 {
            tuning.jump_buffer_ticks = ticks;
        } else {
            warn!("Ignoring non-positive tuning value jump_buffer_ticks: {}", ticks);
        }
    }
    if let Some(jumps) = overrides.max_air_jumps {
        tuning.max_air_jumps = jumps;
    }
    if let Some(short_hop) = overrides.short_hop {
        tuning.short_hop = short_hop;
    }
    if let Some(steps) = overrides.knockback_x_steps {
        tuning.knockback_x_steps = steps;
    }
    if let Some(steps) = overrides.knockback_y_steps {
        tuning.knockback_y_steps = steps;
    }
}

fn apply_combat(
    overrides: &CombatOverrides,
    attack: &mut AttackTuning,
    spell: &mut SpellTuning,
    combat: &mut CombatTuning,
) {
    set_positive("attack_damage", overrides.attack_damage, &mut attack.damage);
    set_positive(
        "attack_cooldown",
        overrides.attack_cooldown,
        &mut attack.cooldown,
    );
    set_positive("mana_on_hit", overrides.mana_on_hit, &mut attack.mana_on_hit);
    set_positive(
        "invincibility_time",
        overrides.invincibility_time,
        &mut combat.invincibility_time,
    );
    set_positive(
        "spell_mana_cost",
        overrides.spell_mana_cost,
        &mut spell.mana_cost,
    );
    set_positive(
        "spell_cooldown",
        overrides.spell_cooldown,
        &mut spell.cooldown,
    );
}
