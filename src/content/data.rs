//! Tuning override definitions deserialized from assets/tuning.ron.
//! Every field is optional; missing fields keep the built-in defaults.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TuningFile {
    pub movement: MovementOverrides,
    pub combat: CombatOverrides,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MovementOverrides {
    pub walk_speed: Option<f32>,
    pub jump_force: Option<f32>,
    pub gravity: Option<f32>,
    pub jump_buffer_ticks: Option<i32>,
    pub coyote_time: Option<f32>,
    pub max_air_jumps: Option<u8>,
    pub short_hop: Option<bool>,
    pub dash_speed: Option<f32>,
    pub dash_time: Option<f32>,
    pub dash_cooldown: Option<f32>,
    pub knockback_x_speed: Option<f32>,
    pub knockback_y_speed: Option<f32>,
    pub knockback_x_steps: Option<u32>,
    pub knockback_y_steps: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CombatOverrides {
    pub attack_damage: Option<f32>,
    pub attack_cooldown: Option<f32>,
    pub invincibility_time: Option<f32>,
    pub mana_on_hit: Option<f32>,
    pub spell_mana_cost: Option<f32>,
    pub spell_cooldown: Option<f32>,
}
