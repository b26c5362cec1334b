//! Combat domain: tuning, input, and the hit-stop controller.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct AttackTuning {
    pub damage: f32,
    pub cooldown: f32,
    /// Mana granted per landed hit against an enemy.
    pub mana_on_hit: f32,
    pub side_area: Vec2,
    pub side_offset: f32,
    pub up_area: Vec2,
    pub up_offset: f32,
    pub down_area: Vec2,
    pub down_offset: f32,
}

impl Default for AttackTuning {
    fn default() -> Self {
        Self {
            damage: 10.0,
            cooldown: 0.35,
            mana_on_hit: 8.0,
            side_area: Vec2::new(46.0, 40.0),
            side_offset: 30.0,
            up_area: Vec2::new(40.0, 46.0),
            up_offset: 34.0,
            down_area: Vec2::new(40.0, 46.0),
            down_offset: 34.0,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct SpellTuning {
    pub mana_cost: f32,
    pub cooldown: f32,
    /// Animation lead before the effect actually spawns.
    pub windup: f32,
    /// Tail before control returns and `casting` clears.
    pub recovery: f32,
    pub fireball_damage: f32,
    pub fireball_force: f32,
    pub fireball_speed: f32,
    pub fireball_lifetime: f32,
}

impl Default for SpellTuning {
    fn default() -> Self {
        Self {
            mana_cost: 30.0,
            cooldown: 0.8,
            windup: 0.15,
            recovery: 0.25,
            fireball_damage: 18.0,
            fireball_force: 260.0,
            fireball_speed: 540.0,
            fireball_lifetime: 1.0,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct CombatTuning {
    pub max_health: i32,
    pub max_mana: f32,
    pub invincibility_time: f32,
    /// Mana drained per second while channeling a heal.
    pub heal_mana_drain: f32,
    /// Seconds of channel per restored health point.
    pub heal_tick_time: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            max_health: 5,
            max_mana: 100.0,
            invincibility_time: 1.0,
            heal_mana_drain: 22.0,
            heal_tick_time: 0.9,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct CombatInput {
    pub attack_just_pressed: bool,
    pub cast_just_pressed: bool,
    pub heal_held: bool,
}

/// Global time-scale dip on being struck. A second hit mid-restoration
/// re-arms the delay instead of compounding it; the ramp back to nominal
/// speed runs on real time so it is immune to its own scaling.
#[derive(Resource, Debug, Clone)]
pub struct HitStop {
    pub scale: f32,
    pub delay_remaining: f32,
    /// Near-zero scale applied at the moment of impact.
    pub stop_scale: f32,
    pub delay: f32,
    /// Scale restored per real second once the delay elapses.
    pub restore_rate: f32,
}

impl Default for HitStop {
    fn default() -> Self {
        Self {
            scale: 1.0,
            delay_remaining: 0.0,
            stop_scale: 0.05,
            delay: 0.5,
            restore_rate: 5.0,
        }
    }
}

impl HitStop {
    /// Drop the time scale and (re)arm the restoration delay.
    pub fn strike(&mut self) {
        self.scale = self.stop_scale;
        self.delay_remaining = self.delay;
    }

    /// Advance on unscaled time. Returns the scale to apply this tick.
    pub fn tick(&mut self, real_dt: f32) -> f32 {
        if self.delay_remaining > 0.0 {
            self.delay_remaining -= real_dt;
        } else if self.scale < 1.0 {
            self.scale = (self.scale + self.restore_rate * real_dt).min(1.0);
        }
        self.scale
    }
}
