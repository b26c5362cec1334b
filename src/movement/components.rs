//! Movement domain: player state components and physics layers.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
    /// Player projectiles
    Projectile,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Action flags owned by the player. Collaborators read these; mutation goes
/// through the movement and combat systems only.
#[derive(Component, Debug)]
pub struct PlayerState {
    pub looking_right: bool,
    pub jumping: bool,
    pub dashing: bool,
    pub healing: bool,
    pub casting: bool,
    pub on_ground: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            looking_right: true,
            jumping: false,
            dashing: false,
            healing: false,
            casting: false,
            on_ground: false,
        }
    }
}

impl PlayerState {
    /// While dashing, every voluntary control input is suppressed for the tick.
    pub fn controls_locked(&self) -> bool {
        self.dashing
    }

    pub fn facing_sign(&self) -> f32 {
        if self.looking_right { 1.0 } else { -1.0 }
    }
}

/// Ephemeral jump counters, reset to fresh values whenever ground contact is
/// re-established.
#[derive(Component, Debug, Default)]
pub struct JumpState {
    /// Armed to the configured window on a jump press, otherwise decremented
    /// once per tick. May go negative; only `> 0` is meaningful.
    pub buffer_counter: i32,
    pub coyote_counter: f32,
    pub air_jumps_used: u8,
}

impl JumpState {
    pub fn refresh_grounded(&mut self, coyote_time: f32) {
        self.coyote_counter = coyote_time;
        self.air_jumps_used = 0;
    }

    /// Coyote grace decays while airborne and is never replenished mid-air.
    pub fn tick_airborne(&mut self, dt: f32) {
        self.coyote_counter -= dt;
    }

    pub fn buffered_launch_ready(&self) -> bool {
        self.buffer_counter > 0 && self.coyote_counter > 0.0
    }
}

/// Dash lifecycle as explicit timer state instead of a suspended routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashPhase {
    #[default]
    Idle,
    /// Gravity suspended, velocity locked along the facing direction.
    Active,
    /// Dash finished, waiting out the cooldown before re-arming.
    Cooling,
}

#[derive(Component, Debug, Default)]
pub struct DashState {
    pub phase: DashPhase,
    pub timer: f32,
    /// Set on dash start, cleared only on touching ground: one dash per
    /// airborne excursion regardless of cooldown state.
    pub used_in_air: bool,
}

impl DashState {
    pub fn can_start(&self) -> bool {
        self.phase == DashPhase::Idle && !self.used_in_air
    }

    pub fn start(&mut self, dash_time: f32) {
        self.phase = DashPhase::Active;
        self.timer = dash_time;
        self.used_in_air = true;
    }

    /// Advance the phase machine by one tick. Returns true on the tick the
    /// active dash ends so the caller can restore gravity and clear flags.
    /// A started dash always runs to completion; there is no cancel path.
    pub fn tick(&mut self, dt: f32, cooldown: f32) -> bool {
        match self.phase {
            DashPhase::Idle => false,
            DashPhase::Active => {
                self.timer -= dt;
                if self.timer <= 0.0 {
                    self.phase = DashPhase::Cooling;
                    self.timer = cooldown;
                    true
                } else {
                    false
                }
            }
            DashPhase::Cooling => {
                self.timer -= dt;
                if self.timer <= 0.0 {
                    self.phase = DashPhase::Idle;
                }
                false
            }
        }
    }
}

/// Per-axis forced displacement with step budgets. Armed by the attack
/// resolver as recoil; overrides voluntary movement while active.
#[derive(Component, Debug, Default)]
pub struct KnockbackState {
    pub x_active: bool,
    pub y_active: bool,
    pub steps_x: u32,
    pub steps_y: u32,
    /// Sign of the forced vertical velocity, captured when the Y axis arms.
    pub y_upward: bool,
}

impl KnockbackState {
    pub fn arm_x(&mut self) {
        self.x_active = true;
    }

    pub fn arm_y(&mut self, upward: bool) {
        self.y_active = true;
        self.y_upward = upward;
    }

    pub fn stop_x(&mut self) {
        self.x_active = false;
        self.steps_x = 0;
    }

    pub fn stop_y(&mut self) {
        self.y_active = false;
        self.steps_y = 0;
    }

    /// Count one tick against the X budget; force-clears the axis and resets
    /// its counter once the budget is exhausted.
    pub fn step_x(&mut self, budget: u32) {
        if self.x_active && self.steps_x < budget {
            self.steps_x += 1;
        } else {
            self.stop_x();
        }
    }

    pub fn step_y(&mut self, budget: u32) {
        if self.y_active && self.steps_y < budget {
            self.steps_y += 1;
        } else {
            self.stop_y();
        }
    }
}
