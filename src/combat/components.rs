//! Combat domain: resources on the actor, invincibility, attack and spell
//! state, and the enemy-side damage-reception state.

use bevy::prelude::*;

/// Clamped health. External mutation goes through `set`, which saturates to
/// `[0, max]` and reports whether the stored value actually changed so the
/// notification fires only on real changes.
#[derive(Component, Debug, Clone)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Clamps and assigns. Returns true when the clamped value differs from
    /// the prior one; assigning an equal value after clamping is a no-op.
    pub fn set(&mut self, value: i32) -> bool {
        let clamped = value.clamp(0, self.max);
        if clamped == self.current {
            false
        } else {
            self.current = clamped;
            true
        }
    }

    /// Rounded, saturating damage routed through `set`.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        let delta = amount.round() as i32;
        self.set(self.current.saturating_sub(delta))
    }

    pub fn heal(&mut self, amount: i32) -> bool {
        self.set(self.current.saturating_add(amount))
    }
}

/// Clamped mana pool. No change notification; the HUD polls `ratio`.
#[derive(Component, Debug, Clone)]
pub struct Mana {
    current: f32,
    max: f32,
}

impl Mana {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
    }

    pub fn gain(&mut self, amount: f32) {
        self.set(self.current + amount);
    }

    /// Spends only when the full cost is available.
    pub fn try_spend(&mut self, cost: f32) -> bool {
        if self.current >= cost {
            self.current -= cost;
            true
        } else {
            false
        }
    }

    pub fn has(&self, amount: f32) -> bool {
        self.current >= amount
    }

    pub fn ratio(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }
}

/// Timed damage-immunity window. The damage boundary checks this before
/// attempting a hit; the resource model itself does not gate.
#[derive(Component, Debug, Default)]
pub struct Invincible {
    pub timer: f32,
}

impl Invincible {
    pub fn arm(&mut self, duration: f32) {
        self.timer = duration;
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }
}

/// Melee attack bookkeeping: the cooldown accumulates per tick and resets on
/// each successful swing.
#[derive(Component, Debug, Default)]
pub struct AttackState {
    pub since_last: f32,
}

impl AttackState {
    pub fn ready(&self, cooldown: f32) -> bool {
        self.since_last >= cooldown
    }
}

/// Attack aim resolved from the vertical axis, in fixed precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackDirection {
    #[default]
    Side,
    Up,
    Down,
}

/// Side wins when there is no vertical input or when aiming down while
/// grounded; down fires only airborne. Exactly one branch per tick.
pub fn select_direction(y_axis: f32, grounded: bool) -> AttackDirection {
    if y_axis == 0.0 || (y_axis < 0.0 && grounded) {
        AttackDirection::Side
    } else if y_axis > 0.0 {
        AttackDirection::Up
    } else {
        AttackDirection::Down
    }
}

/// Spell cast as explicit timer state: an animation-lead windup before the
/// effect spawns, then a recovery tail before control returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpellPhase {
    #[default]
    Idle,
    Windup,
    Recovery,
}

#[derive(Component, Debug, Default)]
pub struct SpellState {
    pub phase: SpellPhase,
    pub timer: f32,
    pub cooldown_timer: f32,
    pub direction: AttackDirection,
}

impl SpellState {
    pub fn ready(&self) -> bool {
        self.phase == SpellPhase::Idle && self.cooldown_timer <= 0.0
    }

    pub fn begin(&mut self, windup: f32, cooldown: f32, direction: AttackDirection) {
        self.phase = SpellPhase::Windup;
        self.timer = windup;
        self.cooldown_timer = cooldown;
        self.direction = direction;
    }

    /// Advance the cast. Returns true on the tick the windup elapses, which
    /// is when the spell effect actually spawns. Runs to completion once
    /// started; only the cooldown ticks while idle.
    pub fn tick(&mut self, dt: f32, recovery: f32) -> bool {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer -= dt;
        }

        match self.phase {
            SpellPhase::Idle => false,
            SpellPhase::Windup => {
                self.timer -= dt;
                if self.timer <= 0.0 {
                    self.phase = SpellPhase::Recovery;
                    self.timer = recovery;
                    true
                } else {
                    false
                }
            }
            SpellPhase::Recovery => {
                self.timer -= dt;
                if self.timer <= 0.0 {
                    self.phase = SpellPhase::Idle;
                }
                false
            }
        }
    }

    pub fn is_casting(&self) -> bool {
        self.phase != SpellPhase::Idle
    }
}

/// Progress toward the next restored health point while channeling a heal.
#[derive(Component, Debug, Default)]
pub struct HealChannel {
    pub progress: f32,
}

/// Marks an opponent. Opponents own their health and knockback independently
/// and are only reached through the damage-reception contract.
#[derive(Component, Debug)]
pub struct Enemy {
    pub contact_damage: f32,
    pub chase_speed: f32,
}

#[derive(Component, Debug)]
pub struct EnemyHealth {
    pub current: f32,
}

/// Enemy-side displacement: an incoming hit applies an impulse only when the
/// enemy is not already displacing.
#[derive(Component, Debug)]
pub struct EnemyKnockback {
    pub active: bool,
    pub timer: f32,
    pub length: f32,
    pub factor: f32,
}

impl EnemyKnockback {
    pub fn new(length: f32, factor: f32) -> Self {
        Self {
            active: false,
            timer: 0.0,
            length,
            factor,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if self.active {
            if self.timer < self.length {
                self.timer += dt;
            } else {
                self.active = false;
                self.timer = 0.0;
            }
        }
    }
}

/// Side-cast projectile: straight flight, fixed lifetime, applies the
/// damage-reception contract to the first enemy it overlaps.
#[derive(Component, Debug)]
pub struct Fireball {
    pub damage: f32,
    pub hit_force: f32,
    pub speed: f32,
    pub lifetime: f32,
    /// Horizontal flight sign, captured from the caster's facing.
    pub direction: f32,
}
