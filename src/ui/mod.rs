//! UI domain: HUD wiring.

mod hud_health;
mod hud_mana;

use bevy::prelude::*;

use crate::ui::hud_health::{spawn_health_hud, sync_health_hud};
use crate::ui::hud_mana::{spawn_mana_hud, update_mana_hud};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_health_hud, spawn_mana_hud))
            .add_systems(Update, (sync_health_hud, update_mana_hud));
    }
}
