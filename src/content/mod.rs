//! Content domain: RON tuning overrides applied at startup.

mod data;
mod loader;

use bevy::prelude::*;

use crate::content::loader::load_and_apply_tuning;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_and_apply_tuning);
    }
}
