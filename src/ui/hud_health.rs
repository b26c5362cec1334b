//! UI domain: per-point health containers.
//!
//! Rebuilt only when the health-changed notification fires; the HUD never
//! polls health on quiet frames.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::{Health, HealthChangedEvent};
use crate::movement::Player;

const CELL_SIZE: f32 = 18.0;
const CELL_GAP: f32 = 6.0;
const HUD_PADDING: f32 = 16.0;

/// Marker for the health container row
#[derive(Component)]
pub struct HealthHudRoot;

/// Marker for one health point cell
#[derive(Component)]
pub struct HealthCell;

pub(crate) fn spawn_health_hud(mut commands: Commands) {
    commands.spawn((
        HealthHudRoot,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(HUD_PADDING),
            top: Val::Px(HUD_PADDING),
            column_gap: Val::Px(CELL_GAP),
            ..default()
        },
    ));
}

pub(crate) fn sync_health_hud(
    mut commands: Commands,
    mut health_changed: MessageReader<HealthChangedEvent>,
    player_query: Query<&Health, With<Player>>,
    root_query: Query<Entity, With<HealthHudRoot>>,
    cells: Query<Entity, With<HealthCell>>,
    mut initialized: Local<bool>,
) {
    let notified = health_changed.read().count() > 0;
    if *initialized && !notified {
        return;
    }

    let Ok(health) = player_query.single() else {
        return;
    };
    let Ok(root) = root_query.single() else {
        return;
    };
    *initialized = true;

    for cell in &cells {
        commands.entity(cell).despawn();
    }

    for i in 0..health.max() {
        let filled = i < health.current();
        let color = if filled {
            Color::srgb(0.85, 0.2, 0.25)
        } else {
            Color::srgba(0.2, 0.2, 0.22, 0.8)
        };
        let cell = commands
            .spawn((
                HealthCell,
                Node {
                    width: Val::Px(CELL_SIZE),
                    height: Val::Px(CELL_SIZE),
                    ..default()
                },
                BackgroundColor(color),
            ))
            .id();
        commands.entity(root).add_child(cell);
    }
}
