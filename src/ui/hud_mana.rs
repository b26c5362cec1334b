//! UI domain: mana bar, polled from the display ratio each frame.

use bevy::prelude::*;

use crate::combat::Mana;
use crate::movement::Player;

const MANA_BAR_WIDTH: f32 = 160.0;
const MANA_BAR_HEIGHT: f32 = 10.0;
const HUD_PADDING: f32 = 16.0;

/// Marker for the mana bar fill element
#[derive(Component)]
pub struct ManaBarFill;

pub(crate) fn spawn_mana_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(HUD_PADDING),
                top: Val::Px(HUD_PADDING + 28.0),
                width: Val::Px(MANA_BAR_WIDTH),
                height: Val::Px(MANA_BAR_HEIGHT),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.12, 0.8)),
            BorderColor::all(Color::srgb(0.3, 0.3, 0.35)),
        ))
        .with_children(|parent| {
            parent.spawn((
                ManaBarFill,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.3, 0.5, 0.95)),
            ));
        });
}

pub(crate) fn update_mana_hud(
    player_query: Query<&Mana, With<Player>>,
    mut fill_query: Query<&mut Node, With<ManaBarFill>>,
) {
    let Ok(mana) = player_query.single() else {
        return;
    };

    for mut node in &mut fill_query {
        node.width = Val::Percent(mana.ratio() * 100.0);
    }
}
