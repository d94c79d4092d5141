use bevy::prelude::*;
use crate::save::{LoadCompleteEvent, SaveCompleteEvent};
use super::UiFontHandle;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct PauseMenuRoot;

#[derive(Component)]
pub struct PauseMenuStatusText;

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_pause_menu(mut commands: Commands, font_handle: Res<UiFontHandle>) {
    let font = font_handle.0.clone();

    commands
        .spawn((
            PauseMenuRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(10.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new("PAUSED"),
                TextFont {
                    font: font.clone(),
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            panel.spawn((
                PauseMenuStatusText,
                Text::new(""),
                TextFont {
                    font: font.clone(),
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.75, 0.45)),
            ));
            panel.spawn((
                Text::new("Esc: Resume | F5: Save | F9: Load"),
                TextFont {
                    font,
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.7)),
            ));
        });
}

pub fn despawn_pause_menu(mut commands: Commands, query: Query<Entity, With<PauseMenuRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

/// Report save/load results on the pause screen.
pub fn update_pause_status(
    mut save_events: EventReader<SaveCompleteEvent>,
    mut load_events: EventReader<LoadCompleteEvent>,
    mut status_query: Query<&mut Text, With<PauseMenuStatusText>>,
) {
    let mut status = None;
    for ev in save_events.read() {
        status = Some(if ev.success {
            "Game saved.".to_string()
        } else {
            format!("Save failed: {}", ev.message)
        });
    }
    for ev in load_events.read() {
        status = Some(if ev.success {
            "Game loaded.".to_string()
        } else {
            format!("Load failed: {}", ev.message)
        });
    }
    let Some(status) = status else {
        return;
    };
    for mut text in &mut status_query {
        **text = status.clone();
    }
}
