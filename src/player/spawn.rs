use bevy::prelude::*;
use crate::farming::grid_to_world;
use crate::shared::*;
use super::{FieldCursor, FieldCursorMarker};

/// Spawn the cursor highlight once; re-entering Playing keeps the existing one.
pub fn spawn_cursor_sprite(
    mut commands: Commands,
    existing: Query<(), With<FieldCursorMarker>>,
    cursor: Res<FieldCursor>,
) {
    if !existing.is_empty() {
        return;
    }
    commands.spawn((
        Sprite {
            color: Color::srgba(1.0, 1.0, 0.6, 0.35),
            custom_size: Some(Vec2::splat(TILE_SIZE)),
            ..default()
        },
        Transform::from_translation(grid_to_world(cursor.x, cursor.y).with_z(3.0)),
        FieldCursorMarker,
    ));
}

pub fn sync_cursor_sprite(
    cursor: Res<FieldCursor>,
    mut query: Query<&mut Transform, With<FieldCursorMarker>>,
) {
    let target = grid_to_world(cursor.x, cursor.y).with_z(3.0);
    for mut transform in &mut query {
        transform.translation = target;
    }
}
