use bevy::prelude::*;
use crate::farming::Field;
use crate::shared::*;

/// World-space centre of the field.
pub fn field_centre(field: &Field) -> Vec2 {
    Vec2::new(
        (field.width.max(1) - 1) as f32 * TILE_SIZE / 2.0,
        (field.height.max(1) - 1) as f32 * TILE_SIZE / 2.0,
    )
}

/// Keep the whole field in view; it is small enough to never scroll.
pub fn centre_camera_on_field(
    field: Res<Field>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    if !field.is_changed() {
        return;
    }
    let centre = field_centre(&field);
    for mut cam_tf in &mut camera_query {
        cam_tf.translation.x = centre.x.round();
        cam_tf.translation.y = centre.y.round();
    }
}
