use bevy::prelude::*;
use crate::farming::Field;
use crate::input::PlayerInput;
use super::FieldCursor;

/// Move the cursor one step, staying inside the field. Returns whether it moved.
pub fn step_cursor(cursor: &mut FieldCursor, step: IVec2, field: &Field) -> bool {
    if step == IVec2::ZERO || field.is_empty() {
        return false;
    }
    let x = (cursor.x + step.x).clamp(0, field.width - 1);
    let y = (cursor.y + step.y).clamp(0, field.height - 1);
    let moved = (x, y) != (cursor.x, cursor.y);
    cursor.x = x;
    cursor.y = y;
    moved
}

/// Pull the cursor back inside a (possibly smaller) field.
pub fn clamp_cursor(cursor: &mut FieldCursor, field: &Field) {
    if field.is_empty() {
        cursor.x = 0;
        cursor.y = 0;
        return;
    }
    cursor.x = cursor.x.clamp(0, field.width - 1);
    cursor.y = cursor.y.clamp(0, field.height - 1);
}

pub fn move_cursor(
    input: Res<PlayerInput>,
    field: Res<Field>,
    mut cursor: ResMut<FieldCursor>,
) {
    step_cursor(&mut cursor, input.cursor_step, &field);
}

/// A loaded save or new config can change the field size.
pub fn clamp_cursor_on_resize(field: Res<Field>, mut cursor: ResMut<FieldCursor>) {
    if field.is_changed() {
        let before = *cursor;
        let mut after = before;
        clamp_cursor(&mut after, &field);
        if after != before {
            *cursor = after;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_stops_at_field_edge() {
        let field = Field::new(3, 2);
        let mut cursor = FieldCursor::default();
        assert!(!step_cursor(&mut cursor, IVec2::new(-1, 0), &field));
        assert!(step_cursor(&mut cursor, IVec2::new(1, 1), &field));
        assert_eq!((cursor.x, cursor.y), (1, 1));
        assert!(!step_cursor(&mut cursor, IVec2::new(0, 1), &field));
        step_cursor(&mut cursor, IVec2::new(5, 0), &field);
        assert_eq!(cursor.x, 2);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut cursor = FieldCursor { x: 7, y: 4, tool: None };
        clamp_cursor(&mut cursor, &Field::new(2, 2));
        assert_eq!((cursor.x, cursor.y), (1, 1));
        clamp_cursor(&mut cursor, &Field::new(0, 0));
        assert_eq!((cursor.x, cursor.y), (0, 0));
    }
}
