use bevy::prelude::*;
use crate::farming::Field;
use crate::input::PlayerInput;
use crate::shared::*;
use super::FieldCursor;

/// The ordered tool list for cycling with Q/E. `None` is context mode.
pub const TOOL_ORDER: [Option<FarmAction>; 5] = [
    None,
    Some(FarmAction::Till),
    Some(FarmAction::Water),
    Some(FarmAction::Plant),
    Some(FarmAction::Harvest),
];

pub fn cycle_tool(current: Option<FarmAction>, forward: bool) -> Option<FarmAction> {
    let idx = TOOL_ORDER.iter().position(|t| *t == current).unwrap_or(0);
    let len = TOOL_ORDER.len();
    let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
    TOOL_ORDER[next]
}

/// The action interact would perform at the cursor, if the cursor is on the field.
pub fn action_at(cursor: &FieldCursor, field: &Field) -> Option<FarmAction> {
    let tile = field.get(cursor.x, cursor.y)?;
    Some(cursor.tool.unwrap_or_else(|| FarmAction::for_condition(tile.condition)))
}

/// Digits 1-4 pick a tool, 0 returns to context mode, Q/E cycle.
pub fn tool_select(input: Res<PlayerInput>, mut cursor: ResMut<FieldCursor>) {
    let before = cursor.tool;
    let mut tool = before;
    if let Some(slot) = input.slot {
        if let Some(action) = FarmAction::ALL.get(slot as usize) {
            tool = Some(*action);
        }
    }
    if input.context_tool {
        tool = None;
    }
    if input.tool_next {
        tool = cycle_tool(tool, true);
    }
    if input.tool_prev {
        tool = cycle_tool(tool, false);
    }
    if tool != before {
        cursor.tool = tool;
        debug!(
            "[Player] Tool: {}",
            tool.map(FarmAction::label).unwrap_or("Hands (auto)")
        );
    }
}

/// Use the tool in hand on the tile under the cursor.
pub fn tool_use(
    input: Res<PlayerInput>,
    cursor: Res<FieldCursor>,
    field: Res<Field>,
    mut interact_writer: EventWriter<TileInteractEvent>,
) {
    if !input.interact {
        return;
    }
    let Some(action) = action_at(&cursor, &field) else {
        return;
    };
    interact_writer.send(TileInteractEvent {
        x: cursor.x,
        y: cursor.y,
        action,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_both_ways() {
        assert_eq!(cycle_tool(None, true), Some(FarmAction::Till));
        assert_eq!(cycle_tool(None, false), Some(FarmAction::Harvest));
        assert_eq!(cycle_tool(Some(FarmAction::Harvest), true), None);
    }

    #[test]
    fn test_context_mode_follows_tile() {
        let mut field = Field::new(2, 1);
        let cursor = FieldCursor { x: 1, y: 0, tool: None };
        assert_eq!(action_at(&cursor, &field), Some(FarmAction::Till));
        field.get_mut(1, 0).unwrap().apply(FarmAction::Till, 0, &CropDef::default()).unwrap();
        assert_eq!(action_at(&cursor, &field), Some(FarmAction::Water));

        let fixed = FieldCursor { tool: Some(FarmAction::Harvest), ..cursor };
        assert_eq!(action_at(&fixed, &field), Some(FarmAction::Harvest));

        let off_field = FieldCursor { x: 5, ..cursor };
        assert_eq!(action_at(&off_field, &field), None);
    }
}
