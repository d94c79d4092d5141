//! Player domain — the field cursor, the equipped tool, and the keys that
//! turn into farm actions, sleep, shop and pause requests.

mod movement;
mod tools;
mod camera;
mod interaction;
mod spawn;

use bevy::prelude::*;
use crate::shared::*;

pub use tools::action_at;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FieldCursor>();

        app.add_systems(OnEnter(GameState::Playing), spawn::spawn_cursor_sprite);

        // -- Systems that run every frame while Playing --
        app.add_systems(
            Update,
            (
                movement::move_cursor,
                tools::tool_select,
                // Selection resolves before use so "2 then F" on one frame waters.
                tools::tool_use,
                interaction::request_sleep,
                interaction::open_shop,
                interaction::pause_game,
            )
                .chain()
                .in_set(FarmSet::Input)
                .run_if(in_state(GameState::Playing)),
        );

        app.add_systems(
            Update,
            (interaction::shop_buy_by_slot, interaction::close_shop)
                .in_set(FarmSet::Input)
                .run_if(in_state(GameState::Shop)),
        );

        app.add_systems(
            Update,
            interaction::resume_game
                .in_set(FarmSet::Input)
                .run_if(in_state(GameState::Paused)),
        );

        app.add_systems(
            PostUpdate,
            (
                movement::clamp_cursor_on_resize,
                spawn::sync_cursor_sprite,
                camera::centre_camera_on_field,
            )
                .chain()
                .run_if(not(in_state(GameState::Loading))),
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Local resources (player-domain only)
// ═══════════════════════════════════════════════════════════════════════════

/// The tile the player is pointing at, and the tool in hand.
/// `tool: None` means context mode: interact picks the tile's next step.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldCursor {
    pub x: i32,
    pub y: i32,
    pub tool: Option<FarmAction>,
}

/// Highlight sprite drawn over the cursor tile.
#[derive(Component, Debug)]
pub struct FieldCursorMarker;
