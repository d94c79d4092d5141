mod hud;
mod shop_screen;
mod pause_menu;
mod toast;

use bevy::prelude::*;
use crate::shared::*;

/// Font used by every UI node. The default handle resolves to Bevy's
/// built-in font.
#[derive(Resource, Default, Clone)]
pub struct UiFontHandle(pub Handle<Font>);

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiFontHandle>();

        // ─── TOASTS — always present ───
        app.add_systems(Startup, toast::spawn_toast_container);
        app.add_systems(
            Update,
            (
                toast::wire_harvest_toasts,
                toast::wire_day_toasts,
                toast::handle_toast_events,
                toast::update_toasts,
            )
                .chain()
                .in_set(FarmSet::Present),
        );

        // ─── HUD — visible during Playing state ───
        app.add_systems(OnEnter(GameState::Playing), hud::spawn_hud);
        app.add_systems(OnExit(GameState::Playing), hud::despawn_hud);
        app.add_systems(
            Update,
            (
                hud::update_time_display,
                hud::update_balance_display,
                hud::update_tool_display,
                hud::update_objective_display,
            )
                .in_set(FarmSet::Present)
                .run_if(in_state(GameState::Playing)),
        );

        // ─── SHOP SCREEN ───
        app.add_systems(OnEnter(GameState::Shop), shop_screen::spawn_shop_screen);
        app.add_systems(OnExit(GameState::Shop), shop_screen::despawn_shop_screen);
        app.add_systems(
            Update,
            shop_screen::update_shop_display
                .in_set(FarmSet::Present)
                .run_if(in_state(GameState::Shop)),
        );

        // ─── PAUSE MENU ───
        app.add_systems(OnEnter(GameState::Paused), pause_menu::spawn_pause_menu);
        app.add_systems(OnExit(GameState::Paused), pause_menu::despawn_pause_menu);
        app.add_systems(
            Update,
            pause_menu::update_pause_status
                .in_set(FarmSet::Present)
                .run_if(in_state(GameState::Paused)),
        );
    }
}
