use bevy::prelude::*;
use crate::input::PlayerInput;
use crate::shared::*;

/// Going to bed ends the day early.
pub fn request_sleep(input: Res<PlayerInput>, mut skip_writer: EventWriter<SkipDayEvent>) {
    if input.sleep {
        info!("[Player] Going to sleep");
        skip_writer.send(SkipDayEvent);
    }
}

pub fn open_shop(input: Res<PlayerInput>, mut next_state: ResMut<NextState<GameState>>) {
    if input.open_shop {
        next_state.set(GameState::Shop);
    }
}

pub fn close_shop(input: Res<PlayerInput>, mut next_state: ResMut<NextState<GameState>>) {
    if input.open_shop || input.ui_cancel {
        next_state.set(GameState::Playing);
    }
}

/// In the shop, digit N buys the Nth listing.
pub fn shop_buy_by_slot(
    input: Res<PlayerInput>,
    catalog: Res<ShopCatalog>,
    mut buy_writer: EventWriter<BuyRequestEvent>,
) {
    let Some(slot) = input.slot else {
        return;
    };
    if let Some(listing) = catalog.listings.get(slot as usize) {
        buy_writer.send(BuyRequestEvent {
            listing_id: listing.id.clone(),
        });
    }
}

pub fn pause_game(input: Res<PlayerInput>, mut next_state: ResMut<NextState<GameState>>) {
    if input.pause {
        next_state.set(GameState::Paused);
    }
}

pub fn resume_game(input: Res<PlayerInput>, mut next_state: ResMut<NextState<GameState>>) {
    if input.pause {
        next_state.set(GameState::Playing);
    }
}
