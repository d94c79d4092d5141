//! Economy domain — balances, progress flags, the shop, and the reward and
//! win controllers.
//!
//! Other domains request balance changes with `ResourceChangeEvent`; only
//! `apply_resource_changes` and the shop mutate balances directly.

use bevy::prelude::*;
use crate::shared::*;

pub mod wallet;
pub mod shop;
pub mod rewards;

use wallet::{apply_resource_changes, Economy};
use shop::handle_buy;
use rewards::{check_all_watered_reward, check_field_in_bloom, check_first_harvest};

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Economy>();

        // ── Systems: Playing state ─────────────────────────────────────────
        app.add_systems(
            Update,
            (check_all_watered_reward, check_first_harvest, check_field_in_bloom)
                .in_set(FarmSet::Rewards)
                .run_if(in_state(GameState::Playing)),
        );

        // ── Systems: Shop state ────────────────────────────────────────────
        app.add_systems(
            Update,
            handle_buy
                .in_set(FarmSet::Interact)
                .run_if(in_state(GameState::Shop)),
        );

        // Balance changes can arrive while shopping too (e.g. a harvest
        // payout sent on the frame the shop opened).
        app.add_systems(
            Update,
            apply_resource_changes
                .in_set(FarmSet::Settle)
                .run_if(in_state(GameState::Playing).or(in_state(GameState::Shop))),
        );

        info!("[Economy] EconomyPlugin registered.");
    }
}
