//! Farming domain — tiles, plants, tilling, watering, planting, harvest,
//! and the daily ageing of the field.

use bevy::prelude::*;
use crate::shared::*;

pub mod field;
pub mod plant;
pub mod tile;
pub mod interact;
pub mod events_handler;
mod render;

pub use field::Field;
pub use plant::Plant;
pub use tile::{FarmError, FarmTile};

/// Soil sprite for the tile at (x, y).
#[derive(Component, Debug, Clone)]
pub struct TileSprite {
    pub x: i32,
    pub y: i32,
}

/// Plant sprite layered above the soil sprite at (x, y).
#[derive(Component, Debug, Clone)]
pub struct PlantSprite {
    pub x: i32,
    pub y: i32,
}

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Field>()
            .add_systems(
                Update,
                interact::handle_tile_interactions
                    .in_set(FarmSet::Interact)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                events_handler::on_day_passed
                    .in_set(FarmSet::Aging)
                    .run_if(in_state(GameState::Playing)),
            )
            // Visual sync — runs after all state mutations
            .add_systems(
                PostUpdate,
                (render::spawn_field_sprites, render::sync_tile_sprites)
                    .chain()
                    .run_if(not(in_state(GameState::Loading))),
            );
    }
}

/// Convert a grid position to a world-space translation (centre of tile).
/// Soil sits at z=1, plants at z=2.
pub fn grid_to_world(x: i32, y: i32) -> Vec3 {
    Vec3::new(x as f32 * TILE_SIZE, y as f32 * TILE_SIZE, 1.0)
}
