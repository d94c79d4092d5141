//! Visual synchronisation — keep tile sprites in sync with the Field.

use bevy::prelude::*;
use crate::shared::*;
use super::{field::Field, grid_to_world, PlantSprite, TileSprite};
use super::tile::FarmTile;

/// Placeholder colour for a tile condition.
pub fn soil_color(condition: TileCondition) -> Color {
    match condition {
        TileCondition::Grass => Color::srgb(0.36, 0.62, 0.28),
        TileCondition::Tilled => Color::srgb(0.45, 0.32, 0.20),
        TileCondition::Watered => Color::srgb(0.30, 0.22, 0.15),
        TileCondition::Planted => Color::srgb(0.33, 0.24, 0.16),
        TileCondition::Harvestable => Color::srgb(0.33, 0.24, 0.16),
    }
}

/// Placeholder colour for the plant on a tile, if any.
pub fn plant_color(tile: &FarmTile) -> Option<Color> {
    let plant = tile.plant.as_ref()?;
    let color = match plant.stage {
        PlantStage::Planted => Color::srgb(0.55, 0.68, 0.25),
        PlantStage::Growing if plant.water == 0 => Color::srgb(0.65, 0.62, 0.25), // wilting
        PlantStage::Growing => Color::srgb(0.35, 0.75, 0.25),
        PlantStage::Mature => Color::srgb(0.95, 0.55, 0.20),
        PlantStage::Withered => Color::srgb(0.35, 0.28, 0.20),
    };
    Some(color)
}

/// Spawn one soil sprite and one plant sprite per tile the first time the
/// field is seen, and rebuild them if the field is resized (new game / load).
pub fn spawn_field_sprites(
    mut commands: Commands,
    field: Res<Field>,
    existing: Query<Entity, Or<(With<TileSprite>, With<PlantSprite>)>>,
    mut spawned_for: Local<Option<(i32, i32)>>,
) {
    let dims = (field.width, field.height);
    if *spawned_for == Some(dims) {
        return;
    }
    for entity in &existing {
        commands.entity(entity).despawn();
    }

    for tile in field.iter() {
        let translation = grid_to_world(tile.x, tile.y);
        commands.spawn((
            Sprite {
                color: soil_color(tile.condition),
                custom_size: Some(Vec2::splat(TILE_SIZE - 1.0)),
                ..default()
            },
            Transform::from_translation(translation),
            TileSprite { x: tile.x, y: tile.y },
        ));
        commands.spawn((
            Sprite {
                color: Color::NONE,
                custom_size: Some(Vec2::splat(TILE_SIZE * 0.6)),
                ..default()
            },
            Transform::from_translation(translation.with_z(2.0)),
            PlantSprite { x: tile.x, y: tile.y },
        ));
    }
    *spawned_for = Some(dims);
}

pub fn sync_tile_sprites(
    field: Res<Field>,
    mut soil_query: Query<(&TileSprite, &mut Sprite), Without<PlantSprite>>,
    mut plant_query: Query<(&PlantSprite, &mut Sprite), Without<TileSprite>>,
) {
    for (tile_sprite, mut sprite) in soil_query.iter_mut() {
        if let Some(tile) = field.get(tile_sprite.x, tile_sprite.y) {
            sprite.color = soil_color(tile.condition);
        }
    }

    for (plant_sprite, mut sprite) in plant_query.iter_mut() {
        let Some(tile) = field.get(plant_sprite.x, plant_sprite.y) else {
            continue;
        };
        sprite.color = plant_color(tile).unwrap_or(Color::NONE);
        // Mature plants fill more of the tile so they stand out.
        let scale = if tile.condition == TileCondition::Harvestable { 0.85 } else { 0.6 };
        sprite.custom_size = Some(Vec2::splat(TILE_SIZE * scale));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_tile_has_no_plant_colour() {
        assert!(plant_color(&FarmTile::new(0, 0)).is_none());
    }

    #[test]
    fn test_watered_soil_is_darker_than_tilled() {
        let tilled = soil_color(TileCondition::Tilled).to_srgba();
        let watered = soil_color(TileCondition::Watered).to_srgba();
        assert!(watered.red < tilled.red);
    }
}
