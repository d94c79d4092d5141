//! The farm grid. Tiles are stored row-major so the whole field serialises
//! cleanly into a save file.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::*;
use super::tile::{FarmError, FarmTile};

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<FarmTile>,
}

/// Totals for one day of field ageing, used for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaySummary {
    pub matured: u32,
    pub withered: u32,
    pub decayed: u32,
}

impl Field {
    /// Edges are clamped to `0..=MAX_FIELD_SIDE`.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.clamp(0, MAX_FIELD_SIDE);
        let height = height.clamp(0, MAX_FIELD_SIDE);
        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(FarmTile::new(x, y));
            }
        }
        Self { width, height, tiles }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&FarmTile> {
        self.index(x, y).and_then(|i| self.tiles.get(i))
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut FarmTile> {
        self.index(x, y).and_then(move |i| self.tiles.get_mut(i))
    }

    pub fn tile_mut(&mut self, x: i32, y: i32) -> Result<&mut FarmTile, FarmError> {
        self.get_mut(x, y).ok_or(FarmError::OutOfBounds(x, y))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FarmTile> {
        self.tiles.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// True when the field has tiles and every one of them is in `condition`.
    pub fn all(&self, condition: TileCondition) -> bool {
        !self.tiles.is_empty() && self.tiles.iter().all(|t| t.condition == condition)
    }

    pub fn count(&self, condition: TileCondition) -> usize {
        self.tiles.iter().filter(|t| t.condition == condition).count()
    }

    pub fn advance_day(&mut self, def: &CropDef) -> DaySummary {
        let mut summary = DaySummary::default();
        for tile in self.tiles.iter_mut() {
            let change = tile.on_day_passed(def);
            summary.matured += change.matured as u32;
            summary.withered += change.withered as u32;
            summary.decayed += change.decayed as u32;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_is_all_grass() {
        let field = Field::new(3, 2);
        assert_eq!(field.tiles.len(), 6);
        assert!(field.all(TileCondition::Grass));
        let tile = field.get(2, 1).unwrap();
        assert_eq!((tile.x, tile.y), (2, 1));
    }

    #[test]
    fn test_out_of_bounds_lookup() {
        let mut field = Field::new(2, 2);
        assert!(field.get(2, 0).is_none());
        assert!(field.get(-1, 0).is_none());
        assert_eq!(field.tile_mut(0, 5).unwrap_err(), FarmError::OutOfBounds(0, 5));
    }

    #[test]
    fn test_oversized_field_is_clamped() {
        let field = Field::new(100_000, 100_000);
        assert_eq!((field.width, field.height), (MAX_FIELD_SIDE, MAX_FIELD_SIDE));
        assert_eq!(field.tiles.len(), (MAX_FIELD_SIDE * MAX_FIELD_SIDE) as usize);
        assert!(field.get(MAX_FIELD_SIDE - 1, MAX_FIELD_SIDE - 1).is_some());
    }

    #[test]
    fn test_empty_field_is_never_all_anything() {
        let field = Field::new(0, 4);
        assert!(field.is_empty());
        assert!(!field.all(TileCondition::Grass));
    }

    #[test]
    fn test_advance_day_summarises_decay() {
        let mut field = Field::new(2, 1);
        for tile in field.tiles.iter_mut() {
            tile.apply(FarmAction::Till, 0, &CropDef::default()).unwrap();
        }
        let def = CropDef::default();
        field.advance_day(&def);
        field.advance_day(&def);
        let summary = field.advance_day(&def);
        assert_eq!(summary.decayed, 2);
        assert_eq!(field.count(TileCondition::Grass), 2);
    }
}
