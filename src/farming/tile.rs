//! The per-cell farming state machine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::*;
use super::plant::Plant;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FarmError {
    #[error("cannot use {action:?} on a {condition:?} tile")]
    InvalidAction {
        action: FarmAction,
        condition: TileCondition,
    },
    #[error("no seeds left to plant")]
    NoSeeds,
    #[error("no tile at ({0}, {1})")]
    OutOfBounds(i32, i32),
}

/// What an accepted action did, for the economy to settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionOutcome {
    pub seeds_spent: u32,
    pub harvested: bool,
    /// A withered plant was cleared away.
    pub cleared: bool,
}

/// What one day did to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileDayChange {
    pub matured: bool,
    pub withered: bool,
    pub decayed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmTile {
    pub x: i32,
    pub y: i32,
    pub condition: TileCondition,
    pub plant: Option<Plant>,
    pub days_untouched: u8,
    pub touched_today: bool,
}

impl FarmTile {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            condition: TileCondition::Grass,
            plant: None,
            days_untouched: 0,
            touched_today: false,
        }
    }

    /// Apply a player action. New plantings take their regrow setting from
    /// `crop`. On error the tile is left untouched.
    pub fn apply(
        &mut self,
        action: FarmAction,
        seeds_available: u32,
        crop: &CropDef,
    ) -> Result<ActionOutcome, FarmError> {
        let mut outcome = ActionOutcome::default();

        match (action, self.condition) {
            (FarmAction::Till, TileCondition::Grass) => {
                self.condition = TileCondition::Tilled;
            }
            (FarmAction::Water, TileCondition::Tilled | TileCondition::Watered) => {
                self.condition = TileCondition::Watered;
            }
            (FarmAction::Water, TileCondition::Planted | TileCondition::Harvestable) => {
                if let Some(plant) = self.plant.as_mut() {
                    plant.refill();
                }
            }
            (FarmAction::Plant, TileCondition::Watered) => {
                if seeds_available == 0 {
                    return Err(FarmError::NoSeeds);
                }
                self.plant = Some(Plant::new(crop.regrows));
                self.condition = TileCondition::Planted;
                outcome.seeds_spent = 1;
            }
            (FarmAction::Harvest, TileCondition::Planted | TileCondition::Harvestable)
                if self.plant.as_ref().is_some_and(Plant::is_withered) =>
            {
                self.plant = None;
                self.condition = TileCondition::Tilled;
                outcome.cleared = true;
            }
            (FarmAction::Harvest, TileCondition::Harvestable)
                if self.plant.as_ref().is_some_and(Plant::is_mature) =>
            {
                let survives = match self.plant.as_mut() {
                    Some(plant) => plant.harvest(),
                    None => false,
                };
                if survives {
                    self.condition = TileCondition::Planted;
                } else {
                    self.plant = None;
                    self.condition = TileCondition::Tilled;
                }
                outcome.harvested = true;
            }
            (action, condition) => {
                return Err(FarmError::InvalidAction { action, condition });
            }
        }

        self.touched_today = true;
        self.days_untouched = 0;
        Ok(outcome)
    }

    /// Advance the tile by one day: drive the plant, then decay.
    pub fn on_day_passed(&mut self, def: &CropDef) -> TileDayChange {
        let mut change = TileDayChange::default();

        if self.touched_today {
            self.days_untouched = 0;
        } else {
            self.days_untouched = self.days_untouched.saturating_add(1);
        }
        self.touched_today = false;

        if let Some(plant) = self.plant.as_mut() {
            let was_mature = plant.is_mature();
            plant.on_day_passed(def);

            if plant.is_withered() {
                self.wither();
                change.withered = true;
                return change;
            }
            if plant.is_mature() {
                change.matured = !was_mature;
                self.condition = TileCondition::Harvestable;
            }
        }

        if self.days_untouched >= DECAY_AFTER_UNTOUCHED_DAYS && self.condition != TileCondition::Grass {
            match self.condition {
                TileCondition::Watered => self.condition = TileCondition::Tilled,
                TileCondition::Tilled => self.condition = TileCondition::Grass,
                TileCondition::Planted | TileCondition::Harvestable => {
                    self.wither();
                    change.withered = true;
                }
                TileCondition::Grass => {}
            }
            self.days_untouched = 0;
            change.decayed = true;
        }

        change
    }

    fn wither(&mut self) {
        self.plant = None;
        self.condition = TileCondition::Tilled;
        self.days_untouched = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def() -> CropDef {
        CropDef {
            growth_days: 2,
            wither_after_dry_days: 2,
            regrows: false,
            ..CropDef::default()
        }
    }

    fn watered_tile() -> FarmTile {
        let mut tile = FarmTile::new(0, 0);
        tile.apply(FarmAction::Till, 0, &def()).unwrap();
        tile.apply(FarmAction::Water, 0, &def()).unwrap();
        tile
    }

    #[test]
    fn test_full_farming_loop() {
        let def = def();
        let mut tile = watered_tile();
        let outcome = tile.apply(FarmAction::Plant, 3, &def).unwrap();
        assert_eq!(outcome.seeds_spent, 1);
        assert_eq!(tile.condition, TileCondition::Planted);

        tile.on_day_passed(&def);
        assert_eq!(tile.plant.as_ref().unwrap().stage, PlantStage::Growing);

        for _ in 0..2 {
            tile.apply(FarmAction::Water, 0, &def).unwrap();
            tile.on_day_passed(&def);
        }
        assert_eq!(tile.condition, TileCondition::Harvestable);

        let outcome = tile.apply(FarmAction::Harvest, 0, &def).unwrap();
        assert!(outcome.harvested);
        assert_eq!(tile.condition, TileCondition::Tilled);
        assert!(tile.plant.is_none());
    }

    #[test]
    fn test_invalid_action_leaves_tile_unchanged() {
        let mut tile = FarmTile::new(2, 3);
        let before = tile.clone();
        let err = tile.apply(FarmAction::Plant, 5, &def()).unwrap_err();
        assert_eq!(
            err,
            FarmError::InvalidAction {
                action: FarmAction::Plant,
                condition: TileCondition::Grass,
            }
        );
        assert_eq!(tile, before);
    }

    #[test]
    fn test_planting_needs_a_seed() {
        let mut tile = watered_tile();
        assert_eq!(tile.apply(FarmAction::Plant, 0, &def()), Err(FarmError::NoSeeds));
        assert_eq!(tile.condition, TileCondition::Watered);
    }

    #[test]
    fn test_watered_tile_decays_after_two_untouched_days() {
        let def = def();
        let mut tile = watered_tile();
        tile.on_day_passed(&def); // day it was watered
        tile.on_day_passed(&def);
        assert_eq!(tile.condition, TileCondition::Watered);
        tile.on_day_passed(&def);
        assert_eq!(tile.condition, TileCondition::Tilled);

        tile.on_day_passed(&def);
        tile.on_day_passed(&def);
        assert_eq!(tile.condition, TileCondition::Grass);
    }

    #[test]
    fn test_rewatering_keeps_tile_watered() {
        let def = def();
        let mut tile = watered_tile();
        for _ in 0..5 {
            tile.on_day_passed(&def);
            tile.apply(FarmAction::Water, 0, &def).unwrap();
        }
        assert_eq!(tile.condition, TileCondition::Watered);
    }

    #[test]
    fn test_neglected_planting_withers_to_tilled() {
        let def = def();
        let mut tile = watered_tile();
        tile.apply(FarmAction::Plant, 1, &def).unwrap();
        tile.on_day_passed(&def);
        tile.on_day_passed(&def);
        assert_eq!(tile.condition, TileCondition::Planted);
        let change = tile.on_day_passed(&def);
        assert!(change.withered);
        assert_eq!(tile.condition, TileCondition::Tilled);
        assert!(tile.plant.is_none());

        // Only one step back toward grass per decay.
        tile.on_day_passed(&def);
        assert_eq!(tile.condition, TileCondition::Tilled);
    }

    #[test]
    fn test_regrowing_crop_returns_to_planted() {
        let def = CropDef {
            regrows: true,
            ..def()
        };
        let mut tile = watered_tile();
        tile.apply(FarmAction::Plant, 1, &def).unwrap();
        assert!(tile.plant.as_ref().unwrap().regrows);
        tile.on_day_passed(&def);
        for _ in 0..2 {
            tile.apply(FarmAction::Water, 0, &def).unwrap();
            tile.on_day_passed(&def);
        }
        assert_eq!(tile.condition, TileCondition::Harvestable);

        tile.apply(FarmAction::Harvest, 0, &def).unwrap();
        assert_eq!(tile.condition, TileCondition::Planted);
        assert_eq!(tile.plant.as_ref().unwrap().stage, PlantStage::Growing);
    }

    #[test]
    fn test_withered_plant_can_be_cleared() {
        let mut tile = watered_tile();
        tile.apply(FarmAction::Plant, 1, &def()).unwrap();
        tile.plant.as_mut().unwrap().stage = PlantStage::Withered;
        let outcome = tile.apply(FarmAction::Harvest, 0, &def()).unwrap();
        assert!(outcome.cleared);
        assert!(!outcome.harvested);
        assert_eq!(tile.condition, TileCondition::Tilled);
    }

    #[test]
    fn test_harvestable_tile_without_a_plant_pays_nothing() {
        let mut tile = FarmTile::new(1, 1);
        tile.condition = TileCondition::Harvestable;
        let before = tile.clone();
        assert_eq!(
            tile.apply(FarmAction::Harvest, 0, &def()),
            Err(FarmError::InvalidAction {
                action: FarmAction::Harvest,
                condition: TileCondition::Harvestable,
            })
        );
        assert_eq!(tile, before);
    }

    #[test]
    fn test_untended_harvest_withers() {
        let def = def();
        let mut tile = watered_tile();
        tile.apply(FarmAction::Plant, 1, &def).unwrap();
        tile.on_day_passed(&def);
        for _ in 0..2 {
            tile.apply(FarmAction::Water, 0, &def).unwrap();
            tile.on_day_passed(&def);
        }
        assert_eq!(tile.condition, TileCondition::Harvestable);
        tile.on_day_passed(&def);
        assert_eq!(tile.condition, TileCondition::Harvestable);
        tile.on_day_passed(&def);
        assert_eq!(tile.condition, TileCondition::Tilled);
    }
}
