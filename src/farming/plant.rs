//! Per-planting growth state. A plant never sees the player directly; its
//! water comes from the tile it sits in.

use serde::{Deserialize, Serialize};
use crate::shared::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    pub stage: PlantStage,
    /// Days of water left. Refilled when the parent tile is watered.
    pub water: u8,
    pub days_in_stage: u8,
    pub thirsty_days: u8,
    pub regrows: bool,
    pub harvests: u32,
}

impl Plant {
    pub fn new(regrows: bool) -> Self {
        Self {
            stage: PlantStage::Planted,
            water: PLANT_MAX_WATER,
            days_in_stage: 0,
            thirsty_days: 0,
            regrows,
            harvests: 0,
        }
    }

    pub fn refill(&mut self) {
        if self.stage == PlantStage::Withered {
            return;
        }
        self.water = PLANT_MAX_WATER;
        self.thirsty_days = 0;
    }

    pub fn is_mature(&self) -> bool {
        self.stage == PlantStage::Mature
    }

    pub fn is_withered(&self) -> bool {
        self.stage == PlantStage::Withered
    }

    /// Age the plant by one day.
    pub fn on_day_passed(&mut self, def: &CropDef) {
        if self.stage == PlantStage::Withered {
            return;
        }

        if self.water == 0 {
            self.thirsty_days = self.thirsty_days.saturating_add(1);
            if self.thirsty_days >= def.wither_after_dry_days.max(1) {
                self.stage = PlantStage::Withered;
            }
            return;
        }

        self.water -= 1;
        self.thirsty_days = 0;
        self.days_in_stage = self.days_in_stage.saturating_add(1);

        match self.stage {
            PlantStage::Planted => {
                self.stage = PlantStage::Growing;
                self.days_in_stage = 0;
            }
            PlantStage::Growing => {
                if self.days_in_stage >= def.growth_days {
                    self.stage = PlantStage::Mature;
                    self.days_in_stage = 0;
                }
            }
            PlantStage::Mature | PlantStage::Withered => {}
        }
    }

    /// Pick a mature plant. Returns `true` when the plant survives the
    /// harvest (regrowing crops), `false` when it should be removed.
    /// Calling this on an immature plant is a no-op that returns `true`.
    pub fn harvest(&mut self) -> bool {
        if self.stage != PlantStage::Mature {
            return true;
        }
        self.harvests += 1;
        if self.regrows {
            self.stage = PlantStage::Growing;
            self.days_in_stage = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def() -> CropDef {
        CropDef {
            growth_days: 2,
            wither_after_dry_days: 2,
            ..CropDef::default()
        }
    }

    #[test]
    fn test_watered_plant_sprouts_then_matures() {
        let def = def();
        let mut plant = Plant::new(false);

        plant.on_day_passed(&def);
        assert_eq!(plant.stage, PlantStage::Growing);

        for _ in 0..2 {
            plant.refill();
            plant.on_day_passed(&def);
        }
        assert_eq!(plant.stage, PlantStage::Mature);
    }

    #[test]
    fn test_dry_plant_withers() {
        let def = def();
        let mut plant = Plant::new(false);
        plant.on_day_passed(&def); // uses the planting water
        plant.on_day_passed(&def);
        assert_eq!(plant.stage, PlantStage::Growing);
        assert_eq!(plant.thirsty_days, 1);
        plant.on_day_passed(&def);
        assert!(plant.is_withered());

        // Water cannot revive it.
        plant.refill();
        plant.on_day_passed(&def);
        assert!(plant.is_withered());
    }

    #[test]
    fn test_dry_day_stalls_growth() {
        let def = def();
        let mut plant = Plant::new(false);
        plant.on_day_passed(&def);
        plant.on_day_passed(&def); // dry
        assert_eq!(plant.days_in_stage, 0);
        plant.refill();
        plant.on_day_passed(&def);
        assert_eq!(plant.days_in_stage, 1);
        assert_eq!(plant.thirsty_days, 0);
    }

    #[test]
    fn test_regrowing_plant_survives_harvest() {
        let mut plant = Plant::new(true);
        plant.stage = PlantStage::Mature;
        assert!(plant.harvest());
        assert_eq!(plant.stage, PlantStage::Growing);
        assert_eq!(plant.harvests, 1);
    }

    #[test]
    fn test_single_harvest_plant_is_consumed() {
        let mut plant = Plant::new(false);
        plant.stage = PlantStage::Mature;
        assert!(!plant.harvest());
        assert_eq!(plant.harvests, 1);
    }

    #[test]
    fn test_harvest_immature_is_noop() {
        let mut plant = Plant::new(false);
        assert!(plant.harvest());
        assert_eq!(plant.harvests, 0);
        assert_eq!(plant.stage, PlantStage::Planted);
    }
}
