//! Shared components, resources, events, and states for Sproutvale.
//!
//! This is the type contract. Every domain plugin imports from here, and
//! cross-domain traffic goes through the events defined below.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
    Paused,
    Shop,
}

/// Frame ordering for the gameplay loop:
/// input → clock → tile interaction → day ageing → rewards → economy → UI.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FarmSet {
    Input,
    Clock,
    Interact,
    Aging,
    Rewards,
    Settle,
    Present,
}

/// Registers the state machine, every cross-domain event, and the
/// `FarmSet` ordering. Used by both the game binary and the headless tests.
pub struct SharedPlugin;

impl Plugin for SharedPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<ActiveCrop>()
            .init_resource::<ShopCatalog>()
            .add_event::<TileInteractEvent>()
            .add_event::<DayPassedEvent>()
            .add_event::<SkipDayEvent>()
            .add_event::<ResourceChangeEvent>()
            .add_event::<EconomyChangedEvent>()
            .add_event::<HarvestEvent>()
            .add_event::<RewardPaidEvent>()
            .add_event::<GameWonEvent>()
            .add_event::<BuyRequestEvent>()
            .add_event::<ToastEvent>()
            .configure_sets(
                Update,
                (
                    FarmSet::Input,
                    FarmSet::Clock,
                    FarmSet::Interact,
                    FarmSet::Aging,
                    FarmSet::Rewards,
                    FarmSet::Settle,
                    FarmSet::Present,
                )
                    .chain(),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FARMING
// ═══════════════════════════════════════════════════════════════════════

/// Discrete farming state of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TileCondition {
    #[default]
    Grass,
    Tilled,
    Watered,
    Planted,
    Harvestable,
}

impl TileCondition {
    pub fn label(self) -> &'static str {
        match self {
            TileCondition::Grass => "Grass",
            TileCondition::Tilled => "Tilled",
            TileCondition::Watered => "Watered",
            TileCondition::Planted => "Planted",
            TileCondition::Harvestable => "Harvestable",
        }
    }

    /// True for conditions that carry a plant.
    pub fn has_plant(self) -> bool {
        matches!(self, TileCondition::Planted | TileCondition::Harvestable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PlantStage {
    #[default]
    Planted,
    Growing,
    Mature,
    Withered,
}

/// What the player does to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FarmAction {
    Till,
    Water,
    Plant,
    Harvest,
}

impl FarmAction {
    pub const ALL: [FarmAction; 4] = [
        FarmAction::Till,
        FarmAction::Water,
        FarmAction::Plant,
        FarmAction::Harvest,
    ];

    /// The natural next step for a tile in `condition`, used by the
    /// context-sensitive interact key.
    pub fn for_condition(condition: TileCondition) -> Self {
        match condition {
            TileCondition::Grass => FarmAction::Till,
            TileCondition::Tilled => FarmAction::Water,
            TileCondition::Watered => FarmAction::Plant,
            TileCondition::Planted => FarmAction::Water,
            TileCondition::Harvestable => FarmAction::Harvest,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FarmAction::Till => "Hoe",
            FarmAction::Water => "Watering Can",
            FarmAction::Plant => "Seeds",
            FarmAction::Harvest => "Basket",
        }
    }
}

/// Growth parameters for the crop planted in the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropDef {
    pub name: String,
    /// Watered days a Growing plant needs before it is Mature.
    pub growth_days: u8,
    /// Consecutive days without water before a plant withers.
    pub wither_after_dry_days: u8,
    pub regrows: bool,
    /// Funds paid per harvest before the random bonus.
    pub harvest_value: u32,
    pub harvest_bonus_max: u32,
}

impl Default for CropDef {
    fn default() -> Self {
        Self {
            name: "Turnip".to_string(),
            growth_days: 2,
            wither_after_dry_days: 2,
            regrows: false,
            harvest_value: 25,
            harvest_bonus_max: 10,
        }
    }
}

/// The crop every seed grows into. Populated from `GameConfig` during loading.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveCrop(pub CropDef);

// ═══════════════════════════════════════════════════════════════════════
// ECONOMY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Funds,
    Seeds,
    SkillPoints,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Funds,
        ResourceKind::Seeds,
        ResourceKind::SkillPoints,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Funds => "Funds",
            ResourceKind::Seeds => "Seeds",
            ResourceKind::SkillPoints => "Skill",
        }
    }
}

/// A shop offer: pay `cost` of `cost_kind`, receive `grant` of `grant_kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopListing {
    pub id: String,
    pub name: String,
    pub cost_kind: ResourceKind,
    pub cost: u32,
    pub grant_kind: ResourceKind,
    pub grant: u32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ShopCatalog {
    pub listings: Vec<ShopListing>,
}

impl ShopCatalog {
    pub fn get(&self, id: &str) -> Option<&ShopListing> {
        self.listings.iter().find(|l| l.id == id)
    }
}

/// One-shot progress gates. Some are re-armed (see the reward controllers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProgressFlag {
    AllWateredRewarded,
    FirstHarvest,
    FieldInBloom,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct TileInteractEvent {
    pub x: i32,
    pub y: i32,
    pub action: FarmAction,
}

/// Broadcast once per elapsed day. `day` is the new day number.
#[derive(Event, Debug, Clone)]
pub struct DayPassedEvent {
    pub day: u32,
}

/// Player goes to sleep: end the current day immediately.
#[derive(Event, Debug, Clone)]
pub struct SkipDayEvent;

#[derive(Event, Debug, Clone)]
pub struct ResourceChangeEvent {
    pub kind: ResourceKind,
    pub amount: i64, // positive = gain, negative = spend
    pub reason: String,
}

/// Sent by the economy after a balance actually changed. UI listens to this.
#[derive(Event, Debug, Clone)]
pub struct EconomyChangedEvent {
    pub kind: ResourceKind,
    pub balance: u32,
}

#[derive(Event, Debug, Clone)]
pub struct HarvestEvent {
    pub x: i32,
    pub y: i32,
    pub funds: u32,
}

#[derive(Event, Debug, Clone)]
pub struct RewardPaidEvent {
    pub flag: ProgressFlag,
    pub kind: ResourceKind,
    pub amount: u32,
}

#[derive(Event, Debug, Clone)]
pub struct GameWonEvent {
    pub day: u32,
}

#[derive(Event, Debug, Clone)]
pub struct BuyRequestEvent {
    pub listing_id: String,
}

#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 16.0;
pub const PIXEL_SCALE: f32 = 3.0; // render scale (16px × 3 = 48px on screen)
pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

/// Largest field edge, in tiles. Bigger configs are rejected.
pub const MAX_FIELD_SIDE: i32 = 64;

/// Untouched day-ticks before a tile slides one step back toward Grass.
pub const DECAY_AFTER_UNTOUCHED_DAYS: u8 = 2;
/// Days of water a freshly watered plant holds.
pub const PLANT_MAX_WATER: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_action_follows_farming_loop() {
        assert_eq!(FarmAction::for_condition(TileCondition::Grass), FarmAction::Till);
        assert_eq!(FarmAction::for_condition(TileCondition::Tilled), FarmAction::Water);
        assert_eq!(FarmAction::for_condition(TileCondition::Watered), FarmAction::Plant);
        assert_eq!(FarmAction::for_condition(TileCondition::Planted), FarmAction::Water);
        assert_eq!(
            FarmAction::for_condition(TileCondition::Harvestable),
            FarmAction::Harvest
        );
    }

    #[test]
    fn test_has_plant() {
        assert!(TileCondition::Planted.has_plant());
        assert!(TileCondition::Harvestable.has_plant());
        assert!(!TileCondition::Watered.has_plant());
        assert!(!TileCondition::Grass.has_plant());
    }
}
