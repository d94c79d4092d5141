//! Data layer — game tuning and the Loading → Playing handoff.
//!
//! `GameConfig` is read from `assets/config.ron` when the file exists and
//! falls back to the built-in defaults otherwise. On entering
//! `GameState::Loading` the config seeds every gameplay resource (field,
//! economy, day clock, shop catalog, crop) and the game moves to Playing.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::DayClock;
use crate::economy::wallet::Economy;
use crate::farming::Field;
use crate::shared::*;

pub const DEFAULT_CONFIG_PATH: &str = "assets/config.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("field must be 1..={max} tiles per side, got {width}x{height}")]
    FieldSize { width: i32, height: i32, max: i32 },
    #[error("day length must be a positive number of seconds, got {0}")]
    DayLength(f32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Funds paid each time the whole field becomes watered.
    pub all_watered_funds: u32,
    pub first_harvest_skill_points: u32,
    pub field_in_bloom_skill_points: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            all_watered_funds: 20,
            first_harvest_skill_points: 1,
            field_in_bloom_skill_points: 3,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Real seconds per in-game day.
    pub day_length_secs: f32,
    pub field_width: i32,
    pub field_height: i32,
    pub starting_funds: u32,
    pub starting_seeds: u32,
    pub crop: CropDef,
    pub rewards: RewardConfig,
    pub shop: Vec<ShopListing>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            day_length_secs: 60.0,
            field_width: 4,
            field_height: 3,
            starting_funds: 50,
            starting_seeds: 3,
            crop: CropDef::default(),
            rewards: RewardConfig::default(),
            shop: default_listings(),
        }
    }
}

fn default_listings() -> Vec<ShopListing> {
    vec![
        ShopListing {
            id: "seed_packet".to_string(),
            name: "Seed Packet".to_string(),
            cost_kind: ResourceKind::Funds,
            cost: 10,
            grant_kind: ResourceKind::Seeds,
            grant: 1,
        },
        ShopListing {
            id: "seed_bundle".to_string(),
            name: "Seed Bundle".to_string(),
            cost_kind: ResourceKind::Funds,
            cost: 40,
            grant_kind: ResourceKind::Seeds,
            grant: 5,
        },
        ShopListing {
            id: "skill_trade".to_string(),
            name: "Trade Skill Point".to_string(),
            cost_kind: ResourceKind::SkillPoints,
            cost: 1,
            grant_kind: ResourceKind::Funds,
            grant: 75,
        },
    ]
}

impl GameConfig {
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the game cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let side_ok = |side: i32| (1..=MAX_FIELD_SIDE).contains(&side);
        let tiles = self.field_width.checked_mul(self.field_height);
        if !side_ok(self.field_width)
            || !side_ok(self.field_height)
            || tiles.map_or(true, |n| n > MAX_FIELD_SIDE * MAX_FIELD_SIDE)
        {
            return Err(ConfigError::FieldSize {
                width: self.field_width,
                height: self.field_height,
                max: MAX_FIELD_SIDE,
            });
        }
        if !(self.day_length_secs.is_finite() && self.day_length_secs > 0.0) {
            return Err(ConfigError::DayLength(self.day_length_secs));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text)
    }

    /// Load `path` if it exists, otherwise defaults. A broken or out-of-range
    /// file is logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("[Data] No config at {}; using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("[Data] {}; using defaults", e);
                Self::default()
            }
        }
    }

    pub fn starting_economy(&self) -> Economy {
        Economy::with_balances([
            (ResourceKind::Funds, self.starting_funds),
            (ResourceKind::Seeds, self.starting_seeds),
            (ResourceKind::SkillPoints, 0),
        ])
    }
}

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<GameConfig>() {
            let config = GameConfig::load_or_default(Path::new(DEFAULT_CONFIG_PATH));
            app.insert_resource(config);
        }
        app.add_systems(OnEnter(GameState::Loading), load_game_data);
    }
}

/// Resets every gameplay resource from the config and starts play.
pub fn load_game_data(
    config: Res<GameConfig>,
    mut field: ResMut<Field>,
    mut economy: ResMut<Economy>,
    mut clock: ResMut<DayClock>,
    mut catalog: ResMut<ShopCatalog>,
    mut crop: ResMut<ActiveCrop>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("[Data] Preparing a {}x{} field", config.field_width, config.field_height);

    *field = Field::new(config.field_width, config.field_height);
    *economy = config.starting_economy();
    *clock = DayClock::new(config.day_length_secs);
    catalog.listings = config.shop.clone();
    crop.0 = config.crop.clone();

    info!(
        "[Data] Crop: {} ({} growth days), {} shop listings",
        crop.0.name,
        crop.0.growth_days,
        catalog.listings.len()
    );

    next_state.set(GameState::Playing);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_ron_fills_defaults() {
        let config = GameConfig::from_ron("(field_width: 6, starting_seeds: 10)").unwrap();
        assert_eq!(config.field_width, 6);
        assert_eq!(config.starting_seeds, 10);
        assert_eq!(config.field_height, GameConfig::default().field_height);
        assert_eq!(config.shop.len(), 3);
    }

    #[test]
    fn test_bad_ron_is_an_error() {
        assert!(matches!(
            GameConfig::from_ron("(field_width: \"wide\")"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_oversized_field_is_rejected() {
        let err = GameConfig::from_ron("(field_width: 100000, field_height: 100000)").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::FieldSize { width: 100000, height: 100000, .. }
        ));
        assert!(GameConfig::from_ron("(field_width: 0)").is_err());
        assert!(GameConfig::from_ron("(day_length_secs: -5.0)").is_err());
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "(field_width: 100000, field_height: 3)").unwrap();
        assert_eq!(GameConfig::load_or_default(&path), GameConfig::default());
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = GameConfig::load(Path::new(DEFAULT_CONFIG_PATH)).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = GameConfig::load_or_default(Path::new("does/not/exist.ron"));
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_starting_economy() {
        let economy = GameConfig::default().starting_economy();
        assert_eq!(economy.balance(ResourceKind::Funds), 50);
        assert_eq!(economy.balance(ResourceKind::Seeds), 3);
        assert!(economy.flags.is_empty());
    }
}
