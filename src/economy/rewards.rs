//! Reward and win controllers.
//!
//! Each controller polls game state, gates its payout behind a
//! `ProgressFlag`, and pays through `ResourceChangeEvent` so the economy
//! settles it in the same frame.
//!
//! - All-watered: pays funds whenever the whole field becomes Watered. The
//!   flag is cleared as soon as any tile leaves Watered, so the next
//!   all-watered episode pays again.
//! - First harvest: pays skill points once, ever.
//! - Field in bloom (win): every tile Harvestable at once. Pays skill points
//!   and announces the win once, ever.

use bevy::prelude::*;

use crate::calendar::DayClock;
use crate::data::GameConfig;
use crate::farming::Field;
use crate::shared::*;
use super::wallet::Economy;

/// A payout decided by a controller, not yet applied to balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payout {
    pub flag: ProgressFlag,
    pub kind: ResourceKind,
    pub amount: u32,
}

/// Re-evaluates the all-watered episode. Returns a payout when a new
/// episode starts.
pub fn evaluate_all_watered(field: &Field, economy: &mut Economy, funds: u32) -> Option<Payout> {
    if !field.all(TileCondition::Watered) {
        economy.clear_flag(ProgressFlag::AllWateredRewarded);
        return None;
    }
    economy
        .raise_flag(ProgressFlag::AllWateredRewarded)
        .then_some(Payout {
            flag: ProgressFlag::AllWateredRewarded,
            kind: ResourceKind::Funds,
            amount: funds,
        })
}

pub fn evaluate_field_in_bloom(field: &Field, economy: &mut Economy, skill_points: u32) -> Option<Payout> {
    if !field.all(TileCondition::Harvestable) {
        return None;
    }
    economy
        .raise_flag(ProgressFlag::FieldInBloom)
        .then_some(Payout {
            flag: ProgressFlag::FieldInBloom,
            kind: ResourceKind::SkillPoints,
            amount: skill_points,
        })
}

fn pay(
    payout: Payout,
    reason: &str,
    change_writer: &mut EventWriter<ResourceChangeEvent>,
    reward_writer: &mut EventWriter<RewardPaidEvent>,
    toast_writer: &mut EventWriter<ToastEvent>,
) {
    info!("[Rewards] {:?}: +{} {:?}", payout.flag, payout.amount, payout.kind);
    if payout.amount > 0 {
        change_writer.send(ResourceChangeEvent {
            kind: payout.kind,
            amount: i64::from(payout.amount),
            reason: reason.to_string(),
        });
    }
    reward_writer.send(RewardPaidEvent {
        flag: payout.flag,
        kind: payout.kind,
        amount: payout.amount,
    });
    toast_writer.send(ToastEvent {
        message: format!("{}! +{} {}", reason, payout.amount, payout.kind.label()),
        duration_secs: 3.0,
    });
}

pub fn check_all_watered_reward(
    field: Res<Field>,
    config: Res<GameConfig>,
    mut economy: ResMut<Economy>,
    mut change_writer: EventWriter<ResourceChangeEvent>,
    mut reward_writer: EventWriter<RewardPaidEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    // Only touch the flag set when something could change, so Economy
    // change detection stays quiet on idle frames.
    let all_watered = field.all(TileCondition::Watered);
    if all_watered == economy.has_flag(ProgressFlag::AllWateredRewarded) {
        return;
    }
    if let Some(payout) = evaluate_all_watered(&field, &mut economy, config.rewards.all_watered_funds) {
        pay(payout, "Whole field watered", &mut change_writer, &mut reward_writer, &mut toast_writer);
    }
}

pub fn check_first_harvest(
    mut harvest_events: EventReader<HarvestEvent>,
    config: Res<GameConfig>,
    mut economy: ResMut<Economy>,
    mut change_writer: EventWriter<ResourceChangeEvent>,
    mut reward_writer: EventWriter<RewardPaidEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    if harvest_events.read().count() == 0 {
        return;
    }
    if economy.raise_flag(ProgressFlag::FirstHarvest) {
        let payout = Payout {
            flag: ProgressFlag::FirstHarvest,
            kind: ResourceKind::SkillPoints,
            amount: config.rewards.first_harvest_skill_points,
        };
        pay(payout, "First harvest", &mut change_writer, &mut reward_writer, &mut toast_writer);
    }
}

pub fn check_field_in_bloom(
    field: Res<Field>,
    config: Res<GameConfig>,
    clock: Res<DayClock>,
    mut economy: ResMut<Economy>,
    mut change_writer: EventWriter<ResourceChangeEvent>,
    mut reward_writer: EventWriter<RewardPaidEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
    mut won_writer: EventWriter<GameWonEvent>,
) {
    if economy.has_flag(ProgressFlag::FieldInBloom) {
        return;
    }
    if let Some(payout) =
        evaluate_field_in_bloom(&field, &mut economy, config.rewards.field_in_bloom_skill_points)
    {
        pay(payout, "The whole field is in bloom", &mut change_writer, &mut reward_writer, &mut toast_writer);
        info!("[Rewards] Game won on day {}", clock.day);
        won_writer.send(GameWonEvent { day: clock.day });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water_all(field: &mut Field) {
        for tile in field.tiles.iter_mut() {
            tile.apply(FarmAction::Till, 0, &CropDef::default()).unwrap();
            tile.apply(FarmAction::Water, 0, &CropDef::default()).unwrap();
        }
    }

    #[test]
    fn test_all_watered_pays_once_per_episode() {
        let mut field = Field::new(2, 2);
        let mut economy = Economy::default();
        assert_eq!(evaluate_all_watered(&field, &mut economy, 20), None);

        water_all(&mut field);
        let payout = evaluate_all_watered(&field, &mut economy, 20).unwrap();
        assert_eq!(payout.amount, 20);
        assert_eq!(payout.kind, ResourceKind::Funds);
        // Still the same episode.
        assert_eq!(evaluate_all_watered(&field, &mut economy, 20), None);

        // One tile leaves Watered → episode over, flag re-armed.
        field.get_mut(0, 0).unwrap().apply(FarmAction::Plant, 1, &CropDef::default()).unwrap();
        assert_eq!(evaluate_all_watered(&field, &mut economy, 20), None);
        assert!(!economy.has_flag(ProgressFlag::AllWateredRewarded));

        // Back to all watered → a new episode pays again.
        let tile = field.get_mut(0, 0).unwrap();
        tile.plant = None;
        tile.condition = TileCondition::Watered;
        assert!(evaluate_all_watered(&field, &mut economy, 20).is_some());
    }

    #[test]
    fn test_empty_field_never_pays() {
        let field = Field::new(0, 0);
        let mut economy = Economy::default();
        assert_eq!(evaluate_all_watered(&field, &mut economy, 20), None);
        assert_eq!(evaluate_field_in_bloom(&field, &mut economy, 3), None);
    }

    #[test]
    fn test_field_in_bloom_is_one_shot() {
        let mut field = Field::new(1, 2);
        for tile in field.tiles.iter_mut() {
            tile.condition = TileCondition::Harvestable;
        }
        let mut economy = Economy::default();
        let payout = evaluate_field_in_bloom(&field, &mut economy, 3).unwrap();
        assert_eq!(payout.kind, ResourceKind::SkillPoints);
        assert_eq!(evaluate_field_in_bloom(&field, &mut economy, 3), None);

        // Unlike the watering reward the win never re-arms.
        field.tiles[0].condition = TileCondition::Tilled;
        evaluate_field_in_bloom(&field, &mut economy, 3);
        field.tiles[0].condition = TileCondition::Harvestable;
        assert_eq!(evaluate_field_in_bloom(&field, &mut economy, 3), None);
    }
}
