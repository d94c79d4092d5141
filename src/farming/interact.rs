//! Player → tile interaction. Settles seeds and harvest funds through the
//! economy's ResourceChangeEvent stream.

use bevy::prelude::*;
use rand::Rng;

use crate::economy::wallet::Economy;
use crate::shared::*;
use super::field::Field;
use super::tile::FarmError;

/// Funds for one harvest: the crop's base value plus a random bonus.
pub fn harvest_payout(def: &CropDef, rng: &mut impl Rng) -> u32 {
    let bonus = if def.harvest_bonus_max > 0 {
        rng.gen_range(0..=def.harvest_bonus_max)
    } else {
        0
    };
    def.harvest_value.saturating_add(bonus)
}

pub fn handle_tile_interactions(
    mut interact_events: EventReader<TileInteractEvent>,
    mut field: ResMut<Field>,
    economy: Res<Economy>,
    crop: Res<ActiveCrop>,
    mut change_writer: EventWriter<ResourceChangeEvent>,
    mut harvest_writer: EventWriter<HarvestEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    let mut rng = rand::thread_rng();
    // Seeds spent earlier this frame have not been settled yet.
    let mut seeds = economy.balance(ResourceKind::Seeds);

    for ev in interact_events.read() {
        let result = field
            .tile_mut(ev.x, ev.y)
            .and_then(|tile| tile.apply(ev.action, seeds, &crop.0));

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(FarmError::NoSeeds) => {
                info!("[Farming] No seeds to plant at ({}, {})", ev.x, ev.y);
                toast_writer.send(ToastEvent {
                    message: "Out of seeds! Visit the shop.".to_string(),
                    duration_secs: 2.5,
                });
                continue;
            }
            Err(e) => {
                debug!("[Farming] Rejected: {}", e);
                continue;
            }
        };

        if outcome.seeds_spent > 0 {
            seeds = seeds.saturating_sub(outcome.seeds_spent);
            change_writer.send(ResourceChangeEvent {
                kind: ResourceKind::Seeds,
                amount: -i64::from(outcome.seeds_spent),
                reason: format!("Planted {} at ({}, {})", crop.0.name, ev.x, ev.y),
            });
        }

        if outcome.harvested {
            let funds = harvest_payout(&crop.0, &mut rng);
            change_writer.send(ResourceChangeEvent {
                kind: ResourceKind::Funds,
                amount: i64::from(funds),
                reason: format!("Harvested {} at ({}, {})", crop.0.name, ev.x, ev.y),
            });
            harvest_writer.send(HarvestEvent { x: ev.x, y: ev.y, funds });
        }

        if outcome.cleared {
            info!("[Farming] Cleared withered plant at ({}, {})", ev.x, ev.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_harvest_payout_within_bonus_range() {
        let def = CropDef {
            harvest_value: 25,
            harvest_bonus_max: 10,
            ..CropDef::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let funds = harvest_payout(&def, &mut rng);
            assert!((25..=35).contains(&funds));
        }
    }

    #[test]
    fn test_harvest_payout_without_bonus_is_fixed() {
        let def = CropDef {
            harvest_value: 40,
            harvest_bonus_max: 0,
            ..CropDef::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(harvest_payout(&def, &mut rng), 40);
    }
}
