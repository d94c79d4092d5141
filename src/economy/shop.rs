use bevy::prelude::*;

use crate::shared::*;
use super::wallet::{Economy, EconomyError};

/// Pay for `listing` and receive its grant, all or nothing.
pub fn purchase(economy: &mut Economy, listing: &ShopListing) -> Result<(), EconomyError> {
    economy.spend(listing.cost_kind, listing.cost)?;
    economy.credit(listing.grant_kind, listing.grant);
    Ok(())
}

/// Processes BuyRequestEvents — the core purchase flow.
pub fn handle_buy(
    mut buy_events: EventReader<BuyRequestEvent>,
    catalog: Res<ShopCatalog>,
    mut economy: ResMut<Economy>,
    mut changed_writer: EventWriter<EconomyChangedEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    for ev in buy_events.read() {
        let result = catalog
            .get(&ev.listing_id)
            .ok_or_else(|| EconomyError::UnknownListing(ev.listing_id.clone()))
            .and_then(|listing| purchase(&mut economy, listing).map(|()| listing));

        match result {
            Ok(listing) => {
                info!(
                    "[Economy] Bought {} for {} {:?}",
                    listing.name, listing.cost, listing.cost_kind
                );
                for kind in [listing.cost_kind, listing.grant_kind] {
                    changed_writer.send(EconomyChangedEvent {
                        kind,
                        balance: economy.balance(kind),
                    });
                }
                toast_writer.send(ToastEvent {
                    message: format!("Bought {}", listing.name),
                    duration_secs: 2.0,
                });
            }
            Err(e @ EconomyError::Insufficient { .. }) => {
                info!("[Economy] Purchase refused: {}", e);
                toast_writer.send(ToastEvent {
                    message: "Can't afford that.".to_string(),
                    duration_secs: 2.0,
                });
            }
            Err(e) => warn!("[Economy] Purchase failed: {}", e),
        }
    }
}
