//! Handler for the day controller's DayPassedEvent.

use bevy::prelude::*;
use crate::shared::*;
use super::field::Field;

/// Ages every tile and plant once per elapsed day.
pub fn on_day_passed(
    mut day_events: EventReader<DayPassedEvent>,
    mut field: ResMut<Field>,
    crop: Res<ActiveCrop>,
) {
    for event in day_events.read() {
        let summary = field.advance_day(&crop.0);
        info!(
            "[Farming] Day {}: {} matured, {} withered, {} decayed",
            event.day, summary.matured, summary.withered, summary.decayed
        );
    }
}
