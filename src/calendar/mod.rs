//! Calendar domain — the day controller.
//!
//! Responsible for:
//! - Advancing the normalized time of day while the game is Playing
//! - Sending one DayPassedEvent per elapsed day
//! - Ending the day early when the player sleeps (SkipDayEvent)
//! - Pausing / unpausing time based on GameState
//! - Feeding the day/night tint

pub mod lighting;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::*;
use lighting::{update_day_night_tint, DayNightTint};

/// Global day timer. `day` only ever increases; `progress` is the fraction
/// of the current day that has elapsed, in `[0, 1)`.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayClock {
    pub day: u32,
    pub progress: f32,
    /// Real seconds per in-game day.
    pub day_length_secs: f32,
    pub paused: bool,
}

impl Default for DayClock {
    fn default() -> Self {
        Self::new(60.0)
    }
}

impl DayClock {
    pub fn new(day_length_secs: f32) -> Self {
        Self {
            day: 1,
            progress: 0.0,
            day_length_secs,
            paused: false,
        }
    }

    /// Accumulate `delta_secs` of real time. Returns how many day boundaries
    /// were crossed; a long frame can span several days.
    pub fn advance(&mut self, delta_secs: f32) -> u32 {
        if self.paused || delta_secs <= 0.0 {
            return 0;
        }
        // Guard against zero / negative day length.
        let length = if self.day_length_secs > 0.0 { self.day_length_secs } else { 60.0 };

        self.progress += delta_secs / length;
        let crossed = self.progress.floor();
        if crossed < 1.0 {
            return 0;
        }
        self.progress -= crossed;
        let crossed = crossed as u32;
        self.day = self.day.saturating_add(crossed);
        crossed
    }

    /// Sleep: end the current day now.
    pub fn skip_to_next_day(&mut self) -> u32 {
        self.day = self.day.saturating_add(1);
        self.progress = 0.0;
        self.day
    }

    /// Clock-face hour for the HUD: the day runs 06:00 → 06:00.
    pub fn clock_time(&self) -> (u32, u32) {
        let minutes = ((self.progress.clamp(0.0, 1.0) * 24.0 * 60.0) as u32 + 6 * 60) % (24 * 60);
        (minutes / 60, minutes % 60)
    }
}

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DayClock>()
            .init_resource::<DayNightTint>()
            // Pause time whenever we leave Playing state
            .add_systems(OnEnter(GameState::Playing), resume_time)
            .add_systems(OnExit(GameState::Playing), pause_time)
            .add_systems(
                Update,
                (tick_day_clock, handle_skip_day)
                    .chain()
                    .in_set(FarmSet::Clock)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                update_day_night_tint
                    .in_set(FarmSet::Present)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ─── State transition hooks ───────────────────────────────────────────────────

fn resume_time(mut clock: ResMut<DayClock>) {
    clock.paused = false;
    info!("[Calendar] Time resumed — Day {} ({:.0}%)", clock.day, clock.progress * 100.0);
}

fn pause_time(mut clock: ResMut<DayClock>) {
    clock.paused = true;
    info!("[Calendar] Time paused");
}

// ─── Systems ──────────────────────────────────────────────────────────────────

pub fn tick_day_clock(
    time: Res<Time>,
    mut clock: ResMut<DayClock>,
    mut day_writer: EventWriter<DayPassedEvent>,
) {
    let first_new_day = clock.day + 1;
    let crossed = clock.advance(time.delta_secs());
    for day in first_new_day..first_new_day + crossed {
        info!("[Calendar] Day {} begins", day);
        day_writer.send(DayPassedEvent { day });
    }
}

pub fn handle_skip_day(
    mut skip_events: EventReader<SkipDayEvent>,
    mut clock: ResMut<DayClock>,
    mut day_writer: EventWriter<DayPassedEvent>,
) {
    // Several sleep requests in one frame still end only one day.
    if skip_events.read().count() == 0 {
        return;
    }
    let day = clock.skip_to_next_day();
    info!("[Calendar] Slept through to day {}", day);
    day_writer.send(DayPassedEvent { day });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates_progress() {
        let mut clock = DayClock::new(10.0);
        assert_eq!(clock.advance(2.5), 0);
        assert!((clock.progress - 0.25).abs() < 1e-5);
        assert_eq!(clock.day, 1);
        assert_eq!(clock.advance(7.5), 1);
        assert_eq!(clock.day, 2);
        assert!(clock.progress < 1e-4);
    }

    #[test]
    fn test_long_frame_crosses_several_days() {
        let mut clock = DayClock::new(10.0);
        assert_eq!(clock.advance(35.0), 3);
        assert_eq!(clock.day, 4);
        assert!((clock.progress - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_paused_clock_does_not_move() {
        let mut clock = DayClock::new(10.0);
        clock.paused = true;
        assert_eq!(clock.advance(100.0), 0);
        assert_eq!(clock.day, 1);
        assert_eq!(clock.progress, 0.0);
    }

    #[test]
    fn test_zero_day_length_falls_back() {
        let mut clock = DayClock::new(0.0);
        assert_eq!(clock.advance(30.0), 0);
        assert!((clock.progress - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_skip_resets_progress() {
        let mut clock = DayClock::new(10.0);
        clock.advance(4.0);
        assert_eq!(clock.skip_to_next_day(), 2);
        assert_eq!(clock.progress, 0.0);
    }

    #[test]
    fn test_clock_time_starts_at_six() {
        let mut clock = DayClock::new(24.0);
        assert_eq!(clock.clock_time(), (6, 0));
        clock.advance(6.0);
        assert_eq!(clock.clock_time(), (12, 0));
        clock.advance(12.0);
        assert_eq!(clock.clock_time(), (0, 0));
    }
}
