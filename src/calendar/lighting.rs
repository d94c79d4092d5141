//! Day/night ambient tint driven by the day clock's progress.
//!
//! Smoothly interpolates between keyframed tint values and pushes the result
//! into the clear colour when the renderer is present.

use bevy::prelude::*;

use super::DayClock;

/// Day/night ambient light level (0.0 = full daylight, 0.5 = deep night).
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct DayNightTint {
    pub intensity: f32,
    pub tint: (f32, f32, f32),
}

impl Default for DayNightTint {
    fn default() -> Self {
        Self {
            intensity: 0.0,
            tint: (1.0, 1.0, 1.0),
        }
    }
}

struct TintKeyframe {
    hour: f32,
    tint: (f32, f32, f32),
    intensity: f32,
}

/// Keyframes on a 24h clock. The day starts at 06:00, so sampling maps
/// progress 0.0 → hour 6 and wraps past midnight.
static KEYFRAMES: &[TintKeyframe] = &[
    TintKeyframe { hour: 0.0,  tint: (0.3, 0.3, 0.5), intensity: 0.5 },  // midnight
    TintKeyframe { hour: 5.0,  tint: (0.3, 0.3, 0.5), intensity: 0.5 },  // late night
    TintKeyframe { hour: 6.0,  tint: (1.0, 0.9, 0.7), intensity: 0.15 }, // sunrise
    TintKeyframe { hour: 8.0,  tint: (1.0, 1.0, 0.95), intensity: 0.05 }, // morning
    TintKeyframe { hour: 10.0, tint: (1.0, 1.0, 1.0), intensity: 0.0 },  // full daylight
    TintKeyframe { hour: 16.0, tint: (1.0, 1.0, 1.0), intensity: 0.0 },  // full daylight
    TintKeyframe { hour: 18.0, tint: (1.0, 0.85, 0.6), intensity: 0.15 }, // sunset
    TintKeyframe { hour: 20.0, tint: (0.6, 0.6, 0.9), intensity: 0.3 },  // twilight
    TintKeyframe { hour: 22.0, tint: (0.3, 0.3, 0.5), intensity: 0.5 },  // night
    TintKeyframe { hour: 24.0, tint: (0.3, 0.3, 0.5), intensity: 0.5 },  // midnight (wrap)
];

fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sample the tint at a point in the day (`progress` in `[0, 1)`).
pub fn sample_tint(progress: f32) -> ((f32, f32, f32), f32) {
    let hour = (progress.clamp(0.0, 1.0) * 24.0 + 6.0) % 24.0;

    for pair in KEYFRAMES.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if hour >= a.hour && hour <= b.hour {
            let range = b.hour - a.hour;
            if range < 0.001 {
                return (a.tint, a.intensity);
            }
            let frac = (hour - a.hour) / range;
            let tint = (
                lerp_f32(a.tint.0, b.tint.0, frac),
                lerp_f32(a.tint.1, b.tint.1, frac),
                lerp_f32(a.tint.2, b.tint.2, frac),
            );
            return (tint, lerp_f32(a.intensity, b.intensity, frac));
        }
    }

    ((1.0, 1.0, 1.0), 0.0)
}

pub fn update_day_night_tint(
    clock: Res<DayClock>,
    mut tint: ResMut<DayNightTint>,
    clear_color: Option<ResMut<ClearColor>>,
) {
    let (rgb, intensity) = sample_tint(clock.progress);
    tint.tint = rgb;
    tint.intensity = intensity;

    if let Some(mut clear_color) = clear_color {
        // Grass-green backdrop darkened toward the tint colour at night.
        let base = (0.36, 0.55, 0.30);
        let k = 1.0 - intensity;
        clear_color.0 = Color::srgb(
            base.0 * lerp_f32(1.0, rgb.0, intensity * 2.0) * k,
            base.1 * lerp_f32(1.0, rgb.1, intensity * 2.0) * k,
            base.2 * lerp_f32(1.0, rgb.2, intensity * 2.0) * k,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dawn_is_lightly_tinted() {
        let (_, intensity) = sample_tint(0.0);
        assert!((intensity - 0.15).abs() < 1e-4);
    }

    #[test]
    fn test_midday_is_untinted() {
        // progress 0.25 → 12:00
        let (tint, intensity) = sample_tint(0.25);
        assert_eq!(intensity, 0.0);
        assert_eq!(tint, (1.0, 1.0, 1.0));
    }

    #[test]
    fn test_late_night_is_dark() {
        // progress 0.8 → 01:12
        let (_, intensity) = sample_tint(0.8);
        assert!((intensity - 0.5).abs() < 1e-4);
    }
}
