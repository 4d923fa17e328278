//! # Breaking Wave Height
//!
//! Converts an open-water swell reading into a predicted rideable wave face height
//! at the shoreline:
//!
//! ```text
//! breaking = height × amplification × direction_factor × period_multiplier
//! ```
//!
//! - **Period multiplier** models how organized the energy is. Anything under 5s is
//!   local wind chop and contributes nothing.
//! - **Direction factor** models swell shadowing on west-facing exposures. Due-east
//!   swells lose half the amplification, east-southeast loses 35%.

use crate::spots::SpotProfile;

/// Breaking heights below this are always labelled "Flat".
pub const FLAT_THRESHOLD_FT: f64 = 0.5;

/// Upper bounds (exclusive) and labels of the wave height scale.
const HEIGHT_BUCKETS: [(f64, &str); 12] = [
    (FLAT_THRESHOLD_FT, "Flat"),
    (1.0, "1ft"),
    (2.0, "1-2ft"),
    (3.0, "2-3ft"),
    (4.0, "3-4ft"),
    (5.0, "4-5ft"),
    (6.0, "4-6ft"),
    (7.0, "4-6ft+"),
    (8.0, "5-7ft"),
    (10.0, "6-8ft"),
    (12.0, "6-10ft"),
    (15.0, "8-12ft"),
];
const LARGEST_BUCKET: &str = "10-15ft";

/// A breaking height estimate with its label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreakingEstimate {
    pub height_ft: f64,
    pub label: &'static str,
}

/// Energy/organization multiplier for a swell period.
pub fn period_multiplier(period_s: f64) -> f64 {
    match period_s {
        p if p < 5.0 => 0.0,
        p if p < 7.0 => 0.3,
        p if p < 10.0 => 1.0,
        p if p < 13.0 => 1.1,
        _ => 1.15,
    }
}

/// Fraction of the spot's amplification kept for a swell direction.
///
/// No direction means no adjustment.
pub fn direction_factor(direction_deg: Option<f64>) -> f64 {
    match direction_deg {
        Some(d) if (90.0..100.0).contains(&d) => 0.5,
        Some(d) if (100.0..110.0).contains(&d) => 0.65,
        _ => 1.0,
    }
}

/// Label for a breaking height on the fixed monotonic scale.
pub fn height_label(height_ft: f64) -> &'static str {
    HEIGHT_BUCKETS
        .iter()
        .find(|(upper, _)| height_ft < *upper)
        .map(|(_, label)| *label)
        .unwrap_or(LARGEST_BUCKET)
}

/// Predicted breaking height for one swell component at a spot.
///
/// Negative or non-finite inputs produce a zero estimate.
///
/// # Example
/// ```
/// use swell_watch_lib::spots::SpotRegistry;
/// use swell_watch_lib::wave_height::breaking_height;
///
/// let registry = SpotRegistry::with_builtin();
/// let blacks = registry.get("blacks").unwrap();
///
/// let estimate = breaking_height(6.0, 12.0, Some(115.0), blacks);
/// assert!((estimate.height_ft - 9.24).abs() < 1e-9);
/// assert_eq!(estimate.label, "6-8ft");
/// ```
pub fn breaking_height(
    swell_height_ft: f64,
    period_s: f64,
    direction_deg: Option<f64>,
    spot: &SpotProfile,
) -> BreakingEstimate {
    let raw = swell_height_ft
        * spot.amplification
        * direction_factor(direction_deg)
        * period_multiplier(period_s);
    let height_ft = if raw.is_finite() { raw.max(0.0) } else { 0.0 };

    BreakingEstimate {
        height_ft,
        label: height_label(height_ft),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spots::SpotRegistry;

    fn blacks() -> SpotProfile {
        SpotRegistry::with_builtin().get("blacks").cloned().unwrap()
    }

    #[test]
    fn test_period_multiplier_bands() {
        assert_eq!(period_multiplier(4.9), 0.0);
        assert_eq!(period_multiplier(5.0), 0.3);
        assert_eq!(period_multiplier(6.5), 0.3);
        assert_eq!(period_multiplier(7.0), 1.0);
        assert_eq!(period_multiplier(9.9), 1.0);
        assert_eq!(period_multiplier(10.0), 1.1);
        assert_eq!(period_multiplier(12.0), 1.1);
        assert_eq!(period_multiplier(13.0), 1.15);
        assert_eq!(period_multiplier(20.0), 1.15);
    }

    #[test]
    fn test_direction_examples_at_amplified_spot() {
        let spot = blacks();

        let ese = breaking_height(6.0, 12.0, Some(105.0), &spot);
        assert!((ese.height_ft - 6.006).abs() < 1e-9, "got {}", ese.height_ft);

        let east = breaking_height(6.0, 12.0, Some(95.0), &spot);
        assert!((east.height_ft - 4.62).abs() < 1e-9, "got {}", east.height_ft);

        let se = breaking_height(6.0, 12.0, Some(115.0), &spot);
        assert!((se.height_ft - 9.24).abs() < 1e-9, "got {}", se.height_ft);
    }

    #[test]
    fn test_missing_direction_is_neutral() {
        let spot = blacks();
        let none = breaking_height(3.0, 9.0, None, &spot);
        let south = breaking_height(3.0, 9.0, Some(190.0), &spot);
        assert_eq!(none, south);
    }

    #[test]
    fn test_wind_chop_contributes_nothing() {
        let estimate = breaking_height(8.0, 4.0, Some(270.0), &blacks());
        assert_eq!(estimate.height_ft, 0.0);
        assert_eq!(estimate.label, "Flat");
    }

    #[test]
    fn test_height_labels() {
        assert_eq!(height_label(0.0), "Flat");
        assert_eq!(height_label(0.49), "Flat");
        assert_eq!(height_label(0.5), "1ft");
        assert_eq!(height_label(1.5), "1-2ft");
        assert_eq!(height_label(3.0), "3-4ft");
        assert_eq!(height_label(6.5), "4-6ft+");
        assert_eq!(height_label(9.0), "6-8ft");
        assert_eq!(height_label(14.9), "8-12ft");
        assert_eq!(height_label(15.0), "10-15ft");
        assert_eq!(height_label(40.0), "10-15ft");
    }

    #[test]
    fn test_bad_inputs_never_go_negative() {
        let spot = blacks();
        assert_eq!(breaking_height(-2.0, 12.0, None, &spot).height_ft, 0.0);
        assert_eq!(breaking_height(f64::NAN, 12.0, None, &spot).height_ft, 0.0);
    }
}
