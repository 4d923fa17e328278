//! # Timeline Scoring
//!
//! Runs the breaking height and quality formulas over raw hourly readings and
//! produces [`ScoredHourlyReading`] timelines for the display and alert paths.
//!
//! ## Dominant Swell
//! A reading carries up to three swell components. Every complete component at or
//! above the spot's minimum period is evaluated through the breaking height formula
//! and the tallest predicted break wins, with ties going to the earlier component
//! (primary, secondary, wind wave). When nothing reaches the minimum period the
//! pick is marked [`SwellSource::Fallback`] and uses the primary swell, or the
//! tallest component if the primary is missing.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::quality::{self, classify_wind, QualityInputs};
use crate::spots::{SpotProfile, SpotRegistry};
use crate::wave_height::{breaking_height, height_label};
use crate::{DominantSwell, RawHourlyReading, ScoredHourlyReading, SwellComponent, SwellSource};

/// Scored timelines keyed by spot id, each in ascending timestamp order.
pub type SpotTimelines = BTreeMap<String, Vec<ScoredHourlyReading>>;

fn usable(component: &SwellComponent) -> Option<(f64, f64)> {
    match (component.height_ft, component.period_s) {
        (Some(h), Some(p)) if h.is_finite() && p.is_finite() => Some((h, p)),
        _ => None,
    }
}

/// Pick the swell component that drives the forecast for `raw` at `spot`.
///
/// Returns the pick and its predicted breaking height, or `None` when no
/// component has both a height and a period.
pub fn dominant_swell(raw: &RawHourlyReading, spot: &SpotProfile) -> Option<(DominantSwell, f64)> {
    let candidates = [
        (SwellSource::Primary, &raw.primary),
        (SwellSource::Secondary, &raw.secondary),
        (SwellSource::WindWave, &raw.wind_wave),
    ];

    let mut best: Option<(DominantSwell, f64)> = None;
    let mut tallest: Option<(DominantSwell, f64)> = None;
    let mut primary: Option<(DominantSwell, f64)> = None;

    for (source, component) in candidates {
        let Some((height_ft, period_s)) = usable(component) else {
            continue;
        };
        let swell = DominantSwell {
            source,
            height_ft,
            period_s,
            direction_deg: component.direction_deg,
        };
        let breaking = breaking_height(height_ft, period_s, component.direction_deg, spot).height_ft;

        if source == SwellSource::Primary {
            primary = Some((swell, breaking));
        }
        if tallest.map_or(true, |(t, _)| height_ft > t.height_ft) {
            tallest = Some((swell, breaking));
        }
        if period_s >= spot.min_period_s && best.map_or(true, |(_, b)| breaking > b) {
            best = Some((swell, breaking));
        }
    }

    best.or_else(|| {
        primary.or(tallest).map(|(swell, breaking)| {
            (
                DominantSwell {
                    source: SwellSource::Fallback,
                    ..swell
                },
                breaking,
            )
        })
    })
}

/// Score a single reading.
pub fn score_reading(raw: &RawHourlyReading, spot: &SpotProfile) -> ScoredHourlyReading {
    let dominant = dominant_swell(raw, spot);
    let breaking_ft = dominant.map_or(0.0, |(_, breaking)| breaking);

    let inputs = QualityInputs {
        swell_height_ft: dominant.map_or(0.0, |(s, _)| s.height_ft),
        swell_period_s: dominant.map_or(0.0, |(s, _)| s.period_s),
        swell_direction_deg: dominant.and_then(|(s, _)| s.direction_deg),
        wind_speed_kt: raw.wind_speed_kt,
        wind_direction_deg: raw.wind_direction_deg,
        tide_ft: raw.tide_ft,
    };
    let breakdown = quality::score(&inputs, spot);

    ScoredHourlyReading {
        raw: raw.clone(),
        breaking_wave_height_ft: breaking_ft,
        wave_height_label: height_label(breaking_ft),
        quality_score: breakdown.total,
        quality_label: breakdown.label,
        dominant_swell: dominant.map(|(swell, _)| swell),
        wind_class: raw
            .wind_direction_deg
            .map(|dir| classify_wind(dir, spot.shore_normal_deg)),
    }
}

/// Score a spot's timeline. Output is sorted by timestamp; a reading that repeats
/// an earlier timestamp is dropped.
pub fn score_timeline(readings: &[RawHourlyReading], spot: &SpotProfile) -> Vec<ScoredHourlyReading> {
    let mut ordered: Vec<&RawHourlyReading> = readings.iter().collect();
    ordered.sort_by_key(|r| r.timestamp);
    ordered.dedup_by_key(|r| r.timestamp);
    if ordered.len() != readings.len() {
        debug!(
            spot_id = %spot.id,
            dropped = readings.len() - ordered.len(),
            "dropped readings with duplicate timestamps"
        );
    }

    ordered
        .into_iter()
        .map(|raw| score_reading(raw, spot))
        .collect()
}

/// Score every spot's raw timeline. Timelines for spots missing from the registry
/// are skipped with a warning.
pub fn score_all(raw: &BTreeMap<String, Vec<RawHourlyReading>>, registry: &SpotRegistry) -> SpotTimelines {
    let mut scored = SpotTimelines::new();
    for (spot_id, readings) in raw {
        match registry.get(spot_id) {
            Some(spot) => {
                scored.insert(spot_id.clone(), score_timeline(readings, spot));
            }
            None => warn!(spot_id = %spot_id, "no profile for spot, timeline skipped"),
        }
    }
    scored
}
