//! # Current Conditions Selector
//!
//! Picks the single reading that best represents "now" from a noisy timeline and
//! resolves the display fields through ordered fallback chains.
//!
//! ## Selection
//! Only readings in `[now - max_age, now]` are candidates; future forecast hours are
//! never "current", even when they are closer in absolute time. Among candidates the
//! most recent wins.
//!
//! ## Fallback Chains
//! Every composite field is an explicit list of optional sources, first present
//! value wins:
//!
//! | Field       | Sources, in order                                                      |
//! |-------------|------------------------------------------------------------------------|
//! | score       | reading score → snapshot score → snapshot probability → 0              |
//! | wave height | breaking height → buoy height → dominant swell → raw primary → snapshot |
//! | swell       | dominant swell → raw primary → snapshot, per field                     |
//! | wind, tide  | reading → snapshot, per field                                          |

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{ScoredHourlyReading, SwellComponent, TidePhase};

/// Default age limit for a reading to count as current.
pub const DEFAULT_MAX_AGE_MINUTES: i64 = 60;

/// Lower-fidelity conditions supplied by the caller when the timeline has nothing
/// recent, e.g. a cached daily summary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FallbackSnapshot {
    pub quality_score: Option<u8>,
    /// Probability-style score some sources publish instead of a quality score
    pub probability_score: Option<u8>,
    pub wave_height_ft: Option<f64>,
    #[serde(default)]
    pub swell: SwellComponent,
    pub wind_speed_kt: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub tide_ft: Option<f64>,
    pub tide_phase: Option<TidePhase>,
}

/// Where the resolved conditions mostly came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionsSource {
    Reading,
    Snapshot,
    Empty,
}

/// Resolved "now" conditions for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub source: ConditionsSource,
    pub observed_at: Option<DateTime<Utc>>,
    pub score: u8,
    pub wave_height_ft: Option<f64>,
    pub swell: SwellComponent,
    pub wind_speed_kt: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub tide_ft: Option<f64>,
    pub tide_phase: Option<TidePhase>,
}

/// First present value in priority order.
pub fn first_present<T: Copy>(sources: &[Option<T>]) -> Option<T> {
    sources.iter().find_map(|source| *source)
}

/// Nearest reading at or before `now` that is no older than `max_age`.
///
/// # Example
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use swell_watch_lib::current::select_current;
/// use swell_watch_lib::scoring::score_timeline;
/// use swell_watch_lib::spots::SpotRegistry;
/// use swell_watch_lib::RawHourlyReading;
///
/// let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
/// let raw = vec![
///     RawHourlyReading::new("blacks", now - Duration::minutes(53)),
///     RawHourlyReading::new("blacks", now + Duration::minutes(7)),
/// ];
/// let registry = SpotRegistry::with_builtin();
/// let timeline = score_timeline(&raw, registry.get("blacks").unwrap());
///
/// let picked = select_current(&timeline, now, Duration::hours(1)).unwrap();
/// assert_eq!(picked.timestamp(), now - Duration::minutes(53));
/// ```
pub fn select_current(
    timeline: &[ScoredHourlyReading],
    now: DateTime<Utc>,
    max_age: Duration,
) -> Option<&ScoredHourlyReading> {
    let oldest = now - max_age;
    timeline
        .iter()
        .filter(|reading| reading.timestamp() >= oldest && reading.timestamp() <= now)
        .min_by_key(|reading| now - reading.timestamp())
}

/// Resolve display fields from the selected reading, an optional buoy-derived
/// height and an optional fallback snapshot.
pub fn resolve_current(
    selected: Option<&ScoredHourlyReading>,
    buoy_height_ft: Option<f64>,
    fallback: Option<&FallbackSnapshot>,
) -> CurrentConditions {
    let raw = selected.map(|reading| &reading.raw);
    let dominant = selected.and_then(|reading| reading.dominant_swell);

    let score = first_present(&[
        selected.map(|reading| reading.quality_score),
        fallback.and_then(|f| f.quality_score),
        fallback.and_then(|f| f.probability_score),
    ])
    .unwrap_or(0);

    // A reading without a usable swell component never computed a breaking height
    let wave_height_ft = first_present(&[
        selected
            .filter(|reading| reading.dominant_swell.is_some())
            .map(|reading| reading.breaking_wave_height_ft),
        buoy_height_ft,
        dominant.map(|swell| swell.height_ft),
        raw.and_then(|r| r.primary.height_ft),
        fallback.and_then(|f| f.wave_height_ft),
    ]);

    let swell = SwellComponent {
        height_ft: first_present(&[
            dominant.map(|swell| swell.height_ft),
            raw.and_then(|r| r.primary.height_ft),
            fallback.and_then(|f| f.swell.height_ft),
        ]),
        period_s: first_present(&[
            dominant.map(|swell| swell.period_s),
            raw.and_then(|r| r.primary.period_s),
            fallback.and_then(|f| f.swell.period_s),
        ]),
        direction_deg: first_present(&[
            dominant.and_then(|swell| swell.direction_deg),
            raw.and_then(|r| r.primary.direction_deg),
            fallback.and_then(|f| f.swell.direction_deg),
        ]),
    };

    let source = match (selected, fallback) {
        (Some(_), _) => ConditionsSource::Reading,
        (None, Some(_)) => ConditionsSource::Snapshot,
        (None, None) => ConditionsSource::Empty,
    };

    CurrentConditions {
        source,
        observed_at: raw.map(|r| r.timestamp),
        score,
        wave_height_ft,
        swell,
        wind_speed_kt: first_present(&[
            raw.and_then(|r| r.wind_speed_kt),
            fallback.and_then(|f| f.wind_speed_kt),
        ]),
        wind_direction_deg: first_present(&[
            raw.and_then(|r| r.wind_direction_deg),
            fallback.and_then(|f| f.wind_direction_deg),
        ]),
        tide_ft: first_present(&[raw.and_then(|r| r.tide_ft), fallback.and_then(|f| f.tide_ft)]),
        tide_phase: first_present(&[
            raw.and_then(|r| r.tide_phase),
            fallback.and_then(|f| f.tide_phase),
        ]),
    }
}

/// Select and resolve in one step.
pub fn current_conditions(
    timeline: &[ScoredHourlyReading],
    now: DateTime<Utc>,
    max_age: Duration,
    buoy_height_ft: Option<f64>,
    fallback: Option<&FallbackSnapshot>,
) -> CurrentConditions {
    resolve_current(select_current(timeline, now, max_age), buoy_height_ft, fallback)
}
