//! # Swell Watch Core Library
//!
//! This library turns raw hourly ocean/weather readings into surf forecasts and
//! alert decisions. It performs no network or disk I/O of its own: readings, spot
//! profiles and alert subscriptions are handed in as plain data and results are
//! handed back to the caller, who owns persistence and notification transport.
//!
//! ## Design Philosophy
//!
//! ### Pure Computation
//! - **Total functions**: Missing direction, wind or tide degrade a score towards a
//!   neutral value, they never produce an error
//! - **Clamped outputs**: Every score is clamped to `0..=100` as its last step and
//!   every breaking height is `>= 0`
//! - **One piece of state**: `last_notified_score` on a subscription is the only value
//!   carried between alert cycles, and it is produced by a pure transition function
//!
//! ### Data Flow
//! 1. **Profiles**: [`spots::SpotRegistry`] supplies per-spot tuning constants
//! 2. **Scoring**: [`scoring::score_timeline`] runs the breaking height and quality
//!    formulas over a [`RawHourlyReading`] timeline
//! 3. **Display path**: [`current::select_current`] picks the "now" point
//! 4. **Alert path**: [`windows`] finds qualifying swell windows and [`alert`] decides
//!    which of them notify
//! 5. **Context**: [`ephemeris::Ephemeris`] supplies light and tide context to both paths
//!
//! ## Core Types
//!
//! - [`SwellComponent`]: One swell train (height, period, direction)
//! - [`RawHourlyReading`]: One hour at one spot, as produced by ingestion
//! - [`ScoredHourlyReading`]: A raw reading plus breaking height, score and label

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quality::{QualityLabel, WindClass};

// Module declarations
pub mod alert;
pub mod config;
pub mod current;
pub mod ephemeris;
pub mod quality;
pub mod scoring;
pub mod snapshot;
pub mod spots;
pub mod wave_height;
pub mod windows;

/// A single swell train as reported by a buoy or wave model.
///
/// Every field is nullable because sources routinely drop individual values.
/// A component is only usable for wave height prediction when both `height_ft`
/// and `period_s` are present.
///
/// # Example
/// ```
/// use swell_watch_lib::SwellComponent;
///
/// let ground_swell = SwellComponent::new(4.5, 14.0, Some(285.0));
/// assert!(ground_swell.is_complete());
///
/// let partial = SwellComponent { height_ft: Some(2.0), period_s: None, direction_deg: None };
/// assert!(!partial.is_complete());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SwellComponent {
    /// Significant height in feet
    pub height_ft: Option<f64>,
    /// Peak period in seconds
    pub period_s: Option<f64>,
    /// Direction the swell is coming from, degrees true
    pub direction_deg: Option<f64>,
}

impl SwellComponent {
    pub fn new(height_ft: f64, period_s: f64, direction_deg: Option<f64>) -> Self {
        Self {
            height_ft: Some(height_ft),
            period_s: Some(period_s),
            direction_deg,
        }
    }

    /// True when both height and period are present.
    pub fn is_complete(&self) -> bool {
        self.height_ft.is_some() && self.period_s.is_some()
    }
}

/// Direction of tide movement at a given hour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TidePhase {
    Rising,
    Falling,
    Slack,
}

/// One hour of conditions at one spot, as produced by external ingestion.
///
/// Readings for a spot are expected in ascending `timestamp` order without
/// duplicates. The core treats them as read-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawHourlyReading {
    /// Spot this reading belongs to
    pub spot_id: String,
    /// Start of the hour this reading describes
    pub timestamp: DateTime<Utc>,
    /// Hours between the model run and `timestamp` (0 for observations)
    #[serde(default)]
    pub hours_out: Option<u32>,
    #[serde(default)]
    pub primary: SwellComponent,
    #[serde(default)]
    pub secondary: SwellComponent,
    #[serde(default)]
    pub wind_wave: SwellComponent,
    /// Wind speed in knots
    #[serde(default)]
    pub wind_speed_kt: Option<f64>,
    /// Direction the wind blows from, degrees true
    #[serde(default)]
    pub wind_direction_deg: Option<f64>,
    /// Tide height in feet above chart datum
    #[serde(default)]
    pub tide_ft: Option<f64>,
    #[serde(default)]
    pub tide_phase: Option<TidePhase>,
}

impl RawHourlyReading {
    /// Build an empty reading for `spot_id` at `timestamp`.
    pub fn new(spot_id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            spot_id: spot_id.into(),
            timestamp,
            hours_out: None,
            primary: SwellComponent::default(),
            secondary: SwellComponent::default(),
            wind_wave: SwellComponent::default(),
            wind_speed_kt: None,
            wind_direction_deg: None,
            tide_ft: None,
            tide_phase: None,
        }
    }
}

/// Which swell component was picked as the one driving the forecast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwellSource {
    Primary,
    Secondary,
    WindWave,
    /// No component reached the spot's minimum period; best effort pick
    Fallback,
}

/// The swell component selected for a reading, with the values it contributed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DominantSwell {
    pub source: SwellSource,
    pub height_ft: f64,
    pub period_s: f64,
    pub direction_deg: Option<f64>,
}

/// A raw reading plus everything the scoring engine derives from it.
///
/// Never persisted by the core; recomputed whenever a timeline is scored.
#[derive(Clone, Debug, Serialize)]
pub struct ScoredHourlyReading {
    pub raw: RawHourlyReading,
    /// Predicted breaking wave height, always `>= 0`
    pub breaking_wave_height_ft: f64,
    /// Bucketed label for `breaking_wave_height_ft` (e.g. "3-4ft")
    pub wave_height_label: &'static str,
    /// Composite score, always in `0..=100`
    pub quality_score: u8,
    pub quality_label: QualityLabel,
    pub dominant_swell: Option<DominantSwell>,
    /// Wind classification relative to the shore, `None` without wind data
    pub wind_class: Option<WindClass>,
}

impl ScoredHourlyReading {
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.raw.timestamp
    }

    /// Period of the dominant swell, if any component was usable.
    pub fn dominant_period_s(&self) -> Option<f64> {
        self.dominant_swell.map(|swell| swell.period_s)
    }
}
