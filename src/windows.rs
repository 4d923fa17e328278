//! # Swell Window Detection
//!
//! Scans scored timelines for maximal runs of consecutive hours that satisfy every
//! threshold of an alert subscription. Each run becomes a [`DetectedSwellWindow`]
//! carrying its peak breaking height, peak score and average dominant period.
//!
//! Subscriptions without a spot run in "best spot" mode: every spot is scanned and
//! only the window with the highest peak score across all spots survives (first
//! encountered wins a tie).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::quality::WindClass;
use crate::scoring::SpotTimelines;
use crate::ScoredHourlyReading;

/// Minimum conditions an hour must meet. Unset thresholds always pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Predicted breaking height, feet
    pub min_wave_height_ft: Option<f64>,
    pub min_quality_score: Option<u8>,
    /// Dominant swell period, seconds
    pub min_period_s: Option<f64>,
    /// Only count hours with offshore wind
    #[serde(default)]
    pub ideal_wind_only: bool,
}

impl AlertThresholds {
    /// True if `reading` satisfies every configured threshold.
    pub fn is_met_by(&self, reading: &ScoredHourlyReading) -> bool {
        let height_ok = self
            .min_wave_height_ft
            .map_or(true, |min| reading.breaking_wave_height_ft >= min);
        let score_ok = self
            .min_quality_score
            .map_or(true, |min| reading.quality_score >= min);
        let period_ok = self
            .min_period_s
            .map_or(true, |min| reading.dominant_period_s().is_some_and(|p| p >= min));
        let wind_ok = !self.ideal_wind_only || reading.wind_class == Some(WindClass::Offshore);

        height_ok && score_ok && period_ok && wind_ok
    }
}

/// How often the subscriber wants to hear about conditions.
///
/// Only `Threshold` changes the decision logic; the others differ in how often
/// the scheduler runs the evaluation cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationFrequency {
    /// Notify on upward threshold crossings only
    Threshold,
    /// Daily digest
    Once,
    /// Twice-daily digest
    Twice,
    Realtime,
    Immediate,
}

/// Delivery channels the transport collaborator should use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channels {
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub sms: bool,
    #[serde(default)]
    pub push: bool,
}

/// A user's alert configuration plus the state carried between cycles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlertSubscription {
    pub id: String,
    pub owner_id: String,
    /// `None` selects "best spot across all spots" mode
    pub spot_id: Option<String>,
    pub thresholds: AlertThresholds,
    pub frequency: NotificationFrequency,
    #[serde(default)]
    pub channels: Channels,
    /// Cycle peak score seen by the previous evaluation
    #[serde(default)]
    pub last_notified_score: Option<u8>,
}

/// A contiguous span of hours meeting every threshold of a subscription.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedSwellWindow {
    pub spot_id: String,
    /// Timestamp of the first qualifying hour
    pub start: DateTime<Utc>,
    /// Timestamp of the last qualifying hour
    pub end: DateTime<Utc>,
    pub peak_wave_height_ft: f64,
    pub peak_quality_score: u8,
    /// Mean dominant period over hours that had one, 0 if none did
    pub average_period_s: f64,
}

impl DetectedSwellWindow {
    /// Number of hourly readings spanned, inclusive.
    pub fn hours(&self) -> i64 {
        (self.end - self.start).num_hours() + 1
    }
}

struct RunAccumulator {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    peak_height: f64,
    peak_score: u8,
    period_sum: f64,
    period_count: u32,
}

impl RunAccumulator {
    fn open(reading: &ScoredHourlyReading) -> Self {
        let mut run = Self {
            start: reading.timestamp(),
            end: reading.timestamp(),
            peak_height: 0.0,
            peak_score: 0,
            period_sum: 0.0,
            period_count: 0,
        };
        run.extend(reading);
        run
    }

    fn extend(&mut self, reading: &ScoredHourlyReading) {
        self.end = reading.timestamp();
        self.peak_height = self.peak_height.max(reading.breaking_wave_height_ft);
        self.peak_score = self.peak_score.max(reading.quality_score);
        if let Some(period) = reading.dominant_period_s() {
            self.period_sum += period;
            self.period_count += 1;
        }
    }

    fn close(self, spot_id: &str) -> DetectedSwellWindow {
        let average_period_s = if self.period_count == 0 {
            0.0
        } else {
            self.period_sum / f64::from(self.period_count)
        };
        DetectedSwellWindow {
            spot_id: spot_id.to_string(),
            start: self.start,
            end: self.end,
            peak_wave_height_ft: self.peak_height,
            peak_quality_score: self.peak_score,
            average_period_s,
        }
    }
}

/// Find every maximal qualifying run in one spot's timeline.
///
/// Two qualifying readings further apart than `max_gap` start separate windows.
pub fn detect_windows(
    spot_id: &str,
    timeline: &[ScoredHourlyReading],
    thresholds: &AlertThresholds,
    max_gap: Duration,
) -> Vec<DetectedSwellWindow> {
    let mut windows = Vec::new();
    let mut run: Option<RunAccumulator> = None;

    for reading in timeline {
        if !thresholds.is_met_by(reading) {
            if let Some(open) = run.take() {
                windows.push(open.close(spot_id));
            }
            continue;
        }

        run = match run.take() {
            Some(mut open) if reading.timestamp() - open.end <= max_gap => {
                open.extend(reading);
                Some(open)
            }
            Some(open) => {
                windows.push(open.close(spot_id));
                Some(RunAccumulator::open(reading))
            }
            None => Some(RunAccumulator::open(reading)),
        };
    }

    if let Some(open) = run {
        windows.push(open.close(spot_id));
    }
    windows
}

/// Scan every spot and keep the single window with the highest peak score.
pub fn detect_best_spot_window(
    timelines: &SpotTimelines,
    thresholds: &AlertThresholds,
    max_gap: Duration,
) -> Option<DetectedSwellWindow> {
    let mut best: Option<DetectedSwellWindow> = None;
    for (spot_id, timeline) in timelines {
        for window in detect_windows(spot_id, timeline, thresholds, max_gap) {
            if best
                .as_ref()
                .map_or(true, |b| window.peak_quality_score > b.peak_quality_score)
            {
                best = Some(window);
            }
        }
    }
    best
}
