//! # Alert Evaluation
//!
//! Decides, once per cycle and per subscription, whether detected swell windows
//! should notify.
//!
//! ## Threshold Crossing
//! The only state carried between cycles is `last_notified_score`. The decision is
//! a pure function of that prior value, the cycle's peak score and the subscription
//! threshold (see [`transition`]):
//!
//! ```text
//!            peak >= threshold, prior < threshold   → notify
//!  Below ───────────────────────────────────────────────▶ Above
//!    ▲                                                    │ peak >= threshold → stay quiet
//!    └──────────────── peak < threshold ──────────────────┘
//! ```
//!
//! The cycle peak is the highest peak score of the cycle's detected windows. A cycle
//! without windows always counts as below the threshold, whatever individual hours
//! scored.
//!
//! Other frequency modes notify whenever the peak meets the threshold; how often
//! they run is the scheduler's business.
//!
//! ## Deduplication
//! Before a window notifies, its `(subscription, spot, start, end)` key is checked
//! against the [`SendLog`]. A key that is already present never notifies again.
//!
//! ## Batch Isolation
//! [`run_alert_cycle`] evaluates subscriptions one at a time. A subscription that
//! fails validation is logged and recorded in the report; the rest of the batch
//! still runs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::quality::QualityLabel;
use crate::scoring::SpotTimelines;
use crate::spots::SpotRegistry;
use crate::wave_height::height_label;
use crate::windows::{
    detect_best_spot_window, detect_windows, AlertSubscription, Channels, DetectedSwellWindow,
    NotificationFrequency,
};
use crate::ScoredHourlyReading;

/// Reasons a subscription cannot be evaluated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlertError {
    /// The subscription targets a spot with no scored timeline
    #[error("subscription {subscription_id}: unknown spot {spot_id}")]
    UnknownSpot {
        subscription_id: String,
        spot_id: String,
    },

    /// A threshold is negative, not finite, or out of range
    #[error("subscription {subscription_id}: invalid threshold {field}")]
    InvalidThreshold {
        subscription_id: String,
        field: &'static str,
    },

    /// Threshold mode needs a score to cross
    #[error("subscription {0}: threshold frequency requires min_quality_score")]
    MissingScoreThreshold(String),
}

/// Result of one state machine step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Value to persist as the subscription's `last_notified_score`
    pub last_notified_score: u8,
    pub should_notify: bool,
}

/// Advance the crossing detector by one cycle.
///
/// A missing prior score counts as below the threshold.
///
/// # Example
/// ```
/// use swell_watch_lib::alert::transition;
/// use swell_watch_lib::windows::NotificationFrequency;
///
/// let mut state = None;
/// let mut fired = Vec::new();
/// for (i, peak) in [30, 30, 65, 65, 20, 70].into_iter().enumerate() {
///     let step = transition(state, peak, 60, NotificationFrequency::Threshold);
///     state = Some(step.last_notified_score);
///     if step.should_notify {
///         fired.push(i);
///     }
/// }
/// assert_eq!(fired, vec![2, 5]);
/// ```
pub fn transition(
    prior: Option<u8>,
    current: u8,
    threshold: u8,
    frequency: NotificationFrequency,
) -> Transition {
    let above = current >= threshold;
    let should_notify = match frequency {
        NotificationFrequency::Threshold => above && prior.map_or(true, |p| p < threshold),
        NotificationFrequency::Once
        | NotificationFrequency::Twice
        | NotificationFrequency::Realtime
        | NotificationFrequency::Immediate => above,
    };

    Transition {
        last_notified_score: current,
        should_notify,
    }
}

/// Identity of one notified window for one subscription.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SendKey {
    pub subscription_id: String,
    pub spot_id: String,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

impl SendKey {
    pub fn for_window(subscription_id: &str, window: &DetectedSwellWindow) -> Self {
        Self {
            subscription_id: subscription_id.to_string(),
            spot_id: window.spot_id.clone(),
            window_start: window.start,
            window_end: window.end,
        }
    }
}

/// Log entry written when a window notifies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlertSendRecord {
    #[serde(flatten)]
    pub key: SendKey,
    pub sent_at: DateTime<Utc>,
}

/// Lookup/insert interface over the deduplication log.
pub trait SendLog {
    fn contains(&self, key: &SendKey) -> bool;

    /// Store a record. Returns `false` if its key was already present, in which
    /// case the existing record is kept.
    fn insert(&mut self, record: AlertSendRecord) -> bool;
}

/// [`SendLog`] backed by a hash map, for callers that persist the records
/// themselves.
#[derive(Clone, Debug, Default)]
pub struct InMemorySendLog {
    records: HashMap<SendKey, AlertSendRecord>,
}

impl InMemorySendLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted records; later duplicates are ignored.
    pub fn from_records(records: impl IntoIterator<Item = AlertSendRecord>) -> Self {
        let mut log = Self::new();
        for record in records {
            log.insert(record);
        }
        log
    }

    /// Records ordered by window start, then subscription.
    pub fn records(&self) -> Vec<AlertSendRecord> {
        let mut records: Vec<AlertSendRecord> = self.records.values().cloned().collect();
        records.sort_by(|a, b| {
            (a.key.window_start, &a.key.subscription_id, &a.key.spot_id)
                .cmp(&(b.key.window_start, &b.key.subscription_id, &b.key.spot_id))
        });
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SendLog for InMemorySendLog {
    fn contains(&self, key: &SendKey) -> bool {
        self.records.contains_key(key)
    }

    fn insert(&mut self, record: AlertSendRecord) -> bool {
        if self.records.contains_key(&record.key) {
            return false;
        }
        self.records.insert(record.key.clone(), record);
        true
    }
}

/// Payload handed to the notification transport.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlertNotification {
    pub subscription_id: String,
    pub owner_id: String,
    pub channels: Channels,
    pub spot_name: String,
    pub window: DetectedSwellWindow,
    pub wave_height_label: &'static str,
    pub quality_label: QualityLabel,
}

impl AlertNotification {
    /// One-line human readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} ({} {}) {} to {} UTC, {:.0}s avg period",
            self.spot_name,
            self.wave_height_label,
            self.window.peak_quality_score,
            self.quality_label,
            self.window.start.format("%a %b %-d %H:%M"),
            self.window.end.format("%a %H:%M"),
            self.window.average_period_s,
        )
    }
}

/// Shared inputs for one alert cycle.
#[derive(Clone, Copy, Debug)]
pub struct AlertContext<'a> {
    pub timelines: &'a SpotTimelines,
    pub registry: &'a SpotRegistry,
    pub now: DateTime<Utc>,
    /// Largest spacing between readings that still counts as contiguous
    pub max_gap: Duration,
}

/// Outcome of evaluating one subscription.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub subscription_id: String,
    pub transition: Transition,
    pub windows: Vec<DetectedSwellWindow>,
    pub notifications: Vec<AlertNotification>,
    /// Windows that would have notified but were already in the send log
    pub duplicates: usize,
}

fn validate(sub: &AlertSubscription) -> Result<(), AlertError> {
    let invalid = |field| AlertError::InvalidThreshold {
        subscription_id: sub.id.clone(),
        field,
    };
    let t = &sub.thresholds;
    if t.min_wave_height_ft.is_some_and(|h| !h.is_finite() || h < 0.0) {
        return Err(invalid("min_wave_height_ft"));
    }
    if t.min_period_s.is_some_and(|p| !p.is_finite() || p < 0.0) {
        return Err(invalid("min_period_s"));
    }
    if t.min_quality_score.is_some_and(|s| s > 100) {
        return Err(invalid("min_quality_score"));
    }
    if sub.frequency == NotificationFrequency::Threshold && t.min_quality_score.is_none() {
        return Err(AlertError::MissingScoreThreshold(sub.id.clone()));
    }
    Ok(())
}

fn timeline_peak<'a>(timelines: impl IntoIterator<Item = &'a Vec<ScoredHourlyReading>>) -> u8 {
    timelines
        .into_iter()
        .flatten()
        .map(|reading| reading.quality_score)
        .max()
        .unwrap_or(0)
}

/// Score fed to the crossing detector for one cycle.
///
/// With windows this is their highest peak. Without any, the cycle counts as below
/// the threshold: the timeline peak is kept only while it stays under it, so an hour
/// that met the score but failed another threshold cannot use up the crossing.
fn cycle_peak(windows: &[DetectedSwellWindow], timeline_peak: u8, threshold: u8) -> u8 {
    windows
        .iter()
        .map(|w| w.peak_quality_score)
        .max()
        .unwrap_or_else(|| timeline_peak.min(threshold.saturating_sub(1)))
}

/// Evaluate one subscription: detect windows, step the crossing detector and pass
/// notifying windows through the dedup gate.
///
/// New send records are written to `send_log`; the returned transition carries the
/// `last_notified_score` the caller must persist.
pub fn evaluate_subscription(
    sub: &AlertSubscription,
    ctx: &AlertContext<'_>,
    send_log: &mut impl SendLog,
) -> Result<Evaluation, AlertError> {
    validate(sub)?;

    let (windows, peak) = match &sub.spot_id {
        Some(spot_id) => {
            let timeline = ctx
                .timelines
                .get(spot_id)
                .ok_or_else(|| AlertError::UnknownSpot {
                    subscription_id: sub.id.clone(),
                    spot_id: spot_id.clone(),
                })?;
            let windows = detect_windows(spot_id, timeline, &sub.thresholds, ctx.max_gap);
            let fallback_peak = timeline_peak([timeline]);
            (windows, fallback_peak)
        }
        None => {
            let windows: Vec<_> =
                detect_best_spot_window(ctx.timelines, &sub.thresholds, ctx.max_gap)
                    .into_iter()
                    .collect();
            (windows, timeline_peak(ctx.timelines.values()))
        }
    };

    let threshold = sub.thresholds.min_quality_score.unwrap_or(0);
    let cycle_peak = cycle_peak(&windows, peak, threshold);
    let step = transition(sub.last_notified_score, cycle_peak, threshold, sub.frequency);

    debug!(
        subscription_id = %sub.id,
        prior = ?sub.last_notified_score,
        peak = cycle_peak,
        threshold,
        notify = step.should_notify,
        windows = windows.len(),
        "evaluated subscription"
    );

    let mut notifications = Vec::new();
    let mut duplicates = 0;
    if step.should_notify {
        for window in &windows {
            let key = SendKey::for_window(&sub.id, window);
            if send_log.contains(&key) {
                debug!(subscription_id = %sub.id, spot_id = %window.spot_id, "window already notified");
                duplicates += 1;
                continue;
            }
            send_log.insert(AlertSendRecord {
                key,
                sent_at: ctx.now,
            });
            notifications.push(AlertNotification {
                subscription_id: sub.id.clone(),
                owner_id: sub.owner_id.clone(),
                channels: sub.channels,
                spot_name: ctx
                    .registry
                    .get(&window.spot_id)
                    .map_or_else(|| window.spot_id.clone(), |spot| spot.name.clone()),
                window: window.clone(),
                wave_height_label: height_label(window.peak_wave_height_ft),
                quality_label: QualityLabel::from_score(window.peak_quality_score),
            });
        }
    }

    Ok(Evaluation {
        subscription_id: sub.id.clone(),
        transition: step,
        windows,
        notifications,
        duplicates,
    })
}

/// New `last_notified_score` for one subscription.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreUpdate {
    pub subscription_id: String,
    pub last_notified_score: u8,
}

/// A subscription that could not be evaluated this cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleFailure {
    pub subscription_id: String,
    pub error: AlertError,
}

/// Everything one alert cycle produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CycleReport {
    pub evaluated: usize,
    pub notifications: Vec<AlertNotification>,
    pub updates: Vec<ScoreUpdate>,
    pub failures: Vec<CycleFailure>,
    pub duplicates: usize,
}

impl CycleReport {
    /// Write the cycle's score updates back into `subscriptions`.
    pub fn apply_to(&self, subscriptions: &mut [AlertSubscription]) {
        let updates: HashMap<&str, u8> = self
            .updates
            .iter()
            .map(|u| (u.subscription_id.as_str(), u.last_notified_score))
            .collect();
        for sub in subscriptions.iter_mut() {
            if let Some(score) = updates.get(sub.id.as_str()) {
                sub.last_notified_score = Some(*score);
            }
        }
    }
}

/// Evaluate every subscription in order. Failures are logged and collected; they
/// never stop the batch.
pub fn run_alert_cycle(
    subscriptions: &[AlertSubscription],
    ctx: &AlertContext<'_>,
    send_log: &mut impl SendLog,
) -> CycleReport {
    let mut report = CycleReport::default();

    for sub in subscriptions {
        match evaluate_subscription(sub, ctx, send_log) {
            Ok(evaluation) => {
                report.evaluated += 1;
                report.duplicates += evaluation.duplicates;
                report.updates.push(ScoreUpdate {
                    subscription_id: evaluation.subscription_id,
                    last_notified_score: evaluation.transition.last_notified_score,
                });
                report.notifications.extend(evaluation.notifications);
            }
            Err(error) => {
                warn!(subscription_id = %sub.id, %error, "skipping subscription");
                report.failures.push(CycleFailure {
                    subscription_id: sub.id.clone(),
                    error,
                });
            }
        }
    }

    info!(
        evaluated = report.evaluated,
        notifications = report.notifications.len(),
        duplicates = report.duplicates,
        failures = report.failures.len(),
        "alert cycle complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::WindClass;
    use crate::windows::AlertThresholds;
    use crate::{DominantSwell, RawHourlyReading, SwellSource};
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 6, 0, 0).unwrap()
    }

    fn hour(spot: &str, h: i64, score: u8) -> ScoredHourlyReading {
        ScoredHourlyReading {
            raw: RawHourlyReading::new(spot, t0() + Duration::hours(h)),
            breaking_wave_height_ft: 4.0,
            wave_height_label: "4-5ft",
            quality_score: score,
            quality_label: QualityLabel::from_score(score),
            dominant_swell: Some(DominantSwell {
                source: SwellSource::Primary,
                height_ft: 3.0,
                period_s: 13.0,
                direction_deg: Some(270.0),
            }),
            wind_class: Some(WindClass::Offshore),
        }
    }

    fn subscription(id: &str, spot: Option<&str>, frequency: NotificationFrequency) -> AlertSubscription {
        AlertSubscription {
            id: id.to_string(),
            owner_id: "owner-1".to_string(),
            spot_id: spot.map(str::to_string),
            thresholds: AlertThresholds {
                min_quality_score: Some(60),
                ..Default::default()
            },
            frequency,
            channels: Channels {
                email: true,
                ..Default::default()
            },
            last_notified_score: None,
        }
    }

    fn timelines(scores: &[(&str, &[u8])]) -> SpotTimelines {
        scores
            .iter()
            .map(|(spot, s)| {
                let timeline = s
                    .iter()
                    .enumerate()
                    .map(|(i, score)| hour(spot, i as i64, *score))
                    .collect();
                (spot.to_string(), timeline)
            })
            .collect()
    }

    fn ctx<'a>(timelines: &'a SpotTimelines, registry: &'a SpotRegistry) -> AlertContext<'a> {
        AlertContext {
            timelines,
            registry,
            now: t0(),
            max_gap: Duration::hours(1),
        }
    }

    #[test]
    fn test_threshold_mode_notifies_on_crossings_only() {
        let mut prior = None;
        let mut fired = Vec::new();
        for (i, peak) in [30u8, 30, 65, 65, 20, 70].into_iter().enumerate() {
            let step = transition(prior, peak, 60, NotificationFrequency::Threshold);
            assert_eq!(step.last_notified_score, peak);
            prior = Some(step.last_notified_score);
            if step.should_notify {
                fired.push(i);
            }
        }
        assert_eq!(fired, vec![2, 5]);
    }

    #[test]
    fn test_first_evaluation_above_threshold_notifies() {
        let step = transition(None, 75, 60, NotificationFrequency::Threshold);
        assert!(step.should_notify);
    }

    #[test]
    fn test_level_triggered_modes_notify_while_above() {
        for mode in [
            NotificationFrequency::Once,
            NotificationFrequency::Twice,
            NotificationFrequency::Realtime,
            NotificationFrequency::Immediate,
        ] {
            assert!(transition(Some(80), 80, 60, mode).should_notify);
            assert!(!transition(Some(80), 59, 60, mode).should_notify);
        }
    }

    #[test]
    fn test_rerun_does_not_duplicate_send_records() {
        let registry = SpotRegistry::with_builtin();
        let timelines = timelines(&[("blacks", &[40, 70, 72, 50])]);
        let ctx = ctx(&timelines, &registry);
        let sub = subscription("s1", Some("blacks"), NotificationFrequency::Realtime);
        let mut log = InMemorySendLog::new();

        let first = evaluate_subscription(&sub, &ctx, &mut log).unwrap();
        assert_eq!(first.notifications.len(), 1);
        assert_eq!(first.notifications[0].spot_name, "Black's Beach");
        assert_eq!(log.len(), 1);

        let second = evaluate_subscription(&sub, &ctx, &mut log).unwrap();
        assert!(second.transition.should_notify);
        assert!(second.notifications.is_empty());
        assert_eq!(second.duplicates, 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_threshold_subscription_needs_score() {
        let mut sub = subscription("s1", Some("blacks"), NotificationFrequency::Threshold);
        sub.thresholds.min_quality_score = None;
        assert_eq!(validate(&sub), Err(AlertError::MissingScoreThreshold("s1".into())));
    }

    #[test]
    fn test_below_threshold_cycle_records_timeline_peak() {
        let registry = SpotRegistry::with_builtin();
        let timelines = timelines(&[("blacks", &[10, 45, 30])]);
        let mut sub = subscription("s1", Some("blacks"), NotificationFrequency::Threshold);
        sub.last_notified_score = Some(80);

        let eval = evaluate_subscription(&sub, &ctx(&timelines, &registry), &mut InMemorySendLog::new())
            .unwrap();
        assert!(eval.windows.is_empty());
        assert!(!eval.transition.should_notify);
        assert_eq!(eval.transition.last_notified_score, 45);
    }

    fn with_height(mut timelines: SpotTimelines, height_ft: f64) -> SpotTimelines {
        for reading in timelines.values_mut().flatten() {
            reading.breaking_wave_height_ft = height_ft;
        }
        timelines
    }

    #[test]
    fn test_high_score_without_window_keeps_crossing_armed() {
        let registry = SpotRegistry::with_builtin();
        let mut sub = subscription("s1", Some("blacks"), NotificationFrequency::Threshold);
        sub.thresholds.min_wave_height_ft = Some(6.0);
        sub.last_notified_score = Some(20);
        let mut log = InMemorySendLog::new();

        // score clears 60 but the surf is too small: no window
        let small = with_height(timelines(&[("blacks", &[100, 100])]), 3.2);
        let quiet = evaluate_subscription(&sub, &ctx(&small, &registry), &mut log).unwrap();
        assert!(quiet.windows.is_empty());
        assert!(!quiet.transition.should_notify);
        assert!(quiet.transition.last_notified_score < 60);
        sub.last_notified_score = Some(quiet.transition.last_notified_score);

        let big = with_height(timelines(&[("blacks", &[100, 100])]), 7.0);
        let fired = evaluate_subscription(&sub, &ctx(&big, &registry), &mut log).unwrap();
        assert_eq!(fired.windows.len(), 1);
        assert!(fired.transition.should_notify);
        assert_eq!(fired.notifications.len(), 1);
        assert_eq!(fired.transition.last_notified_score, 100);
    }

    #[test]
    fn test_best_spot_without_window_keeps_crossing_armed() {
        let registry = SpotRegistry::with_builtin();
        let mut sub = subscription("best", None, NotificationFrequency::Threshold);
        sub.thresholds.min_period_s = Some(15.0);
        let mut log = InMemorySendLog::new();

        // every hour scores 90 but the dominant period is 13s
        let short = timelines(&[("blacks", &[90, 90]), ("swamis", &[95])]);
        let quiet = evaluate_subscription(&sub, &ctx(&short, &registry), &mut log).unwrap();
        assert!(quiet.windows.is_empty());
        assert!(!quiet.transition.should_notify);
        assert_eq!(quiet.transition.last_notified_score, 59);
        sub.last_notified_score = Some(quiet.transition.last_notified_score);

        sub.thresholds.min_period_s = Some(12.0);
        let fired = evaluate_subscription(&sub, &ctx(&short, &registry), &mut log).unwrap();
        assert_eq!(fired.notifications.len(), 1);
        assert_eq!(fired.notifications[0].window.spot_id, "swamis");
    }

    #[test]
    fn test_bad_subscription_does_not_abort_batch() {
        let registry = SpotRegistry::with_builtin();
        let timelines = timelines(&[("blacks", &[70, 70]), ("swamis", &[90])]);
        let mut negative = subscription("bad-threshold", Some("blacks"), NotificationFrequency::Once);
        negative.thresholds.min_wave_height_ft = Some(-1.0);
        let subs = vec![
            subscription("missing-spot", Some("mavericks"), NotificationFrequency::Once),
            negative,
            subscription("best", None, NotificationFrequency::Threshold),
        ];

        let mut log = InMemorySendLog::new();
        let report = run_alert_cycle(&subs, &ctx(&timelines, &registry), &mut log);

        assert_eq!(report.evaluated, 1);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(
            report.failures[0].error,
            AlertError::UnknownSpot {
                subscription_id: "missing-spot".into(),
                spot_id: "mavericks".into()
            }
        );
        assert_eq!(report.notifications.len(), 1);
        assert_eq!(report.notifications[0].window.spot_id, "swamis");
        assert_eq!(report.updates[0].last_notified_score, 90);
    }

    #[test]
    fn test_apply_to_writes_back_scores() {
        let mut subs = vec![
            subscription("a", None, NotificationFrequency::Once),
            subscription("b", None, NotificationFrequency::Once),
        ];
        let report = CycleReport {
            updates: vec![ScoreUpdate {
                subscription_id: "b".into(),
                last_notified_score: 42,
            }],
            ..Default::default()
        };
        report.apply_to(&mut subs);
        assert_eq!(subs[0].last_notified_score, None);
        assert_eq!(subs[1].last_notified_score, Some(42));
    }

    #[test]
    fn test_send_log_keeps_first_record() {
        let key = SendKey {
            subscription_id: "s".into(),
            spot_id: "blacks".into(),
            window_start: t0(),
            window_end: t0() + Duration::hours(2),
        };
        let mut log = InMemorySendLog::new();
        assert!(log.insert(AlertSendRecord { key: key.clone(), sent_at: t0() }));
        assert!(!log.insert(AlertSendRecord {
            key: key.clone(),
            sent_at: t0() + Duration::hours(5)
        }));
        assert_eq!(log.records()[0].sent_at, t0());
    }

    #[test]
    fn test_summary_mentions_spot_and_label() {
        let notification = AlertNotification {
            subscription_id: "s".into(),
            owner_id: "o".into(),
            channels: Channels::default(),
            spot_name: "Swami's".into(),
            window: DetectedSwellWindow {
                spot_id: "swamis".into(),
                start: t0(),
                end: t0() + Duration::hours(3),
                peak_wave_height_ft: 4.2,
                peak_quality_score: 78,
                average_period_s: 14.0,
            },
            wave_height_label: "4-5ft",
            quality_label: QualityLabel::ClearTheCalendar,
        };
        assert_eq!(
            notification.summary(),
            "Swami's: 4-5ft (78 Clear the Calendar) Sat Feb 1 06:00 to Sat 09:00 UTC, 14s avg period"
        );
    }
}
