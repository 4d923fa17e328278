//! # Scoring Pipeline Tests
//!
//! Raw readings through scoring, current-conditions selection and the documented
//! worked examples for breaking height.

use chrono::{DateTime, Duration, TimeZone, Utc};
use swell_watch_lib::current::{current_conditions, select_current, ConditionsSource, FallbackSnapshot};
use swell_watch_lib::quality::{QualityLabel, WindClass};
use swell_watch_lib::scoring::{score_reading, score_timeline};
use swell_watch_lib::spots::{SpotProfile, SpotRegistry};
use swell_watch_lib::{RawHourlyReading, SwellComponent, SwellSource};

fn blacks() -> SpotProfile {
    SpotRegistry::with_builtin()
        .get("blacks")
        .cloned()
        .expect("blacks is a built-in spot")
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 8, 16, 0, 0).unwrap()
}

fn swell_reading(at: DateTime<Utc>, height: f64, period: f64, direction: f64) -> RawHourlyReading {
    let mut reading = RawHourlyReading::new("blacks", at);
    reading.primary = SwellComponent::new(height, period, Some(direction));
    reading
}

/// The three documented direction examples at an amplification of 1.4.
#[test]
fn worked_direction_examples_through_scoring() {
    let spot = blacks();
    let cases = [(105.0, 6.006, "4-6ft+"), (95.0, 4.62, "4-5ft"), (115.0, 9.24, "6-8ft")];

    for (direction, expected, label) in cases {
        let scored = score_reading(&swell_reading(now(), 6.0, 12.0, direction), &spot);
        assert!(
            (scored.breaking_wave_height_ft - expected).abs() < 1e-9,
            "direction {direction}: expected {expected}, got {}",
            scored.breaking_wave_height_ft
        );
        assert_eq!(scored.wave_height_label, label);
        assert_eq!(scored.dominant_swell.unwrap().source, SwellSource::Primary);
    }
}

/// Short-period swell contributes no breaking height and caps the score.
#[test]
fn wind_chop_is_capped() {
    let mut reading = swell_reading(now(), 9.0, 4.0, 270.0);
    reading.wind_speed_kt = Some(3.0);
    reading.wind_direction_deg = Some(100.0);
    reading.tide_ft = Some(2.0);

    let scored = score_reading(&reading, &blacks());
    assert_eq!(scored.breaking_wave_height_ft, 0.0);
    assert_eq!(scored.wave_height_label, "Flat");
    assert!(scored.quality_score <= 20);
    assert_eq!(scored.dominant_swell.unwrap().source, SwellSource::Fallback);
}

/// Groomed long-period swell at the right tide scores at the top of the scale.
#[test]
fn clean_groundswell_scores_all_time() {
    let mut reading = swell_reading(now(), 4.0, 16.0, 275.0);
    reading.wind_speed_kt = Some(5.0);
    reading.wind_direction_deg = Some(80.0);
    reading.tide_ft = Some(2.5);

    let scored = score_reading(&reading, &blacks());
    assert_eq!(scored.quality_score, 100);
    assert_eq!(scored.quality_label, QualityLabel::AllTime);
    assert_eq!(scored.wind_class, Some(WindClass::Offshore));
}

/// Readings at T-5h53m, T-53m and T+7m: only T-53m is "current".
#[test]
fn current_selector_ignores_future_points() {
    let raw = vec![
        swell_reading(now() - Duration::minutes(353), 3.0, 12.0, 270.0),
        swell_reading(now() - Duration::minutes(53), 3.5, 12.0, 270.0),
        swell_reading(now() + Duration::minutes(7), 4.0, 12.0, 270.0),
    ];
    let timeline = score_timeline(&raw, &blacks());

    let picked = select_current(&timeline, now(), Duration::hours(1)).unwrap();
    assert_eq!(picked.timestamp(), now() - Duration::minutes(53));
    assert_eq!(picked.raw.primary.height_ft, Some(3.5));
}

/// Nothing recent: the caller's snapshot fills in every field.
#[test]
fn stale_timeline_falls_back_to_snapshot() {
    let raw = vec![swell_reading(now() - Duration::hours(3), 3.0, 12.0, 270.0)];
    let timeline = score_timeline(&raw, &blacks());
    let snapshot = FallbackSnapshot {
        quality_score: Some(52),
        wave_height_ft: Some(2.5),
        swell: SwellComponent::new(2.0, 11.0, Some(260.0)),
        tide_ft: Some(1.8),
        ..Default::default()
    };

    let current = current_conditions(&timeline, now(), Duration::hours(1), None, Some(&snapshot));
    assert_eq!(current.source, ConditionsSource::Snapshot);
    assert_eq!(current.observed_at, None);
    assert_eq!(current.score, 52);
    assert_eq!(current.wave_height_ft, Some(2.5));
    assert_eq!(current.swell, snapshot.swell);
    assert_eq!(current.tide_ft, Some(1.8));
}

/// A fresh reading wins the score and height chains even when a snapshot exists.
#[test]
fn fresh_reading_beats_snapshot() {
    let mut reading = swell_reading(now() - Duration::minutes(20), 3.0, 14.0, 270.0);
    reading.tide_ft = Some(3.0);
    let timeline = score_timeline(&[reading], &blacks());
    let snapshot = FallbackSnapshot {
        quality_score: Some(5),
        wave_height_ft: Some(0.5),
        wind_speed_kt: Some(8.0),
        ..Default::default()
    };

    let current = current_conditions(&timeline, now(), Duration::hours(1), Some(7.0), Some(&snapshot));
    assert_eq!(current.source, ConditionsSource::Reading);
    assert_eq!(current.score, timeline[0].quality_score);
    assert_eq!(current.wave_height_ft, Some(timeline[0].breaking_wave_height_ft));
    assert_eq!(current.wind_speed_kt, Some(8.0));
    assert_eq!(current.tide_ft, Some(3.0));
}
