//! # Quality Score Engine
//!
//! Converts one hour of swell, wind and tide into a 0–100 surfability score.
//! The score is the sum of four independent components:
//!
//! | Component     | Range      | Driven by                                    |
//! |---------------|------------|----------------------------------------------|
//! | Swell energy  | 5 … 40     | `height × period^1.5`                        |
//! | Direction fit | −2 … 20    | deviation from the spot's ideal direction    |
//! | Tide fit      | 4 … 20     | distance from the spot's optimal tide range  |
//! | Wind          | −40 … +20  | offshore/cross/onshore class and speed       |
//!
//! Short-period swell is capped after summing (≤ 20 under 5s, ≤ 15 for small
//! sub-6s swell) and the total is always clamped to `0..=100`.
//!
//! ## Label Scale
//! Scores map onto a six-bin scale, see [`QualityLabel`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::spots::SpotProfile;

/// Direction score when the swell direction is unknown.
const DIRECTION_NEUTRAL: i32 = 10;
/// Tide score when the tide height is unknown.
const TIDE_NEUTRAL: i32 = 10;
/// Penalty for swells from the 90–110° band, which historically underperform.
const EAST_BAND_PENALTY: i32 = 4;
/// Tide heights within this distance outside the optimal range still score partially.
const TIDE_MARGIN_FT: f64 = 0.5;

/// Wind direction relative to the coastline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindClass {
    /// Blowing from land to sea; grooms the waves
    Offshore,
    /// Blowing roughly parallel to the beach
    CrossShore,
    /// Blowing from sea to land; blows the waves out
    Onshore,
}

/// Six-bin label scale for quality scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityLabel {
    #[serde(rename = "Flat")]
    Flat,
    #[serde(rename = "Don't Bother")]
    DontBother,
    #[serde(rename = "Worth a Look")]
    WorthALook,
    #[serde(rename = "Actually Fun")]
    ActuallyFun,
    #[serde(rename = "Clear the Calendar")]
    ClearTheCalendar,
    #[serde(rename = "All-Time")]
    AllTime,
}

impl QualityLabel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=20 => QualityLabel::Flat,
            21..=40 => QualityLabel::DontBother,
            41..=60 => QualityLabel::WorthALook,
            61..=75 => QualityLabel::ActuallyFun,
            76..=90 => QualityLabel::ClearTheCalendar,
            _ => QualityLabel::AllTime,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLabel::Flat => "Flat",
            QualityLabel::DontBother => "Don't Bother",
            QualityLabel::WorthALook => "Worth a Look",
            QualityLabel::ActuallyFun => "Actually Fun",
            QualityLabel::ClearTheCalendar => "Clear the Calendar",
            QualityLabel::AllTime => "All-Time",
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the score needs for one hour. All optional fields score neutrally
/// when absent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QualityInputs {
    pub swell_height_ft: f64,
    pub swell_period_s: f64,
    pub swell_direction_deg: Option<f64>,
    pub wind_speed_kt: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub tide_ft: Option<f64>,
}

/// Per-component points plus the capped and clamped total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct QualityBreakdown {
    pub swell_energy: i32,
    pub direction: i32,
    pub tide: i32,
    pub wind: i32,
    pub total: u8,
    pub label: QualityLabel,
}

/// Smallest angle between two bearings, in `0..=180`.
pub fn angular_deviation(a_deg: f64, b_deg: f64) -> f64 {
    let diff = (a_deg - b_deg).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

/// Swell energy points from `height × period^1.5`.
pub fn swell_energy_points(height_ft: f64, period_s: f64) -> i32 {
    let energy = height_ft.max(0.0) * period_s.max(0.0).powf(1.5);
    match energy {
        e if e < 10.0 => 5,
        e if e < 20.0 => 15,
        e if e < 35.0 => 25,
        e if e < 60.0 => 32,
        _ => 40,
    }
}

/// Direction fit points against the spot's ideal direction and tolerance.
pub fn direction_points(direction_deg: Option<f64>, spot: &SpotProfile) -> i32 {
    let Some(direction) = direction_deg else {
        return DIRECTION_NEUTRAL;
    };

    let deviation = angular_deviation(direction, spot.ideal_direction_deg);
    let tolerance = spot.direction_tolerance_deg;
    let fit = if deviation <= tolerance {
        20
    } else if deviation <= tolerance * 1.5 {
        14
    } else if deviation <= tolerance * 2.0 {
        8
    } else if deviation <= tolerance * 2.5 {
        4
    } else {
        2
    };

    if (90.0..=110.0).contains(&direction.rem_euclid(360.0)) {
        fit - EAST_BAND_PENALTY
    } else {
        fit
    }
}

/// Tide fit points against the spot's optimal range.
pub fn tide_points(tide_ft: Option<f64>, spot: &SpotProfile) -> i32 {
    let Some(tide) = tide_ft else {
        return TIDE_NEUTRAL;
    };

    if spot.tide_in_range(tide) {
        20
    } else if tide >= spot.tide_min_ft - TIDE_MARGIN_FT && tide <= spot.tide_max_ft + TIDE_MARGIN_FT
    {
        12
    } else {
        4
    }
}

/// Classify a wind-from bearing against the shore normal.
///
/// The bearing is rotated so that a normal of 180° leaves it unchanged, then
/// offshore is 315–45°, onshore 120–240° and everything else cross-shore.
pub fn classify_wind(wind_direction_deg: f64, shore_normal_deg: f64) -> WindClass {
    let relative = (wind_direction_deg - shore_normal_deg + 180.0).rem_euclid(360.0);
    if relative >= 315.0 || relative <= 45.0 {
        WindClass::Offshore
    } else if (120.0..=240.0).contains(&relative) {
        WindClass::Onshore
    } else {
        WindClass::CrossShore
    }
}

/// Wind points from class and speed (knots).
pub fn wind_points(class: WindClass, speed_kt: f64) -> i32 {
    match class {
        WindClass::Offshore => match speed_kt {
            s if s <= 12.0 => 20,
            s if s <= 18.0 => 15,
            _ => 10,
        },
        WindClass::CrossShore => match speed_kt {
            s if s <= 10.0 => -5,
            s if s <= 18.0 => -12,
            _ => -20,
        },
        WindClass::Onshore => match speed_kt {
            s if s <= 8.0 => -10,
            s if s <= 15.0 => -25,
            _ => -40,
        },
    }
}

/// Score one hour of conditions at a spot.
///
/// Wind only scores when both speed and direction are known, and is classified
/// against the spot's own shore normal.
///
/// # Example
/// ```
/// use swell_watch_lib::quality::{score, QualityInputs, QualityLabel};
/// use swell_watch_lib::spots::SpotRegistry;
///
/// let registry = SpotRegistry::with_builtin();
/// let spot = registry.get("blacks").unwrap();
/// let inputs = QualityInputs {
///     swell_height_ft: 4.0,
///     swell_period_s: 14.0,
///     swell_direction_deg: Some(270.0),
///     wind_speed_kt: Some(5.0),
///     wind_direction_deg: Some(90.0),
///     tide_ft: Some(2.0),
/// };
///
/// let breakdown = score(&inputs, spot);
/// assert_eq!(breakdown.total, 100);
/// assert_eq!(breakdown.label, QualityLabel::AllTime);
/// ```
pub fn score(inputs: &QualityInputs, spot: &SpotProfile) -> QualityBreakdown {
    let swell_energy = swell_energy_points(inputs.swell_height_ft, inputs.swell_period_s);
    let direction = direction_points(inputs.swell_direction_deg, spot);
    let tide = tide_points(inputs.tide_ft, spot);
    let wind = match (inputs.wind_speed_kt, inputs.wind_direction_deg) {
        (Some(speed), Some(dir)) => wind_points(classify_wind(dir, spot.shore_normal_deg), speed),
        _ => 0,
    };

    let mut total = swell_energy + direction + tide + wind;
    if inputs.swell_period_s < 5.0 {
        total = total.min(20);
    } else if inputs.swell_height_ft < 2.0 && inputs.swell_period_s < 6.0 {
        total = total.min(15);
    }
    let total = total.clamp(0, 100) as u8;

    QualityBreakdown {
        swell_energy,
        direction,
        tide,
        wind,
        total,
        label: QualityLabel::from_score(total),
    }
}
