//! # Spot Profile Registry
//!
//! Static per-spot tuning constants used by the wave height and quality formulas.
//! Profiles are pure data. The registry ships a handful of built-in west-facing
//! Southern California breaks and accepts overrides from configuration.
//!
//! ## Profile Fields
//! - **Ideal direction / tolerance**: centre and half-width of the swell window the
//!   spot is exposed to, in degrees
//! - **Tide range**: tide heights (ft) at which the spot works best
//! - **Minimum period**: below this period a swell component is not considered the
//!   dominant one for the spot
//! - **Amplification**: dimensionless bathymetry proxy; reefs and canyons focus
//!   energy (> 1), sheltered beaches lose it (< 1)
//! - **Shore normal**: bearing the beach faces out to sea. Wind blowing from the
//!   opposite bearing is straight offshore

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Errors raised when a profile fails validation.
#[derive(Error, Debug, PartialEq)]
pub enum SpotError {
    /// Latitude/longitude outside the valid ranges or not finite
    #[error("spot {0}: coordinates out of range")]
    Coordinates(String),

    /// Tolerance must be strictly positive
    #[error("spot {0}: direction tolerance must be > 0")]
    Tolerance(String),

    /// `tide_min_ft` above `tide_max_ft`
    #[error("spot {0}: tide range is inverted")]
    TideRange(String),

    /// Amplification must be strictly positive
    #[error("spot {0}: amplification factor must be > 0")]
    Amplification(String),

    /// Shore normal must be a finite bearing
    #[error("spot {0}: shore normal must be a finite bearing")]
    ShoreNormal(String),
}

/// Immutable reference data for one surf spot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpotProfile {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Swell direction the spot likes best, degrees true
    pub ideal_direction_deg: f64,
    /// Deviation from the ideal direction still considered a perfect fit
    pub direction_tolerance_deg: f64,
    pub tide_min_ft: f64,
    pub tide_max_ft: f64,
    /// Minimum swell period the spot needs to break properly
    pub min_period_s: f64,
    /// Bathymetry proxy applied to open-water swell height
    pub amplification: f64,
    /// Seaward bearing of the beach, degrees true
    pub shore_normal_deg: f64,
}

impl SpotProfile {
    /// Check the profile invariants.
    pub fn validate(&self) -> Result<(), SpotError> {
        let coords_ok = self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude);
        if !coords_ok {
            return Err(SpotError::Coordinates(self.id.clone()));
        }
        if !(self.direction_tolerance_deg > 0.0) {
            return Err(SpotError::Tolerance(self.id.clone()));
        }
        if !(self.tide_min_ft <= self.tide_max_ft) {
            return Err(SpotError::TideRange(self.id.clone()));
        }
        if !(self.amplification > 0.0) {
            return Err(SpotError::Amplification(self.id.clone()));
        }
        if !self.shore_normal_deg.is_finite() {
            return Err(SpotError::ShoreNormal(self.id.clone()));
        }
        Ok(())
    }

    /// True if `tide_ft` lies inside the spot's optimal tide range.
    pub fn tide_in_range(&self, tide_ft: f64) -> bool {
        (self.tide_min_ft..=self.tide_max_ft).contains(&tide_ft)
    }
}

/// Lookup table of spot profiles keyed by spot id.
///
/// Iteration order is the id order, which keeps "best spot" scans deterministic.
#[derive(Clone, Debug, Default)]
pub struct SpotRegistry {
    profiles: BTreeMap<String, SpotProfile>,
}

impl SpotRegistry {
    /// Registry containing only the built-in profiles.
    pub fn with_builtin() -> Self {
        let profiles = builtin_profiles()
            .into_iter()
            .map(|profile| (profile.id.clone(), profile))
            .collect();
        Self { profiles }
    }

    /// Add or replace profiles by id. Every profile is validated first; nothing
    /// is merged if any of them is invalid.
    pub fn merge(&mut self, profiles: impl IntoIterator<Item = SpotProfile>) -> Result<(), SpotError> {
        let profiles: Vec<SpotProfile> = profiles.into_iter().collect();
        for profile in &profiles {
            profile.validate()?;
        }
        for profile in profiles {
            debug!(spot_id = %profile.id, "registering spot profile");
            self.profiles.insert(profile.id.clone(), profile);
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&SpotProfile> {
        self.profiles.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpotProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Built-in profiles for west-facing exposures.
///
/// `amplification` values were tuned against observed buoy-to-beach ratios.
pub fn builtin_profiles() -> Vec<SpotProfile> {
    vec![
        SpotProfile {
            id: "blacks".to_string(),
            name: "Black's Beach".to_string(),
            latitude: 32.889,
            longitude: -117.253,
            ideal_direction_deg: 270.0,
            direction_tolerance_deg: 30.0,
            tide_min_ft: 1.0,
            tide_max_ft: 4.0,
            min_period_s: 10.0,
            amplification: 1.4, // Scripps canyon focuses west swells
            shore_normal_deg: 270.0,
        },
        SpotProfile {
            id: "oceanside-pier".to_string(),
            name: "Oceanside Pier".to_string(),
            latitude: 33.193,
            longitude: -117.387,
            ideal_direction_deg: 260.0,
            direction_tolerance_deg: 25.0,
            tide_min_ft: 1.5,
            tide_max_ft: 4.0,
            min_period_s: 8.0,
            amplification: 1.1,
            shore_normal_deg: 250.0,
        },
        SpotProfile {
            id: "swamis".to_string(),
            name: "Swami's".to_string(),
            latitude: 33.035,
            longitude: -117.295,
            ideal_direction_deg: 285.0,
            direction_tolerance_deg: 20.0,
            tide_min_ft: 0.5,
            tide_max_ft: 3.0,
            min_period_s: 11.0,
            amplification: 1.0,
            shore_normal_deg: 255.0,
        },
        SpotProfile {
            id: "tourmaline".to_string(),
            name: "Tourmaline".to_string(),
            latitude: 32.805,
            longitude: -117.262,
            ideal_direction_deg: 260.0,
            direction_tolerance_deg: 35.0,
            tide_min_ft: 1.0,
            tide_max_ft: 5.0,
            min_period_s: 7.0,
            amplification: 0.8,
            shore_normal_deg: 245.0,
        },
    ]
}
