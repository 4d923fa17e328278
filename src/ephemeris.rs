//! # Light & Tide Ephemeris
//!
//! Sunrise/sunset, civil twilight and tide interpolation, used for light-window
//! and tide-phase context on both the display and alert paths.
//!
//! ## Solar Events
//! Low-precision day-number/hour-angle method (Almanac for Computers, 1990),
//! parameterized by zenith:
//! - **90.833°**: sunrise/sunset (refraction and solar radius included)
//! - **96°**: civil twilight, i.e. first and last light
//!
//! Accuracy is about a minute at mid latitudes. Event times are computed for the
//! *local solar* day of `date`, so a California sunset lands on the next UTC day.
//!
//! ### Polar Day/Night
//! When the hour-angle cosine leaves `[-1, 1]` the event does not happen that day.
//! Instead of failing, morning events return local midnight and evening events the
//! last second of the local day.
//!
//! ## Tide Interpolation
//! Linear interpolation between the two known tide points bracketing an instant.
//! With only one side available that value is returned as-is.
//!
//! ## Caching
//! [`Ephemeris`] memoizes both computations per (date or instant, rounded lat,
//! rounded lng) in fixed-capacity maps that evict the oldest insert first. Tide
//! keys also carry a fingerprint of the known points, so revised predictions for
//! a station never hit entries computed from the old ones.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};

use crate::TidePhase;

/// Zenith for sunrise and sunset.
pub const ZENITH_OFFICIAL: f64 = 90.833;
/// Zenith for civil twilight (first/last light).
pub const ZENITH_CIVIL: f64 = 96.0;
/// Default number of entries kept per cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Height changes smaller than this between bracketing points count as slack water.
const SLACK_EPSILON_FT: f64 = 0.05;

/// Which half of the day an event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolarEvent {
    /// Sunrise or first light
    Morning,
    /// Sunset or last light
    Evening,
}

/// Whether the sun crosses a zenith on a given day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SunState {
    Normal,
    /// Never drops below the zenith (polar day)
    AlwaysUp,
    /// Never rises above the zenith (polar night)
    AlwaysDown,
}

enum HourAngle {
    Hours(f64),
    Never(SunState),
}

/// Ambient light at an instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightPhase {
    Dark,
    Twilight,
    Daylight,
}

/// Known tide height at an instant, e.g. a predicted high or low.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TidePoint {
    pub time: DateTime<Utc>,
    pub height_ft: f64,
}

/// Light events for one local day at one location.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DaylightTimes {
    pub first_light: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub last_light: DateTime<Utc>,
    /// State of the sunrise/sunset zenith
    pub sun: SunState,
    /// State of the civil twilight zenith
    pub twilight: SunState,
}

impl DaylightTimes {
    /// Classify `at` against this day's events.
    pub fn light_phase(&self, at: DateTime<Utc>) -> LightPhase {
        if within(self.sun, self.sunrise, self.sunset, at) {
            LightPhase::Daylight
        } else if within(self.twilight, self.first_light, self.last_light, at) {
            LightPhase::Twilight
        } else {
            LightPhase::Dark
        }
    }
}

fn within(state: SunState, start: DateTime<Utc>, end: DateTime<Utc>, at: DateTime<Utc>) -> bool {
    match state {
        SunState::AlwaysUp => true,
        SunState::AlwaysDown => false,
        SunState::Normal => start <= at && at < end,
    }
}

fn normalize(value: f64, range: f64) -> f64 {
    value.rem_euclid(range)
}

fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

/// Midnight at the start of the local solar day `date` at `longitude`, in UTC.
pub fn local_midnight(date: NaiveDate, longitude: f64) -> DateTime<Utc> {
    utc_midnight(date) - hours_to_duration(longitude / 15.0)
}

fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn hours_to_duration(hours: f64) -> Duration {
    Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}

/// Event time in UTC hours relative to UTC midnight of `date`.
fn event_hours(date: NaiveDate, latitude: f64, longitude: f64, zenith: f64, event: SolarEvent) -> HourAngle {
    let lng_hour = longitude / 15.0;
    let approx_local = match event {
        SolarEvent::Morning => 6.0,
        SolarEvent::Evening => 18.0,
    };
    let t = f64::from(date.ordinal()) + (approx_local - lng_hour) / 24.0;

    // Sun's mean anomaly and true longitude
    let m = 0.9856 * t - 3.289;
    let l = normalize(m + 1.916 * sin_deg(m) + 0.020 * sin_deg(2.0 * m) + 282.634, 360.0);

    // Right ascension, moved into the same quadrant as L
    let ra = normalize((0.91764 * l.to_radians().tan()).atan().to_degrees(), 360.0);
    let l_quadrant = (l / 90.0).floor() * 90.0;
    let ra_quadrant = (ra / 90.0).floor() * 90.0;
    let ra = (ra + l_quadrant - ra_quadrant) / 15.0;

    let sin_dec = 0.39782 * sin_deg(l);
    let cos_dec = sin_dec.asin().cos();

    let cos_h = (cos_deg(zenith) - sin_dec * sin_deg(latitude)) / (cos_dec * cos_deg(latitude));
    if cos_h > 1.0 {
        return HourAngle::Never(SunState::AlwaysDown);
    }
    if !(cos_h >= -1.0) {
        // also catches NaN from degenerate latitudes
        return HourAngle::Never(SunState::AlwaysUp);
    }

    let h = match event {
        SolarEvent::Morning => 360.0 - cos_h.acos().to_degrees(),
        SolarEvent::Evening => cos_h.acos().to_degrees(),
    } / 15.0;

    let local_mean = normalize(h + ra - 0.06571 * t - 6.622, 24.0);
    HourAngle::Hours(local_mean - lng_hour)
}

fn resolve_event(
    date: NaiveDate,
    latitude: f64,
    longitude: f64,
    zenith: f64,
    event: SolarEvent,
) -> (DateTime<Utc>, SunState) {
    let midnight = local_midnight(date, longitude);
    match event_hours(date, latitude, longitude, zenith, event) {
        HourAngle::Hours(ut) => (utc_midnight(date) + hours_to_duration(ut), SunState::Normal),
        HourAngle::Never(state) => {
            let sentinel = match event {
                SolarEvent::Morning => midnight,
                SolarEvent::Evening => midnight + Duration::days(1) - Duration::seconds(1),
            };
            (sentinel, state)
        }
    }
}

/// Time the sun crosses `zenith` on the local day `date`, or the polar sentinel.
pub fn solar_event(
    date: NaiveDate,
    latitude: f64,
    longitude: f64,
    zenith: f64,
    event: SolarEvent,
) -> DateTime<Utc> {
    resolve_event(date, latitude, longitude, zenith, event).0
}

pub fn sunrise(date: NaiveDate, latitude: f64, longitude: f64) -> DateTime<Utc> {
    solar_event(date, latitude, longitude, ZENITH_OFFICIAL, SolarEvent::Morning)
}

pub fn sunset(date: NaiveDate, latitude: f64, longitude: f64) -> DateTime<Utc> {
    solar_event(date, latitude, longitude, ZENITH_OFFICIAL, SolarEvent::Evening)
}

pub fn first_light(date: NaiveDate, latitude: f64, longitude: f64) -> DateTime<Utc> {
    solar_event(date, latitude, longitude, ZENITH_CIVIL, SolarEvent::Morning)
}

pub fn last_light(date: NaiveDate, latitude: f64, longitude: f64) -> DateTime<Utc> {
    solar_event(date, latitude, longitude, ZENITH_CIVIL, SolarEvent::Evening)
}

/// All four light events for the local day `date`.
pub fn daylight_times(date: NaiveDate, latitude: f64, longitude: f64) -> DaylightTimes {
    let (first_light, dawn_state) =
        resolve_event(date, latitude, longitude, ZENITH_CIVIL, SolarEvent::Morning);
    let (last_light, dusk_state) =
        resolve_event(date, latitude, longitude, ZENITH_CIVIL, SolarEvent::Evening);
    let (sunrise, rise_state) =
        resolve_event(date, latitude, longitude, ZENITH_OFFICIAL, SolarEvent::Morning);
    let (sunset, set_state) =
        resolve_event(date, latitude, longitude, ZENITH_OFFICIAL, SolarEvent::Evening);

    let combine = |a: SunState, b: SunState| if a == SunState::Normal { b } else { a };

    DaylightTimes {
        first_light,
        sunrise,
        sunset,
        last_light,
        sun: combine(rise_state, set_state),
        twilight: combine(dawn_state, dusk_state),
    }
}

/// Local solar date of an instant at `longitude`.
pub fn local_date(at: DateTime<Utc>, longitude: f64) -> NaiveDate {
    (at + hours_to_duration(longitude / 15.0)).date_naive()
}

/// The known points immediately at-or-before and at-or-after `at`.
///
/// `points` must be sorted by time.
fn bracket(points: &[TidePoint], at: DateTime<Utc>) -> (Option<&TidePoint>, Option<&TidePoint>) {
    let after_idx = points.partition_point(|p| p.time < at);
    let before = if after_idx < points.len() && points[after_idx].time == at {
        points.get(after_idx)
    } else {
        after_idx.checked_sub(1).and_then(|i| points.get(i))
    };
    (before, points.get(after_idx))
}

/// Interpolated tide height at `at`, `None` without any known points.
///
/// # Example
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use swell_watch_lib::ephemeris::{tide_height_at, TidePoint};
///
/// let low = Utc.with_ymd_and_hms(2025, 5, 1, 3, 0, 0).unwrap();
/// let points = [
///     TidePoint { time: low, height_ft: 0.5 },
///     TidePoint { time: low + Duration::hours(6), height_ft: 4.5 },
/// ];
/// assert_eq!(tide_height_at(&points, low + Duration::hours(3)), Some(2.5));
/// ```
pub fn tide_height_at(points: &[TidePoint], at: DateTime<Utc>) -> Option<f64> {
    match bracket(points, at) {
        (Some(p0), Some(p1)) if p1.time > p0.time => {
            let span = (p1.time - p0.time).num_milliseconds() as f64;
            let elapsed = (at - p0.time).num_milliseconds() as f64;
            let fraction = elapsed / span;
            Some(p0.height_ft + (p1.height_ft - p0.height_ft) * fraction)
        }
        (Some(p), _) | (None, Some(p)) => Some(p.height_ft),
        (None, None) => None,
    }
}

/// Direction of tide movement at `at`, from the bracketing points.
pub fn tide_phase_at(points: &[TidePoint], at: DateTime<Utc>) -> Option<TidePhase> {
    let after_idx = points.partition_point(|p| p.time <= at);
    let p0 = after_idx.checked_sub(1).and_then(|i| points.get(i))?;
    let p1 = points.get(after_idx)?;
    let delta = p1.height_ft - p0.height_ft;
    Some(if delta > SLACK_EPSILON_FT {
        TidePhase::Rising
    } else if delta < -SLACK_EPSILON_FT {
        TidePhase::Falling
    } else {
        TidePhase::Slack
    })
}

/// Fixed-capacity map evicting the oldest inserted key once full.
#[derive(Clone, Debug)]
pub struct BoundedCache<K, V> {
    capacity: usize,
    entries: HashMap<K, V>,
    order: VecDeque<K>,
}

impl<K: Eq + Hash + Clone, V: Clone> BoundedCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Insert or overwrite. Overwriting keeps the key's original age.
    pub fn insert(&mut self, key: K, value: V) {
        if self.entries.insert(key.clone(), value).is_some() {
            return;
        }
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    /// Cached value for `key`, computing and inserting it on a miss.
    pub fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some(hit) = self.entries.get(&key) {
            return hit.clone();
        }
        let value = compute();
        self.insert(key, value.clone());
        value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

type CoordKey = (i64, i64);

fn points_fingerprint(points: &[TidePoint]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for point in points {
        point.time.timestamp_millis().hash(&mut hasher);
        point.height_ft.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

/// Memoizing front end for light and tide lookups.
#[derive(Clone, Debug)]
pub struct Ephemeris {
    scale: f64,
    daylight: BoundedCache<(NaiveDate, CoordKey), DaylightTimes>,
    tides: BoundedCache<(i64, CoordKey, u64), Option<f64>>,
}

impl Default for Ephemeris {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY, 2)
    }
}

impl Ephemeris {
    /// `precision` is the number of decimal places of lat/lng kept in cache keys.
    pub fn new(cache_capacity: usize, precision: u32) -> Self {
        Self {
            scale: 10f64.powi(precision.min(9) as i32),
            daylight: BoundedCache::new(cache_capacity),
            tides: BoundedCache::new(cache_capacity),
        }
    }

    fn coord_key(&self, latitude: f64, longitude: f64) -> CoordKey {
        (
            (latitude * self.scale).round() as i64,
            (longitude * self.scale).round() as i64,
        )
    }

    /// Cached [`daylight_times`].
    pub fn daylight(&mut self, date: NaiveDate, latitude: f64, longitude: f64) -> DaylightTimes {
        let key = (date, self.coord_key(latitude, longitude));
        self.daylight
            .get_or_insert_with(key, || daylight_times(date, latitude, longitude))
    }

    /// Light phase at `at` for a location, using the local solar day.
    pub fn light_phase_at(&mut self, latitude: f64, longitude: f64, at: DateTime<Utc>) -> LightPhase {
        self.daylight(local_date(at, longitude), latitude, longitude)
            .light_phase(at)
    }

    /// Cached [`tide_height_at`] for the tide station at `latitude`/`longitude`.
    pub fn tide_height_at(
        &mut self,
        latitude: f64,
        longitude: f64,
        points: &[TidePoint],
        at: DateTime<Utc>,
    ) -> Option<f64> {
        let key = (
            at.timestamp_millis(),
            self.coord_key(latitude, longitude),
            points_fingerprint(points),
        );
        self.tides.get_or_insert_with(key, || tide_height_at(points, at))
    }

    pub fn cached_entries(&self) -> usize {
        self.daylight.len() + self.tides.len()
    }
}
