//! # State Snapshot
//!
//! JSON file the scheduler binary uses as its stand-in persistence collaborator.
//! It holds the already-ingested raw readings per spot, the alert subscriptions
//! (including `last_notified_score`) and the deduplication send log.
//!
//! The library's scoring and alerting functions never touch this file; only the
//! binary reads it before a cycle and writes it back afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::{fs, io};
use thiserror::Error;

use crate::alert::{AlertSendRecord, CycleReport, InMemorySendLog};
use crate::windows::AlertSubscription;
use crate::RawHourlyReading;

/// Errors from reading or writing a snapshot file.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot IO: {0}")]
    Io(#[from] io::Error),

    #[error("snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything one alert cycle reads and writes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Raw readings keyed by spot id
    #[serde(default)]
    pub readings: BTreeMap<String, Vec<RawHourlyReading>>,
    #[serde(default)]
    pub subscriptions: Vec<AlertSubscription>,
    #[serde(default)]
    pub sent: Vec<AlertSendRecord>,
}

impl Snapshot {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let data = fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Write atomically: serialize to a sibling temp file, then rename over `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let data = serde_json::to_vec_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn send_log(&self) -> InMemorySendLog {
        InMemorySendLog::from_records(self.sent.iter().cloned())
    }

    /// Fold a finished cycle back in: new scores and the full send log.
    pub fn absorb(&mut self, report: &CycleReport, send_log: &InMemorySendLog) {
        report.apply_to(&mut self.subscriptions);
        self.sent = send_log.records();
    }
}
