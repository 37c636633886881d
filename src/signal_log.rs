use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::spectrum::{peak_point, RadioConfig, SpectrumPoint};

/// One captured signal observation. Held in memory for the session; the
/// user deletes rows explicitly and may export the list as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalLog {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub frequency: f64,
    pub bandwidth: f64,
    pub peak_db: f64,
    pub notes: String,
}

impl SignalLog {
    /// Record the strongest sample of the current trace under the active
    /// tuning. Returns None for an empty trace.
    pub fn capture(config: &RadioConfig, trace: &[SpectrumPoint], notes: &str) -> Option<Self> {
        let peak = peak_point(trace)?;
        Some(SignalLog {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            frequency: config.center_freq,
            bandwidth: config.bandwidth,
            peak_db: peak.db,
            notes: notes.to_string(),
        })
    }
}

pub fn export_json(logs: &[SignalLog]) -> Result<String> {
    serde_json::to_string_pretty(logs).context("serializing signal logs")
}

pub fn export_to_file(logs: &[SignalLog], path: &Path) -> Result<()> {
    let data = export_json(logs)?;
    fs::write(path, data).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace() -> Vec<SpectrumPoint> {
        vec![
            SpectrumPoint { frequency: 98.0, db: -88.0 },
            SpectrumPoint { frequency: 98.5, db: -41.5 },
            SpectrumPoint { frequency: 99.0, db: -79.0 },
        ]
    }

    #[test]
    fn capture_records_peak_and_tuning() {
        let config = RadioConfig::default();
        let log = SignalLog::capture(&config, &trace(), "Manual capture from dashboard.").unwrap();
        assert_eq!(log.frequency, config.center_freq);
        assert_eq!(log.bandwidth, config.bandwidth);
        assert_eq!(log.peak_db, -41.5);
        assert!(!log.notes.is_empty());
    }

    #[test]
    fn capture_on_empty_trace_yields_nothing() {
        assert!(SignalLog::capture(&RadioConfig::default(), &[], "").is_none());
    }

    #[test]
    fn export_round_trips_through_json() {
        let config = RadioConfig::default();
        let logs = vec![
            SignalLog::capture(&config, &trace(), "first").unwrap(),
            SignalLog::capture(&config, &trace(), "second").unwrap(),
        ];
        let json = export_json(&logs).unwrap();
        let parsed: Vec<SignalLog> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, logs);
        assert_ne!(parsed[0].id, parsed[1].id);
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("captures.json");
        let logs = vec![SignalLog::capture(&RadioConfig::default(), &trace(), "x").unwrap()];
        export_to_file(&logs, &path).unwrap();
        let parsed: Vec<SignalLog> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, logs);
    }
}
