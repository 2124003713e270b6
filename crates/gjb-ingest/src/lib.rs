//! Batch input loading: scraped record batches and live store snapshots.
//!
//! The scraper layer hands over a JSON file per run, either a bare array of
//! records or a `{scraped_at, records}` envelope. The persistence layer
//! exports its current view as a live-snapshot JSON document.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use gjb_core::{LiveSnapshot, RawJobRecord};
use serde::{de::DeserializeOwned, Deserialize};

pub const CRATE_NAME: &str = "gjb-ingest";

/// One scrape run as written by the scraper layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapeBatch {
    pub scraped_at: Option<DateTime<Utc>>,
    pub records: Vec<RawJobRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BatchDocument {
    Envelope {
        scraped_at: Option<DateTime<Utc>>,
        records: Vec<RawJobRecord>,
    },
    Bare(Vec<RawJobRecord>),
}

fn read_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

/// Loads a scraped batch, accepting both document shapes.
pub fn load_scrape_batch(path: impl AsRef<Path>) -> Result<ScrapeBatch> {
    let document: BatchDocument = read_json_file(path)?;
    Ok(match document {
        BatchDocument::Envelope {
            scraped_at,
            records,
        } => ScrapeBatch {
            scraped_at,
            records,
        },
        BatchDocument::Bare(records) => ScrapeBatch {
            scraped_at: None,
            records,
        },
    })
}

/// Loads the persistence layer's live-snapshot export.
pub fn load_live_snapshot(path: impl AsRef<Path>) -> Result<LiveSnapshot> {
    read_json_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const BARE: &str = r#"[
        {"organisation": "Wild Trust", "title": "Ranger", "url": "https://example.org/1", "location": "Leeds"}
    ]"#;

    const ENVELOPE: &str = r#"{
        "scraped_at": "2026-08-01T06:00:00Z",
        "records": [
            {"organisation": "Wild Trust", "title": "Ranger", "url": "https://example.org/1", "location": "Leeds"},
            {"organisation": "Rivers Org", "title": "Ecologist", "url": "https://example.org/2", "location": "Remote"}
        ]
    }"#;

    #[test]
    fn loads_bare_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("batch.json");
        fs::write(&path, BARE).unwrap();
        let batch = load_scrape_batch(&path).unwrap();
        assert!(batch.scraped_at.is_none());
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].organisation, "Wild Trust");
    }

    #[test]
    fn loads_envelope() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("batch.json");
        fs::write(&path, ENVELOPE).unwrap();
        let batch = load_scrape_batch(&path).unwrap();
        assert!(batch.scraped_at.is_some());
        assert_eq!(batch.records.len(), 2);
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let err = load_scrape_batch("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }

    #[test]
    fn loads_live_snapshot_with_defaulted_store_ids() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(
            &path,
            r#"{"records": [{"identity_key": "Wild Trust - Ranger - Leeds", "is_live": true}]}"#,
        )
        .unwrap();
        let snapshot = load_live_snapshot(&path).unwrap();
        assert_eq!(snapshot.records.len(), 1);
        assert!(snapshot.records[0].store_ids.database_id.is_none());
    }
}
