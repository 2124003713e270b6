//! Core domain model for GJB: scraped records, category axes, classified records.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CRATE_NAME: &str = "gjb-core";

/// Sentinel written downstream when an axis produced no labels.
pub const NOT_MAPPED: &str = "not mapped";

/// Downstream stores cap the identity column at 255 characters.
pub const IDENTITY_KEY_MAX_CHARS: usize = 255;

pub const IDENTITY_KEY_SEPARATOR: &str = " - ";

#[derive(Debug, Error)]
#[error("unknown category label {0:?}")]
pub struct UnknownLabel(pub String);

/// Geographic region axis. Closed vocabulary: UK regions plus the two
/// policy-bearing labels "Fully Remote" and "Abroad".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Region {
    #[serde(rename = "London")]
    London,
    #[serde(rename = "South East")]
    SouthEast,
    #[serde(rename = "South West")]
    SouthWest,
    #[serde(rename = "East of England")]
    EastOfEngland,
    #[serde(rename = "East Midlands")]
    EastMidlands,
    #[serde(rename = "West Midlands")]
    WestMidlands,
    #[serde(rename = "North East")]
    NorthEast,
    #[serde(rename = "North West")]
    NorthWest,
    #[serde(rename = "Yorkshire")]
    Yorkshire,
    #[serde(rename = "Scotland")]
    Scotland,
    #[serde(rename = "Wales")]
    Wales,
    #[serde(rename = "Northern Ireland")]
    NorthernIreland,
    #[serde(rename = "Fully Remote")]
    FullyRemote,
    #[serde(rename = "Abroad")]
    Abroad,
}

impl Region {
    /// Every concrete UK region — excludes "Fully Remote" and "Abroad".
    pub const UK_WIDE: [Region; 12] = [
        Region::London,
        Region::SouthEast,
        Region::SouthWest,
        Region::EastOfEngland,
        Region::EastMidlands,
        Region::WestMidlands,
        Region::NorthEast,
        Region::NorthWest,
        Region::Yorkshire,
        Region::Scotland,
        Region::Wales,
        Region::NorthernIreland,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::London => "London",
            Region::SouthEast => "South East",
            Region::SouthWest => "South West",
            Region::EastOfEngland => "East of England",
            Region::EastMidlands => "East Midlands",
            Region::WestMidlands => "West Midlands",
            Region::NorthEast => "North East",
            Region::NorthWest => "North West",
            Region::Yorkshire => "Yorkshire",
            Region::Scotland => "Scotland",
            Region::Wales => "Wales",
            Region::NorthernIreland => "Northern Ireland",
            Region::FullyRemote => "Fully Remote",
            Region::Abroad => "Abroad",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "London" => Ok(Region::London),
            "South East" => Ok(Region::SouthEast),
            "South West" => Ok(Region::SouthWest),
            "East of England" => Ok(Region::EastOfEngland),
            "East Midlands" => Ok(Region::EastMidlands),
            "West Midlands" => Ok(Region::WestMidlands),
            "North East" => Ok(Region::NorthEast),
            "North West" => Ok(Region::NorthWest),
            "Yorkshire" => Ok(Region::Yorkshire),
            "Scotland" => Ok(Region::Scotland),
            "Wales" => Ok(Region::Wales),
            "Northern Ireland" => Ok(Region::NorthernIreland),
            "Fully Remote" => Ok(Region::FullyRemote),
            "Abroad" => Ok(Region::Abroad),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

/// Seniority axis. "mid level" is the default when no rule fires and the
/// landing spot for demoted entries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Seniority {
    #[serde(rename = "Entry Level")]
    EntryLevel,
    #[serde(rename = "mid level")]
    MidLevel,
    #[serde(rename = "Senior")]
    Senior,
}

impl Seniority {
    pub fn label(&self) -> &'static str {
        match self {
            Seniority::EntryLevel => "Entry Level",
            Seniority::MidLevel => "mid level",
            Seniority::Senior => "Senior",
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Seniority {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Entry Level" => Ok(Seniority::EntryLevel),
            "mid level" => Ok(Seniority::MidLevel),
            "Senior" => Ok(Seniority::Senior),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

/// One scraped listing as handed over by the scraper layer. Immutable; the
/// same live job may appear in several scrape runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawJobRecord {
    pub organisation: String,
    pub title: String,
    pub url: String,
    pub location: String,
}

/// A raw record plus its mapped category sets and identity key. Corrections
/// produce a new record, never an in-place edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedJobRecord {
    pub organisation: String,
    pub title: String,
    pub url: String,
    pub location: String,
    pub regions: BTreeSet<Region>,
    pub job_functions: BTreeSet<String>,
    pub seniority: BTreeSet<Seniority>,
    pub identity_key: String,
}

impl ClassifiedJobRecord {
    pub fn from_raw(
        raw: RawJobRecord,
        regions: BTreeSet<Region>,
        job_functions: BTreeSet<String>,
        seniority: BTreeSet<Seniority>,
    ) -> Self {
        let identity_key = identity_key(&raw.organisation, &raw.title, &raw.location);
        Self {
            organisation: raw.organisation,
            title: raw.title,
            url: raw.url,
            location: raw.location,
            regions,
            job_functions,
            seniority,
            identity_key,
        }
    }

    /// Joined region labels for downstream columns, sentinel when empty.
    pub fn region_labels(&self) -> String {
        join_or_sentinel(self.regions.iter().map(Region::label))
    }

    pub fn job_function_labels(&self) -> String {
        join_or_sentinel(self.job_functions.iter().map(String::as_str))
    }

    pub fn seniority_labels(&self) -> String {
        join_or_sentinel(self.seniority.iter().map(Seniority::label))
    }
}

fn join_or_sentinel<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    let joined = labels.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        NOT_MAPPED.to_string()
    } else {
        joined
    }
}

/// Deterministic composite identity recognising "the same job" across scrape
/// runs and stores. Truncated by character count, not bytes, so multi-byte
/// titles cannot split a code point.
pub fn identity_key(organisation: &str, title: &str, location: &str) -> String {
    let full = format!(
        "{organisation}{sep}{title}{sep}{location}",
        sep = IDENTITY_KEY_SEPARATOR
    );
    full.chars().take(IDENTITY_KEY_MAX_CHARS).collect()
}

/// Store-side identifiers carried through reconciliation untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreIds {
    #[serde(default)]
    pub database_id: Option<i64>,
    #[serde(default)]
    pub cms_item_id: Option<String>,
}

/// One row of the downstream stores' current view, keyed by identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveRecord {
    pub identity_key: String,
    pub is_live: bool,
    #[serde(default)]
    pub store_ids: StoreIds,
}

/// The persistence layer's exported view of currently tracked listings.
/// Read-only input to the diff engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveSnapshot {
    pub records: Vec<LiveRecord>,
}
