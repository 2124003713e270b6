//! Region, job-function and seniority policy layers over keyword matching,
//! plus the per-record categoriser that assembles classified records.

use std::collections::BTreeSet;

use gjb_core::{ClassifiedJobRecord, RawJobRecord, Region, Seniority};
use gjb_vocab::{contains_any, VocabularyBundle};
use serde::Serialize;
use tracing::debug;

pub const CRATE_NAME: &str = "gjb-classify";

/// Job-function labels whose listings are dropped from the board.
pub const DEFAULT_EXCLUDED_FUNCTIONS: [&str; 2] = ["🙋 Volunteering", "Weird other"];

/// One location string used by a nationwide employer; maps to every UK
/// region via substring containment rather than an exact alias.
const NATIONWIDE_HUB_LITERAL: &str = "Nearby Any Sustrans Office Hub Across The Uk";

/// Maps a raw location string to a region set.
///
/// Substring-matches the location against the initial region vocabulary,
/// then falls back to the exact-match alias vocabulary, the nationwide-hub
/// literal, and finally to substring-matching the job title. A "Fully
/// Remote" tag suppresses every other region it co-occurred with.
pub fn map_regions(bundle: &VocabularyBundle, location: &str, title: &str) -> BTreeSet<Region> {
    let mut regions = bundle.regions_initial.matching_labels(location);
    if regions.is_empty() {
        regions = bundle.regions_exact.exact_labels(location);
    }
    if regions.is_empty() && location.contains(NATIONWIDE_HUB_LITERAL) {
        regions = Region::UK_WIDE.into_iter().collect();
    }
    if regions.is_empty() {
        regions = bundle.regions_initial.matching_labels(title);
    }
    if regions.contains(&Region::FullyRemote) {
        regions.clear();
        regions.insert(Region::FullyRemote);
    }
    regions
}

/// Maps a job title to a seniority set. Never returns an empty set.
pub fn map_seniority(bundle: &VocabularyBundle, title: &str) -> BTreeSet<Seniority> {
    let mut levels = bundle.seniority_initial.matching_labels(title);
    if levels.is_empty() {
        return BTreeSet::from([Seniority::MidLevel]);
    }
    if levels.contains(&Seniority::EntryLevel) && contains_any(title, bundle.not_entry_level()) {
        levels.remove(&Seniority::EntryLevel);
        levels.insert(Seniority::MidLevel);
    }
    if levels.contains(&Seniority::Senior)
        && contains_any(title, bundle.not_management())
        && !contains_any(title, bundle.definitely_management())
    {
        levels.remove(&Seniority::Senior);
        levels.insert(Seniority::MidLevel);
    }
    // Entry and management signals surviving both refining passes contradict
    // each other; neither is trusted.
    if levels.contains(&Seniority::EntryLevel) && levels.contains(&Seniority::Senior) {
        levels.clear();
        levels.insert(Seniority::MidLevel);
    }
    levels
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReviewReason {
    UnmappedRegion,
    UnmappedJobFunction,
}

/// A record that classified without a match on some axis; kept in the output
/// with sentinel labels and queued for an operator to look at.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewItem {
    pub record: RawJobRecord,
    pub reason: ReviewReason,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExclusionCounts {
    pub abroad_only: usize,
    pub excluded_job_function: usize,
}

impl ExclusionCounts {
    pub fn total(&self) -> usize {
        self.abroad_only + self.excluded_job_function
    }
}

/// Output of categorising one scrape run. Every input record is accounted
/// for: it lands in `classified` or in one of the exclusion counts.
#[derive(Debug, Clone, Default)]
pub struct CategorisedBatch {
    pub classified: Vec<ClassifiedJobRecord>,
    pub review: Vec<ReviewItem>,
    pub exclusions: ExclusionCounts,
}

pub struct Categoriser<'a> {
    bundle: &'a VocabularyBundle,
    excluded_functions: Vec<String>,
}

impl<'a> Categoriser<'a> {
    pub fn new(bundle: &'a VocabularyBundle) -> Self {
        Self {
            bundle,
            excluded_functions: DEFAULT_EXCLUDED_FUNCTIONS
                .iter()
                .map(|label| label.to_string())
                .collect(),
        }
    }

    pub fn with_excluded_functions(mut self, labels: Vec<String>) -> Self {
        self.excluded_functions = labels;
        self
    }

    pub fn categorise_batch(&self, records: Vec<RawJobRecord>) -> CategorisedBatch {
        let mut out = CategorisedBatch::default();
        for raw in records {
            let regions = map_regions(self.bundle, &raw.location, &raw.title);

            // Abroad-only listings are not UK jobs; mixed sets are kept so
            // multi-country strings like "Dublin, London" survive.
            if regions.len() == 1 && regions.contains(&Region::Abroad) {
                debug!(title = %raw.title, location = %raw.location, "dropping abroad-only listing");
                out.exclusions.abroad_only += 1;
                continue;
            }

            let mut functions = self.bundle.job_functions.matching_labels(&raw.title);
            let matched_any_function = !functions.is_empty();
            functions.retain(|label| !self.excluded_functions.contains(label));
            if matched_any_function && functions.is_empty() {
                debug!(title = %raw.title, "dropping listing with only excluded job functions");
                out.exclusions.excluded_job_function += 1;
                continue;
            }

            let seniority = map_seniority(self.bundle, &raw.title);

            if regions.is_empty() {
                out.review.push(ReviewItem {
                    record: raw.clone(),
                    reason: ReviewReason::UnmappedRegion,
                });
            }
            if functions.is_empty() {
                out.review.push(ReviewItem {
                    record: raw.clone(),
                    reason: ReviewReason::UnmappedJobFunction,
                });
            }

            out.classified
                .push(ClassifiedJobRecord::from_raw(raw, regions, functions, seniority));
        }
        out
    }
}
