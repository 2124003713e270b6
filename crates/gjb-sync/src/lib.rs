//! Batch pipeline orchestration: categorise a scrape run and reconcile it
//! against the downstream stores' live snapshot.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow_array::{BooleanArray, RecordBatch, StringArray};
use arrow_schema::{DataType, Field as ArrowField, Schema};
use chrono::{DateTime, Utc};
use gjb_classify::{CategorisedBatch, Categoriser, ExclusionCounts, DEFAULT_EXCLUDED_FUNCTIONS};
use gjb_core::{ClassifiedJobRecord, LiveRecord, LiveSnapshot, StoreIds};
use gjb_vocab::VocabularyBundle;
use parquet::arrow::ArrowWriter;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{info, warn};
use uuid::Uuid;

pub const CRATE_NAME: &str = "gjb-sync";

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub vocab_dir: PathBuf,
    pub input_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub reports_dir: PathBuf,
    pub excluded_functions: Vec<String>,
    pub scheduler_enabled: bool,
    pub sync_cron: String,
}

impl SyncConfig {
    pub fn from_env() -> Self {
        Self {
            vocab_dir: std::env::var("GJB_VOCAB_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./vocab")),
            input_path: std::env::var("GJB_INPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./fixtures/sample_batch.json")),
            snapshot_path: std::env::var("GJB_SNAPSHOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./fixtures/live_snapshot.json")),
            reports_dir: std::env::var("GJB_REPORTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./reports")),
            excluded_functions: std::env::var("GJB_EXCLUDED_FUNCTIONS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(ToString::to_string)
                        .collect()
                })
                .unwrap_or_else(|_| {
                    DEFAULT_EXCLUDED_FUNCTIONS
                        .iter()
                        .map(ToString::to_string)
                        .collect()
                }),
            scheduler_enabled: std::env::var("GJB_SCHEDULER_ENABLED")
                .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "True"))
                .unwrap_or(false),
            sync_cron: std::env::var("GJB_SYNC_CRON").unwrap_or_else(|_| "0 6 * * *".to_string()),
        }
    }
}

/// A live listing that disappeared from the batch. The primary store keeps
/// the row flagged with `removed_at`; CMS mirrors drop it outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalNotice {
    pub identity_key: String,
    pub store_ids: StoreIds,
    pub removed_at: DateTime<Utc>,
    pub cms_hard_delete: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchDelta {
    pub inserts: Vec<ClassifiedJobRecord>,
    pub removals: Vec<RemovalNotice>,
    pub unchanged: usize,
    pub duplicate_keys: usize,
}

impl BatchDelta {
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.removals.is_empty()
    }
}

/// Keeps one representative per identity key, first-seen wins. The scraper
/// layer legitimately emits cross-posted jobs twice in one run.
pub fn dedup_by_identity_key(
    batch: Vec<ClassifiedJobRecord>,
) -> (Vec<ClassifiedJobRecord>, usize) {
    let mut seen = BTreeSet::new();
    let mut collisions = 0usize;
    let mut deduped = Vec::with_capacity(batch.len());
    for record in batch {
        if seen.insert(record.identity_key.clone()) {
            deduped.push(record);
        } else {
            collisions += 1;
            warn!(
                identity_key = %record.identity_key,
                "duplicate identity key in batch; keeping first occurrence"
            );
        }
    }
    (deduped, collisions)
}

/// Partitions the classified batch against the live snapshot into inserts,
/// soft removals and an unchanged count.
pub fn diff_against_live(
    batch: Vec<ClassifiedJobRecord>,
    snapshot: &LiveSnapshot,
    observed_at: DateTime<Utc>,
) -> BatchDelta {
    let (batch, duplicate_keys) = dedup_by_identity_key(batch);

    let live: BTreeMap<&str, &LiveRecord> = snapshot
        .records
        .iter()
        .filter(|record| record.is_live)
        .map(|record| (record.identity_key.as_str(), record))
        .collect();
    let batch_keys: BTreeSet<&str> = batch
        .iter()
        .map(|record| record.identity_key.as_str())
        .collect();

    let removals = live
        .values()
        .filter(|record| !batch_keys.contains(record.identity_key.as_str()))
        .map(|record| RemovalNotice {
            identity_key: record.identity_key.clone(),
            store_ids: record.store_ids.clone(),
            removed_at: observed_at,
            cms_hard_delete: record.store_ids.cms_item_id.is_some(),
        })
        .collect::<Vec<_>>();

    let mut inserts = Vec::new();
    let mut unchanged = 0usize;
    for record in batch {
        if live.contains_key(record.identity_key.as_str()) {
            unchanged += 1;
        } else {
            inserts.push(record);
        }
    }

    BatchDelta {
        inserts,
        removals,
        unchanged,
        duplicate_keys,
    }
}

/// Projects the delta onto a snapshot the way the persistence layer would:
/// removals flip `is_live`, inserts append live rows without store ids yet.
pub fn apply_delta(snapshot: &LiveSnapshot, delta: &BatchDelta) -> LiveSnapshot {
    let removed: BTreeSet<&str> = delta
        .removals
        .iter()
        .map(|notice| notice.identity_key.as_str())
        .collect();

    let mut records = snapshot
        .records
        .iter()
        .cloned()
        .map(|mut record| {
            if record.is_live && removed.contains(record.identity_key.as_str()) {
                record.is_live = false;
            }
            record
        })
        .collect::<Vec<_>>();

    for insert in &delta.inserts {
        records.push(LiveRecord {
            identity_key: insert.identity_key.clone(),
            is_live: true,
            store_ids: StoreIds::default(),
        });
    }

    LiveSnapshot { records }
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncRunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub scraped_records: usize,
    pub classified: usize,
    pub review_items: usize,
    pub exclusions: ExclusionCounts,
    pub inserts: usize,
    pub removals: usize,
    pub unchanged: usize,
    pub duplicate_keys: usize,
    pub reports_dir: String,
    pub parquet_manifest: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParquetManifest {
    pub schema_version: u32,
    pub files: Vec<ParquetManifestFile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParquetManifestFile {
    pub name: String,
    pub path: String,
    pub sha256: String,
    pub bytes: u64,
}

pub struct SyncPipeline {
    config: SyncConfig,
    bundle: VocabularyBundle,
}

impl SyncPipeline {
    /// Loads the vocabulary bundle once; configuration errors abort here
    /// rather than classifying with a partial vocabulary.
    pub fn new(config: SyncConfig) -> Result<Self> {
        let bundle = VocabularyBundle::load(&config.vocab_dir)
            .with_context(|| format!("loading vocabulary from {}", config.vocab_dir.display()))?;
        Ok(Self { config, bundle })
    }

    pub async fn run_once(&self) -> Result<SyncRunSummary> {
        let started_at = Utc::now();
        let run_id = Uuid::new_v4();

        let batch = gjb_ingest::load_scrape_batch(&self.config.input_path)?;
        let scraped_records = batch.records.len();

        let categorised = Categoriser::new(&self.bundle)
            .with_excluded_functions(self.config.excluded_functions.clone())
            .categorise_batch(batch.records);

        let snapshot = if self.config.snapshot_path.exists() {
            gjb_ingest::load_live_snapshot(&self.config.snapshot_path)?
        } else {
            warn!(
                path = %self.config.snapshot_path.display(),
                "live snapshot missing; treating every classified record as new"
            );
            LiveSnapshot::default()
        };

        let delta = diff_against_live(categorised.classified.clone(), &snapshot, started_at);

        let finished_at = Utc::now();
        let reports_dir = self
            .write_reports(run_id, started_at, finished_at, &categorised, &delta)
            .await?;
        let manifest_path = self
            .export_parquet_snapshots(&reports_dir, &categorised.classified, &delta)
            .await?;

        let summary = SyncRunSummary {
            run_id,
            started_at,
            finished_at,
            scraped_records,
            classified: categorised.classified.len(),
            review_items: categorised.review.len(),
            exclusions: categorised.exclusions,
            inserts: delta.inserts.len(),
            removals: delta.removals.len(),
            unchanged: delta.unchanged,
            duplicate_keys: delta.duplicate_keys,
            reports_dir: reports_dir.display().to_string(),
            parquet_manifest: manifest_path.display().to_string(),
        };
        info!(run_id = %summary.run_id, classified = summary.classified, "sync run complete");
        Ok(summary)
    }

    pub async fn maybe_build_scheduler(&self) -> Result<Option<JobScheduler>> {
        if !self.config.scheduler_enabled {
            return Ok(None);
        }

        let sched = JobScheduler::new().await.context("creating scheduler")?;
        let job = Job::new_async(self.config.sync_cron.as_str(), |_uuid, _l| {
            Box::pin(async move {
                match run_sync_once_from_env().await {
                    Ok(summary) => info!(run_id = %summary.run_id, "scheduled sync run complete"),
                    Err(err) => warn!(error = %format!("{err:#}"), "scheduled sync run failed"),
                }
            })
        })
        .with_context(|| format!("creating scheduler job for cron {}", self.config.sync_cron))?;
        sched.add(job).await.context("adding scheduler job")?;
        Ok(Some(sched))
    }

    async fn write_reports(
        &self,
        run_id: Uuid,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        categorised: &CategorisedBatch,
        delta: &BatchDelta,
    ) -> Result<PathBuf> {
        let classified = &categorised.classified;
        let review = &categorised.review;
        let exclusions = categorised.exclusions;
        let reports_dir = self.config.reports_dir.join(run_id.to_string());
        fs::create_dir_all(&reports_dir)
            .await
            .with_context(|| format!("creating {}", reports_dir.display()))?;

        let mut region_counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in classified {
            *region_counts.entry(record.region_labels()).or_default() += 1;
        }

        let brief = format!(
            "# GJB Run Brief\n\n- Run ID: `{run_id}`\n- Started: {started_at}\n- Finished: {finished_at}\n- Classified: {}\n- For review: {}\n- Excluded (abroad-only): {}\n- Excluded (job function): {}\n- Inserts: {} / Removals: {} / Unchanged: {}\n- Duplicate identity keys: {}\n\n## Region Counts\n{}\n",
            classified.len(),
            review.len(),
            exclusions.abroad_only,
            exclusions.excluded_job_function,
            delta.inserts.len(),
            delta.removals.len(),
            delta.unchanged,
            delta.duplicate_keys,
            region_counts
                .iter()
                .map(|(labels, count)| format!("- {labels}: {count}"))
                .collect::<Vec<_>>()
                .join("\n")
        );
        fs::write(reports_dir.join("run_brief.md"), brief)
            .await
            .context("writing run_brief.md")?;

        let delta_json = serde_json::to_vec_pretty(&serde_json::json!({
            "run_id": run_id,
            "started_at": started_at,
            "finished_at": finished_at,
            "exclusions": exclusions,
            "classified": classified,
            "delta": delta,
        }))
        .context("serializing classified delta")?;
        fs::write(reports_dir.join("classified_delta.json"), delta_json)
            .await
            .context("writing classified_delta.json")?;

        let review_json =
            serde_json::to_vec_pretty(review).context("serializing review queue")?;
        fs::write(reports_dir.join("review_queue.json"), review_json)
            .await
            .context("writing review_queue.json")?;

        Ok(reports_dir)
    }

    async fn export_parquet_snapshots(
        &self,
        reports_dir: &PathBuf,
        classified: &[ClassifiedJobRecord],
        delta: &BatchDelta,
    ) -> Result<PathBuf> {
        let snapshot_dir = reports_dir.join("snapshots");
        fs::create_dir_all(&snapshot_dir)
            .await
            .with_context(|| format!("creating {}", snapshot_dir.display()))?;

        let classified_path = snapshot_dir.join("classified.parquet");
        let delta_path = snapshot_dir.join("delta.parquet");

        write_classified_parquet(&classified_path, classified)?;
        write_delta_parquet(&delta_path, delta)?;

        let manifest = ParquetManifest {
            schema_version: 1,
            files: vec![
                manifest_entry("classified", reports_dir, &classified_path)?,
                manifest_entry("delta", reports_dir, &delta_path)?,
            ],
        };

        let manifest_path = snapshot_dir.join("manifest.json");
        let bytes = serde_json::to_vec_pretty(&manifest).context("serializing parquet manifest")?;
        fs::write(&manifest_path, bytes)
            .await
            .with_context(|| format!("writing {}", manifest_path.display()))?;

        Ok(manifest_path)
    }
}

pub async fn run_sync_once_from_env() -> Result<SyncRunSummary> {
    let pipeline = SyncPipeline::new(SyncConfig::from_env())?;
    pipeline.run_once().await
}

/// Renders the latest `runs` report directories as operator-facing markdown.
pub fn report_recent_runs(runs: usize, reports_root: &PathBuf) -> Result<String> {
    let mut dirs = std::fs::read_dir(reports_root)
        .with_context(|| format!("reading {}", reports_root.display()))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false))
        .collect::<Vec<_>>();
    dirs.sort_by_key(|entry| entry.metadata().and_then(|m| m.modified()).ok());
    dirs.reverse();
    let dirs = dirs.into_iter().take(runs.max(1)).collect::<Vec<_>>();

    let mut lines = vec!["# GJB Recent Runs".to_string(), String::new()];
    for dir in dirs {
        let run_id = dir.file_name().to_string_lossy().to_string();
        let delta_path = dir.path().join("classified_delta.json");
        let value: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(&delta_path)
                .with_context(|| format!("reading {}", delta_path.display()))?,
        )
        .with_context(|| format!("parsing {}", delta_path.display()))?;

        let classified = value
            .get("classified")
            .and_then(|v| v.as_array())
            .map(|a| a.len())
            .unwrap_or(0);
        let inserts = value
            .pointer("/delta/inserts")
            .and_then(|v| v.as_array())
            .map(|a| a.len())
            .unwrap_or(0);
        let removals = value
            .pointer("/delta/removals")
            .and_then(|v| v.as_array())
            .map(|a| a.len())
            .unwrap_or(0);

        lines.push(format!("## Run `{run_id}`"));
        lines.push(format!("- classified: {classified}"));
        lines.push(format!("- inserts: {inserts} / removals: {removals}"));
        lines.push(format!("- delta: `{}`", delta_path.display()));
        let brief_path = dir.path().join("run_brief.md");
        if brief_path.exists() {
            lines.push(format!("- brief: `{}`", brief_path.display()));
        }
        lines.push(String::new());
    }

    Ok(lines.join("\n"))
}

fn write_parquet(path: &PathBuf, batch: RecordBatch) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)
        .with_context(|| format!("opening parquet writer {}", path.display()))?;
    writer
        .write(&batch)
        .with_context(|| format!("writing record batch {}", path.display()))?;
    writer
        .close()
        .with_context(|| format!("closing parquet writer {}", path.display()))?;
    Ok(())
}

fn write_classified_parquet(path: &PathBuf, classified: &[ClassifiedJobRecord]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        ArrowField::new("organisation", DataType::Utf8, false),
        ArrowField::new("title", DataType::Utf8, false),
        ArrowField::new("url", DataType::Utf8, false),
        ArrowField::new("location", DataType::Utf8, false),
        ArrowField::new("identity_key", DataType::Utf8, false),
        ArrowField::new("regions", DataType::Utf8, false),
        ArrowField::new("job_functions", DataType::Utf8, false),
        ArrowField::new("seniority", DataType::Utf8, false),
    ]));

    let organisations = StringArray::from(
        classified
            .iter()
            .map(|r| Some(r.organisation.as_str()))
            .collect::<Vec<_>>(),
    );
    let titles = StringArray::from(
        classified
            .iter()
            .map(|r| Some(r.title.as_str()))
            .collect::<Vec<_>>(),
    );
    let urls = StringArray::from(
        classified
            .iter()
            .map(|r| Some(r.url.as_str()))
            .collect::<Vec<_>>(),
    );
    let locations = StringArray::from(
        classified
            .iter()
            .map(|r| Some(r.location.as_str()))
            .collect::<Vec<_>>(),
    );
    let identity_keys = StringArray::from(
        classified
            .iter()
            .map(|r| Some(r.identity_key.as_str()))
            .collect::<Vec<_>>(),
    );
    let regions = StringArray::from(
        classified
            .iter()
            .map(|r| Some(r.region_labels()))
            .collect::<Vec<_>>(),
    );
    let job_functions = StringArray::from(
        classified
            .iter()
            .map(|r| Some(r.job_function_labels()))
            .collect::<Vec<_>>(),
    );
    let seniority = StringArray::from(
        classified
            .iter()
            .map(|r| Some(r.seniority_labels()))
            .collect::<Vec<_>>(),
    );

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(organisations),
            Arc::new(titles),
            Arc::new(urls),
            Arc::new(locations),
            Arc::new(identity_keys),
            Arc::new(regions),
            Arc::new(job_functions),
            Arc::new(seniority),
        ],
    )
    .context("building classified record batch")?;
    write_parquet(path, batch)
}

fn write_delta_parquet(path: &PathBuf, delta: &BatchDelta) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        ArrowField::new("identity_key", DataType::Utf8, false),
        ArrowField::new("action", DataType::Utf8, false),
        ArrowField::new("cms_hard_delete", DataType::Boolean, false),
    ]));

    let mut rows: Vec<(String, &'static str, bool)> = delta
        .inserts
        .iter()
        .map(|record| (record.identity_key.clone(), "insert", false))
        .collect();
    rows.extend(
        delta
            .removals
            .iter()
            .map(|notice| (notice.identity_key.clone(), "remove", notice.cms_hard_delete)),
    );

    let identity_keys = StringArray::from(
        rows.iter()
            .map(|(key, _, _)| Some(key.as_str()))
            .collect::<Vec<_>>(),
    );
    let actions = StringArray::from(
        rows.iter()
            .map(|(_, action, _)| Some(*action))
            .collect::<Vec<_>>(),
    );
    let hard_deletes =
        BooleanArray::from(rows.iter().map(|(_, _, hard)| *hard).collect::<Vec<_>>());

    let batch = RecordBatch::try_new(
        schema,
        vec![Arc::new(identity_keys), Arc::new(actions), Arc::new(hard_deletes)],
    )
    .context("building delta record batch")?;
    write_parquet(path, batch)
}

fn manifest_entry(name: &str, reports_dir: &PathBuf, path: &PathBuf) -> Result<ParquetManifestFile> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let sha256 = hex::encode(hasher.finalize());
    let rel = path
        .strip_prefix(reports_dir)
        .unwrap_or(path)
        .display()
        .to_string();
    Ok(ParquetManifestFile {
        name: name.to_string(),
        path: rel,
        sha256,
        bytes: bytes.len() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gjb_core::{RawJobRecord, Region, Seniority};
    use std::collections::BTreeSet;

    fn classified(organisation: &str, title: &str, location: &str) -> ClassifiedJobRecord {
        ClassifiedJobRecord::from_raw(
            RawJobRecord {
                organisation: organisation.into(),
                title: title.into(),
                url: format!("https://example.org/{}", title.to_ascii_lowercase()),
                location: location.into(),
            },
            BTreeSet::from([Region::London]),
            BTreeSet::from(["🐝 Conservation".to_string()]),
            BTreeSet::from([Seniority::MidLevel]),
        )
    }

    fn live(identity_key: &str, cms: bool) -> LiveRecord {
        LiveRecord {
            identity_key: identity_key.into(),
            is_live: true,
            store_ids: StoreIds {
                database_id: Some(7),
                cms_item_id: cms.then(|| "cms-7".to_string()),
            },
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let a = classified("Wild Trust", "Ranger", "London");
        let mut b = a.clone();
        b.url = "https://other.example.org/ranger".into();
        let (deduped, collisions) = dedup_by_identity_key(vec![a.clone(), b]);
        assert_eq!(collisions, 1);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].url, a.url);
    }

    #[test]
    fn diff_partitions_inserts_removals_unchanged() {
        let kept = classified("Wild Trust", "Ranger", "London");
        let new = classified("Rivers Org", "Ecologist", "London");
        let snapshot = LiveSnapshot {
            records: vec![live(&kept.identity_key, true), live("Gone Org - Old Job - Leeds", false)],
        };
        let delta = diff_against_live(vec![kept, new.clone()], &snapshot, Utc::now());

        assert_eq!(delta.unchanged, 1);
        assert_eq!(delta.inserts.len(), 1);
        assert_eq!(delta.inserts[0].identity_key, new.identity_key);
        assert_eq!(delta.removals.len(), 1);
        assert_eq!(delta.removals[0].identity_key, "Gone Org - Old Job - Leeds");
    }

    #[test]
    fn removals_flag_cms_mirrors_for_hard_delete() {
        let snapshot = LiveSnapshot {
            records: vec![live("a", true), live("b", false)],
        };
        let delta = diff_against_live(vec![], &snapshot, Utc::now());
        let by_key: BTreeMap<_, _> = delta
            .removals
            .iter()
            .map(|n| (n.identity_key.as_str(), n.cms_hard_delete))
            .collect();
        assert!(by_key["a"]);
        assert!(!by_key["b"]);
    }

    #[test]
    fn non_live_snapshot_rows_are_ignored() {
        let mut dead = live("long gone", true);
        dead.is_live = false;
        let snapshot = LiveSnapshot { records: vec![dead] };
        let delta = diff_against_live(vec![], &snapshot, Utc::now());
        assert!(delta.removals.is_empty());
    }

    #[test]
    fn rediffing_after_apply_yields_empty_delta() {
        let kept = classified("Wild Trust", "Ranger", "London");
        let new = classified("Rivers Org", "Ecologist", "London");
        let snapshot = LiveSnapshot {
            records: vec![live(&kept.identity_key, false), live("Gone Org - Old Job - Leeds", true)],
        };
        let batch = vec![kept, new];

        let delta = diff_against_live(batch.clone(), &snapshot, Utc::now());
        let applied = apply_delta(&snapshot, &delta);
        let rerun = diff_against_live(batch.clone(), &applied, Utc::now());

        assert!(rerun.is_empty());
        assert_eq!(rerun.unchanged, batch.len());
    }

    #[test]
    fn apply_delta_soft_deletes_rather_than_dropping() {
        let snapshot = LiveSnapshot {
            records: vec![live("a", true)],
        };
        let delta = diff_against_live(vec![], &snapshot, Utc::now());
        let applied = apply_delta(&snapshot, &delta);
        assert_eq!(applied.records.len(), 1);
        assert!(!applied.records[0].is_live);
        assert_eq!(applied.records[0].store_ids.database_id, Some(7));
    }
}
