//! Vocabulary documents and keyword classification for the category axes.
//!
//! A vocabulary document is a YAML list whose first element is the category
//! label and whose remaining elements are its keywords. Documents are grouped
//! into directories by axis and phase (`regions/initial`, `regions/refining`,
//! `job-functions`, `seniority/initial`, `seniority/refining`) and merged
//! into one mapping per directory.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use gjb_core::{Region, Seniority};
use thiserror::Error;
use tracing::warn;

pub const CRATE_NAME: &str = "gjb-vocab";

/// Refining rule set that demotes falsely-tagged entry-level titles.
pub const NOT_ENTRY_LEVEL: &str = "Not Entry Level";
/// Refining rule set that demotes falsely-tagged management titles.
pub const NOT_MANAGEMENT: &str = "Not Management";
/// Override set that protects genuine management titles from demotion.
pub const DEFINITELY_MANAGEMENT: &str = "Definitely Management";

const SENIORITY_RULE_NAMES: [&str; 3] = [NOT_ENTRY_LEVEL, NOT_MANAGEMENT, DEFINITELY_MANAGEMENT];

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("reading vocabulary directory {}: {source}", .path.display())]
    Dir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no vocabulary documents in {}", .0.display())]
    NoDocuments(PathBuf),
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{}: document is empty", .0.display())]
    EmptyDocument(PathBuf),
    #[error("{}: category {label:?} has no keywords", .path.display())]
    NoKeywords { path: PathBuf, label: String },
    #[error("{}: unknown {axis} label {label:?}", .path.display())]
    UnknownLabel {
        path: PathBuf,
        axis: &'static str,
        label: String,
    },
}

/// One axis/phase mapping from category label to keywords. Backed by an
/// ordered map so iteration, and therefore logging and serialised output,
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary<L: Ord> {
    entries: BTreeMap<L, Vec<String>>,
}

impl<L: Ord + Clone> Vocabulary<L> {
    pub fn from_entries(entries: impl IntoIterator<Item = (L, Vec<String>)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Inserts a label, replacing any previous keyword set. Returns true when
    /// a previous definition was overwritten.
    pub fn insert(&mut self, label: L, keywords: Vec<String>) -> bool {
        self.entries.insert(label, keywords).is_some()
    }

    pub fn keywords(&self, label: &L) -> Option<&[String]> {
        self.entries.get(label).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&L, &[String])> {
        self.entries.iter().map(|(label, kw)| (label, kw.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keyword_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Labels whose keyword sets contain a substring match for `text`.
    /// Case-sensitive, exact containment; the empty set is a normal outcome.
    pub fn matching_labels(&self, text: &str) -> BTreeSet<L> {
        self.entries
            .iter()
            .filter(|(_, keywords)| contains_any(text, keywords))
            .map(|(label, _)| label.clone())
            .collect()
    }

    /// Labels with a keyword equal to `text` in full. Used for location
    /// aliases where substring matching would be far too permissive.
    pub fn exact_labels(&self, text: &str) -> BTreeSet<L> {
        self.entries
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| k == text))
            .map(|(label, _)| label.clone())
            .collect()
    }
}

/// True when any keyword is a substring of `text`.
pub fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword.as_str()))
}

fn read_document(path: &Path) -> Result<(String, Vec<String>), VocabError> {
    let text = fs::read_to_string(path).map_err(|source| VocabError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        return Err(VocabError::EmptyDocument(path.to_path_buf()));
    }
    let mut items: Vec<String> =
        serde_yaml::from_str(&text).map_err(|source| VocabError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    if items.is_empty() {
        return Err(VocabError::EmptyDocument(path.to_path_buf()));
    }
    let label = items.remove(0);
    if items.is_empty() {
        return Err(VocabError::NoKeywords {
            path: path.to_path_buf(),
            label,
        });
    }
    Ok((label, items))
}

fn document_paths(dir: &Path) -> Result<Vec<PathBuf>, VocabError> {
    let entries = fs::read_dir(dir).map_err(|source| VocabError::Dir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut paths = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("yaml") | Some("yml")
            )
        })
        .collect::<Vec<_>>();
    if paths.is_empty() {
        return Err(VocabError::NoDocuments(dir.to_path_buf()));
    }
    // Sorted file-name order makes the last-wins merge independent of the
    // file system's enumeration order.
    paths.sort();
    Ok(paths)
}

fn load_dir_with<L: Ord + Clone + std::fmt::Debug>(
    dir: &Path,
    parse_label: impl Fn(&Path, String) -> Result<L, VocabError>,
) -> Result<Vocabulary<L>, VocabError> {
    let mut vocabulary = Vocabulary {
        entries: BTreeMap::new(),
    };
    for path in document_paths(dir)? {
        let (label, keywords) = read_document(&path)?;
        let label = parse_label(&path, label)?;
        if vocabulary.insert(label.clone(), keywords) {
            warn!(
                label = ?label,
                document = %path.display(),
                "vocabulary label redefined; last document wins"
            );
        }
    }
    Ok(vocabulary)
}

/// Loads a directory of documents with free-form string labels.
pub fn load_dir(dir: &Path) -> Result<Vocabulary<String>, VocabError> {
    load_dir_with(dir, |_, label| Ok(label))
}

/// Loads a directory whose labels must be known regions.
pub fn load_region_dir(dir: &Path) -> Result<Vocabulary<Region>, VocabError> {
    load_dir_with(dir, |path, label| {
        Region::from_str(&label).map_err(|_| VocabError::UnknownLabel {
            path: path.to_path_buf(),
            axis: "region",
            label,
        })
    })
}

/// Loads a directory whose labels must be known seniority levels.
pub fn load_seniority_dir(dir: &Path) -> Result<Vocabulary<Seniority>, VocabError> {
    load_dir_with(dir, |path, label| {
        Seniority::from_str(&label).map_err(|_| VocabError::UnknownLabel {
            path: path.to_path_buf(),
            axis: "seniority",
            label,
        })
    })
}

fn load_seniority_rules_dir(dir: &Path) -> Result<Vocabulary<String>, VocabError> {
    load_dir_with(dir, |path, label| {
        if SENIORITY_RULE_NAMES.contains(&label.as_str()) {
            Ok(label)
        } else {
            Err(VocabError::UnknownLabel {
                path: path.to_path_buf(),
                axis: "seniority rule",
                label,
            })
        }
    })
}

/// All five axis/phase vocabularies, loaded once per batch run and shared
/// read-only by the classifier components.
#[derive(Debug, Clone)]
pub struct VocabularyBundle {
    pub regions_initial: Vocabulary<Region>,
    pub regions_exact: Vocabulary<Region>,
    pub job_functions: Vocabulary<String>,
    pub seniority_initial: Vocabulary<Seniority>,
    pub seniority_refining: Vocabulary<String>,
}

impl VocabularyBundle {
    pub fn load(root: &Path) -> Result<Self, VocabError> {
        Ok(Self {
            regions_initial: load_region_dir(&root.join("regions").join("initial"))?,
            regions_exact: load_region_dir(&root.join("regions").join("refining"))?,
            job_functions: load_dir(&root.join("job-functions"))?,
            seniority_initial: load_seniority_dir(&root.join("seniority").join("initial"))?,
            seniority_refining: load_seniority_rules_dir(
                &root.join("seniority").join("refining"),
            )?,
        })
    }

    pub fn not_entry_level(&self) -> &[String] {
        self.rule_keywords(NOT_ENTRY_LEVEL)
    }

    pub fn not_management(&self) -> &[String] {
        self.rule_keywords(NOT_MANAGEMENT)
    }

    pub fn definitely_management(&self) -> &[String] {
        self.rule_keywords(DEFINITELY_MANAGEMENT)
    }

    fn rule_keywords(&self, rule: &str) -> &[String] {
        self.seniority_refining
            .keywords(&rule.to_string())
            .unwrap_or(&[])
    }
}
