//! Scenarios pinned against the reference vocabulary shipped in `vocab/`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use gjb_classify::{map_regions, map_seniority, Categoriser};
use gjb_core::{RawJobRecord, Region, Seniority};
use gjb_vocab::VocabularyBundle;

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .expect("workspace root")
}

fn reference_bundle() -> VocabularyBundle {
    VocabularyBundle::load(&workspace_root().join("vocab")).expect("reference vocabulary loads")
}

fn raw(organisation: &str, title: &str, location: &str) -> RawJobRecord {
    RawJobRecord {
        organisation: organisation.into(),
        title: title.into(),
        url: "https://jobs.example.org/x".into(),
        location: location.into(),
    }
}

#[test]
fn junior_backend_software_engineer_in_london() {
    let bundle = reference_bundle();
    let batch = Categoriser::new(&bundle).categorise_batch(vec![raw(
        "Grassroots Tech CIC",
        "Junior Backend Software Engineer",
        "London",
    )]);

    assert_eq!(batch.classified.len(), 1);
    let record = &batch.classified[0];
    assert_eq!(record.regions, BTreeSet::from([Region::London]));
    assert_eq!(
        record.job_functions,
        BTreeSet::from(["🤖 Software".to_string()])
    );
    assert_eq!(record.seniority, BTreeSet::from([Seniority::EntryLevel]));
    assert!(batch.review.is_empty());
}

#[test]
fn woodland_creation_project_manager_across_two_regions() {
    let bundle = reference_bundle();
    let batch = Categoriser::new(&bundle).categorise_batch(vec![raw(
        "National Forest Trust",
        "Woodland Creation Project Manager",
        "Birmingham or Liverpool",
    )]);

    assert_eq!(batch.classified.len(), 1);
    let record = &batch.classified[0];
    assert_eq!(
        record.regions,
        BTreeSet::from([Region::WestMidlands, Region::NorthWest])
    );
    for label in ["🌳 Rewilding", "📋 Project Management", "🐝 Conservation"] {
        assert!(
            record.job_functions.contains(label),
            "missing job function {label}"
        );
    }
    assert_eq!(record.seniority, BTreeSet::from([Seniority::Senior]));
}

#[test]
fn remote_aliases_map_to_fully_remote() {
    let bundle = reference_bundle();
    for location in ["Remote", "Uk", "Home-Based", "Remote, United Kingdom"] {
        assert_eq!(
            map_regions(&bundle, location, "Conservation Officer"),
            BTreeSet::from([Region::FullyRemote]),
            "location {location:?}"
        );
    }
}

#[test]
fn midlands_alias_maps_to_both_midlands() {
    let bundle = reference_bundle();
    assert_eq!(
        map_regions(&bundle, "Midlands, Gb", "Conservation Officer"),
        BTreeSet::from([Region::EastMidlands, Region::WestMidlands])
    );
}

#[test]
fn sustrans_hub_location_maps_nationwide() {
    let bundle = reference_bundle();
    let regions = map_regions(
        &bundle,
        "Nearby Any Sustrans Office Hub Across The Uk",
        "Network Development Officer",
    );
    assert_eq!(regions, Region::UK_WIDE.into_iter().collect::<BTreeSet<_>>());
}

#[test]
fn junior_architect_is_demoted_to_mid_level() {
    let bundle = reference_bundle();
    assert_eq!(
        map_seniority(&bundle, "Junior Architect"),
        BTreeSet::from([Seniority::MidLevel])
    );
}

#[test]
fn abroad_only_location_is_dropped_but_mixed_is_kept() {
    let bundle = reference_bundle();
    let batch = Categoriser::new(&bundle).categorise_batch(vec![
        raw("EuroNature", "Conservation Officer", "Ireland"),
        raw("Channel Habitats", "Conservation Officer", "Dublin, London"),
    ]);

    assert_eq!(batch.exclusions.abroad_only, 1);
    assert_eq!(batch.classified.len(), 1);
    assert_eq!(
        batch.classified[0].regions,
        BTreeSet::from([Region::Abroad, Region::London])
    );
}
