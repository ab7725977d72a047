//! Validation tests for the shipped creature dataset.
//!
//! These tests load the actual `content/digimon.json` and check:
//! 1. Schema validity: the file deserializes and passes id validation
//! 2. Cross-reference integrity: every evolution reference resolves
//! 3. Link consistency: each link is written on both records
//! 4. Planner sanity: known routes come out as expected

use archive_core::catalog::{attributes, generations};
use archive_core::{find_shortest_paths, path_ids, CreatureRecord, EvolutionGraph};
use archive_data::{dangling_references, load_records};
use std::sync::OnceLock;

/// Integration tests run from the crate directory, so go up two levels.
fn content_path() -> String {
    let manifest = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    format!("{manifest}/../../content/digimon.json")
}

fn load_test_records() -> &'static [CreatureRecord] {
    static RECORDS: OnceLock<Vec<CreatureRecord>> = OnceLock::new();
    RECORDS.get_or_init(|| {
        load_records(content_path()).expect("load_records should succeed for shipped content")
    })
}

// =========================================================================
// 1. Schema validation
// =========================================================================

#[test]
fn content_loads_successfully() {
    assert!(!load_test_records().is_empty());
}

#[test]
fn every_record_has_generation_and_attribute() {
    for record in load_test_records() {
        assert!(record.generation.is_some(), "'{}' has no generation", record.id);
        assert!(record.attribute.is_some(), "'{}' has no attribute", record.id);
        assert!(record.image_ref().is_some(), "'{}' has no image", record.id);
    }
}

#[test]
fn filter_lists_start_with_all() {
    let records = load_test_records();
    assert_eq!(generations(records)[0], "All");
    assert!(attributes(records).contains(&"Vaccine".to_string()));
}

// =========================================================================
// 2. Cross-reference integrity
// =========================================================================

#[test]
fn no_dangling_evolution_references() {
    let dangling = dangling_references(load_test_records());
    assert!(dangling.is_empty(), "dangling references: {dangling:?}");
}

// =========================================================================
// 3. Link consistency
// =========================================================================

#[test]
fn evolves_to_is_mirrored_by_evolves_from() {
    let records = load_test_records();
    for record in records {
        for next in &record.evolves_to {
            let other = records
                .iter()
                .find(|r| r.id == next.id)
                .expect("reference resolves");
            assert!(
                other.evolves_from.iter().any(|r| r.id == record.id),
                "'{}' evolves to '{}' but not the other way round",
                record.id,
                other.id,
            );
        }
    }
}

// =========================================================================
// 4. Planner sanity
// =========================================================================

#[test]
fn kuramon_to_garurumon_has_two_routes() {
    let paths = find_shortest_paths("Kuramon", "Garurumon", load_test_records());
    let routes: Vec<Vec<&str>> = paths
        .iter()
        .map(|p| path_ids(p).into_iter().map(|id| id.as_str()).collect())
        .collect();
    assert_eq!(
        routes,
        vec![
            vec!["Kuramon", "Pagumon", "Gabumon", "Garurumon"],
            vec!["Kuramon", "Pagumon", "Gazimon", "Garurumon"],
        ]
    );
}

#[test]
fn kuramon_reaches_choromon_through_pagumon() {
    let paths = find_shortest_paths("Kuramon", "Choromon", load_test_records());
    assert_eq!(paths.len(), 1);
    let target = paths[0].last().and_then(|e| e.as_node()).unwrap();
    assert!(target.is_target);
    assert_eq!(target.record.image_path.as_deref(), Some("/images/choromon.png"));
}

#[test]
fn dataset_is_one_connected_component() {
    let records = load_test_records();
    let graph = EvolutionGraph::build(records);
    let root = &records[0].id;
    for record in records {
        assert!(
            graph.hop_count(root, &record.id).is_some(),
            "'{}' is not reachable from '{}'",
            record.id,
            root,
        );
    }
}
