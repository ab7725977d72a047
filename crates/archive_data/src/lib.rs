//! Dataset loading shared by the archive front ends.

use anyhow::{Context, Result};
use archive_core::{CreatureId, CreatureRecord};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// An evolution reference that names a creature missing from the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingRef {
    pub from: CreatureId,
    pub missing: CreatureId,
}

/// Validates the dataset's id precondition, panicking on any authoring error.
///
/// Catches empty names and names used by more than one record. Dangling
/// evolution references are not authoring errors here; see
/// [`dangling_references`].
pub fn validate_records(records: &[CreatureRecord]) {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    for record in records {
        assert!(
            !record.id.as_str().trim().is_empty(),
            "record has empty name"
        );
        assert!(
            seen.insert(record.id.as_str()),
            "record name '{}' is used more than once",
            record.id,
        );
    }
}

/// Every reference to a name that has no record, in dataset order.
pub fn dangling_references(records: &[CreatureRecord]) -> Vec<DanglingRef> {
    let known: HashSet<&CreatureId> = records.iter().map(|r| &r.id).collect();
    let mut dangling = Vec::new();
    for record in records {
        for id in record.linked_ids() {
            if !known.contains(id) {
                dangling.push(DanglingRef {
                    from: record.id.clone(),
                    missing: id.clone(),
                });
            }
        }
    }
    dangling
}

pub fn load_records_from_str(json: &str) -> Result<Vec<CreatureRecord>> {
    let records: Vec<CreatureRecord> =
        serde_json::from_str(json).context("parsing creature records")?;
    validate_records(&records);
    for dangling in dangling_references(&records) {
        tracing::warn!(
            from = %dangling.from,
            missing = %dangling.missing,
            "evolution reference to unknown creature"
        );
    }
    tracing::debug!(records = records.len(), "creature records loaded");
    Ok(records)
}

pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<CreatureRecord>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    load_records_from_str(&json).with_context(|| format!("loading {}", path.display()))
}
