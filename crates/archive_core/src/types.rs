//! Type definitions for `archive_core`.
//!
//! Creature records as they come out of the dataset, plus the display-ready
//! path elements produced by the planner.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(CreatureId);

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A directed link to another record, as written in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionRef {
    #[serde(rename = "name")]
    pub id: CreatureId,
}

impl EvolutionRef {
    pub fn new(id: &str) -> Self {
        Self {
            id: CreatureId::from(id),
        }
    }
}

/// One catalog entry.
///
/// Only `id` and the two evolution lists matter to the planner. Everything
/// else is carried through to formatted output untouched; fields the archive
/// does not model land in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureRecord {
    #[serde(rename = "name")]
    pub id: CreatureId,
    #[serde(default, deserialize_with = "lenient_refs")]
    pub evolves_to: Vec<EvolutionRef>,
    #[serde(default, deserialize_with = "lenient_refs")]
    pub evolves_from: Vec<EvolutionRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl CreatureRecord {
    /// Bare record with no links and no descriptive attributes.
    pub fn new(id: &str) -> Self {
        Self {
            id: CreatureId::from(id),
            evolves_to: Vec::new(),
            evolves_from: Vec::new(),
            generation: None,
            attribute: None,
            kind: None,
            image_path: None,
            url: None,
            description: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn image_ref(&self) -> Option<&str> {
        self.image_path.as_deref().or(self.url.as_deref())
    }

    /// Every id this record links to, `evolves_to` first.
    pub fn linked_ids(&self) -> impl Iterator<Item = &CreatureId> {
        self.evolves_to
            .iter()
            .chain(self.evolves_from.iter())
            .map(|r| &r.id)
    }
}

/// Accepts a missing/null list, and skips entries that are not objects with a
/// string `name`.
fn lenient_refs<'de, D>(deserializer: D) -> Result<Vec<EvolutionRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    let Some(serde_json::Value::Array(items)) = raw else {
        return Ok(Vec::new());
    };
    Ok(items
        .iter()
        .filter_map(|item| item.get("name").and_then(serde_json::Value::as_str))
        .map(EvolutionRef::new)
        .collect())
}

// ---------------------------------------------------------------------------
// Formatted paths
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeElement {
    pub record: CreatureRecord,
    pub is_start: bool,
    pub is_target: bool,
    pub generation_label: String,
}

/// Transition marker between two nodes. `step` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepElement {
    pub step: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PathElement {
    Node(Box<NodeElement>),
    Step(StepElement),
}

impl PathElement {
    pub fn as_node(&self) -> Option<&NodeElement> {
        match self {
            PathElement::Node(node) => Some(&**node),
            PathElement::Step(_) => None,
        }
    }

    pub fn as_step(&self) -> Option<StepElement> {
        match self {
            PathElement::Step(step) => Some(*step),
            PathElement::Node(_) => None,
        }
    }
}

pub type PathResult = Vec<PathElement>;

/// Node ids of a formatted path, in order.
pub fn path_ids(path: &[PathElement]) -> Vec<&CreatureId> {
    path.iter()
        .filter_map(PathElement::as_node)
        .map(|node| &node.record.id)
        .collect()
}
