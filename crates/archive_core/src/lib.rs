//! `archive_core`: creature records, evolution graph and the digivolution
//! planner.
//!
//! No IO. Every call works on the record slice it is given and keeps no
//! state between calls.

pub mod catalog;
mod format;
mod graph;
pub mod navigation;
mod planner;
#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;
mod types;

pub use format::format_path;
pub use graph::EvolutionGraph;
pub use planner::{find_shortest_paths, shortest_id_paths, summarize, PlanSummary};
pub use types::*;

#[cfg(test)]
mod tests;
