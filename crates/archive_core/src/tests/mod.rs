use super::*;
use crate::test_fixtures::{chain, diamond, record, with_links};


// --- Shared test helpers ------------------------------------------------

fn id_paths(start: &str, target: &str, records: &[CreatureRecord]) -> Vec<Vec<String>> {
    let graph = EvolutionGraph::build(records);
    shortest_id_paths(&start.into(), &target.into(), &graph)
        .into_iter()
        .map(|path| path.into_iter().map(|id| id.0).collect())
        .collect()
}

fn names(path: &[PathElement]) -> Vec<&str> {
    path_ids(path).into_iter().map(CreatureId::as_str).collect()
}
