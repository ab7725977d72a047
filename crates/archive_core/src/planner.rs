//! Shortest-path search between two creatures.
//!
//! A single breadth-first pass from the start records, for every node it
//! reaches, the distance and every predecessor one level closer to the start.
//! All shortest paths are then read back out of that predecessor DAG by
//! walking from the target towards the start, so ties through a shared
//! intermediate node are never lost.

use ahash::AHashMap;
use serde::Serialize;
use smallvec::SmallVec;

use crate::format::format_path;
use crate::graph::{EvolutionGraph, NodeIndex};
use crate::{CreatureId, CreatureRecord, PathResult};

/// Finds every shortest evolution path from `start` to `target` and formats
/// each one for display.
///
/// Returns an empty list when either name is empty or unknown, or when the two
/// creatures are not connected. When `start == target` the single path holds
/// just that creature.
pub fn find_shortest_paths(start: &str, target: &str, records: &[CreatureRecord]) -> Vec<PathResult> {
    if start.is_empty() || target.is_empty() {
        return Vec::new();
    }
    let graph = EvolutionGraph::build(records);
    let id_paths = shortest_id_paths(&CreatureId::from(start), &CreatureId::from(target), &graph);
    if id_paths.is_empty() {
        return Vec::new();
    }

    let mut lookup: AHashMap<&CreatureId, &CreatureRecord> = AHashMap::with_capacity(records.len());
    for record in records {
        lookup.entry(&record.id).or_insert(record);
    }
    id_paths
        .iter()
        .map(|ids| format_path(ids, |id| lookup.get(id).copied()))
        .collect()
}

/// Raw id sequences of every shortest path, sorted lexicographically.
pub fn shortest_id_paths(
    start: &CreatureId,
    target: &CreatureId,
    graph: &EvolutionGraph,
) -> Vec<Vec<CreatureId>> {
    let (Some(from), Some(to)) = (graph.index_of(start), graph.index_of(target)) else {
        tracing::debug!(%start, %target, "planner: unknown endpoint");
        return Vec::new();
    };
    if from == to {
        return vec![vec![start.clone()]];
    }

    let dag = PredecessorDag::search(graph, from, to);
    let Some(distance) = dag.distance[to] else {
        tracing::debug!(%start, %target, "planner: target unreachable");
        return Vec::new();
    };

    let mut paths: Vec<Vec<CreatureId>> = dag
        .enumerate(from, to)
        .into_iter()
        .map(|path| path.into_iter().map(|idx| graph.id_at(idx).clone()).collect())
        .collect();
    paths.sort();
    tracing::debug!(%start, %target, distance, paths = paths.len(), "planner: search complete");
    paths
}

struct PredecessorDag {
    distance: Vec<Option<u32>>,
    predecessors: Vec<SmallVec<[NodeIndex; 2]>>,
}

impl PredecessorDag {
    /// Level-synchronized BFS. Stops after finishing the level that reaches
    /// `to`, so nothing deeper than the target is ever expanded.
    fn search(graph: &EvolutionGraph, from: NodeIndex, to: NodeIndex) -> Self {
        let mut dag = Self {
            distance: vec![None; graph.len()],
            predecessors: vec![SmallVec::new(); graph.len()],
        };
        dag.distance[from] = Some(0);

        let mut frontier = vec![from];
        let mut depth = 0u32;
        while !frontier.is_empty() && dag.distance[to].is_none() {
            let mut next = Vec::new();
            for &node in &frontier {
                for &neighbor in graph.adjacent(node) {
                    match dag.distance[neighbor] {
                        None => {
                            dag.distance[neighbor] = Some(depth + 1);
                            dag.predecessors[neighbor].push(node);
                            next.push(neighbor);
                        }
                        Some(d) if d == depth + 1 => dag.predecessors[neighbor].push(node),
                        Some(_) => {}
                    }
                }
            }
            frontier = next;
            depth += 1;
        }
        dag
    }

    fn enumerate(&self, from: NodeIndex, to: NodeIndex) -> Vec<Vec<NodeIndex>> {
        let mut paths = Vec::new();
        let mut suffix = Vec::new();
        self.walk_back(to, from, &mut suffix, &mut paths);
        paths
    }

    fn walk_back(
        &self,
        node: NodeIndex,
        from: NodeIndex,
        suffix: &mut Vec<NodeIndex>,
        paths: &mut Vec<Vec<NodeIndex>>,
    ) {
        suffix.push(node);
        if node == from {
            paths.push(suffix.iter().rev().copied().collect());
        } else {
            for &pred in &self.predecessors[node] {
                self.walk_back(pred, from, suffix, paths);
            }
        }
        suffix.pop();
    }
}

/// Headline numbers for a planner result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub path_count: usize,
    /// Transitions per path; `None` when no path was found.
    pub step_count: Option<usize>,
}

pub fn summarize(paths: &[PathResult]) -> PlanSummary {
    PlanSummary {
        path_count: paths.len(),
        step_count: paths
            .first()
            .map(|path| path.iter().filter(|e| e.as_step().is_some()).count()),
    }
}
