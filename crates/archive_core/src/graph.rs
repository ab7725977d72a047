use std::collections::VecDeque;

use ahash::AHashMap;
use smallvec::SmallVec;

use crate::{CreatureId, CreatureRecord};

pub(crate) type NodeIndex = usize;

/// Undirected evolution graph over the ids of a record set.
///
/// Built fresh from the records on every planner call. Edges come from both
/// `evolves_to` and `evolves_from`; a link recorded on either side connects
/// the pair in both directions. References to ids outside the record set are
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct EvolutionGraph {
    ids: Vec<CreatureId>,
    index: AHashMap<CreatureId, NodeIndex>,
    adjacency: Vec<SmallVec<[NodeIndex; 4]>>,
}

impl EvolutionGraph {
    pub fn build(records: &[CreatureRecord]) -> Self {
        let mut graph = Self::default();
        for record in records {
            if graph.index.contains_key(&record.id) {
                continue;
            }
            graph.index.insert(record.id.clone(), graph.ids.len());
            graph.ids.push(record.id.clone());
            graph.adjacency.push(SmallVec::new());
        }
        for record in records {
            let Some(&from) = graph.index.get(&record.id) else {
                continue;
            };
            for linked in record.linked_ids() {
                if let Some(&to) = graph.index.get(linked) {
                    graph.connect(from, to);
                }
            }
        }
        graph
    }

    fn connect(&mut self, a: NodeIndex, b: NodeIndex) {
        if a == b {
            return;
        }
        if !self.adjacency[a].contains(&b) {
            self.adjacency[a].push(b);
        }
        if !self.adjacency[b].contains(&a) {
            self.adjacency[b].push(a);
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &CreatureId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(SmallVec::len).sum::<usize>() / 2
    }

    /// Neighbors of `id` in first-seen order. Empty for unknown ids.
    pub fn neighbors<'a>(&'a self, id: &CreatureId) -> impl Iterator<Item = &'a CreatureId> + 'a {
        let adjacent: &[NodeIndex] = match self.index.get(id) {
            Some(&idx) => &self.adjacency[idx],
            None => &[],
        };
        adjacent.iter().map(move |&n| &self.ids[n])
    }

    pub(crate) fn index_of(&self, id: &CreatureId) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub(crate) fn id_at(&self, idx: NodeIndex) -> &CreatureId {
        &self.ids[idx]
    }

    pub(crate) fn adjacent(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.adjacency[idx]
    }

    /// Returns the number of hops on the shortest undirected path between two
    /// ids, or `None` if no path exists or either id is unknown. Returns
    /// `Some(0)` when `from == to`.
    pub fn hop_count(&self, from: &CreatureId, to: &CreatureId) -> Option<u64> {
        let start = self.index_of(from)?;
        let goal = self.index_of(to)?;
        if start == goal {
            return Some(0);
        }
        let mut visited = vec![false; self.len()];
        let mut queue = VecDeque::new();
        queue.push_back((start, 0u64));
        visited[start] = true;
        while let Some((node, dist)) = queue.pop_front() {
            for &neighbor in self.adjacent(node) {
                if neighbor == goal {
                    return Some(dist + 1);
                }
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back((neighbor, dist + 1));
                }
            }
        }
        None
    }
}
