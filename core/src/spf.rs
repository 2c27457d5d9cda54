use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::cost::Cost;
use crate::graph::{Graph, NodeId};

/// Result of one Dijkstra run: distance and predecessor per interned node.
///
/// Borrows the graph's labels, so it cannot outlive the `&Graph` it was
/// computed from; callers turn it into a `ForwardingTable` before mutating.
#[derive(Debug)]
pub struct ShortestPathTree<'g> {
    graph: &'g Graph,
    source: NodeId,
    distance: Vec<Cost>,
    predecessor: Vec<Option<NodeId>>,
    nodes_settled: usize,
}

impl<'g> ShortestPathTree<'g> {
    pub fn source(&self) -> &'g str {
        self.graph.label(self.source).unwrap_or_default()
    }

    pub fn source_id(&self) -> NodeId {
        self.source
    }

    /// Cheapest cost from the source to `label`. Unknown labels are unreachable.
    pub fn distance(&self, label: &str) -> Cost {
        self.graph
            .resolve(label)
            .map_or(Cost::Unreachable, |id| self.distance_of(id))
    }

    /// Node before `label` on its shortest path. None for the source,
    /// unreachable nodes and unknown labels.
    pub fn predecessor(&self, label: &str) -> Option<&'g str> {
        let id = self.graph.resolve(label)?;
        self.predecessor_of(id).and_then(|p| self.graph.label(p))
    }

    pub fn distance_of(&self, id: NodeId) -> Cost {
        self.distance
            .get(id as usize)
            .copied()
            .unwrap_or(Cost::Unreachable)
    }

    pub fn predecessor_of(&self, id: NodeId) -> Option<NodeId> {
        self.predecessor.get(id as usize).copied().flatten()
    }

    /// First hop out of the source toward `id`.
    ///
    /// Walks predecessor pointers back from `id` until reaching the node
    /// whose predecessor is the source. None when `id` is the source or is
    /// unreachable.
    pub fn first_hop_of(&self, id: NodeId) -> Option<NodeId> {
        if id == self.source || !self.distance_of(id).is_reachable() {
            return None;
        }

        let mut current = id;
        // A shortest-path tree has no cycles, so the walk is at most n steps.
        for _ in 0..self.distance.len() {
            match self.predecessor_of(current) {
                Some(p) if p == self.source => return Some(current),
                Some(p) => current = p,
                None => return None,
            }
        }
        None
    }

    /// Number of nodes popped from the heap with their final distance.
    pub fn nodes_settled(&self) -> usize {
        self.nodes_settled
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }
}

/// Single-source shortest paths (Dijkstra, binary heap, lazy deletion).
///
/// Heap entries are keyed by `(distance, label)`: among equal distances the
/// lexicographically smallest label is settled first. Relaxation is strict,
/// so the first settled predecessor wins and results are reproducible.
///
/// Returns None if `source` is not in the graph.
pub fn shortest_path_tree<'g>(graph: &'g Graph, source: &str) -> Option<ShortestPathTree<'g>> {
    let start = graph.resolve(source)?;
    let n = graph.node_count();

    let mut distance = vec![Cost::Unreachable; n];
    let mut predecessor: Vec<Option<NodeId>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut nodes_settled = 0usize;

    let mut heap: BinaryHeap<Reverse<(u64, &str, NodeId)>> = BinaryHeap::new();
    distance[start as usize] = Cost::ZERO;
    heap.push(Reverse((0, source, start)));

    while let Some(Reverse((dist, _, current))) = heap.pop() {
        // Stale entry: a shorter distance was already settled.
        if settled[current as usize] {
            continue;
        }
        settled[current as usize] = true;
        nodes_settled += 1;

        for link in graph.links(current) {
            let candidate = Cost::Finite(dist).add_weight(link.weight);
            let target = link.target as usize;
            if candidate < distance[target] {
                trace!(
                    node = graph.label(link.target).unwrap_or_default(),
                    via = graph.label(current).unwrap_or_default(),
                    cost = %candidate,
                    "relaxed"
                );
                distance[target] = candidate;
                predecessor[target] = Some(current);
                if let (Cost::Finite(d), Some(label)) = (candidate, graph.label(link.target)) {
                    heap.push(Reverse((d, label, link.target)));
                }
            }
        }
    }

    debug!(source, nodes = n, nodes_settled, "shortest-path tree computed");

    Some(ShortestPathTree {
        graph,
        source: start,
        distance,
        predecessor,
        nodes_settled,
    })
}
