use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cost::Cost;
use crate::graph::{Graph, NodeId};
use crate::spf::shortest_path_tree;

/// One row of a forwarding table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardingEntry {
    pub destination: String,
    /// Neighbour of the table's source that begins the cheapest path.
    /// None for the source itself and for unreachable destinations.
    pub next_hop: Option<String>,
    /// Node just before `destination` on the chosen path.
    pub predecessor: Option<String>,
    pub cost: Cost,
}

/// Destination → (next hop, cost) for one source router.
///
/// Rows follow the graph's node order at computation time. A table for a
/// source that was not in the graph has no rows at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "TableRepr", into = "TableRepr")]
pub struct ForwardingTable {
    source: String,
    entries: Vec<ForwardingEntry>,
    index: HashMap<String, usize>,
}

#[derive(Serialize, Deserialize)]
struct TableRepr {
    source: String,
    entries: Vec<ForwardingEntry>,
}

impl From<TableRepr> for ForwardingTable {
    fn from(r: TableRepr) -> Self {
        ForwardingTable::from_entries(r.source, r.entries)
    }
}

impl From<ForwardingTable> for TableRepr {
    fn from(t: ForwardingTable) -> Self {
        TableRepr {
            source: t.source,
            entries: t.entries,
        }
    }
}

impl ForwardingTable {
    /// Build a table from rows. A later row for the same destination
    /// replaces the lookup of an earlier one.
    pub fn from_entries(source: impl Into<String>, entries: Vec<ForwardingEntry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.destination.clone(), i))
            .collect();
        Self {
            source: source.into(),
            entries,
            index,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn get(&self, destination: &str) -> Option<&ForwardingEntry> {
        self.index.get(destination).map(|&i| &self.entries[i])
    }

    pub fn next_hop(&self, destination: &str) -> Option<&str> {
        self.get(destination).and_then(|e| e.next_hop.as_deref())
    }

    /// Cost toward `destination`; unreachable for destinations not in the table.
    pub fn cost(&self, destination: &str) -> Cost {
        self.get(destination).map_or(Cost::Unreachable, |e| e.cost)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ForwardingEntry> {
        self.entries.iter()
    }

    /// Rows with a finite cost, the source row included.
    pub fn reachable(&self) -> impl Iterator<Item = &ForwardingEntry> {
        self.entries.iter().filter(|e| e.cost.is_reachable())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for ForwardingTable {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.entries == other.entries
    }
}

impl Eq for ForwardingTable {}

/// Compute the forwarding table of `source` from scratch.
///
/// Every node in the graph gets a row, the source included (cost 0, no next
/// hop). An unknown source yields an empty table.
pub fn compute_forwarding_table(graph: &Graph, source: &str) -> ForwardingTable {
    let Some(spt) = shortest_path_tree(graph, source) else {
        warn!(source, "forwarding table requested for unknown node");
        return ForwardingTable::from_entries(source, Vec::new());
    };

    let label_of = |id: NodeId| graph.label(id).map(str::to_string);

    let entries: Vec<ForwardingEntry> = (0..graph.node_count() as u32)
        .filter_map(|id| {
            let destination = graph.label(id)?.to_string();
            Some(ForwardingEntry {
                destination,
                next_hop: spt.first_hop_of(id).and_then(label_of),
                predecessor: spt.predecessor_of(id).and_then(label_of),
                cost: spt.distance_of(id),
            })
        })
        .collect();

    let reachable = entries.iter().filter(|e| e.cost.is_reachable()).count();
    debug!(source, entries = entries.len(), reachable, "forwarding table computed");

    ForwardingTable::from_entries(source, entries)
}

/// Forwarding tables for every node, in node order.
pub fn compute_all_forwarding_tables(graph: &Graph) -> Vec<ForwardingTable> {
    graph
        .nodes()
        .map(|node| compute_forwarding_table(graph, node))
        .collect()
}
