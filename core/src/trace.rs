use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cost::Cost;
use crate::error::{Result, RouteError};
use crate::forwarding::{compute_forwarding_table, ForwardingTable};
use crate::graph::Graph;

/// Ordered hop sequence from source to destination, both included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketPath {
    pub hops: Vec<String>,
    pub cost: u64,
}

impl PacketPath {
    /// Number of links traversed.
    pub fn hop_count(&self) -> usize {
        self.hops.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<&str> {
        self.hops.first().map(|s| s.as_str())
    }

    pub fn destination(&self) -> Option<&str> {
        self.hops.last().map(|s| s.as_str())
    }
}

impl fmt::Display for PacketPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hops.join(" -> "))
    }
}

/// Reconstruct the path from `source` to `destination` out of the table
/// computed for `source`.
///
/// Walks back from the destination one predecessor at a time until the
/// source is reached. Fails with `NoPath` when the destination is missing
/// or unreachable, and with `InconsistentTable` when the walk breaks off or
/// runs longer than the table (possible only for hand-built tables).
pub fn trace_path(table: &ForwardingTable, source: &str, destination: &str) -> Result<PacketPath> {
    if table.source() != source {
        return Err(RouteError::TableSourceMismatch {
            expected: source.to_string(),
            actual: table.source().to_string(),
        });
    }

    let cost = match table.get(destination).map(|e| e.cost) {
        Some(Cost::Finite(c)) => c,
        Some(Cost::Unreachable) | None => return Err(RouteError::no_path(source, destination)),
    };

    let inconsistent = || RouteError::InconsistentTable {
        destination: destination.to_string(),
    };

    let mut hops = vec![destination.to_string()];
    let mut current = destination;
    while current != source {
        if hops.len() > table.len() {
            return Err(inconsistent());
        }
        let prev = table
            .get(current)
            .and_then(|e| e.predecessor.as_deref())
            .ok_or_else(inconsistent)?;
        hops.push(prev.to_string());
        current = prev;
    }
    hops.reverse();

    Ok(PacketPath { hops, cost })
}

/// Forward a packet router by router.
///
/// Each router on the way computes its own forwarding table and hands the
/// packet to its next hop for `destination`. Every hop lies on a shortest
/// path, so the remaining cost strictly drops and the walk ends within
/// `node_count` hops.
pub fn route_packet(graph: &Graph, source: &str, destination: &str) -> Result<PacketPath> {
    for node in [source, destination] {
        if !graph.contains_node(node) {
            return Err(RouteError::UnknownNode(node.to_string()));
        }
    }

    let mut hops = vec![source.to_string()];
    let mut cost = 0u64;
    let mut current = source.to_string();

    while current != destination {
        if hops.len() > graph.node_count() {
            return Err(RouteError::InconsistentTable {
                destination: destination.to_string(),
            });
        }

        let table = compute_forwarding_table(graph, &current);
        let next = table
            .next_hop(destination)
            .ok_or_else(|| RouteError::no_path(source, destination))?
            .to_string();
        // The next hop is a neighbour, so its table cost is the link weight.
        let step = table
            .cost(&next)
            .value()
            .ok_or_else(|| RouteError::no_path(source, destination))?;

        debug!(at = %current, next = %next, step, "forwarded");
        cost = cost.saturating_add(step);
        hops.push(next.clone());
        current = next;
    }

    Ok(PacketPath { hops, cost })
}
