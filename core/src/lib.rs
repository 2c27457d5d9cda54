//! netroute-core: shortest-path forwarding tables for a simulated network.
//!
//! Maintains an undirected weighted topology and turns it into per-router
//! forwarding tables (destination → next hop, cost) with Dijkstra. Tables
//! are recomputed from scratch on demand, so link failures are simulated by
//! removing a link and asking again. Packet paths can be replayed from a
//! table or forwarded router by router.
//!
//! Everything here is synchronous and single-threaded: algorithms borrow the
//! graph for the duration of one call and keep nothing afterwards.

mod cost;
mod error;
mod forwarding;
mod graph;
mod spf;
mod topology;
mod trace;

pub use cost::Cost;
pub use error::{Result, RouteError};
pub use forwarding::{
    compute_all_forwarding_tables, compute_forwarding_table, ForwardingEntry, ForwardingTable,
};
pub use graph::{Graph, Link, LinkRecord, NodeId, Weight};
pub use spf::{shortest_path_tree, ShortestPathTree};
pub use topology::{LinkFailure, TopologyConfig};
pub use trace::{route_packet, trace_path, PacketPath};
