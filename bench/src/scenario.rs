//! Replay of a topology file: tables for every router, a packet trace,
//! then the configured link failures and the same again.

use std::path::PathBuf;

use netroute_core::{
    compute_all_forwarding_tables, compute_forwarding_table, trace_path, ForwardingTable, Graph,
    PacketPath, Result, RouteError, TopologyConfig,
};
use serde_json::json;
use tracing::{info, warn};

/// Six-router network used when no topology file is given.
pub const REFERENCE_TOPOLOGY: &str = include_str!("../topologies/reference.json");

pub struct ScenarioOptions {
    pub topology: Option<PathBuf>,
    pub from: String,
    pub to: String,
    pub json: bool,
}

pub fn run(opts: &ScenarioOptions) -> Result<()> {
    let config = match &opts.topology {
        Some(path) => TopologyConfig::from_path(path)?,
        None => TopologyConfig::from_json_str(REFERENCE_TOPOLOGY)?,
    };
    let mut graph = config.build_graph()?;
    for node in [&opts.from, &opts.to] {
        if !graph.contains_node(node) {
            return Err(RouteError::UnknownNode(node.clone()));
        }
    }

    let before = compute_all_forwarding_tables(&graph);
    let path_before = trace(&graph, &opts.from, &opts.to);

    let removed = config.apply_failures(&mut graph);
    info!(failures = config.failures.len(), removed, "link failures applied");

    let after = compute_all_forwarding_tables(&graph);
    let path_after = trace(&graph, &opts.from, &opts.to);

    if opts.json {
        let report = json!({
            "before": { "tables": before, "path": path_before.as_ref().ok() },
            "after": { "tables": after, "path": path_after.as_ref().ok() },
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Forwarding tables:");
    print_tables(&before);
    println!();
    print_path(&opts.from, &opts.to, &path_before);

    for f in &config.failures {
        println!();
        println!("Link failure: {} - {}", f.from, f.to);
    }

    println!();
    println!("Forwarding tables after failures:");
    print_tables(&after);
    println!();
    print_path(&opts.from, &opts.to, &path_after);

    Ok(())
}

fn trace(graph: &Graph, from: &str, to: &str) -> Result<PacketPath> {
    let table = compute_forwarding_table(graph, from);
    trace_path(&table, from, to)
}

fn print_tables(tables: &[ForwardingTable]) {
    for table in tables {
        println!("Router {}:", table.source());
        println!("  {:<12} {:<10} {:>6}", "destination", "next hop", "cost");
        for e in table.iter() {
            println!(
                "  {:<12} {:<10} {:>6}",
                e.destination,
                e.next_hop.as_deref().unwrap_or("-"),
                e.cost
            );
        }
    }
}

fn print_path(from: &str, to: &str, path: &Result<PacketPath>) {
    match path {
        Ok(p) => println!("Packet {} -> {}: {} (cost {})", from, to, p, p.cost),
        Err(e) => {
            warn!(from, to, "packet not delivered");
            println!("Packet {} -> {}: {}", from, to, e);
        }
    }
}
