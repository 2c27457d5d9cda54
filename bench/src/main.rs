mod generators;
mod scenario;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use netroute_core::{compute_forwarding_table, route_packet, trace_path, Cost, Graph, Result};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::generators::{gen_barbell, gen_grid, gen_random, gen_ring, gen_scale_free, node};

/// Forwarding table benchmark and topology replay.
#[derive(Parser, Debug)]
#[command(name = "netroute-bench", version)]
struct Cli {
    /// Log more (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Time forwarding table computation on synthetic topologies
    Bench(BenchArgs),
    /// Replay a topology file: tables, packet path, link failures
    Scenario(ScenarioArgs),
}

#[derive(Args, Debug)]
struct BenchArgs {
    #[arg(long, value_enum, default_value_t = Mode::All)]
    mode: Mode,
    /// Target node count per topology
    #[arg(long, default_value_t = 100_000)]
    nodes: u64,
    /// Number of source routers to compute tables for
    #[arg(long, default_value_t = 5)]
    sources: u64,
}

#[derive(Args, Debug)]
struct ScenarioArgs {
    /// Topology JSON file. Defaults to the built-in six-router network.
    #[arg(long)]
    topology: Option<PathBuf>,
    #[arg(long, default_value = "A")]
    from: String,
    #[arg(long, default_value = "F")]
    to: String,
    /// Print tables and paths as JSON
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Run every generator
    All,
    /// Ring with long chords
    Ring,
    /// Square grid
    Grid,
    /// Uniform random links over a spanning chain
    Random,
    /// Two dense clusters joined by a thin bridge
    Barbell,
    /// Preferential attachment (hub-and-spoke)
    Scalefree,
}

type Generator = fn(u64) -> Result<Graph>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Bench(args) => run_bench(&args),
        Command::Scenario(args) => scenario::run(&scenario::ScenarioOptions {
            topology: args.topology,
            from: args.from,
            to: args.to,
            json: args.json,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "netroute_core=debug,info",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_bench(args: &BenchArgs) -> Result<()> {
    let generators: Vec<(&str, Generator)> = match args.mode {
        Mode::Ring => vec![("Ring with chords", gen_ring)],
        Mode::Grid => vec![("Grid", gen_grid)],
        Mode::Random => vec![("Random mesh", gen_random)],
        Mode::Barbell => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        Mode::Scalefree => vec![("Scale-free (edge sampling)", gen_scale_free)],
        Mode::All => vec![
            ("Ring with chords", gen_ring as Generator),
            ("Grid", gen_grid),
            ("Random mesh", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
            ("Scale-free (edge sampling)", gen_scale_free),
        ],
    };

    println!("netroute-bench");
    println!("==============");
    println!();

    let node_count = args.nodes.max(16);
    for (name, generator) in generators {
        run_benchmark(name, generator, node_count, args.sources.max(1))?;
    }
    Ok(())
}

fn run_benchmark(name: &str, generator: Generator, node_count: u64, sources: u64) -> Result<()> {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count)?;
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s: {} nodes, {} links, ~{:.1}MB",
        gen_time.as_secs_f64(),
        graph.node_count(),
        graph.link_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    println!();
    println!("{:>10} {:>10} {:>12} {:>10}", "source", "reachable", "max cost", "time");
    println!("{:->10} {:->10} {:->12} {:->10}", "", "", "", "");

    let n = graph.node_count() as u64;
    let step = (n / sources).max(1);
    for i in (0..n).step_by(step as usize).take(sources as usize) {
        let source = node(i);
        let t = Instant::now();
        let table = compute_forwarding_table(&graph, &source);
        let elapsed = t.elapsed();
        let max_cost = table.reachable().map(|e| e.cost).max().unwrap_or(Cost::ZERO);
        println!(
            "{:>10} {:>10} {:>12} {:>8.1}ms",
            source,
            table.reachable().count(),
            max_cost,
            elapsed.as_secs_f64() * 1000.0
        );
    }

    // Trace from n0 to its most expensive destination, both ways
    let source = node(0);
    let table = compute_forwarding_table(&graph, &source);
    if let Some(far) = table.reachable().max_by_key(|e| e.cost) {
        println!();
        let t = Instant::now();
        let path = trace_path(&table, &source, &far.destination)?;
        let trace_time = t.elapsed();
        println!(
            "Trace {} -> {}: {} hops, cost {} in {:.3}ms",
            source,
            far.destination,
            path.hop_count(),
            path.cost,
            trace_time.as_secs_f64() * 1000.0
        );

        // Hop-by-hop recomputes a table per router; keep it to small graphs.
        if n <= 20_000 {
            let t = Instant::now();
            let routed = route_packet(&graph, &source, &far.destination)?;
            println!(
                "Routed {} -> {}: {} hops, cost {} in {:.1}ms",
                source,
                far.destination,
                routed.hop_count(),
                routed.cost,
                t.elapsed().as_secs_f64() * 1000.0
            );
        }
    }
    println!();
    Ok(())
}
