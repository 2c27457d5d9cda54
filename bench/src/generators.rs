//! Synthetic weighted topologies. All O(n) or O(n + links), single-threaded
//! and deterministic for a given node count.

use netroute_core::{Graph, Result};

/// Simple LCG for deterministic, fast pseudo-random numbers.
pub struct FastRng(u64);

impl FastRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }

    /// Link weight in 1..=10.
    pub fn weight(&mut self) -> i64 {
        self.next(10) as i64 + 1
    }
}

pub fn node(i: u64) -> String {
    format!("n{}", i)
}

fn link(graph: &mut Graph, a: u64, b: u64, weight: i64) -> Result<()> {
    graph.add_link(&node(a), &node(b), weight)
}

/// Ring with a chord every 10 nodes. Long paths, few alternatives.
pub fn gen_ring(node_count: u64) -> Result<Graph> {
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(42);

    for i in 0..node_count {
        link(&mut graph, i, (i + 1) % node_count, rng.weight())?;
    }
    for i in (0..node_count).step_by(10) {
        let across = (i + node_count / 2) % node_count;
        link(&mut graph, i, across, rng.weight() * 5)?;
    }

    Ok(graph)
}

/// Square grid, row-major. Many equal-length alternatives.
pub fn gen_grid(node_count: u64) -> Result<Graph> {
    let side = (node_count as f64).sqrt().ceil().max(2.0) as u64;
    let mut graph = Graph::with_capacity((side * side) as usize);
    let mut rng = FastRng::new(67890);

    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            if col + 1 < side {
                link(&mut graph, id, id + 1, rng.weight())?;
            }
            if row + 1 < side {
                link(&mut graph, id, id + side, rng.weight())?;
            }
        }
    }

    Ok(graph)
}

/// Erdos-Renyi style: ~5 uniform random links per node on top of a spanning
/// chain so the graph is connected.
pub fn gen_random(node_count: u64) -> Result<Graph> {
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(54321);

    for i in 1..node_count {
        link(&mut graph, i - 1, i, rng.weight())?;
    }
    for _ in 0..node_count * 5 {
        let a = rng.next(node_count);
        let b = rng.next(node_count);
        if a != b {
            link(&mut graph, a, b, rng.weight())?;
        }
    }

    Ok(graph)
}

/// Barbell: two dense clusters joined by a thin chain of ~10 bridge nodes.
///
/// Every cross-cluster path squeezes through the bridge.
pub fn gen_barbell(node_count: u64) -> Result<Graph> {
    let bridge_len = 10u64;
    let cluster = (node_count.saturating_sub(bridge_len) / 2).max(2);
    let mut graph = Graph::with_capacity((cluster * 2 + bridge_len) as usize);
    let mut rng = FastRng::new(99999);

    let b_start = cluster + bridge_len;
    for base in [0, b_start] {
        for i in 1..cluster {
            link(&mut graph, base + i - 1, base + i, rng.weight())?;
        }
        for i in 0..cluster {
            for _ in 0..10u64.min(cluster - 1) {
                let target = rng.next(cluster);
                if target != i {
                    link(&mut graph, base + i, base + target, rng.weight())?;
                }
            }
        }
    }

    // Bridge: last node of cluster A through the chain to first node of B
    for id in cluster..=b_start {
        link(&mut graph, id - 1, id, 1)?;
    }

    Ok(graph)
}

/// Scale-free via edge-list sampling: each new node attaches to endpoints
/// picked proportionally to degree.
pub fn gen_scale_free(node_count: u64) -> Result<Graph> {
    let links_per_node = 3u64;
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(12345);
    let mut endpoints: Vec<u64> = Vec::with_capacity((node_count * links_per_node * 2) as usize);

    // Seed: small clique
    let seed = 5u64.min(node_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            link(&mut graph, i, j, rng.weight())?;
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        let attach = links_per_node.min(new_node);
        for _ in 0..attach {
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != new_node {
                link(&mut graph, new_node, target, rng.weight())?;
                endpoints.push(new_node);
                endpoints.push(target);
            }
        }
    }

    Ok(graph)
}
