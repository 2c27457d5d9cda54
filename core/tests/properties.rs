//! Property tests over small random topologies, checked against a
//! brute-force Bellman-Ford relaxation.

use netroute_core::{
    compute_forwarding_table, route_packet, shortest_path_tree, trace_path, Cost, Graph,
    RouteError,
};
use proptest::prelude::*;

type Links = Vec<(usize, usize, i64)>;

fn label(i: usize) -> String {
    format!("r{}", i)
}

fn build(n: usize, links: &Links) -> Graph {
    let mut g = Graph::with_capacity(n);
    for i in 0..n {
        g.add_node(&label(i));
    }
    for &(a, b, w) in links {
        g.add_link(&label(a), &label(b), w).unwrap();
    }
    g
}

fn bellman_ford(n: usize, links: &Links, source: usize) -> Vec<Option<u64>> {
    let mut dist: Vec<Option<u64>> = vec![None; n];
    dist[source] = Some(0);
    for _ in 0..n {
        for &(a, b, w) in links {
            for (u, v) in [(a, b), (b, a)] {
                if let Some(du) = dist[u] {
                    let cand = du + w as u64;
                    if dist[v].map_or(true, |dv| cand < dv) {
                        dist[v] = Some(cand);
                    }
                }
            }
        }
    }
    dist
}

prop_compose! {
    fn arb_topology()(n in 1usize..9)
        (n in Just(n), links in prop::collection::vec((0..n, 0..n, 1i64..20), 0..24))
        -> (usize, Links)
    {
        (n, links)
    }
}

proptest! {
    /// Table costs match exhaustive relaxation for every source.
    #[test]
    fn costs_match_bellman_ford((n, links) in arb_topology()) {
        let g = build(n, &links);
        for s in 0..n {
            let table = compute_forwarding_table(&g, &label(s));
            let expected = bellman_ford(n, &links, s);
            prop_assert_eq!(table.len(), n);
            for (d, exp) in expected.iter().enumerate() {
                prop_assert_eq!(table.cost(&label(d)), Cost::from(*exp));
            }
        }
    }

    /// Source row is always cost 0 with no next hop.
    #[test]
    fn source_row_is_zero((n, links) in arb_topology(), s in 0usize..9) {
        let g = build(n, &links);
        let s = label(s % n);
        let row = compute_forwarding_table(&g, &s).get(&s).cloned().unwrap();
        prop_assert_eq!(row.cost, Cost::ZERO);
        prop_assert_eq!(row.next_hop, None);
    }

    /// Traced paths are walkable, cost what the table says, start with the
    /// table's next hop, and have one hop per predecessor link.
    #[test]
    fn traced_paths_are_consistent((n, links) in arb_topology(), s in 0usize..9) {
        let g = build(n, &links);
        let src = label(s % n);
        let table = compute_forwarding_table(&g, &src);
        let spt = shortest_path_tree(&g, &src).unwrap();

        for entry in table.iter() {
            let dst = entry.destination.as_str();
            match trace_path(&table, &src, dst) {
                Ok(path) => {
                    prop_assert_eq!(Cost::Finite(path.cost), entry.cost);

                    let walked: u64 = path
                        .hops
                        .windows(2)
                        .map(|w| u64::from(g.link_weight(&w[0], &w[1]).unwrap()))
                        .sum();
                    prop_assert_eq!(walked, path.cost);

                    let mut preds = 0;
                    let mut cur = dst;
                    while let Some(p) = spt.predecessor(cur) {
                        preds += 1;
                        cur = p;
                    }
                    prop_assert_eq!(path.hop_count(), preds);

                    if dst != src {
                        prop_assert_eq!(Some(path.hops[1].as_str()), entry.next_hop.as_deref());
                    }
                }
                Err(RouteError::NoPath { .. }) => {
                    prop_assert_eq!(entry.cost, Cost::Unreachable);
                    prop_assert_eq!(entry.next_hop.as_deref(), None);
                }
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }
    }

    /// Hop-by-hop forwarding reaches the destination at the table's cost.
    #[test]
    fn hop_by_hop_matches_table((n, links) in arb_topology(), s in 0usize..9) {
        let g = build(n, &links);
        let src = label(s % n);
        let table = compute_forwarding_table(&g, &src);
        for entry in table.iter() {
            match route_packet(&g, &src, &entry.destination) {
                Ok(path) => prop_assert_eq!(Cost::Finite(path.cost), entry.cost),
                Err(_) => prop_assert_eq!(entry.cost, Cost::Unreachable),
            }
        }
    }

    /// Recomputing without mutation gives the same table.
    #[test]
    fn recomputation_is_idempotent((n, links) in arb_topology(), s in 0usize..9) {
        let g = build(n, &links);
        let src = label(s % n);
        prop_assert_eq!(compute_forwarding_table(&g, &src), compute_forwarding_table(&g, &src));
    }

    /// Removing a link never makes anything cheaper, and removing a link
    /// outside the shortest-path tree changes no cost.
    #[test]
    fn link_removal_is_monotone((n, links) in arb_topology(), s in 0usize..9, pick in 0usize..24) {
        prop_assume!(!links.is_empty());
        let mut g = build(n, &links);
        let src = label(s % n);
        let before = compute_forwarding_table(&g, &src);

        let (a, b, _) = links[pick % links.len()];
        let (a, b) = (label(a), label(b));
        let in_tree = before.iter().any(|e| {
            let p = e.predecessor.as_deref();
            (e.destination == a && p == Some(b.as_str()))
                || (e.destination == b && p == Some(a.as_str()))
        });

        g.remove_link(&a, &b);
        let after = compute_forwarding_table(&g, &src);

        for entry in before.iter() {
            let now = after.cost(&entry.destination);
            prop_assert!(now >= entry.cost);
            if !in_tree {
                prop_assert_eq!(now, entry.cost);
            }
        }
    }

    /// add_link installs both directions with the same weight.
    #[test]
    fn links_are_symmetric((n, links) in arb_topology()) {
        let g = build(n, &links);
        for &(a, b, w) in &links {
            let (a, b) = (label(a), label(b));
            prop_assert!(g.neighbors(&a).contains(&(b.as_str(), w as u32)));
            prop_assert!(g.neighbors(&b).contains(&(a.as_str(), w as u32)));
        }
    }
}
