use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RouteError};

/// Interned node index. Assigned in first-seen order.
pub type NodeId = u32;

/// Link weight. Always positive once installed.
pub type Weight = u32;

/// One direction of an undirected link in the adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub target: NodeId,
    pub weight: Weight,
}

/// A link as supplied by a loader: endpoints by label plus the raw weight.
///
/// The weight is signed so that zero and negative values coming from a
/// topology file reach `add_link` and get rejected there with a clear error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub from: String,
    pub to: String,
    pub weight: i64,
}

/// Undirected weighted network topology.
///
/// Node labels are interned to compact `NodeId`s; `labels[id]` is the label
/// and `adjacency[id]` its neighbour list. Every link is stored twice, once
/// per endpoint, with equal weight.
#[derive(Debug, Clone)]
pub struct Graph {
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
    adjacency: Vec<Vec<Link>>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
        }
    }

    /// Pre-allocate for a known number of nodes.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            labels: Vec::with_capacity(node_count),
            index: HashMap::with_capacity(node_count),
            adjacency: Vec::with_capacity(node_count),
        }
    }

    /// Intern a node label, returning its id. Existing labels keep their id.
    pub fn add_node(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = self.labels.len() as NodeId;
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        self.adjacency.push(Vec::new());
        id
    }

    /// Install an undirected link between `a` and `b`.
    ///
    /// Calling this twice for the same pair creates a parallel link; the
    /// shortest-path search only ever uses the cheaper one.
    pub fn add_link(&mut self, a: &str, b: &str, weight: i64) -> Result<()> {
        let weight = match Weight::try_from(weight) {
            Ok(w) if w > 0 => w,
            _ => {
                return Err(RouteError::InvalidWeight {
                    from: a.to_string(),
                    to: b.to_string(),
                    weight,
                })
            }
        };

        let ia = self.add_node(a);
        let ib = self.add_node(b);
        self.adjacency[ia as usize].push(Link { target: ib, weight });
        self.adjacency[ib as usize].push(Link { target: ia, weight });
        debug!(from = a, to = b, weight, "link added");
        Ok(())
    }

    /// Remove every link between `a` and `b`, in both directions.
    ///
    /// Returns the number of undirected links removed. Missing links or
    /// unknown nodes are a no-op. Both endpoints stay in the node set.
    pub fn remove_link(&mut self, a: &str, b: &str) -> usize {
        let (ia, ib) = match (self.resolve(a), self.resolve(b)) {
            (Some(ia), Some(ib)) => (ia, ib),
            _ => return 0,
        };

        let removed = Self::retain_not_target(&mut self.adjacency[ia as usize], ib);
        if ia != ib {
            Self::retain_not_target(&mut self.adjacency[ib as usize], ia);
        }
        // A self-loop is stored twice in the same list.
        let removed = if ia == ib { removed / 2 } else { removed };

        if removed > 0 {
            debug!(from = a, to = b, removed, "link removed");
        }
        removed
    }

    fn retain_not_target(links: &mut Vec<Link>, target: NodeId) -> usize {
        let before = links.len();
        links.retain(|l| l.target != target);
        before - links.len()
    }

    /// Bulk load links. Stops at the first invalid weight; links before it
    /// stay installed. Returns the number of links added.
    pub fn load_links<I>(&mut self, links: I) -> Result<usize>
    where
        I: IntoIterator<Item = LinkRecord>,
    {
        let mut added = 0;
        for rec in links {
            self.add_link(&rec.from, &rec.to, rec.weight)?;
            added += 1;
        }
        Ok(added)
    }

    /// All node labels in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|s| s.as_str())
    }

    pub fn contains_node(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Look up the interned id of a label.
    pub fn resolve(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// Resolve an id back to its label.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.labels.get(id as usize).map(|s| s.as_str())
    }

    /// Adjacency slice for an interned node. Empty for out-of-range ids.
    pub fn links(&self, id: NodeId) -> &[Link] {
        self.adjacency
            .get(id as usize)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Neighbours of `label` with link weights, in insertion order.
    /// Parallel links appear once per link. Empty for unknown labels.
    pub fn neighbors(&self, label: &str) -> Vec<(&str, Weight)> {
        let Some(id) = self.resolve(label) else {
            return Vec::new();
        };
        self.links(id)
            .iter()
            .map(|l| (self.labels[l.target as usize].as_str(), l.weight))
            .collect()
    }

    pub fn has_link(&self, a: &str, b: &str) -> bool {
        self.link_weight(a, b).is_some()
    }

    /// Cheapest weight among the links between `a` and `b`.
    pub fn link_weight(&self, a: &str, b: &str) -> Option<Weight> {
        let ia = self.resolve(a)?;
        let ib = self.resolve(b)?;
        self.links(ia)
            .iter()
            .filter(|l| l.target == ib)
            .map(|l| l.weight)
            .min()
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of undirected links, parallel links counted individually.
    pub fn link_count(&self) -> usize {
        let stored: usize = self.adjacency.iter().map(|v| v.len()).sum();
        stored / 2
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let label_mem: usize = self
            .labels
            .iter()
            .map(|l| size_of::<String>() + l.len())
            .sum();
        // Index holds a second copy of each label plus the id and hash overhead.
        let index_mem = label_mem + self.index.len() * (size_of::<NodeId>() + 16);
        let link_mem: usize = self
            .adjacency
            .iter()
            .map(|v| size_of::<Vec<Link>>() + v.len() * size_of::<Link>())
            .sum();

        label_mem + index_mem + link_mem
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
