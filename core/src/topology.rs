use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, RouteError};
use crate::graph::{Graph, LinkRecord};

/// A link to take down after the initial tables are computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkFailure {
    pub from: String,
    pub to: String,
}

/// Topology description loaded from JSON.
///
/// ```json
/// { "links": [ {"from": "A", "to": "B", "weight": 2} ],
///   "failures": [ {"from": "A", "to": "B"} ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopologyConfig {
    pub links: Vec<LinkRecord>,
    #[serde(default)]
    pub failures: Vec<LinkFailure>,
}

impl TopologyConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: TopologyConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            links = config.links.len(),
            failures = config.failures.len(),
            "topology loaded"
        );
        Ok(config)
    }

    /// Reject configs that cannot describe a usable network: no links, empty
    /// labels, or failures naming links that were never configured.
    pub fn validate(&self) -> Result<()> {
        if self.links.is_empty() {
            return Err(RouteError::config("topology has no links"));
        }
        if let Some(l) = self
            .links
            .iter()
            .find(|l| l.from.is_empty() || l.to.is_empty())
        {
            return Err(RouteError::config(format!(
                "link with empty endpoint: '{}' - '{}'",
                l.from, l.to
            )));
        }
        for f in &self.failures {
            let known = self.links.iter().any(|l| {
                (l.from == f.from && l.to == f.to) || (l.from == f.to && l.to == f.from)
            });
            if !known {
                return Err(RouteError::config(format!(
                    "failure names unknown link {} - {}",
                    f.from, f.to
                )));
            }
        }
        Ok(())
    }

    /// Build a graph from the configured links. Failures are not applied.
    pub fn build_graph(&self) -> Result<Graph> {
        let mut graph = Graph::with_capacity(self.links.len() * 2);
        graph.load_links(self.links.iter().cloned())?;
        Ok(graph)
    }

    /// Remove every configured failure from `graph`. Returns links removed.
    pub fn apply_failures(&self, graph: &mut Graph) -> usize {
        self.failures
            .iter()
            .map(|f| graph.remove_link(&f.from, &f.to))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::Cost;
    use crate::forwarding::compute_forwarding_table;

    const REFERENCE: &str = r#"{
        "links": [
            {"from": "A", "to": "B", "weight": 2},
            {"from": "A", "to": "D", "weight": 5},
            {"from": "B", "to": "C", "weight": 2},
            {"from": "B", "to": "E", "weight": 1},
            {"from": "C", "to": "D", "weight": 2},
            {"from": "C", "to": "F", "weight": 3},
            {"from": "E", "to": "F", "weight": 3}
        ],
        "failures": [ {"from": "C", "to": "B"} ]
    }"#;

    #[test]
    fn test_parse_and_build() {
        let config = TopologyConfig::from_json_str(REFERENCE).unwrap();
        assert_eq!(config.links.len(), 7);
        let graph = config.build_graph().unwrap();
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.link_count(), 7);
        assert!(graph.has_link("B", "C"));
    }

    #[test]
    fn test_apply_failures() {
        let config = TopologyConfig::from_json_str(REFERENCE).unwrap();
        let mut graph = config.build_graph().unwrap();
        assert_eq!(config.apply_failures(&mut graph), 1);
        assert!(!graph.has_link("B", "C"));
        assert_eq!(compute_forwarding_table(&graph, "A").cost("F"), Cost::Finite(6));
    }

    #[test]
    fn test_failures_optional() {
        let config =
            TopologyConfig::from_json_str(r#"{"links": [{"from": "a", "to": "b", "weight": 1}]}"#)
                .unwrap();
        assert!(config.failures.is_empty());
    }

    #[test]
    fn test_reject_empty() {
        assert!(matches!(
            TopologyConfig::from_json_str(r#"{"links": []}"#),
            Err(RouteError::Config(_))
        ));
    }

    #[test]
    fn test_reject_unknown_failure() {
        let json = r#"{"links": [{"from": "a", "to": "b", "weight": 1}],
                       "failures": [{"from": "a", "to": "c"}]}"#;
        assert!(matches!(
            TopologyConfig::from_json_str(json),
            Err(RouteError::Config(_))
        ));
    }

    #[test]
    fn test_reject_bad_json() {
        assert!(matches!(
            TopologyConfig::from_json_str("{not json"),
            Err(RouteError::Json(_))
        ));
        assert!(matches!(
            TopologyConfig::from_json_str(r#"{"links": [], "extra": 1}"#),
            Err(RouteError::Json(_))
        ));
    }

    #[test]
    fn test_invalid_weight_surfaces_on_build() {
        let config =
            TopologyConfig::from_json_str(r#"{"links": [{"from": "a", "to": "b", "weight": -4}]}"#)
                .unwrap();
        assert!(matches!(
            config.build_graph(),
            Err(RouteError::InvalidWeight { weight: -4, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            TopologyConfig::from_path("/definitely/not/here.json"),
            Err(RouteError::Io(_))
        ));
    }
}
