//! Referral graph construction and component handling.
//!
//! Nodes are person names, an edge `(a, b)` means "a invited b". Node
//! iteration order is petgraph insertion order, which in turn is ledger row
//! order - this is the deterministic contract that root selection and
//! ranking tie-breaks rely on.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::error::{LedgerError, Result};
use crate::karma::KarmaIndex;
use crate::types::PersonRecord;

/// Directed graph of referral edges, with a name index for lookups.
#[derive(Debug, Default, Clone)]
pub struct ReferralGraph {
    graph: DiGraph<String, ()>,
    indices: HashMap<String, NodeIndex>,
}

impl ReferralGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph and the karma index from parsed records.
    ///
    /// Every person becomes a node exactly once; edges are added from
    /// `invited_by -> name` and `name -> each invitee`. Edge endpoints naming
    /// a person with no ledger row of their own still create nodes (and such
    /// nodes get no karma entry). Duplicate edges collapse: a link described
    /// both by the inviter's row and the invitee's row is stored once.
    pub fn from_records(records: &[PersonRecord]) -> (Self, KarmaIndex) {
        let mut graph = Self::new();
        let mut karma = KarmaIndex::new();

        for record in records {
            graph.intern(&record.name);
            karma.insert(&record.name, record.karma);
        }

        for record in records {
            let person = graph.intern(&record.name);
            if let Some(ref inviter) = record.invited_by {
                let inviter = graph.intern(inviter);
                graph.add_edge(inviter, person);
            }
            for invitee in &record.invited {
                let invitee = graph.intern(invitee);
                graph.add_edge(person, invitee);
            }
        }

        (graph, karma)
    }

    /// Look up or create the node for `name`. Idempotent on repeated names.
    pub fn intern(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.indices.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.indices.insert(name.to_string(), idx);
        idx
    }

    fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        self.graph.update_edge(from, to, ());
    }

    /// Access the underlying petgraph structure (for DOT export).
    pub fn inner(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn name(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.indices.get(name).copied()
    }

    /// Nodes in insertion order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors_directed(idx, Direction::Incoming).count()
    }

    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors_directed(idx, Direction::Outgoing).count()
    }

    /// Edges as `(source, target)` node pairs.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.graph.edge_references().map(|e| (e.source(), e.target()))
    }

    /// Weakly-connected components, largest first.
    ///
    /// Within a component, nodes keep insertion order; the size sort is
    /// stable, so equally-sized components keep the order of their first
    /// nodes.
    pub fn components(&self) -> Vec<Vec<NodeIndex>> {
        let mut sets = UnionFind::<usize>::new(self.graph.node_count());
        for (source, target) in self.edges() {
            sets.union(source.index(), target.index());
        }

        let mut by_root: HashMap<usize, usize> = HashMap::new();
        let mut components: Vec<Vec<NodeIndex>> = Vec::new();
        for idx in self.graph.node_indices() {
            let root = sets.find(idx.index());
            let slot = *by_root.entry(root).or_insert_with(|| {
                components.push(Vec::new());
                components.len() - 1
            });
            components[slot].push(idx);
        }

        components.sort_by(|a, b| b.len().cmp(&a.len()));
        components
    }

    /// Extract the component of the given size rank (0 = largest) as a fresh
    /// graph, preserving relative insertion order.
    pub fn component_subgraph(&self, rank: usize) -> Result<ReferralGraph> {
        let components = self.components();
        let members = components.get(rank).ok_or(LedgerError::EmptyComponent {
            rank,
            available: components.len(),
        })?;

        let mut sub = ReferralGraph::new();
        for &idx in members {
            sub.intern(self.name(idx));
        }
        for (source, target) in self.edges() {
            if let (Some(s), Some(t)) = (
                sub.node_index(self.name(source)),
                sub.node_index(self.name(target)),
            ) {
                sub.add_edge(s, t);
            }
        }

        Ok(sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::karma::Karma;

    fn record(name: &str, karma: f64, invited_by: Option<&str>, invited: &[&str]) -> PersonRecord {
        PersonRecord {
            name: name.to_string(),
            karma: Karma::Numeric(karma),
            country: String::new(),
            region: String::new(),
            city: String::new(),
            first_seen: String::new(),
            last_seen: String::new(),
            invited_by: invited_by.map(str::to_string),
            invited: invited.iter().map(|i| i.to_string()).collect(),
        }
    }

    #[test]
    fn test_edges_from_both_directions_collapse() {
        // alice's row says she invited bob; bob's row says alice invited him.
        // That is one edge, not two.
        let records = vec![
            record("alice", 10.0, None, &["bob"]),
            record("bob", 5.0, Some("alice"), &[]),
        ];
        let (graph, karma) = ReferralGraph::from_records(&records);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(karma.len(), 2);

        let alice = graph.node_index("alice").unwrap();
        let bob = graph.node_index("bob").unwrap();
        assert_eq!(graph.out_degree(alice), 1);
        assert_eq!(graph.in_degree(bob), 1);
        assert_eq!(graph.in_degree(alice), 0);
    }

    #[test]
    fn test_unknown_endpoints_create_nodes() {
        let records = vec![record("alice", 1.0, Some("ghost"), &["phantom"])];
        let (graph, karma) = ReferralGraph::from_records(&records);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.node_index("ghost").is_some());
        assert!(graph.node_index("phantom").is_some());
        // Edge-only names carry no karma row
        assert!(karma.get("ghost").is_none());
    }

    #[test]
    fn test_node_order_is_ledger_order() {
        let records = vec![
            record("c", 1.0, None, &[]),
            record("a", 1.0, None, &[]),
            record("b", 1.0, None, &[]),
        ];
        let (graph, _) = ReferralGraph::from_records(&records);
        let names: Vec<_> = graph.node_indices().map(|i| graph.name(i)).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_components_sorted_by_size() {
        let records = vec![
            record("solo", 1.0, None, &[]),
            record("a", 1.0, None, &["b", "c"]),
            record("b", 1.0, Some("a"), &[]),
            record("c", 1.0, Some("a"), &[]),
            record("x", 1.0, None, &["y"]),
            record("y", 1.0, Some("x"), &[]),
        ];
        let (graph, _) = ReferralGraph::from_records(&records);
        let components = graph.components();

        let sizes: Vec<_> = components.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 2, 1]);
        assert_eq!(graph.name(components[0][0]), "a");
        assert_eq!(graph.name(components[2][0]), "solo");
    }

    #[test]
    fn test_component_subgraph_preserves_order_and_edges() {
        let records = vec![
            record("solo", 1.0, None, &[]),
            record("a", 1.0, None, &["b"]),
            record("b", 1.0, Some("a"), &["c"]),
            record("c", 1.0, Some("b"), &[]),
        ];
        let (graph, _) = ReferralGraph::from_records(&records);

        let sub = graph.component_subgraph(0).unwrap();
        assert_eq!(sub.node_count(), 3);
        assert_eq!(sub.edge_count(), 2);
        let names: Vec<_> = sub.node_indices().map(|i| sub.name(i)).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let smallest = graph.component_subgraph(1).unwrap();
        assert_eq!(smallest.node_count(), 1);
        assert_eq!(smallest.name(smallest.node_indices().next().unwrap()), "solo");
    }

    #[test]
    fn test_component_out_of_range() {
        let (graph, _) = ReferralGraph::from_records(&[record("a", 1.0, None, &[])]);
        let err = graph.component_subgraph(5).unwrap_err();
        match err {
            LedgerError::EmptyComponent { rank, available } => {
                assert_eq!(rank, 5);
                assert_eq!(available, 1);
            }
            other => panic!("expected EmptyComponent, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_graph_has_no_components() {
        let graph = ReferralGraph::new();
        assert!(graph.components().is_empty());
        assert!(matches!(
            graph.component_subgraph(0),
            Err(LedgerError::EmptyComponent { available: 0, .. })
        ));
    }
}
