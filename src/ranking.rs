//! Root selection and label ranking.
//!
//! The importance score per node is a handful of arithmetic terms:
//!
//! ```text
//! score(n) = out_degree(n) * 10 + |karma(n)| + 1000 if n is the root
//! ```
//!
//! Sentinel karma contributes nothing. The root bonus dominates any organic
//! score, so the root is always labeled when one exists. Ties keep node
//! insertion order (stable sort over the graph's deterministic node order).

use std::cmp::Ordering;
use std::collections::HashSet;

use petgraph::graph::NodeIndex;

use crate::config::Config;
use crate::graph::ReferralGraph;
use crate::karma::KarmaIndex;

/// First node in insertion order with no incoming referral, or `None` when
/// every node sits on a cycle (or the graph is empty).
///
/// With multiple in-degree-0 nodes (a forest with several sources) the first
/// by insertion order wins; this is a documented limitation, not a tie-break
/// rule.
pub fn select_root(graph: &ReferralGraph) -> Option<NodeIndex> {
    graph.node_indices().find(|&idx| graph.in_degree(idx) == 0)
}

/// Scores nodes and selects the bounded top-set for labeling.
pub struct Ranker {
    out_degree_weight: f64,
    root_bonus: f64,
    label_limit: usize,
}

impl Ranker {
    pub fn new(config: &Config) -> Self {
        Self {
            out_degree_weight: config.out_degree_weight,
            root_bonus: config.root_bonus,
            label_limit: config.label_limit,
        }
    }

    /// Importance score for a single node.
    pub fn score(
        &self,
        graph: &ReferralGraph,
        karma: &KarmaIndex,
        root: Option<NodeIndex>,
        node: NodeIndex,
    ) -> f64 {
        let mut score = graph.out_degree(node) as f64 * self.out_degree_weight;
        score += karma.rank_term_of(graph.name(node));
        if root == Some(node) {
            score += self.root_bonus;
        }
        score
    }

    /// The top `label_limit` nodes by score, descending; ties keep insertion
    /// order. The returned set is the label filter: members display their own
    /// name, everyone else displays nothing.
    pub fn select_labels(
        &self,
        graph: &ReferralGraph,
        karma: &KarmaIndex,
        root: Option<NodeIndex>,
    ) -> HashSet<NodeIndex> {
        let mut ranked: Vec<(NodeIndex, f64)> = graph
            .node_indices()
            .map(|idx| (idx, self.score(graph, karma, root, idx)))
            .collect();

        // Stable sort: equal scores keep insertion order
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        ranked
            .into_iter()
            .take(self.label_limit)
            .map(|(idx, _)| idx)
            .collect()
    }
}
