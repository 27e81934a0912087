//! Root-anchored force-directed layout.
//!
//! Delegates the physics to the `force_graph` crate: nodes are seeded on a
//! circle around the canvas center, the root (when one exists) is anchored at
//! the center, and every referral edge becomes a spring. The simulation is
//! stepped a fixed number of times, then positions are normalized into the
//! image rectangle. Deterministic for identical input order: seeding has no
//! randomness and the simulation itself is deterministic.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use petgraph::graph::NodeIndex;

use crate::graph::ReferralGraph;

const SIMULATION_DT: f32 = 1.0 / 60.0;
const LAYOUT_PADDING: f64 = 60.0;

/// Compute per-node positions in image coordinates.
///
/// Returns an empty map for an empty graph.
pub fn compute_layout(
    graph: &ReferralGraph,
    root: Option<NodeIndex>,
    width: f64,
    height: f64,
    iterations: usize,
) -> HashMap<NodeIndex, (f64, f64)> {
    let node_count = graph.node_count();
    if node_count == 0 {
        return HashMap::new();
    }

    let mut sim = ForceGraph::<NodeIndex, ()>::new(SimulationParameters {
        force_charge: 150.0,
        force_spring: 0.05,
        force_max: 100.0,
        node_speed: 3000.0,
        damping_factor: 0.9,
    });

    let (cx, cy) = (width / 2.0, height / 2.0);
    let seed_radius = width.min(height) / 4.0;

    let mut sim_index = HashMap::new();
    for (i, idx) in graph.node_indices().enumerate() {
        let is_root = root == Some(idx);
        let (x, y) = if is_root {
            (cx as f32, cy as f32)
        } else {
            let angle = i as f64 * 2.0 * PI / node_count as f64;
            (
                (cx + seed_radius * angle.cos()) as f32,
                (cy + seed_radius * angle.sin()) as f32,
            )
        };
        let handle = sim.add_node(NodeData {
            x,
            y,
            mass: 10.0,
            is_anchor: is_root,
            user_data: idx,
        });
        sim_index.insert(idx, handle);
    }

    for (source, target) in graph.edges() {
        if let (Some(&s), Some(&t)) = (sim_index.get(&source), sim_index.get(&target)) {
            sim.add_edge(s, t, EdgeData::default());
        }
    }

    for _ in 0..iterations {
        sim.update(SIMULATION_DT);
    }

    let mut positions = HashMap::with_capacity(node_count);
    sim.visit_nodes(|node| {
        positions.insert(node.data.user_data, (node.x() as f64, node.y() as f64));
    });

    normalize(positions, width, height)
}

/// Fit raw simulation positions into the padded image rectangle.
fn normalize(
    positions: HashMap<NodeIndex, (f64, f64)>,
    width: f64,
    height: f64,
) -> HashMap<NodeIndex, (f64, f64)> {
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for &(x, y) in positions.values() {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    // Degenerate spans (single node, or a fully collapsed axis) map to center
    let span_x = (max_x - min_x).max(1e-9);
    let span_y = (max_y - min_y).max(1e-9);
    let target_w = (width - 2.0 * LAYOUT_PADDING).max(1.0);
    let target_h = (height - 2.0 * LAYOUT_PADDING).max(1.0);

    positions
        .into_iter()
        .map(|(idx, (x, y))| {
            let nx = LAYOUT_PADDING + (x - min_x) / span_x * target_w;
            let ny = LAYOUT_PADDING + (y - min_y) / span_y * target_h;
            (idx, (nx, ny))
        })
        .collect()
}
