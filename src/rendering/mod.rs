//! Graph rendering - PNG output via plotters, DOT export via petgraph.
//!
//! The renderer consumes only derived attributes: a position per node, a size
//! and color class from karma, and the label set from ranking. Edges are
//! drawn in a constant light gray with arrowheads pointing at the invitee.

mod colors;
mod layout;

pub use colors::{node_color, terminal_heading, terminal_karma};
pub use layout::compute_layout;

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;
use std::path::Path;

use anyhow::Result;
use petgraph::dot::{Config as DotConfig, Dot};
use petgraph::graph::NodeIndex;
use plotters::prelude::*;

use crate::config::Config;
use crate::graph::ReferralGraph;
use crate::karma::{KarmaClass, KarmaIndex};

const ARROW_SIZE: f64 = 8.0;
const LABEL_FONT_SIZE: u32 = 10;

/// Pixel radius for a node's size attribute.
///
/// The size attribute is an area (matching the reference tool's semantics of
/// `scale * max(1, sqrt(|karma|))`), so the drawn radius grows with its
/// square root. Minimum 1 pixel.
pub fn node_radius(size_attr: f64) -> f64 {
    (size_attr / PI).sqrt().max(1.0)
}

/// Render the graph to a PNG image.
pub fn render_png(
    path: &Path,
    graph: &ReferralGraph,
    karma: &KarmaIndex,
    positions: &HashMap<NodeIndex, (f64, f64)>,
    labels: &HashSet<NodeIndex>,
    config: &Config,
) -> Result<()> {
    let area = BitMapBackend::new(path, (config.image_width, config.image_height))
        .into_drawing_area();
    area.fill(&WHITE)?;

    // Edges first so nodes draw on top
    for (source, target) in graph.edges() {
        let (Some(&(x1, y1)), Some(&(x2, y2))) = (positions.get(&source), positions.get(&target))
        else {
            continue;
        };

        let (dx, dy) = (x2 - x1, y2 - y1);
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < 0.001 {
            continue;
        }
        let (ux, uy) = (dx / dist, dy / dist);

        let source_radius = node_radius(config.node_size_scale * karma.size_of(graph.name(source)));
        let target_radius = node_radius(config.node_size_scale * karma.size_of(graph.name(target)));

        // Shaft runs from the source circle boundary to the arrowhead base
        let (sx, sy) = (x1 + ux * source_radius, y1 + uy * source_radius);
        let (tip_x, tip_y) = (x2 - ux * target_radius, y2 - uy * target_radius);
        let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
        area.draw(&PathElement::new(
            vec![(sx as i32, sy as i32), (back_x as i32, back_y as i32)],
            colors::EDGE,
        ))?;

        // Filled triangular arrowhead at the target
        let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
        area.draw(&Polygon::new(
            vec![
                (tip_x as i32, tip_y as i32),
                ((back_x + px) as i32, (back_y + py) as i32),
                ((back_x - px) as i32, (back_y - py) as i32),
            ],
            colors::EDGE.filled(),
        ))?;
    }

    for idx in graph.node_indices() {
        let Some(&(x, y)) = positions.get(&idx) else {
            continue;
        };
        let name = graph.name(idx);
        let radius = node_radius(config.node_size_scale * karma.size_of(name));
        let color = node_color(karma.class_of(name));

        area.draw(&Circle::new(
            (x as i32, y as i32),
            radius as i32,
            color.filled(),
        ))?;

        if labels.contains(&idx) {
            area.draw(&Text::new(
                name.to_string(),
                ((x + radius + 3.0) as i32, (y - 5.0) as i32),
                ("sans-serif", LABEL_FONT_SIZE).into_font().color(&BLACK),
            ))?;
        }
    }

    area.present()?;
    Ok(())
}

/// Graphviz DOT rendition of the graph, colored by karma class, unlabeled
/// edges in light gray. For users who want to run their own layout engine.
pub fn dot_string(graph: &ReferralGraph, karma: &KarmaIndex) -> String {
    let node_attrs = |_: &_, (_, name): (NodeIndex, &String)| {
        let color = match karma.class_of(name) {
            KarmaClass::Neutral => "darkgray",
            KarmaClass::Positive => "green",
            KarmaClass::Negative => "red",
            KarmaClass::Zero => "blue",
        };
        format!("label=\"{}\" color={}", name, color)
    };
    let dot = Dot::with_attr_getters(
        graph.inner(),
        &[DotConfig::EdgeNoLabel, DotConfig::NodeNoLabel],
        &|_, _| "color=lightgrey".to_string(),
        &node_attrs,
    );
    format!("{:?}", dot)
}

/// Write the DOT rendition to a file.
pub fn export_dot(path: &Path, graph: &ReferralGraph, karma: &KarmaIndex) -> Result<()> {
    std::fs::write(path, dot_string(graph, karma))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::karma::Karma;
    use crate::types::PersonRecord;

    fn record(name: &str, karma: &str, invited_by: Option<&str>) -> PersonRecord {
        PersonRecord {
            name: name.to_string(),
            karma: Karma::parse(karma).unwrap(),
            country: String::new(),
            region: String::new(),
            city: String::new(),
            first_seen: String::new(),
            last_seen: String::new(),
            invited_by: invited_by.map(str::to_string),
            invited: Vec::new(),
        }
    }

    #[test]
    fn test_node_radius_floor_and_growth() {
        assert_eq!(node_radius(0.0), 1.0);
        assert_eq!(node_radius(1.0), 1.0);
        // Monotone in the size attribute
        assert!(node_radius(20.0) < node_radius(200.0));
        assert!(node_radius(200.0) < node_radius(2000.0));
    }

    #[test]
    fn test_dot_string_includes_names_and_classes() {
        let records = vec![
            record("alice", "100", None),
            record("bob", "-5", Some("alice")),
            record("carol", "RO", Some("alice")),
        ];
        let (graph, karma) = ReferralGraph::from_records(&records);
        let dot = dot_string(&graph, &karma);

        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("label=\"alice\" color=green"));
        assert!(dot.contains("label=\"bob\" color=red"));
        assert!(dot.contains("label=\"carol\" color=darkgray"));
        assert!(dot.contains("color=lightgrey"));
    }

    #[test]
    fn test_dot_string_zero_class_is_blue() {
        let (graph, karma) = ReferralGraph::from_records(&[record("z", "0", None)]);
        assert!(dot_string(&graph, &karma).contains("label=\"z\" color=blue"));
    }
}
