//! Configuration loading from karmap.toml.
//!
//! All knobs have in-code defaults matching the reference behavior; a
//! `karmap.toml` next to the input file (or in the working directory) can
//! override any of them.
//!
//! ## Example
//!
//! ```toml
//! label-limit = 25
//! node-size-scale = 20.0
//! image-width = 1600
//! image-height = 1200
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Rendering and ranking configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Source file for this config (for display).
    pub source: Option<PathBuf>,

    /// Maximum number of labeled nodes.
    pub label_limit: usize,

    /// Score weight per outgoing referral edge.
    pub out_degree_weight: f64,

    /// Score bonus for the root node. Large enough to dominate any organic
    /// score so the root is always labeled when one exists.
    pub root_bonus: f64,

    /// Multiplier applied to the per-node size before drawing.
    pub node_size_scale: f64,

    /// Number of force-simulation steps for the layout.
    pub layout_iterations: usize,

    /// Output image dimensions in pixels.
    pub image_width: u32,
    pub image_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            label_limit: 25,
            out_degree_weight: 10.0,
            root_bonus: 1000.0,
            node_size_scale: 20.0,
            layout_iterations: 300,
            image_width: 1600,
            image_height: 1200,
        }
    }
}

/// Raw config as deserialized from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
    label_limit: Option<usize>,
    out_degree_weight: Option<f64>,
    root_bonus: Option<f64>,
    node_size_scale: Option<f64>,
    layout_iterations: Option<usize>,
    image_width: Option<u32>,
    image_height: Option<u32>,
}

impl Config {
    /// Load configuration, searching for `karmap.toml` in the given
    /// directories in order. Falls back to defaults if none found or a file
    /// fails to parse.
    pub fn load(search_dirs: &[&Path]) -> Self {
        for dir in search_dirs {
            let candidate = dir.join("karmap.toml");
            if candidate.exists() {
                if let Some(config) = Self::load_file(&candidate) {
                    return config;
                }
            }
        }
        Self::default()
    }

    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let raw: RawConfig = toml::from_str(&content).ok()?;
        Some(Self::from_raw(raw, path.to_path_buf()))
    }

    fn from_raw(raw: RawConfig, source: PathBuf) -> Self {
        let defaults = Self::default();
        Self {
            source: Some(source),
            label_limit: raw.label_limit.unwrap_or(defaults.label_limit),
            out_degree_weight: raw.out_degree_weight.unwrap_or(defaults.out_degree_weight),
            root_bonus: raw.root_bonus.unwrap_or(defaults.root_bonus),
            node_size_scale: raw.node_size_scale.unwrap_or(defaults.node_size_scale),
            layout_iterations: raw.layout_iterations.unwrap_or(defaults.layout_iterations),
            image_width: raw.image_width.unwrap_or(defaults.image_width),
            image_height: raw.image_height.unwrap_or(defaults.image_height),
        }
    }

    /// Format config for verbose display.
    pub fn display_summary(&self) -> String {
        let mut lines = Vec::new();

        if let Some(ref source) = self.source {
            lines.push(format!("   Config: {}", source.display()));
        } else {
            lines.push("   Config: (defaults)".to_string());
        }

        lines.push(format!(
            "   Labels: {} max, weights: out-degree x{}, root +{}",
            self.label_limit, self.out_degree_weight, self.root_bonus
        ));
        lines.push(format!(
            "   Image: {}x{} px, node scale x{}, {} layout steps",
            self.image_width, self.image_height, self.node_size_scale, self.layout_iterations
        ));

        lines.join("\n")
    }
}
