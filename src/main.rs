//! karmap CLI - referral-network cartography.
//!
//! Command-line entry point. Orchestrates the full pipeline:
//!
//! 1. Ingest: parse the semicolon-delimited ledger
//! 2. Graph Build: directed referral edges via petgraph
//! 3. Component Select: pick one weakly-connected component
//! 4. Root + Ranking: find the invitation origin, score nodes for labels
//! 5. Layout: root-anchored force simulation
//! 6. Render: PNG via plotters (optionally raw DOT for graphviz)
//!
//! Any parse or data error aborts the run with a message naming the
//! offending line or name; a half-drawn graph is not a useful output.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use karmap::config::Config;
use karmap::graph::ReferralGraph;
use karmap::ingest::read_ledger;
use karmap::ranking::{select_root, Ranker};
use karmap::rendering::{
    compute_layout, export_dot, render_png, terminal_heading, terminal_karma,
};

/// Render a referral ledger as a karma-weighted invitation graph
///
/// karmap reads a semicolon-delimited ledger of people, karma scores and
/// invitation links, and draws one weakly-connected component of the
/// resulting graph: node size and color follow karma, the invitation root
/// anchors the layout, and the highest-scoring nodes get name labels.
///
/// Examples:
///   karmap                          # karma.txt -> karma.png
///   karmap ledger.txt -o out.png    # explicit paths
///   karmap --component 1            # second-largest component
///   karmap --dot graph.dot          # also emit graphviz DOT
#[derive(Parser, Debug)]
#[command(name = "karmap")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Ledger file to read
    ///
    /// Plain text, first line is a header (ignored), then one record per
    /// line: name;karma;country;region;city;first_date;last_date;
    /// invited_by;invited. The karma field is a number or one of the
    /// sentinel tokens RO/DA.
    #[arg(value_name = "LEDGER", default_value = "karma.txt")]
    pub input: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = "karma.png")]
    pub output: PathBuf,

    /// Which weakly-connected component to draw, by size rank
    ///
    /// 0 is the largest component. Components are sorted by node count
    /// descending; equally-sized components keep ledger order.
    #[arg(short, long, default_value = "0")]
    pub component: usize,

    /// Maximum number of labeled nodes
    ///
    /// Overrides the config/default cap (25). The root is always labeled
    /// when one exists.
    #[arg(long)]
    pub labels: Option<usize>,

    /// Also write a graphviz DOT file to this path
    ///
    /// Useful for running a different layout engine (neato, dot) on the
    /// same graph.
    #[arg(long, value_name = "PATH")]
    pub dot: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Verbose output
    ///
    /// Shows progress messages during execution: record counts, graph
    /// size, component choice, root, render target.
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output in the summary
    ///
    /// Useful when piping stdout to a file.
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run(&cli)?;
    println!("{}", summary);
    Ok(())
}

/// Execute the full karmap pipeline and return the terminal summary.
fn run(cli: &Cli) -> Result<String> {
    let color = !cli.no_color;

    // Load configuration: karmap.toml next to the ledger, then cwd
    let cwd = PathBuf::from(".");
    let input_dir = cli.input.parent().map(PathBuf::from).unwrap_or_else(|| cwd.clone());
    let mut config = Config::load(&[input_dir.as_path(), cwd.as_path()]);
    if let Some(limit) = cli.labels {
        config.label_limit = limit;
    }
    if let Some(width) = cli.width {
        config.image_width = width;
    }
    if let Some(height) = cli.height {
        config.image_height = height;
    }

    if cli.verbose {
        eprintln!("🕸️  karmap v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("📄 Ledger: {}", cli.input.display());
        eprintln!("{}", config.display_summary());
    }

    // ══════════════════════════════════════════════════════════════════════
    // Stage 1: Ingest
    // ══════════════════════════════════════════════════════════════════════
    let records = read_ledger(&cli.input)
        .with_context(|| format!("reading ledger {}", cli.input.display()))?;

    if cli.verbose {
        eprintln!("✓ Parsed {} records", records.len());
    }

    // ══════════════════════════════════════════════════════════════════════
    // Stage 2: Graph Build
    // ══════════════════════════════════════════════════════════════════════
    let (full_graph, karma) = ReferralGraph::from_records(&records);

    if cli.verbose {
        eprintln!(
            "✓ Graph: {} nodes, {} edges",
            full_graph.node_count(),
            full_graph.edge_count()
        );
    }

    // ══════════════════════════════════════════════════════════════════════
    // Stage 3: Component Select
    // ══════════════════════════════════════════════════════════════════════
    let component_count = full_graph.components().len();
    let graph = full_graph
        .component_subgraph(cli.component)
        .context("selecting component to draw")?;

    if cli.verbose {
        eprintln!(
            "✓ Components: {} total, drawing #{} ({} nodes)",
            component_count,
            cli.component,
            graph.node_count()
        );
    }

    // ══════════════════════════════════════════════════════════════════════
    // Stage 4: Root + Ranking
    // ══════════════════════════════════════════════════════════════════════
    let root = select_root(&graph);
    let ranker = Ranker::new(&config);
    let labels = ranker.select_labels(&graph, &karma, root);

    if cli.verbose {
        match root {
            Some(idx) => eprintln!("✓ Root: {}", graph.name(idx)),
            None => eprintln!("✓ Root: none (component is cyclic)"),
        }
        eprintln!("✓ Labeling {} nodes", labels.len());
    }

    // ══════════════════════════════════════════════════════════════════════
    // Stage 5: Layout
    // ══════════════════════════════════════════════════════════════════════
    let positions = compute_layout(
        &graph,
        root,
        config.image_width as f64,
        config.image_height as f64,
        config.layout_iterations,
    );

    // ══════════════════════════════════════════════════════════════════════
    // Stage 6: Render
    // ══════════════════════════════════════════════════════════════════════
    if let Some(ref dot_path) = cli.dot {
        export_dot(dot_path, &graph, &karma)
            .with_context(|| format!("writing DOT to {}", dot_path.display()))?;
        if cli.verbose {
            eprintln!("✓ Wrote DOT: {}", dot_path.display());
        }
    }

    render_png(&cli.output, &graph, &karma, &positions, &labels, &config)
        .with_context(|| format!("rendering {}", cli.output.display()))?;

    if cli.verbose {
        eprintln!("🎨 Wrote {}", cli.output.display());
    }

    Ok(summarize(
        &graph, &karma, root, &labels, component_count, cli, &ranker, color,
    ))
}

/// Build the stdout summary: counts, root, and the labeled nodes with their
/// class-colored karma, highest score first.
#[allow(clippy::too_many_arguments)]
fn summarize(
    graph: &ReferralGraph,
    karma: &karmap::KarmaIndex,
    root: Option<petgraph::graph::NodeIndex>,
    labels: &std::collections::HashSet<petgraph::graph::NodeIndex>,
    component_count: usize,
    cli: &Cli,
    ranker: &Ranker,
    color: bool,
) -> String {
    let mut lines = Vec::new();

    lines.push(terminal_heading(
        &format!("{} -> {}", cli.input.display(), cli.output.display()),
        color,
    ));
    lines.push(format!(
        "component #{} of {}: {} nodes, {} edges, root: {}",
        cli.component,
        component_count,
        graph.node_count(),
        graph.edge_count(),
        root.map(|idx| graph.name(idx).to_string())
            .unwrap_or_else(|| "none".to_string()),
    ));

    // Labeled nodes, highest score first
    let mut labeled: Vec<_> = labels
        .iter()
        .map(|&idx| (idx, ranker.score(graph, karma, root, idx)))
        .collect();
    labeled.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    lines.push(terminal_heading("labeled:", color));
    for (idx, score) in labeled {
        let name = graph.name(idx);
        let karma_text = match karma.get(name) {
            Some(karmap::Karma::Sentinel(karmap::SentinelKind::ReadOnly)) => "RO".to_string(),
            Some(karmap::Karma::Sentinel(karmap::SentinelKind::Deactivated)) => "DA".to_string(),
            Some(k) => format!("{}", k.value()),
            None => "-".to_string(),
        };
        lines.push(format!(
            "  {:<24} karma {:>8}  score {:.0}",
            name,
            terminal_karma(karma.class_of(name), &karma_text, color),
            score,
        ));
    }

    lines.join("\n")
}
