//! karmap - referral-network cartography.
//!
//! Ingests a semicolon-delimited referral ledger (person, karma, location,
//! invitation chain) and renders the invitation graph as a PNG: nodes sized
//! and colored by karma, a root-anchored layout, labels on the top-scoring
//! nodes.
//!
//! # Architecture
//!
//! ```text
//! Ledger Ingest → Graph Build → Component Select → Rank/Label → Layout → Render
//!       ↓              ↓               ↓               ↓           ↓         ↓
//!    semicolon      petgraph        petgraph        scoring   force_graph plotters
//!    rows           DiGraph         UnionFind        rules     simulation   PNG
//! ```
//!
//! One-shot batch pipeline: no persistence, no concurrency, any failure
//! aborts the run. Node iteration order is ledger insertion order throughout,
//! which makes root selection and ranking tie-breaks deterministic.

pub mod config;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod karma;
pub mod ranking;
pub mod rendering;
pub mod types;

// Re-export core types
pub use config::Config;
pub use error::{LedgerError, Result};
pub use graph::ReferralGraph;
pub use karma::{Karma, KarmaClass, KarmaIndex, SentinelKind};
pub use ranking::{select_root, Ranker};
pub use types::PersonRecord;
