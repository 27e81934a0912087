//! Karma classification.
//!
//! The ledger's karma field is either a numeric reputation score or one of two
//! sentinel tokens (`"RO"`, `"DA"`) meaning "karma not applicable". Sentinels
//! are not zero karma: a genuinely zero score classifies as [`KarmaClass::Zero`]
//! while sentinels classify as [`KarmaClass::Neutral`]. All size/color/rank
//! rules live on [`Karma`] so the three call sites cannot drift apart.

use std::collections::HashMap;

/// Sentinel kinds embedded in the karma field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentinelKind {
    /// `"RO"` - read-only account.
    ReadOnly,
    /// `"DA"` - deactivated account.
    Deactivated,
}

/// A parsed karma field: sentinel or numeric score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Karma {
    Sentinel(SentinelKind),
    Numeric(f64),
}

/// Display class derived from karma, used for node coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KarmaClass {
    /// Sentinel karma (or no karma row at all).
    Neutral,
    Positive,
    Negative,
    Zero,
}

impl Karma {
    /// Parse a trimmed karma token. Returns `None` if the token is neither a
    /// recognized sentinel nor a valid float.
    pub fn parse(token: &str) -> Option<Karma> {
        match token {
            "RO" => Some(Karma::Sentinel(SentinelKind::ReadOnly)),
            "DA" => Some(Karma::Sentinel(SentinelKind::Deactivated)),
            _ => token.parse::<f64>().ok().map(Karma::Numeric),
        }
    }

    /// Numeric value: sentinels collapse to 0.0.
    pub fn value(self) -> f64 {
        match self {
            Karma::Sentinel(_) => 0.0,
            Karma::Numeric(v) => v,
        }
    }

    /// Display class. The 0.0 boundary is exact: only a true zero score is
    /// `Zero`, sentinels are always `Neutral`.
    pub fn class(self) -> KarmaClass {
        match self {
            Karma::Sentinel(_) => KarmaClass::Neutral,
            Karma::Numeric(v) if v > 0.0 => KarmaClass::Positive,
            Karma::Numeric(v) if v < 0.0 => KarmaClass::Negative,
            Karma::Numeric(_) => KarmaClass::Zero,
        }
    }

    /// Unscaled node size: `max(1, sqrt(|value|))`. Sentinel karma always
    /// yields the minimum visual weight of 1.
    pub fn node_size(self) -> f64 {
        match self {
            Karma::Sentinel(_) => 1.0,
            Karma::Numeric(v) => v.abs().sqrt().max(1.0),
        }
    }

    /// Contribution to the label-ranking score: `|value|`, or 0 for sentinels.
    pub fn rank_term(self) -> f64 {
        match self {
            Karma::Sentinel(_) => 0.0,
            Karma::Numeric(v) => v.abs(),
        }
    }
}

/// Name-keyed karma lookup built alongside the referral graph.
///
/// Names that appear only as edge endpoints (an invitee with no ledger row of
/// their own) have no karma entry; lookups for them fall back to neutral
/// treatment: minimum size, gray color, zero rank contribution.
#[derive(Debug, Default, Clone)]
pub struct KarmaIndex {
    by_name: HashMap<String, Karma>,
}

impl KarmaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, karma: Karma) {
        self.by_name.insert(name.to_string(), karma);
    }

    pub fn get(&self, name: &str) -> Option<Karma> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Display class for a node, `Neutral` when no karma row exists.
    pub fn class_of(&self, name: &str) -> KarmaClass {
        self.get(name).map(Karma::class).unwrap_or(KarmaClass::Neutral)
    }

    /// Unscaled node size, minimum 1 when no karma row exists.
    pub fn size_of(&self, name: &str) -> f64 {
        self.get(name).map(Karma::node_size).unwrap_or(1.0)
    }

    /// Ranking contribution, 0 when no karma row exists.
    pub fn rank_term_of(&self, name: &str) -> f64 {
        self.get(name).map(Karma::rank_term).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_neutral_not_zero() {
        let ro = Karma::parse("RO").unwrap();
        let da = Karma::parse("DA").unwrap();
        let zero = Karma::parse("0").unwrap();

        assert_eq!(ro, Karma::Sentinel(SentinelKind::ReadOnly));
        assert_eq!(da, Karma::Sentinel(SentinelKind::Deactivated));

        assert_eq!(ro.value(), 0.0);
        assert_eq!(da.value(), 0.0);
        assert_eq!(ro.class(), KarmaClass::Neutral);
        assert_eq!(da.class(), KarmaClass::Neutral);

        // Genuine zero is a distinct class
        assert_eq!(zero.class(), KarmaClass::Zero);
        assert_eq!(zero.value(), 0.0);
    }

    #[test]
    fn test_numeric_parse_and_sign_boundary() {
        assert_eq!(Karma::parse("42.5").unwrap().value(), 42.5);
        assert_eq!(Karma::parse("-17").unwrap().value(), -17.0);

        assert_eq!(Karma::parse("0.001").unwrap().class(), KarmaClass::Positive);
        assert_eq!(Karma::parse("-0.001").unwrap().class(), KarmaClass::Negative);
        assert_eq!(Karma::parse("0.0").unwrap().class(), KarmaClass::Zero);
    }

    #[test]
    fn test_invalid_token_rejected() {
        assert!(Karma::parse("banned").is_none());
        assert!(Karma::parse("").is_none());
        assert!(Karma::parse("RO ").is_none());
    }

    #[test]
    fn test_node_size_floor_and_monotonicity() {
        // Sentinels always minimum
        assert_eq!(Karma::parse("RO").unwrap().node_size(), 1.0);
        assert_eq!(Karma::parse("DA").unwrap().node_size(), 1.0);

        // Small magnitudes clamp to 1
        assert_eq!(Karma::Numeric(0.25).node_size(), 1.0);
        assert_eq!(Karma::Numeric(-0.5).node_size(), 1.0);

        // Monotonically non-decreasing in |value|
        let magnitudes = [0.0, 1.0, 4.0, 100.0, 10_000.0];
        let mut prev = 0.0;
        for m in magnitudes {
            let size = Karma::Numeric(m).node_size();
            assert!(size >= prev, "size({}) = {} < {}", m, size, prev);
            assert_eq!(size, Karma::Numeric(-m).node_size());
            prev = size;
        }
        assert_eq!(Karma::Numeric(100.0).node_size(), 10.0);
    }

    #[test]
    fn test_rank_term_excludes_sentinels() {
        assert_eq!(Karma::parse("RO").unwrap().rank_term(), 0.0);
        assert_eq!(Karma::Numeric(-50.0).rank_term(), 50.0);
        assert_eq!(Karma::Numeric(50.0).rank_term(), 50.0);
    }

    #[test]
    fn test_index_fallback_for_unknown_names() {
        let mut index = KarmaIndex::new();
        index.insert("alice", Karma::Numeric(100.0));

        assert_eq!(index.class_of("alice"), KarmaClass::Positive);
        assert_eq!(index.size_of("alice"), 10.0);
        assert_eq!(index.rank_term_of("alice"), 100.0);

        // Unknown endpoint: neutral treatment
        assert_eq!(index.get("ghost"), None);
        assert_eq!(index.class_of("ghost"), KarmaClass::Neutral);
        assert_eq!(index.size_of("ghost"), 1.0);
        assert_eq!(index.rank_term_of("ghost"), 0.0);
    }
}
