//! Core record types for the referral ledger.

use crate::karma::Karma;

/// One parsed ledger row: a person, their karma, and their invitation links.
///
/// Location and date fields are positional in the ledger format and retained
/// here even though rendering ignores them.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRecord {
    /// Unique identifier within a single input.
    pub name: String,
    /// Parsed karma field, immutable once parsed.
    pub karma: Karma,
    pub country: String,
    pub region: String,
    pub city: String,
    pub first_seen: String,
    pub last_seen: String,
    /// Who invited this person, if anyone.
    pub invited_by: Option<String>,
    /// Who this person invited, in ledger order.
    pub invited: Vec<String>,
}
