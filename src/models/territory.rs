//! RT/RW territory codes
//!
//! Codes arrive both as client-entered strings ("05") and as server-stored
//! numbers (5). Equality is numeric; anything that doesn't parse never matches.

pub struct TerritoryCode;

impl TerritoryCode {
    /// Parse a territory code into its numeric value ("05" -> 5).
    ///
    /// Only ASCII digits are accepted after trimming. Empty or non-numeric
    /// input yields `None`.
    pub fn parse(raw: &str) -> Option<u64> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // Strip leading zeros so overly long zero-padding can't overflow
        let significant = trimmed.trim_start_matches('0');
        if significant.is_empty() {
            return Some(0);
        }
        significant.parse().ok()
    }

    /// Numeric equivalence of two codes; fails closed on unparseable input
    pub fn equivalent(a: &str, b: &str) -> bool {
        match (Self::parse(a), Self::parse(b)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Like `equivalent` but for an optional scope value
    pub fn matches_scope(value: &str, scope: Option<&str>) -> bool {
        scope.is_some_and(|scope| Self::equivalent(value, scope))
    }
}
