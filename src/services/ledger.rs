//! Kas (cash ledger) totals

use serde::Serialize;

use crate::models::{EntryKind, KasEntry, KasLevel, TerritoryCode};

/// Totals shown on top of the finance report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LedgerSummary {
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
}

pub fn summarize(entries: &[KasEntry]) -> LedgerSummary {
    let mut summary = LedgerSummary::default();
    for entry in entries {
        match entry.kind {
            EntryKind::In => summary.income = summary.income.saturating_add(entry.amount),
            EntryKind::Out => summary.expense = summary.expense.saturating_add(entry.amount),
        }
    }
    summary.balance = summary.income.saturating_sub(summary.expense);
    summary
}

/// Entries of one kas book. `None` arguments don't restrict; territory codes
/// compare numerically.
pub fn filter_by_territory(
    entries: &[KasEntry],
    level: Option<KasLevel>,
    rw: Option<&str>,
    rt: Option<&str>,
) -> Vec<KasEntry> {
    entries
        .iter()
        .filter(|e| level.map_or(true, |level| e.level == Some(level)))
        .filter(|e| rw.map_or(true, |rw| TerritoryCode::equivalent(&e.rw, rw)))
        .filter(|e| rt.map_or(true, |rt| TerritoryCode::equivalent(&e.rt, rt)))
        .cloned()
        .collect()
}

/// Format as the portal does ("Rp 1.250.000", "-Rp 5.000")
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}
