//! Dashboard counters and the population chart

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Aspiration, CitizenRecord, KasEntry};

use super::aspiration::count_pending;
use super::filter::{district_options, sub_district_options, Selection};
use super::ledger::summarize;

/// The stat cards on top of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardStats {
    pub total_warga: usize,
    pub saldo_kas: i64,
    pub aspirasi_pending: usize,
}

/// One bar of the population chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulationBar {
    /// RW code on the village view, RT code inside one RW
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub selected: Selection,
    pub stats: DashboardStats,
    pub chart: Vec<PopulationBar>,
    /// RW picker entries
    pub rw_list: Vec<String>,
}

fn count_by<'a>(codes: impl Iterator<Item = &'a str>) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for code in codes {
        *counts.entry(code).or_insert(0) += 1;
    }
    counts
}

fn bars(options: Vec<Selection>, counts: &HashMap<&str, usize>) -> Vec<PopulationBar> {
    options
        .into_iter()
        .filter_map(|option| match option {
            Selection::All => None,
            Selection::Only(code) => {
                let count = counts.get(code.as_str()).copied().unwrap_or(0);
                Some(PopulationBar { label: code, count })
            }
        })
        .collect()
}

/// Residents per RW, in RW order. Records without an RW are left out.
pub fn population_by_district(records: &[CitizenRecord]) -> Vec<PopulationBar> {
    let counts = count_by(records.iter().map(|r| r.district.as_str()));
    bars(district_options(records), &counts)
}

/// Residents per RT of one RW; empty while no RW is selected
pub fn population_by_sub_district(records: &[CitizenRecord], district: &Selection) -> Vec<PopulationBar> {
    let Selection::Only(rw) = district else {
        return Vec::new();
    };
    let counts = count_by(
        records
            .iter()
            .filter(|r| &r.district == rw)
            .map(|r| r.sub_district.as_str()),
    );
    bars(sub_district_options(records, district), &counts)
}

impl Dashboard {
    /// Citizen count and chart follow the RW picker; kas balance and pending
    /// aspirations are village-wide.
    pub fn build(
        records: &[CitizenRecord],
        kas: &[KasEntry],
        aspirations: &[Aspiration],
        selected: &Selection,
    ) -> Self {
        let (total_warga, chart) = match selected {
            Selection::All => (records.len(), population_by_district(records)),
            Selection::Only(rw) => (
                records.iter().filter(|r| &r.district == rw).count(),
                population_by_sub_district(records, selected),
            ),
        };

        let rw_list = district_options(records)
            .into_iter()
            .filter(|s| !s.is_all())
            .map(|s| s.to_string())
            .collect();

        Self {
            selected: selected.clone(),
            stats: DashboardStats {
                total_warga,
                saldo_kas: summarize(kas).balance,
                aspirasi_pending: count_pending(aspirations),
            },
            chart,
            rw_list,
        }
    }

    /// Tallest bar, never below 5 so small villages don't fill the chart
    pub fn chart_scale(&self) -> usize {
        self.chart.iter().map(|b| b.count).max().unwrap_or(0).max(5)
    }
}
