//! Household grouping by family card (KK)
//!
//! Records sharing a `no_kk` form one household; everything else is listed
//! as a standalone individual. The result is a pure function of the input
//! order, so re-deriving it on every render is always safe.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::CitizenRecord;

/// Members of one family card, head first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Household {
    pub family_card_id: String,
    pub members: Vec<CitizenRecord>,
}

impl Household {
    /// Resolved head of household. Never `None` for a grouped household.
    pub fn head(&self) -> Option<&CitizenRecord> {
        self.members.first()
    }

    /// Everyone except the head, in input order
    pub fn others(&self) -> &[CitizenRecord] {
        self.members.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Move the head to the front; the rest keep their relative order.
    ///
    /// The head is the first member tagged `Head`, or the first member when
    /// nobody is. Later `Head` tags stay ordinary members.
    fn order_members(&mut self) {
        let head_index = self
            .members
            .iter()
            .position(CitizenRecord::is_marked_head)
            .unwrap_or(0);

        if head_index > 0 {
            let head = self.members.remove(head_index);
            self.members.insert(0, head);
        }
    }
}

/// Grouped registry view
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HouseholdView {
    /// In order of first appearance of each family card
    pub households: Vec<Household>,
    /// Records without a family card, in input order
    pub standalone: Vec<CitizenRecord>,
}

impl HouseholdView {
    pub fn household(&self, family_card_id: &str) -> Option<&Household> {
        self.households
            .iter()
            .find(|h| h.family_card_id == family_card_id)
    }

    pub fn total_records(&self) -> usize {
        self.households.iter().map(Household::len).sum::<usize>() + self.standalone.len()
    }

    pub fn is_empty(&self) -> bool {
        self.households.is_empty() && self.standalone.is_empty()
    }

    /// Households (head first) followed by standalone records
    pub fn flatten(&self) -> Vec<CitizenRecord> {
        self.households
            .iter()
            .flat_map(|h| h.members.iter())
            .chain(self.standalone.iter())
            .cloned()
            .collect()
    }
}

/// Partition records into households and standalone individuals
pub fn group_households(records: &[CitizenRecord]) -> HouseholdView {
    let mut view = HouseholdView::default();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let Some(key) = record.household_key() else {
            view.standalone.push(record.clone());
            continue;
        };

        match index.get(key) {
            Some(&i) => view.households[i].members.push(record.clone()),
            None => {
                index.insert(key, view.households.len());
                view.households.push(Household {
                    family_card_id: key.to_string(),
                    members: vec![record.clone()],
                });
            }
        }
    }

    for household in &mut view.households {
        household.order_members();
    }

    tracing::debug!(
        "Grouped {} records into {} households and {} standalone",
        records.len(),
        view.households.len(),
        view.standalone.len()
    );

    view
}
