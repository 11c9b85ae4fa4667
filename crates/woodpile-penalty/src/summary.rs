//! Count-based penalty pricing.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};
use woodpile_core::TagKind;

use crate::{PenaltyRule, RuleGroup, RuleTable, Uom};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Quantity charged against one rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PenaltyEntry {
    pub rule_id: String,
    pub quantity: f64,
}

/// One priced line of a summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PenaltyLine {
    pub rule: PenaltyRule,
    pub quantity: f64,
    pub subtotal: f64,
}

/// Priced report, rebuilt from scratch on every request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PenaltySummary {
    pub lines: Vec<PenaltyLine>,
    pub total: f64,
}

impl PenaltySummary {
    fn from_lines(lines: Vec<PenaltyLine>) -> Self {
        // `Sum for f64` starts from -0.0
        let total = lines.iter().fold(0.0, |acc, l| acc + l.subtotal);
        Self { lines, total }
    }

    /// Subtotals summed per rule group.
    pub fn total_by_group(&self) -> BTreeMap<RuleGroup, f64> {
        let mut out = BTreeMap::new();
        for line in &self.lines {
            *out.entry(line.rule.group).or_insert(0.0) += line.subtotal;
        }
        out
    }

    pub fn line(&self, rule_id: &str) -> Option<&PenaltyLine> {
        self.lines.iter().find(|l| l.rule.id == rule_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn subtotal(rule: &PenaltyRule, quantity: f64, base_for_percent: f64) -> f64 {
    match rule.uom {
        Uom::Percent => base_for_percent * (rule.unit_value / 100.0) * quantity,
        Uom::Unknown => 0.0,
        Uom::Truck | Uom::Log | Uom::Piece | Uom::Kg => rule.unit_value * quantity,
    }
}

/// Price explicit entries. Entries whose rule id is not in `rules` are dropped.
///
/// `base_for_percent` is the quantity percent rules apply to; with `0.0`
/// percent rules price to zero.
pub fn compute_penalties(
    rules: &RuleTable,
    entries: &[PenaltyEntry],
    base_for_percent: f64,
) -> PenaltySummary {
    let lines = entries
        .iter()
        .filter_map(|entry| {
            let Some(rule) = rules.get(&entry.rule_id) else {
                debug!("no penalty rule {}, entry dropped", entry.rule_id);
                return None;
            };
            Some(PenaltyLine {
                rule: rule.clone(),
                quantity: entry.quantity,
                subtotal: subtotal(rule, entry.quantity, base_for_percent),
            })
        })
        .collect();
    PenaltySummary::from_lines(lines)
}

/// Count tags per rule id, one unit per tag, in order of first appearance.
///
/// Tags without a rule mapping and rule ids missing from `rules` are skipped.
pub fn entries_from_tags(tags: &[TagKind], rules: &RuleTable) -> Vec<PenaltyEntry> {
    let mut entries: Vec<PenaltyEntry> = Vec::new();
    for rule_id in tags.iter().filter_map(|t| t.rule_id()) {
        if rules.get(rule_id).is_none() {
            debug!("no penalty rule {rule_id}, tag not priced");
            continue;
        }
        match entries.iter_mut().find(|e| e.rule_id == rule_id) {
            Some(entry) => entry.quantity += 1.0,
            None => entries.push(PenaltyEntry {
                rule_id: rule_id.to_string(),
                quantity: 1.0,
            }),
        }
    }
    entries
}

/// Price a multiset of tags.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(tags, rules), fields(tags = tags.len()))
)]
pub fn compute_summary(tags: &[TagKind], rules: &RuleTable, base_for_percent: f64) -> PenaltySummary {
    let entries = entries_from_tags(tags, rules);
    let summary = compute_penalties(rules, &entries, base_for_percent);
    debug!(
        "penalty summary: {} lines, total {}",
        summary.lines.len(),
        summary.total
    );
    summary
}
