//! Penalty pricing for tagged woodpile abnormalities.
//!
//! Rules come from a static table keyed by rule id. Each tagged point counts
//! as one unit of its rule, regardless of the cell it was placed in.
//!
//! ```
//! use woodpile_core::TagKind;
//! use woodpile_penalty::{compute_summary, PenaltyRule, RuleGroup, RuleTable, Uom};
//!
//! let rules: RuleTable = [
//!     PenaltyRule::new("P03", "Branch", RuleGroup::A, Uom::Kg, 5.0),
//!     PenaltyRule::new("P43", "Leaf", RuleGroup::A, Uom::Kg, 3.0),
//! ]
//! .into_iter()
//! .collect();
//!
//! let summary = compute_summary(&[TagKind::Branch, TagKind::Branch, TagKind::Leaf], &rules, 0.0);
//! assert_eq!(summary.total, 13.0);
//! ```

mod rule;
mod summary;
mod table;

pub use rule::{PenaltyRule, PenaltyRuleDto, RuleGroup, Uom};
pub use summary::{
    compute_penalties, compute_summary, entries_from_tags, PenaltyEntry, PenaltyLine,
    PenaltySummary,
};
pub use table::{RuleIoError, RuleTable};
