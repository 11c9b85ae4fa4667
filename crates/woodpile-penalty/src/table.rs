//! Rule table loading.

use std::collections::HashMap;
use std::{fs, path::Path};

use log::warn;
use serde::Deserialize;

use crate::{PenaltyRule, PenaltyRuleDto};

#[derive(thiserror::Error, Debug)]
pub enum RuleIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Service response wrapping the rule rows.
#[derive(Deserialize)]
struct Envelope {
    data: Vec<PenaltyRuleDto>,
}

/// Penalty rules keyed by rule id. Immutable once built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleTable {
    rules: HashMap<String, PenaltyRule>,
}

impl RuleTable {
    /// Build a table; on duplicate ids the later rule wins.
    pub fn from_rules(rules: impl IntoIterator<Item = PenaltyRule>) -> Self {
        let mut map = HashMap::new();
        for rule in rules {
            if let Some(prev) = map.insert(rule.id.clone(), rule) {
                warn!("duplicate penalty rule id {}, keeping the later entry", prev.id);
            }
        }
        Self { rules: map }
    }

    /// Parse either the bare rule array or the `{"data": [...]}` envelope.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let dtos: Vec<PenaltyRuleDto> = if value.is_object() {
            serde_json::from_value::<Envelope>(value)?.data
        } else {
            serde_json::from_value(value)?
        };
        Ok(Self::from_rules(dtos.into_iter().map(PenaltyRule::from)))
    }

    /// Load a rule table from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RuleIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(Self::from_json_str(&raw)?)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&PenaltyRule> {
        self.rules.get(id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules sorted by id.
    pub fn sorted(&self) -> Vec<&PenaltyRule> {
        let mut rules: Vec<&PenaltyRule> = self.rules.values().collect();
        rules.sort_by(|a, b| a.id.cmp(&b.id));
        rules
    }

    pub fn as_map(&self) -> &HashMap<String, PenaltyRule> {
        &self.rules
    }
}

impl FromIterator<PenaltyRule> for RuleTable {
    fn from_iter<I: IntoIterator<Item = PenaltyRule>>(iter: I) -> Self {
        Self::from_rules(iter)
    }
}

impl From<HashMap<String, PenaltyRule>> for RuleTable {
    fn from(rules: HashMap<String, PenaltyRule>) -> Self {
        Self { rules }
    }
}
