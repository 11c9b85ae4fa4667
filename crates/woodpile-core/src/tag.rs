use std::fmt;

use serde::{Deserialize, Serialize};

/// Abnormality category a user can place on a grid cell.
///
/// Presentation (colors, icons, localized titles) belongs to the UI layer;
/// this enum only carries the pricing link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Branch,
    Leaf,
    Soil,
    /// Marks a spot as reviewed-and-ignored; never priced.
    Ignored,
}

impl TagKind {
    pub const ALL: [TagKind; 4] = [
        TagKind::Branch,
        TagKind::Leaf,
        TagKind::Soil,
        TagKind::Ignored,
    ];

    /// Penalty rule id this kind is priced by, if any.
    pub fn rule_id(self) -> Option<&'static str> {
        match self {
            TagKind::Branch => Some("P03"),
            TagKind::Leaf => Some("P43"),
            TagKind::Soil => Some("P44"),
            TagKind::Ignored => None,
        }
    }

    pub fn from_rule_id(id: &str) -> Option<TagKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.rule_id() == Some(id))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TagKind::Branch => "branch",
            TagKind::Leaf => "leaf",
            TagKind::Soil => "soil",
            TagKind::Ignored => "ignored",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
