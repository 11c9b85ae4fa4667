use serde::{Deserialize, Serialize};

/// Pricing unit of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Uom {
    Truck,
    /// `unit_value` is a percentage of an externally supplied base.
    Percent,
    Log,
    Piece,
    Kg,
    Unknown,
}

impl Uom {
    /// Normalize the rule table spelling (`Truk`, `Persen`, `Log`, `Pcs`, `Kg`).
    pub fn parse(raw: &str) -> Uom {
        match raw.trim().to_ascii_lowercase().as_str() {
            "truk" => Uom::Truck,
            "persen" => Uom::Percent,
            "log" => Uom::Log,
            "pcs" => Uom::Piece,
            "kg" => Uom::Kg,
            _ => Uom::Unknown,
        }
    }

    /// Spelling used by the rule table.
    pub fn table_name(self) -> &'static str {
        match self {
            Uom::Truck => "Truk",
            Uom::Percent => "Persen",
            Uom::Log => "Log",
            Uom::Piece => "Pcs",
            Uom::Kg => "Kg",
            Uom::Unknown => "N/A",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleGroup {
    A,
    B,
    Unknown,
}

impl RuleGroup {
    pub fn parse(raw: &str) -> RuleGroup {
        match raw.trim().to_ascii_uppercase().as_str() {
            "A" => RuleGroup::A,
            "B" => RuleGroup::B,
            _ => RuleGroup::Unknown,
        }
    }

    pub fn table_name(self) -> &'static str {
        match self {
            RuleGroup::A => "A",
            RuleGroup::B => "B",
            RuleGroup::Unknown => "N/A",
        }
    }
}

/// Rule row exactly as stored in the rule table JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PenaltyRuleDto {
    #[serde(rename = "WoodPltID")]
    pub id: String,
    #[serde(rename = "WoodPltUoM")]
    pub uom: String,
    #[serde(rename = "WoodPltVal")]
    pub value: f64,
    #[serde(rename = "WoodPltName")]
    pub name: String,
    #[serde(rename = "WoodPltGrp")]
    pub group: String,
}

/// Normalized pricing rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PenaltyRule {
    pub id: String,
    pub name: String,
    pub group: RuleGroup,
    pub uom: Uom,
    /// Price per unit, or a percentage when `uom` is [`Uom::Percent`].
    pub unit_value: f64,
}

impl PenaltyRule {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        group: RuleGroup,
        uom: Uom,
        unit_value: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group,
            uom,
            unit_value,
        }
    }

    pub fn to_dto(&self) -> PenaltyRuleDto {
        PenaltyRuleDto {
            id: self.id.clone(),
            uom: self.uom.table_name().to_string(),
            value: self.unit_value,
            name: self.name.clone(),
            group: self.group.table_name().to_string(),
        }
    }
}

impl From<PenaltyRuleDto> for PenaltyRule {
    fn from(dto: PenaltyRuleDto) -> Self {
        Self {
            group: RuleGroup::parse(&dto.group),
            uom: Uom::parse(&dto.uom),
            id: dto.id,
            name: dto.name,
            unit_value: dto.value,
        }
    }
}
