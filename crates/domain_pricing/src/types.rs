//! Domain vocabulary for travel insurance quoting
//!
//! Insurance types form a closed set; plan types are admin-configured
//! strings with a handful of distinguished values the engine keys behavior
//! off (the children's override and the forced-EUR working holiday plan).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product line being quoted.
///
/// The serialized labels are the lookup keys stored in the rate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsuranceType {
    #[serde(rename = "domestic travel insurance")]
    DomesticTravel,
    #[serde(rename = "overseas travel insurance")]
    OverseasTravel,
    #[serde(rename = "study/language training")]
    StudyAbroad,
    #[serde(rename = "working holiday")]
    WorkingHoliday,
    #[serde(rename = "overseas business/assignment/exchange")]
    OverseasAssignment,
}

impl InsuranceType {
    /// The label stored in the rate tables
    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceType::DomesticTravel => "domestic travel insurance",
            InsuranceType::OverseasTravel => "overseas travel insurance",
            InsuranceType::StudyAbroad => "study/language training",
            InsuranceType::WorkingHoliday => "working holiday",
            InsuranceType::OverseasAssignment => "overseas business/assignment/exchange",
        }
    }

    /// Only the long-term product lines can be sold on a foreign-currency
    /// plan.
    pub fn supports_foreign_currency(&self) -> bool {
        matches!(
            self,
            InsuranceType::StudyAbroad
                | InsuranceType::WorkingHoliday
                | InsuranceType::OverseasAssignment
        )
    }

    /// Per-plan flat surcharges apply to overseas travel insurance only.
    pub fn has_plan_surcharge(&self) -> bool {
        matches!(self, InsuranceType::OverseasTravel)
    }
}

impl fmt::Display for InsuranceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Insured person's gender as keyed in the rate tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Gender::Male),
            "F" => Ok(Gender::Female),
            other => Err(format!("unknown gender code: {other}")),
        }
    }
}

/// A named coverage tier, e.g. "Standard Plan".
///
/// Plans are reference data managed by administrators, so this is an open
/// string rather than an enum; the engine only distinguishes the values
/// below.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanType(String);

impl PlanType {
    /// Plan forced for every insured person under 15, regardless of the
    /// caller's selection.
    pub const CHILDREN: &'static str = "Children's Plan";
    /// Default plan used by the estimate flow for adults.
    pub const ECONOMY: &'static str = "Economy Plan";
    /// Plan that unconditionally settles its foreign portion in EUR.
    pub const WORKING_HOLIDAY_EURO: &'static str = "Working Holiday (Euro Plan)";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn children() -> Self {
        Self::new(Self::CHILDREN)
    }

    pub fn economy() -> Self {
        Self::new(Self::ECONOMY)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_working_holiday_euro(&self) -> bool {
        self.0 == Self::WORKING_HOLIDAY_EURO
    }

    /// Applies the children's override: under 15 the effective plan is
    /// always the children's plan.
    pub fn for_age(&self, age: u32) -> PlanType {
        if age < 15 {
            PlanType::children()
        } else {
            self.clone()
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlanType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Whether the caller asked for the KRW or foreign-currency pricing path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyPlan {
    #[default]
    Krw,
    ForeignCurrency,
}

impl CurrencyPlan {
    pub fn is_foreign(&self) -> bool {
        matches!(self, CurrencyPlan::ForeignCurrency)
    }
}
