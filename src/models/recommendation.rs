use serde::Serialize;
use std::fmt;

use super::weather::Weather;

/// Price range for a trip, `max` is always one and a half times `min`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostEstimate {
    pub min: u64,
    pub max: u64,
    pub currency: String,
}

impl CostEstimate {
    #[must_use]
    pub fn from_base(base: u64, currency: impl Into<String>) -> Self {
        Self {
            min: base,
            max: base * 3 / 2,
            currency: currency.into(),
        }
    }
}

impl fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} {}", self.min, self.max, self.currency)
    }
}

/// A ranked destination, fully enriched for the results page.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub name: String,
    pub capital: String,
    pub flag: String,
    pub weather: Weather,
    pub region: String,
    pub landlocked: bool,
    pub languages: Vec<String>,
    pub rating: f64,
    pub reviews: i64,
    pub events: Vec<String>,
    pub tips: Vec<String>,
    pub population: u64,
    pub area: f64,
    pub estimated_cost: CostEstimate,
    pub duration_advice: String,
    pub budget_level: u8,
    pub tags: Vec<String>,
}
