//! Trip preferences submitted through the search form.
//!
//! The raw strings are kept verbatim for the search log; the typed views
//! below are what the ranking pipeline works with.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TravelType {
    Beach,
    Mountains,
    City,
    Nature,
    /// "any" or anything the form does not know about.
    Any,
}

impl TravelType {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "пляж" | "beach" => Self::Beach,
            "горы" | "mountains" => Self::Mountains,
            "город" | "city" => Self::City,
            "природа" | "nature" => Self::Nature,
            _ => Self::Any,
        }
    }

    /// True for the four categories that have backup destinations.
    #[must_use]
    pub const fn is_category(self) -> bool {
        !matches!(self, Self::Any)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Climate {
    Warm,
    Cold,
    Tropical,
    Any,
}

impl Climate {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "warm" => Self::Warm,
            "cold" => Self::Cold,
            "tropical" => Self::Tropical,
            _ => Self::Any,
        }
    }

    #[must_use]
    pub const fn admits(self, temp: i32) -> bool {
        match self {
            Self::Warm => temp >= 15,
            Self::Cold => temp <= 15,
            Self::Tropical => temp >= 25,
            Self::Any => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TripDuration {
    Weekend,
    Week,
    /// Anything longer than a week, including unknown values.
    Long,
}

impl TripDuration {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "weekend" => Self::Weekend,
            "week" => Self::Week,
            _ => Self::Long,
        }
    }

    #[must_use]
    pub const fn cost_multiplier(self) -> u64 {
        match self {
            Self::Weekend => 1,
            Self::Week => 3,
            Self::Long => 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    #[serde(rename = "type")]
    pub travel_type: String,
    pub budget: String,
    pub climate: String,
    pub language: String,
    pub duration: String,
    pub currency: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            travel_type: String::new(),
            budget: "1000".to_string(),
            climate: "any".to_string(),
            language: "any".to_string(),
            duration: "week".to_string(),
            currency: "USD".to_string(),
        }
    }
}

impl Preferences {
    #[must_use]
    pub fn travel_type(&self) -> TravelType {
        TravelType::parse(&self.travel_type)
    }

    #[must_use]
    pub fn climate(&self) -> Climate {
        Climate::parse(&self.climate)
    }

    #[must_use]
    pub fn duration(&self) -> TripDuration {
        TripDuration::parse(&self.duration)
    }

    /// Language to filter on, `None` when the user accepts any.
    #[must_use]
    pub fn language_filter(&self) -> Option<&str> {
        let lang = self.language.trim();
        if lang.is_empty() || lang.eq_ignore_ascii_case("any") {
            None
        } else {
            Some(lang)
        }
    }

    /// Pipe-joined form stored in the search log.
    #[must_use]
    pub fn search_params(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}",
            self.travel_type, self.budget, self.climate, self.language, self.duration, self.currency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_type_accepts_russian_and_english() {
        assert_eq!(TravelType::parse("пляж"), TravelType::Beach);
        assert_eq!(TravelType::parse("Beach"), TravelType::Beach);
        assert_eq!(TravelType::parse("горы"), TravelType::Mountains);
        assert_eq!(TravelType::parse("nature"), TravelType::Nature);
        assert_eq!(TravelType::parse("космос"), TravelType::Any);
        assert!(!TravelType::parse("").is_category());
    }

    #[test]
    fn climate_thresholds() {
        assert!(Climate::Warm.admits(15));
        assert!(!Climate::Warm.admits(14));
        assert!(Climate::Cold.admits(15));
        assert!(!Climate::Cold.admits(16));
        assert!(Climate::Tropical.admits(25));
        assert!(!Climate::Tropical.admits(24));
        assert!(Climate::parse("whatever").admits(-40));
    }

    #[test]
    fn unknown_duration_is_long() {
        assert_eq!(TripDuration::parse("month"), TripDuration::Long);
        assert_eq!(TripDuration::Weekend.cost_multiplier(), 1);
        assert_eq!(TripDuration::Week.cost_multiplier(), 3);
        assert_eq!(TripDuration::Long.cost_multiplier(), 10);
    }

    #[test]
    fn form_defaults_and_search_params() {
        let prefs: Preferences = serde_json::from_str(r#"{"type": "горы"}"#).unwrap();
        assert_eq!(prefs.search_params(), "горы|1000|any|any|week|USD");
        assert_eq!(prefs.language_filter(), None);

        let prefs = Preferences {
            language: "Spanish".to_string(),
            ..Preferences::default()
        };
        assert_eq!(prefs.language_filter(), Some("Spanish"));
    }
}
