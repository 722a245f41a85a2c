use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One record of the country dataset, as served by the countries endpoint.
///
/// Every field is optional on the wire; missing or `null` values fall back to
/// their defaults so a single odd record does not poison the whole list.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Country {
    #[serde(deserialize_with = "null_as_default")]
    pub name: CountryName,
    #[serde(deserialize_with = "null_as_default")]
    pub capital: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub flags: Flags,
    #[serde(deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subregion: String,
    #[serde(deserialize_with = "null_as_default")]
    pub landlocked: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub languages: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub currencies: BTreeMap<String, serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub population: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub area: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Flags {
    pub png: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Country {
    pub fn common_name(&self) -> Option<&str> {
        Some(self.name.common.as_str()).filter(|n| !n.is_empty())
    }

    /// Official name, or the common name when the dataset has none.
    pub fn official_name(&self) -> &str {
        if self.name.official.is_empty() {
            &self.name.common
        } else {
            &self.name.official
        }
    }

    pub fn primary_capital(&self) -> Option<&str> {
        self.capital
            .first()
            .map(String::as_str)
            .filter(|c| !c.is_empty())
    }

    pub fn language_names(&self) -> Vec<String> {
        self.languages.values().cloned().collect()
    }

    pub fn currency_codes(&self) -> Vec<String> {
        self.currencies.keys().cloned().collect()
    }

    /// Case-insensitive match of the first three characters of `wanted`
    /// against the start of any spoken language.
    pub fn speaks(&self, wanted: &str) -> bool {
        let prefix: String = wanted.to_lowercase().chars().take(3).collect();
        self.languages
            .values()
            .any(|lang| lang.to_lowercase().starts_with(&prefix))
    }
}

/// Formats a number with `,` thousands separators.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_and_null_fields() {
        let json = r#"{
            "name": {"common": "Peru", "official": "Republic of Peru"},
            "capital": ["Lima"],
            "flags": {"png": "https://flagcdn.com/w320/pe.png"},
            "region": "Americas",
            "subregion": null,
            "languages": {"aym": "Aymara", "que": "Quechua", "spa": "Spanish"},
            "currencies": {"PEN": {"name": "Peruvian sol", "symbol": "S/ "}},
            "population": 32971846,
            "area": 1285216.0
        }"#;

        let country: Country = serde_json::from_str(json).unwrap();
        assert_eq!(country.common_name(), Some("Peru"));
        assert_eq!(country.primary_capital(), Some("Lima"));
        assert_eq!(country.subregion, "");
        assert!(!country.landlocked);
        assert_eq!(country.currency_codes(), vec!["PEN".to_string()]);
        assert_eq!(country.language_names().len(), 3);
    }

    #[test]
    fn missing_capital_is_none() {
        let country: Country =
            serde_json::from_str(r#"{"name": {"common": "Antarctica"}, "capital": []}"#).unwrap();
        assert_eq!(country.primary_capital(), None);
        assert_eq!(country.official_name(), "Antarctica");
    }

    #[test]
    fn language_prefix_is_case_insensitive() {
        let mut country = Country::default();
        country
            .languages
            .insert("spa".to_string(), "Spanish".to_string());

        assert!(country.speaks("spanish"));
        assert!(country.speaks("SPA"));
        assert!(country.speaks("Sp"));
        assert!(!country.speaks("english"));
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(32_971_846), "32,971,846");
    }
}
