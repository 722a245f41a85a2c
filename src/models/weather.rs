use serde::Serialize;

/// Current conditions in a city, as shown on result and detail pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weather {
    pub temp: i32,
    pub feels_like: i32,
    pub humidity: i32,
    pub wind: f64,
    pub description: String,
    pub icon: String,
}

impl Weather {
    /// Reading substituted whenever the weather lookup fails.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            temp: 25,
            feels_like: 26,
            humidity: 60,
            wind: 3.0,
            description: "Солнечно".to_string(),
            icon: "01d".to_string(),
        }
    }

    /// Reading attached to backup destinations.
    #[must_use]
    pub fn synthetic() -> Self {
        Self {
            temp: 28,
            feels_like: 29,
            ..Self::fallback()
        }
    }
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
