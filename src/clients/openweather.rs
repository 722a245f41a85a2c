use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::WeatherSource;
use crate::models::weather::{Weather, capitalize};

pub const OPENWEATHER_API: &str = "http://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    main: MainReadings,
    wind: Wind,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

impl CurrentWeatherResponse {
    #[allow(clippy::cast_possible_truncation)]
    fn into_weather(self) -> Result<Weather> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .context("Weather response has no conditions")?;

        Ok(Weather {
            temp: self.main.temp.round() as i32,
            feels_like: self.main.feels_like.round() as i32,
            humidity: self.main.humidity.round() as i32,
            wind: self.wind.speed,
            description: capitalize(&condition.description),
            icon: condition.icon,
        })
    }
}

#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl OpenWeatherClient {
    #[must_use]
    pub fn with_shared_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout,
        }
    }

    /// Current conditions for `city` in metric units with Russian descriptions.
    pub async fn fetch(&self, city: &str) -> Result<Weather> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("q", city)
            .append_pair("appid", &self.api_key)
            .append_pair("units", "metric")
            .append_pair("lang", "ru");

        let response = self.client.get(url).timeout(self.timeout).send().await?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(anyhow::anyhow!("Weather API error: {}", response.status()));
        }

        let body: CurrentWeatherResponse = response.json().await?;
        body.into_weather()
    }
}

#[async_trait::async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> Weather {
        match self.fetch(city).await {
            Ok(weather) => {
                debug!("Weather for {}: {}°C", city, weather.temp);
                weather
            }
            Err(e) => {
                warn!("Weather lookup for {} failed, using fallback: {}", city, e);
                metrics::counter!("weather_fallback_total").increment(1);
                Weather::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_is_rounded_and_capitalized() {
        let body: CurrentWeatherResponse = serde_json::from_str(
            r#"{
                "main": {"temp": 18.6, "feels_like": 17.4, "humidity": 72},
                "wind": {"speed": 4.1},
                "weather": [{"description": "небольшой дождь", "icon": "10d"}]
            }"#,
        )
        .unwrap();

        let weather = body.into_weather().unwrap();
        assert_eq!(weather.temp, 19);
        assert_eq!(weather.feels_like, 17);
        assert_eq!(weather.humidity, 72);
        assert_eq!(weather.description, "Небольшой дождь");
        assert_eq!(weather.icon, "10d");
    }

    #[test]
    fn response_without_conditions_is_rejected() {
        let body: CurrentWeatherResponse = serde_json::from_str(
            r#"{"main": {"temp": 1, "feels_like": 0, "humidity": 90}, "wind": {"speed": 2}}"#,
        )
        .unwrap();
        assert!(body.into_weather().is_err());
    }

    #[tokio::test]
    async fn unreachable_host_yields_fallback() {
        let client = OpenWeatherClient::with_shared_client(
            Client::new(),
            "http://127.0.0.1:1/data/2.5/weather",
            "key",
            Duration::from_secs(2),
        );

        let weather = client.current_weather("Paris").await;
        assert_eq!(
            (
                weather.temp,
                weather.feels_like,
                weather.humidity,
                weather.wind,
                weather.description.as_str(),
                weather.icon.as_str(),
            ),
            (25, 26, 60, 3.0, "Солнечно", "01d")
        );
    }
}
