use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::CountrySource;
use crate::models::country::Country;

pub const REST_COUNTRIES_URL: &str = "https://restcountries.com/v3.1/all?fields=name,capital,flags,region,subregion,landlocked,languages,currencies,population,area";

#[derive(Clone)]
pub struct RestCountriesClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl RestCountriesClient {
    #[must_use]
    pub fn with_shared_client(client: Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }

    pub async fn fetch_all(&self) -> Result<Vec<Country>> {
        debug!("Fetching country dataset from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .context("Country dataset request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Countries API error: {} - {}",
                status,
                body
            ));
        }

        let records: Vec<serde_json::Value> = response
            .json()
            .await
            .context("Country dataset is not a JSON array")?;

        Ok(parse_records(records))
    }
}

/// Decodes each record on its own so one malformed entry is skipped instead
/// of failing the batch.
fn parse_records(records: Vec<serde_json::Value>) -> Vec<Country> {
    let total = records.len();
    let countries: Vec<Country> = records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Country>(record) {
            Ok(country) => Some(country),
            Err(e) => {
                debug!("Skipping malformed country record: {}", e);
                None
            }
        })
        .collect();

    if countries.len() < total {
        warn!(
            "Skipped {} malformed country records",
            total - countries.len()
        );
    }

    countries
}

#[async_trait::async_trait]
impl CountrySource for RestCountriesClient {
    async fn fetch_countries(&self) -> Result<Vec<Country>> {
        self.fetch_all().await
    }
}
