use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Used when neither the config file nor `SECRET_KEY` provide one.
pub const INSECURE_SECRET_KEY: &str = "dev-secret-key-change-me";

/// Used when neither the config file nor `WEATHER_API_KEY` provide one.
pub const DEFAULT_WEATHER_API_KEY: &str = "demo-weather-api-key";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub countries: CountriesConfig,

    pub weather: WeatherConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/travelai.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    /// Signs the session cookie that carries flash messages.
    pub secret_key: String,

    /// Whether to set the Secure flag on session cookies.
    /// Set to false for local development without HTTPS.
    pub secure_cookies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            secret_key: INSECURE_SECRET_KEY.to_string(),
            secure_cookies: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CountriesConfig {
    pub url: String,

    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,

    /// How many countries, in dataset order, are considered per search.
    pub candidate_limit: usize,

    /// Seconds a failed dataset fetch is remembered before retrying (default: 30)
    pub retry_after_seconds: u64,
}

impl Default for CountriesConfig {
    fn default() -> Self {
        Self {
            url: crate::clients::restcountries::REST_COUNTRIES_URL.to_string(),
            request_timeout_seconds: 10,
            candidate_limit: 50,
            retry_after_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,

    pub api_key: String,

    /// Request timeout in seconds (default: 5)
    pub request_timeout_seconds: u64,

    /// Weather lookups in flight at once during a search (default: 8)
    pub max_concurrent_lookups: usize,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: crate::clients::openweather::OPENWEATHER_API.to_string(),
            api_key: DEFAULT_WEATHER_API_KEY.to_string(),
            request_timeout_seconds: 5,
            max_concurrent_lookups: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,

    pub loki_labels: std::collections::HashMap<String, String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        let mut labels = std::collections::HashMap::new();
        labels.insert("app".to_string(), "travelai".to_string());

        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
            loki_labels: labels,
        }
    }
}

impl Config {
    /// Loads `.env`, the first config file found, then environment overrides.
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from: {}", path.display());
        }

        let mut config = Self::load_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Applies `SECRET_KEY`, `WEATHER_API_KEY`, `DATABASE_URL` and `PORT`.
    /// Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(secret) = var("SECRET_KEY") {
            self.server.secret_key = secret;
        }
        if let Some(key) = var("WEATHER_API_KEY") {
            self.weather.api_key = key;
        }
        if let Some(url) = var("DATABASE_URL") {
            self.general.database_path = url;
        }
        if let Some(port) = var("PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("travelai").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".travelai").join("config.toml"));
        }

        paths
    }

    #[must_use]
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.secret_key.trim().is_empty() {
            anyhow::bail!("Secret key cannot be empty");
        }

        if self.countries.request_timeout_seconds == 0 {
            anyhow::bail!("Country request timeout must be > 0");
        }

        if self.weather.request_timeout_seconds == 0 {
            anyhow::bail!("Weather request timeout must be > 0");
        }

        if self.countries.candidate_limit == 0 {
            anyhow::bail!("Candidate limit must be > 0");
        }

        if self.general.database_path.is_empty() {
            anyhow::bail!("Database path cannot be empty");
        }

        Ok(())
    }

    #[must_use]
    pub fn uses_insecure_secret(&self) -> bool {
        self.server.secret_key == INSECURE_SECRET_KEY
    }
}
