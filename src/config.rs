use serde::{Deserialize, Serialize};

use crate::logic::LanguagePreference;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub endpoints: EndpointConfig,
    pub labels: LabelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Overpass API interpreter URL
    pub overpass: String,
    /// Wikidata SPARQL endpoint URL
    pub sparql: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// User-Agent header sent with every request
    pub agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    /// Preferred label languages, most preferred first
    pub languages: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            overpass: "https://overpass-api.de/api/interpreter".to_string(),
            sparql: "https://query.wikidata.org/sparql".to_string(),
            timeout: 20,
            agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("config").required(false));

        // Add environment variables with prefix "BRIDGE_", e.g. BRIDGE_SERVER_PORT
        config = config.add_source(
            config::Environment::with_prefix("BRIDGE")
                .separator("_")
                .prefix_separator("_")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("labels.languages"),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Get the server bind address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn languages(&self) -> LanguagePreference {
        LanguagePreference::new(&self.labels.languages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server_address(), "127.0.0.1:3001");
        assert_eq!(config.endpoints.timeout, 20);
        assert!(config.endpoints.agent.starts_with("bridge-gallery/"));
        assert_eq!(config.languages().directive(), "en");
    }

    #[test]
    fn test_load_without_overrides() {
        // Only holds while no BRIDGE_* variables or config file are present
        if std::env::vars().any(|(key, _)| key.starts_with("BRIDGE_")) {
            return;
        }
        let config = AppConfig::load().unwrap();
        assert_eq!(config.endpoints.sparql, "https://query.wikidata.org/sparql");
        assert_eq!(config.labels.languages, vec!["en".to_string()]);
    }
}
