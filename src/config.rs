use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub views: ViewConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

// ============================================================
// Backend Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_path")]
    pub api_path: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_path: default_api_path(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_api_path() -> String {
    "/api".to_string()
}

impl BackendConfig {
    /// Base URL of the scoring API with the configured path prefix, no trailing slash.
    pub fn api_root(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.api_path.trim_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }
}

// ============================================================
// Polling Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct PollingConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Initial state of the auto-refresh checkbox.
    #[serde(default = "default_true")]
    pub auto_refresh: bool,
    /// Discard responses from cycles older than the latest applied one.
    #[serde(default = "default_true")]
    pub ordered_apply: bool,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            auto_refresh: true,
            ordered_apply: true,
        }
    }
}

fn default_interval_ms() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}

// ============================================================
// View Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct ViewConfig {
    #[serde(default = "default_dashboard_rows")]
    pub dashboard_rows: usize,
    #[serde(default = "default_search_cap")]
    pub search_cap: usize,
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: f64,
    #[serde(default = "default_trend_points")]
    pub trend_points: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            dashboard_rows: default_dashboard_rows(),
            search_cap: default_search_cap(),
            alert_threshold: default_alert_threshold(),
            trend_points: default_trend_points(),
        }
    }
}

fn default_dashboard_rows() -> usize {
    10
}

fn default_search_cap() -> usize {
    500
}

fn default_alert_threshold() -> f64 {
    70.0
}

fn default_trend_points() -> usize {
    50
}

// ============================================================
// Console Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct ConsoleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_console_host")]
    pub host: String,
    #[serde(default = "default_console_port")]
    pub port: u16,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_console_host(),
            port: default_console_port(),
        }
    }
}

fn default_console_host() -> String {
    "127.0.0.1".to_string()
}

fn default_console_port() -> u16 {
    3000
}

impl Config {
    pub fn load(path: &str) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("Failed to read config file '{}': {}", path, e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| eyre::eyre!("Failed to parse config file '{}': {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> eyre::Result<()> {
        if self.polling.interval_ms == 0 {
            return Err(eyre::eyre!("polling.interval_ms must be greater than zero"));
        }
        if self.views.dashboard_rows == 0 || self.views.search_cap == 0 {
            return Err(eyre::eyre!(
                "views.dashboard_rows and views.search_cap must be greater than zero"
            ));
        }
        if self.views.trend_points == 0 {
            return Err(eyre::eyre!("views.trend_points must be greater than zero"));
        }
        reqwest::Url::parse(&self.backend.base_url).map_err(|e| {
            eyre::eyre!("Invalid backend base_url '{}': {}", self.backend.base_url, e)
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
[backend]
base_url = "http://scoring.internal:8080/"

[polling]
interval_ms = 2500
ordered_apply = false

[views]
alert_threshold = 80.0
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.polling.interval_ms, 2500);
        assert!(config.polling.auto_refresh); // default
        assert!(!config.polling.ordered_apply);
        assert_eq!(config.views.alert_threshold, 80.0);
        assert_eq!(config.views.search_cap, 500); // default
        assert_eq!(config.views.dashboard_rows, 10); // default
        assert_eq!(config.console.port, 3000); // default
        assert_eq!(config.backend.api_root(), "http://scoring.internal:8080/api");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.polling.interval_ms, 5000);
        assert_eq!(config.views.trend_points, 50);
        assert_eq!(config.backend.api_root(), "http://127.0.0.1:8080/api");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_root_without_prefix() {
        let backend = BackendConfig {
            base_url: "http://localhost:9000".to_string(),
            api_path: "/".to_string(),
        };
        assert_eq!(backend.api_root(), "http://localhost:9000");
    }

    #[test]
    fn test_validate_zero_interval() {
        let mut config = Config::default();
        config.polling.interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_dashboard_rows() {
        let mut config = Config::default();
        config.views.dashboard_rows = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_search_cap() {
        let mut config = Config::default();
        config.views.search_cap = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_trend_points() {
        let mut config = Config::default();
        config.views.trend_points = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_base_url() {
        let mut config = Config::default();
        config.backend.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
