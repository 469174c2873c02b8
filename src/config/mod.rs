use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub navigation: NavigationConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding persisted session state (token files).
    pub state_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Redirects re-enter evaluation; this caps the chain before the
    /// navigator reports a redirect loop.
    pub max_redirect_hops: u32,
    pub prefetch_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Emit the page-view event after each completed navigation.
    pub page_view_events: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("STAGEMED_API_URL") {
            self.api.base_url = v;
        }
        if let Ok(v) = env::var("STAGEMED_API_TIMEOUT_SECS") {
            self.api.timeout_secs = v.parse().unwrap_or(self.api.timeout_secs);
        }
        if let Ok(v) = env::var("STAGEMED_STATE_DIR") {
            self.storage.state_dir = Some(PathBuf::from(v));
        }
        if let Ok(v) = env::var("STAGEMED_MAX_REDIRECT_HOPS") {
            self.navigation.max_redirect_hops = v.parse().unwrap_or(self.navigation.max_redirect_hops);
        }
        if let Ok(v) = env::var("STAGEMED_PREFETCH_ENABLED") {
            self.navigation.prefetch_enabled = v.parse().unwrap_or(self.navigation.prefetch_enabled);
        }
        if let Ok(v) = env::var("STAGEMED_PAGE_VIEW_EVENTS") {
            self.telemetry.page_view_events = v.parse().unwrap_or(self.telemetry.page_view_events);
        }

        self
    }

    /// Resolved session state directory: explicit config, else
    /// `~/.config/stagemed`.
    pub fn state_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage.state_dir {
            return dir.clone();
        }
        let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".config").join("stagemed")
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:8000/api".to_string(),
                timeout_secs: 10,
            },
            storage: StorageConfig { state_dir: None },
            navigation: NavigationConfig {
                max_redirect_hops: 8,
                prefetch_enabled: true,
            },
            telemetry: TelemetryConfig {
                page_view_events: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging.stagemed.example.com/api".to_string(),
                timeout_secs: 10,
            },
            storage: StorageConfig { state_dir: None },
            navigation: NavigationConfig {
                max_redirect_hops: 8,
                prefetch_enabled: true,
            },
            telemetry: TelemetryConfig {
                page_view_events: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://stagemed.example.com/api".to_string(),
                timeout_secs: 10,
            },
            storage: StorageConfig { state_dir: None },
            navigation: NavigationConfig {
                max_redirect_hops: 8,
                prefetch_enabled: true,
            },
            telemetry: TelemetryConfig {
                page_view_events: true,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.navigation.max_redirect_hops, 8);
        assert!(config.navigation.prefetch_enabled);
    }

    #[test]
    fn test_state_dir_falls_back_to_home() {
        let mut config = AppConfig::development();
        config.storage.state_dir = Some(PathBuf::from("/tmp/stagemed-test"));
        assert_eq!(config.state_dir(), PathBuf::from("/tmp/stagemed-test"));
    }
}
