use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use folio_content::SanitySettings;
use serde::Deserialize;
use std::{env, fmt};

/// Development-only fallbacks. `Config::validate` rejects them in production.
pub const DEV_ADMIN_USERNAME: &str = "admin";
pub const DEV_ADMIN_PASSWORD: &str = "change_this_now";
pub const DEV_SESSION_SECRET: &str = "insecure-dev-secret-change-in-env";

const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub sanity: SanitySettings,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub environment: RunMode,
    pub site_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
    pub session_secret: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("session_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy flat variables (ADMIN_PASSWORD, SANITY_API_WRITE_TOKEN, etc.)
    /// 2. Environment variables (FOLIO__AUTH__PASSWORD, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("app.environment", "development")?
            .set_default("app.site_url", "http://localhost:3000")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("auth.username", DEV_ADMIN_USERNAME)?
            .set_default("auth.password", DEV_ADMIN_PASSWORD)?
            .set_default("auth.session_secret", DEV_SESSION_SECRET)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .separator("__")
                .try_parsing(true),
        );

        const LEGACY: [(&str, &str); 10] = [
            ("ENVIRONMENT", "app.environment"),
            ("SITE_URL", "app.site_url"),
            ("ADMIN_USERNAME", "auth.username"),
            ("ADMIN_PASSWORD", "auth.password"),
            ("ADMIN_SESSION_SECRET", "auth.session_secret"),
            ("SANITY_PROJECT_ID", "sanity.project_id"),
            ("SANITY_DATASET", "sanity.dataset"),
            ("SANITY_API_VERSION", "sanity.api_version"),
            ("SANITY_API_READ_TOKEN", "sanity.read_token"),
            ("SANITY_API_WRITE_TOKEN", "sanity.write_token"),
        ];

        for (var, key) in LEGACY {
            // Empty values behave like unset ones.
            if let Some(value) = env::var(var).ok().filter(|value| !value.trim().is_empty()) {
                builder = builder.set_override(key, value)?;
            }
        }

        builder.build()?.try_deserialize()
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == RunMode::Production
    }

    /// Names of the settings still holding a development fallback.
    pub fn insecure_defaults(&self) -> Vec<&'static str> {
        let mut defaults = Vec::new();
        if self.auth.username == DEV_ADMIN_USERNAME {
            defaults.push("auth.username");
        }
        if self.auth.password == DEV_ADMIN_PASSWORD {
            defaults.push("auth.password");
        }
        if self.auth.session_secret == DEV_SESSION_SECRET {
            defaults.push("auth.session_secret");
        }
        defaults
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.auth.username.trim().is_empty() || self.auth.password.is_empty() {
            return Err("Admin username and password must not be empty".to_string());
        }
        if self.auth.session_secret.is_empty() {
            return Err("Session secret must not be empty".to_string());
        }

        if self.is_production() {
            let defaults = self.insecure_defaults();
            if !defaults.is_empty() {
                return Err(format!(
                    "Refusing to run in production with development defaults: {}",
                    defaults.join(", ")
                ));
            }
            if self.auth.session_secret.len() < MIN_SECRET_LEN {
                return Err(format!(
                    "Session secret must be at least {MIN_SECRET_LEN} characters long in production"
                ));
            }
        }

        Ok(())
    }
}
