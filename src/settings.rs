use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr, time::Duration};
use url::Url;

const MULTIPART_FIELD_ALLOWANCE: usize = 16 * 1024;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    /// Extra connection attempts at startup, with doubling waits between them.
    #[serde(default = "default_db_connect_retries")]
    pub db_connect_retries: u32,

    #[serde(default = "default_db_acquire_timeout_secs")]
    pub db_acquire_timeout_secs: u64,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Overrides the scheme+host taken from incoming requests when building absolute URLs.
    #[serde(default)]
    pub public_base_url: Option<String>,

    #[serde(default = "default_media_root")]
    pub media_root: String,

    #[serde(default = "default_media_url")]
    pub media_url: String,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    #[serde(default = "default_bio_api_url")]
    pub bio_api_url: String,

    #[serde(default = "default_bio_user_agent")]
    pub bio_user_agent: String,

    #[serde(default = "default_bio_timeout_secs")]
    pub bio_timeout_secs: u64,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Poets-Canvas".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_db_max_connections() -> u32 {
    20
}
fn default_db_connect_retries() -> u32 {
    5
}
fn default_db_acquire_timeout_secs() -> u64 {
    5
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_media_root() -> String {
    "media".to_string()
}
fn default_media_url() -> String {
    "/media/".to_string()
}
fn default_max_upload_bytes() -> usize {
    5 * 1024 * 1024
}
fn default_bio_api_url() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}
fn default_bio_user_agent() -> String {
    "PoetsCanvas/1.0 (https://github.com/poets-canvas/poets-canvas; contact@example.com)".to_string()
}
fn default_bio_timeout_secs() -> u64 {
    5
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            database_url: String::new(),
            db_max_connections: default_db_max_connections(),
            db_connect_retries: default_db_connect_retries(),
            db_acquire_timeout_secs: default_db_acquire_timeout_secs(),
            cors_allowed_origins: default_cors_origins(),
            public_base_url: None,
            media_root: default_media_root(),
            media_url: default_media_url(),
            max_upload_bytes: default_max_upload_bytes(),
            bio_api_url: default_bio_api_url(),
            bio_user_agent: default_bio_user_agent(),
            bio_timeout_secs: default_bio_timeout_secs(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .try_parsing(true)
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // sqlx tooling reads DATABASE_URL, accept it as a fallback
        config.database_url = fill_or_env(config.database_url, "DATABASE_URL")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty".to_string());
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production".to_string());
        }
        if !self.media_url.starts_with('/') || !self.media_url.ends_with('/') {
            errors.push("MEDIA_URL must start and end with '/'".to_string());
        }
        if self.db_max_connections == 0 {
            errors.push("DB_MAX_CONNECTIONS must be greater than zero".to_string());
        }
        if self.db_acquire_timeout_secs == 0 {
            errors.push("DB_ACQUIRE_TIMEOUT_SECS must be greater than zero".to_string());
        }
        if self.max_upload_bytes == 0 {
            errors.push("MAX_UPLOAD_BYTES must be greater than zero".to_string());
        }
        if self.bio_timeout_secs == 0 {
            errors.push("BIO_TIMEOUT_SECS must be greater than zero".to_string());
        }
        if let Some(base) = &self.public_base_url {
            if Url::parse(base).is_err() {
                errors.push(format!("PUBLIC_BASE_URL is not a valid URL: {base}"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn public_base_url(&self) -> Option<Url> {
        self.public_base_url.as_deref().and_then(|u| Url::parse(u).ok())
    }

    pub fn bio_timeout(&self) -> Duration {
        Duration::from_secs(self.bio_timeout_secs)
    }

    pub fn db_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.db_acquire_timeout_secs)
    }

    /// Largest multipart body accepted: one cover plus room for the text fields.
    pub fn multipart_limit(&self) -> usize {
        self.max_upload_bytes.saturating_add(MULTIPART_FIELD_ALLOWANCE)
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("APP_DATABASE_URL or {env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url.redact())
            .field("db_max_connections", &self.db_max_connections)
            .field("db_connect_retries", &self.db_connect_retries)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("public_base_url", &self.public_base_url)
            .field("media_root", &self.media_root)
            .field("media_url", &self.media_url)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("bio_api_url", &self.bio_api_url)
            .field("bio_timeout_secs", &self.bio_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            database_url: "postgres://localhost/poets".into(),
            ..Default::default()
        }
    }

    #[test]
    fn default_config_with_database_url_is_valid() {
        assert!(valid_config().validate().is_ok());
        assert_eq!(valid_config().bio_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn wildcard_cors_is_rejected_in_production() {
        let config = AppConfig {
            env: AppEnvironment::Production,
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn media_url_must_be_slash_delimited() {
        let config = AppConfig {
            media_url: "media".into(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn pool_settings_default_and_reject_zero_connections() {
        let config = valid_config();
        assert_eq!(config.db_max_connections, 20);
        assert_eq!(config.db_connect_retries, 5);
        assert_eq!(config.db_acquire_timeout(), Duration::from_secs(5));

        let config = AppConfig {
            db_max_connections: 0,
            ..valid_config()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("DB_MAX_CONNECTIONS"));
    }

    #[test]
    fn multipart_limit_leaves_room_for_text_fields() {
        let config = AppConfig {
            max_upload_bytes: 1024,
            ..valid_config()
        };
        assert_eq!(config.multipart_limit(), 1024 + 16 * 1024);
    }

    #[test]
    fn cors_origins_split_on_commas() {
        let config = AppConfig {
            cors_allowed_origins: vec!["http://a.test, http://b.test".into(), "".into()],
            ..valid_config()
        };
        assert_eq!(config.cors_origins(), vec!["http://a.test", "http://b.test"]);
    }
}
