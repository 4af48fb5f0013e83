use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};

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

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Bot credential for the chat platform. May be absent at startup; order
    /// intake fails per-request until it is set.
    #[serde(default)]
    pub discord_bot_token: String,

    /// Guild (workspace) the ticket channels are created in.
    #[serde(default)]
    pub discord_guild_id: String,

    /// Parent category every ticket channel is filed under.
    #[serde(default = "default_category_id")]
    pub discord_category_id: String,

    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,

    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// When set, failure responses carry the error source chain. Logged-only
    /// otherwise.
    #[serde(default)]
    pub expose_error_detail: bool,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Skinshop-API".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_category_id() -> String {
    "1430525989104123975".to_string()
}
fn default_uploads_dir() -> String {
    "uploads".to_string()
}
fn default_static_dir() -> String {
    "dist".to_string()
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name.to_string().to_lowercase())).required(false))
            .add_source(Environment::with_prefix("APP").separator("_").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Credentials come straight from the environment when the file layers
        // leave them empty. Unlike the rest of the config they may stay
        // missing: the order flow rejects per request instead of at boot.
        config.discord_bot_token = fill_from_env(config.discord_bot_token, "DISCORD_BOT_TOKEN");
        config.discord_guild_id = fill_from_env(config.discord_guild_id, "GUILD_ID");
        config.discord_category_id = fill_from_env(config.discord_category_id, "CATEGORY_ID");

        config.validate()?;

        if !config.discord_configured() {
            tracing::warn!(
                "Discord credentials missing (DISCORD_BOT_TOKEN / GUILD_ID); order intake will reject submissions"
            );
        }

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.uploads_dir.trim().is_empty() {
            errors.push("UPLOADS_DIR cannot be empty");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }
        if self.is_production() && self.expose_error_detail {
            errors.push("EXPOSE_ERROR_DETAIL is not allowed in production");
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

    pub fn discord_configured(&self) -> bool {
        !self.discord_bot_token.trim().is_empty() && !self.discord_guild_id.trim().is_empty()
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn fill_from_env(current: String, env_key: &str) -> String {
    if current.trim().is_empty() {
        env::var(env_key).unwrap_or_default()
    } else {
        current
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
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("discord_bot_token", &self.discord_bot_token.redact())
            .field("discord_guild_id", &self.discord_guild_id)
            .field("discord_category_id", &self.discord_category_id)
            .field("uploads_dir", &self.uploads_dir)
            .field("static_dir", &self.static_dir)
            .field("expose_error_detail", &self.expose_error_detail)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            cors_allowed_origins: default_cors_origins(),
            discord_bot_token: String::new(),
            discord_guild_id: String::new(),
            discord_category_id: default_category_id(),
            uploads_dir: default_uploads_dir(),
            static_dir: default_static_dir(),
            expose_error_detail: false,
        }
    }
}
