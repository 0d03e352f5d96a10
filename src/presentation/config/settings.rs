use std::num::NonZeroU32;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use serde::Deserialize;

use crate::application::services::PollingPolicy;
use crate::domain::{UploadPolicy, default_allowed_mime_types};
use crate::infrastructure::observability::TracingConfig;
use crate::infrastructure::vendor::VendorConfig;

use super::Environment;

const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerSettings,
    pub vendor: VendorSettings,
    pub upload: UploadSettings,
    pub polling: PollingSettings,
    pub rate_limit: RateLimitSettings,
    pub cors: CorsSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Deserialize)]
pub struct VendorSettings {
    pub api_key: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub language_code: String,
}

impl std::fmt::Debug for VendorSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VendorSettings")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("language_code", &self.language_code)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_file_size_bytes: usize,
    pub allowed_mime_types: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingSettings {
    pub interval_ms: u64,
    pub max_attempts: u32,
    /// 0 disables the consecutive-failure cutoff.
    pub max_consecutive_failures: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    pub max_requests: u32,
    pub window_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
    pub max_age_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json_format: bool,
}

impl Settings {
    /// Layers defaults, `config/default.toml`, `config/<environment>.toml`,
    /// `APP__SECTION__KEY` variables, then `ASSEMBLYAI_API_KEY`, `PORT` and
    /// `LOG_FORMAT`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let port = std::env::var("PORT")
            .ok()
            .map(|p| p.parse::<i64>())
            .transpose()
            .map_err(|e| ConfigError::Message(format!("invalid PORT: {}", e)))?;

        Self::defaults_builder(environment)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment.as_str())).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("upload.allowed_mime_types")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .set_override_option("vendor.api_key", std::env::var("ASSEMBLYAI_API_KEY").ok())?
            .set_override_option("server.port", port)?
            .set_override_option(
                "logging.json_format",
                json_format_override(std::env::var("LOG_FORMAT").ok()),
            )?
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only, without reading files or the process environment.
    pub fn defaults(environment: Environment) -> Result<Self, ConfigError> {
        Self::defaults_builder(environment)?
            .build()?
            .try_deserialize()
    }

    fn defaults_builder(
        environment: Environment,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let mime_types = default_allowed_mime_types();
        let upload_defaults = UploadPolicy::default();
        let polling_defaults = PollingPolicy::default();

        Config::builder()
            .set_override("environment", environment.as_str())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("vendor.api_key", "")?
            .set_default("vendor.base_url", crate::infrastructure::vendor::DEFAULT_BASE_URL)?
            .set_default("vendor.request_timeout_secs", 30)?
            .set_default("vendor.language_code", crate::domain::DEFAULT_LANGUAGE_CODE)?
            .set_default(
                "upload.max_file_size_bytes",
                upload_defaults.max_file_size_bytes as i64,
            )?
            .set_default("upload.allowed_mime_types", mime_types)?
            .set_default(
                "polling.interval_ms",
                polling_defaults.interval.as_millis() as i64,
            )?
            .set_default("polling.max_attempts", polling_defaults.max_attempts as i64)?
            .set_default("polling.max_consecutive_failures", 0)?
            .set_default("rate_limit.max_requests", 100)?
            .set_default("rate_limit.window_secs", 15 * 60)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("cors.max_age_secs", 24 * 60 * 60)?
            .set_default("logging.level", "info")?
            .set_default("logging.json_format", environment.is_production())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.vendor.api_key.trim().is_empty() {
            return Err("vendor API key is not configured (set ASSEMBLYAI_API_KEY)".to_string());
        }
        if self.rate_limit.max_requests == 0 {
            return Err("rate_limit.max_requests must be greater than zero".to_string());
        }
        if self.polling.max_attempts == 0 {
            return Err("polling.max_attempts must be greater than zero".to_string());
        }
        if self.polling.interval_ms == 0 {
            return Err("polling.interval_ms must be greater than zero".to_string());
        }
        if self.upload.allowed_mime_types.is_empty() {
            return Err("upload.allowed_mime_types must not be empty".to_string());
        }
        Ok(())
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::new(
            self.upload.max_file_size_bytes,
            self.upload.allowed_mime_types.clone(),
        )
    }

    pub fn polling_policy(&self) -> PollingPolicy {
        PollingPolicy::new(
            Duration::from_millis(self.polling.interval_ms),
            self.polling.max_attempts,
        )
        .with_max_consecutive_failures(Some(self.polling.max_consecutive_failures))
    }

    pub fn vendor_config(&self) -> VendorConfig {
        VendorConfig::new(self.vendor.api_key.clone())
            .with_base_url(self.vendor.base_url.clone())
            .with_request_timeout(Duration::from_secs(self.vendor.request_timeout_secs))
    }

    pub fn tracing_config(&self) -> TracingConfig {
        TracingConfig {
            environment: self.environment.to_string(),
            level: self.logging.level.clone(),
            json_format: self.logging.json_format,
        }
    }

    pub fn rate_limit_quota(&self) -> (NonZeroU32, Duration) {
        (
            NonZeroU32::new(self.rate_limit.max_requests).unwrap_or(NonZeroU32::MIN),
            Duration::from_secs(self.rate_limit.window_secs),
        )
    }
}

/// `LOG_FORMAT=json` forces JSON logs, any other value forces plain text.
fn json_format_override(log_format: Option<String>) -> Option<bool> {
    log_format
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .map(|v| v == "json")
}
