use std::env;
use std::time::Duration;

use clap::Parser;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::session::DialogLimits;
use crate::waitlist::service::DialogTiming;
use crate::waitlist::storage::StorageBackend;

/// Fallback config file picked up from the working directory.
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Environment variables the original site build read, mapped onto
/// `integrations.*` keys. They act as defaults, below the config file.
const LEGACY_INTEGRATION_VARS: [(&str, &str); 4] = [
    ("VITE_API_ENDPOINT", "integrations.api_endpoint"),
    ("VITE_WAITLIST_ENDPOINT", "integrations.waitlist_endpoint"),
    ("VITE_GA_TRACKING_ID", "integrations.analytics_tracking_id"),
    ("VITE_ENABLE_ANALYTICS", "integrations.analytics_enabled"),
];

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long, env = "BIND_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Waitlist storage backend (file, memory, disabled)
    #[arg(long, env = "STORAGE_BACKEND")]
    pub storage_backend: Option<String>,

    /// Directory for the file storage backend
    #[arg(long, env = "DATA_DIR")]
    pub data_dir: Option<String>,

    /// Simulated submission latency in milliseconds
    #[arg(long, env = "SUBMIT_DELAY_MS")]
    pub submit_delay_ms: Option<u64>,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub dialog: DialogConfig,
    pub integrations: IntegrationsConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub static_dir: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DialogConfig {
    pub submit_delay_ms: u64,
    pub success_display_ms: u64,
    /// Abandoned dialogs are dropped after this long without activity.
    pub idle_ttl_secs: u64,
    pub max_open: usize,
}

impl DialogConfig {
    #[must_use]
    pub fn timing(&self) -> DialogTiming {
        DialogTiming {
            submit_delay: Duration::from_millis(self.submit_delay_ms),
            success_display: Duration::from_millis(self.success_display_ms),
        }
    }

    #[must_use]
    pub fn limits(&self) -> DialogLimits {
        DialogLimits {
            idle_ttl: Duration::from_secs(self.idle_ttl_secs),
            max_open: self.max_open,
        }
    }
}

/// Extension points for a future remote waitlist and analytics. Only the
/// analytics pair is read, to emit a meta tag.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct IntegrationsConfig {
    pub api_endpoint: Option<String>,
    pub waitlist_endpoint: Option<String>,
    pub analytics_tracking_id: Option<String>,
    pub analytics_enabled: bool,
}

impl IntegrationsConfig {
    /// Tracking id to advertise, when analytics is switched on.
    #[must_use]
    pub fn analytics_id(&self) -> Option<&str> {
        if !self.analytics_enabled {
            return None;
        }
        self.analytics_tracking_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    pub json: bool,
    pub filter: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Resolve configuration. Later layers win:
    /// defaults, legacy `VITE_*` variables, config file, `DEADW3_*`
    /// variables, CLI flags (and their plain env aliases).
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.static_dir", "static")?
            .set_default("server.request_timeout_secs", 30)?
            .set_default("storage.backend", "file")?
            .set_default("storage.data_dir", "data")?
            .set_default("dialog.submit_delay_ms", 1000)?
            .set_default("dialog.success_display_ms", 3000)?
            .set_default("dialog.idle_ttl_secs", 900)?
            .set_default("dialog.max_open", 10_000)?
            .set_default("integrations.analytics_enabled", false)?
            .set_default("telemetry.json", false)?
            .set_default("telemetry.filter", "info,deadw3_landing=debug")?;

        for (var, key) in LEGACY_INTEGRATION_VARS {
            if let Ok(val) = env::var(var) {
                builder = if key.ends_with("_enabled") {
                    builder.set_default(key, val.trim().eq_ignore_ascii_case("true"))?
                } else {
                    builder.set_default(key, val)?
                };
            }
        }

        builder = match &cli.config {
            Some(path) => builder.add_source(File::new(path, FileFormat::Yaml).required(true)),
            None => builder
                .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false)),
        };

        // E.g. DEADW3_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("DEADW3")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(backend) = cli.storage_backend {
            builder = builder.set_override("storage.backend", backend.to_lowercase())?;
        }
        if let Some(dir) = cli.data_dir {
            builder = builder.set_override("storage.data_dir", dir)?;
        }
        if let Some(delay) = cli.submit_delay_ms {
            builder = builder.set_override(
                "dialog.submit_delay_ms",
                i64::try_from(delay).unwrap_or(i64::MAX),
            )?;
        }
        if let Some(json) = cli.log_json {
            builder = builder.set_override("telemetry.json", json)?;
        }

        builder.build()?.try_deserialize()
    }
}
