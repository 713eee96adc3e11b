use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::FixedOffset;
use chrono_tz::Tz;
use desky_trigger::Zone;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// CLI configuration loaded from TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Trigger configuration file (default: ~/.config/desky/triggers.yml)
    #[serde(default)]
    pub triggers: Option<String>,

    /// Fixed UTC offset for times of day, e.g. "+02:00"
    #[serde(default)]
    pub utc_offset: Option<String>,

    /// Time zone for times of day, e.g. "Europe/Berlin" (default: local time zone)
    #[serde(default)]
    pub timezone: Option<String>,

    /// Log filter used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            triggers: None,
            utc_offset: None,
            timezone: None,
            log_filter: default_log_filter(),
        }
    }
}

impl CliConfig {
    /// Return the default config directory path: ~/.config/desky/
    pub fn default_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("desky");
        Ok(config_dir)
    }

    /// Return the default config file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// Returns default config if the file does not exist.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            debug!(?config_path, "Loading config");
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config: {}", config_path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
            Ok(config)
        } else {
            debug!(?config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolve the trigger file.
    /// Priority: cli_override (or DESKY_TRIGGERS) > config file > ~/.config/desky/triggers.yml.
    pub fn resolve_triggers(&self, cli_override: Option<&str>) -> Result<PathBuf> {
        if let Some(path) = cli_override.or(self.triggers.as_deref()) {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::default_config_dir()?.join("triggers.yml"))
    }

    /// Resolve the zone times of day are interpreted in.
    ///
    /// A fixed offset wins over a named zone, and CLI (or environment) values
    /// win over the config file. Without either the host's local time zone is
    /// used, which follows daylight-saving changes.
    pub fn resolve_zone(&self, offset_override: Option<&str>, timezone_override: Option<&str>) -> Result<Zone> {
        let offset = offset_override.or(self.utc_offset.as_deref());
        let timezone = timezone_override.or(self.timezone.as_deref());
        match (offset, timezone) {
            (Some(text), _) => parse_utc_offset(text).map(Zone::Fixed),
            (None, Some(name)) => parse_timezone(name).map(Zone::Named),
            (None, None) => Ok(Zone::Local),
        }
    }
}

/// Parse "Z", "UTC" or a "+HH:MM" / "+HHMM" offset into a [`FixedOffset`].
pub fn parse_utc_offset(text: &str) -> Result<FixedOffset> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("z") || text.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).context("zero offset");
    }
    text.parse::<FixedOffset>()
        .with_context(|| format!("invalid UTC offset: '{}'", text))
}

/// Parse an IANA time zone name such as "Europe/Berlin".
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| anyhow!("unknown time zone '{}': {}", name, e))
}
