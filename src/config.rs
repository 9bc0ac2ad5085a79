//! Constants and environment driven settings for the command line tool.
//!
//! The library core never reads the environment; only [`Settings::from_env`]
//! does, and only the binary calls it.

/// Maximum prefix length of an IPv4 block (32 bits).
pub const MAX_PREFIX: u8 = 32;

/// log4rs configuration file used when `CIDR_ALGEBRA_LOG_CONFIG` is unset.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

/// Number of blocks `next`/`prev` print when no count is given.
pub const ADJACENT_DEFAULT_COUNT: i64 = 1;

/// Largest count `next`/`prev` accept; each block is materialized.
pub const ADJACENT_MAX_COUNT: i64 = 65_536;

/// Number of addresses `enumerate` prints when no limit is given.
pub const ENUMERATE_DEFAULT_LIMIT: u64 = 16;

/// Width of the label column in text reports.
pub const LABEL_WIDTH: usize = 18;

pub const ENV_FORMAT: &str = "CIDR_ALGEBRA_FORMAT";
pub const ENV_LOG_CONFIG: &str = "CIDR_ALGEBRA_LOG_CONFIG";

/// How command results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format '{other}'")),
        }
    }
}

/// Settings for one run of the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub format: OutputFormat,
    pub log_config: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            format: OutputFormat::Text,
            log_config: DEFAULT_LOG_CONFIG.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment (call `dotenv` first).
    pub fn from_env() -> Settings {
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Settings
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        if let Some(format) = lookup(ENV_FORMAT) {
            match format.parse() {
                Ok(format) => settings.format = format,
                Err(e) => log::warn!("Ignoring {ENV_FORMAT}: {e}"),
            }
        }
        if let Some(path) = lookup(ENV_LOG_CONFIG) {
            settings.log_config = path;
        }
        settings
    }
}
