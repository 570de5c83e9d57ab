use chrono::NaiveDate;

/// Date format used throughout the demo. The core treats dates as opaque
/// strings; only the driver produces them.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Demo driver configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// The date the demo treats as "today".
    pub today: NaiveDate,
}

impl Config {
    /// Load configuration from environment variables.
    /// UTLAAN_TODAY (DD/MM/YYYY) overrides the clock for deterministic runs.
    pub fn from_env() -> Result<Self, ConfigError> {
        let today = match std::env::var("UTLAAN_TODAY") {
            Ok(raw) => NaiveDate::parse_from_str(&raw, DATE_FORMAT)
                .map_err(|_| ConfigError::Invalid("UTLAAN_TODAY", "must be a DD/MM/YYYY date"))?,
            Err(_) => chrono::Local::now().date_naive(),
        };

        Ok(Config { today })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}
