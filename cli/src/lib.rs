use std::fmt;
use std::path::Path;

use xd::config::ParseOptions;

/// Why parse options could not be loaded from a config file.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(error) => write!(f, "cannot read config: {}", error),
            ConfigError::Toml(error) => write!(f, "bad config: {}", error),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load [`ParseOptions`] overrides from a TOML file. Absent keys keep their
/// defaults.
pub fn load_options(path: &Path) -> Result<ParseOptions, ConfigError> {
    let source = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&source).map_err(ConfigError::Toml)
}
