use serde::Deserialize;

use crate::roll::DEFAULT_MAX_ROLLS;
use crate::trace::Level;

/// Runtime settings, read from `AUTOROLL_*` environment variables.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub trace: Level,
    /// Dice allowed per evaluation; `None` disables the limit.
    pub max_rolls: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            trace: Level::Error,
            max_rolls: Some(DEFAULT_MAX_ROLLS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ::config::ConfigError> {
        let mut cfg = ::config::Config::new();
        cfg.merge(::config::Environment::with_prefix("AUTOROLL"))?;
        cfg.try_into()
    }
}
