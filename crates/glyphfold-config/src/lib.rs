use serde::{Deserialize, Serialize};

use self::input::InputConfig;
use self::log::LogConfig;

pub mod input;
pub mod log;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub log: LogConfig,
}

impl Config {
    pub fn new() -> Self {
        Config {
            input: InputConfig::new(),
            log: LogConfig::new(),
        }
    }

    /// Build from an arbitrary lookup instead of the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Config {
            input: InputConfig::from_lookup(&lookup),
            log: LogConfig::from_lookup(&lookup),
        }
    }
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
