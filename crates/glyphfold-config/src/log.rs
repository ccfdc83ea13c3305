use serde::{Deserialize, Serialize};

fn default_filter() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
    /// `EnvFilter` directive, `RUST_LOG` still wins when set
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_filter(),
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::from_lookup(crate::env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let format = lookup("GLYPHFOLD_LOG_FORMAT")
            .and_then(|v| LogFormat::parse(&v))
            .unwrap_or_default();

        let filter = lookup("GLYPHFOLD_LOG_FILTER").unwrap_or_else(default_filter);

        LogConfig { format, filter }
    }
}
