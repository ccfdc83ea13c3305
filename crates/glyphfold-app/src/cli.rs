use clap::Parser;
use glyphfold_config::Config;
use glyphfold_core::InvalidInputPolicy;

use crate::io_lines::Options;

#[derive(Parser, Debug)]
#[command(
    name = "glyphfold",
    version,
    about = "Fold case, Latin accents and Cyrillic а/л look-alikes into a comparison key"
)]
pub struct Cli {
    /// Text to normalize, one output line per argument. Reads stdin when empty
    pub text: Vec<String>,

    /// Emit one JSON object per line: {"input": .., "output": ..}
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Fail on the first stdin line that is not valid UTF-8
    #[arg(long, default_value_t = false)]
    pub reject_invalid: bool,

    /// Trim surrounding whitespace before normalizing
    #[arg(long, default_value_t = false)]
    pub trim: bool,
}

impl Options {
    /// Flags can only tighten the config: `--reject-invalid` wins over the
    /// configured policy and `--trim` is OR-ed with `GLYPHFOLD_TRIM`.
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        Options {
            policy: if cli.reject_invalid {
                InvalidInputPolicy::Reject
            } else {
                config.input.invalid_input
            },
            trim: cli.trim || config.input.trim,
            json: cli.json,
        }
    }
}
