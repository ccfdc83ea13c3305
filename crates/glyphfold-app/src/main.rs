use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use glyphfold_config::Config;
use glyphfold_config::log::{LogConfig, LogFormat};
use tracing_subscriber::{EnvFilter, fmt};

pub mod cli;
pub mod io_lines;

use self::cli::Cli;
use self::io_lines::{Options, process_args, process_reader};


fn main() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = Config::new();
    init_tracing(&config.log);

    let options = Options::resolve(&cli, &config);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let summary = if !cli.text.is_empty() {
        tracing::info!(count = cli.text.len(), "normalizing arguments");
        process_args(&cli.text, &options, &mut out)?
    } else if atty::is(atty::Stream::Stdin) {
        Cli::command().print_help()?;
        return Ok(());
    } else {
        tracing::info!(policy = options.policy.as_str(), "normalizing stdin");
        process_reader(io::stdin().lock(), &options, &mut out)?
    };

    out.flush().context("failed to flush stdout")?;
    tracing::debug!(lines = summary.lines, replaced = summary.replaced, "done");

    Ok(())
}

fn init_tracing(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
}
