//! Entry point for the `l10n` lookup tool.
//!
//! ```text
//! l10n [OPTIONS] <KEY> [COUNT]
//! ```
//!
//! Settings come from `.l10n.json` in the workspace (the current directory
//! unless `--workspace` is given). The preference string is taken from
//! `--languages` or `L10N_LANGUAGES` when set.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dotpath_l10n::L10nError;
use dotpath_l10n::config::{
    ConfigError,
    ConfigManager,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Resolve a message key against the configured locale directories.
#[derive(Debug, Parser)]
#[command(name = "l10n", version)]
struct Cli {
    /// Message key; used as the message itself when no locale defines it
    key: String,

    /// Plural count; selects a `|`-separated form and replaces `#`
    #[arg(allow_negative_numbers = true)]
    count: Option<i64>,

    /// Placeholder substitution, repeatable
    #[arg(short = 's', long = "set", value_name = "TOKEN=VALUE", value_parser = parse_substitution)]
    substitutions: Vec<(String, String)>,

    /// Preference string, e.g. "de-AT, en;q=0.5"
    #[arg(short, long, env = "L10N_LANGUAGES")]
    languages: Option<String>,

    /// Directory holding `.l10n.json` [default: current directory]
    #[arg(short, long, value_name = "PATH")]
    workspace: Option<PathBuf>,
}

/// Splits `TOKEN=VALUE` at the first `=`.
fn parse_substitution(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((token, value)) if !token.is_empty() => Ok((token.to_string(), value.to_string())),
        _ => Err(format!("expected TOKEN=VALUE, got '{arg}'")),
    }
}

/// Failures reported to the user.
#[derive(Error, Debug)]
enum CliError {
    /// Settings could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Message resolution failed
    #[error(transparent)]
    L10n(#[from] L10nError),
    /// Working directory or stdout failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Nowhere left to report a failed stderr write.
            writeln!(std::io::stderr(), "{e}").ok();
            ExitCode::FAILURE
        }
    }
}

/// Resolves the requested message and writes it to `out`.
fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let workspace = match cli.workspace {
        Some(workspace) => workspace,
        None => std::env::current_dir()?,
    };

    let mut manager = ConfigManager::new();
    manager.load_settings(Some(workspace))?;

    let mut translator = manager.translator();
    if let Some(languages) = &cli.languages {
        translator.set_languages(languages);
    }
    tracing::debug!(languages = ?translator.languages(), key = %cli.key, "Resolving message");

    let substitutions: Vec<(&str, &str)> =
        cli.substitutions.iter().map(|(token, value)| (token.as_str(), value.as_str())).collect();

    let message = match cli.count {
        Some(count) => translator.choice(&cli.key, count, &substitutions)?,
        None => translator.translate(&cli.key, &substitutions)?,
    };

    writeln!(out, "{message}")?;
    Ok(())
}
