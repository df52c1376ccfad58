//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use readme_indexer_core::readme::SpliceOutcome;
use readme_indexer_core::{notes, toc};
use readme_indexer_shared::{AppConfig, NotesConfig, TocConfig, init_config, load_config};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// readme-indexer — keep a README's notes list and article tables current.
#[derive(Parser)]
#[command(
    name = "readme-indexer",
    version,
    about = "Regenerate the notes list and per-category article tables inside README.md.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Repository root holding README.md, notes/ and articles/.
    #[arg(long, default_value = ".", global = true)]
    pub root: PathBuf,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Rewrite the block between the NOTES_START and NOTES_END markers.
    Notes,

    /// Rebuild the per-category article tables.
    Toc {
        /// Print the run report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write readme-indexer.toml with defaults into the root.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "readme_indexer=info",
        1 => "readme_indexer=debug",
        _ => "readme_indexer=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Notes => cmd_notes(&cli.root),
        Command::Toc { json } => cmd_toc(&cli.root, json),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(&cli.root),
            ConfigAction::Show => cmd_config_show(&cli.root),
        },
    }
}

fn load(root: &Path) -> Result<AppConfig> {
    load_config(root).wrap_err_with(|| format!("loading config from {}", root.display()))
}

fn cmd_notes(root: &Path) -> Result<()> {
    let config = NotesConfig::new(root, &load(root)?);
    info!(notes_dir = %config.notes_dir.display(), "updating notes index");

    let report = notes::update_notes(&config)?;

    println!(
        "{} notes list updated with {} notes.",
        report.readme_path.display(),
        report.note_count
    );
    Ok(())
}

fn cmd_toc(root: &Path, json: bool) -> Result<()> {
    let config = TocConfig::new(root, &load(root)?);
    info!(articles_dir = %config.articles_dir.display(), "updating table of contents");

    let report = toc::update_toc(&config).wrap_err("table of contents was not updated")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} table of contents updated with {} articles.",
        report.readme_path.display(),
        report.article_count
    );
    for section in &report.sections {
        let action = match section.outcome {
            SpliceOutcome::Replaced(_) => "replaced",
            SpliceOutcome::Inserted => "inserted",
            SpliceOutcome::Skipped => "skipped (no section, no anchor heading)",
        };
        println!(
            "  {} {:<28} {:>3} articles  {action}",
            section.category.emoji(),
            section.category.title(),
            section.articles
        );
    }
    if !report.degraded.is_empty() {
        println!("  {} file(s) listed with default metadata:", report.degraded.len());
        for path in &report.degraded {
            println!("    {}", path.display());
        }
    }
    Ok(())
}

fn cmd_config_init(root: &Path) -> Result<()> {
    let path = init_config(root)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(root: &Path) -> Result<()> {
    let config = load(root)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn subcommands_need_no_arguments() {
        let cli = Cli::try_parse_from(["readme-indexer", "notes"]).expect("parse");
        assert!(matches!(cli.command, Command::Notes));
        assert_eq!(cli.root, PathBuf::from("."));

        let cli = Cli::try_parse_from(["readme-indexer", "toc", "--json", "-vv"]).expect("parse");
        assert!(matches!(cli.command, Command::Toc { json: true }));
        assert_eq!(cli.verbose, 2);
    }
}
