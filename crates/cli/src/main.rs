use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

use parley_core::{Config, ContactExport, ContactProfile, TranscriptSession, group_events};
use parley_ui::{App, AppState};

/// Parley - a terminal viewer for recorded contact-center chat transcripts
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(about = "Review recorded contact-center chat transcripts in the terminal", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to parley.toml (default: ./parley.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open a contact export in the interactive viewer
    View {
        /// Contact export to open (default: the config's fixture)
        #[arg(short, long, value_name = "PATH")]
        fixture: Option<PathBuf>,
    },
    /// Print the grouped transcript to stdout and exit
    Dump {
        /// Contact export to dump (default: the config's fixture)
        #[arg(short, long, value_name = "PATH")]
        fixture: Option<PathBuf>,

        /// Emit the groups as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write an example parley.toml
    Init,
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(|| PathBuf::from("parley.toml"));

    if let Commands::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "parley", &mut std::io::stdout());
        return Ok(());
    }

    if let Commands::Init = &cli.command {
        return cmd_init(&config_path);
    }

    let config = load_config(&config_path, cli.config.is_some(), cli.verbose)?;

    let _log_guard = parley_core::init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::View { fixture } => cmd_view(config, fixture, cli.verbose),
        Commands::Dump { fixture, json } => cmd_dump(config, fixture, json),
        Commands::Init | Commands::Completions { .. } => unreachable!(),
    }
}

/// Load config, falling back to defaults when the default path is absent.
/// An explicitly requested config file must exist.
fn load_config(path: &Path, explicit: bool, verbose: bool) -> Result<Config> {
    if path.exists() {
        if verbose {
            println!("{} Loading config from {}", "Info:".blue().bold(), path.display());
        }
        return Config::from_file(&path.to_path_buf()).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e));
    }

    if explicit {
        anyhow::bail!("config not found: {}", path.display());
    }

    if verbose {
        println!("{} No {} found, using defaults", "Info:".blue().bold(), path.display());
    }
    Ok(Config::default())
}

/// The fixture flag wins over the configured default
fn resolve_fixture(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.unwrap_or_else(|| config.fixture.clone())
}

/// Write an example parley.toml next to the caller
fn cmd_init(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("config already exists: {}", path.display());
    }

    std::fs::write(path, Config::example()).context("Failed to write config")?;
    println!(
        "{} Created {}. Edit it to point at your contact exports.",
        "Success:".green().bold(),
        path.display()
    );
    Ok(())
}

/// Open the interactive viewer
fn cmd_view(config: Config, fixture: Option<PathBuf>, verbose: bool) -> Result<()> {
    let fixture_path = resolve_fixture(fixture, &config);

    if verbose {
        println!("{} Fixture: {}", "Info:".blue().bold(), fixture_path.display().cyan());
        println!(
            "{} Local participant: {}",
            "Info:".blue().bold(),
            config.local_participant.cyan()
        );
    }

    let export = ContactExport::from_file(&fixture_path)
        .with_context(|| format!("Failed to load fixture '{}'", fixture_path.display()))?;
    let (start, events) = export.decode().context("Failed to decode fixture")?;
    tracing::info!(fixture = %fixture_path.display(), events = events.len(), "opening viewer");

    let contacts = ContactProfile::directory(&events, &config.contact_names(), &config.contact_abouts());
    let session = TranscriptSession::new(start, events, config.local_participant.as_str());
    let mut app = App::new(AppState::new(session, contacts, config.time_format.as_str()));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build runtime")?;
    runtime.block_on(app.run()).context("Viewer session failed")?;

    Ok(())
}

/// Print the grouped transcript without entering the TUI
fn cmd_dump(config: Config, fixture: Option<PathBuf>, json: bool) -> Result<()> {
    let fixture_path = resolve_fixture(fixture, &config);

    let export = ContactExport::from_file(&fixture_path)
        .with_context(|| format!("Failed to load fixture '{}'", fixture_path.display()))?;
    let (start, events) = export.decode().context("Failed to decode fixture")?;
    let groups = group_events(&events, start, &config.time_format);

    if json {
        println!("{}", serde_json::to_string_pretty(&groups).context("Failed to serialize groups")?);
        return Ok(());
    }

    if groups.is_empty() {
        println!("{}", "No messages in this conversation".yellow());
        return Ok(());
    }

    let contacts = ContactProfile::directory(&events, &config.contact_names(), &config.contact_abouts());
    for group in &groups {
        let display_name = contacts
            .iter()
            .find(|c| c.id == group.sender_id)
            .map(|c| c.display_name.as_str())
            .unwrap_or(group.sender_id.as_str());

        println!("{}", display_name.cyan().bold());
        for message in &group.messages {
            println!("  {}", message.text);
            println!("  {}", message.display_time.dimmed());
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_fixture_flag_wins() {
        let config = Config::default();
        let resolved = resolve_fixture(Some(PathBuf::from("/tmp/export.json")), &config);
        assert_eq!(resolved, PathBuf::from("/tmp/export.json"));
    }

    #[test]
    fn test_resolve_fixture_falls_back_to_config() {
        let config = Config::default();
        let resolved = resolve_fixture(None, &config);
        assert_eq!(resolved, config.fixture);
    }

    #[test]
    fn test_load_config_missing_default_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parley.toml");

        let config = load_config(&path, false, false).unwrap();
        assert_eq!(config.local_participant, "CUSTOMER");
    }

    #[test]
    fn test_load_config_missing_explicit_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parley.toml");

        let err = load_config(&path, true, false).unwrap_err();
        assert!(err.to_string().contains("config not found"));
    }

    #[test]
    fn test_load_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parley.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", Config::example()).unwrap();

        let config = load_config(&path, true, false).unwrap();
        assert_eq!(config.contacts["AGENT"].display_name, "Support Agent");
    }

    #[test]
    fn test_cmd_init_writes_example() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parley.toml");

        cmd_init(&path).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.local_participant, "CUSTOMER");

        let err = cmd_init(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }
}
