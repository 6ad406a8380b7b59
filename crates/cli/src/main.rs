//! git-contributors command-line tool.
//!
//! Runs the contributor pipeline against a repository and prints the
//! contributor list, derived stopwords, package metadata, or the indexed
//! documentation keys. Also generates and validates configuration files.

mod check;
mod style;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use git_contributors_core::config::ContributorsConfig;
use git_contributors_core::{BeforeBuild, ContributorsPlugin, IndexedStash, MetadataProvider};

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// git-contributors command-line tool.
#[derive(Parser, Debug)]
#[command(
    name = "git-contributors",
    version,
    about = "List the canonical contributors of a git repository"
)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply if it is absent.
    #[arg(short, long, global = true, default_value = "contributors.toml")]
    config: PathBuf,

    /// Repository directory, overriding `history.repo_path`.
    #[arg(short, long, global = true)]
    repo: Option<PathBuf>,

    /// Override the log level from the config file (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print contributors, one per line.
    List {
        /// Print `{name, email}` records as JSON instead.
        #[arg(long)]
        json: bool,
    },

    /// Print name stopwords derived from contributors, one per line.
    Stopwords,

    /// Print the package metadata record as JSON.
    Metadata,

    /// Print the indexed documentation keys as `key = value` lines.
    Stash,

    /// Check git availability, the canonical mapping, and the configuration.
    Check,

    /// Generate a default configuration file.
    Init {
        /// Output path for the generated config file.
        #[arg(short, long, default_value = "contributors.toml")]
        output: PathBuf,
    },

    /// Validate a configuration file.
    Validate,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { ref output } => {
            init_tracing(cli.log_level.as_deref().unwrap_or("warn"));
            cmd_init(output)
        }
        Commands::Validate => {
            init_tracing(cli.log_level.as_deref().unwrap_or("warn"));
            cmd_validate(&cli.config)
        }
        _ => {
            let config = load_config(&cli.config, cli.repo.as_deref())?;
            init_tracing(
                cli.log_level
                    .as_deref()
                    .unwrap_or(&config.logging.log_level),
            );
            debug!(
                config = %cli.config.display(),
                repo = %config.history.repo_path.display(),
                "configuration loaded"
            );

            match cli.command {
                Commands::Check => check::run_check(&config).await,
                command => {
                    let plugin = ContributorsPlugin::new(&config);
                    match command {
                        Commands::List { json } => cmd_list(&plugin, json).await,
                        Commands::Stopwords => cmd_stopwords(&plugin).await,
                        Commands::Metadata => cmd_metadata(&plugin).await,
                        Commands::Stash => cmd_stash(&plugin).await,
                        _ => unreachable!(),
                    }
                }
            }
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

// ---------------------------------------------------------------------------
// Config helpers
// ---------------------------------------------------------------------------

fn load_config(path: &Path, repo: Option<&Path>) -> Result<ContributorsConfig> {
    let mut config =
        ContributorsConfig::load_or_default(path).context("failed to load configuration file")?;
    if let Some(repo) = repo {
        config.history.repo_path = repo.to_path_buf();
    }
    config
        .validate()
        .context("configuration validation failed")?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

async fn cmd_list(plugin: &ContributorsPlugin, json: bool) -> Result<()> {
    if json {
        let records = plugin
            .records()
            .await
            .context("failed to resolve contributors")?;
        let json = serde_json::to_string_pretty(&records).context("failed to serialize contributors")?;
        println!("{}", json);
        return Ok(());
    }

    let contributors = plugin
        .contributors()
        .await
        .context("failed to resolve contributors")?;
    for contributor in contributors {
        println!("{}", contributor);
    }
    Ok(())
}

async fn cmd_stopwords(plugin: &ContributorsPlugin) -> Result<()> {
    let stopwords = plugin
        .stopwords()
        .await
        .context("failed to derive stopwords")?;
    for word in stopwords {
        println!("{}", word);
    }
    Ok(())
}

async fn cmd_metadata(plugin: &ContributorsPlugin) -> Result<()> {
    let record = plugin
        .metadata()
        .await
        .context("failed to build contributor metadata")?;
    let json = serde_json::to_string_pretty(&record).context("failed to serialize metadata")?;
    println!("{}", json);
    Ok(())
}

async fn cmd_stash(plugin: &ContributorsPlugin) -> Result<()> {
    let mut stash = IndexedStash::new();
    plugin
        .before_build(&mut stash)
        .await
        .context("failed to populate contributor keys")?;
    for (key, value) in stash.iter() {
        println!("{} = {}", key, value);
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# git-contributors configuration

[project]
# Declared authors. Matched exactly against git identities and never listed
# as contributors.
authors = []

[history]
git_binary = "git"
repo_path = "."
revision = "HEAD"
timeout_secs = 60

[canonical]
# TOML file mapping canonical identities to their aliases. When omitted,
# the mapping bundled with git-contributors is used.
# mapping_file = "canonical.toml"

[logging]
log_level = "warn"
"#;

fn cmd_init(output: &Path) -> Result<()> {
    if output.exists() {
        anyhow::bail!(
            "file already exists: {}. Use a different path or remove the existing file.",
            output.display()
        );
    }

    std::fs::write(output, DEFAULT_CONFIG).context("failed to write config file")?;

    println!("Default configuration written to {}", output.display());
    println!();
    println!("Next steps:");
    println!("  1. List your project's declared authors under [project]");
    println!(
        "  2. Validate with: git-contributors validate --config {}",
        output.display()
    );
    println!(
        "  3. Print contributors: git-contributors list --config {}",
        output.display()
    );

    Ok(())
}

fn cmd_validate(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {}", config_path.display());
    println!();

    let config =
        ContributorsConfig::load_from_file(config_path).context("failed to parse configuration")?;
    println!("  [OK] TOML structure is valid");

    match config.validate() {
        Ok(()) => {
            println!("  [OK] All fields are valid");
        }
        Err(e) => {
            println!("  [FAIL] Validation error: {}", e);
            anyhow::bail!("configuration validation failed");
        }
    }

    println!();
    println!("Configuration summary:");
    println!("  Declared authors : {}", config.project.authors.len());
    println!("  Git binary       : {}", config.history.git_binary);
    println!("  Repository       : {}", config.history.repo_path.display());
    println!("  Revision         : {}", config.history.revision);
    println!("  Timeout          : {}s", config.history.timeout_secs);
    println!(
        "  Canonical map    : {}",
        config
            .canonical
            .mapping_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "bundled".into())
    );

    Ok(())
}
