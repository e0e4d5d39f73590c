//! Osusume Artifact Sync Tool
//!
//! Downloads and inspects the frozen artifacts the recommender loads at
//! startup, so operators can prime or reset a data directory without
//! starting the server.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use osusume_core::artifacts::ensure_embeddings;
use osusume_core::DataConfig;

/// CLI arguments
#[derive(Parser)]
#[command(name = "artifact-sync")]
#[command(about = "Download and inspect Osusume artifacts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Artifact directory
    #[arg(short = 'D', long, env = "OSUSUME_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Remote embeddings URL
    #[arg(long, env = "OSUSUME_EMBEDDINGS_URL")]
    embeddings_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the ensemble embedding matrix
    Download {
        /// Force re-download if the file exists
        #[arg(short, long)]
        force: bool,
    },
    /// Show which artifacts are present
    Status,
    /// Remove downloaded artifacts
    Clean {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = DataConfig::default();
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(url) = cli.embeddings_url {
        config = config.with_embeddings_url(url);
    }

    match cli.command {
        Commands::Download { force } => download(&config, force),
        Commands::Status => status(&config),
        Commands::Clean { yes } => clean(&config, yes),
    }
}

fn download(config: &DataConfig, force: bool) -> Result<()> {
    let path = config.embeddings_path();
    if force && path.exists() {
        fs::remove_file(&path)?;
        info!("removed existing embedding matrix");
    }

    if path.exists() {
        info!(path = %path.display(), "embedding matrix already present");
        return Ok(());
    }

    let path = ensure_embeddings(config)?;
    info!(path = %path.display(), "download complete");
    Ok(())
}

fn status(config: &DataConfig) -> Result<()> {
    println!("data directory: {}", config.data_dir.display());
    for path in config.artifact_paths() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match fs::metadata(&path) {
            Ok(meta) => println!("  {name:<36} {:>12} bytes", meta.len()),
            Err(_) => println!("  {name:<36}      missing"),
        }
    }
    Ok(())
}

fn clean(config: &DataConfig, yes: bool) -> Result<()> {
    if !yes {
        println!(
            "This will remove all artifacts under {}.",
            config.data_dir.display()
        );
        print!("Are you sure? [y/N]: ");
        use std::io::Write;
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            info!("clean cancelled");
            return Ok(());
        }
    }

    let mut removed = 0usize;
    for path in config.artifact_paths() {
        if path.exists() {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    info!(removed, "artifacts removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_paths() {
        let config = DataConfig::default();
        assert!(config
            .embeddings_path()
            .to_string_lossy()
            .contains("osusume"));
        assert_eq!(config.artifact_paths().len(), 7);
    }
}
