use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lit_search_index::commands::{build_index, chunk_file, init_config, show_config};
use lit_search_index::config::{Config, OutputDir};

#[derive(Parser)]
#[command(name = "lit-search-index")]
#[command(about = "Builds the lit.dev search index from the rendered site")]
#[command(version)]
struct Cli {
    /// Directory holding search-index.toml and the site output directories
    #[arg(long, global = true, default_value = ".")]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index the rendered site and write the combined search index
    Build {
        /// Which site build to index
        #[arg(long, value_enum)]
        output: Option<OutputDir>,
        /// Attach keywords from the configured keywords file
        #[arg(long)]
        production: bool,
    },
    /// Print the search chunks of a single rendered page
    Chunk {
        /// Rendered HTML file
        file: PathBuf,
    },
    /// Show or initialize the configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Write a default configuration file
        #[arg(long, conflicts_with = "show")]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { output, production } => {
            let mut config = Config::load(&cli.config).context("Failed to load configuration")?;
            if let Some(output) = output {
                config.site.output = output;
            }
            config.site.production |= production;
            build_index(&config).await?;
        }
        Commands::Chunk { file } => {
            chunk_file(&file).await?;
        }
        Commands::Config { show, init } => {
            if init {
                init_config(&cli.config)?;
            } else {
                let config = Config::load(&cli.config).context("Failed to load configuration")?;
                if show {
                    show_config(&config)?;
                } else {
                    eprintln!(
                        "Config file: {}",
                        config.config_file_path().display()
                    );
                }
            }
        }
    }

    Ok(())
}
