use anyhow::{Context, Result, bail};
use console::style;
use itertools::Itertools;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::chunker::page_search_chunks;
use crate::config::Config;
use crate::indexer::{SearchIndexPipeline, write_search_index};
use crate::model::UserFacingPageData;

/// Build the combined search index for the configured site and write it
#[inline]
pub async fn build_index(config: &Config) -> Result<Vec<UserFacingPageData>> {
    let site_dir = config.site_dir();
    if !site_dir.is_dir() {
        bail!(
            "Site output directory not found: {} (build the site first)",
            site_dir.display()
        );
    }

    info!("Building search index from {}", site_dir.display());

    let pipeline = SearchIndexPipeline::from_config(config);
    let records = pipeline
        .run()
        .await
        .context("Search index generation failed")?;

    let index_path = config.index_path();
    write_search_index(&index_path, &records)
        .await
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    print_summary(&records, &index_path);

    Ok(records)
}

fn print_summary(records: &[UserFacingPageData], index_path: &Path) {
    let mut per_type: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for record in records {
        let counts = per_type.entry(&*record.doc_type.tag).or_default();
        if record.is_parent() {
            counts.0 += 1;
        } else {
            counts.1 += 1;
        }
    }

    eprintln!("{}", style("✓ Search index built").green().bold());
    for (tag, (pages, sections)) in &per_type {
        eprintln!(
            "  {}: {} pages, {} sections",
            style(tag).cyan(),
            pages,
            sections
        );
    }
    eprintln!(
        "  {} records written to {}",
        style(records.len()).bold(),
        style(index_path.display()).dim()
    );
}

/// Print the chunks a single rendered page produces
#[inline]
pub async fn chunk_file(path: &Path) -> Result<()> {
    let html = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let chunks = page_search_chunks(&html)
        .with_context(|| format!("Failed to chunk {}", path.display()))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&chunks).context("Failed to serialize chunks")?
    );

    Ok(())
}

/// Print the effective configuration
#[inline]
pub fn show_config(config: &Config) -> Result<()> {
    eprintln!("{}", style("📋 Current Configuration").bold().cyan());
    eprintln!();

    eprintln!("{}", style("Site:").bold().yellow());
    eprintln!("  Output: {}", style(config.site_dir().display()).cyan());
    eprintln!("  Index file: {}", style(config.index_path().display()).cyan());
    eprintln!("  Production: {}", style(config.site.production).cyan());
    match config.keywords_path() {
        Some(path) => eprintln!("  Keywords: {}", style(path.display()).cyan()),
        None => eprintln!("  Keywords: {}", style("none").dim()),
    }

    eprintln!();
    eprintln!("{}", style("Indexing:").bold().yellow());
    eprintln!(
        "  Title suffix: {}",
        style(format!("{:?}", config.indexing.title_suffix)).cyan()
    );
    eprintln!(
        "  Excluded heading: {}",
        style(format!("{:?}", config.indexing.excluded_heading)).cyan()
    );
    eprintln!(
        "  Skipped paths: {}",
        style(
            config
                .indexing
                .skip_paths
                .iter()
                .map(|path| path.display())
                .join(", ")
        )
        .cyan()
    );

    let feeds = config.feed_paths();
    if !feeds.is_empty() {
        eprintln!();
        eprintln!("{}", style("Feeds:").bold().yellow());
        for feed in feeds {
            eprintln!("  {}", style(feed.display()).cyan());
        }
    }

    eprintln!();
    eprintln!(
        "Config file: {}",
        style(config.config_file_path().display()).dim()
    );

    Ok(())
}

/// Write a default configuration file unless one exists
#[inline]
pub fn init_config(config_dir: &Path) -> Result<()> {
    let config = Config::load(config_dir).context("Failed to load configuration")?;
    let config_path = config.config_file_path();
    if config_path.exists() {
        eprintln!(
            "Configuration already exists: {}",
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    config.save().context("Failed to save configuration")?;
    eprintln!(
        "{} {}",
        style("✓ Configuration written to").green(),
        style(config_path.display()).cyan()
    );

    Ok(())
}
