#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::{
    CategoryIndex, CategoryIndexer, DirectorySource, FeedCategory, PageCategory, SkipList,
    TutorialCategory, apply_keywords, load_keywords,
};
use crate::config::Config;
use crate::model::{DocType, UserFacingPageData};
use crate::{IndexError, Result};

/// Runs categories one after another, each continuing the previous one's ids
#[derive(Default)]
pub struct SearchIndexPipeline {
    categories: Vec<Box<dyn CategoryIndexer>>,
    keywords_path: Option<PathBuf>,
}

impl SearchIndexPipeline {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The site's categories in publishing order: docs, articles, API
    /// reference, tutorials, then any configured feeds
    #[inline]
    pub fn from_config(config: &Config) -> Self {
        let site_dir = config.site_dir();
        let indexing = &config.indexing;
        let options = config.index_options();
        let skip = SkipList::new(&site_dir, &indexing.skip_paths);

        let mut pipeline = Self::new()
            .with_category(PageCategory::new(
                "docs",
                DirectorySource::new(
                    &site_dir,
                    &indexing.docs_dir,
                    skip.clone().with_prefix(site_dir.join(&indexing.api_dir)),
                ),
                DocType::DOCS,
                options.clone(),
            ))
            .with_category(PageCategory::new(
                "articles",
                DirectorySource::new(&site_dir, &indexing.articles_dir, skip.clone()),
                DocType::ARTICLE,
                options.clone(),
            ))
            .with_category(PageCategory::new(
                "api",
                DirectorySource::new(&site_dir, &indexing.api_dir, skip),
                DocType::API,
                options.clone(),
            ))
            .with_category(TutorialCategory::new(
                &site_dir,
                config.tutorials.clone(),
                options.clone(),
            ));

        for feed in config.feed_paths() {
            pipeline = pipeline.with_category(FeedCategory::new(feed, options.clone()));
        }

        if config.site.production {
            if let Some(path) = config.keywords_path() {
                pipeline = pipeline.with_keywords(path);
            }
        }

        pipeline
    }

    #[inline]
    pub fn with_category(mut self, category: impl CategoryIndexer + 'static) -> Self {
        self.categories.push(Box::new(category));
        self
    }

    #[inline]
    pub fn with_keywords(mut self, path: impl Into<PathBuf>) -> Self {
        self.keywords_path = Some(path.into());
        self
    }

    /// Names of the configured categories, in indexing order
    #[inline]
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|category| category.name()).collect()
    }

    /// Build the combined index.
    ///
    /// The first error aborts the run; nothing is returned for the categories
    /// that did succeed.
    #[inline]
    pub async fn run(&self) -> Result<Vec<UserFacingPageData>> {
        let bar = if console::user_attended_stderr() {
            ProgressBar::new_spinner().with_style(
                ProgressStyle::with_template("{spinner} Indexing {msg}")
                    .expect("style template is valid"),
            )
        } else {
            ProgressBar::hidden()
        };
        bar.enable_steady_tick(Duration::from_millis(100));

        let mut combined = CategoryIndex::empty(0);
        for category in &self.categories {
            bar.set_message(category.name().to_string());

            let index = category.index(combined.last_id).await?;
            info!(
                "Indexed {}: {} records (ids {}..={})",
                category.name(),
                index.records.len(),
                combined.last_id + 1,
                index.last_id
            );
            combined.append(index);
        }
        bar.finish_and_clear();

        if let Some(path) = &self.keywords_path {
            let keywords = load_keywords(path).await?;
            let applied = apply_keywords(&mut combined.records, &keywords);
            info!("Attached keywords to {} records", applied);
        }

        Ok(combined.records)
    }
}

/// Write the combined index as a JSON array.
///
/// The array goes to a sibling temporary file first and is then renamed over
/// `path`, so readers never observe a half-written index.
#[inline]
pub async fn write_search_index(path: &Path, records: &[UserFacingPageData]) -> Result<()> {
    let json = serde_json::to_vec(records).map_err(|source| IndexError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, json).await?;
    tokio::fs::rename(&temp_path, path).await?;

    info!("Wrote {} records to {}", records.len(), path.display());

    Ok(())
}
