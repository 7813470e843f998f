
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::indexer::IndexOptions;

pub const CONFIG_FILE_NAME: &str = "search-index.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub tutorials: TutorialsConfig,
    #[serde(default)]
    pub feeds: FeedsConfig,
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Which site build the index is generated for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputDir {
    /// Development build in `_dev`
    Dev,
    /// Production build in `_site`
    #[default]
    Site,
}

impl OutputDir {
    #[inline]
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Dev => "_dev",
            Self::Site => "_site",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub output: OutputDir,
    /// Index file, relative to the output directory
    pub index_file: PathBuf,
    /// Attach keywords to the finished index
    pub production: bool,
    /// JSON object of relative URL to keywords, relative to the config directory
    pub keywords_file: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output: OutputDir::Site,
            index_file: PathBuf::from("searchIndex.json"),
            production: false,
            keywords_file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IndexingConfig {
    /// Site branding removed from the end of every page title
    pub title_suffix: String,
    /// Chunks with exactly this heading are never indexed
    pub excluded_heading: String,
    /// Output-relative path prefixes that are never walked
    pub skip_paths: Vec<PathBuf>,
    pub docs_dir: PathBuf,
    pub articles_dir: PathBuf,
    pub api_dir: PathBuf,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            title_suffix: " – Lit".to_string(),
            excluded_heading: "See also".to_string(),
            skip_paths: ["docs/internal", "docs/v1", "docs/v2", "articles/tags", "article"]
                .into_iter()
                .map(PathBuf::from)
                .collect(),
            docs_dir: PathBuf::from("docs"),
            articles_dir: PathBuf::from("articles"),
            api_dir: PathBuf::from("docs/api"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TutorialsConfig {
    /// Tutorial manifest, relative to the output directory
    pub manifest: PathBuf,
    /// Rendered step descriptions, relative to the output directory
    pub content_dir: PathBuf,
    pub url_prefix: String,
}

impl Default for TutorialsConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("tutorials/tutorials.json"),
            content_dir: PathBuf::from("tutorials/content"),
            url_prefix: "/tutorials/".to_string(),
        }
    }
}

/// Pre-built record feeds appended after the crawled categories
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedsConfig {
    pub videos: Option<PathBuf>,
    pub external: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid index file: {0} (must be a relative path ending in .json)")]
    InvalidIndexFile(String),
    #[error("Invalid path: {0} (must be relative to the output directory)")]
    AbsolutePath(String),
    #[error("Invalid excluded heading: {0:?} (cannot be empty)")]
    EmptyExcludedHeading(String),
    #[error("Invalid tutorial URL prefix: {0} (must start and end with '/')")]
    InvalidUrlPrefix(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Config {
    #[inline]
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(Self {
                base_dir: config_dir.as_ref().to_path_buf(),
                ..Self::default()
            });
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;
        config.base_dir = config_dir.as_ref().to_path_buf();

        config
            .validate()
            .with_context(|| "Configuration validation failed")?;

        Ok(config)
    }

    #[inline]
    pub fn save(&self) -> Result<()> {
        self.validate()
            .context("Configuration validation failed before saving")?;

        let config_dir = self.get_base_dir();

        fs::create_dir_all(config_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                config_dir.display()
            )
        })?;

        let config_path = self.config_file_path();
        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Get the directory the configuration was loaded from
    #[inline]
    pub fn get_base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.site.validate()?;
        self.indexing.validate()?;
        self.tutorials.validate()?;
        Ok(())
    }

    #[inline]
    pub fn config_file_path(&self) -> PathBuf {
        self.get_base_dir().join(CONFIG_FILE_NAME)
    }

    /// The rendered site the index is built from
    #[inline]
    pub fn site_dir(&self) -> PathBuf {
        self.get_base_dir().join(self.site.output.dir_name())
    }

    /// Where the combined index is written
    #[inline]
    pub fn index_path(&self) -> PathBuf {
        self.site_dir().join(&self.site.index_file)
    }

    #[inline]
    pub fn keywords_path(&self) -> Option<PathBuf> {
        self.site
            .keywords_file
            .as_ref()
            .map(|path| self.get_base_dir().join(path))
    }

    /// Configured feeds in indexing order, resolved against the config directory
    #[inline]
    pub fn feed_paths(&self) -> Vec<PathBuf> {
        [&self.feeds.videos, &self.feeds.external]
            .into_iter()
            .flatten()
            .map(|path| self.get_base_dir().join(path))
            .collect()
    }

    #[inline]
    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            title_suffix: self.indexing.title_suffix.clone(),
            excluded_heading: self.indexing.excluded_heading.clone(),
        }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let is_json = self
            .index_file
            .extension()
            .is_some_and(|extension| extension == "json");
        if self.index_file.is_absolute() || !is_json {
            return Err(ConfigError::InvalidIndexFile(
                self.index_file.display().to_string(),
            ));
        }
        Ok(())
    }
}

impl IndexingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.excluded_heading.trim().is_empty() {
            return Err(ConfigError::EmptyExcludedHeading(
                self.excluded_heading.clone(),
            ));
        }

        let dirs = [&self.docs_dir, &self.articles_dir, &self.api_dir];
        for path in dirs.into_iter().chain(&self.skip_paths) {
            ensure_relative(path)?;
        }

        Ok(())
    }
}

impl TutorialsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_relative(&self.manifest)?;
        ensure_relative(&self.content_dir)?;

        if !self.url_prefix.starts_with('/') || !self.url_prefix.ends_with('/') {
            return Err(ConfigError::InvalidUrlPrefix(self.url_prefix.clone()));
        }

        Ok(())
    }
}

fn ensure_relative(path: &Path) -> Result<(), ConfigError> {
    if path.is_absolute() {
        return Err(ConfigError::AbsolutePath(path.display().to_string()));
    }
    Ok(())
}
