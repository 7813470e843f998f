
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use itertools::Itertools;
use tokio::fs;
use tracing::{debug, warn};

use crate::Result;

/// Supplies the pages of one category, keyed by site-relative URL.
///
/// The map's ordering is the order ids are assigned in.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn pages(&self) -> Result<BTreeMap<String, PathBuf>>;
}

/// Absolute path prefixes that are never indexed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipList {
    prefixes: Vec<PathBuf>,
}

impl SkipList {
    /// Resolve site-relative prefixes against `site_dir`
    #[inline]
    pub fn new<I, P>(site_dir: &Path, prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(|prefix| site_dir.join(prefix))
                .collect(),
        }
    }

    #[inline]
    pub fn with_prefix(mut self, prefix: PathBuf) -> Self {
        self.prefixes.push(prefix);
        self
    }

    /// Whether `path` is one of the prefixes or lies below one
    #[inline]
    pub fn matches(&self, path: &Path) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix))
    }
}

/// Rendered `.html` files below one directory of the built site
#[derive(Debug, Clone)]
pub struct DirectorySource {
    site_dir: PathBuf,
    root: PathBuf,
    skip: SkipList,
}

impl DirectorySource {
    #[inline]
    pub fn new(site_dir: impl Into<PathBuf>, root: impl AsRef<Path>, skip: SkipList) -> Self {
        let site_dir = site_dir.into();
        let root = site_dir.join(root);
        Self {
            site_dir,
            root,
            skip,
        }
    }
}

#[async_trait]
impl PageSource for DirectorySource {
    async fn pages(&self) -> Result<BTreeMap<String, PathBuf>> {
        walk_dir(&self.site_dir, &self.root, &self.skip).await
    }
}

/// Collect the `.html` files below `root`, keyed by their URL relative to
/// `site_dir`.
///
/// Entries with an `html` extension are pages, entries without an extension
/// are descended into, anything else is ignored.
#[inline]
pub async fn walk_dir(
    site_dir: &Path,
    root: &Path,
    skip: &SkipList,
) -> Result<BTreeMap<String, PathBuf>> {
    let mut pages = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        if skip.matches(&dir) {
            debug!("Skipping directory {}", dir.display());
            continue;
        }

        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if skip.matches(&path) {
                debug!("Skipping {}", path.display());
                continue;
            }

            match path.extension().map(|extension| extension == "html") {
                Some(true) => {
                    pages.insert(relative_url(site_dir, &path), path);
                }
                Some(false) => {}
                None => {
                    if entry.file_type().await?.is_dir() {
                        pending.push(path);
                    } else {
                        warn!("Ignoring extensionless file {}", path.display());
                    }
                }
            }
        }
    }

    debug!("Found {} pages below {}", pages.len(), root.display());

    Ok(pages)
}

/// `/`-separated URL of `path` relative to `site_dir`, with a leading `/`
#[inline]
pub fn relative_url(site_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(site_dir).unwrap_or(path);
    let url = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .join("/");
    format!("/{url}")
}
