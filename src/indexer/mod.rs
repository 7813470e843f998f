// Indexer module
// Turns rendered pages into numbered, parent-linked search records

pub mod feeds;
pub mod keywords;
pub mod pipeline;
pub mod tutorials;
pub mod walk;


use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::debug;

use crate::chunker::page_search_chunks;
use crate::model::{DocType, PageSearchDataChunk, UserFacingPageData};
use crate::{IndexError, Result};

pub use feeds::FeedCategory;
pub use keywords::{Keywords, apply_keywords, load_keywords};
pub use pipeline::{SearchIndexPipeline, write_search_index};
pub use tutorials::{Tutorial, TutorialCategory, TutorialStep};
pub use walk::{DirectorySource, PageSource, SkipList};

/// Corpus-wide rules applied while turning chunks into records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    /// Branding removed from the end of page titles
    pub title_suffix: String,
    /// Chunks with this heading are skipped without consuming an id
    pub excluded_heading: String,
}

impl Default for IndexOptions {
    #[inline]
    fn default() -> Self {
        Self {
            title_suffix: " – Lit".to_string(),
            excluded_heading: "See also".to_string(),
        }
    }
}

impl IndexOptions {
    #[inline]
    pub fn strip_title_suffix<'a>(&self, title: &'a str) -> &'a str {
        if self.title_suffix.is_empty() {
            return title;
        }
        title.strip_suffix(&self.title_suffix).unwrap_or(title)
    }

    #[inline]
    pub fn is_excluded(&self, heading: &str) -> bool {
        heading == self.excluded_heading
    }
}

/// Records produced by one indexing step and the last id it consumed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    pub records: Vec<UserFacingPageData>,
    pub last_id: u64,
}

impl CategoryIndex {
    #[inline]
    pub fn empty(start_id: u64) -> Self {
        Self {
            records: Vec::new(),
            last_id: start_id,
        }
    }

    /// Append a later step's output, taking over its last id
    #[inline]
    pub fn append(&mut self, other: CategoryIndex) {
        self.records.extend(other.records);
        self.last_id = other.last_id;
    }
}

/// One category of the combined index.
///
/// Implementations receive the last id used by the previous category and
/// must number their records from `start_id + 1` upwards, in a deterministic
/// order.
#[async_trait]
pub trait CategoryIndexer: Send + Sync {
    /// Human readable name used in logs and progress output
    fn name(&self) -> &str;

    async fn index(&self, start_id: u64) -> Result<CategoryIndex>;
}

/// A category of rendered pages found through a [`PageSource`]
pub struct PageCategory<S> {
    name: String,
    source: S,
    doc_type: DocType,
    options: IndexOptions,
}

impl<S: PageSource> PageCategory<S> {
    #[inline]
    pub fn new(name: impl Into<String>, source: S, doc_type: DocType, options: IndexOptions) -> Self {
        Self {
            name: name.into(),
            source,
            doc_type,
            options,
        }
    }
}

#[async_trait]
impl<S: PageSource> CategoryIndexer for PageCategory<S> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn index(&self, start_id: u64) -> Result<CategoryIndex> {
        let pages = self.source.pages().await?;
        index_category(&pages, &self.doc_type, start_id, &self.options).await
    }
}

/// Index every page of a category.
///
/// Files are read concurrently, but ids are handed out in the map's
/// relative URL order so that repeated builds number records identically.
#[inline]
pub async fn index_category(
    pages: &BTreeMap<String, PathBuf>,
    doc_type: &DocType,
    start_id: u64,
    options: &IndexOptions,
) -> Result<CategoryIndex> {
    let contents = try_join_all(pages.values().map(tokio::fs::read_to_string)).await?;

    let mut index = CategoryIndex::empty(start_id);
    for (relative_url, html) in pages.keys().zip(contents) {
        let page = index_page(relative_url, &html, doc_type, index.last_id, options)?;
        index.append(page);
    }

    Ok(index)
}

/// Chunk a single page and number its records after `start_id`
#[inline]
pub fn index_page(
    relative_url: &str,
    html: &str,
    doc_type: &DocType,
    start_id: u64,
    options: &IndexOptions,
) -> Result<CategoryIndex> {
    let chunks = page_search_chunks(html).map_err(|source| IndexError::Page {
        url: relative_url.to_string(),
        source,
    })?;
    validate_parent_chunk(relative_url, &chunks)?;

    let page_url = relative_url
        .strip_suffix("index.html")
        .unwrap_or(relative_url);

    let mut index = CategoryIndex::empty(start_id);
    let mut parent_object_id: Option<String> = None;

    for chunk in chunks {
        if options.is_excluded(&chunk.heading) {
            continue;
        }

        index.last_id += 1;
        let object_id = index.last_id.to_string();
        let parent_id = if chunk.is_parent {
            parent_object_id = Some(object_id.clone());
            None
        } else {
            parent_object_id.clone()
        };

        index.records.push(UserFacingPageData {
            id: index.last_id,
            object_id,
            parent_id,
            title: options.strip_title_suffix(&chunk.title).to_string(),
            heading: chunk.heading,
            text: chunk.text,
            relative_url: format!("{page_url}{}", chunk.fragment),
            doc_type: doc_type.clone(),
            keywords: None,
        });
    }

    debug!(
        "Indexed {} as {} records (ids {}..={})",
        relative_url,
        index.records.len(),
        start_id + 1,
        index.last_id
    );

    Ok(index)
}

fn validate_parent_chunk(relative_url: &str, chunks: &[PageSearchDataChunk]) -> Result<()> {
    let count = chunks.iter().filter(|chunk| chunk.is_parent).count();
    if count != 1 {
        return Err(IndexError::ParentCount {
            url: relative_url.to_string(),
            count,
        });
    }

    match chunks.iter().position(|chunk| chunk.is_parent) {
        Some(0) | None => Ok(()),
        Some(position) => Err(IndexError::ParentNotFirst {
            url: relative_url.to_string(),
            position,
        }),
    }
}
