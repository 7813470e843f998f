
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{CategoryIndex, CategoryIndexer, IndexOptions};
use crate::model::UserFacingPageData;
use crate::{IndexError, Result};

/// A pre-built JSON array of search records, such as the video listing.
///
/// Feed ids only need to be unique within the feed; records are renumbered
/// to continue the combined index and `parentID`s are rewritten to match.
#[derive(Debug, Clone)]
pub struct FeedCategory {
    name: String,
    path: PathBuf,
    options: IndexOptions,
}

impl FeedCategory {
    #[inline]
    pub fn new(path: impl Into<PathBuf>, options: IndexOptions) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "feed".to_string());
        Self {
            name,
            path,
            options,
        }
    }
}

#[async_trait]
impl CategoryIndexer for FeedCategory {
    fn name(&self) -> &str {
        &self.name
    }

    async fn index(&self, start_id: u64) -> Result<CategoryIndex> {
        let records = load_feed(&self.path).await?;
        renumber_feed(&self.path, records, start_id, &self.options)
    }
}

#[inline]
pub async fn load_feed(path: &Path) -> Result<Vec<UserFacingPageData>> {
    let content = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&content).map_err(|source| IndexError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Give feed records fresh ids after `start_id`, keeping their parent links
#[inline]
pub fn renumber_feed(
    path: &Path,
    records: Vec<UserFacingPageData>,
    start_id: u64,
    options: &IndexOptions,
) -> Result<CategoryIndex> {
    let mut index = CategoryIndex::empty(start_id);
    let mut renumbered: HashMap<String, String> = HashMap::new();
    let mut excluded: HashSet<String> = HashSet::new();

    for mut record in records {
        if options.is_excluded(&record.heading) {
            excluded.insert(record.object_id);
            continue;
        }

        if let Some(old_parent) = record.parent_id.take() {
            if excluded.contains(&old_parent) {
                debug!("Dropping {} below excluded parent", record.relative_url);
                excluded.insert(record.object_id);
                continue;
            }
            let parent = renumbered.get(&old_parent).ok_or_else(|| IndexError::Feed {
                path: path.to_path_buf(),
                reason: format!(
                    "record {} refers to parent {} which does not precede it",
                    record.object_id, old_parent
                ),
            })?;
            record.parent_id = Some(parent.clone());
        }

        index.last_id += 1;
        let object_id = index.last_id.to_string();
        if renumbered
            .insert(record.object_id.clone(), object_id.clone())
            .is_some()
        {
            return Err(IndexError::Feed {
                path: path.to_path_buf(),
                reason: format!("duplicate objectID {}", record.object_id),
            });
        }

        record.id = index.last_id;
        record.object_id = object_id;
        index.records.push(record);
    }

    Ok(index)
}
