#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::model::UserFacingPageData;
use crate::{IndexError, Result};

/// Extra search terms keyed by record `relativeUrl`
pub type Keywords = HashMap<String, Vec<String>>;

#[inline]
pub async fn load_keywords(path: &Path) -> Result<Keywords> {
    let content = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&content).map_err(|source| IndexError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Attach keywords to every record whose URL has an entry.
///
/// Returns how many records were augmented. Ids and text are untouched.
#[inline]
pub fn apply_keywords(records: &mut [UserFacingPageData], keywords: &Keywords) -> usize {
    let mut applied = 0;
    for record in records.iter_mut() {
        if let Some(words) = keywords.get(&record.relative_url) {
            record.keywords = Some(words.clone());
            applied += 1;
        }
    }

    debug!(
        "Attached keywords to {} of {} records",
        applied,
        records.len()
    );

    applied
}
