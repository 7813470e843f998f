
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::future::try_join_all;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CategoryIndex, CategoryIndexer, IndexOptions};
use crate::config::TutorialsConfig;
use crate::html::PageDocument;
use crate::model::{DocType, UserFacingPageData};
use crate::sanitize::sanitize_text;
use crate::{IndexError, Result};

/// Interactive editors embedded in step descriptions, which hold code rather
/// than prose
const CODE_EDITOR_SELECTOR: &str = "litdev-tutorial-editor, playground-ide, playground-file-editor, playground-code-editor, litdev-example";

/// An entry of the tutorial manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    pub description: String,
    /// Directory name of the tutorial, also its URL segment
    pub location: String,
    pub header: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub category: String,
    pub steps: Vec<TutorialStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialStep {
    pub title: String,
    #[serde(default)]
    pub has_after: bool,
    #[serde(default)]
    pub no_solve: bool,
}

/// Tutorials, indexed in manifest order with one record per step
#[derive(Debug, Clone)]
pub struct TutorialCategory {
    site_dir: PathBuf,
    config: TutorialsConfig,
    options: IndexOptions,
}

impl TutorialCategory {
    #[inline]
    pub fn new(site_dir: impl Into<PathBuf>, config: TutorialsConfig, options: IndexOptions) -> Self {
        Self {
            site_dir: site_dir.into(),
            config,
            options,
        }
    }

    /// Rendered description of step `index` of a tutorial
    #[inline]
    pub fn step_path(&self, location: &str, index: usize) -> PathBuf {
        self.site_dir
            .join(&self.config.content_dir)
            .join(location)
            .join(step_name(index))
            .join("description.html")
    }

    fn tutorial_url(&self, location: &str) -> String {
        format!("{}{}/", self.config.url_prefix, location)
    }

    async fn index_tutorial(&self, tutorial: &Tutorial, start_id: u64) -> Result<CategoryIndex> {
        let step_html = try_join_all(
            (0..tutorial.steps.len())
                .map(|index| tokio::fs::read_to_string(self.step_path(&tutorial.location, index))),
        )
        .await?;

        let url = self.tutorial_url(&tutorial.location);
        let mut index = CategoryIndex::empty(start_id);

        index.last_id += 1;
        let parent_object_id = index.last_id.to_string();
        index.records.push(UserFacingPageData {
            id: index.last_id,
            object_id: parent_object_id.clone(),
            parent_id: None,
            title: tutorial.header.clone(),
            heading: tutorial.header.clone(),
            text: sanitize_text(&tutorial.description),
            relative_url: url.clone(),
            doc_type: DocType::TUTORIAL,
            keywords: None,
        });

        for (step_index, (step, html)) in tutorial.steps.iter().zip(step_html).enumerate() {
            if self.options.is_excluded(&step.title) {
                continue;
            }

            index.last_id += 1;
            index.records.push(UserFacingPageData {
                id: index.last_id,
                object_id: index.last_id.to_string(),
                parent_id: Some(parent_object_id.clone()),
                title: tutorial.header.clone(),
                heading: step.title.clone(),
                text: step_text(&html),
                relative_url: format!("{url}#{}", step_name(step_index)),
                doc_type: DocType::TUTORIAL,
                keywords: None,
            });
        }

        debug!(
            "Indexed tutorial {} with {} steps",
            tutorial.location,
            tutorial.steps.len()
        );

        Ok(index)
    }
}

#[async_trait]
impl CategoryIndexer for TutorialCategory {
    fn name(&self) -> &str {
        "tutorials"
    }

    async fn index(&self, start_id: u64) -> Result<CategoryIndex> {
        let manifest_path = self.site_dir.join(&self.config.manifest);
        let tutorials = load_manifest(&manifest_path).await?;

        let mut index = CategoryIndex::empty(start_id);
        for tutorial in &tutorials {
            let tutorial_index = self.index_tutorial(tutorial, index.last_id).await?;
            index.append(tutorial_index);
        }

        Ok(index)
    }
}

/// Read and parse a tutorial manifest
#[inline]
pub async fn load_manifest(path: &Path) -> Result<Vec<Tutorial>> {
    let content = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&content).map_err(|source| IndexError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Sanitized prose of a step description with code editors removed
#[inline]
pub fn step_text(html: &str) -> String {
    let mut document = PageDocument::parse_fragment(html);
    let selector = Selector::parse(CODE_EDITOR_SELECTOR).expect("valid selector");
    document.remove_matching(&selector);
    sanitize_text(&document.html())
}

/// Zero-padded step directory name, also used as the step's URL fragment
fn step_name(index: usize) -> String {
    format!("{index:02}")
}
