use super::*;
use async_trait::async_trait;
use std::fs;
use tempfile::TempDir;

use crate::config::FeedsConfig;

/// Emits `count` parentless records tagged with its name
struct FixedCategory {
    name: &'static str,
    count: u64,
}

#[async_trait]
impl CategoryIndexer for FixedCategory {
    fn name(&self) -> &str {
        self.name
    }

    async fn index(&self, start_id: u64) -> Result<CategoryIndex> {
        let mut index = CategoryIndex::empty(start_id);
        for _ in 0..self.count {
            index.last_id += 1;
            index.records.push(UserFacingPageData {
                id: index.last_id,
                object_id: index.last_id.to_string(),
                parent_id: None,
                title: self.name.to_string(),
                heading: self.name.to_string(),
                text: String::new(),
                relative_url: format!("/{}/{}/", self.name, index.last_id),
                doc_type: DocType::DOCS,
                keywords: None,
            });
        }
        Ok(index)
    }
}

struct FailingCategory;

#[async_trait]
impl CategoryIndexer for FailingCategory {
    fn name(&self) -> &str {
        "broken"
    }

    async fn index(&self, _start_id: u64) -> Result<CategoryIndex> {
        Err(IndexError::ParentCount {
            url: "/broken/index.html".to_string(),
            count: 0,
        })
    }
}

#[tokio::test]
async fn threads_ids_through_categories() {
    let pipeline = SearchIndexPipeline::new()
        .with_category(FixedCategory {
            name: "docs",
            count: 3,
        })
        .with_category(FixedCategory {
            name: "empty",
            count: 0,
        })
        .with_category(FixedCategory {
            name: "api",
            count: 2,
        });

    let records = pipeline.run().await.expect("pipeline should run");

    let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(records[3].title, "api");
}

#[tokio::test]
async fn first_error_aborts_the_run() {
    let pipeline = SearchIndexPipeline::new()
        .with_category(FixedCategory {
            name: "docs",
            count: 3,
        })
        .with_category(FailingCategory);

    let result = pipeline.run().await;

    assert!(matches!(result, Err(IndexError::ParentCount { .. })));
}

#[tokio::test]
async fn applies_keywords_after_merge() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let keywords_path = temp_dir.path().join("keywords.json");
    fs::write(&keywords_path, r#"{ "/api/2/": ["reference"] }"#).expect("should write keywords");

    let pipeline = SearchIndexPipeline::new()
        .with_category(FixedCategory {
            name: "docs",
            count: 1,
        })
        .with_category(FixedCategory {
            name: "api",
            count: 1,
        })
        .with_keywords(&keywords_path);

    let records = pipeline.run().await.expect("pipeline should run");

    assert_eq!(records[0].keywords, None);
    assert_eq!(records[1].keywords, Some(vec!["reference".to_string()]));
}

#[test]
fn config_orders_categories() {
    let config = Config {
        feeds: FeedsConfig {
            videos: Some(PathBuf::from("videos.json")),
            external: Some(PathBuf::from("external.json")),
        },
        ..Config::default()
    };

    let pipeline = SearchIndexPipeline::from_config(&config);

    assert_eq!(
        pipeline.category_names(),
        vec!["docs", "articles", "api", "tutorials", "videos", "external"]
    );
}

#[test]
fn keywords_only_apply_to_production() {
    let mut config = Config::default();
    config.site.keywords_file = Some(PathBuf::from("keywords.json"));

    assert!(SearchIndexPipeline::from_config(&config).keywords_path.is_none());

    config.site.production = true;
    assert!(SearchIndexPipeline::from_config(&config).keywords_path.is_some());
}

#[tokio::test]
async fn writes_json_array() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("_site").join("searchIndex.json");
    let records = FixedCategory {
        name: "docs",
        count: 2,
    }
    .index(0)
    .await
    .expect("fixed category should index")
    .records;

    write_search_index(&path, &records)
        .await
        .expect("index should be written");

    let written: Vec<UserFacingPageData> =
        serde_json::from_str(&fs::read_to_string(&path).expect("index should exist"))
            .expect("index should parse");
    assert_eq!(written, records);
    assert!(!path.with_extension("json.tmp").exists());
}
