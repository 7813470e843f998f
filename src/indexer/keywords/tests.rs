use super::*;
use crate::model::DocType;
use std::fs;
use tempfile::TempDir;

fn record(id: u64, relative_url: &str) -> UserFacingPageData {
    UserFacingPageData {
        id,
        object_id: id.to_string(),
        parent_id: None,
        title: "Expressions".to_string(),
        heading: "Expressions".to_string(),
        text: "Templates can include dynamic values".to_string(),
        relative_url: relative_url.to_string(),
        doc_type: DocType::DOCS,
        keywords: None,
    }
}

#[test]
fn attaches_matching_keywords() {
    let mut records = vec![
        record(1, "/docs/templates/expressions/"),
        record(2, "/docs/templates/expressions/#child-expressions"),
        record(3, "/docs/templates/lists/"),
    ];
    let keywords = Keywords::from([(
        "/docs/templates/expressions/".to_string(),
        vec!["binding".to_string(), "interpolation".to_string()],
    )]);

    let applied = apply_keywords(&mut records, &keywords);

    assert_eq!(applied, 1);
    assert_eq!(
        records[0].keywords,
        Some(vec!["binding".to_string(), "interpolation".to_string()])
    );
    assert_eq!(records[1].keywords, None);
    assert_eq!(records[2].keywords, None);
    assert_eq!(records[0].id, 1);
}

#[tokio::test]
async fn loads_keyword_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("keywords.json");
    fs::write(&path, r#"{ "/docs/": ["lit", "web components"] }"#)
        .expect("should write keywords");

    let keywords = load_keywords(&path).await.expect("keywords should load");

    assert_eq!(
        keywords.get("/docs/"),
        Some(&vec!["lit".to_string(), "web components".to_string()])
    );
}

#[tokio::test]
async fn malformed_keyword_file_fails() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("keywords.json");
    fs::write(&path, r#"["not", "a", "map"]"#).expect("should write keywords");

    let result = load_keywords(&path).await;

    assert!(matches!(result, Err(IndexError::Json { .. })));
}
