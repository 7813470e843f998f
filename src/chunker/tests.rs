use super::*;

fn page(content: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
  <head><title>Test Page – Lit</title></head>
  <body>
    <main>
      <div id="articleWrapper">
        <article id="articleContent">{content}</article>
      </div>
    </main>
  </body>
</html>"#
    )
}

fn section(level: &str, id: &str, heading: &str) -> String {
    format!(r##"<div class="heading {level}"><{level} id="{id}">{heading}</{level}><a class="anchor" href="#{id}">#</a></div>"##)
}

#[test]
fn splits_parent_and_subsection() {
    let html = page(&format!(
        "<h1>What is Lit?</h1><p>Lit is great.</p>{}",
        section("h2", "x", "Sub")
    ));

    let chunks = page_search_chunks(&html).expect("page should chunk");

    assert_eq!(
        chunks,
        vec![
            PageSearchDataChunk {
                title: "Test Page – Lit".to_string(),
                heading: "What is Lit?".to_string(),
                fragment: String::new(),
                text: "Lit is great".to_string(),
                is_parent: true,
            },
            PageSearchDataChunk {
                title: "Test Page – Lit".to_string(),
                heading: "Sub".to_string(),
                fragment: "#x".to_string(),
                text: String::new(),
                is_parent: false,
            },
        ]
    );
}

#[test]
fn collects_text_until_next_boundary() {
    let html = page(&format!(
        "<h1>Lifecycle</h1><p>Intro.</p>{}<p>Runs first.</p><ul><li>Then this</li></ul>{}<p>Runs last.</p>",
        section("h3", "connected", "connectedCallback"),
        section("h4", "updated", "updated()"),
    ));

    let chunks = page_search_chunks(&html).expect("page should chunk");
    let summary: Vec<(&str, &str, &str)> = chunks
        .iter()
        .map(|c| (c.heading.as_str(), c.fragment.as_str(), c.text.as_str()))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("Lifecycle", "", "Intro"),
            ("connectedCallback", "#connected", "Runs first Then this"),
            ("updated()", "#updated", "Runs last"),
        ]
    );
}

#[test]
fn only_first_chunk_is_parent() {
    let html = page(&format!(
        "<h1>Decorators</h1><p>Intro</p>{}<p>a</p>{}<p>b</p>",
        section("h2", "one", "One"),
        section("h2", "two", "Two"),
    ));

    let chunks = page_search_chunks(&html).expect("page should chunk");

    assert_eq!(chunks.iter().filter(|c| c.is_parent).count(), 1);
    assert!(chunks[0].is_parent);
}

#[test]
fn missing_title_fails() {
    let html = r#"<html><body><main><div id="articleWrapper"><article id="articleContent"><h1>Hi</h1></article></div></main></body></html>"#;
    assert_eq!(page_search_chunks(html), Err(ChunkError::MissingTitle));

    let html = html.replace("<html>", "<html><head><title>  </title></head>");
    assert_eq!(page_search_chunks(&html), Err(ChunkError::MissingTitle));
}

#[test]
fn unexpected_container_id_fails() {
    let html = r#"<html><head><title>Docs – Lit</title></head><body><main><div id="articleWrapper"><article id="content"><h1>Hi</h1></article></div></main></body></html>"#;

    let error = page_search_chunks(html).expect_err("container should not be found");

    assert_eq!(
        error,
        ChunkError::ArticleNotFound {
            selector: CONTENT_SELECTOR
        }
    );
    assert!(error.to_string().contains("articleContent"));
}

#[test]
fn container_outside_main_is_not_found() {
    let html = r#"<html><head><title>Docs – Lit</title></head><body><div id="articleWrapper"><article id="articleContent"><h1>Hi</h1></article></div></body></html>"#;
    assert!(matches!(
        page_search_chunks(html),
        Err(ChunkError::ArticleNotFound { .. })
    ));
}

#[test]
fn empty_container_cannot_be_chunked() {
    assert_eq!(page_search_chunks(&page("")), Err(ChunkError::NoChunks));
    assert_eq!(
        page_search_chunks(&page("<p>No headings at all</p>")),
        Err(ChunkError::NoChunks)
    );
}

#[test]
fn heading_without_anchor_is_folded_in() {
    let html = page(r#"<h1>Styles</h1><p>Intro</p><div><h2 id="plain">Plain</h2></div><p>More</p>"#);

    let chunks = page_search_chunks(&html).expect("page should chunk");

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "Intro Plain More");
}

#[test]
fn external_anchor_is_not_a_boundary() {
    let html = page(
        r#"<h1>Styles</h1><div><h2>Elsewhere</h2><a href="/docs/other/">link</a></div><p>Body</p>"#,
    );

    let chunks = page_search_chunks(&html).expect("page should chunk");

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "Elsewhere link Body");
}

#[test]
fn nested_headings_are_not_boundaries() {
    let html = page(&format!(
        "<h1>Templates</h1><section>{}<p>Nested body</p></section>",
        section("h2", "deep", "Deep")
    ));

    let chunks = page_search_chunks(&html).expect("page should chunk");

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "Deep Nested body");
}

#[test]
fn prefers_h2_over_lower_headings() {
    let html = page(
        r##"<h1>Events</h1><div><h4>Minor</h4><h2>Major</h2><a href="#major">#</a></div>"##,
    );

    let chunks = page_search_chunks(&html).expect("page should chunk");

    assert_eq!(chunks[1].heading, "Major");
    assert_eq!(chunks[1].fragment, "#major");
}

#[test]
fn fragment_heading_needs_text() {
    let html = page(&format!("<h1>Events</h1>{}", section("h2", "empty", "  ")));

    assert_eq!(
        page_search_chunks(&html),
        Err(ChunkError::HeadingWithoutText {
            fragment: "#empty".to_string()
        })
    );
}

#[test]
fn content_before_first_heading_is_dropped() {
    let html = page("<p>Orphan text</p><h1>Localization</h1><p>Body</p>");

    let chunks = page_search_chunks(&html).expect("page should chunk");

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "Body");
}

#[test]
fn strips_toc_and_article_header() {
    let html = page(
        r##"<h1>Announcing Lit</h1>
            <div class="articleHeader"><span>January 1 2024</span><span>Author Name</span></div>
            <nav id="inlineToc"><a href="#a">Contents entry</a></nav>
            <p>Article body</p>"##,
    );

    let chunks = page_search_chunks(&html).expect("page should chunk");

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "Article body");
}

#[test]
fn keeps_see_also_chunks() {
    let html = page(&format!(
        "<h1>Shadow DOM</h1><p>Body</p>{}<ul><li>Styles</li></ul>",
        section("h2", "see-also", "See also")
    ));

    let chunks = page_search_chunks(&html).expect("page should chunk");

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[1].heading, "See also");
    assert_eq!(chunks[1].text, "Styles");
}

#[test]
fn later_boundaries_can_precede_the_parent() {
    let html = page(&format!(
        "{}<p>a</p><h1>Late</h1><p>b</p>",
        section("h2", "early", "Early")
    ));

    let chunks = page_search_chunks(&html).expect("page should chunk");

    assert!(!chunks[0].is_parent);
    assert!(chunks[1].is_parent);
}
