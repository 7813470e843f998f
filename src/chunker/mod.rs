#[cfg(test)]
mod tests;

use scraper::{ElementRef, Selector};
use thiserror::Error;
use tracing::debug;

use crate::html::{ChildNode, PageDocument, child_nodes, direct_child, element_text};
use crate::model::PageSearchDataChunk;
use crate::sanitize::sanitize_text;

/// Where rendered pages keep their indexable content
pub const CONTENT_SELECTOR: &str = "main #articleWrapper #articleContent";

/// Elements inside the content container that never reach the index
const EXCLUDED_SELECTORS: &[&str] = &["#inlineToc", ".articleHeader"];

/// Heading tags that can open a subsection, highest priority first
const SUBSECTION_HEADINGS: &[&str] = &["h2", "h3", "h4"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("Missing title")]
    MissingTitle,
    #[error("Article not found: no element matches '{selector}'")]
    ArticleNotFound { selector: &'static str },
    #[error("Heading for fragment '{fragment}' has no text")]
    HeadingWithoutText { fragment: String },
    #[error("Unable to chunk page")]
    NoChunks,
}

/// What a direct child of the content container means for chunking
#[derive(Debug, PartialEq, Eq)]
enum Boundary {
    Page { heading: String },
    Section { heading: String, fragment: String },
    Content,
}

/// A chunk whose body is still being collected
#[derive(Debug)]
struct OpenChunk {
    heading: String,
    fragment: String,
    is_parent: bool,
    body: String,
}

impl OpenChunk {
    fn finish(self, title: &str) -> PageSearchDataChunk {
        PageSearchDataChunk {
            title: title.to_string(),
            heading: self.heading,
            fragment: self.fragment,
            text: sanitize_text(&self.body),
            is_parent: self.is_parent,
        }
    }
}

/// Split a rendered page into heading-delimited search chunks.
///
/// Only the direct children of the content container are considered. An
/// `<h1>` opens the parent chunk; an element whose own children include an
/// anchor with an in-page `href` and an `<h2>`, `<h3>` or `<h4>` opens a
/// subsection chunk. Everything else is appended to the open chunk, or
/// dropped when nothing is open yet. Chunks headed "See also" are returned
/// like any other; callers decide what to index.
#[inline]
pub fn page_search_chunks(html: &str) -> Result<Vec<PageSearchDataChunk>, ChunkError> {
    let mut document = PageDocument::parse(html);

    let title = document.title().ok_or(ChunkError::MissingTitle)?;

    for excluded in EXCLUDED_SELECTORS {
        let selector =
            Selector::parse(&format!("{CONTENT_SELECTOR} {excluded}")).expect("valid selector");
        document.remove_matching(&selector);
    }

    let content_selector = Selector::parse(CONTENT_SELECTOR).expect("valid selector");
    let container = document
        .select_first(&content_selector)
        .ok_or(ChunkError::ArticleNotFound {
            selector: CONTENT_SELECTOR,
        })?;

    let mut chunks = Vec::new();
    let mut current: Option<OpenChunk> = None;

    for child in child_nodes(container) {
        let boundary = match &child {
            ChildNode::Element(element) => classify(element)?,
            ChildNode::Markup(_) => Boundary::Content,
        };

        let opened = match boundary {
            Boundary::Page { heading } => OpenChunk {
                heading,
                fragment: String::new(),
                is_parent: true,
                body: String::new(),
            },
            Boundary::Section { heading, fragment } => OpenChunk {
                heading,
                fragment,
                is_parent: false,
                body: String::new(),
            },
            Boundary::Content => {
                if let Some(open) = current.as_mut() {
                    open.body.push_str(&child.html());
                }
                continue;
            }
        };

        if let Some(done) = current.replace(opened) {
            chunks.push(done.finish(&title));
        }
    }

    if let Some(done) = current {
        chunks.push(done.finish(&title));
    }

    if chunks.is_empty() {
        return Err(ChunkError::NoChunks);
    }

    debug!("Chunked page '{}' into {} chunks", title, chunks.len());

    Ok(chunks)
}

fn classify(element: &ElementRef<'_>) -> Result<Boundary, ChunkError> {
    if element.value().name() == "h1" {
        return Ok(Boundary::Page {
            heading: element_text(element),
        });
    }

    let Some(anchor) = direct_child(element, "a") else {
        return Ok(Boundary::Content);
    };
    // h2 wins over h3 over h4 when a wrapper holds several
    let Some(heading) = SUBSECTION_HEADINGS
        .iter()
        .find_map(|tag_name| direct_child(element, tag_name))
    else {
        return Ok(Boundary::Content);
    };

    let fragment = match anchor.value().attr("href") {
        Some(href) if href.starts_with('#') => href.to_string(),
        _ => return Ok(Boundary::Content),
    };

    let heading = element_text(&heading);
    if heading.is_empty() {
        return Err(ChunkError::HeadingWithoutText { fragment });
    }

    Ok(Boundary::Section { heading, fragment })
}
