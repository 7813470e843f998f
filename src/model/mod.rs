
use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// One heading-delimited section of a rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSearchDataChunk {
    /// The page `<title>` text, as found in the document
    pub title: String,
    /// Text of the heading that opened this chunk
    pub heading: String,
    /// Empty for the parent chunk, otherwise `#` followed by the anchor id
    pub fragment: String,
    /// Sanitized body text between this heading and the next boundary
    pub text: String,
    /// True only for the chunk opened by the page's `<h1>`
    pub is_parent: bool,
}

/// Category badge attached to every search record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocType {
    #[serde(rename = "type")]
    pub kind: Cow<'static, str>,
    pub tag: Cow<'static, str>,
}

impl DocType {
    pub const DOCS: Self = Self::fixed("Docs", "docs");
    pub const API: Self = Self::fixed("API", "api");
    pub const ARTICLE: Self = Self::fixed("Article", "article");
    pub const TUTORIAL: Self = Self::fixed("Tutorial", "tutorial");

    const fn fixed(kind: &'static str, tag: &'static str) -> Self {
        Self {
            kind: Cow::Borrowed(kind),
            tag: Cow::Borrowed(tag),
        }
    }
}

/// A record of the published search index.
///
/// Field names are consumed verbatim by the client-side search UI and the
/// hosted index upload, so the serialized form must not drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFacingPageData {
    pub id: u64,
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(rename = "parentID", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub title: String,
    pub heading: String,
    pub text: String,
    pub relative_url: String,
    pub doc_type: DocType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl UserFacingPageData {
    /// Whether this record stands for a whole page rather than a subsection
    #[inline]
    pub fn is_parent(&self) -> bool {
        self.parent_id.is_none()
    }
}
