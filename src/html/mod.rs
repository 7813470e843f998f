// HTML parsing adapter
// Thin wrapper over scraper so the chunker only sees the handful of DOM
// operations it needs.


use scraper::{ElementRef, Html, Node, Selector};

/// A parsed, queryable HTML document or fragment
#[derive(Debug)]
pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    /// Parse a complete HTML document
    #[inline]
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// Parse a body fragment, e.g. a rendered tutorial step
    #[inline]
    pub fn parse_fragment(source: &str) -> Self {
        Self {
            html: Html::parse_fragment(source),
        }
    }

    /// Trimmed text of the first `<title>` element, if it has any
    #[inline]
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").expect("valid selector");
        self.html
            .select(&selector)
            .next()
            .map(|title| element_text(&title))
            .filter(|title| !title.is_empty())
    }

    /// First element matching `selector` in document order
    #[inline]
    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// Detach every element matching `selector` from the tree
    #[inline]
    pub fn remove_matching(&mut self, selector: &Selector) -> usize {
        // Collect ids first, the select iterator borrows the tree
        let node_ids: Vec<_> = self
            .html
            .select(selector)
            .map(|element| element.id())
            .collect();

        let mut removed = 0;
        for node_id in node_ids {
            if let Some(mut node) = self.html.tree.get_mut(node_id) {
                node.detach();
                removed += 1;
            }
        }
        removed
    }

    /// Serialized markup of the document root
    #[inline]
    pub fn html(&self) -> String {
        self.html.root_element().html()
    }
}

/// `textContent` of an element, trimmed
#[inline]
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// First direct child element with the given tag name (`:scope > tag`)
#[inline]
pub fn direct_child<'a>(element: &ElementRef<'a>, tag_name: &str) -> Option<ElementRef<'a>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .find(|child| child.value().name() == tag_name)
}

/// A direct child of an element, as seen by the chunker
#[derive(Debug, Clone)]
pub enum ChildNode<'a> {
    Element(ElementRef<'a>),
    /// Serialized markup of a non-element node
    Markup(String),
}

impl ChildNode<'_> {
    /// Serialize this node back to markup
    #[inline]
    pub fn html(&self) -> String {
        match self {
            Self::Element(element) => element.html(),
            Self::Markup(markup) => markup.clone(),
        }
    }
}

/// Direct child nodes of `element` in document order.
///
/// Text is re-escaped so that literal `<` in prose cannot be mistaken for a
/// tag later on. Doctypes and processing instructions are skipped.
#[inline]
pub fn child_nodes<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ChildNode<'a>> {
    element.children().filter_map(|node| match node.value() {
        Node::Element(_) => ElementRef::wrap(node).map(ChildNode::Element),
        Node::Text(text) => Some(ChildNode::Markup(escape_text(text))),
        Node::Comment(comment) => Some(ChildNode::Markup(format!("<!--{}-->", &**comment))),
        _ => None,
    })
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(character),
        }
    }
    escaped
}
