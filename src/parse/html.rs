//! Read-only DOM traversal over `scraper`.
//!
//! [`parse_html`] turns text into a [`Document`]; elements are visited through
//! [`Node`] handles that borrow from it. Selectors use CSS syntax.

use scraper::{ElementRef, Html, Selector};

use crate::errors::ParseError;

/// Parses an HTML document. Blank input is rejected.
pub fn parse_html(text: &str) -> Result<Document, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Blank);
    }
    Ok(Document {
        html: Html::parse_document(text),
    })
}

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| {
        log::debug!("invalid selector '{}': {:?}", css, e);
        ParseError::Selector(css.to_string())
    })
}

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// The `<html>` element.
    pub fn root(&self) -> Node<'_> {
        Node(self.html.root_element())
    }

    /// All elements matching `css`, in document order.
    pub fn select(&self, css: &str) -> Result<Vec<Node<'_>>, ParseError> {
        let selector = selector(css)?;
        Ok(self.html.select(&selector).map(Node).collect())
    }

    /// First element matching `css`.
    pub fn select_first(&self, css: &str) -> Result<Option<Node<'_>>, ParseError> {
        let selector = selector(css)?;
        Ok(self.html.select(&selector).next().map(Node))
    }

    /// Trimmed text of the `<title>` element.
    pub fn title(&self) -> Option<String> {
        self.select_first("title")
            .ok()
            .flatten()
            .map(|node| node.text().trim().to_string())
    }
}

/// An element inside a [`Document`].
#[derive(Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    /// Lower-case tag name.
    pub fn name(&self) -> &'a str {
        self.0.value().name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// Concatenated text of all descendants.
    pub fn text(&self) -> String {
        self.0.text().collect()
    }

    /// Outer HTML.
    pub fn html(&self) -> String {
        self.0.html()
    }

    pub fn inner_html(&self) -> String {
        self.0.inner_html()
    }

    /// Child elements (text and comment nodes are skipped).
    pub fn children(&self) -> Vec<Node<'a>> {
        self.0.children().filter_map(ElementRef::wrap).map(Node).collect()
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        self.0.parent().and_then(ElementRef::wrap).map(Node)
    }

    /// Descendants matching `css`.
    pub fn select(&self, css: &str) -> Result<Vec<Node<'a>>, ParseError> {
        let selector = selector(css)?;
        Ok(self.0.select(&selector).map(Node).collect())
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Node").field(&self.name()).finish()
    }
}
