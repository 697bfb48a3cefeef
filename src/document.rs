//! # Document Capability
//!
//! The extraction engine never touches a concrete HTML parser. It only needs
//! three things from a document node:
//!
//! - **select**: descendants matching a CSS selector, in document order
//! - **attr**: the raw value of an attribute
//! - **text**: the node's concatenated text, trimmed
//!
//! [`Element`] captures that capability. [`HtmlElement`] implements it on top
//! of the `scraper` crate for production use; tests implement it on small
//! in-memory trees.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Read-only view of a document node.
pub trait Element: Sized {
    /// Descendants matching `selector`, in document order.
    ///
    /// An unparsable selector matches nothing.
    fn select(&self, selector: &str) -> Vec<Self>;

    /// Raw attribute value, if present.
    fn attr(&self, name: &str) -> Option<String>;

    /// Concatenated text content with surrounding whitespace removed.
    fn text(&self) -> String;

    /// Attribute value trimmed, or an empty string when absent.
    fn trimmed_attr(&self, name: &str) -> String {
        self.attr(name)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }
}

/// A parsed HTML page.
///
/// `scraper::Html` is not `Send`; keep a page inside one synchronous scope
/// and hand out only the extracted records.
pub struct HtmlPage {
    html: Html,
}

impl HtmlPage {
    /// Parse a full HTML document. html5ever recovers from malformed markup,
    /// so this never fails.
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// The document's root element, the starting point for selection.
    pub fn root(&self) -> HtmlElement<'_> {
        HtmlElement(self.html.root_element())
    }
}

/// `scraper`-backed [`Element`].
#[derive(Clone, Copy, Debug)]
pub struct HtmlElement<'a>(ElementRef<'a>);

impl Element for HtmlElement<'_> {
    fn select(&self, selector: &str) -> Vec<Self> {
        match Selector::parse(selector) {
            Ok(sel) => self.0.select(&sel).map(HtmlElement).collect(),
            Err(err) => {
                warn!(selector, error = %err, "Ignoring invalid CSS selector");
                Vec::new()
            }
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(str::to_string)
    }

    fn text(&self) -> String {
        self.0.text().collect::<String>().trim().to_string()
    }
}
