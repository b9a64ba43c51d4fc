//! Tree-query adapter over the scraper crate
//!
//! The extractors never look at raw markup. They go through the small query
//! surface below: select by CSS path, read attributes, read concatenated text
//! and walk following siblings.

use scraper::{ElementRef, Html, Selector};

use crate::error::{ExtractError, Result};

/// Parsed hypertext document, read-only for the extractors
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// All elements matching `css`, in document order
    pub fn select_all(&self, css: &str) -> Result<Vec<ElementRef<'_>>> {
        let selector = selector(css)?;
        Ok(self.html.select(&selector).collect())
    }

    /// First element matching `css`, in document order
    pub fn select_first(&self, css: &str) -> Result<Option<ElementRef<'_>>> {
        let selector = selector(css)?;
        Ok(self.html.select(&selector).next())
    }
}

/// Compile a CSS selector, reporting failures as a traversal error
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Descendants of `element` matching `selector`
pub fn select_within<'a>(element: ElementRef<'a>, selector: &Selector) -> Vec<ElementRef<'a>> {
    element.select(selector).collect()
}

/// First descendant of `element` matching `selector`
pub fn select_first_within<'a>(
    element: ElementRef<'a>,
    selector: &Selector,
) -> Option<ElementRef<'a>> {
    element.select(selector).next()
}

/// Concatenation of every descendant text node, untrimmed
pub fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}

pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// Element siblings after `element`, in document order
pub fn following_siblings<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.next_siblings().filter_map(ElementRef::wrap)
}

/// True when one of the element's own text nodes equals `text` exactly
pub fn has_direct_text(element: ElementRef<'_>, text: &str) -> bool {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .any(|t| &**t == text)
}
