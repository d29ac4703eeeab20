//! Typed read-only queries over a parsed HTML document.
//!
//! Thin wrapper around `scraper`: every lookup returns an `Option` or an
//! iterator, so callers check presence explicitly and nothing here panics
//! on missing structure.

use scraper::{ElementRef, Html, Selector};

use crate::error::CalendarError;

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses `markup`. HTML parsing is error-tolerant, so this never fails.
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    pub fn root(&self) -> Element<'_> {
        Element(self.html.root_element())
    }

    pub fn select_first(&self, selector: &Selector) -> Option<Element<'_>> {
        self.html.select(selector).next().map(Element)
    }
}

/// An element of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<'a>(ElementRef<'a>);

impl<'a> Element<'a> {
    /// Lowercase tag name.
    pub fn name(&self) -> &'a str {
        self.0.value().name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// Descendants matching `selector`, in document order.
    pub fn select<'b>(&self, selector: &'b Selector) -> impl Iterator<Item = Element<'a>> + 'b
    where
        'a: 'b,
    {
        self.0.select(selector).map(Element)
    }

    pub fn select_first(&self, selector: &Selector) -> Option<Element<'a>> {
        self.0.select(selector).next().map(Element)
    }

    /// True if this element or one of its descendants matches `selector`.
    pub fn has(&self, selector: &Selector) -> bool {
        selector.matches(&self.0) || self.0.select(selector).next().is_some()
    }

    /// Text content with runs of whitespace collapsed and ends trimmed.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for word in self.0.text().flat_map(str::split_whitespace) {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(word);
        }
        out
    }

    /// Direct `th`/`td` children, in column order.
    pub fn cells(&self) -> Vec<Element<'a>> {
        self.0
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| matches!(child.value().name(), "th" | "td"))
            .map(Element)
            .collect()
    }
}

/// Compiles a CSS selector, naming the configuration key on failure.
pub fn compile_selector(name: &'static str, selector: &str) -> Result<Selector, CalendarError> {
    Selector::parse(selector).map_err(|err| CalendarError::InvalidSelector {
        name,
        selector: selector.to_string(),
        reason: err.to_string(),
    })
}
