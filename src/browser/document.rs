//! Parsed snapshot of a rendered page
//!
//! This is where the collaborator's query capabilities live: `query_one`,
//! `query_all`, element text and attributes, and the two label-driven
//! lookups the product pages need.

use crate::browser::{BrowserError, BrowserResult};
use scraper::{ElementRef, Html, Node, Selector};

/// Elements that start a new line of rendered text
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Elements whose content is never rendered as text
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

/// An owned, parsed HTML document
pub struct Document {
    html: Html,
}

/// A single element inside a [`Document`]
#[derive(Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Visible text of the element, laid out the way a browser renders it
    ///
    /// Text nodes are joined as they are, so inline markup never splits a
    /// word. Block elements and `<br>` end a line; inside a line whitespace
    /// runs collapse to one space. Lines are trimmed and blank lines dropped.
    pub fn text(&self) -> String {
        let mut lines = RenderedLines::default();
        lines.push_element(self.inner);
        lines.finish()
    }

    /// Value of the attribute `name`, if present
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    /// Descendant elements matching `selector`, in document order
    pub fn query_all(&self, selector: &str) -> BrowserResult<Vec<Element<'a>>> {
        let selector = parse_selector(selector)?;
        Ok(self.inner.select(&selector).map(Element::from).collect())
    }
}

impl<'a> From<ElementRef<'a>> for Element<'a> {
    fn from(inner: ElementRef<'a>) -> Self {
        Self { inner }
    }
}

impl Document {
    /// Parses a full HTML document
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// First element matching `selector`, or `None`
    pub fn query_one(&self, selector: &str) -> BrowserResult<Option<Element<'_>>> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).next().map(Element::from))
    }

    /// All elements matching `selector`, in document order
    pub fn query_all(&self, selector: &str) -> BrowserResult<Vec<Element<'_>>> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).map(Element::from).collect())
    }

    /// Returns true if at least one element matches `selector`
    pub fn contains(&self, selector: &str) -> BrowserResult<bool> {
        Ok(self.query_one(selector)?.is_some())
    }

    /// The trimmed `<title>` text, if present and non-empty
    pub fn title(&self) -> Option<String> {
        let title = self.query_one("title").ok()??.text();
        if title.is_empty() {
            None
        } else {
            Some(title)
        }
    }

    /// Looks up the value of a two-column label/value row
    ///
    /// Scans every element matching `row_selector`. A row matches when its
    /// first `span` contains `label`; the second `span` is the value. Rows
    /// with fewer than two spans are ignored.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(value))` - Trimmed value of the first matching row
    /// * `Ok(None)` - No row carries the label
    /// * `Err(BrowserError)` - The row selector could not be parsed
    pub fn value_for_label(&self, row_selector: &str, label: &str) -> BrowserResult<Option<String>> {
        for row in self.query_all(row_selector)? {
            let spans = row.query_all("span")?;
            if spans.len() >= 2 && spans[0].text().contains(label) {
                return Ok(Some(spans[1].text()));
            }
        }
        Ok(None)
    }

    /// Collects the anchor texts listed after a label `span`
    ///
    /// Finds the `span` whose text equals `label` exactly and returns the
    /// trimmed text of every `a` nested in the `div` siblings that follow
    /// it, skipping blank anchors.
    pub fn anchors_after_label(&self, label: &str) -> BrowserResult<Vec<String>> {
        let mut names = Vec::new();

        for span in self.query_all("span")? {
            if span.text() != label {
                continue;
            }

            let siblings = span
                .inner
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .filter(|sibling| sibling.value().name() == "div");

            for div in siblings {
                for anchor in Element::from(div).query_all("a")? {
                    let text = anchor.text();
                    if !text.is_empty() {
                        names.push(text);
                    }
                }
            }
        }

        Ok(names)
    }
}

fn parse_selector(selector: &str) -> BrowserResult<Selector> {
    Selector::parse(selector).map_err(|e| BrowserError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Accumulates rendered text line by line
#[derive(Default)]
struct RenderedLines {
    lines: Vec<String>,
    current: String,
}

impl RenderedLines {
    fn push_element(&mut self, element: ElementRef<'_>) {
        let name = element.value().name();
        if HIDDEN_ELEMENTS.contains(&name) {
            return;
        }
        if name == "br" {
            self.break_line();
            return;
        }

        let block = BLOCK_ELEMENTS.contains(&name);
        if block {
            self.break_line();
        }

        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.current.push_str(text),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.push_element(child);
                    }
                }
                _ => {}
            }
        }

        if block {
            self.break_line();
        }
    }

    fn break_line(&mut self) {
        let line = self.current.split_whitespace().collect::<Vec<_>>().join(" ");
        if !line.is_empty() {
            self.lines.push(line);
        }
        self.current.clear();
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.lines.join("\n")
    }
}
