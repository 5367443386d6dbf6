//! HTML parser for extracting links and metadata
//!
//! This module handles parsing HTML content to extract:
//! - Page title
//! - Raw `href` values of every anchor, in document order
//!
//! Resolution and filtering of those hrefs is the orchestrator's job.

use scraper::{Html, Selector};
use thiserror::Error;

/// Error raised by a parse collaborator
#[derive(Debug, Error)]
#[error("Failed to parse page: {0}")]
pub struct ParseError(pub String);

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPage {
    /// The page title (from the first <title> tag), empty if absent
    pub title: String,

    /// Raw href attribute values, unresolved and unfiltered
    pub hrefs: Vec<String>,
}

/// Parse collaborator used by the orchestrator
pub trait PageParser: Send + Sync {
    /// Extracts the title and raw outbound hrefs from a page body
    fn parse(&self, body: &str) -> Result<ParsedPage, ParseError>;
}

/// HTML parse collaborator backed by `scraper`
#[derive(Debug)]
pub struct HtmlParser {
    title_selector: Selector,
    anchor_selector: Selector,
}

impl HtmlParser {
    /// Creates a parser with its selectors compiled once
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            title_selector: compile_selector("title")?,
            anchor_selector: compile_selector("a[href]")?,
        })
    }
}

impl PageParser for HtmlParser {
    fn parse(&self, body: &str) -> Result<ParsedPage, ParseError> {
        Ok(parse_html(body, &self.title_selector, &self.anchor_selector))
    }
}

fn compile_selector(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector)
        .map_err(|e| ParseError(format!("invalid selector '{}': {:?}", selector, e)))
}

/// Parses HTML content and extracts the title and raw hrefs
///
/// # Link Extraction Rules
///
/// - Every `<a href="...">` is returned, in document order, including
///   duplicates, fragment-only anchors and non-HTTP schemes
/// - Anchors without an `href` attribute are ignored
/// - The title is the trimmed text of the first `<title>` element
fn parse_html(html: &str, title_selector: &Selector, anchor_selector: &Selector) -> ParsedPage {
    let document = Html::parse_document(html);

    // Extract title
    let title = document
        .select(title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    // Extract links
    let hrefs = document
        .select(anchor_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect();

    ParsedPage { title, hrefs }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> ParsedPage {
        HtmlParser::new().unwrap().parse(html).unwrap()
    }

    #[test]
    fn test_extract_title() {
        let parsed = parse(r#"<html><head><title>Test Page</title></head><body></body></html>"#);
        assert_eq!(parsed.title, "Test Page");
    }

    #[test]
    fn test_extract_title_with_whitespace() {
        let parsed =
            parse(r#"<html><head><title>  Test Page  </title></head><body></body></html>"#);
        assert_eq!(parsed.title, "Test Page");
    }

    #[test]
    fn test_no_title() {
        let parsed = parse(r#"<html><head></head><body></body></html>"#);
        assert_eq!(parsed.title, "");
    }

    #[test]
    fn test_hrefs_in_document_order() {
        let html = r#"
            <html>
            <body>
                <a href="/page1">Link 1</a>
                <a href="https://other.com/page3">Link 3</a>
                <a href="page2">Link 2</a>
            </body>
            </html>
        "#;
        let parsed = parse(html);
        assert_eq!(
            parsed.hrefs,
            vec!["/page1", "https://other.com/page3", "page2"]
        );
    }

    #[test]
    fn test_hrefs_are_raw() {
        let html = r##"
            <html><body>
                <a href="#section">Jump</a>
                <a href="">Empty</a>
                <a href="mailto:test@example.com">Email</a>
                <a href="  /spaced  ">Spaced</a>
            </body></html>
        "##;
        let parsed = parse(html);
        assert_eq!(
            parsed.hrefs,
            vec!["#section", "", "mailto:test@example.com", "  /spaced  "]
        );
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let parsed = parse(r#"<html><body><a name="top">Top</a><a href="/x">X</a></body></html>"#);
        assert_eq!(parsed.hrefs, vec!["/x"]);
    }

    #[test]
    fn test_duplicates_kept() {
        let parsed = parse(r#"<html><body><a href="/a">1</a><a href="/a">2</a></body></html>"#);
        assert_eq!(parsed.hrefs.len(), 2);
    }

    #[test]
    fn test_malformed_html_still_parses() {
        let parsed = parse(r#"<title>Broken<a href="/ok">unclosed"#);
        assert!(parsed.title.starts_with("Broken"));
    }
}
