use crate::UrlError;
use url::Url;

/// Resolves a raw `href` against the URL of the page it was found on
///
/// # Resolution Steps
///
/// 1. Trim surrounding whitespace
/// 2. Join against the base URL (absolute hrefs replace it entirely)
/// 3. Reject anything that is not `http` or `https` (`mailto:`, `javascript:`, ...)
/// 4. Reject URLs without a host
/// 5. Drop the fragment, so `/page#a` and `/page` name the same document
///
/// Empty and fragment-only hrefs are expected to be filtered by the caller;
/// passing one here resolves to the base page itself.
///
/// # Arguments
///
/// * `base` - The absolute URL of the page containing the link
/// * `href` - The raw attribute value
///
/// # Returns
///
/// * `Ok(Url)` - Absolute, fragment-free URL
/// * `Err(UrlError)` - The href cannot name a crawlable page
///
/// # Examples
///
/// ```
/// use url::Url;
/// use scope_crawler::url::resolve_href;
///
/// let base = Url::parse("https://example.com/docs/intro").unwrap();
///
/// let url = resolve_href(&base, "setup#install").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs/setup");
///
/// assert!(resolve_href(&base, "mailto:team@example.com").is_err());
/// ```
pub fn resolve_href(base: &Url, href: &str) -> Result<Url, UrlError> {
    let mut url = base
        .join(href.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::UnsupportedScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}
