use url::Url;

/// Returns the authority a URL is scoped by: its host plus any explicit port
///
/// The url crate already lowercases hosts and drops scheme-default ports,
/// so `https://EXAMPLE.com:443/` and `https://example.com/` share a key.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use scope_crawler::url::scope_key;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(scope_key(&url), Some(("example.com", None)));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(scope_key(&url), Some(("127.0.0.1", Some(8080))));
/// ```
pub fn scope_key(url: &Url) -> Option<(&str, Option<u16>)> {
    url.host_str().map(|host| (host, url.port()))
}

/// Decides whether a candidate URL belongs to the same crawl domain as the seed
///
/// True iff both URLs have a host and the hosts (with any explicit port)
/// are identical. Subdomains and `www.` variants are different hosts.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use scope_crawler::url::in_scope;
///
/// let seed = Url::parse("https://example.com/").unwrap();
///
/// assert!(in_scope(&Url::parse("https://example.com/about").unwrap(), &seed));
/// assert!(!in_scope(&Url::parse("https://blog.example.com/").unwrap(), &seed));
/// assert!(!in_scope(&Url::parse("https://other.com/").unwrap(), &seed));
/// ```
pub fn in_scope(candidate: &Url, seed: &Url) -> bool {
    match (scope_key(candidate), scope_key(seed)) {
        (Some(candidate), Some(seed)) => candidate == seed,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_same_host_different_path() {
        let seed = url("https://example.com/");
        assert!(in_scope(&url("https://example.com/a/b?c=d"), &seed));
    }

    #[test]
    fn test_scheme_does_not_matter() {
        let seed = url("https://example.com/");
        assert!(in_scope(&url("http://example.com/page"), &seed));
    }

    #[test]
    fn test_case_insensitive_host() {
        let seed = url("https://example.com/");
        assert!(in_scope(&url("https://Example.COM/page"), &seed));
    }

    #[test]
    fn test_subdomain_is_out_of_scope() {
        let seed = url("https://example.com/");
        assert!(!in_scope(&url("https://blog.example.com/"), &seed));
        assert!(!in_scope(&url("https://www.example.com/"), &seed));
    }

    #[test]
    fn test_parent_domain_is_out_of_scope() {
        let seed = url("https://blog.example.com/");
        assert!(!in_scope(&url("https://example.com/"), &seed));
    }

    #[test]
    fn test_port_is_part_of_scope() {
        let seed = url("http://127.0.0.1:8080/");
        assert!(in_scope(&url("http://127.0.0.1:8080/page"), &seed));
        assert!(!in_scope(&url("http://127.0.0.1:9090/page"), &seed));
    }

    #[test]
    fn test_default_port_matches_implicit_port() {
        let seed = url("https://example.com/");
        assert!(in_scope(&url("https://example.com:443/page"), &seed));
    }

    #[test]
    fn test_hostless_url_is_out_of_scope() {
        let seed = url("https://example.com/");
        assert!(!in_scope(&url("mailto:admin@example.com"), &seed));
    }
}
