use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use std::time::Duration;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Parses and validates a seed URL
///
/// The seed must be an absolute `http` or `https` URL with a host, since the
/// host is what every discovered link is scoped against. Any fragment is
/// dropped.
///
/// # Examples
///
/// ```
/// use scope_crawler::config::parse_seed_url;
///
/// let seed = parse_seed_url("https://example.com").unwrap();
/// assert_eq!(seed.as_str(), "https://example.com/");
///
/// assert!(parse_seed_url("example.com").is_err());
/// assert!(parse_seed_url("ftp://example.com/").is_err());
/// ```
pub fn parse_seed_url(seed: &str) -> Result<Url, ConfigError> {
    let seed = seed.trim();
    if seed.is_empty() {
        return Err(ConfigError::MissingSeed);
    }

    let mut url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' must use the http or https scheme",
            seed
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' has no host",
            seed
        )));
    }

    // Ledger keys never carry a fragment
    url.set_fragment(None);

    Ok(url)
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if let Some(seed) = &config.seed_url {
        parse_seed_url(seed)?;
    }

    validate_requests_per_second(config.requests_per_second)?;

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 1 second, got {}",
            config.request_timeout
        )));
    }

    Ok(())
}

/// Longest spacing between fetch starts the limiter accepts
const MAX_REQUEST_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// Validates the global request rate
fn validate_requests_per_second(rate: f64) -> Result<(), ConfigError> {
    request_period(rate).map(|_| ())
}

/// Converts a request rate into the spacing between fetch starts
///
/// The rate must be finite and > 0, and its period must be non-zero and no
/// longer than one day.
pub(crate) fn request_period(rate: f64) -> Result<Duration, ConfigError> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "requests_per_second must be a finite number > 0, got {}",
            rate
        )));
    }

    match Duration::try_from_secs_f64(1.0 / rate) {
        Ok(period) if period.is_zero() => Err(ConfigError::Validation(format!(
            "requests_per_second {} is too high to schedule",
            rate
        ))),
        Ok(period) if period <= MAX_REQUEST_PERIOD => Ok(period),
        _ => Err(ConfigError::Validation(format!(
            "requests_per_second {} is too low: at least one request per day is required",
            rate
        ))),
    }
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "results_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
