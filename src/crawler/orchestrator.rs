//! Crawl orchestrator - recursive, concurrent crawl of one domain
//!
//! Every in-scope URL is handled by its own Tokio task. A task:
//! 1. Stops if it is deeper than the configured maximum
//! 2. Claims its URL in the visitation ledger, or stops if another task has
//! 3. Waits for its turn on the shared rate limiter
//! 4. Fetches and parses the page
//! 5. Resolves each link, spawning a child task for every new in-scope one
//! 6. Hands the finished page record to the aggregator
//!
//! Failures stay inside the task that hit them. The run ends when the whole
//! dynamically growing task tree has finished.

use crate::config::{parse_seed_url, Config};
use crate::crawler::aggregator::ResultAggregator;
use crate::crawler::fetcher::{FetchResult, Fetcher, HttpFetcher};
use crate::crawler::ledger::VisitationLedger;
use crate::crawler::limiter::RateLimiter;
use crate::crawler::parser::{HtmlParser, PageParser};
use crate::crawler::tasks::{TaskGroup, TaskToken};
use crate::output::{CrawlReport, CrawlStatistics, PageRecord};
use crate::state::PageState;
use crate::url::{in_scope, resolve_href};
use crate::{ConfigError, CrawlError};
use chrono::Utc;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Progress is logged every time this many pages have been recorded
const PROGRESS_INTERVAL: usize = 10;

/// Future returned by a crawl task
type CrawlFuture = Pin<Box<dyn Future<Output = PageState> + Send>>;

/// A finished crawl: the report plus the numbers behind the summary line
#[derive(Debug, Clone)]
pub struct CompletedCrawl {
    /// The finalized report, ready for a sink
    pub report: CrawlReport,

    /// Visited / recorded / failed counts for the run
    pub statistics: CrawlStatistics,
}

/// Domain-scoped crawler
///
/// Holds the validated run parameters and the collaborators. The rate
/// limiter lives here so that every task of a run shares the same one.
pub struct Crawler {
    seed: Url,
    max_depth: u32,
    limiter: Arc<RateLimiter>,
    fetcher: Arc<dyn Fetcher>,
    parser: Arc<dyn PageParser>,
}

/// State shared by every task of one run
struct CrawlContext {
    seed: Url,
    max_depth: u32,
    ledger: VisitationLedger,
    limiter: Arc<RateLimiter>,
    aggregator: ResultAggregator,
    fetcher: Arc<dyn Fetcher>,
    parser: Arc<dyn PageParser>,
}

impl Crawler {
    /// Creates a crawler with injected collaborators
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration; `crawler.seed-url` must be set
    /// * `fetcher` - Fetch collaborator
    /// * `parser` - Parse collaborator
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(ConfigError)` - Missing/invalid seed URL or invalid rate
    pub fn new(
        config: &Config,
        fetcher: Arc<dyn Fetcher>,
        parser: Arc<dyn PageParser>,
    ) -> Result<Self, ConfigError> {
        let seed = config
            .crawler
            .seed_url
            .as_deref()
            .ok_or(ConfigError::MissingSeed)
            .and_then(parse_seed_url)?;

        let limiter = RateLimiter::new(config.crawler.requests_per_second)?;

        Ok(Self {
            seed,
            max_depth: config.crawler.max_depth,
            limiter: Arc::new(limiter),
            fetcher,
            parser,
        })
    }

    /// Creates a crawler using the HTTP fetcher and HTML parser
    ///
    /// Must be called from within a Tokio runtime.
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::from_config(&config.user_agent, &config.crawler)?;
        let parser = HtmlParser::new()
            .map_err(|e| ConfigError::Validation(format!("HTML parser setup: {}", e)))?;

        Ok(Self::new(config, Arc::new(fetcher), Arc::new(parser))?)
    }

    /// Runs a complete crawl
    ///
    /// Spawns the seed task, waits for every transitively spawned task to
    /// finish, then finalizes the report. Individual page failures never
    /// fail the run.
    pub async fn run(&self) -> CompletedCrawl {
        let ctx = self.context();

        tracing::info!(
            seed = %self.seed,
            max_depth = self.max_depth,
            period_ms = u64::try_from(self.limiter.period().as_millis()).unwrap_or(u64::MAX),
            "Starting crawl"
        );

        let group = TaskGroup::new();
        spawn_crawl(&ctx, group.token(), self.seed.clone(), 0);
        group.wait().await;

        let report = ctx.aggregator.finalize();
        let statistics = CrawlStatistics::from_report(
            &report,
            ctx.ledger.count(),
            ctx.aggregator.failure_count(),
        );

        tracing::info!(
            visited = statistics.pages_visited,
            recorded = statistics.pages_recorded,
            failed = statistics.pages_failed,
            "Crawl completed in {:?}",
            statistics.duration
        );

        CompletedCrawl { report, statistics }
    }

    /// Fresh per-run state: an empty ledger and aggregator
    fn context(&self) -> Arc<CrawlContext> {
        Arc::new(CrawlContext {
            seed: self.seed.clone(),
            max_depth: self.max_depth,
            ledger: VisitationLedger::new(),
            limiter: Arc::clone(&self.limiter),
            aggregator: ResultAggregator::new(self.seed.as_str(), self.max_depth),
            fetcher: Arc::clone(&self.fetcher),
            parser: Arc::clone(&self.parser),
        })
    }
}

/// Spawns a crawl task for `url` as a member of the run's task group
fn spawn_crawl(ctx: &Arc<CrawlContext>, token: &TaskToken, url: Url, depth: u32) {
    let ctx = Arc::clone(ctx);
    token.spawn(move |member| async move {
        let state = crawl_page(Arc::clone(&ctx), member, url.clone(), depth).await;
        debug_assert!(state.is_terminal(), "task for {} ended in {}", url, state);

        if state.is_error() {
            ctx.aggregator.record_failure();
        }
        tracing::trace!(
            url = %url,
            depth,
            state = %state,
            skipped = state.is_skipped(),
            "Task finished"
        );
    });
}

/// Moves a task to its next state
///
/// Illegal transitions are caught by a debug assertion.
fn advance(url: &Url, state: &mut PageState, next: PageState) -> PageState {
    debug_assert!(
        state.can_transition_to(next),
        "illegal transition {} -> {} for {}",
        state,
        next,
        url
    );
    tracing::trace!(url = %url, from = %state, to = %next, "State change");
    *state = next;
    next
}

/// The recursive unit of work for one URL
///
/// Boxed so the recursion through `spawn_crawl` has a nameable `Send` type.
fn crawl_page(ctx: Arc<CrawlContext>, token: TaskToken, url: Url, depth: u32) -> CrawlFuture {
    Box::pin(async move {
        let mut state = PageState::Unclaimed;

        if depth > ctx.max_depth {
            tracing::debug!(url = %url, depth, "Depth limit exceeded");
            return advance(&url, &mut state, PageState::DepthExceeded);
        }

        if !ctx.ledger.claim(url.as_str()) {
            tracing::trace!(url = %url, "Already claimed");
            return advance(&url, &mut state, PageState::AlreadyClaimed);
        }
        advance(&url, &mut state, PageState::Claimed);

        ctx.limiter.await_turn().await;

        advance(&url, &mut state, PageState::Fetching);
        tracing::info!(url = %url, depth, "Crawling");
        let started = Instant::now();
        let fetched = ctx.fetcher.fetch(&url).await;
        let latency = started.elapsed();

        let (status_code, body) = match fetched {
            FetchResult::Success {
                final_url,
                status_code: 200,
                body,
            } => {
                if final_url != url.as_str() {
                    tracing::debug!(url = %url, final_url = %final_url, "Redirected");
                }
                (200, body)
            }
            FetchResult::Success { status_code, .. } | FetchResult::HttpError { status_code } => {
                tracing::warn!(url = %url, depth, status_code, "Unexpected status code");
                return advance(&url, &mut state, PageState::Failed);
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!(url = %url, depth, error = %error, "Fetch failed");
                return advance(&url, &mut state, PageState::Failed);
            }
        };

        let parsed = match ctx.parser.parse(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(url = %url, depth, error = %e, "Parse failed");
                return advance(&url, &mut state, PageState::Failed);
            }
        };

        let links = follow_links(&ctx, &token, &url, &parsed.hrefs, depth);

        let recorded = ctx.aggregator.record(PageRecord {
            url: url.to_string(),
            title: parsed.title,
            links,
            depth,
            crawled_at: Utc::now(),
            response_time_ms: u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
            status_code,
        });

        if recorded % PROGRESS_INTERVAL == 0 {
            tracing::info!(
                "Progress: {} pages recorded, {} URLs claimed, {} tasks in flight",
                recorded,
                ctx.ledger.count(),
                token.pending()
            );
        }

        advance(&url, &mut state, PageState::Recorded)
    })
}

/// Resolves a page's hrefs into its link list, spawning child tasks as it goes
///
/// Every resolvable link is returned, in scope or not. A child is spawned
/// before the next href is looked at, for in-scope links within the depth
/// limit that no task has claimed yet.
fn follow_links(
    ctx: &Arc<CrawlContext>,
    token: &TaskToken,
    base: &Url,
    hrefs: &[String],
    depth: u32,
) -> Vec<String> {
    let mut links = Vec::with_capacity(hrefs.len());

    for href in hrefs {
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            continue;
        }

        let resolved = match resolve_href(base, href) {
            Ok(url) => url,
            Err(e) => {
                tracing::trace!(base = %base, href, error = %e, "Skipping href");
                continue;
            }
        };

        if in_scope(&resolved, &ctx.seed)
            && depth < ctx.max_depth
            && !ctx.ledger.is_claimed(resolved.as_str())
        {
            spawn_crawl(ctx, token, resolved.clone(), depth + 1);
        }

        links.push(resolved.into());
    }

    links
}
