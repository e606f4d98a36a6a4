//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop:
//! - Seeding the frontier with the root URL
//! - Fetching each wave of the frontier with bounded concurrency
//! - Recording outcomes and aggregating referrers
//! - Extracting, classifying and enqueueing links from internal HTML pages

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{FetchError, FetchMethod, FetchedPage, Fetcher, HttpFetcher};
use crate::crawler::parser::parse_html;
use crate::state::{CrawlState, PageResult, PageStatus, QueuedUrl};
use crate::url::{classify_link, ExcludeList, ScopePredicate};
use crate::CheckError;
use futures::stream::{self, StreamExt};
use url::Url;

/// Breadth-first dead-link crawler
///
/// The crawler itself is stateless between runs: every call to
/// [`Crawler::crawl`] builds its own [`CrawlState`], so one crawler can be
/// reused for any number of sites.
pub struct Crawler<F: Fetcher> {
    fetcher: F,
    exclude: ExcludeList,
    concurrency: usize,
    max_depth: Option<u32>,
}

impl Crawler<HttpFetcher> {
    /// Creates a crawler that talks HTTP with the given settings
    pub fn from_config(config: &CrawlerConfig, exclude: ExcludeList) -> Result<Self, CheckError> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Crawler::new(fetcher)
            .with_exclude(exclude)
            .with_concurrency(config.concurrency)
            .with_max_depth(config.max_depth))
    }
}

impl<F: Fetcher> Crawler<F> {
    /// Creates a sequential crawler with no exclusions and no depth limit
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            exclude: ExcludeList::default(),
            concurrency: 1,
            max_depth: None,
        }
    }

    pub fn with_exclude(mut self, exclude: ExcludeList) -> Self {
        self.exclude = exclude;
        self
    }

    /// Sets the maximum number of fetches in flight (at least 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Limits expansion to pages at most `max_depth` hops from the root
    ///
    /// Links found on the deepest expanded pages are still checked.
    pub fn with_max_depth(mut self, max_depth: Option<u32>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Crawls the site at `root` and returns every checked URL
    ///
    /// # Algorithm
    ///
    /// 1. Seed the frontier with the root
    /// 2. Drain the frontier into a wave; each URL is marked visited as it
    ///    leaves the frontier, so nothing is fetched twice
    /// 3. Fetch the wave, up to `concurrency` requests at a time
    /// 4. Sort the outcomes by URL, record them, and expand the internal HTML
    ///    pages that are within the depth limit
    /// 5. Repeat until the frontier is empty
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<PageResult>)` - All results, sorted by URL
    /// * `Err(CheckError::RootUnavailable)` - The root itself could not be
    ///   fetched or answered with an error status
    pub async fn crawl(
        &self,
        root: &Url,
        scope: &dyn ScopePredicate,
    ) -> Result<Vec<PageResult>, CheckError> {
        tracing::info!("Starting crawl at {}", root);

        let mut state = CrawlState::new(root.clone());
        let mut waves = 0u32;

        loop {
            let wave = state.next_wave();
            if wave.is_empty() {
                tracing::debug!("Frontier is empty, crawl complete");
                break;
            }

            tracing::info!(
                "Checking {} URL(s) at depth {}",
                wave.len(),
                waves
            );

            let fetcher = &self.fetcher;
            let depth_limit = self.max_depth;
            let mut outcomes: Vec<(QueuedUrl, Result<FetchedPage, FetchError>)> =
                stream::iter(wave)
                    .map(|queued| async move {
                        let method = if queued.class.should_expand()
                            && within_depth(depth_limit, queued.depth)
                        {
                            FetchMethod::Get
                        } else {
                            FetchMethod::Head
                        };
                        tracing::debug!("Fetching {} ({:?})", queued.url, method);
                        let outcome = fetcher.fetch(&queued.url, method).await;
                        (queued, outcome)
                    })
                    .buffer_unordered(self.concurrency)
                    .collect()
                    .await;

            // Completion order is arbitrary; recording order must not be
            outcomes.sort_by(|a, b| a.0.url.cmp(&b.0.url));

            for (queued, outcome) in outcomes {
                self.process(&mut state, &queued, outcome, scope)?;
            }

            waves += 1;
        }

        tracing::info!(
            "Crawl finished: {} URL(s) checked in {} wave(s)",
            state.visited_count(),
            waves
        );

        let results = state.into_results();
        if links_from(&results, root) == 0 {
            tracing::warn!("No links found! Check {}", root);
        }

        Ok(results)
    }

    /// Records one fetch outcome and expands the page if appropriate
    fn process(
        &self,
        state: &mut CrawlState,
        queued: &QueuedUrl,
        outcome: Result<FetchedPage, FetchError>,
        scope: &dyn ScopePredicate,
    ) -> Result<(), CheckError> {
        let status = PageStatus::from_outcome(&outcome);
        let is_root = queued.referrer.is_none();

        if is_root && status.is_dead() {
            return Err(CheckError::RootUnavailable {
                url: queued.url.to_string(),
                reason: status.to_string(),
            });
        }

        let page = match outcome {
            Ok(page) => page,
            Err(e) => {
                tracing::debug!("{} is unreachable: {}", queued.url, e);
                state.record(queued, status, None, None);
                return Ok(());
            }
        };

        let redirected = page.final_url != queued.url;
        if redirected {
            tracing::warn!(
                "Link not pointing to endpoint: {} -> {}",
                queued.url,
                page.final_url
            );
        }

        if status.is_dead() {
            tracing::debug!("{} is dead: {}", queued.url, status);
        }

        let expand = status.is_ok()
            && queued.class.should_expand()
            && within_depth(self.max_depth, queued.depth)
            && page.is_html()
            && (!redirected || scope.in_scope(&page.final_url));

        state.record(
            queued,
            status,
            page.content_type.clone(),
            redirected.then(|| page.final_url.clone()),
        );

        if !expand {
            return Ok(());
        }

        let Some(body) = page.body.as_deref() else {
            return Ok(());
        };

        let parsed = parse_html(body, &page.final_url);
        tracing::debug!(
            "Found {} link(s) in {} ({})",
            parsed.links.len(),
            queued.url,
            parsed.title.as_deref().unwrap_or("untitled")
        );

        for link in parsed.links {
            let class = classify_link(&link, scope, &self.exclude);
            if !class.should_check() {
                tracing::trace!("Ignoring excluded link {}", link);
                continue;
            }
            state.discover(link, &queued.url, queued.depth + 1, class);
        }

        Ok(())
    }
}

fn within_depth(max_depth: Option<u32>, depth: u32) -> bool {
    max_depth.map_or(true, |max| depth <= max)
}

/// Number of checked URLs that `page` links to
fn links_from(results: &[PageResult], page: &Url) -> usize {
    results.iter().filter(|r| r.referrers.contains(page)).count()
}
