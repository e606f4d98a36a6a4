use crate::state::page_state::{PageResult, PageStatus};
use crate::url::LinkClass;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use url::Url;

/// A URL waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// The normalized URL to fetch
    pub url: Url,

    /// The page this URL was first discovered on (None for the root)
    pub referrer: Option<Url>,

    /// Link hops from the root
    pub depth: u32,

    /// Internal or external
    pub class: LinkClass,
}

/// Mutable state of one crawl run
///
/// Created by the crawler at the start of a run and consumed by
/// [`CrawlState::into_results`] at the end; nothing outlives the run.
///
/// # Invariants
///
/// - A URL is handed out by [`CrawlState::pop`] at most once
/// - Every referrer of a URL is kept, no matter how many times the link is
///   discovered or whether it was already fetched
#[derive(Debug, Default)]
pub struct CrawlState {
    /// Breadth-first queue of URLs to fetch
    frontier: VecDeque<QueuedUrl>,

    /// URLs currently sitting in the frontier
    queued: HashSet<Url>,

    /// URLs already handed out for fetching
    visited: HashSet<Url>,

    /// Every page seen linking to each URL
    referrers: HashMap<Url, BTreeSet<Url>>,

    /// Recorded outcomes, keyed (and therefore sorted) by URL
    results: BTreeMap<Url, PageResult>,
}

impl CrawlState {
    /// Creates the state for a crawl rooted at `root`
    pub fn new(root: Url) -> Self {
        let mut state = Self::default();
        state.queued.insert(root.clone());
        state.frontier.push_back(QueuedUrl {
            url: root,
            referrer: None,
            depth: 0,
            class: LinkClass::Internal,
        });
        state
    }

    /// Records a link from `referrer` to `url` and enqueues `url` if it has
    /// never been queued or visited
    ///
    /// Returns true if the URL was newly enqueued.
    pub fn discover(&mut self, url: Url, referrer: &Url, depth: u32, class: LinkClass) -> bool {
        self.referrers
            .entry(url.clone())
            .or_default()
            .insert(referrer.clone());

        if self.visited.contains(&url) || self.queued.contains(&url) {
            return false;
        }

        self.queued.insert(url.clone());
        self.frontier.push_back(QueuedUrl {
            url,
            referrer: Some(referrer.clone()),
            depth,
            class,
        });
        true
    }

    /// Pops the next unvisited URL and marks it visited
    pub fn pop(&mut self) -> Option<QueuedUrl> {
        while let Some(next) = self.frontier.pop_front() {
            self.queued.remove(&next.url);

            if !self.visited.insert(next.url.clone()) {
                tracing::trace!("Skipping already visited {}", next.url);
                continue;
            }

            return Some(next);
        }

        None
    }

    /// Pops every URL currently in the frontier
    ///
    /// All of them are at the same depth, since the frontier is refilled
    /// only after the previous wave has been recorded.
    pub fn next_wave(&mut self) -> Vec<QueuedUrl> {
        let mut wave = Vec::with_capacity(self.frontier.len());
        while let Some(next) = self.pop() {
            wave.push(next);
        }
        wave
    }

    /// Records the outcome of fetching a queued URL
    pub fn record(
        &mut self,
        queued: &QueuedUrl,
        status: PageStatus,
        content_type: Option<String>,
        final_url: Option<Url>,
    ) {
        self.results.insert(
            queued.url.clone(),
            PageResult {
                url: queued.url.clone(),
                status,
                referrers: BTreeSet::new(),
                internal: queued.class == LinkClass::Internal,
                depth: queued.depth,
                content_type,
                final_url,
            },
        );
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Consumes the state and returns the results sorted by URL, each with
    /// its aggregated referrers
    pub fn into_results(mut self) -> Vec<PageResult> {
        for (url, result) in self.results.iter_mut() {
            if let Some(referrers) = self.referrers.remove(url) {
                result.referrers = referrers;
            }
        }
        self.results.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> Url {
        Url::parse("https://example.com/")
            .unwrap()
            .join(path)
            .unwrap()
    }

    #[test]
    fn test_root_is_first() {
        let mut state = CrawlState::new(url("/"));
        let root = state.pop().unwrap();
        assert_eq!(root.url, url("/"));
        assert_eq!(root.referrer, None);
        assert_eq!(root.depth, 0);
        assert!(state.pop().is_none());
    }

    #[test]
    fn test_discover_deduplicates() {
        let mut state = CrawlState::new(url("/"));
        state.pop();

        assert!(state.discover(url("/a"), &url("/"), 1, LinkClass::Internal));
        assert!(!state.discover(url("/a"), &url("/b"), 1, LinkClass::Internal));
        assert!(!state.discover(url("/"), &url("/a"), 1, LinkClass::Internal));
        assert_eq!(state.frontier_len(), 1);
    }

    #[test]
    fn test_visited_once() {
        let mut state = CrawlState::new(url("/"));
        state.pop();
        state.discover(url("/a"), &url("/"), 1, LinkClass::Internal);

        let wave = state.next_wave();
        assert_eq!(wave.len(), 1);
        assert!(state.is_visited(&url("/a")));

        // A later discovery of a visited URL never re-enqueues it
        assert!(!state.discover(url("/a"), &url("/c"), 2, LinkClass::Internal));
        assert!(state.next_wave().is_empty());
        assert_eq!(state.visited_count(), 2);
    }

    #[test]
    fn test_wave_preserves_discovery_order() {
        let mut state = CrawlState::new(url("/"));
        state.pop();
        state.discover(url("/z"), &url("/"), 1, LinkClass::Internal);
        state.discover(url("/a"), &url("/"), 1, LinkClass::External);

        let wave: Vec<_> = state.next_wave().into_iter().map(|q| q.url).collect();
        assert_eq!(wave, vec![url("/z"), url("/a")]);
    }

    #[test]
    fn test_referrers_aggregated_after_fetch() {
        let mut state = CrawlState::new(url("/"));
        let root = state.pop().unwrap();
        state.record(&root, PageStatus::Ok { code: 200 }, None, None);

        state.discover(url("/dead"), &url("/"), 1, LinkClass::Internal);
        let dead = state.pop().unwrap();
        state.record(&dead, PageStatus::Error { code: 404 }, None, None);

        // Discovered again from another page after it was already fetched
        state.discover(url("/dead"), &url("/other"), 2, LinkClass::Internal);

        let results = state.into_results();
        assert_eq!(results.len(), 2);

        let dead = results.iter().find(|r| r.url == url("/dead")).unwrap();
        assert_eq!(dead.status, PageStatus::Error { code: 404 });
        assert_eq!(
            dead.referrers,
            [url("/"), url("/other")].into_iter().collect()
        );
        assert!(results[0].referrers.is_empty());
    }

    #[test]
    fn test_results_sorted_by_url() {
        let mut state = CrawlState::new(url("/"));
        let root = state.pop().unwrap();
        state.discover(url("/b"), &url("/"), 1, LinkClass::Internal);
        state.discover(url("/a"), &url("/"), 1, LinkClass::Internal);
        for queued in state.next_wave() {
            state.record(&queued, PageStatus::Ok { code: 200 }, None, None);
        }
        state.record(&root, PageStatus::Ok { code: 200 }, None, None);

        let urls: Vec<_> = state.into_results().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, vec![url("/"), url("/a"), url("/b")]);
    }

    #[test]
    fn test_external_flag_recorded() {
        let mut state = CrawlState::new(url("/"));
        state.pop();
        let ext = Url::parse("https://other.org/").unwrap();
        state.discover(ext.clone(), &url("/"), 1, LinkClass::External);
        let queued = state.pop().unwrap();
        state.record(&queued, PageStatus::Ok { code: 200 }, None, None);

        let results = state.into_results();
        assert!(!results[0].internal);
        assert_eq!(results[0].url, ext);
    }
}
