//! Concurrent crawl engine. One tokio task per page, fanned out as new
//! pages are discovered; a semaphore bounds concurrently open fetches and
//! an outstanding-task counter drives termination.

use crate::error::{CrawlError, Result};
use crate::links::{self, TagClass};
use crate::node::{PageReport, SiteNode};
use crate::registry::SiteRegistry;
use reqwest::Client;
use scraper::{ElementRef, Html};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, info, warn};
use url::Url;

pub type ProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

pub struct Crawler {
    client: Client,
    max_concurrency: usize,
    include_assets: bool,
    progress_callback: Option<ProgressCallback>,
}

/// Everything a page task shares with its siblings. Lives behind one `Arc`
/// for the duration of a single `crawl` call.
struct CrawlContext {
    client: Client,
    target_host: String,
    include_assets: bool,
    registry: SiteRegistry,
    limiter: Semaphore,
    outstanding: AtomicUsize,
    finished: mpsc::UnboundedSender<PageReport>,
}

impl Crawler {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent("Cartograph/0.1 (https://github.com/trapdoorsec/cartograph)")
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs / 2))
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            max_concurrency: 4,
            include_assets: false,
            progress_callback: None,
        }
    }

    /// Bound on simultaneously open fetches, not on total tasks spawned.
    pub fn with_max_concurrency(mut self, concurrency: usize) -> Self {
        self.max_concurrency = concurrency.max(1);
        self
    }

    /// Track internal static assets (images, scripts, stylesheets) on each
    /// node. Assets are recorded, never fetched.
    pub fn with_static_assets(mut self, include: bool) -> Self {
        self.include_assets = include;
        self
    }

    /// Called with each page URL as its node is merged back in.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Map every page reachable from `seed` within its domain. Returns the
    /// completed registry snapshot once all tasks have settled.
    pub async fn crawl(&self, seed: &str) -> Result<HashMap<String, SiteNode>> {
        let seed_url =
            Url::parse(seed).map_err(|e| CrawlError::InvalidUrl(format!("{seed}: {e}")))?;
        let target_host = links::hostname_of(&seed_url)
            .ok_or_else(|| CrawlError::InvalidUrl(format!("{seed} has no hostname")))?
            .to_string();
        let seed_canonical = links::canonicalize(&seed_url);

        info!(
            "Starting crawl of {} with {} concurrent fetches",
            seed_canonical, self.max_concurrency
        );

        let (finished_tx, mut finished_rx) = mpsc::unbounded_channel();
        let ctx = Arc::new(CrawlContext {
            client: self.client.clone(),
            target_host,
            include_assets: self.include_assets,
            registry: SiteRegistry::new(),
            limiter: Semaphore::new(self.max_concurrency),
            outstanding: AtomicUsize::new(1),
            finished: finished_tx,
        });

        ctx.registry
            .discover_and_register(seed_canonical.as_str())
            .await;
        spawn_page_task(ctx.clone(), seed_canonical);

        // Completion drain: merge each finished node, then decrement. Every
        // increment happens before the matching task's report can arrive, so
        // hitting zero here means no task is pending or running.
        while let Some(report) = finished_rx.recv().await {
            if let Some(ref callback) = self.progress_callback {
                callback(report.url.clone());
            }
            ctx.registry.finalize(report).await;
            if ctx.outstanding.fetch_sub(1, Ordering::SeqCst) == 1 {
                break;
            }
        }

        let site = ctx.registry.snapshot().await;
        info!("Crawl complete. Mapped {} pages", site.len());
        Ok(site)
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_page_task(ctx: Arc<CrawlContext>, url: Url) {
    tokio::spawn(crawl_page(ctx, url));
}

/// One page's fetch + extract cycle. A fetch failure marks this node
/// `Failed` and nothing else; sibling tasks keep running.
async fn crawl_page(ctx: Arc<CrawlContext>, url: Url) {
    debug!("Crawling {}", url);

    let fetched = {
        let _permit = ctx.limiter.acquire().await.expect("crawl limiter closed");
        fetch_body(&ctx.client, &url).await
    };

    let report = match fetched {
        Ok(body) => {
            let (links, assets) =
                extract_page_links(&body, &url, &ctx.target_host, ctx.include_assets);

            for link in &links {
                if ctx.registry.discover_and_register(link).await
                    && let Ok(child) = Url::parse(link)
                {
                    info!("New page discovered: {} [under {}]", child, url);
                    // Increment before the spawn so the drain loop cannot
                    // see zero while this child is still unreported.
                    ctx.outstanding.fetch_add(1, Ordering::SeqCst);
                    spawn_page_task(ctx.clone(), child);
                }
            }

            PageReport::crawled(url.to_string(), links, assets)
        }
        Err(e) => {
            warn!("Fetch failed for {}: {}", url, e);
            PageReport::failed(url.to_string())
        }
    };

    let _ = ctx.finished.send(report);
}

async fn fetch_body(client: &Client, url: &Url) -> Result<String> {
    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::UnexpectedStatus(status));
    }
    Ok(response.text().await?)
}

/// Walk every element of the parsed document and collect internal links
/// (canonicalized) and, optionally, internal static assets. External URLs
/// and unresolvable attribute values are skipped outright.
fn extract_page_links(
    html: &str,
    page_url: &Url,
    target_host: &str,
    include_assets: bool,
) -> (BTreeSet<String>, BTreeSet<String>) {
    let document = Html::parse_document(html);
    let mut links = BTreeSet::new();
    let mut assets = BTreeSet::new();

    for element in document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
    {
        match links::classify_tag(element.value().name()) {
            TagClass::Link(attribute) => {
                let Some(value) = element.value().attr(attribute) else {
                    continue;
                };
                let Some(resolved) = links::resolve(value, page_url) else {
                    continue;
                };
                if links::is_internal(&resolved, target_host) {
                    links.insert(links::canonicalize(&resolved).to_string());
                }
            }
            TagClass::Asset(attribute) => {
                if !include_assets {
                    continue;
                }
                let Some(value) = element.value().attr(attribute) else {
                    continue;
                };
                let Some(resolved) = links::resolve(value, page_url) else {
                    continue;
                };
                if links::is_internal(&resolved, target_host) {
                    assets.insert(resolved.to_string());
                }
            }
            TagClass::Ignored => {}
        }
    }

    (links, assets)
}
