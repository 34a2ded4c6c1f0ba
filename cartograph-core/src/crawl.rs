use cartograph_crawler::{Crawler, SiteNode};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// The completed link graph: canonical URL -> its node.
pub type SiteMap = HashMap<String, SiteNode>;

/// Options for configuring a crawl run
pub struct CrawlOptions {
    pub url: String,
    pub concurrency: usize,
    pub include_assets: bool,
    pub show_progress: bool,
}

/// Execute a crawl with the given options, driving a progress spinner while
/// pages come in. Returns the settled site map.
pub async fn execute_crawl(options: CrawlOptions) -> Result<SiteMap, String> {
    let CrawlOptions {
        url,
        concurrency,
        include_assets,
        show_progress,
    } = options;

    let progress_bar = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let visited_count = Arc::new(AtomicUsize::new(0));

    let mut crawler = Crawler::new()
        .with_max_concurrency(concurrency)
        .with_static_assets(include_assets);

    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        let count_clone = visited_count.clone();
        crawler = crawler.with_progress_callback(Arc::new(move |_url: String| {
            let visited = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
            pb_clone.set_message(format!("Mapping... {} pages visited", visited));
            pb_clone.tick();
        }));
    }

    let site = crawler.crawl(&url).await.map_err(|e| e.to_string())?;

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!("Crawl complete! {} pages mapped", site.len()));
    }

    Ok(site)
}
