//! Shared store of every URL the crawl has seen. The registry owns the
//! deduplication invariant: a canonical URL is inserted at most once per
//! run, and the existence check and insert happen under one lock.

use crate::node::{CrawlState, PageReport, SiteNode};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default)]
pub struct SiteRegistry {
    nodes: Mutex<HashMap<String, SiteNode>>,
}

impl SiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claim `url`: if unseen, insert a fresh `Discovered` node
    /// and return `true`; if already present, return `false` and change
    /// nothing. Callers must go through this single call rather than pairing
    /// an exists-check with an insert.
    pub async fn discover_and_register(&self, url: &str) -> bool {
        let mut nodes = self.nodes.lock().await;
        if nodes.contains_key(url) {
            return false;
        }
        nodes.insert(url.to_string(), SiteNode::new(url.to_string()));
        true
    }

    /// Merge a finished page back into its node, moving it from
    /// `Discovered` to `Crawled` or `Failed`. Called once per URL.
    pub async fn finalize(&self, report: PageReport) {
        let mut nodes = self.nodes.lock().await;
        match nodes.get_mut(&report.url) {
            Some(node) => {
                node.state = if report.success {
                    CrawlState::Crawled
                } else {
                    CrawlState::Failed
                };
                node.internal_links = report.links;
                node.internal_assets = report.assets;
            }
            None => debug!("finalize for unregistered url {}", report.url),
        }
    }

    pub async fn len(&self) -> usize {
        self.nodes.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.nodes.lock().await.is_empty()
    }

    /// Clone of the current contents. Only consistent to read once the
    /// crawl has settled; a mid-crawl snapshot observes in-progress state.
    pub async fn snapshot(&self) -> HashMap<String, SiteNode> {
        self.nodes.lock().await.clone()
    }
}
