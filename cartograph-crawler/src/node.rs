use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Where a discovered URL sits in its lifecycle. Every node starts out
/// `Discovered` and moves to exactly one of the other two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrawlState {
    Discovered,
    Crawled,
    Failed,
}

/// One discovered URL and everything extracted from it. The `url` field is
/// canonical (no query, no fragment) and doubles as the registry key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteNode {
    pub url: String,
    pub state: CrawlState,
    pub internal_links: BTreeSet<String>,
    pub internal_assets: BTreeSet<String>,
}

impl SiteNode {
    pub fn new(url: String) -> Self {
        Self {
            url,
            state: CrawlState::Discovered,
            internal_links: BTreeSet::new(),
            internal_assets: BTreeSet::new(),
        }
    }

    pub fn is_crawled(&self) -> bool {
        self.state == CrawlState::Crawled
    }
}

/// What a finished page task hands back over the completion channel.
#[derive(Debug)]
pub struct PageReport {
    pub url: String,
    pub links: BTreeSet<String>,
    pub assets: BTreeSet<String>,
    pub success: bool,
}

impl PageReport {
    pub fn crawled(url: String, links: BTreeSet<String>, assets: BTreeSet<String>) -> Self {
        Self {
            url,
            links,
            assets,
            success: true,
        }
    }

    pub fn failed(url: String) -> Self {
        Self {
            url,
            links: BTreeSet::new(),
            assets: BTreeSet::new(),
            success: false,
        }
    }
}
