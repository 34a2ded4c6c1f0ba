// Site map rendering: indented text tree and JSON.

use cartograph_crawler::{CrawlState, SiteNode};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Aggregate counts across a mapped site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SiteSummary {
    pub pages_crawled: usize,
    pub pages_failed: usize,
    pub total_links: usize,
    pub total_assets: usize,
}

pub fn summarize(site: &HashMap<String, SiteNode>) -> SiteSummary {
    SiteSummary {
        pages_crawled: site.values().filter(|n| n.is_crawled()).count(),
        pages_failed: site
            .values()
            .filter(|n| n.state == CrawlState::Failed)
            .count(),
        total_links: site.values().map(|n| n.internal_links.len()).sum(),
        total_assets: site.values().map(|n| n.internal_assets.len()).sum(),
    }
}

/// Hostname of a node key, for the report header.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

/// Render the site map as an indented tree, one node per line with its
/// links (and assets, when tracked) nested underneath. Nodes and children
/// are sorted so runs are comparable.
pub fn generate_site_report(site: &HashMap<String, SiteNode>, include_assets: bool) -> String {
    let summary = summarize(site);

    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Pages crawled: {}\n", summary.pages_crawled));
    if summary.pages_failed > 0 {
        report.push_str(&format!("  Pages failed: {}\n", summary.pages_failed));
    }
    report.push_str(&format!(
        "  Internal links found: {}\n",
        summary.total_links
    ));
    if include_assets {
        report.push_str(&format!(
            "  Static assets found: {}\n",
            summary.total_assets
        ));
    }
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    let mut urls: Vec<&String> = site.keys().collect();
    urls.sort();

    if let Some(host) = urls.first().and_then(|u| host_of(u)) {
        report.push_str(&format!("## {}\n\n", host));
    }

    for url in urls {
        let node = &site[url];
        let marker = match node.state {
            CrawlState::Crawled => "crawled".green(),
            CrawlState::Failed => "failed".red(),
            CrawlState::Discovered => "discovered".yellow(),
        };
        report.push_str(&format!("{} [{}]\n", url, marker));

        for link in &node.internal_links {
            report.push_str(&format!("  └── [link] {}\n", link));
        }
        if include_assets {
            for asset in &node.internal_assets {
                report.push_str(&format!("  └── [static asset] {}\n", asset));
            }
        }
    }
    report.push('\n');

    report
}

/// Serialize the site map as pretty JSON, keyed and ordered by URL.
pub fn render_json(site: &HashMap<String, SiteNode>) -> Result<String, serde_json::Error> {
    let ordered: BTreeMap<&String, &SiteNode> = site.iter().collect();
    serde_json::to_string_pretty(&ordered)
}
