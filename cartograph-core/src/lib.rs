pub mod crawl;
pub mod report;

pub use crawl::{CrawlOptions, SiteMap, execute_crawl};
pub use report::{ReportFormat, SiteSummary, generate_site_report, render_json, summarize};
