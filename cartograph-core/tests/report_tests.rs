// Tests for site map report rendering

use cartograph_core::report::{ReportFormat, generate_site_report, host_of, render_json, summarize};
use cartograph_crawler::{CrawlState, SiteNode};
use std::collections::HashMap;

fn node(url: &str, state: CrawlState, links: &[&str], assets: &[&str]) -> SiteNode {
    SiteNode {
        url: url.to_string(),
        state,
        internal_links: links.iter().map(|s| s.to_string()).collect(),
        internal_assets: assets.iter().map(|s| s.to_string()).collect(),
    }
}

fn sample_site() -> HashMap<String, SiteNode> {
    let mut site = HashMap::new();
    site.insert(
        "https://example.com/".to_string(),
        node(
            "https://example.com/",
            CrawlState::Crawled,
            &["https://example.com/a", "https://example.com/b"],
            &[],
        ),
    );
    site.insert(
        "https://example.com/a".to_string(),
        node(
            "https://example.com/a",
            CrawlState::Crawled,
            &["https://example.com/"],
            &[],
        ),
    );
    site.insert(
        "https://example.com/b".to_string(),
        node(
            "https://example.com/b",
            CrawlState::Crawled,
            &[],
            &["https://example.com/logo.png"],
        ),
    );
    site
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str_text() {
    let format = ReportFormat::from_str("text");
    assert!(matches!(format, Some(ReportFormat::Text)));
}

#[test]
fn test_report_format_from_str_json() {
    let format = ReportFormat::from_str("json");
    assert!(matches!(format, Some(ReportFormat::Json)));
}

#[test]
fn test_report_format_from_str_case_insensitive() {
    assert!(matches!(
        ReportFormat::from_str("TEXT"),
        Some(ReportFormat::Text)
    ));
    assert!(matches!(
        ReportFormat::from_str("Json"),
        Some(ReportFormat::Json)
    ));
}

#[test]
fn test_report_format_from_str_invalid() {
    assert!(ReportFormat::from_str("csv").is_none());
    assert!(ReportFormat::from_str("").is_none());
}

// ============================================================================
// Summary Tests
// ============================================================================

#[test]
fn test_summarize_counts() {
    let summary = summarize(&sample_site());
    assert_eq!(summary.pages_crawled, 3);
    assert_eq!(summary.pages_failed, 0);
    assert_eq!(summary.total_links, 3);
    assert_eq!(summary.total_assets, 1);
}

#[test]
fn test_summarize_failed_pages() {
    let mut site = sample_site();
    site.insert(
        "https://example.com/broken".to_string(),
        node("https://example.com/broken", CrawlState::Failed, &[], &[]),
    );

    let summary = summarize(&site);
    assert_eq!(summary.pages_crawled, 3);
    assert_eq!(summary.pages_failed, 1);
}

#[test]
fn test_summarize_empty_site() {
    let summary = summarize(&HashMap::new());
    assert_eq!(summary.pages_crawled, 0);
    assert_eq!(summary.pages_failed, 0);
    assert_eq!(summary.total_links, 0);
    assert_eq!(summary.total_assets, 0);
}

// ============================================================================
// Host Extraction Tests
// ============================================================================

#[test]
fn test_host_of_url() {
    assert_eq!(
        host_of("https://example.com/a/b"),
        Some("example.com".to_string())
    );
}

#[test]
fn test_host_of_invalid_url() {
    assert_eq!(host_of("not a url"), None);
}

// ============================================================================
// Text Report Tests
// ============================================================================

#[test]
fn test_text_report_lists_nodes_and_links() {
    colored::control::set_override(false);
    let report = generate_site_report(&sample_site(), false);

    assert!(report.contains("## example.com"));
    assert!(report.contains("https://example.com/ [crawled]"));
    assert!(report.contains("  └── [link] https://example.com/a"));
    assert!(report.contains("  └── [link] https://example.com/b"));
    assert!(report.contains("Pages crawled: 3"));
}

#[test]
fn test_text_report_hides_assets_by_default() {
    colored::control::set_override(false);
    let report = generate_site_report(&sample_site(), false);

    assert!(!report.contains("[static asset]"));
    assert!(!report.contains("Static assets found"));
}

#[test]
fn test_text_report_shows_assets_when_enabled() {
    colored::control::set_override(false);
    let report = generate_site_report(&sample_site(), true);

    assert!(report.contains("  └── [static asset] https://example.com/logo.png"));
    assert!(report.contains("Static assets found: 1"));
}

#[test]
fn test_text_report_marks_failed_nodes() {
    colored::control::set_override(false);
    let mut site = sample_site();
    site.insert(
        "https://example.com/broken".to_string(),
        node("https://example.com/broken", CrawlState::Failed, &[], &[]),
    );

    let report = generate_site_report(&site, false);
    assert!(report.contains("https://example.com/broken [failed]"));
    assert!(report.contains("Pages failed: 1"));
}

#[test]
fn test_text_report_orders_nodes_by_url() {
    colored::control::set_override(false);
    let report = generate_site_report(&sample_site(), false);

    let root = report.find("https://example.com/ [").unwrap();
    let a = report.find("https://example.com/a [").unwrap();
    let b = report.find("https://example.com/b [").unwrap();
    assert!(root < a && a < b);
}

// ============================================================================
// JSON Report Tests
// ============================================================================

#[test]
fn test_json_report_structure() {
    let json = render_json(&sample_site()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let root = &value["https://example.com/"];
    assert_eq!(root["state"], "Crawled");
    assert_eq!(root["internal_links"][0], "https://example.com/a");
    assert_eq!(root["internal_links"][1], "https://example.com/b");
}

#[test]
fn test_json_report_empty_site() {
    let json = render_json(&HashMap::new()).unwrap();
    assert_eq!(json.trim(), "{}");
}
