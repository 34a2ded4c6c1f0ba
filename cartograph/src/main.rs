mod arguments;

use anyhow::{Context, anyhow, bail};
use arguments::Args;
use cartograph_core::report::ReportFormat;
use cartograph_core::{CrawlOptions, execute_crawl, generate_site_report, render_json, summarize};
use clap::Parser;
use std::time::Instant;
use url::Url;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Args = Args::parse();

    Url::parse(&args.url).with_context(|| format!("invalid seed url: {}", args.url))?;
    let Some(format) = ReportFormat::from_str(&args.format) else {
        bail!(
            "unknown report format: {} (expected text or json)",
            args.format
        );
    };

    let start = Instant::now();
    let site = execute_crawl(CrawlOptions {
        url: args.url.clone(),
        concurrency: args.workers,
        include_assets: args.include_static_assets,
        show_progress: !args.quiet,
    })
    .await
    .map_err(|e| anyhow!(e))?;
    let elapsed = start.elapsed();

    match format {
        ReportFormat::Text => {
            print!(
                "{}",
                generate_site_report(&site, args.include_static_assets)
            );
            let summary = summarize(&site);
            println!(
                "Found and crawled {} pages in {:?}",
                summary.pages_crawled, elapsed
            );
        }
        ReportFormat::Json => println!("{}", render_json(&site)?),
    }

    Ok(())
}
