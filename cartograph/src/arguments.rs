use clap::Parser;

/// Crawl a URL and print the site map it discovers.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// Seed URL to start crawling from
    pub url: String,

    /// Number of pages fetched concurrently
    #[arg(short = 'w', long, default_value_t = 4)]
    pub workers: usize,

    /// Also record internal static assets (images, scripts, stylesheets)
    #[arg(short = 'i', long)]
    pub include_static_assets: bool,

    /// Report format: text or json
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Suppress the progress spinner
    #[arg(short, long)]
    pub quiet: bool,
}
