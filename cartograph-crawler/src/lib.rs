pub mod crawler;
pub mod error;
pub mod links;
pub mod node;
pub mod registry;

pub use crawler::Crawler;
pub use error::CrawlError;
pub use node::{CrawlState, SiteNode};
pub use registry::SiteRegistry;
