//! Pipeline entry points and transforms.
//!
//! - `update` / `run_once`: crawl new announcements into the state
//! - `filter_pages`: keep one shard's rows
//! - `SummaryStyle::render`: entry titles
//! - `render_feed`: Atom output

pub mod crawl;
pub mod feed;
pub mod filter;
pub mod summary;

pub use crawl::{run_once, update};
pub use feed::{build_feed, render_feed};
pub use filter::filter_pages;
