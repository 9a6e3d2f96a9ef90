//! IMDb scraping pipeline.
//!
//! Session cookies copied from a browser authenticate every request. Account
//! ids are scraped from HTML pages, list and rating data come from the CSV
//! export endpoints.

pub mod client;
pub mod export;
pub mod identity;
pub mod lists;
pub mod ratings;
pub mod scrape;
pub mod session;
pub mod slug;
pub mod transport;

pub use client::ImdbClient;
pub use scrape::{HtmlDocument, ScraperDocument};
pub use session::SessionCredentials;
pub use slug::normalize_slug;
pub use transport::{ImdbResponse, ImdbTransport, RequestFields, StatusClass};
