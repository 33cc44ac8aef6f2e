//! Index page scraping.
//!
//! The watcher reads a single source, the police section of the Presseportal
//! news index. [`presseportal`] fetches the page and splits it into article
//! blocks; everything downstream works on the resulting
//! [`NewsArticle`](crate::models::NewsArticle)s.

pub mod presseportal;
