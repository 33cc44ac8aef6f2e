//! Presseportal "Blaulicht" index scraper.
//!
//! The police section of [Presseportal](https://www.presseportal.de/blaulicht/d/polizei)
//! lists the latest press releases as `<article>` teasers. Each teaser already
//! carries the dateline, the headline and the first lines of the release,
//! which is all the extractors need, so individual releases are not fetched.
//!
//! # Markup Fallback
//!
//! If the page has no `<article>` elements, any `<div>` whose `class` mentions
//! `teaser`, `news` or `item` is taken instead.

use crate::config::WatchConfig;
use crate::models::NewsArticle;
use itertools::Itertools;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument};

const FALLBACK_CLASS_HINTS: [&str; 3] = ["teaser", "news", "item"];

/// Build the HTTP client used for every poll.
pub fn build_client(config: &WatchConfig) -> Result<Client, Box<dyn Error>> {
    let client = Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout())
        .build()?;
    Ok(client)
}

/// Fetch the index page and return its article blocks.
///
/// # Errors
///
/// Fails on network errors, timeouts, non-2xx statuses and pages without any
/// recognizable article markup.
#[instrument(level = "info", skip(client))]
pub async fn fetch_articles(client: &Client, url: &str) -> Result<Vec<NewsArticle>, Box<dyn Error>> {
    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    debug!(bytes = html.len(), "Fetched index page");

    let articles = parse_articles(&html, url)?;
    if articles.is_empty() {
        return Err(format!("no article blocks found on {}", url).into());
    }

    info!(count = articles.len(), "Indexed article blocks");
    Ok(articles)
}

/// Split an index page into article blocks.
pub fn parse_articles(html: &str, source: &str) -> Result<Vec<NewsArticle>, Box<dyn Error>> {
    let document = Html::parse_document(html);
    let article_selector = Selector::parse("article")?;

    let mut blocks: Vec<ElementRef> = document.select(&article_selector).collect();
    if blocks.is_empty() {
        let div_selector = Selector::parse("div[class]")?;
        blocks = document
            .select(&div_selector)
            .filter(|element| {
                element.value().attr("class").is_some_and(|class| {
                    let class = class.to_lowercase();
                    FALLBACK_CLASS_HINTS.iter().any(|hint| class.contains(hint))
                })
            })
            .collect();
        debug!(count = blocks.len(), "No <article> elements; using class fallback");
    }

    Ok(blocks
        .into_iter()
        .map(|element| NewsArticle {
            source: source.to_string(),
            content: flatten_text(element),
            raw: element.text().collect(),
        })
        .collect())
}

/// Text of all nodes with every whitespace run, line breaks included,
/// collapsed to a single space.
fn flatten_text(element: ElementRef) -> String {
    element.text().flat_map(str::split_whitespace).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "https://www.presseportal.de/blaulicht/d/polizei";

    #[test]
    fn test_parse_article_elements() {
        let html = r#"
            <html><body>
              <article class="news">
                <h3><a href="/blaulicht/pm/1">POL-HG: Einbruch in Kita</a></h3>
                <p>Bad Homburg <span>(ots)</span> Am 3.5.2024 kam es zu einem Einbruch</p>
              </article>
              <article><p>Diebstahl aus Pkw</p></article>
              <div class="teaser">not used when articles exist</div>
            </body></html>
        "#;
        let articles = parse_articles(html, SOURCE).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(
            articles[0].content,
            "POL-HG: Einbruch in Kita Bad Homburg (ots) Am 3.5.2024 kam es zu einem Einbruch"
        );
        assert!(articles[0].raw.contains("Bad Homburg (ots) Am 3.5.2024"));
        assert_eq!(articles[1].content, "Diebstahl aus Pkw");
        assert_eq!(articles[1].source, SOURCE);
    }

    #[test]
    fn test_class_fallback() {
        let html = r#"
            <html><body>
              <div class="Result-Teaser">Einbruch in Kassel am 1.2.2024</div>
              <div class="news-list__ITEM">Diebstahl in Fulda</div>
              <div class="footer">Impressum</div>
              <div>no class</div>
            </body></html>
        "#;
        let articles = parse_articles(html, SOURCE).unwrap();
        let texts: Vec<&str> = articles.iter().map(|a| a.content.as_str()).collect();
        assert_eq!(texts, vec!["Einbruch in Kassel am 1.2.2024", "Diebstahl in Fulda"]);
    }

    #[test]
    fn test_line_breaks_inside_text_node_collapse() {
        let html = "<article><p>Bad\n      Homburg   (ots)\tAm 3.5.2024\r\n kam es zu einem Einbruch</p></article>";
        let articles = parse_articles(html, SOURCE).unwrap();
        assert_eq!(
            articles[0].content,
            "Bad Homburg (ots) Am 3.5.2024 kam es zu einem Einbruch"
        );
        assert!(!articles[0].content.contains('\n'));
    }

    #[test]
    fn test_no_markup() {
        let articles = parse_articles("<html><body><p>nothing</p></body></html>", SOURCE).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(&WatchConfig::default()).is_ok());
    }
}
