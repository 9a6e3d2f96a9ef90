use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use crate::error::{ImdbError, Result};

/// Minimal HTML query capability the scraping code depends on.
pub trait HtmlDocument {
    type Element<'a>
    where
        Self: 'a;

    /// All elements matching a CSS selector, in document order.
    fn find<'a>(&'a self, selector: &str) -> Vec<Self::Element<'a>>;

    fn attribute(&self, element: &Self::Element<'_>, name: &str) -> Option<String>;
}

/// [`HtmlDocument`] backed by the `scraper` crate.
pub struct ScraperDocument {
    html: Html,
}

impl ScraperDocument {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }
}

impl HtmlDocument for ScraperDocument {
    type Element<'a> = ElementRef<'a>;

    fn find<'a>(&'a self, selector: &str) -> Vec<ElementRef<'a>> {
        match Selector::parse(selector) {
            Ok(selector) => self.html.select(&selector).collect(),
            Err(e) => {
                warn!(selector, error = ?e, "Invalid css selector");
                Vec::new()
            }
        }
    }

    fn attribute(&self, element: &ElementRef<'_>, name: &str) -> Option<String> {
        element.value().attr(name).map(str::to_string)
    }
}

/// Attribute of the first element matching `selector`.
pub fn first_attribute<D: HtmlDocument>(
    document: &D,
    selector: &'static str,
    attribute: &'static str,
) -> Result<String> {
    document
        .find(selector)
        .first()
        .and_then(|element| document.attribute(element, attribute))
        .ok_or(ImdbError::ScrapeNotFound { selector, attribute })
}

/// Attribute of every matching element; elements without it are skipped.
pub fn all_attributes<D: HtmlDocument>(document: &D, selector: &str, attribute: &str) -> Vec<String> {
    document
        .find(selector)
        .iter()
        .filter_map(|element| document.attribute(element, attribute))
        .collect()
}
