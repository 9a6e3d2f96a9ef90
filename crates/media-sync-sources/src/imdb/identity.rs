use tracing::info;
use crate::error::Result;
use crate::imdb::client::ImdbClient;
use crate::imdb::scrape::{first_attribute, HtmlDocument, ScraperDocument};

pub const PATH_PROFILE: &str = "/profile";
pub const PATH_WATCHLIST: &str = "/watchlist";

const SELECTOR_USER_ID: &str = ".user-profile.userId";
const ATTRIBUTE_USER_ID: &str = "data-userid";
const SELECTOR_WATCHLIST_ID: &str = "meta[property='pageId']";
const ATTRIBUTE_WATCHLIST_ID: &str = "content";

/// Account id (ur...) from the profile page.
pub fn user_id_from_page<D: HtmlDocument>(document: &D) -> Result<String> {
    first_attribute(document, SELECTOR_USER_ID, ATTRIBUTE_USER_ID)
}

/// Watchlist id (ls...) from the watchlist page.
pub fn watchlist_id_from_page<D: HtmlDocument>(document: &D) -> Result<String> {
    first_attribute(document, SELECTOR_WATCHLIST_ID, ATTRIBUTE_WATCHLIST_ID)
}

impl ImdbClient {
    /// Scrape the account id and store it on the session.
    ///
    /// A 404 is not treated as an error here: the page body is scraped either
    /// way and a missing element surfaces as `ScrapeNotFound`.
    pub async fn resolve_user_id(&mut self) -> Result<String> {
        let request = self.transport().get(PATH_PROFILE);
        let body = self.transport().execute(&request).await?.text().await?;
        let user_id = user_id_from_page(&ScraperDocument::parse(&body))?;

        info!(user_id = %user_id, "Resolved imdb user id");
        self.credentials_mut().user_id = Some(user_id.clone());
        Ok(user_id)
    }

    /// Scrape the default watchlist id and store it on the session.
    pub async fn resolve_watchlist_id(&mut self) -> Result<String> {
        let request = self.transport().get(PATH_WATCHLIST);
        let body = self.transport().execute(&request).await?.text().await?;
        let watchlist_id = watchlist_id_from_page(&ScraperDocument::parse(&body))?;

        info!(watchlist_id = %watchlist_id, "Resolved imdb watchlist id");
        self.credentials_mut().watchlist_id = Some(watchlist_id.clone());
        Ok(watchlist_id)
    }
}
