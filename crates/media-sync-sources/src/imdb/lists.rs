use media_sync_models::ImdbList;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::Response;
use std::collections::HashSet;
use tracing::{debug, error, info, warn};
use crate::error::{DecodeError, ImdbError, Result};
use crate::imdb::client::ImdbClient;
use crate::imdb::export::{decode_list_items, list_name_from_content_disposition};
use crate::imdb::scrape::{all_attributes, HtmlDocument, ScraperDocument};
use crate::imdb::slug::normalize_slug;
use crate::imdb::transport::ImdbResponse;

const SELECTOR_USER_LIST: &str = ".user-list";
const ATTRIBUTE_LIST_ID: &str = "id";

pub fn list_export_path(list_id: &str) -> String {
    format!("/list/{}/export", list_id)
}

pub fn user_lists_path(user_id: &str) -> String {
    format!("/user/{}/lists", user_id)
}

/// Ids of every custom list on the lists overview page, in document order.
pub fn list_ids_from_page<D: HtmlDocument>(document: &D) -> Vec<String> {
    let found = document.find(SELECTOR_USER_LIST).len();
    let ids = all_attributes(document, SELECTOR_USER_LIST, ATTRIBUTE_LIST_ID);
    if ids.len() < found {
        debug!(skipped = found - ids.len(), "Skipped list elements without an id");
    }

    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

/// Raw `Content-Disposition` value. Filenames may carry UTF-8 bytes inside
/// quoted strings, so the value is not restricted to visible ASCII.
fn content_disposition(response: &Response) -> Option<String> {
    response.headers().get(CONTENT_DISPOSITION).map(|value| {
        let bytes = value.as_bytes();
        match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => String::from_utf8_lossy(bytes).into_owned(),
        }
    })
}

impl ImdbClient {
    /// Download and decode one list export.
    ///
    /// The list name comes from the export's download filename.
    pub async fn fetch_list(&self, list_id: &str) -> Result<ImdbList> {
        let request = self.transport().get(list_export_path(list_id));
        let response = match self.transport().execute(&request).await? {
            ImdbResponse::Found(response) => response,
            ImdbResponse::NotFound(_) => {
                return Err(ImdbError::ListNotFound {
                    list_id: list_id.to_string(),
                    url: request.url,
                })
            }
        };

        let disposition = content_disposition(&response);
        let body = response.bytes().await.map_err(DecodeError::Body)?;
        let items = decode_list_items(&body)?;
        let list_name = list_name_from_content_disposition(disposition.as_deref())?;

        debug!(list_id, list_name = %list_name, items = items.len(), "Fetched imdb list");
        Ok(ImdbList {
            list_id: list_id.to_string(),
            slug: normalize_slug(&list_name),
            list_name,
            items,
            is_watchlist: false,
        })
    }

    pub async fn fetch_watchlist(&self) -> Result<ImdbList> {
        let watchlist_id = self.watchlist_id()?;
        let mut list = self.fetch_list(watchlist_id).await?;
        list.is_watchlist = true;
        Ok(list)
    }

    /// Fetch every custom list of the account.
    ///
    /// Lists are fetched one at a time. A list that fails to download is
    /// logged and left out; it does not stop the scan.
    pub async fn fetch_all_lists(&self) -> Result<Vec<ImdbList>> {
        let user_id = self.user_id()?;
        let request = self.transport().get(user_lists_path(user_id));
        let response = self.transport().execute(&request).await?;
        if response.is_not_found() {
            warn!(url = %request.url, "Imdb lists page not found");
        }
        let body = response.text().await?;
        let list_ids = list_ids_from_page(&ScraperDocument::parse(&body));

        if list_ids.is_empty() {
            info!("Found no imdb lists");
            return Ok(Vec::new());
        }
        info!(count = list_ids.len(), "Found imdb lists");

        let mut lists = Vec::with_capacity(list_ids.len());
        for list_id in &list_ids {
            match self.fetch_list(list_id).await {
                Ok(list) => lists.push(list),
                Err(e) => {
                    error!(list_id = %list_id, error = %e, "Unexpected error while scraping imdb lists");
                }
            }
        }

        if lists.len() < list_ids.len() {
            warn!(fetched = lists.len(), found = list_ids.len(), "Some imdb lists were skipped");
        }
        Ok(lists)
    }
}
