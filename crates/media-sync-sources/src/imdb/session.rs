use reqwest::cookie::Jar;
use reqwest::Url;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use crate::error::{ImdbError, Result};

pub const COOKIE_AT_MAIN: &str = "at-main";
pub const COOKIE_UBID_MAIN: &str = "ubid-main";

/// Session tokens copied from a logged-in browser, plus the account ids that
/// are discovered once and then reused for the rest of the run.
#[derive(Clone)]
pub struct SessionCredentials {
    at_main: String,
    ubid_main: String,
    pub(crate) user_id: Option<String>,
    pub(crate) watchlist_id: Option<String>,
}

impl SessionCredentials {
    pub fn new(at_main: impl Into<String>, ubid_main: impl Into<String>) -> Self {
        Self {
            at_main: at_main.into(),
            ubid_main: ubid_main.into(),
            user_id: None,
            watchlist_id: None,
        }
    }

    pub fn with_user_id(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_watchlist_id(mut self, watchlist_id: Option<String>) -> Self {
        self.watchlist_id = watchlist_id;
        self
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn watchlist_id(&self) -> Option<&str> {
        self.watchlist_id.as_deref()
    }

    /// Whether the user id has to be scraped from the profile page.
    ///
    /// An absent id, an empty id and the literal "scrape" all ask for discovery.
    pub fn needs_user_id_discovery(&self) -> bool {
        match self.user_id.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(id) => id.eq_ignore_ascii_case(media_sync_config::USER_ID_SCRAPE),
        }
    }
}

impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("at_main", &media_sync_config::mask_secret(&self.at_main))
            .field("ubid_main", &media_sync_config::mask_secret(&self.ubid_main))
            .field("user_id", &self.user_id)
            .field("watchlist_id", &self.watchlist_id)
            .finish()
    }
}

/// Parse the site origin every request is sent to.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    Url::parse(base_url).map_err(|source| ImdbError::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })
}

/// Build a cookie jar holding both session cookies, scoped to `base_url`.
pub fn session_jar(credentials: &SessionCredentials, base_url: &Url) -> Arc<Jar> {
    let jar = Jar::default();
    jar.add_cookie_str(&format!("{}={}; Path=/", COOKIE_AT_MAIN, credentials.at_main), base_url);
    jar.add_cookie_str(&format!("{}={}; Path=/", COOKIE_UBID_MAIN, credentials.ubid_main), base_url);
    debug!(origin = %base_url, "Anchored imdb session cookies");
    Arc::new(jar)
}
