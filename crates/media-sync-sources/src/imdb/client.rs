use media_sync_config::ImdbSettings;
use std::time::Duration;
use tracing::{error, info};
use crate::error::{ImdbError, Result};
use crate::imdb::session::{parse_base_url, SessionCredentials};
use crate::imdb::transport::ImdbTransport;

/// Cookie-authenticated IMDb scraper.
///
/// Owns the session credentials. Resolving ids needs `&mut self`, every fetch
/// only `&self`, so the client can be shared once it has been hydrated.
pub struct ImdbClient {
    transport: ImdbTransport,
    credentials: SessionCredentials,
}

impl ImdbClient {
    /// Build a client without touching the network.
    pub fn new(credentials: SessionCredentials, base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let transport = ImdbTransport::new(&credentials, base_url, timeout)?;
        Ok(Self { transport, credentials })
    }

    /// Build a client and resolve the account ids it needs.
    pub async fn connect(credentials: SessionCredentials, base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut client = Self::new(credentials, base_url, timeout)?;
        client.hydrate().await?;
        Ok(client)
    }

    pub async fn from_settings(settings: &ImdbSettings) -> Result<Self> {
        let credentials = SessionCredentials::new(&settings.cookie_at_main, &settings.cookie_ubid_main)
            .with_user_id(settings.user_id.clone())
            .with_watchlist_id(settings.watchlist_id.clone());
        Self::connect(credentials, &settings.base_url, settings.request_timeout).await
    }

    /// Fill in the account ids.
    ///
    /// The user id is only scraped when it was not supplied (or set to
    /// "scrape"); the watchlist id is always scraped again.
    pub async fn hydrate(&mut self) -> Result<()> {
        if self.credentials.needs_user_id_discovery() {
            if let Err(e) = self.resolve_user_id().await {
                error!(error = %e, "Failure scraping imdb user id");
                return Err(e);
            }
        } else {
            info!(user_id = ?self.credentials.user_id(), "Using configured imdb user id");
        }

        if let Err(e) = self.resolve_watchlist_id().await {
            error!(error = %e, "Failure scraping imdb watchlist id");
            return Err(e);
        }
        Ok(())
    }

    pub fn credentials(&self) -> &SessionCredentials {
        &self.credentials
    }

    pub(crate) fn credentials_mut(&mut self) -> &mut SessionCredentials {
        &mut self.credentials
    }

    pub(crate) fn transport(&self) -> &ImdbTransport {
        &self.transport
    }

    pub(crate) fn user_id(&self) -> Result<&str> {
        self.credentials
            .user_id()
            .filter(|_| !self.credentials.needs_user_id_discovery())
            .ok_or(ImdbError::MissingIdentity("user id"))
    }

    pub(crate) fn watchlist_id(&self) -> Result<&str> {
        self.credentials
            .watchlist_id()
            .filter(|id| !id.is_empty())
            .ok_or(ImdbError::MissingIdentity("watchlist id"))
    }
}
