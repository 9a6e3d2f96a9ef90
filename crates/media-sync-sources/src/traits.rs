use async_trait::async_trait;
use media_sync_models::{ImdbItem, ImdbList};
use crate::error::ImdbError;
use crate::imdb::ImdbClient;

/// What a sync target consumes from IMDb.
#[async_trait]
pub trait ImdbListSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn source_name(&self) -> &str;

    async fn get_watchlist(&self) -> Result<ImdbList, Self::Error>;
    async fn get_list(&self, list_id: &str) -> Result<ImdbList, Self::Error>;
    async fn get_lists(&self) -> Result<Vec<ImdbList>, Self::Error>;
    async fn get_ratings(&self) -> Result<Vec<ImdbItem>, Self::Error>;
}

#[async_trait]
impl ImdbListSource for ImdbClient {
    type Error = ImdbError;

    fn source_name(&self) -> &str {
        "imdb"
    }

    async fn get_watchlist(&self) -> Result<ImdbList, ImdbError> {
        self.fetch_watchlist().await
    }

    async fn get_list(&self, list_id: &str) -> Result<ImdbList, ImdbError> {
        self.fetch_list(list_id).await
    }

    async fn get_lists(&self) -> Result<Vec<ImdbList>, ImdbError> {
        self.fetch_all_lists().await
    }

    async fn get_ratings(&self) -> Result<Vec<ImdbItem>, ImdbError> {
        self.fetch_ratings().await
    }
}
