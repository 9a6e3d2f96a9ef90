use media_sync_models::ImdbItem;
use tracing::info;
use crate::error::{DecodeError, ImdbError, Result, CLIENT_NAME_IMDB};
use crate::imdb::client::ImdbClient;
use crate::imdb::export::decode_ratings;
use crate::imdb::transport::ImdbResponse;

pub fn ratings_export_path(user_id: &str) -> String {
    format!("/user/{}/ratings/export", user_id)
}

impl ImdbClient {
    /// Download and decode the account's ratings export.
    ///
    /// All-or-nothing: one malformed row fails the call.
    pub async fn fetch_ratings(&self) -> Result<Vec<ImdbItem>> {
        let user_id = self.user_id()?;
        let request = self.transport().get(ratings_export_path(user_id));

        let response = match self.transport().execute(&request).await? {
            ImdbResponse::Found(response) => response,
            // There is no meaningful "missing" ratings export
            ImdbResponse::NotFound(response) => {
                return Err(ImdbError::UnexpectedStatus {
                    client: CLIENT_NAME_IMDB,
                    method: request.method,
                    url: response.url().to_string(),
                    status: response.status().as_u16(),
                })
            }
        };

        let body = response.bytes().await.map_err(DecodeError::Body)?;
        let ratings = decode_ratings(&body)?;
        info!(count = ratings.len(), "Fetched imdb ratings");
        Ok(ratings)
    }
}
