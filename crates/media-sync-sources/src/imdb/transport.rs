use reqwest::{Client, Method, Response, StatusCode, Url};
use std::time::Duration;
use tracing::debug;
use crate::error::{DecodeError, ImdbError, Result, CLIENT_NAME_IMDB};
use crate::imdb::session::{session_jar, SessionCredentials};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Description of one outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFields {
    pub method: Method,
    pub endpoint: String,
    pub path: String,
    pub url: String,
    pub body: Option<String>,
}

impl RequestFields {
    pub fn get(base_url: &Url, path: impl Into<String>) -> Self {
        let path = path.into();
        let endpoint = base_url.as_str().trim_end_matches('/').to_string();
        Self {
            method: Method::GET,
            url: format!("{}{}", endpoint, path),
            endpoint,
            path,
            body: None,
        }
    }
}

/// How a response status is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    NotFound,
    Unauthorized,
    Unexpected(StatusCode),
}

impl From<StatusCode> for StatusClass {
    fn from(status: StatusCode) -> Self {
        match status {
            StatusCode::OK => StatusClass::Success,
            StatusCode::NOT_FOUND => StatusClass::NotFound,
            StatusCode::FORBIDDEN => StatusClass::Unauthorized,
            other => StatusClass::Unexpected(other),
        }
    }
}

/// A response that made it past status classification.
///
/// 404 is handed back instead of failing so each caller can decide whether a
/// missing page is an error.
#[derive(Debug)]
pub enum ImdbResponse {
    Found(Response),
    NotFound(Response),
}

impl ImdbResponse {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ImdbResponse::NotFound(_))
    }

    pub fn into_inner(self) -> Response {
        match self {
            ImdbResponse::Found(response) | ImdbResponse::NotFound(response) => response,
        }
    }

    pub async fn text(self) -> Result<String> {
        self.into_inner()
            .text()
            .await
            .map_err(|e| DecodeError::Body(e).into())
    }
}

/// HTTP client carrying the session cookies on every request.
#[derive(Clone)]
pub struct ImdbTransport {
    client: Client,
    base_url: Url,
}

impl ImdbTransport {
    pub fn new(credentials: &SessionCredentials, base_url: Url, timeout: Option<Duration>) -> Result<Self> {
        let jar = session_jar(credentials, &base_url);
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_provider(jar);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ImdbError::ClientBuild)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Request descriptor for a GET on `path` relative to the base origin.
    pub fn get(&self, path: impl Into<String>) -> RequestFields {
        RequestFields::get(&self.base_url, path)
    }

    pub async fn execute(&self, fields: &RequestFields) -> Result<ImdbResponse> {
        debug!(method = %fields.method, url = %fields.url, "Sending imdb request");

        let mut request = self.client.request(fields.method.clone(), &fields.url);
        if let Some(body) = &fields.body {
            request = request.body(body.clone());
        }

        let response = request.send().await.map_err(|source| ImdbError::Request {
            method: fields.method.clone(),
            url: fields.url.clone(),
            source,
        })?;

        let status = response.status();
        debug!(url = %fields.url, status = status.as_u16(), "Received imdb response");

        match StatusClass::from(status) {
            StatusClass::Success => Ok(ImdbResponse::Found(response)),
            StatusClass::NotFound => Ok(ImdbResponse::NotFound(response)),
            StatusClass::Unauthorized => Err(ImdbError::Authorization {
                client: CLIENT_NAME_IMDB,
                method: fields.method.clone(),
                url: response.url().to_string(),
                status: status.as_u16(),
            }),
            StatusClass::Unexpected(status) => Err(ImdbError::UnexpectedStatus {
                client: CLIENT_NAME_IMDB,
                method: fields.method.clone(),
                url: response.url().to_string(),
                status: status.as_u16(),
            }),
        }
    }
}
