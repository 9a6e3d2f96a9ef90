use reqwest::Method;
use thiserror::Error;

/// Client name carried by HTTP status errors
pub const CLIENT_NAME_IMDB: &str = "imdb";

#[derive(Debug, Error)]
pub enum ImdbError {
    #[error("{client} authorization failure on {method} {url} (status {status}): update the imdb cookie values")]
    Authorization {
        client: &'static str,
        method: Method,
        url: String,
        status: u16,
    },

    #[error("{client} request {method} {url} failed: unexpected status code {status}")]
    UnexpectedStatus {
        client: &'static str,
        method: Method,
        url: String,
        status: u16,
    },

    #[error("list with id {list_id} could not be found ({url})")]
    ListNotFound { list_id: String, url: String },

    #[error("no element matching '{selector}' with attribute '{attribute}' found in imdb page")]
    ScrapeNotFound {
        selector: &'static str,
        attribute: &'static str,
    },

    #[error("failure decoding imdb response: {0}")]
    Decode(#[from] DecodeError),

    #[error("failure sending http request {method} {url}: {source}")]
    Request {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failure parsing {url} as url: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failure building http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("imdb {0} is not known yet; resolve it before fetching")]
    MissingIdentity(&'static str),
}

impl ImdbError {
    /// True when the session cookies were rejected and need refreshing.
    pub fn is_authorization(&self) -> bool {
        matches!(self, ImdbError::Authorization { .. })
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ImdbError::Authorization { status, .. } | ImdbError::UnexpectedStatus { status, .. } => Some(*status),
            ImdbError::ListNotFound { .. } => Some(404),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failure reading csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row} has no column {column}")]
    MissingColumn { row: usize, column: usize },

    #[error("failure parsing rating value '{value}' as an integer between 1 and 10")]
    Rating { value: String },

    #[error("failure parsing rating date '{value}': {source}")]
    RatingDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("failure reading header {0} from imdb response")]
    MissingHeader(&'static str),

    #[error("failure parsing imdb header {header}: {reason}")]
    InvalidHeader {
        header: &'static str,
        reason: String,
    },

    #[error("failure reading response body: {0}")]
    Body(#[source] reqwest::Error),
}

pub type Result<T, E = ImdbError> = std::result::Result<T, E>;
