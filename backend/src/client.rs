//! Async HTTP client for the beer catalog API.
//!
//! Every call returns a future that resolves within the client's timeout
//! (default [`DEFAULT_TIMEOUT`]). A call that runs out of time fails with
//! [`ClientError::Timeout`]; error statuses from the server map to the other
//! variants of [`ClientError`].
//!
//! # Example
//! ```no_run
//! use brewery_rest::client::BeerClient;
//! use brewery_rest::models::BeerId;
//!
//! # async fn run() -> Result<(), brewery_rest::client::ClientError> {
//! let client = BeerClient::new("http://localhost:8080")?;
//! let beer = client.get_beer_by_id(BeerId::new(1)).await?;
//! println!("{:?}", beer.beer_name);
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use reqwest::{header, Response, StatusCode, Url};
use thiserror::Error;

use crate::api::{
    BeerDto, BeerListQuery, BeerPagedList, BEER_V1_PATH, BEER_V2_PATH, BEER_V2_UPC_PATH,
};
use crate::models::{BeerId, NewBeer};

/// Default bound on a single call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Result type for client calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors returned by [`BeerClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// 404 from the server.
    #[error("Not found: {0}")]
    NotFound(String),

    /// 400 from the server.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 409 from the server.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other non-success status.
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    /// No complete response within the configured bound.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, protocol or decoding failure.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A create response without a usable `Location` header.
    #[error("Invalid Location header: {0}")]
    InvalidLocation(String),

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Client for the catalog REST API.
#[derive(Debug, Clone)]
pub struct BeerClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl BeerClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ==================== Queries ====================

    /// GET /api/v1/beer
    pub async fn list_beers(&self, query: &BeerListQuery) -> ClientResult<BeerPagedList> {
        let request = self.http.get(self.url(BEER_V1_PATH)).query(query);
        self.bounded(async move {
            let response = check_status(request.send().await?).await?;
            Ok(response.json::<BeerPagedList>().await?)
        })
        .await
    }

    /// GET /api/v2/beer/{id}
    pub async fn get_beer_by_id(&self, id: BeerId) -> ClientResult<BeerDto> {
        let request = self.http.get(self.item_url(BEER_V2_PATH, &id.to_string())?);
        self.bounded(async move {
            let response = check_status(request.send().await?).await?;
            Ok(response.json::<BeerDto>().await?)
        })
        .await
    }

    /// GET /api/v2/beerUpc/{upc}
    ///
    /// The UPC is sent as a single percent-encoded path segment, so reserved
    /// characters such as `/`, `?` or `#` reach the server unchanged.
    pub async fn get_beer_by_upc(&self, upc: &str) -> ClientResult<BeerDto> {
        let request = self.http.get(self.item_url(BEER_V2_UPC_PATH, upc)?);
        self.bounded(async move {
            let response = check_status(request.send().await?).await?;
            Ok(response.json::<BeerDto>().await?)
        })
        .await
    }

    // ==================== Mutations ====================

    /// POST /api/v2/beer, returning the id taken from the `Location` header.
    pub async fn create_beer(&self, beer: &NewBeer) -> ClientResult<BeerId> {
        self.submit_beer(&BeerDto::from_new(beer)).await
    }

    /// POST /api/v2/beer with an arbitrary, possibly invalid, body.
    pub async fn submit_beer(&self, body: &BeerDto) -> ClientResult<BeerId> {
        let request = self.http.post(self.url(BEER_V2_PATH)).json(body);
        self.bounded(async move {
            let response = check_status(request.send().await?).await?;
            let location = response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .ok_or_else(|| ClientError::InvalidLocation("missing".to_string()))?;
            parse_location(location)
        })
        .await
    }

    /// PUT /api/v2/beer/{id}
    pub async fn update_beer(&self, id: BeerId, beer: &NewBeer) -> ClientResult<()> {
        let request = self
            .http
            .put(self.item_url(BEER_V2_PATH, &id.to_string())?)
            .json(&BeerDto::from_new(beer));
        self.bounded(async move {
            check_status(request.send().await?).await?;
            Ok(())
        })
        .await
    }

    /// DELETE /api/v2/beer/{id}
    pub async fn delete_beer(&self, id: BeerId) -> ClientResult<()> {
        let request = self.http.delete(self.item_url(BEER_V2_PATH, &id.to_string())?);
        self.bounded(async move {
            check_status(request.send().await?).await?;
            Ok(())
        })
        .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `path` on the server followed by `segment`, percent-encoded.
    fn item_url(&self, path: &str, segment: &str) -> ClientResult<Url> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };
        let mut url = Url::parse(&self.url(path)).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base".to_string()))?
            .push(segment);
        Ok(url)
    }

    /// Run `call` within the configured timeout.
    async fn bounded<T, F>(&self, call: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Err(ClientError::Transport(e))) if e.is_timeout() => {
                Err(ClientError::Timeout(self.timeout))
            }
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(self.timeout)),
        }
    }
}

async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<empty response>".to_string());
    Err(match status {
        StatusCode::NOT_FOUND => ClientError::NotFound(body),
        StatusCode::BAD_REQUEST => ClientError::BadRequest(body),
        StatusCode::CONFLICT => ClientError::Conflict(body),
        status => ClientError::UnexpectedStatus { status, body },
    })
}

/// Extract the id from a `Location` such as `/api/v2/beer/42`.
fn parse_location(location: &str) -> ClientResult<BeerId> {
    location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<BeerId>().ok())
        .ok_or_else(|| ClientError::InvalidLocation(location.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        assert_eq!(parse_location("/api/v2/beer/42").unwrap(), BeerId::new(42));
        assert_eq!(
            parse_location("http://localhost:8080/api/v1/beer/7/").unwrap(),
            BeerId::new(7)
        );
        assert!(matches!(
            parse_location("/api/v2/beer/"),
            Err(ClientError::InvalidLocation(_))
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            BeerClient::new("not a url"),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = BeerClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_item_url_encodes_reserved_characters() {
        let client = BeerClient::new("http://localhost:8080/").unwrap();

        let url = client.item_url(BEER_V2_UPC_PATH, "AB/12?x#y").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/v2/beerUpc/AB%2F12%3Fx%23y"
        );

        let url = client.item_url(BEER_V2_UPC_PATH, "50%OFF").unwrap();
        assert_eq!(url.path(), "/api/v2/beerUpc/50%25OFF");

        let url = client.item_url(BEER_V2_PATH, "42").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v2/beer/42");
    }

    #[test]
    fn test_item_url_rejects_opaque_base() {
        let client = BeerClient::new("mailto:brewer@example.com").unwrap();
        assert!(matches!(
            client.item_url(BEER_V2_UPC_PATH, "1"),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
    }
}
