//! Main ArtworksClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::ApiError;
use crate::error::Error;

/// Base URL of the public Art Institute of Chicago API.
pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";

/// Largest `limit` the collection endpoint accepts.
pub const MAX_PAGE_SIZE: usize = 100;

/// Fields requested by default, one per [`Artwork`](crate::model::Artwork) attribute.
pub const DEFAULT_FIELDS: &[&str] = &[
    "id",
    "title",
    "place_of_origin",
    "artist_display",
    "inscriptions",
    "date_start",
    "date_end",
];

/// The client for the artworks collection API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks.
///
/// # Example
///
/// ```ignore
/// use artworks_lib::ArtworksClient;
/// use artworks_lib::api::PageFetcher;
///
/// let client = ArtworksClient::builder()
///     .url("https://api.artic.edu/api/v1")
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let page = client.fetch_page(1, 12).await?;
/// ```
#[derive(Clone)]
pub struct ArtworksClient {
    inner: Arc<ArtworksClientInner>,
}

struct ArtworksClientInner {
    base_url: String,
    fields: Vec<String>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ArtworksClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ArtworksClientBuilder<Missing> {
        ArtworksClientBuilder::new()
    }

    /// Creates a client for the public API with default settings.
    pub fn public() -> Result<Self, Error> {
        Self::builder().url(DEFAULT_BASE_URL).build()
    }

    /// Returns the base URL of the API.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Builds the collection URL for one page.
    pub fn page_url(&self, page: usize, page_size: usize) -> Result<Url, Error> {
        if page == 0 {
            return Err(Error::InvalidConfig("page index is 1-based".to_string()));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(Error::InvalidConfig(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }

        let raw = format!("{}/artworks", self.inner.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &page.to_string());
            query.append_pair("limit", &page_size.to_string());
            if !self.inner.fields.is_empty() {
                query.append_pair("fields", &self.inner.fields.join(","));
            }
        }
        Ok(url)
    }

    /// Sends a GET request and returns the body of a successful response.
    pub(crate) async fn get_text(&self, url: Url) -> Result<String, Error> {
        let mut request = self.inner.http_client.get(url);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(Error::Api(ApiError::http(status.as_u16(), message)));
        }

        response.text().await.map_err(|e| self.map_send_error(e))
    }

    fn map_send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Api(ApiError::Timeout(self.inner.timeout.unwrap_or_default()))
        } else {
            Error::Api(ApiError::from(err))
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`ArtworksClient`].
///
/// Uses the typestate pattern so `build` is only callable once a URL is set.
///
/// ```ignore
/// let client = ArtworksClient::builder()
///     .url("https://api.artic.edu/api/v1")
///     .fields(["id", "title"])
///     .connect_timeout(Duration::from_secs(5))
///     .build()?;
/// ```
pub struct ArtworksClientBuilder<U> {
    url: U,
    fields: Vec<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ArtworksClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the API base URL, e.g. `https://api.artic.edu/api/v1`.
    pub fn url(self, url: impl Into<String>) -> ArtworksClientBuilder<Set<String>> {
        ArtworksClientBuilder {
            url: Set(url.into()),
            fields: self.fields,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for ArtworksClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ArtworksClientBuilder<U> {
    /// Sets the fields requested for each record.
    ///
    /// Defaults to [`DEFAULT_FIELDS`]. An empty list omits the `fields`
    /// parameter and the API returns every field.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ArtworksClientBuilder<Set<String>> {
    /// Builds the [`ArtworksClient`].
    ///
    /// Fails if the URL does not parse or the HTTP client cannot be created.
    pub fn build(self) -> Result<ArtworksClient, Error> {
        let base_url = self.url.0;
        Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::Network)?
            }
        };

        Ok(ArtworksClient {
            inner: Arc::new(ArtworksClientInner {
                base_url,
                fields: self.fields,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ArtworksClient {
        ArtworksClient::builder()
            .url("https://api.artic.edu/api/v1/")
            .build()
            .unwrap()
    }

    #[test]
    fn test_page_url() {
        let url = client().page_url(2, 12).unwrap();
        assert_eq!(url.path(), "/api/v1/artworks");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("page".to_string(), "2".to_string()));
        assert_eq!(pairs[1], ("limit".to_string(), "12".to_string()));
        assert_eq!(pairs[2].0, "fields");
        assert!(pairs[2].1.starts_with("id,title,"));
    }

    #[test]
    fn test_page_url_without_fields() {
        let client = ArtworksClient::builder()
            .url(DEFAULT_BASE_URL)
            .fields(Vec::<String>::new())
            .build()
            .unwrap();
        let url = client.page_url(1, 12).unwrap();
        assert_eq!(url.query(), Some("page=1&limit=12"));
    }

    #[test]
    fn test_page_url_rejects_bad_sizes() {
        let client = client();
        assert!(matches!(client.page_url(0, 12), Err(Error::InvalidConfig(_))));
        assert!(matches!(client.page_url(1, 0), Err(Error::InvalidConfig(_))));
        assert!(matches!(
            client.page_url(1, MAX_PAGE_SIZE + 1),
            Err(Error::InvalidConfig(_))
        ));
        assert!(client.page_url(1, MAX_PAGE_SIZE).is_ok());
    }

    #[test]
    fn test_build_rejects_invalid_url() {
        let result = ArtworksClient::builder().url("not a url").build();
        assert!(matches!(result, Err(Error::Api(ApiError::InvalidUrl(_)))));
    }
}
