// Floor-plan service HTTP client.
// Handles base URL resolution, default headers, and request/response processing.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Serialize;

use crate::error::{HauskitError, Result};

/// HTTP client for the floor-plan REST API.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client for the API at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("hauskit"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(HauskitError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the HAUSKIT_API_URL environment variable.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("HAUSKIT_API_URL").map_err(|_| HauskitError::MissingBaseUrl)?;
        Self::new(base_url)
    }

    /// Get the base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an absolute URL for an API endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Access the underlying HTTP client (shared with the blob cache fetcher).
    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Make a GET request to the API.
    pub async fn get(&self, path: &str) -> Result<Response> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(HauskitError::Http)?;
        check_response(response)
    }

    /// Make a POST request with a JSON body.
    pub async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(HauskitError::Http)?;
        check_response(response)
    }

    /// Make a PATCH request with a JSON body.
    pub async fn patch_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response> {
        let response = self
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(HauskitError::Http)?;
        check_response(response)
    }

    /// Make a POST request with a multipart form body.
    pub async fn post_multipart(
        &self,
        path: &str,
        query: &[(&str, &str)],
        form: reqwest::multipart::Form,
    ) -> Result<Response> {
        let response = self
            .client
            .post(self.url(path))
            .query(query)
            .multipart(form)
            .send()
            .await
            .map_err(HauskitError::Http)?;
        check_response(response)
    }
}

/// Check response status and convert errors.
pub(crate) fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    match status {
        StatusCode::NOT_FOUND => Err(HauskitError::NotFound(url)),
        status => Err(HauskitError::Status { status, url }),
    }
}
