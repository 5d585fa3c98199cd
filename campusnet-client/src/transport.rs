//! HTTP transport used by the client
//!
//! The client only needs two request shapes: a GET with basic credentials
//! and a form POST. [`Transport`] captures those so the session logic can be
//! driven by something other than a real network in tests.

use crate::error::CampusNetError;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Basic-auth credentials for read requests
///
/// The password is absent when the session has not authenticated yet; the
/// request is still sent and the API is left to reject it.
#[derive(Clone, Copy)]
pub struct BasicCredentials<'a> {
    pub username: &'a str,
    pub password: Option<&'a str>,
}

impl std::fmt::Debug for BasicCredentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &self.password.map(|_| "<redacted>"))
            .finish()
    }
}

/// Synchronous request/response primitive
///
/// Implementations return the body for every status code; interpreting the
/// body is the caller's job.
pub trait Transport {
    /// Send a GET request with basic-auth credentials
    fn get(
        &self,
        url: reqwest::Url,
        headers: HeaderMap,
        credentials: BasicCredentials<'_>,
    ) -> Result<TransportResponse, CampusNetError>;

    /// Send a POST request with a url-encoded form body
    fn post_form(
        &self,
        url: reqwest::Url,
        headers: HeaderMap,
        form: &[(&str, &str)],
    ) -> Result<TransportResponse, CampusNetError>;
}

/// [`Transport`] over a blocking reqwest client
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Wrap an already configured reqwest client
    pub fn new(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    fn read(response: reqwest::blocking::Response) -> Result<TransportResponse, CampusNetError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                %status,
                url = %response.url(),
                "CampusNet answered with a non-success status"
            );
        }
        let body = response.text()?;
        Ok(TransportResponse { status, body })
    }
}

impl Transport for HttpTransport {
    fn get(
        &self,
        url: reqwest::Url,
        headers: HeaderMap,
        credentials: BasicCredentials<'_>,
    ) -> Result<TransportResponse, CampusNetError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .headers(headers)
            .basic_auth(credentials.username, credentials.password)
            .send()?;
        Self::read(response)
    }

    fn post_form(
        &self,
        url: reqwest::Url,
        headers: HeaderMap,
        form: &[(&str, &str)],
    ) -> Result<TransportResponse, CampusNetError> {
        tracing::debug!(%url, "POST");
        let response = self.client.post(url).headers(headers).form(form).send()?;
        Self::read(response)
    }
}
