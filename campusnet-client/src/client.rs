//! CampusNet session client implementation

use crate::auth::Authenticator;
use crate::error::CampusNetError;
use crate::headers;
use crate::model::{ExamResult, Identity, Profile, Session};
use crate::parser::{Extractor, GradesExtractor, ProfileExtractor};
use crate::transport::{BasicCredentials, HttpTransport, Transport};

/// Default root of the data API
pub const DEFAULT_API_BASE_URL: &str = "https://www.campusnet.dtu.dk/data/";

/// Default password authentication endpoint
pub const DEFAULT_AUTH_URL: &str = "https://auth.dtu.dk/dtu/mobilapp.jsp";

/// Default `accept-language` for reads
pub const DEFAULT_LOCALE: &str = "da-DK";

/// Resources readable below `CurrentUser`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Name and e-mail of the user
    UserInfo,
    /// Exam results of the user's education programmes
    Grades,
}

impl Resource {
    /// Path segment of the resource
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::UserInfo => "UserInfo",
            Resource::Grades => "Grades",
        }
    }
}

/// Endpoints and locale used by a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root under which `CurrentUser/<Resource>` is resolved
    pub api_base_url: reqwest::Url,
    /// Endpoint receiving the username/password form
    pub auth_url: reqwest::Url,
    /// Value of the `accept-language` header on reads
    pub locale: String,
}

impl ClientConfig {
    /// URL of a `CurrentUser` resource, keeping any path prefix of the base
    pub fn resource_url(&self, resource: Resource) -> Result<reqwest::Url, CampusNetError> {
        let mut url = self.api_base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                CampusNetError::InvalidUrl(format!("{} cannot be a base", self.api_base_url))
            })?
            .pop_if_empty()
            .extend(["CurrentUser", resource.as_str()]);
        Ok(url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: reqwest::Url::parse(DEFAULT_API_BASE_URL)
                .expect("Default API base URL should always be valid"),
            auth_url: reqwest::Url::parse(DEFAULT_AUTH_URL)
                .expect("Default auth URL should always be valid"),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

/// The CampusNet session client
///
/// Holds the identity of the calling application and the user, plus the
/// access token once [`CampusNetClient::authenticate`] has succeeded. Reads
/// are sent whether or not the client is authenticated; without a token the
/// API answers with a fault and the read returns `Ok(None)`.
///
/// # Example
///
/// ```no_run
/// use campusnet_client::{CampusNetClient, Identity};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let identity = Identity::new("MyCampusNetApp", "app-token-123", "s123456");
/// let mut client = CampusNetClient::new(identity)?;
///
/// if !client.authenticate("secret-password")? {
///     println!("Wrong password");
///     return Ok(());
/// }
///
/// if let Some(profile) = client.profile()? {
///     println!("{} {}", profile.first_name, profile.last_name);
/// }
/// for result in client.grades()?.unwrap_or_default() {
///     println!("{}: {}", result.course.title, result.grade);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct CampusNetClient<T: Transport = HttpTransport> {
    transport: T,
    config: ClientConfig,
    session: Session,
}

impl CampusNetClient {
    /// Create an unauthenticated client with the default endpoints
    ///
    /// # Errors
    ///
    /// Returns `CampusNetError::ClientInit` if the HTTP client cannot be initialized.
    pub fn new(identity: Identity) -> Result<Self, CampusNetError> {
        Self::builder().build(identity)
    }

    /// Create a builder for configuring the client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use campusnet_client::{CampusNetClient, Identity};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = CampusNetClient::builder()
    ///     .api_base_url("http://localhost:1234/data/")?
    ///     .auth_url("http://localhost:1234/auth")?
    ///     .build(Identity::new("MyApp", "app-token-123", "s123456"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> CampusNetClientBuilder {
        CampusNetClientBuilder::new()
    }
}

impl<T: Transport> CampusNetClient<T> {
    /// Create a client over a custom transport
    pub fn with_transport(transport: T, config: ClientConfig, session: Session) -> Self {
        Self {
            transport,
            config,
            session,
        }
    }

    /// Endpoints and locale in use
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Identity and authentication state
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether an access token is held
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// The access token, if authenticated
    pub fn access_token(&self) -> Option<&str> {
        self.session.access_token()
    }

    /// Authenticate the user with their password
    ///
    /// On success the returned access token is stored and used by later
    /// reads. A rejected password leaves the client as it was.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The password was accepted
    /// * `Ok(false)` - The password was rejected
    /// * `Err` - Network error or malformed response
    pub fn authenticate(&mut self, password: &str) -> Result<bool, CampusNetError> {
        let token = self
            .authenticator()
            .auth_token(&self.session.identity().subject_id, password)?;

        match token {
            Some(token) => {
                tracing::debug!(subject = %self.session.identity().subject_id, "authenticated");
                self.session.set_access_token(token);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Authenticator bound to this client's transport and identity
    pub fn authenticator(&self) -> Authenticator<'_, T> {
        let identity = self.session.identity();
        Authenticator::new(
            &self.transport,
            &self.config.auth_url,
            &identity.app_name,
            &identity.api_token,
        )
    }

    /// Fetch the user's profile
    ///
    /// # Returns
    ///
    /// * `Ok(Some(profile))` - The profile was returned
    /// * `Ok(None)` - The API answered with a fault
    /// * `Err` - Network error, malformed response, or missing attribute
    pub fn profile(&self) -> Result<Option<Profile>, CampusNetError> {
        self.fetch(Resource::UserInfo, &ProfileExtractor)
    }

    /// Fetch the user's exam results in document order
    ///
    /// # Returns
    ///
    /// * `Ok(Some(results))` - The results, possibly empty
    /// * `Ok(None)` - The API answered with a fault
    /// * `Err` - Network error, malformed response, or missing attribute
    pub fn grades(&self) -> Result<Option<Vec<ExamResult>>, CampusNetError> {
        self.fetch(Resource::Grades, &GradesExtractor)
    }

    /// Read a `CurrentUser` resource and run it through an extractor
    pub fn fetch<E: Extractor>(
        &self,
        resource: Resource,
        extractor: &E,
    ) -> Result<Option<E::Output>, CampusNetError> {
        let identity = self.session.identity();
        if !self.session.is_authenticated() {
            tracing::debug!(resource = resource.as_str(), "reading without an access token");
        }

        let url = self.config.resource_url(resource)?;
        let headers =
            headers::read_headers(&identity.app_name, &identity.api_token, &self.config.locale)?;
        let credentials = BasicCredentials {
            username: &identity.subject_id,
            password: self.session.access_token(),
        };

        let response = self.transport.get(url, headers, credentials)?;
        let record = extractor.extract(&response.body)?;
        tracing::debug!(
            resource = resource.as_str(),
            found = record.is_some(),
            "extracted response"
        );
        Ok(record)
    }
}

/// Builder for configuring a CampusNet client
///
/// # Example
///
/// ```no_run
/// use campusnet_client::{CampusNetClient, Identity};
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let identity = Identity::new("MyApp", "app-token-123", "s123456");
///
/// // Reuse a token from an earlier session with a custom timeout
/// let client = CampusNetClient::builder()
///     .access_token("previously-issued-token")
///     .locale("en-GB")
///     .client_builder(
///         reqwest::blocking::Client::builder()
///             .timeout(Duration::from_secs(30))
///     )
///     .build(identity)?;
/// assert!(client.is_authenticated());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct CampusNetClientBuilder {
    api_base_url: Option<reqwest::Url>,
    auth_url: Option<reqwest::Url>,
    locale: Option<String>,
    access_token: Option<String>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl CampusNetClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root of the data API
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn api_base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, CampusNetError> {
        self.api_base_url = Some(parse_url(url)?);
        Ok(self)
    }

    /// Set the password authentication endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn auth_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, CampusNetError> {
        self.auth_url = Some(parse_url(url)?);
        Ok(self)
    }

    /// Set the `accept-language` sent on reads
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Start authenticated with a token obtained earlier
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set a custom HTTP client builder (timeouts, proxies, etc.)
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Build the client for the given identity
    ///
    /// # Errors
    ///
    /// Returns `CampusNetError::ClientInit` if the HTTP client cannot be initialized.
    pub fn build(self, identity: Identity) -> Result<CampusNetClient, CampusNetError> {
        let defaults = ClientConfig::default();
        let config = ClientConfig {
            api_base_url: self.api_base_url.unwrap_or(defaults.api_base_url),
            auth_url: self.auth_url.unwrap_or(defaults.auth_url),
            locale: self.locale.unwrap_or(defaults.locale),
        };

        let client = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls())
            .build()
            .map_err(|e| CampusNetError::ClientInit(e.to_string()))?;

        let session = match self.access_token {
            Some(token) => Session::with_access_token(identity, token),
            None => Session::new(identity),
        };

        Ok(CampusNetClient::with_transport(
            HttpTransport::new(client),
            config,
            session,
        ))
    }
}

fn parse_url(url: impl reqwest::IntoUrl) -> Result<reqwest::Url, CampusNetError> {
    url.into_url()
        .map_err(|e| CampusNetError::InvalidUrl(e.to_string()))
}
