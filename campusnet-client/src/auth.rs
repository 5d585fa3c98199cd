//! Password authentication against the CampusNet auth endpoint

use crate::error::CampusNetError;
use crate::headers;
use crate::transport::Transport;
use crate::xml::XmlElement;

/// Element present in the auth response only when the login succeeded
const LIMITED_ACCESS: &str = "LimitedAccess";

/// Attribute of `LimitedAccess` carrying the access token. The API calls it
/// a password; it is the token used for all later reads.
const TOKEN_ATTRIBUTE: &str = "Password";

/// Exchanges a username and password for an access token
///
/// # Example
///
/// ```no_run
/// use campusnet_client::{Authenticator, HttpTransport};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = HttpTransport::new(reqwest::blocking::Client::new());
/// let auth_url = reqwest::Url::parse("https://auth.dtu.dk/dtu/mobilapp.jsp")?;
/// let auth = Authenticator::new(&transport, &auth_url, "MyApp", "app-token-123");
///
/// match auth.auth_token("s123456", "secret")? {
///     Some(token) => println!("Got token of {} chars", token.len()),
///     None => println!("Wrong username or password"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct Authenticator<'a, T: Transport> {
    transport: &'a T,
    auth_url: &'a reqwest::Url,
    app_name: &'a str,
    api_token: &'a str,
}

impl<'a, T: Transport> Authenticator<'a, T> {
    pub fn new(
        transport: &'a T,
        auth_url: &'a reqwest::Url,
        app_name: &'a str,
        api_token: &'a str,
    ) -> Self {
        Self {
            transport,
            auth_url,
            app_name,
            api_token,
        }
    }

    /// Fetch an access token for the given user
    ///
    /// # Returns
    ///
    /// * `Ok(Some(token))` - The credentials were accepted
    /// * `Ok(None)` - The credentials were rejected
    /// * `Err` - Network error, or the response was not well-formed XML
    pub fn auth_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<String>, CampusNetError> {
        let headers = headers::app_headers(self.app_name, self.api_token)?;
        let form = [("username", username), ("password", password)];

        let response = self
            .transport
            .post_form(self.auth_url.clone(), headers, &form)?;

        let token = extract_token(&response.body)?;
        if token.is_none() {
            tracing::warn!(username, "CampusNet rejected the credentials");
        }
        Ok(token)
    }
}

/// Pull the access token out of an auth response body
pub(crate) fn extract_token(response_text: &str) -> Result<Option<String>, CampusNetError> {
    let root = XmlElement::parse(response_text)?;
    match root.find(LIMITED_ACCESS) {
        Some(access) => Ok(Some(access.required_attribute(TOKEN_ATTRIBUTE)?.to_string())),
        None => Ok(None),
    }
}
