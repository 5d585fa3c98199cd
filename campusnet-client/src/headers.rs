//! Request headers identifying the calling application

use crate::error::CampusNetError;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue};

const APP_NAME: HeaderName = HeaderName::from_static("x-appname");
const APP_TOKEN: HeaderName = HeaderName::from_static("x-token");
const INCLUDE_RELATIONS: HeaderName = HeaderName::from_static("x-include-services-and-relations");

fn header_value(
    name: &HeaderName,
    value: &str,
    sensitive: bool,
) -> Result<HeaderValue, CampusNetError> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|_| CampusNetError::ClientInit(format!("Invalid value for header {}", name)))?;
    header.set_sensitive(sensitive);
    Ok(header)
}

/// `X-appname` and `X-token`, sent on every request
pub(crate) fn app_headers(app_name: &str, api_token: &str) -> Result<HeaderMap, CampusNetError> {
    let mut headers = HeaderMap::new();
    headers.insert(APP_NAME, header_value(&APP_NAME, app_name, false)?);
    headers.insert(APP_TOKEN, header_value(&APP_TOKEN, api_token, true)?);
    Ok(headers)
}

/// Headers for reads below `CurrentUser`
pub(crate) fn read_headers(
    app_name: &str,
    api_token: &str,
    locale: &str,
) -> Result<HeaderMap, CampusNetError> {
    let mut headers = app_headers(app_name, api_token)?;
    headers.insert(ACCEPT_LANGUAGE, header_value(&ACCEPT_LANGUAGE, locale, false)?);
    headers.insert(INCLUDE_RELATIONS, HeaderValue::from_static("true"));
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_headers() {
        let headers = read_headers("MyApp", "app-token-123", "da-DK").unwrap();

        assert_eq!(headers["X-appname"], "MyApp");
        assert_eq!(headers["X-token"], "app-token-123");
        assert_eq!(headers["accept-language"], "da-DK");
        assert_eq!(headers["X-Include-services-and-relations"], "true");
        assert!(headers["X-token"].is_sensitive());
    }

    #[test]
    fn test_app_headers_only_identify_the_app() {
        let headers = app_headers("MyApp", "app-token-123").unwrap();
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_invalid_header_value() {
        let result = app_headers("My\nApp", "token");
        assert!(matches!(result, Err(CampusNetError::ClientInit(_))));
    }
}
