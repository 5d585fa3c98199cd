//! Error types for the CampusNet client

use thiserror::Error;

/// Errors that can occur when using the CampusNet client
///
/// Rejected authentication and fault responses are not errors: they surface
/// as `Ok(None)` from the operations that can produce them.
#[derive(Error, Debug)]
pub enum CampusNetError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failed to decode response as UTF-8
    #[error("Failed to decode response as UTF-8")]
    Encoding,

    /// The XML reader rejected the response
    #[error("Malformed XML response: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The response was not a single well-formed XML document
    #[error("Malformed XML response: {0}")]
    MalformedXml(String),

    /// A non-fault response lacked an attribute the mapper relies on
    #[error("Element <{element}> is missing attribute '{attribute}'")]
    MissingAttribute {
        /// Local name of the element that was inspected
        element: String,
        /// Name of the attribute that was expected
        attribute: String,
    },

    /// A configured URL could not be used
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client initialization failed
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}

impl CampusNetError {
    /// Whether the error came from an unparseable response body
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::Xml(_) | Self::MalformedXml(_))
    }
}

impl From<quick_xml::events::attributes::AttrError> for CampusNetError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(err.into())
    }
}
