//! CampusNet API Client Library
//!
//! This library provides a blocking client for the CampusNet XML API,
//! including password authentication and reading the profile and exam
//! results of the authenticated user.
//!
//! # Features
//!
//! - Password authentication yielding a reusable access token
//! - Profile and grade retrieval mapped to typed records
//! - Uniform handling of API fault documents (`Ok(None)`, never a panic)
//! - Pluggable [`Transport`] and [`Extractor`] seams for testing and new resources
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Well-typed errors using thiserror
//!
//! # Example
//!
//! ```no_run
//! use campusnet_client::{CampusNetClient, Identity};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let identity = Identity::new("MyCampusNetApp", "app-token-123", "s123456");
//! let mut client = CampusNetClient::new(identity)?;
//!
//! if client.authenticate("secret-password")? {
//!     match client.grades()? {
//!         Some(grades) => {
//!             for result in grades {
//!                 println!("{} {}: {}", result.course.code, result.course.title, result.grade);
//!             }
//!         }
//!         None => println!("No grades available"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod error;
mod headers;
mod model;
mod parser;
mod transport;
mod xml;

pub use auth::Authenticator;
pub use client::{
    CampusNetClient, CampusNetClientBuilder, ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_AUTH_URL,
    DEFAULT_LOCALE, Resource,
};
pub use error::CampusNetError;
pub use model::{Course, ExamResult, Identity, Profile, Session};
pub use parser::{Extractor, GradesExtractor, ProfileExtractor};
pub use transport::{BasicCredentials, HttpTransport, Transport, TransportResponse};
pub use xml::XmlElement;
