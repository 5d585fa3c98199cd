//! Records returned by the CampusNet API
//!
//! All values are copied verbatim from the XML attributes; grades, credit
//! points and years are kept as strings because the API mixes numeric and
//! textual values (e.g. `"BE"` for a passed pass/fail course).

use std::fmt;
use zeroize::Zeroizing;

/// Identity of the calling application and of the user whose data is read
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    /// Application name sent as `X-appname`
    pub app_name: String,
    /// Application token sent as `X-token`
    pub api_token: String,
    /// Student number of the user (the basic-auth username)
    pub subject_id: String,
}

impl Identity {
    /// Create an identity from its three parts
    pub fn new(
        app_name: impl Into<String>,
        api_token: impl Into<String>,
        subject_id: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            api_token: api_token.into(),
            subject_id: subject_id.into(),
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("app_name", &self.app_name)
            .field("api_token", &"<redacted>")
            .field("subject_id", &self.subject_id)
            .finish()
    }
}

/// Identity plus the access token obtained by authenticating
///
/// A session is authenticated iff it holds an access token.
#[derive(Clone)]
pub struct Session {
    identity: Identity,
    access_token: Option<Zeroizing<String>>,
}

impl Session {
    /// Create an unauthenticated session
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            access_token: None,
        }
    }

    /// Create a session from a token obtained earlier
    pub fn with_access_token(identity: Identity, access_token: impl Into<String>) -> Self {
        Self {
            identity,
            access_token: Some(Zeroizing::new(access_token.into())),
        }
    }

    /// The identity this session acts for
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The access token, if authenticated
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().map(String::as_str)
    }

    /// Whether an access token is held
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub(crate) fn set_access_token(&mut self, token: String) {
        self.access_token = Some(Zeroizing::new(token));
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("identity", &self.identity)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// Basic information about the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// `GivenName` attribute
    pub first_name: String,
    /// `FamilyName` attribute
    pub last_name: String,
    /// `Email` attribute
    pub email: String,
}

/// A course as referenced by an exam result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub title: String,
    pub code: String,
}

/// One graded exam from the user's education programme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamResult {
    pub course: Course,
    /// ECTS points awarded for the course
    pub credit_points: String,
    pub grade: String,
    pub period: String,
    pub year: String,
}
