//! Configuration resolution from CLI args and environment

use crate::cli::Args;
use crate::error::CliError;
use campusnet_client::{CampusNetClient, Identity};
use zeroize::Zeroizing;

const APP_NAME_VAR: &str = "CAMPUSNET_APP_NAME";
const API_TOKEN_VAR: &str = "CAMPUSNET_API_TOKEN";
const USER_VAR: &str = "CAMPUSNET_USER";
const PASSWORD_VAR: &str = "CAMPUSNET_PASSWORD";

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Calling application and user
    pub identity: Identity,
    /// Override for the data API root
    pub api_base_url: Option<String>,
    /// Override for the authentication endpoint
    pub auth_url: Option<String>,
    /// Override for the read locale
    pub locale: Option<String>,
    /// Whether to print the profile
    pub show_profile: bool,
    /// Whether to print the grades
    pub show_grades: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args, falling back to the process environment
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        Self::resolve(args, |name| std::env::var(name).ok())
    }

    fn resolve(args: Args, env: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let setting = |flag: Option<String>, var: &str, flag_name: &str| {
            flag.or_else(|| env(var))
                .filter(|value| !value.is_empty())
                .ok_or_else(|| CliError::Config(format!("Missing --{} (or {})", flag_name, var)))
        };

        let identity = Identity::new(
            setting(args.app_name, APP_NAME_VAR, "app-name")?,
            setting(args.api_token, API_TOKEN_VAR, "api-token")?,
            setting(args.user, USER_VAR, "user")?,
        );

        // Neither flag means both
        let both = !args.profile && !args.grades;

        Ok(Config {
            identity,
            api_base_url: args.api_base_url,
            auth_url: args.auth_url,
            locale: args.locale,
            show_profile: args.profile || both,
            show_grades: args.grades || both,
            quiet: args.quiet,
        })
    }

    /// Build an unauthenticated client for the configured endpoints
    pub fn client(&self) -> Result<CampusNetClient, CliError> {
        let mut builder = CampusNetClient::builder();
        if let Some(url) = &self.api_base_url {
            builder = builder.api_base_url(url.as_str())?;
        }
        if let Some(url) = &self.auth_url {
            builder = builder.auth_url(url.as_str())?;
        }
        if let Some(locale) = &self.locale {
            builder = builder.locale(locale.clone());
        }
        Ok(builder.build(self.identity.clone())?)
    }
}

/// Read the password from the environment or prompt for it
pub fn resolve_password(user: &str) -> Result<Zeroizing<String>, CliError> {
    password_from(
        user,
        |name| std::env::var(name).ok(),
        |prompt| rpassword::prompt_password(prompt),
    )
}

/// An empty value counts as unset, whichever source it came from
fn password_from(
    user: &str,
    env: impl Fn(&str) -> Option<String>,
    prompt: impl FnOnce(&str) -> std::io::Result<String>,
) -> Result<Zeroizing<String>, CliError> {
    let password = match env(PASSWORD_VAR).map(Zeroizing::new) {
        Some(password) if !password.is_empty() => password,
        _ => Zeroizing::new(prompt(&format!("CampusNet password for {}: ", user))?),
    };
    if password.is_empty() {
        return Err(CliError::Config("Password is required.".to_string()));
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("campusnet").chain(extra.iter().copied())).unwrap()
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_identity_from_flags() {
        let config = Config::resolve(
            args(&["--app-name", "MyApp", "--api-token", "tok", "--user", "s1"]),
            env(&[]),
        )
        .unwrap();

        assert_eq!(config.identity, Identity::new("MyApp", "tok", "s1"));
        assert!(config.show_profile && config.show_grades);
    }

    #[test]
    fn test_flags_override_environment() {
        let config = Config::resolve(
            args(&["--user", "s2"]),
            env(&[
                (APP_NAME_VAR, "EnvApp"),
                (API_TOKEN_VAR, "env-token"),
                (USER_VAR, "s1"),
            ]),
        )
        .unwrap();

        assert_eq!(config.identity, Identity::new("EnvApp", "env-token", "s2"));
    }

    #[test]
    fn test_missing_setting_is_reported() {
        let result = Config::resolve(
            args(&["--app-name", "MyApp", "--user", "s1"]),
            env(&[(API_TOKEN_VAR, "")]),
        );

        match result {
            Err(CliError::Config(message)) => assert!(message.contains(API_TOKEN_VAR)),
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_single_selection() {
        let config = Config::resolve(
            args(&["--profile", "--app-name", "a", "--api-token", "t", "--user", "u"]),
            env(&[]),
        )
        .unwrap();

        assert!(config.show_profile);
        assert!(!config.show_grades);
    }

    #[test]
    fn test_client_uses_overrides() {
        let config = Config::resolve(
            args(&[
                "--app-name",
                "a",
                "--api-token",
                "t",
                "--user",
                "u",
                "--api-base-url",
                "http://localhost:9000/data/",
                "--locale",
                "en-GB",
            ]),
            env(&[]),
        )
        .unwrap();

        let client = config.client().unwrap();
        assert_eq!(
            client.config().api_base_url.as_str(),
            "http://localhost:9000/data/"
        );
        assert_eq!(client.config().locale, "en-GB");
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_client_rejects_bad_url() {
        let config = Config::resolve(
            args(&[
                "--app-name",
                "a",
                "--api-token",
                "t",
                "--user",
                "u",
                "--auth-url",
                "not a url",
            ]),
            env(&[]),
        )
        .unwrap();

        assert!(matches!(config.client(), Err(CliError::Client(_))));
    }

    #[test]
    fn test_password_from_environment_skips_prompt() {
        let password = password_from("s1", env(&[(PASSWORD_VAR, "secret")]), |_| {
            panic!("prompted although the password was set")
        })
        .unwrap();

        assert_eq!(password.as_str(), "secret");
    }

    #[test]
    fn test_empty_password_variable_falls_back_to_prompt() {
        let password = password_from("s1", env(&[(PASSWORD_VAR, "")]), |prompt| {
            assert!(prompt.contains("s1"));
            Ok("typed".to_string())
        })
        .unwrap();

        assert_eq!(password.as_str(), "typed");
    }

    #[test]
    fn test_empty_password_is_rejected() {
        let result = password_from("s1", env(&[(PASSWORD_VAR, "")]), |_| Ok(String::new()));
        assert!(matches!(result, Err(CliError::Config(_))));

        let result = password_from("s1", env(&[]), |_| Ok(String::new()));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
