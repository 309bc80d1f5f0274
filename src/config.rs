//! Startup configuration read from the process environment

use crate::llm::{DEFAULT_GATEWAY_URL, DEFAULT_MODEL};

/// Environment variable holding the upstream credential
pub const CREDENTIAL_VAR: &str = "LOVABLE_API_KEY";

const DEFAULT_PORT: u16 = 8000;

/// Relay server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub port: u16,
    pub upstream_url: String,
    pub model: String,
    /// Name of the variable the credential is read from on each request
    pub credential_var: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upstream_url: DEFAULT_GATEWAY_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            credential_var: CREDENTIAL_VAR.to_string(),
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup("CHAT_RELAY_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            upstream_url: lookup("CHAT_RELAY_UPSTREAM_URL").unwrap_or(defaults.upstream_url),
            model: lookup("CHAT_RELAY_MODEL").unwrap_or(defaults.model),
            credential_var: defaults.credential_var,
        }
    }
}

/// Where the relay finds the upstream credential for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Read the named environment variable at request time
    Env(String),
    /// Fixed value, `None` meaning "not configured"
    Fixed(Option<String>),
}

impl CredentialSource {
    /// Resolve the credential for one request. Blank values count as absent.
    pub fn resolve(&self) -> Option<String> {
        let value = match self {
            CredentialSource::Env(var) => std::env::var(var).ok(),
            CredentialSource::Fixed(value) => value.clone(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Name reported when the credential is missing
    pub fn name(&self) -> &str {
        match self {
            CredentialSource::Env(var) => var,
            CredentialSource::Fixed(_) => CREDENTIAL_VAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = RelayConfig::from_lookup(|_| None);
        assert_eq!(config, RelayConfig::default());
        assert_eq!(config.port, 8000);
        assert_eq!(config.credential_var, "LOVABLE_API_KEY");
    }

    #[test]
    fn overrides_from_environment() {
        let env: HashMap<&str, &str> = [
            ("CHAT_RELAY_PORT", "9100"),
            ("CHAT_RELAY_UPSTREAM_URL", "http://localhost:1/v1"),
            ("CHAT_RELAY_MODEL", "other/model"),
        ]
        .into_iter()
        .collect();
        let config = RelayConfig::from_lookup(|k| env.get(k).map(ToString::to_string));
        assert_eq!(config.port, 9100);
        assert_eq!(config.upstream_url, "http://localhost:1/v1");
        assert_eq!(config.model, "other/model");
    }

    #[test]
    fn unparsable_port_falls_back() {
        let config = RelayConfig::from_lookup(|k| (k == "CHAT_RELAY_PORT").then(|| "x".into()));
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn blank_credentials_are_absent() {
        assert_eq!(CredentialSource::Fixed(Some("  ".into())).resolve(), None);
        assert_eq!(CredentialSource::Fixed(None).resolve(), None);
        assert_eq!(
            CredentialSource::Fixed(Some("k".into())).resolve().as_deref(),
            Some("k")
        );
    }

    #[test]
    fn env_source_reads_at_resolve_time() {
        let source = CredentialSource::Env("CHAT_RELAY_TEST_UNSET_CREDENTIAL".into());
        assert_eq!(source.resolve(), None);
        assert_eq!(source.name(), "CHAT_RELAY_TEST_UNSET_CREDENTIAL");
    }
}
