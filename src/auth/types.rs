//! Auth configuration types
//!
//! These types represent the runtime auth configuration after template
//! interpolation has been applied. The HR vendors this crate ships
//! connectors for authenticate with basic credentials (Greenhouse, Lever,
//! Workday) or a bearer token (Lattice); an API-key style is kept for
//! manifests that place a key in a custom header or query parameter.

use serde::{Deserialize, Serialize};

/// Location for API key placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Place in HTTP header
    #[default]
    Header,
    /// Place in query parameter
    Query,
}

/// Authentication configuration (after template interpolation)
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// API Key authentication (header or query)
    ApiKey {
        /// Where to place the API key
        location: Location,
        /// Header name (for header location)
        header_name: Option<String>,
        /// Query parameter name (for query location)
        query_param: Option<String>,
        /// Prefix to add before the value (e.g., "Bearer ")
        prefix: Option<String>,
        /// The API key value
        value: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password (empty for key-as-username APIs like Greenhouse)
        password: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },
}

impl AuthConfig {
    /// Basic auth with the API key as username and an empty password.
    /// Greenhouse's Harvest API and Lever both use this convention.
    pub fn key_as_username(key: impl Into<String>) -> Self {
        Self::Basic {
            username: key.into(),
            password: String::new(),
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_auth_config_default() {
        let config = AuthConfig::default();
        assert!(matches!(config, AuthConfig::None));
    }

    #[test]
    fn test_key_as_username() {
        let config = AuthConfig::key_as_username("gh_key");
        match config {
            AuthConfig::Basic { username, password } => {
                assert_eq!(username, "gh_key");
                assert!(password.is_empty());
            }
            _ => panic!("expected basic auth"),
        }
    }
}
