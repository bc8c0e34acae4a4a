//! Service environment selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{EnvironmentConfig, PRODUCTION, STAGING};
use crate::error::ConfigError;

/// The service deployment a client connects to.
///
/// There are exactly two deployments:
/// - **Production** -- the live service fleet.
/// - **Staging** -- the pre-release fleet, with its own endpoints, enclaves,
///   and trust material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Live service fleet.
    Production,
    /// Pre-release fleet.
    Staging,
}

impl Environment {
    /// Returns the static configuration record for this environment.
    pub fn config(&self) -> &'static EnvironmentConfig {
        match self {
            Self::Production => &PRODUCTION,
            Self::Staging => &STAGING,
        }
    }

    /// Returns `true` if this is the production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Staging => write!(f, "staging"),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_selects_matching_record() {
        assert_eq!(
            Environment::Production.config().server_url,
            "https://textsecure-service.whispersystems.org/"
        );
        assert_eq!(
            Environment::Staging.config().server_url,
            "https://textsecure-service-staging.whispersystems.org/"
        );
    }

    #[test]
    fn is_production_returns_correct_values() {
        assert!(Environment::Production.is_production());
        assert!(!Environment::Staging.is_production());
    }

    #[test]
    fn parse_and_display_round_trip() {
        for env in [Environment::Production, Environment::Staging] {
            assert_eq!(env.to_string().parse::<Environment>().unwrap(), env);
        }
        assert!("prod".parse::<Environment>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(
            serde_json::to_string(&Environment::Staging).unwrap(),
            "\"staging\""
        );
        assert_eq!(
            serde_json::from_str::<Environment>("\"production\"").unwrap(),
            Environment::Production
        );
    }
}
