//! Censorship-circumvention routing.
//!
//! In censored regions requests are routed through domain-fronting
//! reflectors. Each backend service keeps its own path prefix so the
//! reflector can dispatch to the right upstream.

use url::Url;

use crate::config::EnvironmentConfig;
use crate::error::ConfigError;

/// The backend services reachable through the reflector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontedService {
    Service,
    Cdn,
    ContactDiscovery,
    KeyBackup,
}

impl FrontedService {
    /// The path prefix routing this service through the reflector.
    pub fn censorship_prefix(&self, config: &EnvironmentConfig) -> &'static str {
        match self {
            Self::Service => config.service_censorship_prefix,
            Self::Cdn => config.cdn_censorship_prefix,
            Self::ContactDiscovery => config.contact_discovery_censorship_prefix,
            Self::KeyBackup => config.key_backup_censorship_prefix,
        }
    }

    /// The reflector host fronting this service.
    pub fn reflector_host(&self, config: &EnvironmentConfig) -> &'static str {
        match self {
            Self::Cdn => config.cdn_reflector_host,
            _ => config.service_reflector_host,
        }
    }
}

impl EnvironmentConfig {
    /// Builds the domain-fronted base URL for `service`:
    /// `https://{reflector_host}/{censorship_prefix}`.
    pub fn fronted_url(&self, service: FrontedService) -> Result<Url, ConfigError> {
        let url = format!(
            "https://{}/{}",
            service.reflector_host(self),
            service.censorship_prefix(self)
        );
        Ok(Url::parse(&url)?)
    }
}
