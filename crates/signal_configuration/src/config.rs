//! The static per-environment configuration records.
//!
//! All values are compile-time constants; nothing here touches I/O. The only
//! fallible operations are the byte-decode helpers for key and attestation
//! material.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::ConfigError;

/// A secure-enclave deployment: its name and the MRENCLAVE measurement used
/// to validate remote attestation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enclave {
    /// Enclave name, as addressed by the service.
    pub name: &'static str,
    /// Hex-encoded MRENCLAVE of the trusted build.
    pub mr_enclave: &'static str,
}

impl Enclave {
    /// The service identifier for this enclave. The service addresses
    /// enclaves by name.
    pub fn service_id(&self) -> &'static str {
        self.name
    }

    /// Decodes the MRENCLAVE measurement into its 32 raw bytes.
    pub fn mr_enclave_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        Ok(hex::decode(self.mr_enclave)?)
    }
}

/// Every environment-dependent parameter consumed by the client stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// Websocket API endpoint.
    pub websocket_url: &'static str,
    /// Main HTTP service endpoint.
    pub server_url: &'static str,
    /// CDN endpoint for attachment and avatar downloads.
    pub cdn_url: &'static str,
    /// Reflector host fronting the main service in censored regions.
    pub service_reflector_host: &'static str,
    /// Reflector host fronting the CDN in censored regions.
    pub cdn_reflector_host: &'static str,
    /// Contact discovery service endpoint.
    pub contact_discovery_url: &'static str,
    /// Key backup service endpoint.
    pub key_backup_url: &'static str,
    /// Storage service endpoint.
    pub storage_service_url: &'static str,
    /// Base64 public key anchoring sealed-sender certificate chains.
    pub ud_trust_root: &'static str,

    pub service_censorship_prefix: &'static str,
    pub cdn_censorship_prefix: &'static str,
    pub contact_discovery_censorship_prefix: &'static str,
    pub key_backup_censorship_prefix: &'static str,

    pub contact_discovery_enclave: Enclave,
    pub key_backup_enclave: Enclave,

    /// Shared-container identifier for the app and its extensions.
    pub application_group: &'static str,
    /// Base64 zkgroup server public parameters.
    pub server_public_params_base64: &'static str,
}

impl EnvironmentConfig {
    /// Decodes the zkgroup server public parameters blob.
    pub fn server_public_params(&self) -> Result<Vec<u8>, ConfigError> {
        Ok(BASE64.decode(self.server_public_params_base64)?)
    }

    /// Decodes the sealed-sender trust root public key.
    pub fn ud_trust_root_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        Ok(BASE64.decode(self.ud_trust_root)?)
    }
}

pub static PRODUCTION: EnvironmentConfig = EnvironmentConfig {
    websocket_url: "wss://textsecure-service.whispersystems.org/v1/websocket/",
    server_url: "https://textsecure-service.whispersystems.org/",
    cdn_url: "https://cdn.signal.org",
    // Same reflector fronts the service and the CDN.
    service_reflector_host: "europe-west1-signal-cdn-reflector.cloudfunctions.net",
    cdn_reflector_host: "europe-west1-signal-cdn-reflector.cloudfunctions.net",
    contact_discovery_url: "https://api.directory.signal.org",
    key_backup_url: "https://api.backup.signal.org",
    storage_service_url: "https://storage.signal.org",
    ud_trust_root: "BXu6QIKVz5MA8gstzfOgRQGqyLqOwNKHL6INkv3IHWMF",

    service_censorship_prefix: "service",
    cdn_censorship_prefix: "cdn",
    contact_discovery_censorship_prefix: "directory",
    key_backup_censorship_prefix: "backup",

    // Contact discovery publishes one measurement serving as both name and
    // MRENCLAVE.
    contact_discovery_enclave: Enclave {
        name: "cd6cfc342937b23b1bdd3bbf9721aa5615ac9ff50a75c5527d441cd3276826c9",
        mr_enclave: "cd6cfc342937b23b1bdd3bbf9721aa5615ac9ff50a75c5527d441cd3276826c9",
    },
    key_backup_enclave: Enclave {
        name: "f2e2a5004794a6c1bac5c4949eadbc243dd02e02d1a93f10fe24584fb70815d8",
        mr_enclave: "f51f435802ada769e67aaf5744372bb7e7d519eecf996d335eb5b46b872b5789",
    },

    application_group: "group.org.whispersystems.signal.group",

    // TODO: this is the staging value; obtain the production server public
    // parameters from the service operator before relying on it. All cached
    // profile key credentials must be discarded when it changes.
    server_public_params_base64: "Mmngo/SFRpC5kRLUKE8sXnpUx0QhQGcxUGI3b5eQXUX0kgK6SSL7XWcmjQv2ZsL5qKqyADTfhBakDSSfVEr2dHheAw/6JYMjgXnYZAn1845KOk9gHwWGaISIZWR55u4xpHdqZhZBdUyQ2MuDpIurLWifw8Jq/W6pumywOTg6zAeegHWx9MwyGaQD4R35nAAcPgqWuKrlIBX/z7kCYDwEFCaZwW+KmB0HluyEN362MzuzgGv+zK1SZR2aIpBmtsFYeG7FAV7aXXwB0aqB+5kDBJYCdhrzxWAqnWHC0Gm0JFASX3yaxmIWElacrfYtqLAP9KZcfViLRa4IiBIx3w9OAQ==",
};

pub static STAGING: EnvironmentConfig = EnvironmentConfig {
    websocket_url: "wss://textsecure-service-staging.whispersystems.org/v1/websocket/",
    server_url: "https://textsecure-service-staging.whispersystems.org/",
    cdn_url: "https://cdn-staging.signal.org",
    service_reflector_host: "europe-west1-signal-cdn-reflector.cloudfunctions.net",
    cdn_reflector_host: "europe-west1-signal-cdn-reflector.cloudfunctions.net",
    contact_discovery_url: "https://api-staging.directory.signal.org",
    key_backup_url: "https://api-staging.backup.signal.org",
    storage_service_url: "https://storage-staging.signal.org",
    ud_trust_root: "BbqY1DzohE4NUZoVF+L18oUPrK3kILllLEJh2UnPSsEx",

    service_censorship_prefix: "service-staging",
    cdn_censorship_prefix: "cdn-staging",
    contact_discovery_censorship_prefix: "directory-staging",
    key_backup_censorship_prefix: "backup-staging",

    contact_discovery_enclave: Enclave {
        name: "e0f7dee77dc9d705ccc1376859811da12ecec3b6119a19dc39bdfbf97173aa18",
        mr_enclave: "e0f7dee77dc9d705ccc1376859811da12ecec3b6119a19dc39bdfbf97173aa18",
    },
    key_backup_enclave: Enclave {
        name: "b5a865941f95887018c86725cc92308d34a3084dc2b4e7bd2de5e5e1690b50c6",
        mr_enclave: "f51f435802ada769e67aaf5744372bb7e7d519eecf996d335eb5b46b872b5789",
    },

    application_group: "group.org.whispersystems.signal.group.staging",

    // Cached profile key credentials must be discarded when this changes.
    server_public_params_base64: "Mmngo/SFRpC5kRLUKE8sXnpUx0QhQGcxUGI3b5eQXUX0kgK6SSL7XWcmjQv2ZsL5qKqyADTfhBakDSSfVEr2dHheAw/6JYMjgXnYZAn1845KOk9gHwWGaISIZWR55u4xpHdqZhZBdUyQ2MuDpIurLWifw8Jq/W6pumywOTg6zAeegHWx9MwyGaQD4R35nAAcPgqWuKrlIBX/z7kCYDwEFCaZwW+KmB0HluyEN362MzuzgGv+zK1SZR2aIpBmtsFYeG7FAV7aXXwB0aqB+5kDBJYCdhrzxWAqnWHC0Gm0JFASX3yaxmIWElacrfYtqLAP9KZcfViLRa4IiBIx3w9OAQ==",
};
