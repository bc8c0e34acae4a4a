//! Static service environment configuration for the Signal client stack.
//!
//! Two immutable records ([`PRODUCTION`] and [`STAGING`]) hold every
//! environment-dependent parameter the client consumes: service endpoints,
//! censorship-circumvention material, enclave attestation values, and server
//! key material. [`EnvironmentSelector`] picks between them at runtime, with
//! a test override and a feature-flag fallback.

pub mod censorship;
pub mod config;
pub mod env;
pub mod error;
pub mod selector;

pub use censorship::*;
pub use config::*;
pub use env::*;
pub use error::*;
pub use selector::*;
