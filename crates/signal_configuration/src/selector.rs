//! Runtime selection of the active service environment.
//!
//! Resolution order: a forced override if one is set, otherwise the
//! registered feature-flag provider. The override exists for test harnesses
//! and internal builds; production code never sets it.

use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::config::EnvironmentConfig;
use crate::env::Environment;

/// Feature flags supplied by the surrounding configuration system.
pub trait FeatureFlagProvider: Send + Sync {
    /// Whether this build talks to the production service by default.
    fn is_using_production_service(&self) -> bool;
}

/// Provider used until one is registered. Shipping builds talk to production.
#[derive(Debug, Default)]
pub struct DefaultFeatureFlags;

impl FeatureFlagProvider for DefaultFeatureFlags {
    fn is_using_production_service(&self) -> bool {
        true
    }
}

type Observer = dyn Fn(Environment) + Send + Sync;

struct SelectorState {
    forced: Option<Environment>,
    provider: Box<dyn FeatureFlagProvider>,
}

impl SelectorState {
    fn resolved(&self) -> Environment {
        if let Some(env) = self.forced {
            return env;
        }
        if self.provider.is_using_production_service() {
            Environment::Production
        } else {
            Environment::Staging
        }
    }
}

/// Selects the active [`EnvironmentConfig`] at runtime.
///
/// All shared state lives behind a single lock, so a harness forcing an
/// environment never races concurrent readers. Observers registered with
/// [`subscribe`](Self::subscribe) run whenever the resolved environment
/// actually changes; components caching environment-dependent values should
/// resubscribe their connections from there.
pub struct EnvironmentSelector {
    state: RwLock<SelectorState>,
    observers: RwLock<Vec<Arc<Observer>>>,
}

impl Default for EnvironmentSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentSelector {
    pub fn new() -> Self {
        Self::with_provider(DefaultFeatureFlags)
    }

    pub fn with_provider(provider: impl FeatureFlagProvider + 'static) -> Self {
        Self {
            state: RwLock::new(SelectorState {
                forced: None,
                provider: Box::new(provider),
            }),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// The currently resolved environment.
    pub fn environment(&self) -> Environment {
        self.state.read().resolved()
    }

    /// The configuration record for the currently resolved environment.
    pub fn config(&self) -> &'static EnvironmentConfig {
        self.environment().config()
    }

    /// Returns `true` if the resolved environment is production.
    pub fn is_production(&self) -> bool {
        self.environment().is_production()
    }

    /// Overrides the active environment until cleared or overridden again.
    /// Intended for test harnesses and internal builds.
    pub fn force_environment(&self, env: Environment) {
        let before = {
            let mut state = self.state.write();
            let before = state.resolved();
            state.forced = Some(env);
            before
        };
        tracing::debug!(%env, "forcing service environment");
        self.notify_if_changed(before, env);
    }

    pub fn force_production(&self) {
        self.force_environment(Environment::Production);
    }

    pub fn force_staging(&self) {
        self.force_environment(Environment::Staging);
    }

    /// Clears the override; resolution falls back to the feature flag.
    pub fn clear_forced_environment(&self) {
        let (before, after) = {
            let mut state = self.state.write();
            let before = state.resolved();
            state.forced = None;
            (before, state.resolved())
        };
        tracing::debug!("cleared forced service environment");
        self.notify_if_changed(before, after);
    }

    /// Swaps the feature-flag provider consulted when no override is set.
    pub fn set_feature_flag_provider(&self, provider: impl FeatureFlagProvider + 'static) {
        let (before, after) = {
            let mut state = self.state.write();
            let before = state.resolved();
            state.provider = Box::new(provider);
            (before, state.resolved())
        };
        tracing::debug!("replaced feature flag provider");
        self.notify_if_changed(before, after);
    }

    /// Registers an observer invoked with the new environment whenever the
    /// resolved environment changes. Observers live for the selector's
    /// lifetime.
    pub fn subscribe(&self, observer: impl Fn(Environment) + Send + Sync + 'static) {
        self.observers.write().push(Arc::new(observer));
    }

    // Observers run outside the state lock, from a snapshot of the list, so
    // they may read the selector freely.
    fn notify_if_changed(&self, before: Environment, after: Environment) {
        if before == after {
            return;
        }
        tracing::info!(%before, %after, "service environment changed");
        let observers: Vec<_> = self.observers.read().iter().cloned().collect();
        for observer in observers {
            observer(after);
        }
    }
}

static SHARED: LazyLock<EnvironmentSelector> = LazyLock::new(EnvironmentSelector::new);

/// The process-wide selector backing the free functions below.
pub fn shared() -> &'static EnvironmentSelector {
    &SHARED
}

pub fn environment() -> Environment {
    SHARED.environment()
}

pub fn config() -> &'static EnvironmentConfig {
    SHARED.config()
}

pub fn is_production() -> bool {
    SHARED.is_production()
}

pub fn force_production() {
    SHARED.force_production();
}

pub fn force_staging() {
    SHARED.force_staging();
}

pub fn clear_forced_environment() {
    SHARED.clear_forced_environment();
}

pub fn subscribe(observer: impl Fn(Environment) + Send + Sync + 'static) {
    SHARED.subscribe(observer);
}

pub fn set_feature_flag_provider(provider: impl FeatureFlagProvider + 'static) {
    SHARED.set_feature_flag_provider(provider);
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct StubFlags(bool);

    impl FeatureFlagProvider for StubFlags {
        fn is_using_production_service(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn defaults_to_production() {
        let selector = EnvironmentSelector::new();
        assert_eq!(selector.environment(), Environment::Production);
        assert!(selector.is_production());
    }

    #[test]
    fn forcing_overrides_the_feature_flag() {
        let selector = EnvironmentSelector::with_provider(StubFlags(true));
        selector.force_staging();
        assert_eq!(selector.environment(), Environment::Staging);
        assert!(!selector.is_production());
        assert_eq!(
            selector.config().application_group,
            "group.org.whispersystems.signal.group.staging"
        );

        selector.force_production();
        assert_eq!(
            selector.config().server_url,
            "https://textsecure-service.whispersystems.org/"
        );
    }

    #[test]
    fn repeated_reads_are_stable() {
        let selector = EnvironmentSelector::new();
        selector.force_staging();
        for _ in 0..3 {
            assert_eq!(selector.environment(), Environment::Staging);
        }
    }

    #[test]
    fn clearing_falls_back_to_the_feature_flag() {
        let selector = EnvironmentSelector::with_provider(StubFlags(false));
        selector.force_production();
        assert!(selector.is_production());

        selector.clear_forced_environment();
        assert_eq!(selector.environment(), Environment::Staging);
    }

    #[test]
    fn swapping_the_provider_takes_effect_without_an_override() {
        let selector = EnvironmentSelector::with_provider(StubFlags(true));
        selector.set_feature_flag_provider(StubFlags(false));
        assert_eq!(selector.environment(), Environment::Staging);
    }

    #[test]
    fn observers_fire_on_actual_change_only() {
        let selector = EnvironmentSelector::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let seen = fired.clone();
        selector.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        // Default resolution is production, so this is a real change.
        selector.force_staging();
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // Forcing the already-active environment fires nothing.
        selector.force_staging();
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        selector.force_production();
        assert_eq!(fired.load(Ordering::SeqCst), 2);

        // Clearing while the flag also says production is not a change.
        selector.clear_forced_environment();
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn observers_may_read_the_selector() {
        let selector = Arc::new(EnvironmentSelector::new());
        let seen = Arc::new(RwLock::new(None));
        let inner = selector.clone();
        let sink = seen.clone();
        selector.subscribe(move |env| {
            assert_eq!(inner.environment(), env);
            *sink.write() = Some(env);
        });

        selector.force_staging();
        assert_eq!(*seen.read(), Some(Environment::Staging));
    }

    // The process-wide selector is shared across the whole test binary, so
    // every assertion against it lives in this one test.
    #[test]
    fn shared_selector_mirrors_the_instance_api() {
        force_staging();
        assert_eq!(
            config().application_group,
            "group.org.whispersystems.signal.group.staging"
        );
        assert!(!is_production());

        force_production();
        assert_eq!(
            config().server_url,
            "https://textsecure-service.whispersystems.org/"
        );
        assert!(is_production());

        // Default provider reports production.
        clear_forced_environment();
        assert_eq!(environment(), Environment::Production);
    }
}
