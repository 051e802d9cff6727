//! Native bridge contract and in-process bridge implementations.
//!
//! Platform adapters (iOS/Android native modules) implement [`NativeBridge`] in
//! `dynalinks_host_web`; this module only carries the contract plus the no-op and in-memory
//! bridges used on unsupported targets and in tests.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde_json::{json, Value};
use url::Url;

use crate::{config::NativeConfig, error::NativeError};

/// Object-safe boxed future used by [`NativeBridge`] async methods.
pub type NativeBridgeFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// The three operations exposed by a platform's native deep-linking module.
///
/// Results are raw native payloads and raw native errors; normalization happens in
/// [`crate::Dynalinks`].
pub trait NativeBridge {
    /// Configures the native SDK.
    fn configure<'a>(
        &'a self,
        config: &'a NativeConfig,
    ) -> NativeBridgeFuture<'a, Result<(), NativeError>>;

    /// Runs (or replays) the deferred deep-link check.
    fn check_for_deferred_deep_link<'a>(
        &'a self,
    ) -> NativeBridgeFuture<'a, Result<Value, NativeError>>;

    /// Resolves a URL received by the app.
    fn resolve_link<'a>(
        &'a self,
        url: &'a str,
    ) -> NativeBridgeFuture<'a, Result<Value, NativeError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op bridge for targets without a native SDK: accepts configuration and never matches.
pub struct NoopNativeBridge;

impl NativeBridge for NoopNativeBridge {
    fn configure<'a>(
        &'a self,
        _config: &'a NativeConfig,
    ) -> NativeBridgeFuture<'a, Result<(), NativeError>> {
        Box::pin(async { Ok(()) })
    }

    fn check_for_deferred_deep_link<'a>(
        &'a self,
    ) -> NativeBridgeFuture<'a, Result<Value, NativeError>> {
        Box::pin(async { Ok(json!({"matched": false})) })
    }

    fn resolve_link<'a>(
        &'a self,
        _url: &'a str,
    ) -> NativeBridgeFuture<'a, Result<Value, NativeError>> {
        Box::pin(async { Ok(json!({"matched": false})) })
    }
}

#[derive(Debug)]
struct MemoryBridgeState {
    is_simulator: bool,
    configure_error: Option<NativeError>,
    configured: Option<NativeConfig>,
    configure_calls: Vec<NativeConfig>,
    deferred_outcome: Result<Value, NativeError>,
    deferred_cache: Option<Value>,
    deferred_checks_performed: usize,
    links: HashMap<String, Value>,
    call_count: usize,
}

impl Default for MemoryBridgeState {
    fn default() -> Self {
        Self {
            is_simulator: false,
            configure_error: None,
            configured: None,
            configure_calls: Vec::new(),
            deferred_outcome: Ok(json!({"matched": false})),
            deferred_cache: None,
            deferred_checks_performed: 0,
            links: HashMap::new(),
            call_count: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Scripted in-memory bridge that behaves like the native SDK.
///
/// Calls other than `configure` reject with `NOT_CONFIGURED` until a configure call succeeds.
/// The deferred check rejects with `SIMULATOR` when the bridge runs as a simulator and the
/// configuration does not allow it. The first successful deferred check is cached and replayed
/// on later calls; failures are not cached.
pub struct MemoryNativeBridge {
    inner: Rc<RefCell<MemoryBridgeState>>,
}

impl MemoryNativeBridge {
    /// Creates an unconfigured bridge whose deferred check reports no match.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the bridge as running on a simulator/emulator.
    pub fn on_simulator(self, is_simulator: bool) -> Self {
        self.inner.borrow_mut().is_simulator = is_simulator;
        self
    }

    /// Scripts the payload returned by the first deferred check.
    pub fn with_deferred_payload(self, payload: Value) -> Self {
        self.inner.borrow_mut().deferred_outcome = Ok(payload);
        self
    }

    /// Scripts a rejection for deferred checks.
    pub fn with_deferred_error(self, error: NativeError) -> Self {
        self.inner.borrow_mut().deferred_outcome = Err(error);
        self
    }

    /// Scripts the payload returned when `url` is resolved.
    pub fn with_link(self, url: impl Into<String>, payload: Value) -> Self {
        self.inner.borrow_mut().links.insert(url.into(), payload);
        self
    }

    /// Scripts a rejection for configure calls.
    pub fn with_configure_error(self, error: NativeError) -> Self {
        self.inner.borrow_mut().configure_error = Some(error);
        self
    }

    /// Returns every configuration payload received, in order.
    pub fn configure_calls(&self) -> Vec<NativeConfig> {
        self.inner.borrow().configure_calls.clone()
    }

    /// Returns the total number of bridge calls received.
    pub fn call_count(&self) -> usize {
        self.inner.borrow().call_count
    }

    /// Returns how many deferred checks were actually performed rather than replayed.
    pub fn deferred_checks_performed(&self) -> usize {
        self.inner.borrow().deferred_checks_performed
    }

    /// Returns whether a configure call has succeeded.
    pub fn is_configured(&self) -> bool {
        self.inner.borrow().configured.is_some()
    }
}

fn not_configured() -> NativeError {
    NativeError::new("NOT_CONFIGURED", "SDK not configured")
}

impl NativeBridge for MemoryNativeBridge {
    fn configure<'a>(
        &'a self,
        config: &'a NativeConfig,
    ) -> NativeBridgeFuture<'a, Result<(), NativeError>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.call_count += 1;
            state.configure_calls.push(config.clone());
            if let Some(error) = state.configure_error.clone() {
                return Err(error);
            }
            state.configured = Some(config.clone());
            Ok(())
        })
    }

    fn check_for_deferred_deep_link<'a>(
        &'a self,
    ) -> NativeBridgeFuture<'a, Result<Value, NativeError>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.call_count += 1;
            let Some(config) = state.configured.as_ref() else {
                return Err(not_configured());
            };
            if state.is_simulator && !config.allow_simulator {
                return Err(NativeError::new(
                    "SIMULATOR",
                    "Deferred deep linking is disabled on simulators",
                ));
            }
            if let Some(cached) = state.deferred_cache.clone() {
                return Ok(cached);
            }

            state.deferred_checks_performed += 1;
            let payload = state.deferred_outcome.clone()?;
            state.deferred_cache = Some(payload.clone());
            Ok(payload)
        })
    }

    fn resolve_link<'a>(
        &'a self,
        url: &'a str,
    ) -> NativeBridgeFuture<'a, Result<Value, NativeError>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.call_count += 1;
            if state.configured.is_none() {
                return Err(not_configured());
            }
            if Url::parse(url).is_err() {
                return Err(NativeError::new("INVALID_URL", format!("Invalid URL: {url}")));
            }
            Ok(state
                .links
                .get(url)
                .cloned()
                .unwrap_or_else(|| json!({"matched": false})))
        })
    }
}
