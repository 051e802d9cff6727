//! Typed contracts for the Dynalinks deferred deep-linking bridge.
//!
//! This crate is the host-agnostic boundary between application code and the platform native
//! modules. It owns configuration validation, the closed error taxonomy, native error and
//! result normalization, the object-safe [`NativeBridge`] contract, and the [`Dynalinks`]
//! facade. Concrete iOS/Android adapters and the JS promise surface live in
//! `dynalinks_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod bridge;
pub mod config;
pub mod error;
pub mod facade;
pub mod link;
pub mod platform;

pub use bridge::{MemoryNativeBridge, NativeBridge, NativeBridgeFuture, NoopNativeBridge};
pub use config::{Configuration, LogLevel, NativeConfig};
pub use error::{
    normalize_native_error, DynalinksError, ErrorCode, ErrorPayload, NativeError,
    NOT_CONFIGURED_MESSAGE, UNKNOWN_ERROR_MESSAGE,
};
pub use facade::{Dynalinks, SDK_VERSION};
pub use link::{normalize_link, normalize_native_result, Confidence, DeepLinkResult, LinkData};
pub use platform::BridgePlatform;
