//! Internal logging utilities for consistent log formatting across the library
//!
//! This module provides macros that adapt log messages based on feature flags:
//! - `tracing`: Enable/disable all logging (enabled by default)
//! - `plain-logs`: When enabled with `tracing`, uses plain text prefixes instead of emojis
//!
//! ## Usage
//!
//! ```toml
//! # Default: tracing enabled with emojis
//! dioxus-async-resource = "0.1"
//!
//! # Disable all logging
//! dioxus-async-resource = { version = "0.1", default-features = false }
//!
//! # Enable tracing with plain text (no emojis)
//! dioxus-async-resource = { version = "0.1", features = ["plain-logs"] }
//! ```

/// Logs the start of a new generation
#[macro_export]
macro_rules! log_generation_start {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("🚀 [START] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[START] {}", format!($($arg)*));
    };
}

/// Logs a settlement that was written into the state
#[macro_export]
macro_rules! log_settle_success {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("✅ [SETTLE] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[SETTLE-SUCCESS] {}", format!($($arg)*));
    };
}

/// Logs a failed settlement that was written into the state
#[macro_export]
macro_rules! log_settle_error {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("❌ [SETTLE] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[SETTLE-ERROR] {}", format!($($arg)*));
    };
}

/// Logs a settlement dropped because a newer generation exists
#[macro_export]
macro_rules! log_stale_discard {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("🗑️ [STALE] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[STALE] {}", format!($($arg)*));
    };
}

/// Logs a settlement dropped because the owner unsubscribed
#[macro_export]
macro_rules! log_unsubscribed {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("🔌 [UNSUBSCRIBED] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[UNSUBSCRIBED] {}", format!($($arg)*));
    };
}
