//! Logging abstraction layer for tagtree
//!
//! This module provides logging macros that work across WASM and native targets.
//!
//! ## Macro Overview
//!
//! | Macro | Condition | WASM | Non-WASM |
//! |-------|-----------|------|----------|
//! | `debug_log!` | `debug-hooks` feature | `console.debug` (debug builds) | `tracing::debug!` |
//! | `info_log!` | none | `console.info` (debug builds) | `tracing::info!` |
//! | `warn_log!` | none | `console.warn` (debug builds) | `tracing::warn!` |
//! | `error_log!` | none | `console.error` (debug builds) | `tracing::error!` |
//!
//! On native targets the level filtering is left to whatever `tracing`
//! subscriber the application installs.
//!
//! ## Example
//!
//! ```ignore
//! use tagtree::{debug_log, info_log, warn_log, error_log};
//!
//! debug_log!("binding {} on <{}>", name, kind);
//! info_log!("initial paint complete");
//! warn_log!("dropped attribute: {}", err);
//! error_log!("host rejected node: {}", err);
//! ```

/// Logs a debug message (requires the `debug-hooks` feature)
///
/// Used for tracing individual attribute assignments and node creation.
/// It compiles to a no-op when the feature is disabled.
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-hooks", target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		web_sys::console::debug_1(&format!($($arg)*).into());
	}};
}

/// Logs a debug message (requires the `debug-hooks` feature)
#[macro_export]
#[cfg(all(feature = "debug-hooks", not(target_arch = "wasm32")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__tracing::debug!("{}", format!($($arg)*));
	}};
}

/// No-op debug_log when conditions are not met
#[macro_export]
#[cfg(any(
	not(feature = "debug-hooks"),
	all(not(debug_assertions), target_arch = "wasm32")
))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs an info message
///
/// # Example
///
/// ```ignore
/// info_log!("state manager started with {} handles", count);
/// ```
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		web_sys::console::info_1(&format!($($arg)*).into());
	}};
}

/// Logs an info message
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__tracing::info!("{}", format!($($arg)*));
	}};
}

/// No-op info_log in WASM release builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{}};
}

/// Logs a warning message
///
/// Attribute binding failures are reported through this macro.
///
/// # Example
///
/// ```ignore
/// warn_log!("attribute dropped: {}", err);
/// ```
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		web_sys::console::warn_1(&format!($($arg)*).into());
	}};
}

/// Logs a warning message
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__tracing::warn!("{}", format!($($arg)*));
	}};
}

/// No-op warn_log in WASM release builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{}};
}

/// Logs an error message
///
/// # Example
///
/// ```ignore
/// error_log!("failed to create <{}>: {}", kind, err);
/// ```
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		web_sys::console::error_1(&format!($($arg)*).into());
	}};
}

/// Logs an error message
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__tracing::error!("{}", format!($($arg)*));
	}};
}

/// No-op error_log in WASM release builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{}};
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	// Import macros from crate root
	use crate::{debug_log, error_log, info_log, warn_log};

	#[rstest]
	fn test_logging_macros_compile() {
		debug_log!("Debug message: {}", 42);
		info_log!("Info message: {}", "test");
		warn_log!("Warning message: {:?}", vec![1, 2, 3]);
		error_log!("Error message: {}", "error");
	}

	#[rstest]
	fn test_logging_macros_no_args() {
		debug_log!("Simple debug");
		info_log!("Simple info");
		warn_log!("Simple warning");
		error_log!("Simple error");
	}
}
