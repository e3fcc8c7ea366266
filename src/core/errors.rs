/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 *
 * Counting itself is infallible; these errors cover configuration parsing and
 * explicit kernel lookups only.
 */

use super::types::{DispatchPolicy, KernelKind};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Unknown kernel: {0}")]
    #[diagnostic(
        code(config::unknown_kernel),
        help("Use one of avx512, avx2, sse2, neon, wasm_simd, swar or scalar.")
    )]
    UnknownKernel(String),

    #[error("Invalid dispatch policy: {0}")]
    #[diagnostic(
        code(config::invalid_policy),
        help("Use `static` or `dynamic`.")
    )]
    InvalidPolicy(String),
}

/// Kernel selection errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum DispatchError {
    #[error("Kernel {kernel} is not available on this build or CPU")]
    #[diagnostic(
        code(dispatch::unavailable),
        help("Check `available_kernels()`; the dispatcher falls back to swar or scalar on its own.")
    )]
    Unavailable { kernel: KernelKind },

    #[error("Requested {requested} dispatch but this build uses {compiled} dispatch")]
    #[diagnostic(
        code(dispatch::policy_mismatch),
        help("Toggle the `static-dispatch` cargo feature to change the dispatch policy.")
    )]
    PolicyMismatch {
        requested: DispatchPolicy,
        compiled: DispatchPolicy,
    },
}

/// Result alias for configuration parsing
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result alias for kernel lookups
pub type DispatchResult<T> = Result<T, DispatchError>;
