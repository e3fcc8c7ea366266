/*!
 * memcount
 * Vectorized byte counting with capability-based kernel dispatch
 *
 * ```
 * let data = b"mississippi";
 * assert_eq!(memcount::count(data, b's'), 4);
 *
 * memcount::optimize();
 * assert_eq!(memcount::count(data, b'i'), 4);
 * println!("counting with {}", memcount::debug_name());
 * ```
 */

pub mod core;
pub mod count;
pub mod monitoring;

// Re-exports
pub use crate::core::{ConfigError, DispatchConfig, DispatchError, DispatchPolicy, KernelKind};
pub use count::{
    available_kernels, capabilities, count, count_raw, debug_name, find, optimize, optimize_with,
    registry, CpuFeatures, KernelDescriptor,
};
pub use monitoring::init_tracing;
