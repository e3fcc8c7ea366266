/*!
 * Byte Counting
 *
 * Counts bytes equal to a value with the fastest kernel the build and CPU
 * allow: AVX-512BW / AVX2 / SSE2 on x86, NEON on aarch64, SIMD128 on wasm32,
 * then word-wide SWAR, then a plain loop.
 *
 * Counting is pure: no allocation, no locking, no shared mutable state beyond
 * the dispatch handle published once by [`optimize`].
 */

mod dispatch;
mod kernel;
mod platform;
pub(crate) mod scalar;
pub(crate) mod swar;

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
mod wasm;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86;

// Dispatch
pub use dispatch::{
    active, available_kernels, debug_name, find, is_optimized, optimize, optimize_with,
    registry, static_kernel, KernelDescriptor, STATIC_KERNEL,
};

// CPU detection
pub use platform::{capabilities, CpuFeatures};

/// Count bytes equal to the low 8 bits of `value` in `len` bytes at `ptr`
///
/// `value` is truncated to `u8` before comparison, so `value`, `value & 0xFF`
/// and `value + 256` all count the same byte.
///
/// # Safety
/// - `ptr` must be valid for reads of `len` bytes for the duration of the call
/// - `ptr` may be null only when `len` is 0
#[inline]
pub unsafe fn count_raw(ptr: *const u8, value: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    dispatch::active().count_unchecked(ptr, value as u8, len)
}

/// Count bytes equal to `needle` in a slice
#[inline]
pub fn count(haystack: &[u8], needle: u8) -> usize {
    if haystack.is_empty() {
        return 0;
    }
    unsafe { dispatch::active().count_unchecked(haystack.as_ptr(), needle, haystack.len()) }
}
