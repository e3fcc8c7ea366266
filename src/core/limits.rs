/*!
 * Counting Limits and Constants
 *
 * Centralized location for every threshold, block size and tuning constant used
 * by the counting kernels and the dispatcher.
 *
 * ## Conventions
 * - Values are grouped by kernel family
 * - Performance-critical constants are marked with [PERF]
 * - Values that guard numeric correctness are marked with [OVERFLOW]
 */

// =============================================================================
// SCALAR / SWAR
// =============================================================================

/// Bytes held by one native machine word
pub const WORD_BYTES: usize = core::mem::size_of::<usize>();

/// Minimum length (exclusive) for the word-wide counter: four times the word
/// width measured in bits (256 bytes on 64-bit targets, 128 on 32-bit)
/// [PERF] Below this the alignment prologue dominates and the plain loop wins
pub const SWAR_MIN_LEN: usize = usize::BITS as usize * 4;

// =============================================================================
// VECTOR ACCUMULATION
// =============================================================================

/// Main-loop iterations between accumulator flushes
/// [OVERFLOW] Each u8 lane can absorb at most 255 increments
pub const FLUSH_INTERVAL: u8 = u8::MAX;

/// Widest block any compiled kernel consumes (AVX-512)
pub const MAX_VECTOR_BYTES: usize = 64;

// =============================================================================
// x86 / x86_64
// =============================================================================

/// SSE2 block size (128-bit)
pub const SSE2_BLOCK: usize = 16;

/// SSE2 entry threshold
/// [PERF] Two blocks; shorter inputs spend most of their time in the prologue
pub const SSE2_MIN_LEN: usize = 32;

/// SSE2 blocks per main-loop iteration
pub const SSE2_UNROLL: usize = 1;

/// AVX2 block size (256-bit)
pub const AVX2_BLOCK: usize = 32;

/// AVX2 entry threshold
pub const AVX2_MIN_LEN: usize = 64;

/// AVX2 blocks per main-loop iteration
/// [PERF] Two independent accumulators hide the compare/subtract latency
pub const AVX2_UNROLL: usize = 2;

/// AVX-512 block size (512-bit)
pub const AVX512_BLOCK: usize = 64;

/// AVX-512 entry threshold
pub const AVX512_MIN_LEN: usize = 128;

/// AVX-512 blocks per main-loop iteration
pub const AVX512_UNROLL: usize = 2;

// =============================================================================
// AARCH64 / WASM
// =============================================================================

/// NEON block size (128-bit)
pub const NEON_BLOCK: usize = 16;

/// NEON entry threshold
pub const NEON_MIN_LEN: usize = 32;

/// NEON blocks per main-loop iteration
pub const NEON_UNROLL: usize = 1;

/// WebAssembly SIMD128 block size
pub const WASM_BLOCK: usize = 16;

/// WebAssembly SIMD128 entry threshold
pub const WASM_MIN_LEN: usize = 32;

/// WebAssembly SIMD128 blocks per main-loop iteration
pub const WASM_UNROLL: usize = 1;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Environment variable pinning a kernel by name (e.g. `avx2`)
pub const KERNEL_ENV: &str = "MEMCOUNT_KERNEL";

/// Environment variable naming the dispatch policy (`static` or `dynamic`)
pub const DISPATCH_ENV: &str = "MEMCOUNT_DISPATCH";

/// Environment variable enabling JSON trace output
pub const TRACE_JSON_ENV: &str = "MEMCOUNT_TRACE_JSON";
