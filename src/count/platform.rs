/*!
 * Platform-specific SIMD Detection
 * Compile-time and runtime capability predicates for the counting kernels
 */

use serde::Serialize;
use std::sync::OnceLock;

/// SIMD capabilities relevant to byte counting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CpuFeatures {
    /// SSE2 support (x86/x86_64)
    pub sse2: bool,
    /// AVX2 support (x86/x86_64)
    pub avx2: bool,
    /// AVX-512F together with AVX-512BW (x86/x86_64)
    pub avx512bw: bool,
    /// Advanced SIMD support (aarch64)
    pub neon: bool,
    /// SIMD128 support (wasm32, compile-time only)
    pub simd128: bool,
}

impl CpuFeatures {
    /// Features every CPU running this binary is guaranteed to have
    pub const fn compile_time() -> Self {
        Self {
            sse2: cfg!(all(
                any(target_arch = "x86", target_arch = "x86_64"),
                target_feature = "sse2"
            )),
            avx2: cfg!(all(
                any(target_arch = "x86", target_arch = "x86_64"),
                target_feature = "avx2"
            )),
            avx512bw: cfg!(all(
                any(target_arch = "x86", target_arch = "x86_64"),
                target_feature = "avx512f",
                target_feature = "avx512bw"
            )),
            neon: cfg!(all(target_arch = "aarch64", target_feature = "neon")),
            simd128: cfg!(all(target_arch = "wasm32", target_feature = "simd128")),
        }
    }

    /// Query the executing CPU
    ///
    /// Targets without a runtime query report their compile-time features.
    pub fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            Self {
                sse2: is_x86_feature_detected!("sse2"),
                avx2: is_x86_feature_detected!("avx2"),
                avx512bw: is_x86_feature_detected!("avx512f")
                    && is_x86_feature_detected!("avx512bw"),
                neon: false,
                simd128: false,
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            Self {
                neon: std::arch::is_aarch64_feature_detected!("neon"),
                ..Self::default()
            }
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self::compile_time()
        }
    }

    /// Widest vector block a compiled kernel can use on this CPU, in bytes
    pub const fn max_vector_bytes(&self) -> usize {
        if self.avx512bw {
            64
        } else if self.avx2 {
            32
        } else if self.sse2 || self.neon || self.simd128 {
            16
        } else {
            0
        }
    }
}

/// Runtime-detected capabilities, probed once
static CPU_FEATURES: OnceLock<CpuFeatures> = OnceLock::new();

/// Get the executing CPU's capabilities
///
/// The first call probes the CPU and logs the result; later calls read the cache.
pub fn capabilities() -> &'static CpuFeatures {
    CPU_FEATURES.get_or_init(|| {
        let caps = CpuFeatures::detect();
        tracing::info!(
            sse2 = caps.sse2,
            avx2 = caps.avx2,
            avx512bw = caps.avx512bw,
            neon = caps.neon,
            simd128 = caps.simd128,
            max_vector_bytes = caps.max_vector_bytes(),
            "SIMD capabilities detected"
        );
        caps
    })
}
