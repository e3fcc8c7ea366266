/*!
 * Kernel Dispatch
 *
 * A registry of kernel descriptors, populated for the build target only and
 * ordered most preferred first, plus the two dispatch policies:
 *
 * - static (`static-dispatch` feature): the first kernel whose compile-time
 *   predicate holds, resolved in a `const` and called directly
 * - dynamic (default): a one-time runtime probe publishes the chosen
 *   descriptor through a `OnceLock`; until then calls use the SWAR kernel
 */

use super::{platform, scalar, swar};
use crate::core::config::DispatchConfig;
use crate::core::errors::{DispatchError, DispatchResult};
use crate::core::types::{DispatchPolicy, KernelFn, KernelKind};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// A counting kernel with its capability predicates
#[derive(Debug)]
pub struct KernelDescriptor {
    kind: KernelKind,
    compiled: bool,
    detect: fn() -> bool,
    count: KernelFn,
}

impl KernelDescriptor {
    #[must_use]
    pub const fn kind(&self) -> KernelKind {
        self.kind
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Compile-time predicate: every CPU running this binary supports the kernel
    #[must_use]
    pub const fn is_compiled_in(&self) -> bool {
        self.compiled
    }

    /// Runtime predicate: the executing CPU supports the kernel
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.compiled || (self.detect)()
    }

    /// Count with this kernel
    ///
    /// A descriptor the CPU cannot run counts with SWAR instead.
    pub fn count(&self, haystack: &[u8], needle: u8) -> usize {
        if !self.is_available() {
            return swar::count(haystack, needle);
        }
        unsafe { (self.count)(haystack.as_ptr(), needle, haystack.len()) }
    }

    /// Count with this kernel, skipping the availability check
    ///
    /// # Safety
    /// - `ptr` must be valid for reads of `len` bytes (null allowed when `len` is 0)
    /// - [`is_available`](Self::is_available) must hold
    #[inline(always)]
    pub unsafe fn count_unchecked(&self, ptr: *const u8, needle: u8, len: usize) -> usize {
        (self.count)(ptr, needle, len)
    }
}

fn always() -> bool {
    true
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect_avx512() -> bool {
    platform::capabilities().avx512bw
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect_avx2() -> bool {
    platform::capabilities().avx2
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect_sse2() -> bool {
    platform::capabilities().sse2
}

#[cfg(target_arch = "aarch64")]
fn detect_neon() -> bool {
    platform::capabilities().neon
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
const AVX512: KernelDescriptor = KernelDescriptor {
    kind: KernelKind::Avx512,
    compiled: platform::CpuFeatures::compile_time().avx512bw,
    detect: detect_avx512,
    count: super::x86::count_avx512,
};

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
const AVX2: KernelDescriptor = KernelDescriptor {
    kind: KernelKind::Avx2,
    compiled: platform::CpuFeatures::compile_time().avx2,
    detect: detect_avx2,
    count: super::x86::count_avx2,
};

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
const SSE2: KernelDescriptor = KernelDescriptor {
    kind: KernelKind::Sse2,
    compiled: platform::CpuFeatures::compile_time().sse2,
    detect: detect_sse2,
    count: super::x86::count_sse2,
};

#[cfg(target_arch = "aarch64")]
const NEON: KernelDescriptor = KernelDescriptor {
    kind: KernelKind::Neon,
    compiled: platform::CpuFeatures::compile_time().neon,
    detect: detect_neon,
    count: super::neon::count_neon,
};

#[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
const WASM_SIMD: KernelDescriptor = KernelDescriptor {
    kind: KernelKind::WasmSimd,
    compiled: true,
    detect: always,
    count: super::wasm::count_wasm_simd,
};

const SWAR: KernelDescriptor = KernelDescriptor {
    kind: KernelKind::Swar,
    compiled: true,
    detect: always,
    count: swar::count_raw,
};

const SCALAR: KernelDescriptor = KernelDescriptor {
    kind: KernelKind::Scalar,
    compiled: true,
    detect: always,
    count: scalar::count_raw,
};

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
const REGISTRY: &[KernelDescriptor] = &[AVX512, AVX2, SSE2, SWAR, SCALAR];

#[cfg(target_arch = "aarch64")]
const REGISTRY: &[KernelDescriptor] = &[NEON, SWAR, SCALAR];

#[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
const REGISTRY: &[KernelDescriptor] = &[WASM_SIMD, SWAR, SCALAR];

#[cfg(not(any(
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "aarch64",
    all(target_arch = "wasm32", target_feature = "simd128")
)))]
const REGISTRY: &[KernelDescriptor] = &[SWAR, SCALAR];

/// Kernel used by dynamic dispatch before `optimize` has run
const FALLBACK: &KernelDescriptor = &SWAR;

/// Kernel fixed at compile time for static dispatch
pub const STATIC_KERNEL: &KernelDescriptor = static_kernel();

/// Published by `optimize`, read by every dynamic call
static ACTIVE: OnceLock<&'static KernelDescriptor> = OnceLock::new();

/// All kernels compiled for this target, most preferred first
pub fn registry() -> &'static [KernelDescriptor] {
    REGISTRY
}

/// Kernels the executing CPU can run, most preferred first
pub fn available_kernels() -> impl Iterator<Item = &'static KernelDescriptor> {
    REGISTRY.iter().filter(|kernel| kernel.is_available())
}

/// Look up an available kernel by kind
pub fn find(kind: KernelKind) -> DispatchResult<&'static KernelDescriptor> {
    available_kernels()
        .find(|kernel| kernel.kind == kind)
        .ok_or(DispatchError::Unavailable { kernel: kind })
}

/// First kernel whose compile-time predicate holds
///
/// SWAR always qualifies, so vector-less targets land there.
pub const fn static_kernel() -> &'static KernelDescriptor {
    let mut i = 0;
    while i < REGISTRY.len() {
        if REGISTRY[i].compiled {
            return &REGISTRY[i];
        }
        i += 1;
    }
    FALLBACK
}

/// Kernel currently serving `count` calls
#[inline(always)]
pub fn active() -> &'static KernelDescriptor {
    if cfg!(feature = "static-dispatch") {
        STATIC_KERNEL
    } else {
        ACTIVE.get().copied().unwrap_or(FALLBACK)
    }
}

/// Whether dynamic dispatch has been resolved
pub fn is_optimized() -> bool {
    cfg!(feature = "static-dispatch") || ACTIVE.get().is_some()
}

/// Resolve dispatch from `MEMCOUNT_KERNEL` / `MEMCOUNT_DISPATCH`
///
/// Invalid settings are logged and ignored. Idempotent; only the first call
/// in a process does any work.
pub fn optimize() {
    let config = DispatchConfig::from_env().unwrap_or_else(|err| {
        warn!(error = %err, "Ignoring invalid byte counter configuration");
        DispatchConfig::default()
    });
    optimize_with(&config);
}

/// Resolve dispatch with an explicit configuration
///
/// Returns the kernel serving calls afterwards. Only the first resolution in a
/// process takes effect; later calls return the already published kernel.
pub fn optimize_with(config: &DispatchConfig) -> &'static KernelDescriptor {
    let compiled = DispatchPolicy::compiled();
    if config.policy != compiled {
        let err = DispatchError::PolicyMismatch {
            requested: config.policy,
            compiled,
        };
        warn!(error = %err, "Dispatch policy request ignored");
    }

    if cfg!(feature = "static-dispatch") {
        debug!(kernel = STATIC_KERNEL.name(), "Static dispatch, nothing to optimize");
        return STATIC_KERNEL;
    }

    let mut resolved_now = false;
    let kernel = *ACTIVE.get_or_init(|| {
        resolved_now = true;
        resolve(config)
    });

    if resolved_now {
        info!(
            kernel = kernel.name(),
            policy = compiled.name(),
            pinned = config.kernel.map(KernelKind::name),
            "Byte counter dispatch resolved"
        );
    } else {
        debug!(kernel = kernel.name(), "Byte counter dispatch already resolved");
    }
    kernel
}

fn resolve(config: &DispatchConfig) -> &'static KernelDescriptor {
    if let Some(kind) = config.kernel {
        match find(kind) {
            Ok(kernel) => return kernel,
            Err(err) => warn!(error = %err, "Pinned kernel unavailable, probing instead"),
        }
    }
    available_kernels().next().unwrap_or(&SCALAR)
}

/// Name of the kernel serving `count` calls
pub fn debug_name() -> &'static str {
    active().name()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_ends_with_fallbacks() {
        let kinds: Vec<KernelKind> = registry().iter().map(KernelDescriptor::kind).collect();
        assert_eq!(&kinds[kinds.len() - 2..], &[KernelKind::Swar, KernelKind::Scalar]);
    }

    #[test]
    fn test_registry_preference_order() {
        let position = |kind: KernelKind| registry().iter().position(|k| k.kind() == kind);
        for (better, worse) in [
            (KernelKind::Avx512, KernelKind::Avx2),
            (KernelKind::Avx2, KernelKind::Sse2),
            (KernelKind::Sse2, KernelKind::Swar),
            (KernelKind::Neon, KernelKind::Swar),
            (KernelKind::Swar, KernelKind::Scalar),
        ] {
            if let (Some(b), Some(w)) = (position(better), position(worse)) {
                assert!(b < w, "{better} should precede {worse}");
            }
        }
    }

    #[test]
    fn test_static_kernel_is_compiled_in() {
        assert!(STATIC_KERNEL.is_compiled_in());
        assert!(STATIC_KERNEL.is_available());
        #[cfg(target_arch = "x86_64")]
        assert!(STATIC_KERNEL.kind().is_vector());
    }

    #[test]
    fn test_fallbacks_always_available() {
        assert!(find(KernelKind::Swar).is_ok());
        assert!(find(KernelKind::Scalar).is_ok());
    }

    #[test]
    fn test_find_foreign_kernel() {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        assert_eq!(
            find(KernelKind::Neon).unwrap_err(),
            DispatchError::Unavailable {
                kernel: KernelKind::Neon
            }
        );
        #[cfg(target_arch = "aarch64")]
        assert!(find(KernelKind::Avx2).is_err());
    }

    #[test]
    fn test_every_kernel_agrees() {
        let data: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        for kernel in available_kernels() {
            for needle in [0u8, 1, 250, 251, 255] {
                assert_eq!(
                    kernel.count(&data, needle),
                    scalar::count(&data, needle),
                    "{}",
                    kernel.name()
                );
            }
        }
    }

    #[test]
    fn test_optimize_is_idempotent() {
        let first = optimize_with(&DispatchConfig::probing());
        let second = optimize_with(&DispatchConfig::pinned(KernelKind::Scalar));
        assert!(std::ptr::eq(first, second));
        assert!(is_optimized());
        assert_eq!(debug_name(), first.name());
    }
}
