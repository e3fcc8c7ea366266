/*!
 * Core Types
 * Kernel identities and dispatch policies shared across the crate
 */

use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Uniform signature of every counting kernel: (pointer, byte, length) -> count
///
/// # Safety
/// Callers must guarantee `ptr` is valid for reads of `len` bytes and that the
/// kernel's instruction set is supported by the executing CPU.
pub type KernelFn = unsafe fn(*const u8, u8, usize) -> usize;

/// Identity of a counting kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelKind {
    /// x86 AVX-512BW, 64-byte blocks
    Avx512,
    /// x86 AVX2, 32-byte blocks
    Avx2,
    /// x86 SSE2, 16-byte blocks
    Sse2,
    /// ARM Advanced SIMD, 16-byte blocks
    Neon,
    /// WebAssembly SIMD128, 16-byte blocks
    WasmSimd,
    /// Machine-word bit tricks, no vector unit
    Swar,
    /// Byte-by-byte loop
    Scalar,
}

impl KernelKind {
    /// Every kernel kind, most preferred first
    pub const ALL: [KernelKind; 7] = [
        KernelKind::Avx512,
        KernelKind::Avx2,
        KernelKind::Sse2,
        KernelKind::Neon,
        KernelKind::WasmSimd,
        KernelKind::Swar,
        KernelKind::Scalar,
    ];

    /// Stable lowercase name, as accepted by `FromStr` and reported by `debug_name`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            KernelKind::Avx512 => "avx512",
            KernelKind::Avx2 => "avx2",
            KernelKind::Sse2 => "sse2",
            KernelKind::Neon => "neon",
            KernelKind::WasmSimd => "wasm_simd",
            KernelKind::Swar => "swar",
            KernelKind::Scalar => "scalar",
        }
    }

    /// Whether this kernel uses a vector unit
    #[must_use]
    pub const fn is_vector(self) -> bool {
        !matches!(self, KernelKind::Swar | KernelKind::Scalar)
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KernelKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        KernelKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKernel(s.to_string()))
    }
}

/// How calls reach a kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// One kernel fixed at compile time, called directly
    Static,
    /// Kernel chosen by a one-time runtime probe and called through a cache
    Dynamic,
}

impl DispatchPolicy {
    /// Policy compiled into this build
    #[must_use]
    pub const fn compiled() -> Self {
        if cfg!(feature = "static-dispatch") {
            DispatchPolicy::Static
        } else {
            DispatchPolicy::Dynamic
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DispatchPolicy::Static => "static",
            DispatchPolicy::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for DispatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DispatchPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(DispatchPolicy::Static),
            "dynamic" => Ok(DispatchPolicy::Dynamic),
            _ => Err(ConfigError::InvalidPolicy(s.to_string())),
        }
    }
}
