/*!
 * AArch64 Counting Kernel
 * Advanced SIMD (NEON) lane primitives for the shared kernel loop
 */

use std::arch::aarch64::*;

use super::kernel::{count_blocks, VectorIsa};
use crate::core::limits::{NEON_BLOCK, NEON_MIN_LEN, NEON_UNROLL};

/// Count with 128-bit NEON vectors
///
/// # Safety
/// `ptr` must be valid for reads of `len` bytes and the CPU must support NEON.
#[target_feature(enable = "neon")]
pub unsafe fn count_neon(ptr: *const u8, needle: u8, len: usize) -> usize {
    count_blocks::<Neon, NEON_UNROLL>(ptr, needle, len)
}

struct Neon;

impl VectorIsa for Neon {
    const WIDTH: usize = NEON_BLOCK;
    const MIN_LEN: usize = NEON_MIN_LEN;

    type Bytes = uint8x16_t;
    type Sums = uint64x2_t;

    #[inline(always)]
    unsafe fn splat(byte: u8) -> uint8x16_t {
        vdupq_n_u8(byte)
    }

    #[inline(always)]
    unsafe fn zero_bytes() -> uint8x16_t {
        vdupq_n_u8(0)
    }

    #[inline(always)]
    unsafe fn zero_sums() -> uint64x2_t {
        vdupq_n_u64(0)
    }

    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> uint8x16_t {
        vld1q_u8(ptr)
    }

    #[inline(always)]
    unsafe fn accumulate(acc: uint8x16_t, needle: uint8x16_t, block: uint8x16_t) -> uint8x16_t {
        vsubq_u8(acc, vceqq_u8(needle, block))
    }

    #[inline(always)]
    unsafe fn flush(sums: uint64x2_t, acc: uint8x16_t) -> uint64x2_t {
        // u8x16 -> u16x8 -> u32x4, then pairwise accumulate into u64x2.
        vpadalq_u32(sums, vpaddlq_u16(vpaddlq_u8(acc)))
    }

    #[inline(always)]
    unsafe fn reduce(sums: uint64x2_t) -> usize {
        vaddvq_u64(sums) as usize
    }
}
