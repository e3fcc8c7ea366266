/*!
 * WebAssembly Counting Kernel
 * SIMD128 lane primitives; only built when `simd128` is enabled at compile time
 */

use std::arch::wasm32::*;

use super::kernel::{count_blocks, VectorIsa};
use crate::core::limits::{WASM_BLOCK, WASM_MIN_LEN, WASM_UNROLL};

/// Count with 128-bit WebAssembly SIMD vectors
///
/// # Safety
/// `ptr` must be valid for reads of `len` bytes.
pub unsafe fn count_wasm_simd(ptr: *const u8, needle: u8, len: usize) -> usize {
    count_blocks::<WasmSimd, WASM_UNROLL>(ptr, needle, len)
}

struct WasmSimd;

impl VectorIsa for WasmSimd {
    const WIDTH: usize = WASM_BLOCK;
    const MIN_LEN: usize = WASM_MIN_LEN;

    type Bytes = v128;
    type Sums = v128;

    #[inline(always)]
    unsafe fn splat(byte: u8) -> v128 {
        u8x16_splat(byte)
    }

    #[inline(always)]
    unsafe fn zero_bytes() -> v128 {
        u8x16_splat(0)
    }

    #[inline(always)]
    unsafe fn zero_sums() -> v128 {
        u64x2_splat(0)
    }

    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> v128 {
        v128_load(ptr as *const v128)
    }

    #[inline(always)]
    unsafe fn accumulate(acc: v128, needle: v128, block: v128) -> v128 {
        u8x16_sub(acc, u8x16_eq(needle, block))
    }

    #[inline(always)]
    unsafe fn flush(sums: v128, acc: v128) -> v128 {
        let words = u32x4_extadd_pairwise_u16x8(u16x8_extadd_pairwise_u8x16(acc));
        let quads = u64x2_add(u64x2_extend_low_u32x4(words), u64x2_extend_high_u32x4(words));
        u64x2_add(sums, quads)
    }

    #[inline(always)]
    unsafe fn reduce(sums: v128) -> usize {
        (u64x2_extract_lane::<0>(sums) + u64x2_extract_lane::<1>(sums)) as usize
    }
}
