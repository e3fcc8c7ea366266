/*!
 * x86 / x86_64 Counting Kernels
 * SSE2, AVX2 and AVX-512BW lane primitives for the shared kernel loop
 */

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::kernel::{count_blocks, VectorIsa};
use crate::core::limits::{
    AVX2_BLOCK, AVX2_MIN_LEN, AVX2_UNROLL, AVX512_BLOCK, AVX512_MIN_LEN, AVX512_UNROLL,
    SSE2_BLOCK, SSE2_MIN_LEN, SSE2_UNROLL,
};

/// Count with 128-bit SSE2 vectors
///
/// # Safety
/// `ptr` must be valid for reads of `len` bytes and the CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub unsafe fn count_sse2(ptr: *const u8, needle: u8, len: usize) -> usize {
    count_blocks::<Sse2, SSE2_UNROLL>(ptr, needle, len)
}

/// Count with 256-bit AVX2 vectors
///
/// # Safety
/// `ptr` must be valid for reads of `len` bytes and the CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub unsafe fn count_avx2(ptr: *const u8, needle: u8, len: usize) -> usize {
    count_blocks::<Avx2, AVX2_UNROLL>(ptr, needle, len)
}

/// Count with 512-bit AVX-512BW vectors
///
/// # Safety
/// `ptr` must be valid for reads of `len` bytes and the CPU must support
/// AVX-512F and AVX-512BW.
#[target_feature(enable = "avx512f,avx512bw")]
pub unsafe fn count_avx512(ptr: *const u8, needle: u8, len: usize) -> usize {
    count_blocks::<Avx512, AVX512_UNROLL>(ptr, needle, len)
}

/// Sum both u64 lanes of a 128-bit vector
#[inline(always)]
unsafe fn sum_epi64x2(v: __m128i) -> usize {
    let folded = _mm_add_epi64(v, _mm_unpackhi_epi64(v, v));
    let lanes: [u64; 2] = std::mem::transmute(folded);
    lanes[0] as usize
}

struct Sse2;

impl VectorIsa for Sse2 {
    const WIDTH: usize = SSE2_BLOCK;
    const MIN_LEN: usize = SSE2_MIN_LEN;

    type Bytes = __m128i;
    type Sums = __m128i;

    #[inline(always)]
    unsafe fn splat(byte: u8) -> __m128i {
        _mm_set1_epi8(byte as i8)
    }

    #[inline(always)]
    unsafe fn zero_bytes() -> __m128i {
        _mm_setzero_si128()
    }

    #[inline(always)]
    unsafe fn zero_sums() -> __m128i {
        _mm_setzero_si128()
    }

    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> __m128i {
        _mm_load_si128(ptr as *const __m128i)
    }

    #[inline(always)]
    unsafe fn accumulate(acc: __m128i, needle: __m128i, block: __m128i) -> __m128i {
        // Equal lanes compare to 0xFF (-1); subtracting adds one.
        _mm_sub_epi8(acc, _mm_cmpeq_epi8(needle, block))
    }

    #[inline(always)]
    unsafe fn flush(sums: __m128i, acc: __m128i) -> __m128i {
        _mm_add_epi64(sums, _mm_sad_epu8(acc, _mm_setzero_si128()))
    }

    #[inline(always)]
    unsafe fn reduce(sums: __m128i) -> usize {
        sum_epi64x2(sums)
    }
}

struct Avx2;

impl VectorIsa for Avx2 {
    const WIDTH: usize = AVX2_BLOCK;
    const MIN_LEN: usize = AVX2_MIN_LEN;

    type Bytes = __m256i;
    type Sums = __m256i;

    #[inline(always)]
    unsafe fn splat(byte: u8) -> __m256i {
        _mm256_set1_epi8(byte as i8)
    }

    #[inline(always)]
    unsafe fn zero_bytes() -> __m256i {
        _mm256_setzero_si256()
    }

    #[inline(always)]
    unsafe fn zero_sums() -> __m256i {
        _mm256_setzero_si256()
    }

    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> __m256i {
        _mm256_load_si256(ptr as *const __m256i)
    }

    #[inline(always)]
    unsafe fn accumulate(acc: __m256i, needle: __m256i, block: __m256i) -> __m256i {
        _mm256_sub_epi8(acc, _mm256_cmpeq_epi8(needle, block))
    }

    #[inline(always)]
    unsafe fn flush(sums: __m256i, acc: __m256i) -> __m256i {
        _mm256_add_epi64(sums, _mm256_sad_epu8(acc, _mm256_setzero_si256()))
    }

    #[inline(always)]
    unsafe fn reduce(sums: __m256i) -> usize {
        let lo = _mm256_castsi256_si128(sums);
        let hi = _mm256_extracti128_si256::<1>(sums);
        sum_epi64x2(_mm_add_epi64(lo, hi))
    }
}

struct Avx512;

impl VectorIsa for Avx512 {
    const WIDTH: usize = AVX512_BLOCK;
    const MIN_LEN: usize = AVX512_MIN_LEN;

    type Bytes = __m512i;
    type Sums = __m512i;

    #[inline(always)]
    unsafe fn splat(byte: u8) -> __m512i {
        _mm512_set1_epi8(byte as i8)
    }

    #[inline(always)]
    unsafe fn zero_bytes() -> __m512i {
        _mm512_setzero_si512()
    }

    #[inline(always)]
    unsafe fn zero_sums() -> __m512i {
        _mm512_setzero_si512()
    }

    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> __m512i {
        (ptr as *const __m512i).read()
    }

    #[inline(always)]
    unsafe fn accumulate(acc: __m512i, needle: __m512i, block: __m512i) -> __m512i {
        // Native compare-to-mask, then a masked increment.
        let hits = _mm512_cmpeq_epu8_mask(needle, block);
        _mm512_mask_add_epi8(acc, hits, acc, _mm512_set1_epi8(1))
    }

    #[inline(always)]
    unsafe fn flush(sums: __m512i, acc: __m512i) -> __m512i {
        _mm512_add_epi64(sums, _mm512_sad_epu8(acc, _mm512_setzero_si512()))
    }

    #[inline(always)]
    unsafe fn reduce(sums: __m512i) -> usize {
        let lo = _mm512_castsi512_si256(sums);
        let hi = _mm512_extracti64x4_epi64::<1>(sums);
        let half = _mm256_add_epi64(lo, hi);
        let lo = _mm256_castsi256_si128(half);
        let hi = _mm256_extracti128_si256::<1>(half);
        sum_epi64x2(_mm_add_epi64(lo, hi))
    }
}
