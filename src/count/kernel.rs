/*!
 * Vector Kernel Shape
 *
 * Every SIMD kernel runs the same loop; an instruction set only supplies the
 * lane primitives through [`VectorIsa`]:
 *
 * 1. scalar prologue up to block alignment
 * 2. aligned main loop, `U` independent u8-lane accumulators
 * 3. flush accumulators into u64-lane totals every 255 iterations
 * 4. horizontal reduction of the totals
 * 5. scalar tail
 */

use super::scalar;
use crate::core::limits::FLUSH_INTERVAL;

/// Lane primitives of one SIMD instruction set
///
/// Implementations are zero-sized markers. Every method is `#[inline(always)]`
/// so the primitives are compiled with the target features of the
/// `#[target_feature]` entry point that instantiates [`count_blocks`].
///
/// # Safety
/// All methods require the instruction set to be supported by the executing
/// CPU; `load` additionally requires a `WIDTH`-aligned pointer valid for
/// `WIDTH` bytes.
pub(crate) trait VectorIsa {
    /// Bytes per block (lane count, since lanes are 8-bit)
    const WIDTH: usize;
    /// Shortest input worth vectorizing
    const MIN_LEN: usize;

    /// u8 lanes: needle, loaded blocks and per-lane match counters
    type Bytes: Copy;
    /// u64 lanes: running totals fed by flushes
    type Sums: Copy;

    /// Broadcast the needle to every lane
    unsafe fn splat(byte: u8) -> Self::Bytes;

    /// All lanes zero
    unsafe fn zero_bytes() -> Self::Bytes;

    /// All totals zero
    unsafe fn zero_sums() -> Self::Sums;

    /// Aligned load of one block
    unsafe fn load(ptr: *const u8) -> Self::Bytes;

    /// Add one to every lane of `acc` where `block` equals `needle`
    unsafe fn accumulate(acc: Self::Bytes, needle: Self::Bytes, block: Self::Bytes)
        -> Self::Bytes;

    /// Widen `acc` and add it to `sums`
    unsafe fn flush(sums: Self::Sums, acc: Self::Bytes) -> Self::Sums;

    /// Add all totals into one integer
    unsafe fn reduce(sums: Self::Sums) -> usize;
}

/// Count bytes equal to `needle` with instruction set `I`, `U` blocks per iteration
///
/// Inputs shorter than `I::MIN_LEN` go straight to the scalar loop. Only
/// whole, aligned blocks are vectorized; everything else is finished by the
/// scalar counter.
///
/// # Safety
/// - `ptr` must be valid for reads of `len` bytes (null allowed when `len` is 0)
/// - the CPU must support `I`
#[inline(always)]
pub(crate) unsafe fn count_blocks<I: VectorIsa, const U: usize>(
    ptr: *const u8,
    needle: u8,
    len: usize,
) -> usize {
    const { assert!(U > 0) };

    if len < I::MIN_LEN {
        return scalar::count_raw(ptr, needle, len);
    }

    // MIN_LEN is at least two blocks, so the prologue never exhausts the input.
    let head = misalignment(ptr, I::WIDTH);
    let mut count = scalar::count_raw(ptr, needle, head);
    let mut ptr = ptr.add(head);
    let mut remaining = len - head;

    let target = I::splat(needle);
    let mut sums = I::zero_sums();
    let mut accs = [I::zero_bytes(); U];
    let mut rounds: u8 = 0;
    let stride = I::WIDTH * U;

    while remaining >= stride {
        for (k, acc) in accs.iter_mut().enumerate() {
            *acc = I::accumulate(*acc, target, I::load(ptr.add(k * I::WIDTH)));
        }
        ptr = ptr.add(stride);
        remaining -= stride;

        rounds += 1;
        if rounds == FLUSH_INTERVAL {
            for acc in accs.iter_mut() {
                sums = I::flush(sums, *acc);
                *acc = I::zero_bytes();
            }
            rounds = 0;
        }
    }

    for acc in accs {
        sums = I::flush(sums, acc);
    }

    // Fewer than U whole blocks left; one fresh accumulator cannot overflow.
    let mut acc = I::zero_bytes();
    while remaining >= I::WIDTH {
        acc = I::accumulate(acc, target, I::load(ptr));
        ptr = ptr.add(I::WIDTH);
        remaining -= I::WIDTH;
    }
    sums = I::flush(sums, acc);

    count += I::reduce(sums);
    count + scalar::count_raw(ptr, needle, remaining)
}

/// Bytes to skip before `ptr` is aligned to `align` (a power of two)
#[inline(always)]
pub(crate) fn misalignment(ptr: *const u8, align: usize) -> usize {
    let rem = (ptr as usize) & (align - 1);
    if rem == 0 {
        0
    } else {
        align - rem
    }
}
