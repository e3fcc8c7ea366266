/*!
 * Word-Wide Byte Counting (SWAR)
 * Counts several bytes per step with ordinary integer registers
 */

use super::scalar;
use crate::core::limits::{SWAR_MIN_LEN, WORD_BYTES};

/// One set bit at the bottom of every byte (`0x0101...01`)
const REPUNIT: usize = usize::MAX / 0xFF;

// Every byte position must map to a whole lane of the word.
const _: () = assert!(usize::BITS % u8::BITS == 0);

/// Count bytes equal to `needle` using machine-word bit tricks
///
/// Inputs no longer than [`SWAR_MIN_LEN`] go straight to the scalar loop.
///
/// # Safety
/// `ptr` must be valid for reads of `len` bytes. It may be null or dangling
/// only when `len` is 0.
pub unsafe fn count_raw(ptr: *const u8, needle: u8, len: usize) -> usize {
    if len <= SWAR_MIN_LEN {
        return scalar::count_raw(ptr, needle, len);
    }

    let head = misalignment(ptr);
    let mut count = scalar::count_raw(ptr, needle, head);
    let mut remaining = len - head;
    let mut word_ptr = ptr.add(head) as *const usize;

    let broadcast = usize::from(needle).wrapping_mul(REPUNIT);
    while remaining >= WORD_BYTES {
        count += matches_in_word(word_ptr.read() ^ broadcast);
        word_ptr = word_ptr.add(1);
        remaining -= WORD_BYTES;
    }

    count + scalar::count_raw(word_ptr as *const u8, needle, remaining)
}

/// Safe slice form of [`count_raw`]
pub fn count(haystack: &[u8], needle: u8) -> usize {
    unsafe { count_raw(haystack.as_ptr(), needle, haystack.len()) }
}

/// Bytes to skip before `ptr` reaches word alignment
#[inline(always)]
fn misalignment(ptr: *const u8) -> usize {
    let rem = (ptr as usize) & (WORD_BYTES - 1);
    if rem == 0 {
        0
    } else {
        WORD_BYTES - rem
    }
}

/// Number of zero bytes in `diff` (the word XOR'd with the broadcast needle)
#[inline(always)]
fn matches_in_word(mut diff: usize) -> usize {
    // Fold every bit of a byte down into its lowest bit.
    diff |= diff >> 4;
    diff |= diff >> 2;
    diff |= diff >> 1;
    diff &= REPUNIT;
    WORD_BYTES - diff.count_ones() as usize
}
