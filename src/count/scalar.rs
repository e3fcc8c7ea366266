/*!
 * Scalar Byte Counting
 * Byte-by-byte reference loop, also used for every prologue and tail
 */

/// Count bytes equal to `needle` in `len` bytes starting at `ptr`
///
/// No alignment requirement.
///
/// # Safety
/// `ptr` must be valid for reads of `len` bytes. It may be null or dangling
/// only when `len` is 0.
#[inline]
pub unsafe fn count_raw(ptr: *const u8, needle: u8, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    count(std::slice::from_raw_parts(ptr, len), needle)
}

/// Count bytes equal to `needle` in a slice
#[inline]
pub fn count(haystack: &[u8], needle: u8) -> usize {
    haystack.iter().filter(|&&b| b == needle).count()
}
