/*!
 * Oracle Property Tests
 * Every kernel must agree with a naive byte loop
 */

use memcount::{available_kernels, count, count_raw};
use proptest::collection::vec;
use proptest::prelude::*;

fn naive(data: &[u8], needle: u8) -> usize {
    data.iter().filter(|&&b| b == needle).count()
}

proptest! {
    #[test]
    fn prop_kernels_match_naive(
        data in vec(any::<u8>(), 0..4096),
        needle in any::<u8>(),
        offset in 0usize..=64,
    ) {
        let slice = &data[offset.min(data.len())..];
        let expected = naive(slice, needle);
        for kernel in available_kernels() {
            prop_assert_eq!(kernel.count(slice, needle), expected, "{}", kernel.name());
        }
        prop_assert_eq!(count(slice, needle), expected);
    }

    #[test]
    fn prop_sparse_alphabet(
        data in vec(0u8..4, 0..8192),
        needle in 0u8..4,
    ) {
        let expected = naive(&data, needle);
        for kernel in available_kernels() {
            prop_assert_eq!(kernel.count(&data, needle), expected, "{}", kernel.name());
        }
    }

    #[test]
    fn prop_value_truncation(
        data in vec(any::<u8>(), 0..2048),
        value in any::<i32>(),
    ) {
        let (ptr, len) = (data.as_ptr(), data.len());
        let raw = unsafe { count_raw(ptr, value, len) };
        prop_assert_eq!(raw, unsafe { count_raw(ptr, value & 0xFF, len) });
        prop_assert_eq!(raw, unsafe { count_raw(ptr, value.wrapping_add(256), len) });
        prop_assert_eq!(raw, naive(&data, value as u8));
    }
}
