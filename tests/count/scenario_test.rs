/*!
 * Counting Scenario Tests
 * Fixed inputs checked against every kernel and the dispatched entry point
 */

use memcount::{available_kernels, count, count_raw, KernelDescriptor};
use pretty_assertions::assert_eq;

/// Run `check` with every eligible kernel, then with the dispatched path
fn for_each_counter(check: impl Fn(&str, &dyn Fn(&[u8], u8) -> usize)) {
    for kernel in available_kernels() {
        check(kernel.name(), &|data: &[u8], needle: u8| KernelDescriptor::count(kernel, data, needle));
    }
    check("dispatched", &|data: &[u8], needle: u8| count(data, needle));
}

#[test]
fn test_all_match() {
    let data = vec![0xFFu8; 10_000];
    for_each_counter(|name, counter| {
        assert_eq!(counter(&data, 0xFF), 10_000, "{name}");
    });
}

#[test]
fn test_no_match() {
    let data = vec![0xFFu8; 10_000];
    for_each_counter(|name, counter| {
        assert_eq!(counter(&data, 0x00), 0, "{name}");
    });
}

#[test]
fn test_split_run() {
    let mut data = vec![5u8; 300];
    data.push(0);
    data.extend(std::iter::repeat(5u8).take(300));
    assert_eq!(data.len(), 601);

    for_each_counter(|name, counter| {
        assert_eq!(counter(&data, 5), 600, "{name}");
        assert_eq!(counter(&data, 0), 1, "{name}");
    });
}

#[test]
fn test_unaligned_starts() {
    let data = vec![0x05u8; 9000];
    for_each_counter(|name, counter| {
        for offset in 0..32 {
            assert_eq!(counter(&data[offset..], 0x05), 9000 - offset, "{name} at {offset}");
        }
    });
}

#[test]
fn test_alignment_independence() {
    let data: Vec<u8> = (0..4096u32).map(|i| (i.wrapping_mul(31) % 7) as u8).collect();
    for_each_counter(|name, counter| {
        for offset in 0..=64 {
            for len in [0usize, 1, 15, 16, 17, 63, 64, 65, 200, 1000] {
                let slice = &data[offset..offset + len];
                let expected = slice.iter().filter(|&&b| b == 3).count();
                assert_eq!(counter(slice, 3), expected, "{name} at {offset}+{len}");
            }
        }
    });
}

#[test]
fn test_accumulator_overflow() {
    // Longer than 255 iterations of the widest unrolled block.
    let len = 255 * 64 * 4 + 77;
    let data = vec![0x2Au8; len];
    for_each_counter(|name, counter| {
        assert_eq!(counter(&data, 0x2A), len, "{name}");
        assert_eq!(counter(&data[1..], 0x2A), len - 1, "{name}");
    });
}

#[test]
fn test_zero_length() {
    for_each_counter(|name, counter| {
        assert_eq!(counter(&[], 0), 0, "{name}");
    });
    assert_eq!(unsafe { count_raw(std::ptr::null(), 0, 0) }, 0);
    assert_eq!(unsafe { count_raw(std::ptr::null(), 0xFF, 0) }, 0);
}

#[test]
fn test_value_truncation() {
    let data: Vec<u8> = (0..1500u32).map(|i| (i % 256) as u8).collect();
    for value in [0x41i32, 0x141, 0x7FFF_FF41, -191] {
        let n = unsafe { count_raw(data.as_ptr(), value, data.len()) };
        assert_eq!(n, count(&data, 0x41));
    }
}
