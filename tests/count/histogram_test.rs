/*!
 * Histogram Tests
 * Random buffers of sizes 0 and 3^k, every byte value checked per kernel
 */

use memcount::{available_kernels, count};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED: u64 = 0x6d65_6d63_6f75_6e74;

fn sizes() -> impl Iterator<Item = usize> {
    std::iter::once(0).chain((0..=11).map(|k| 3usize.pow(k)))
}

fn histogram(data: &[u8]) -> [usize; 256] {
    let mut counts = [0usize; 256];
    for &byte in data {
        counts[byte as usize] += 1;
    }
    counts
}

#[test]
fn test_histogram_every_kernel() {
    let mut rng = StdRng::seed_from_u64(SEED);

    for size in sizes() {
        let mut data = vec![0u8; size];
        rng.fill(&mut data[..]);
        let expected = histogram(&data);

        for kernel in available_kernels() {
            for value in 0..=255u8 {
                assert_eq!(
                    kernel.count(&data, value),
                    expected[value as usize],
                    "{} size={size} value={value}",
                    kernel.name()
                );
            }
        }
    }
}

#[test]
fn test_histogram_dispatched() {
    let mut rng = StdRng::seed_from_u64(SEED ^ 1);

    for size in sizes() {
        // Skewed toward a few values so long runs of matches occur.
        let data: Vec<u8> = (0..size)
            .map(|_| if rng.gen_bool(0.75) { rng.gen_range(0..4u8) } else { rng.gen::<u8>() })
            .collect();
        let expected = histogram(&data);

        let total: usize = (0..=255u8).map(|value| count(&data, value)).sum();
        assert_eq!(total, size);
        for value in 0..=255u8 {
            assert_eq!(count(&data, value), expected[value as usize], "size={size} value={value}");
        }
    }
}
