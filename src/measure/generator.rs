//! Size generator.
//!
//! Draws [`config::measure::SAMPLE_SIZE`] integers from `[MIN_SIZE, MAX_SIZE]`, sorts
//! them and picks one order statistic. When the 2nd and 4th smallest draws coincide
//! the pick is pushed towards the top of the sample.

use crate::core::config::measure::{
    BIASED_INDEX_MAX, BIASED_INDEX_MIN, MAX_SIZE, MIN_SIZE, PLAIN_INDEX_MAX, PLAIN_INDEX_MIN, SAMPLE_SIZE,
};

use super::entropy::{Entropy, ThreadEntropy};

/// One generator run with everything needed to explain the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    /// Draws sorted ascending.
    pub sorted_sample: Vec<i64>,
    /// Index into `sorted_sample` that produced `size`.
    pub index: usize,
    /// `sorted_sample[1] == sorted_sample[3]`
    pub biased: bool,
    pub size: i64,
}

/// Uniform integer in `[ceil(min), floor(max)]`, both ends inclusive.
///
/// Computed as `floor(u * (max - min + 1)) + min` with `u` in `[0, 1)`.
pub fn random_int(entropy: &mut impl Entropy, min: f64, max: f64) -> i64 {
    let min = min.ceil();
    let max = max.floor();
    (entropy.next_unit() * (max - min + 1.0)).floor() as i64 + min as i64
}

/// Generate a size using the thread-local RNG.
pub fn generate() -> i64 {
    generate_with(&mut ThreadEntropy)
}

pub fn generate_with(entropy: &mut impl Entropy) -> i64 {
    generate_sample_with(entropy).size
}

pub fn generate_sample_with(entropy: &mut impl Entropy) -> Measurement {
    let mut sorted_sample: Vec<i64> = (0..SAMPLE_SIZE)
        .map(|_| random_int(entropy, MIN_SIZE as f64, MAX_SIZE as f64))
        .collect();
    sorted_sample.sort_unstable();

    let biased = sorted_sample[1] == sorted_sample[3];
    let (lo, hi) = if biased {
        (BIASED_INDEX_MIN, BIASED_INDEX_MAX)
    } else {
        // Inclusive helper: index 6 is reachable here on purpose.
        (PLAIN_INDEX_MIN, PLAIN_INDEX_MAX)
    };
    let index = random_int(entropy, lo as f64, hi as f64) as usize;
    let size = sorted_sample[index];

    log::debug!(
        "Generated size {} (index {}, biased {}) from {:?}",
        size,
        index,
        biased,
        sorted_sample
    );

    Measurement {
        sorted_sample,
        index,
        biased,
        size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::entropy::{SeededEntropy, SequenceEntropy};

    /// Unit value that makes `random_int(lo, hi)` return `target`.
    fn unit_for(target: i64, lo: i64, hi: i64) -> f64 {
        let span = (hi - lo + 1) as f64;
        ((target - lo) as f64 + 0.5) / span
    }

    fn sample_units(sample: &[i64]) -> Vec<f64> {
        sample.iter().map(|&v| unit_for(v, MIN_SIZE, MAX_SIZE)).collect()
    }

    #[test]
    fn test_random_int_lower_bound_is_inclusive() {
        let mut entropy = SequenceEntropy::constant(0.0);
        assert_eq!(random_int(&mut entropy, 3.0, 30.0), 3);
        assert_eq!(random_int(&mut entropy, 0.0, 6.0), 0);
    }

    #[test]
    fn test_random_int_upper_bound_is_inclusive() {
        let mut entropy = SequenceEntropy::constant(0.999_999);
        assert_eq!(random_int(&mut entropy, 3.0, 30.0), 30);
        assert_eq!(random_int(&mut entropy, 6.0, 9.0), 9);
        // The "plain" index range reaches 6, not just 5.
        assert_eq!(random_int(&mut entropy, 0.0, 6.0), 6);
    }

    #[test]
    fn test_random_int_rounds_fractional_bounds_inwards() {
        let mut low = SequenceEntropy::constant(0.0);
        assert_eq!(random_int(&mut low, 2.2, 7.8), 3);
        let mut high = SequenceEntropy::constant(0.999_999);
        assert_eq!(random_int(&mut high, 2.2, 7.8), 7);
    }

    #[test]
    fn test_all_equal_sample_takes_biased_branch() {
        let mut units = sample_units(&[3; 10]);
        units.push(unit_for(7, 6, 9));
        let mut entropy = SequenceEntropy::new(units);

        let m = generate_sample_with(&mut entropy);
        assert!(m.biased);
        assert_eq!(m.index, 7);
        assert_eq!(m.size, 3);
        assert_eq!(entropy.consumed(), 11);
    }

    #[test]
    fn test_distinct_order_statistics_take_plain_branch() {
        let sample = [3, 5, 7, 9, 11, 13, 15, 17, 19, 21];
        let mut units = sample_units(&sample);
        units.push(unit_for(4, 0, 6));
        let mut entropy = SequenceEntropy::new(units);

        let m = generate_sample_with(&mut entropy);
        assert!(!m.biased);
        assert_eq!(m.sorted_sample, sample.to_vec());
        assert_eq!(m.index, 4);
        assert_eq!(m.size, 11);
    }

    #[test]
    fn test_plain_branch_can_reach_index_six() {
        let sample = [30, 29, 28, 27, 26, 25, 24, 23, 22, 21];
        let mut units = sample_units(&sample);
        units.push(0.999_999);
        let mut entropy = SequenceEntropy::new(units);

        let m = generate_sample_with(&mut entropy);
        assert!(!m.biased);
        assert_eq!(m.index, 6);
        assert_eq!(m.size, 27);
    }

    #[test]
    fn test_sample_is_sorted_before_order_statistics() {
        // Unsorted p1/p3 differ (4 vs 9) but sorted they coincide at 5.
        let sample = [20, 4, 30, 9, 5, 5, 5, 12, 3, 25];
        let mut units = sample_units(&sample);
        units.push(unit_for(9, 6, 9));
        let mut entropy = SequenceEntropy::new(units);

        let m = generate_sample_with(&mut entropy);
        assert_eq!(m.sorted_sample, vec![3, 4, 5, 5, 5, 9, 12, 20, 25, 30]);
        assert!(!m.biased);

        let sample = [20, 5, 30, 9, 5, 5, 3, 12, 7, 25];
        let mut units = sample_units(&sample);
        units.push(unit_for(9, 6, 9));
        let mut entropy = SequenceEntropy::new(units);

        let m = generate_sample_with(&mut entropy);
        assert_eq!(m.sorted_sample, vec![3, 5, 5, 5, 7, 9, 12, 20, 25, 30]);
        assert!(m.biased);
        assert_eq!(m.size, 30);
    }

    #[test]
    fn test_result_is_always_in_range_and_in_sample() {
        let mut entropy = SeededEntropy::new(7);
        for _ in 0..5_000 {
            let m = generate_sample_with(&mut entropy);
            assert_eq!(m.sorted_sample.len(), SAMPLE_SIZE);
            assert!((MIN_SIZE..=MAX_SIZE).contains(&m.size));
            assert!(m.sorted_sample.contains(&m.size));
            assert!(m.sorted_sample.iter().all(|v| (MIN_SIZE..=MAX_SIZE).contains(v)));
            if m.biased {
                assert!((6..=9).contains(&m.index));
            } else {
                assert!(m.index <= 6);
            }
        }
    }

    #[test]
    fn test_same_seed_same_sizes() {
        let mut a = SeededEntropy::new(2024);
        let mut b = SeededEntropy::new(2024);
        let left: Vec<i64> = (0..100).map(|_| generate_with(&mut a)).collect();
        let right: Vec<i64> = (0..100).map(|_| generate_with(&mut b)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_generate_uses_default_range() {
        for _ in 0..500 {
            assert!((MIN_SIZE..=MAX_SIZE).contains(&generate()));
        }
    }
}
