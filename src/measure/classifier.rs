//! Maps a size to its flavor label.

/// Label for sizes outside every bucket.
pub const FALLBACK_LABEL: &str = "bruh";

/// Closed `(from, to, label)` buckets, ascending and non-overlapping.
pub const BUCKETS: &[(i64, i64, &str)] = &[
    (3, 5, "Сегодня холодно 🥶"),
    (6, 8, "Линейка китайская прост 😔"),
    (9, 11, "Средний размер, сам мерял! 🙄"),
    (12, 13, "😊"),
    (14, 15, "😇"),
    (16, 18, "😎"),
    (19, 24, "😲"),
    (25, 30, "☣😨☣"),
];

pub fn classify(size: i64) -> &'static str {
    BUCKETS
        .iter()
        .find(|(from, to, _)| (*from..=*to).contains(&size))
        .map(|(_, _, label)| *label)
        .unwrap_or(FALLBACK_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bucket_representatives() {
        assert_eq!(classify(3), "Сегодня холодно 🥶");
        assert_eq!(classify(10), "Средний размер, сам мерял! 🙄");
        assert_eq!(classify(17), "😎");
        assert_eq!(classify(22), "😲");
        assert_eq!(classify(29), "☣😨☣");
        assert_eq!(classify(31), FALLBACK_LABEL);
    }

    #[test]
    fn test_bucket_edges() {
        assert_eq!(classify(3), classify(4));
        assert_eq!(classify(4), classify(5));
        assert_ne!(classify(5), classify(6));
        assert_eq!(classify(8), "Линейка китайская прост 😔");
        assert_eq!(classify(12), "😊");
        assert_eq!(classify(13), "😊");
        assert_eq!(classify(14), "😇");
        assert_eq!(classify(15), "😇");
        assert_eq!(classify(18), "😎");
        assert_eq!(classify(19), "😲");
        assert_eq!(classify(24), "😲");
        assert_eq!(classify(25), "☣😨☣");
        assert_eq!(classify(30), "☣😨☣");
    }

    #[test]
    fn test_out_of_range_falls_back() {
        for size in [i64::MIN, -1, 0, 1, 2, 31, 35, 80, i64::MAX] {
            assert_eq!(classify(size), FALLBACK_LABEL, "size {size}");
        }
    }

    #[test]
    fn test_classify_is_idempotent() {
        for size in -5..40 {
            assert_eq!(classify(size), classify(size));
        }
    }

    #[test]
    fn test_buckets_are_contiguous() {
        for pair in BUCKETS.windows(2) {
            assert_eq!(pair[0].1 + 1, pair[1].0);
        }
    }
}
