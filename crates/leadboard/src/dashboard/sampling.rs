use super::random::RandomSource;

/// In-place Fisher-Yates shuffle. Draws `len - 1` values, largest bound first.
pub fn shuffle<T, S: RandomSource + ?Sized>(items: &mut [T], rng: &mut S) {
    for i in (1..items.len()).rev() {
        let j = rng.next_below(i + 1);
        items.swap(i, j);
    }
}

/// Shuffles a copy of `pool` and keeps the first `count` items (or the whole pool if shorter).
pub fn shuffled_prefix<T: Clone, S: RandomSource + ?Sized>(
    pool: &[T],
    count: usize,
    rng: &mut S,
) -> Vec<T> {
    let mut items = pool.to_vec();
    shuffle(&mut items, rng);
    items.truncate(count.min(pool.len()));
    items
}

/// `part` as a percentage of `total`; 0 when `total` is 0.
pub fn percentage_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

pub fn rounded_percentage(part: u64, total: u64) -> u32 {
    percentage_of(part, total).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::random::SequenceSource;

    #[test]
    fn shuffle_swaps_from_the_back() {
        // i=3 -> j=0, i=2 -> j=2, i=1 -> j=0
        let mut rng = SequenceSource::new([0, 2, 0]);
        let mut items = vec!['a', 'b', 'c', 'd'];
        shuffle(&mut items, &mut rng);
        assert_eq!(items, vec!['b', 'd', 'c', 'a']);
    }

    #[test]
    fn prefix_never_exceeds_pool() {
        let mut rng = SequenceSource::default();
        let picked = shuffled_prefix(&[1, 2, 3], 10, &mut rng);
        assert_eq!(picked.len(), 3);
        let picked = shuffled_prefix::<u8, _>(&[], 4, &mut rng);
        assert!(picked.is_empty());
    }

    #[test]
    fn percentage_guards_zero_total() {
        assert_eq!(percentage_of(5, 0), 0.0);
        assert!(!percentage_of(0, 0).is_nan());
        assert_eq!(rounded_percentage(50, 110), 45);
        assert_eq!(rounded_percentage(40, 110), 36);
    }
}
