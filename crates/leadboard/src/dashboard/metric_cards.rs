use super::domain::Metric;
use super::random::RandomSource;
use super::sampling::shuffled_prefix;
use super::seeds;
use tracing::debug;

pub const MIN_METRIC_CARDS: usize = 3;
pub const MAX_METRIC_CARDS: usize = 6;

#[derive(Debug, Clone)]
pub struct MetricSampler {
    pool: Vec<Metric>,
}

impl MetricSampler {
    pub fn new(pool: Vec<Metric>) -> Self {
        Self { pool }
    }

    pub fn standard() -> Self {
        Self::new(seeds::metrics())
    }

    pub fn pool(&self) -> &[Metric] {
        &self.pool
    }

    /// Shuffles the pool first, then draws how many cards to keep.
    ///
    /// The count lies in `[min(3, n), min(6, n)]` for a pool of `n`; an empty
    /// pool yields no cards.
    pub fn sample<S: RandomSource + ?Sized>(&self, rng: &mut S) -> Vec<Metric> {
        let mut shuffled = shuffled_prefix(&self.pool, self.pool.len(), rng);
        let low = MIN_METRIC_CARDS.min(self.pool.len());
        let high = MAX_METRIC_CARDS.min(self.pool.len());
        let count = low + rng.next_below(high - low + 1);
        debug!(pool = self.pool.len(), count, "sampled metric cards");
        shuffled.truncate(count);
        shuffled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::random::{RngSource, SequenceSource};
    use std::collections::HashSet;

    #[test]
    fn card_count_stays_between_three_and_six() {
        let sampler = MetricSampler::standard();
        let mut seen = HashSet::new();
        for seed in 0..300 {
            let cards = sampler.sample(&mut RngSource::seeded(seed));
            assert!((3..=6).contains(&cards.len()), "got {} cards", cards.len());
            let ids: HashSet<_> = cards.iter().map(|card| card.id.as_str()).collect();
            assert_eq!(ids.len(), cards.len());
            seen.insert(cards.len());
        }
        assert_eq!(seen.len(), 4, "every count in 3..=6 shows up");
    }

    #[test]
    fn scripted_count_follows_shuffle() {
        // six shuffle draws leave the pool order intact, then 3 + 3 cards
        let mut rng = SequenceSource::new([6, 5, 4, 3, 2, 1, 3]);
        let cards = MetricSampler::standard().sample(&mut rng);
        let ids: Vec<_> = cards.iter().map(|card| card.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "totalLeads",
                "avgConversionTime",
                "inactiveLeads",
                "conversionRate",
                "newCustomers",
                "atRiskLeads"
            ]
        );
    }

    #[test]
    fn empty_pool_yields_no_cards() {
        let cards = MetricSampler::new(Vec::new()).sample(&mut RngSource::seeded(3));
        assert!(cards.is_empty());
    }

    #[test]
    fn short_pool_caps_the_count() {
        let pool = seeds::metrics()[..2].to_vec();
        let cards = MetricSampler::new(pool).sample(&mut SequenceSource::new([0, 1]));
        assert_eq!(cards.len(), 2);
    }
}
