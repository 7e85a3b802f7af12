use super::domain::LossReason;
use super::random::RandomSource;
use super::sampling::shuffled_prefix;
use super::seeds;

/// Number of loss reasons shown per snapshot (a 2x2 grid).
pub const LOSS_REASONS_SHOWN: usize = 4;

#[derive(Debug, Clone)]
pub struct LossReasonSampler {
    pool: Vec<LossReason>,
}

impl LossReasonSampler {
    pub fn new(pool: Vec<LossReason>) -> Self {
        Self { pool }
    }

    pub fn standard() -> Self {
        Self::new(seeds::loss_reasons())
    }

    pub fn pool(&self) -> &[LossReason] {
        &self.pool
    }

    /// `min(4, pool size)` reasons in shuffled order, no repeats.
    pub fn sample<S: RandomSource + ?Sized>(&self, rng: &mut S) -> Vec<LossReason> {
        shuffled_prefix(&self.pool, LOSS_REASONS_SHOWN, rng)
    }
}
