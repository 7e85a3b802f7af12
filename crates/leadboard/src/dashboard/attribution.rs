use super::domain::SourceChannel;
use super::random::RandomSource;
use super::sampling::{percentage_of, rounded_percentage, shuffle};
use super::views::ChannelShareEntry;
use tracing::debug;

/// Upper bound on secondary channels appended to the base set.
pub const MAX_SECONDARY_CHANNELS: usize = 2;

#[derive(Debug, Clone)]
pub struct SourceAttributionModel {
    channels: Vec<SourceChannel>,
}

impl SourceAttributionModel {
    pub fn new(channels: Vec<SourceChannel>) -> Self {
        Self { channels }
    }

    /// Base channels followed by 0 to 2 distinct channels sampled from `secondary`.
    ///
    /// Secondary channels sharing a name with a base channel are never picked.
    pub fn assemble<S: RandomSource + ?Sized>(
        base: &[SourceChannel],
        secondary: &[SourceChannel],
        rng: &mut S,
    ) -> Self {
        let mut candidates: Vec<SourceChannel> = secondary
            .iter()
            .filter(|candidate| {
                !base
                    .iter()
                    .any(|channel| channel.display_name == candidate.display_name)
            })
            .cloned()
            .collect();
        shuffle(&mut candidates, rng);

        let picked = rng
            .next_below(MAX_SECONDARY_CHANNELS + 1)
            .min(candidates.len());
        candidates.truncate(picked);
        debug!(
            base = base.len(),
            secondary = picked,
            "assembled source channels"
        );

        let mut channels = base.to_vec();
        channels.extend(candidates);
        Self { channels }
    }

    pub fn channels(&self) -> &[SourceChannel] {
        &self.channels
    }

    pub fn total_leads(&self) -> u64 {
        self.channels
            .iter()
            .map(|channel| u64::from(channel.lead_count))
            .sum()
    }

    pub fn shares(&self) -> Vec<ChannelShareEntry> {
        let total = self.total_leads();
        self.channels
            .iter()
            .map(|channel| {
                let leads = u64::from(channel.lead_count);
                ChannelShareEntry {
                    display_name: channel.display_name.clone(),
                    monetary_value: channel.monetary_value,
                    lead_count: channel.lead_count,
                    color_hex: channel.color_hex.clone(),
                    color_token: channel.color_token.clone(),
                    share_pct: percentage_of(leads, total),
                    rounded_share_pct: rounded_percentage(leads, total),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::random::SequenceSource;
    use crate::dashboard::seeds;

    #[test]
    fn base_pool_shares_round_to_display_values() {
        let model = SourceAttributionModel::new(seeds::base_channels());
        assert_eq!(model.total_leads(), 110);
        let rounded: Vec<_> = model
            .shares()
            .iter()
            .map(|entry| entry.rounded_share_pct)
            .collect();
        assert_eq!(rounded, vec![45, 36, 9, 9]);
    }

    #[test]
    fn zero_sampled_keeps_only_base() {
        // three shuffle draws, then k = 0
        let mut rng = SequenceSource::new([0, 0, 0, 0]);
        let model = SourceAttributionModel::assemble(
            &seeds::base_channels(),
            &seeds::secondary_channels(),
            &mut rng,
        );
        assert_eq!(model.channels(), seeds::base_channels().as_slice());
    }

    #[test]
    fn samples_follow_shuffled_order() {
        // shuffle: i=3 -> 3, i=2 -> 2, i=1 -> 0 gives [Referral, Google Ads, ...]; k = 2
        let mut rng = SequenceSource::new([3, 2, 0, 2]);
        let model = SourceAttributionModel::assemble(
            &seeds::base_channels(),
            &seeds::secondary_channels(),
            &mut rng,
        );
        let names: Vec<_> = model
            .channels()
            .iter()
            .map(|channel| channel.display_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Clutch", "Behance", "Instagram", "Dribbble", "Referral", "Google Ads"]
        );
        assert_eq!(model.total_leads(), 110 + 25 + 30);
    }

    #[test]
    fn duplicate_names_are_never_sampled() {
        let base = seeds::base_channels();
        let mut secondary = seeds::secondary_channels();
        secondary.truncate(1);
        secondary.push(base[0].clone());

        // shuffle keeps order, k = 2 but only one distinct candidate exists
        let mut rng = SequenceSource::new([2]);
        let model = SourceAttributionModel::assemble(&base, &secondary, &mut rng);
        assert_eq!(model.channels().len(), 5);
        assert_eq!(model.channels()[4].display_name, "Google Ads");
    }

    #[test]
    fn zero_total_yields_zero_shares() {
        let empty = SourceAttributionModel::new(Vec::new());
        assert!(empty.shares().is_empty());

        let mut silent = seeds::base_channels();
        silent.iter_mut().for_each(|channel| channel.lead_count = 0);
        let model = SourceAttributionModel::new(silent);
        assert!(model
            .shares()
            .iter()
            .all(|entry| entry.share_pct == 0.0 && entry.rounded_share_pct == 0));
    }
}
