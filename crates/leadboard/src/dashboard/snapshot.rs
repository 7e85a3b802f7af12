use super::attribution::SourceAttributionModel;
use super::domain::{LossReason, Metric, TrendMode};
use super::funnel::FunnelModel;
use super::metric_cards::MetricSampler;
use super::random::RandomSource;
use super::reasons::LossReasonSampler;
use super::seeds::SeedPools;
use super::trend::LeadsTrendModel;
use super::views::DashboardSummary;
use tracing::debug;

/// Everything one dashboard page shows, drawn once and then left untouched.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub funnel: FunnelModel,
    pub trend: LeadsTrendModel,
    pub sources: SourceAttributionModel,
    pub loss_reasons: Vec<LossReason>,
    pub metrics: Vec<Metric>,
}

/// Draws a full snapshot from `pools`.
///
/// Draw order is fixed (trend, sources, loss reasons, metrics), so the same
/// pools and the same random sequence always give the same snapshot.
pub fn sample_dashboard_data<S: RandomSource + ?Sized>(
    pools: &SeedPools,
    rng: &mut S,
) -> DashboardSnapshot {
    let funnel = FunnelModel::new(pools.funnel_stages.clone(), pools.active_leads);
    let trend = LeadsTrendModel::synthesize(&pools.trend_seed, rng);
    let sources =
        SourceAttributionModel::assemble(&pools.base_channels, &pools.secondary_channels, rng);
    let loss_reasons = LossReasonSampler::new(pools.loss_reasons.clone()).sample(rng);
    let metrics = MetricSampler::new(pools.metrics.clone()).sample(rng);

    debug!(
        stages = funnel.stages().len(),
        periods = trend.points().len(),
        channels = sources.channels().len(),
        reasons = loss_reasons.len(),
        metrics = metrics.len(),
        "sampled dashboard snapshot"
    );

    DashboardSnapshot {
        funnel,
        trend,
        sources,
        loss_reasons,
        metrics,
    }
}

impl DashboardSnapshot {
    pub fn summary(&self, mode: TrendMode) -> DashboardSummary {
        DashboardSummary {
            active_leads: self.funnel.active_leads(),
            total_funnel_leads: self.funnel.total_leads(),
            funnel: self.funnel.shares(),
            trend: self.trend.chart(mode),
            trend_rollup: self.trend.rollup(),
            sources: self.sources.shares(),
            loss_reasons: self.loss_reasons.clone(),
            metrics: self.metrics.clone(),
        }
    }
}
