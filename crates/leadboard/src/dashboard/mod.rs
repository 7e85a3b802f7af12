//! Leads dashboard data layer: seed pools, sampling and derived chart values.

pub mod attribution;
pub mod dataset;
pub mod domain;
pub mod funnel;
pub mod metric_cards;
pub mod random;
pub mod reasons;
mod sampling;
pub mod seeds;
mod snapshot;
pub mod trend;
pub mod views;

pub use attribution::SourceAttributionModel;
pub use dataset::DashboardDataset;
pub use domain::{
    DashboardError, FunnelStage, IconRef, LossReason, Metric, SourceChannel, TrendMode,
    TrendPoint, UnknownTrendMode,
};
pub use funnel::FunnelModel;
pub use metric_cards::MetricSampler;
pub use random::{entropy_seed, RandomSource, RngSource, SequenceSource};
pub use reasons::LossReasonSampler;
pub use sampling::{percentage_of, rounded_percentage, shuffle};
pub use seeds::SeedPools;
pub use snapshot::{sample_dashboard_data, DashboardSnapshot};
pub use trend::LeadsTrendModel;
pub use views::{
    ChannelShareEntry, DashboardSummary, StageShareEntry, TrendChartView, TrendRollup,
};
