use super::domain::{LossReason, Metric, TrendMode};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StageShareEntry {
    pub id: String,
    pub display_name: String,
    pub lead_count: u32,
    pub monetary_value: u64,
    pub average_duration_label: String,
    pub color_token: String,
    /// Bar segment width, percent of the displayed stages' total.
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelShareEntry {
    pub display_name: String,
    pub monetary_value: u64,
    pub lead_count: u32,
    pub color_hex: String,
    pub color_token: String,
    pub share_pct: f64,
    pub rounded_share_pct: u32,
}

/// Field of a trend point a chart series reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendField {
    ClosedWon,
    ClosedLost,
    LeadsIn,
    TotalDealValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesSpec {
    pub field: TrendField,
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub period_label: String,
    pub primary: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendChartView {
    pub mode: TrendMode,
    pub mode_label: &'static str,
    pub primary: SeriesSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<SeriesSpec>,
    /// Prepended to axis ticks and tooltip values.
    pub value_prefix: &'static str,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendRollup {
    pub total_closed_won: u64,
    pub total_closed_lost: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub active_leads: u32,
    pub total_funnel_leads: u64,
    pub funnel: Vec<StageShareEntry>,
    pub trend: TrendChartView,
    pub trend_rollup: TrendRollup,
    pub sources: Vec<ChannelShareEntry>,
    pub loss_reasons: Vec<LossReason>,
    pub metrics: Vec<Metric>,
}
