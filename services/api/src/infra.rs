use leadboard::dashboard::{
    entropy_seed, sample_dashboard_data, DashboardDataset, DashboardError, DashboardSummary,
    FunnelStage, RngSource, SeedPools, SourceChannel, TrendMode,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) default_seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DataSource {
    Standard,
    Imported,
}

impl DataSource {
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Standard => "built-in seed pools",
            Self::Imported => "imported CSV data",
        }
    }
}

/// Seed pools with any provided CSV exports swapped in.
pub(crate) fn pools_from_paths(
    funnel_csv: Option<PathBuf>,
    channels_csv: Option<PathBuf>,
) -> Result<(SeedPools, DataSource), DashboardError> {
    let funnel = funnel_csv
        .map(DashboardDataset::funnel_stages_from_path)
        .transpose()?;
    let channels = channels_csv
        .map(DashboardDataset::channels_from_path)
        .transpose()?;
    Ok(merge_pools(funnel, channels))
}

pub(crate) fn pools_from_csv_text(
    funnel_csv: Option<String>,
    channels_csv: Option<String>,
) -> Result<(SeedPools, DataSource), DashboardError> {
    let funnel = funnel_csv
        .map(|text| DashboardDataset::funnel_stages_from_reader(Cursor::new(text.into_bytes())))
        .transpose()?;
    let channels = channels_csv
        .map(|text| DashboardDataset::channels_from_reader(Cursor::new(text.into_bytes())))
        .transpose()?;
    Ok(merge_pools(funnel, channels))
}

fn merge_pools(
    funnel: Option<Vec<FunnelStage>>,
    channels: Option<Vec<SourceChannel>>,
) -> (SeedPools, DataSource) {
    let source = if funnel.is_some() || channels.is_some() {
        DataSource::Imported
    } else {
        DataSource::Standard
    };

    let mut pools = SeedPools::standard();
    if let Some(stages) = funnel {
        pools = pools.with_funnel_stages(stages);
    }
    if let Some(channels) = channels {
        pools = pools.with_base_channels(channels);
    }
    (pools, source)
}

/// Samples a snapshot and returns it with the seed that produced it.
pub(crate) fn summarize(
    pools: &SeedPools,
    seed: Option<u64>,
    mode: TrendMode,
) -> (u64, DashboardSummary) {
    let seed = seed.unwrap_or_else(entropy_seed);
    let snapshot = sample_dashboard_data(pools, &mut RngSource::seeded(seed));
    (seed, snapshot.summary(mode))
}

pub(crate) fn parse_trend_mode(raw: &str) -> Result<TrendMode, String> {
    raw.parse::<TrendMode>().map_err(|err| err.to_string())
}

pub(crate) fn deserialize_optional_mode<'de, D>(
    deserializer: D,
) -> Result<Option<TrendMode>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.filter(|value| !value.trim().is_empty())
        .map(|value| parse_trend_mode(&value).map_err(serde::de::Error::custom))
        .transpose()
}

/// `1234567` -> `1,234,567`.
pub(crate) fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
