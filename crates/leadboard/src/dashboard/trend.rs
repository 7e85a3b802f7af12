use super::domain::{TrendMode, TrendPoint};
use super::random::RandomSource;
use super::views::{ChartPoint, SeriesSpec, TrendChartView, TrendField, TrendRollup};
use tracing::debug;

pub const CLOSED_WON_FLOOR: u32 = 10;
pub const CLOSED_LOST_FLOOR: u32 = 5;
pub const LEADS_IN_FLOOR: u32 = 50;
pub const DEAL_VALUE_FLOOR: u64 = 20_000;

/// Labels given to synthesized periods, cycled in order.
pub const CONTINUATION_LABELS: [&str; 6] = ["Sep", "Oct", "Nov", "Dec", "Jan", "Feb"];

const MIN_EXTRA_POINTS: usize = 2;
const MAX_EXTRA_POINTS: usize = 5;
const MIN_WINDOW: usize = 6;
const MAX_WINDOW: usize = 7;

const CONVERTED_COLOR: &str = "#3498DB";
const LOST_COLOR: &str = "#D32F2F";
const PRIMARY_COLOR: &str = "primary";

impl TrendField {
    pub fn value(self, point: &TrendPoint) -> u64 {
        match self {
            Self::ClosedWon => u64::from(point.closed_won),
            Self::ClosedLost => u64::from(point.closed_lost),
            Self::LeadsIn => u64::from(point.leads_in),
            Self::TotalDealValue => point.total_deal_value,
        }
    }
}

/// Trailing window of monthly lead figures.
#[derive(Debug, Clone)]
pub struct LeadsTrendModel {
    points: Vec<TrendPoint>,
}

impl LeadsTrendModel {
    pub fn new(points: Vec<TrendPoint>) -> Self {
        Self { points }
    }

    /// Extends `seed` with 2 to 5 synthetic periods, then keeps the trailing 6 or 7.
    pub fn synthesize<S: RandomSource + ?Sized>(seed: &[TrendPoint], rng: &mut S) -> Self {
        let extra = MIN_EXTRA_POINTS + rng.next_below(MAX_EXTRA_POINTS - MIN_EXTRA_POINTS + 1);
        let mut series = seed.to_vec();
        series.reserve(extra);

        for index in 0..extra {
            let label = CONTINUATION_LABELS[index % CONTINUATION_LABELS.len()];
            let next = match series.last() {
                Some(previous) => next_point(previous, label, rng),
                None => baseline_point(label),
            };
            series.push(next);
        }

        let window = MIN_WINDOW + rng.next_below(MAX_WINDOW - MIN_WINDOW + 1);
        let start = series.len().saturating_sub(window);
        debug!(extra, window, kept = series.len() - start, "synthesized leads trend");

        Self {
            points: series.split_off(start),
        }
    }

    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    /// Totals over the current window. Always recomputed from the points.
    pub fn rollup(&self) -> TrendRollup {
        TrendRollup {
            total_closed_won: self.sum(TrendField::ClosedWon),
            total_closed_lost: self.sum(TrendField::ClosedLost),
        }
    }

    pub fn chart(&self, mode: TrendMode) -> TrendChartView {
        let (primary, secondary, value_prefix) = match mode {
            TrendMode::Converted => (
                SeriesSpec {
                    field: TrendField::ClosedWon,
                    label: "Closed won",
                    color: CONVERTED_COLOR,
                },
                Some(SeriesSpec {
                    field: TrendField::ClosedLost,
                    label: "Closed lost",
                    color: LOST_COLOR,
                }),
                "",
            ),
            TrendMode::Came => (
                SeriesSpec {
                    field: TrendField::LeadsIn,
                    label: "Leads Came",
                    color: PRIMARY_COLOR,
                },
                None,
                "",
            ),
            TrendMode::DealSize => (
                SeriesSpec {
                    field: TrendField::TotalDealValue,
                    label: "Total Deals Size",
                    color: PRIMARY_COLOR,
                },
                None,
                "$",
            ),
        };

        let points = self
            .points
            .iter()
            .map(|point| ChartPoint {
                period_label: point.period_label.clone(),
                primary: primary.field.value(point),
                secondary: secondary.as_ref().map(|spec| spec.field.value(point)),
            })
            .collect();

        TrendChartView {
            mode,
            mode_label: mode.label(),
            primary,
            secondary,
            value_prefix,
            points,
        }
    }

    fn sum(&self, field: TrendField) -> u64 {
        self.points.iter().map(|point| field.value(point)).sum()
    }
}

fn next_point<S: RandomSource + ?Sized>(
    previous: &TrendPoint,
    label: &str,
    rng: &mut S,
) -> TrendPoint {
    let closed_won = drift(previous.closed_won.into(), 20, CLOSED_WON_FLOOR.into(), rng);
    let closed_lost = drift(previous.closed_lost.into(), 15, CLOSED_LOST_FLOOR.into(), rng);
    let leads_in = drift(previous.leads_in.into(), 25, LEADS_IN_FLOOR.into(), rng);
    let total_deal_value = drift(previous.total_deal_value, 15_000, DEAL_VALUE_FLOOR, rng);

    TrendPoint {
        period_label: label.to_string(),
        closed_won: saturate_u32(closed_won),
        closed_lost: saturate_u32(closed_lost),
        leads_in: saturate_u32(leads_in),
        total_deal_value,
    }
}

fn baseline_point(label: &str) -> TrendPoint {
    TrendPoint::new(
        label,
        CLOSED_WON_FLOOR,
        CLOSED_LOST_FLOOR,
        LEADS_IN_FLOOR,
        DEAL_VALUE_FLOOR,
    )
}

/// `previous + delta` with `delta` in `-spread..spread`, never below `floor`.
fn drift<S: RandomSource + ?Sized>(previous: u64, spread: i64, floor: u64, rng: &mut S) -> u64 {
    let delta = rng.next_in_range(-spread, spread - 1);
    let moved = i64::try_from(previous)
        .unwrap_or(i64::MAX)
        .saturating_add(delta)
        .max(0) as u64;
    moved.max(floor)
}

fn saturate_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
