use crate::infra::{group_thousands, parse_trend_mode, pools_from_paths, summarize, DataSource};
use clap::Args;
use leadboard::config::AppConfig;
use leadboard::dashboard::{DashboardSummary, TrendMode};
use leadboard::error::AppError;
use serde::Serialize;
use std::fmt::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct SnapshotArgs {
    /// Seed for the sampler. Falls back to APP_DASHBOARD_SEED, then to a fresh seed.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Trend chart mode: converted, came or deal_size
    #[arg(long, value_parser = parse_trend_mode, default_value = "converted")]
    pub(crate) mode: TrendMode,
    /// Funnel stage CSV export replacing the built-in stages
    #[arg(long)]
    pub(crate) funnel_csv: Option<PathBuf>,
    /// Source channel CSV export replacing the built-in base channels
    #[arg(long)]
    pub(crate) channels_csv: Option<PathBuf>,
    /// Print the snapshot as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Serialize)]
struct SnapshotReport<'a> {
    seed: u64,
    data_source: DataSource,
    #[serde(flatten)]
    summary: &'a DashboardSummary,
}

pub(crate) fn run_snapshot(args: SnapshotArgs) -> Result<(), AppError> {
    let SnapshotArgs {
        seed,
        mode,
        funnel_csv,
        channels_csv,
        json,
    } = args;

    let config = AppConfig::load()?;
    let (pools, data_source) = pools_from_paths(funnel_csv, channels_csv)?;
    let (seed, summary) = summarize(&pools, seed.or(config.dashboard.seed), mode);

    if json {
        let report = SnapshotReport {
            seed,
            data_source,
            summary: &summary,
        };
        let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        let text = render_text(&summary, seed, data_source).map_err(std::io::Error::other)?;
        print!("{text}");
    }
    Ok(())
}

/// Plain-text rendering of a snapshot. Sections with no rows are left out.
pub(crate) fn render_text(
    summary: &DashboardSummary,
    seed: u64,
    source: DataSource,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_text(&mut out, summary, seed, source)?;
    Ok(out)
}

fn write_text(
    out: &mut String,
    summary: &DashboardSummary,
    seed: u64,
    source: DataSource,
) -> fmt::Result {
    writeln!(out, "Leads dashboard snapshot (seed {seed}, {})", source.label())?;

    if !summary.funnel.is_empty() {
        writeln!(
            out,
            "\nSales funnel: {} active leads",
            group_thousands(u64::from(summary.active_leads))
        )?;
        for stage in &summary.funnel {
            writeln!(
                out,
                "- {}: {} leads | ${} | {:.1}% | avg {}",
                stage.display_name,
                stage.lead_count,
                group_thousands(stage.monetary_value),
                stage.share_pct,
                stage.average_duration_label
            )?;
        }
    }

    if !summary.trend.points.is_empty() {
        let trend = &summary.trend;
        writeln!(out, "\nLeads trend ({})", trend.mode_label)?;
        writeln!(
            out,
            "Closed won {} | Closed lost {}",
            summary.trend_rollup.total_closed_won, summary.trend_rollup.total_closed_lost
        )?;
        for point in &trend.points {
            write!(
                out,
                "- {}: {} {}{}",
                point.period_label,
                trend.primary.label,
                trend.value_prefix,
                group_thousands(point.primary)
            )?;
            if let (Some(spec), Some(value)) = (&trend.secondary, point.secondary) {
                write!(out, " | {} {}", spec.label, value)?;
            }
            writeln!(out)?;
        }
    }

    if !summary.sources.is_empty() {
        writeln!(out, "\nLead sources")?;
        for channel in &summary.sources {
            writeln!(
                out,
                "- {}: {} leads | ${} | {}%",
                channel.display_name,
                channel.lead_count,
                group_thousands(channel.monetary_value),
                channel.rounded_share_pct
            )?;
        }
    }

    if !summary.loss_reasons.is_empty() {
        writeln!(out, "\nReasons of leads lost")?;
        for reason in &summary.loss_reasons {
            writeln!(out, "- {}% {}", reason.percentage, reason.display_text)?;
        }
    }

    if !summary.metrics.is_empty() {
        writeln!(out, "\nMetrics")?;
        for metric in &summary.metrics {
            write!(out, "- {}: {}", metric.title, metric.formatted_value)?;
            if let Some(description) = &metric.description {
                write!(out, " ({description})")?;
            }
            writeln!(out, " [{}]", metric.icon.glyph_name())?;
            if let Some(tooltip) = &metric.tooltip {
                writeln!(out, "  {tooltip}")?;
            }
        }
    }

    Ok(())
}
