//! CSV imports that replace the built-in funnel stages or base channels.

use super::domain::{DashboardError, FunnelStage, SourceChannel};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use tracing::warn;

pub struct DashboardDataset;

impl DashboardDataset {
    pub fn funnel_stages_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<FunnelStage>, DashboardError> {
        let file = std::fs::File::open(path)?;
        Self::funnel_stages_from_reader(file)
    }

    /// Rows keep file order, which becomes pipeline order.
    pub fn funnel_stages_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<FunnelStage>, DashboardError> {
        let mut stages = Vec::new();
        for (index, row) in csv_reader(reader).deserialize::<StageRow>().enumerate() {
            let row = row?;
            let line = index + 1;
            let lead_count = non_negative("funnel stage", line, row.leads)?;
            let stage = FunnelStage::new(
                row.id,
                row.name,
                lead_count,
                row.value.unwrap_or(0),
                row.average_time.unwrap_or_default(),
                row.color.unwrap_or_default(),
            )
            .map_err(|err| at_row(err, line))?;
            stages.push(stage);
        }

        if stages.is_empty() {
            return Err(DashboardError::DataUnavailable("funnel stage"));
        }
        Ok(stages)
    }

    pub fn channels_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<SourceChannel>, DashboardError> {
        let file = std::fs::File::open(path)?;
        Self::channels_from_reader(file)
    }

    pub fn channels_from_reader<R: Read>(reader: R) -> Result<Vec<SourceChannel>, DashboardError> {
        let mut channels: Vec<SourceChannel> = Vec::new();
        for (index, row) in csv_reader(reader).deserialize::<ChannelRow>().enumerate() {
            let row = row?;
            let line = index + 1;
            let lead_count = non_negative("source channel", line, row.leads)?;
            let channel = SourceChannel::new(
                row.name,
                row.value.unwrap_or(0),
                lead_count,
                row.color,
                row.token.unwrap_or_default(),
            )
            .map_err(|err| at_row(err, line))?;

            if channels
                .iter()
                .any(|existing| existing.display_name == channel.display_name)
            {
                warn!(row = line, channel = %channel.display_name, "skipping duplicate channel");
                continue;
            }
            channels.push(channel);
        }

        if channels.is_empty() {
            return Err(DashboardError::DataUnavailable("source channel"));
        }
        Ok(channels)
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn non_negative(entity: &'static str, line: usize, leads: i64) -> Result<u32, DashboardError> {
    u32::try_from(leads).map_err(|_| {
        DashboardError::malformed(
            entity,
            format!("row {line}: lead count {leads} must be between 0 and {}", u32::MAX),
        )
    })
}

fn at_row(err: DashboardError, line: usize) -> DashboardError {
    match err {
        DashboardError::MalformedRecord { entity, detail } => DashboardError::MalformedRecord {
            entity,
            detail: format!("row {line}: {detail}"),
        },
        other => other,
    }
}

#[derive(Debug, Deserialize)]
struct StageRow {
    #[serde(rename = "Stage ID")]
    id: String,
    #[serde(rename = "Stage")]
    name: String,
    #[serde(rename = "Leads")]
    leads: i64,
    #[serde(rename = "Value", default, deserialize_with = "empty_as_none")]
    value: Option<u64>,
    #[serde(rename = "Average Time", default, deserialize_with = "empty_as_none")]
    average_time: Option<String>,
    #[serde(rename = "Color", default, deserialize_with = "empty_as_none")]
    color: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelRow {
    #[serde(rename = "Channel")]
    name: String,
    #[serde(rename = "Value", default, deserialize_with = "empty_as_none")]
    value: Option<u64>,
    #[serde(rename = "Leads")]
    leads: i64,
    #[serde(rename = "Color")]
    color: String,
    #[serde(rename = "Token", default, deserialize_with = "empty_as_none")]
    token: Option<String>,
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const FUNNEL_CSV: &str = "Stage ID,Stage,Leads,Value,Average Time,Color\n\
        discovery,Discovery,120,4000,3 days,bg-chart-1\n\
        proposal,Proposal,30,,,\n";

    #[test]
    fn imports_stages_in_file_order() {
        let stages = DashboardDataset::funnel_stages_from_reader(Cursor::new(FUNNEL_CSV))
            .expect("valid csv");
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0].id, "discovery");
        assert_eq!(stages[0].monetary_value, 4000);
        assert_eq!(stages[1].display_name, "Proposal");
        assert_eq!(stages[1].monetary_value, 0);
        assert_eq!(stages[1].average_duration_label, "");
    }

    #[test]
    fn negative_leads_are_malformed() {
        let csv = "Stage ID,Stage,Leads,Value,Average Time,Color\nlost,Lost,-4,0,1 day,bg-chart-1\n";
        let err = DashboardDataset::funnel_stages_from_reader(Cursor::new(csv))
            .expect_err("negative leads rejected");
        match err {
            DashboardError::MalformedRecord { entity, detail } => {
                assert_eq!(entity, "funnel stage");
                assert!(detail.starts_with("row 1:"), "{detail}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_only_file_is_unavailable() {
        let csv = "Channel,Value,Leads,Color,Token\n";
        let err = DashboardDataset::channels_from_reader(Cursor::new(csv))
            .expect_err("no rows");
        assert!(matches!(err, DashboardError::DataUnavailable("source channel")));
    }

    #[test]
    fn channel_rows_are_validated_and_deduplicated() {
        let csv = "Channel,Value,Leads,Color,Token\n\
            Webinars,900,12,#123abc,bg-chart-5\n\
            Webinars,100,1,#123abc,bg-chart-5\n\
            Podcasts,300,4,#fff,\n";
        let channels =
            DashboardDataset::channels_from_reader(Cursor::new(csv)).expect("valid channels");
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].lead_count, 12);
        assert_eq!(channels[1].color_token, "");

        let bad = "Channel,Value,Leads,Color,Token\nWebinars,900,12,blue,\n";
        let err = DashboardDataset::channels_from_reader(Cursor::new(bad))
            .expect_err("colour rejected");
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn non_numeric_leads_surface_csv_error() {
        let csv = "Stage ID,Stage,Leads\ndiscovery,Discovery,many\n";
        let err = DashboardDataset::funnel_stages_from_reader(Cursor::new(csv))
            .expect_err("leads must be numeric");
        assert!(matches!(err, DashboardError::Csv(_)));
    }
}
