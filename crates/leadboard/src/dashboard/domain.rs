use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("{entity} record is malformed: {detail}")]
    MalformedRecord { entity: &'static str, detail: String },
    #[error("no {0} data available")]
    DataUnavailable(&'static str),
    #[error("failed to read dashboard dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid dashboard CSV data: {0}")]
    Csv(#[from] csv::Error),
}

impl DashboardError {
    pub(crate) fn malformed(entity: &'static str, detail: impl Into<String>) -> Self {
        Self::MalformedRecord {
            entity,
            detail: detail.into(),
        }
    }
}

/// Symbolic glyph names resolved by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconRef {
    Users,
    Clock,
    Info,
    TrendingUp,
    AlertTriangle,
    Percent,
    Zap,
}

impl IconRef {
    pub const fn glyph_name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Clock => "clock",
            Self::Info => "info",
            Self::TrendingUp => "trending-up",
            Self::AlertTriangle => "alert-triangle",
            Self::Percent => "percent",
            Self::Zap => "zap",
        }
    }
}

/// One step of the sales pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunnelStage {
    pub id: String,
    pub display_name: String,
    pub lead_count: u32,
    pub monetary_value: u64,
    pub average_duration_label: String,
    pub color_token: String,
}

impl FunnelStage {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        lead_count: u32,
        monetary_value: u64,
        average_duration_label: impl Into<String>,
        color_token: impl Into<String>,
    ) -> Result<Self, DashboardError> {
        let stage = Self {
            id: id.into(),
            display_name: display_name.into(),
            lead_count,
            monetary_value,
            average_duration_label: average_duration_label.into(),
            color_token: color_token.into(),
        };
        stage.validate()?;
        Ok(stage)
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        require_text("funnel stage", "id", &self.id)?;
        require_text("funnel stage", "name", &self.display_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub period_label: String,
    pub closed_won: u32,
    pub closed_lost: u32,
    pub leads_in: u32,
    pub total_deal_value: u64,
}

impl TrendPoint {
    pub fn new(
        period_label: impl Into<String>,
        closed_won: u32,
        closed_lost: u32,
        leads_in: u32,
        total_deal_value: u64,
    ) -> Self {
        Self {
            period_label: period_label.into(),
            closed_won,
            closed_lost,
            leads_in,
            total_deal_value,
        }
    }
}

/// A lead acquisition channel shown in the attribution donut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceChannel {
    pub display_name: String,
    pub monetary_value: u64,
    pub lead_count: u32,
    pub color_hex: String,
    pub color_token: String,
}

impl SourceChannel {
    pub fn new(
        display_name: impl Into<String>,
        monetary_value: u64,
        lead_count: u32,
        color_hex: impl Into<String>,
        color_token: impl Into<String>,
    ) -> Result<Self, DashboardError> {
        let channel = Self {
            display_name: display_name.into(),
            monetary_value,
            lead_count,
            color_hex: color_hex.into(),
            color_token: color_token.into(),
        };
        channel.validate()?;
        Ok(channel)
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        require_text("source channel", "name", &self.display_name)?;
        if !is_hex_color(&self.color_hex) {
            return Err(DashboardError::malformed(
                "source channel",
                format!(
                    "'{}' has colour '{}', expected #rgb or #rrggbb",
                    self.display_name, self.color_hex
                ),
            ));
        }
        Ok(())
    }
}

/// Why a lead was lost.
///
/// `percentage` is a standalone measured ratio for this reason alone. Values
/// across reasons are not shares of one whole and are not expected to sum to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LossReason {
    pub id: String,
    pub percentage: u8,
    pub display_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_text: Option<String>,
}

impl LossReason {
    pub fn new(
        id: impl Into<String>,
        percentage: u8,
        display_text: impl Into<String>,
        detail_text: Option<String>,
    ) -> Result<Self, DashboardError> {
        let reason = Self {
            id: id.into(),
            percentage,
            display_text: display_text.into(),
            detail_text,
        };
        reason.validate()?;
        Ok(reason)
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        require_text("loss reason", "id", &self.id)?;
        require_text("loss reason", "text", &self.display_text)?;
        if self.percentage > 100 {
            return Err(DashboardError::malformed(
                "loss reason",
                format!("'{}' percentage {} exceeds 100", self.id, self.percentage),
            ));
        }
        Ok(())
    }
}

/// A stat card. `formatted_value` is shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub id: String,
    pub title: String,
    pub formatted_value: String,
    pub icon: IconRef,
    pub accent_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl Metric {
    pub fn validate(&self) -> Result<(), DashboardError> {
        require_text("metric", "id", &self.id)?;
        require_text("metric", "title", &self.title)
    }
}

/// Which figures the leads trend chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMode {
    #[default]
    Converted,
    Came,
    DealSize,
}

impl TrendMode {
    pub const fn all() -> [Self; 3] {
        [Self::Converted, Self::Came, Self::DealSize]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Converted => "Leads Converted",
            Self::Came => "Leads came",
            Self::DealSize => "Total deals size",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Converted => "converted",
            Self::Came => "came",
            Self::DealSize => "deal_size",
        }
    }
}

impl fmt::Display for TrendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTrendMode(pub String);

impl fmt::Display for UnknownTrendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown trend mode '{}' (expected one of:", self.0)?;
        for mode in TrendMode::all() {
            write!(f, " {}", mode.key())?;
        }
        f.write_str(")")
    }
}

impl std::error::Error for UnknownTrendMode {}

impl FromStr for TrendMode {
    type Err = UnknownTrendMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "converted" | "leads_converted" | "leadsconverted" => Ok(Self::Converted),
            "came" | "leads_came" | "leadscame" => Ok(Self::Came),
            "deal_size" | "total_deals_size" | "totaldealssize" => Ok(Self::DealSize),
            _ => Err(UnknownTrendMode(value.to_string())),
        }
    }
}

fn require_text(entity: &'static str, field: &str, value: &str) -> Result<(), DashboardError> {
    if value.trim().is_empty() {
        return Err(DashboardError::malformed(
            entity,
            format!("{field} must not be empty"),
        ));
    }
    Ok(())
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}
