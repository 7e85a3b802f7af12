use super::domain::{
    DashboardError, FunnelStage, IconRef, LossReason, Metric, SourceChannel, TrendPoint,
};

/// Headline "active leads" figure shown above the funnel. Independent of the stage sum.
pub const FUNNEL_ACTIVE_LEADS: u32 = 600;

/// Constant pools every dashboard snapshot is drawn from.
#[derive(Debug, Clone)]
pub struct SeedPools {
    pub funnel_stages: Vec<FunnelStage>,
    pub active_leads: u32,
    pub trend_seed: Vec<TrendPoint>,
    pub base_channels: Vec<SourceChannel>,
    pub secondary_channels: Vec<SourceChannel>,
    pub loss_reasons: Vec<LossReason>,
    pub metrics: Vec<Metric>,
}

impl SeedPools {
    pub fn standard() -> Self {
        Self {
            funnel_stages: funnel_stages(),
            active_leads: FUNNEL_ACTIVE_LEADS,
            trend_seed: trend_seed(),
            base_channels: base_channels(),
            secondary_channels: secondary_channels(),
            loss_reasons: loss_reasons(),
            metrics: metrics(),
        }
    }

    pub fn with_funnel_stages(mut self, stages: Vec<FunnelStage>) -> Self {
        self.funnel_stages = stages;
        self
    }

    pub fn with_base_channels(mut self, channels: Vec<SourceChannel>) -> Self {
        self.base_channels = channels;
        self
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        self.funnel_stages
            .iter()
            .try_for_each(FunnelStage::validate)?;
        self.base_channels
            .iter()
            .chain(&self.secondary_channels)
            .try_for_each(SourceChannel::validate)?;
        self.loss_reasons.iter().try_for_each(LossReason::validate)?;
        self.metrics.iter().try_for_each(Metric::validate)
    }
}

impl Default for SeedPools {
    fn default() -> Self {
        Self::standard()
    }
}

fn stage(
    id: &str,
    name: &str,
    leads: u32,
    value: u64,
    avg_time: &str,
    color: &str,
) -> FunnelStage {
    FunnelStage {
        id: id.to_string(),
        display_name: name.to_string(),
        lead_count: leads,
        monetary_value: value,
        average_duration_label: avg_time.to_string(),
        color_token: color.to_string(),
    }
}

pub fn funnel_stages() -> Vec<FunnelStage> {
    vec![
        stage("discovery", "Discovery", 200, 200, "2 days", "bg-destructive"),
        stage("qualified", "Qualified", 100, 100, "2 days", "bg-chart-1"),
        stage("inConversation", "In conversation", 50, 100, "2 days", "bg-slate-600"),
        stage("negotiations", "Negotiations", 20, 50, "8 days", "bg-prd-accent-green"),
        stage("closedWon", "Closed won", 20, 50, "10 days", "bg-chart-2"),
    ]
}

pub fn trend_seed() -> Vec<TrendPoint> {
    vec![
        TrendPoint::new("Mar", 65, 50, 120, 55_000),
        TrendPoint::new("Apr", 52, 38, 100, 48_000),
        TrendPoint::new("May", 78, 60, 150, 72_000),
        TrendPoint::new("Jun", 60, 10, 110, 60_000),
        TrendPoint::new("Jul", 85, 35, 160, 80_000),
        TrendPoint::new("Aug", 30, 95, 90, 45_000),
    ]
}

fn channel(name: &str, value: u64, leads: u32, hex: &str, token: &str) -> SourceChannel {
    SourceChannel {
        display_name: name.to_string(),
        monetary_value: value,
        lead_count: leads,
        color_hex: hex.to_string(),
        color_token: token.to_string(),
    }
}

pub fn base_channels() -> Vec<SourceChannel> {
    vec![
        channel("Clutch", 3000, 50, "#E67E22", "bg-chart-4"),
        channel("Behance", 1000, 40, "#F9A826", "bg-chart-1"),
        channel("Instagram", 1000, 10, "#3498DB", "bg-chart-3"),
        channel("Dribbble", 1000, 10, "#388E3C", "bg-prd-accent-green"),
    ]
}

pub fn secondary_channels() -> Vec<SourceChannel> {
    vec![
        channel("Google Ads", 2500, 30, "#e74c3c", "bg-red-600"),
        channel("Referral", 1800, 25, "#9b59b6", "bg-purple-600"),
        channel("Organic Search", 4200, 60, "#2ecc71", "bg-emerald-500"),
        channel("LinkedIn", 1500, 18, "#0077b5", "bg-sky-600"),
    ]
}

fn reason(id: &str, percentage: u8, text: &str, details: &str) -> LossReason {
    LossReason {
        id: id.to_string(),
        percentage,
        display_text: text.to_string(),
        detail_text: Some(details.to_string()),
    }
}

pub fn loss_reasons() -> Vec<LossReason> {
    vec![
        reason(
            "unclearProposal",
            40,
            "The proposal was unclear",
            "Clients found the scope or deliverables ill-defined.",
        ),
        reason(
            "venturePursuit",
            20,
            "Client pursued other ventures",
            "The lead decided to allocate resources to different internal projects.",
        ),
        reason(
            "other",
            10,
            "Other miscellaneous reasons",
            "Various unclassified reasons for lead loss.",
        ),
        reason(
            "budgetConstraints",
            30,
            "Budget constraints",
            "The proposed solution exceeded the client's allocated budget.",
        ),
        reason(
            "timing",
            25,
            "Timing not right for client",
            "Client postponed the decision due to internal or market factors.",
        ),
        reason(
            "lostToCompetitor",
            15,
            "Lost to competitor",
            "A competitor offered a solution the client deemed more suitable.",
        ),
        reason(
            "noResponse",
            18,
            "No response after follow-up",
            "Lead became unresponsive despite multiple follow-up attempts.",
        ),
        reason(
            "featureGap",
            22,
            "Product/service feature gap",
            "Our offering lacked specific features the client required.",
        ),
        reason(
            "poorFit",
            28,
            "Not a good fit",
            "Client needs and our offerings were not well-aligned.",
        ),
    ]
}

pub fn metrics() -> Vec<Metric> {
    let metric = |id: &str, title: &str, value: &str, icon: IconRef, accent: &str| Metric {
        id: id.to_string(),
        title: title.to_string(),
        formatted_value: value.to_string(),
        icon,
        accent_color: accent.to_string(),
        description: None,
        tooltip: None,
    };

    vec![
        metric("totalLeads", "total leads count", "900", IconRef::Users, "text-blue-500"),
        metric(
            "avgConversionTime",
            "days in average to convert lead",
            "12",
            IconRef::Clock,
            "text-green-500",
        ),
        Metric {
            tooltip: Some("Leads with no activity in the last 30 days".to_string()),
            ..metric("inactiveLeads", "inactive leads", "30", IconRef::Info, "text-yellow-600")
        },
        Metric {
            description: Some("+2.1% from last month".to_string()),
            ..metric(
                "conversionRate",
                "conversion rate",
                "25%",
                IconRef::Percent,
                "text-purple-500",
            )
        },
        Metric {
            description: Some("Target: 200".to_string()),
            ..metric(
                "newCustomers",
                "new customers this Q",
                "153",
                IconRef::TrendingUp,
                "text-teal-500",
            )
        },
        Metric {
            tooltip: Some(
                "Leads showing signs of disengagement or negative sentiment".to_string(),
            ),
            ..metric(
                "atRiskLeads",
                "at risk leads",
                "18",
                IconRef::AlertTriangle,
                "text-red-500",
            )
        },
        Metric {
            description: Some("2 new, 1 ending soon".to_string()),
            ..metric(
                "activeCampaigns",
                "active campaigns",
                "5",
                IconRef::Zap,
                "text-orange-500",
            )
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_pools_are_valid() {
        let pools = SeedPools::standard();
        pools.validate().expect("seed data validates");
        assert_eq!(pools.funnel_stages.len(), 5);
        assert_eq!(pools.trend_seed.len(), 6);
        assert_eq!(pools.base_channels.len(), 4);
        assert_eq!(pools.secondary_channels.len(), 4);
        assert_eq!(pools.loss_reasons.len(), 9);
        assert_eq!(pools.metrics.len(), 7);
    }

    #[test]
    fn pool_ids_are_unique() {
        let pools = SeedPools::standard();
        let reason_ids: HashSet<_> = pools.loss_reasons.iter().map(|r| &r.id).collect();
        assert_eq!(reason_ids.len(), pools.loss_reasons.len());
        let metric_ids: HashSet<_> = pools.metrics.iter().map(|m| &m.id).collect();
        assert_eq!(metric_ids.len(), pools.metrics.len());
    }
}
