use super::domain::FunnelStage;
use super::sampling::percentage_of;
use super::seeds;
use super::views::StageShareEntry;

/// Pipeline stages in pipeline order plus the separately supplied headline figure.
#[derive(Debug, Clone)]
pub struct FunnelModel {
    stages: Vec<FunnelStage>,
    active_leads: u32,
}

impl FunnelModel {
    pub fn new(stages: Vec<FunnelStage>, active_leads: u32) -> Self {
        Self {
            stages,
            active_leads,
        }
    }

    pub fn standard() -> Self {
        Self::new(seeds::funnel_stages(), seeds::FUNNEL_ACTIVE_LEADS)
    }

    pub fn stages(&self) -> &[FunnelStage] {
        &self.stages
    }

    pub fn active_leads(&self) -> u32 {
        self.active_leads
    }

    pub fn total_leads(&self) -> u64 {
        self.stages
            .iter()
            .map(|stage| u64::from(stage.lead_count))
            .sum()
    }

    /// Each stage's share of the displayed stages' lead total, in pipeline order.
    pub fn shares(&self) -> Vec<StageShareEntry> {
        let total = self.total_leads();
        self.stages
            .iter()
            .map(|stage| StageShareEntry {
                id: stage.id.clone(),
                display_name: stage.display_name.clone(),
                lead_count: stage.lead_count,
                monetary_value: stage.monetary_value,
                average_duration_label: stage.average_duration_label.clone(),
                color_token: stage.color_token.clone(),
                share_pct: percentage_of(u64::from(stage.lead_count), total),
            })
            .collect()
    }
}
