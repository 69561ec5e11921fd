use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::{LeadStatus, PartnerType};
use crate::locale::Locale;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountEntry {
    pub status: LeadStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadStatusBreakdown {
    /// Every status in pipeline order, zero counts included.
    pub by_status: Vec<StatusCountEntry>,
    pub total: usize,
    pub open: usize,
    /// Completed leads over all leads, 0.0 when there are none.
    pub conversion_rate: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerRankEntry {
    pub partner_id: String,
    pub partner_name: String,
    pub partner_type: PartnerType,
    pub leads: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRankEntry {
    pub service_title: String,
    pub leads: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    /// `YYYY-MM`.
    pub month: String,
    pub label: String,
    pub added: usize,
    pub cumulative: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryScope {
    Admin,
    Partner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCounts {
    pub total: usize,
    pub available: usize,
    pub featured: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerCounts {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub with_current_subscription: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub scope: SummaryScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    pub locale: Locale,
    pub generated_on: NaiveDate,
    pub leads: LeadStatusBreakdown,
    pub leads_this_month: usize,
    pub properties: PropertyCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partners: Option<PartnerCounts>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_partners: Vec<PartnerRankEntry>,
    pub top_services: Vec<ServiceRankEntry>,
    pub lead_growth: Vec<GrowthPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partner_growth: Vec<GrowthPoint>,
}
