//! Pure aggregations over already-fetched catalog records.

mod growth;
mod ranking;
mod summary;
pub mod views;

pub use growth::{month_label, monthly_growth, MAX_GROWTH_MONTHS};
pub use ranking::{top_partners_by_leads, top_services};
pub use summary::{count_in_range, SummaryOptions, GROWTH_MONTHS, TOP_N};
pub use views::{
    DashboardSummary, GrowthPoint, LeadStatusBreakdown, PartnerCounts, PartnerRankEntry,
    PropertyCounts, ServiceRankEntry, StatusCountEntry, SummaryScope,
};
