use chrono::{Datelike, NaiveDate};

use super::growth::monthly_growth;
use super::ranking::{top_partners_by_leads, top_services};
use super::views::{
    DashboardSummary, LeadStatusBreakdown, PartnerCounts, PropertyCounts, StatusCountEntry,
    SummaryScope,
};
use crate::catalog::{Lead, LeadStatus, Partner, PartnerStatus, PartnerType, Property};
use crate::locale::Locale;

pub const GROWTH_MONTHS: usize = 6;
pub const TOP_N: usize = 5;

impl LeadStatusBreakdown {
    pub fn from_leads(leads: &[Lead], locale: Locale) -> Self {
        let by_status: Vec<StatusCountEntry> = LeadStatus::ordered()
            .into_iter()
            .map(|status| StatusCountEntry {
                status,
                status_label: status.label(locale),
                count: leads.iter().filter(|lead| lead.status == status).count(),
            })
            .collect();

        let total = leads.len();
        let open = leads.iter().filter(|lead| lead.status.is_open()).count();
        let completed = by_status
            .iter()
            .find(|entry| entry.status == LeadStatus::Completed)
            .map_or(0, |entry| entry.count);
        let conversion_rate = if total > 0 {
            completed as f32 / total as f32
        } else {
            0.0
        };

        Self {
            by_status,
            total,
            open,
            conversion_rate,
        }
    }

    pub fn count(&self, status: LeadStatus) -> usize {
        self.by_status
            .iter()
            .find(|entry| entry.status == status)
            .map_or(0, |entry| entry.count)
    }
}

/// Leads created between `from` and `to`, both days included.
pub fn count_in_range(leads: &[Lead], from: NaiveDate, to: NaiveDate) -> usize {
    leads
        .iter()
        .filter(|lead| {
            let created = lead.created_at.date_naive();
            created >= from && created <= to
        })
        .count()
}

impl PropertyCounts {
    pub fn from_properties<'a>(properties: impl IntoIterator<Item = &'a Property>) -> Self {
        properties.into_iter().fold(
            Self {
                total: 0,
                available: 0,
                featured: 0,
            },
            |mut counts, property| {
                counts.total += 1;
                counts.available += usize::from(property.status.is_available());
                counts.featured += usize::from(property.featured);
                counts
            },
        )
    }
}

impl PartnerCounts {
    /// Counts business partners; admin accounts are left out.
    pub fn from_partners(partners: &[Partner], today: NaiveDate) -> Self {
        let mut counts = Self {
            total: 0,
            active: 0,
            pending: 0,
            with_current_subscription: 0,
        };
        for partner in partners
            .iter()
            .filter(|partner| partner.partner_type() != PartnerType::Admin)
        {
            counts.total += 1;
            match partner.status {
                PartnerStatus::Active => counts.active += 1,
                PartnerStatus::Pending => counts.pending += 1,
            }
            if partner
                .subscription
                .as_ref()
                .is_some_and(|subscription| subscription.is_current(today))
            {
                counts.with_current_subscription += 1;
            }
        }
        counts
    }
}

fn month_start(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today)
}

/// Reporting date, label language and growth window for a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    pub today: NaiveDate,
    pub locale: Locale,
    pub months: usize,
}

impl SummaryOptions {
    pub fn new(today: NaiveDate, locale: Locale) -> Self {
        Self {
            today,
            locale,
            months: GROWTH_MONTHS,
        }
    }

    pub fn with_months(mut self, months: usize) -> Self {
        self.months = months;
        self
    }
}

impl DashboardSummary {
    /// Platform-wide view for administrators.
    pub fn admin(
        leads: &[Lead],
        properties: &[Property],
        partners: &[Partner],
        options: SummaryOptions,
    ) -> Self {
        let SummaryOptions {
            today,
            locale,
            months,
        } = options;
        Self {
            scope: SummaryScope::Admin,
            partner_id: None,
            locale,
            generated_on: today,
            leads: LeadStatusBreakdown::from_leads(leads, locale),
            leads_this_month: count_in_range(leads, month_start(today), today),
            properties: PropertyCounts::from_properties(properties),
            partners: Some(PartnerCounts::from_partners(partners, today)),
            top_partners: top_partners_by_leads(leads, partners, TOP_N, locale),
            top_services: top_services(leads, TOP_N),
            lead_growth: monthly_growth(
                leads.iter().map(|lead| lead.created_at.date_naive()),
                months,
                today,
                locale,
            ),
            partner_growth: monthly_growth(
                partners
                    .iter()
                    .filter(|partner| partner.partner_type() != PartnerType::Admin)
                    .map(|partner| partner.joined_on),
                months,
                today,
                locale,
            ),
        }
    }

    /// One partner's own pipeline and listings.
    pub fn partner(
        partner_id: &str,
        leads: &[Lead],
        properties: &[Property],
        options: SummaryOptions,
    ) -> Self {
        let SummaryOptions {
            today,
            locale,
            months,
        } = options;
        let own_leads: Vec<Lead> = leads
            .iter()
            .filter(|lead| lead.partner_id == partner_id)
            .cloned()
            .collect();

        Self {
            scope: SummaryScope::Partner,
            partner_id: Some(partner_id.to_string()),
            locale,
            generated_on: today,
            leads: LeadStatusBreakdown::from_leads(&own_leads, locale),
            leads_this_month: count_in_range(&own_leads, month_start(today), today),
            properties: PropertyCounts::from_properties(
                properties
                    .iter()
                    .filter(|property| property.partner_id == partner_id),
            ),
            partners: None,
            top_partners: Vec::new(),
            top_services: top_services(&own_leads, TOP_N),
            lead_growth: monthly_growth(
                own_leads.iter().map(|lead| lead.created_at.date_naive()),
                months,
                today,
                locale,
            ),
            partner_growth: Vec::new(),
        }
    }
}
