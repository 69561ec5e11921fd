use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::collection::{next_record_id, MockCollection};
use super::store::{Placement, Record};
use super::{CatalogError, ValidationError};
use crate::locale::{Locale, LocalizedText};

/// Pipeline position of a customer inquiry. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadStatus {
    New,
    Contacted,
    SiteVisit,
    Quoted,
    InProgress,
    Completed,
    Cancelled,
}

impl LeadStatus {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::New,
            Self::Contacted,
            Self::SiteVisit,
            Self::Quoted,
            Self::InProgress,
            Self::Completed,
            Self::Cancelled,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::SiteVisit => "site-visit",
            Self::Quoted => "quoted",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::New, Locale::En) => "New",
            (Self::New, Locale::Ar) => "جديد",
            (Self::Contacted, Locale::En) => "Contacted",
            (Self::Contacted, Locale::Ar) => "تم التواصل",
            (Self::SiteVisit, Locale::En) => "Site Visit",
            (Self::SiteVisit, Locale::Ar) => "معاينة",
            (Self::Quoted, Locale::En) => "Quoted",
            (Self::Quoted, Locale::Ar) => "تم التسعير",
            (Self::InProgress, Locale::En) => "In Progress",
            (Self::InProgress, Locale::Ar) => "قيد التنفيذ",
            (Self::Completed, Locale::En) => "Completed",
            (Self::Completed, Locale::Ar) => "مكتمل",
            (Self::Cancelled, Locale::En) => "Cancelled",
            (Self::Cancelled, Locale::Ar) => "ملغي",
        }
    }

    /// Still being worked: neither completed nor cancelled.
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Completed | Self::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub partner_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub service_title: String,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
}

impl Record for Lead {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload of the public request form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    #[serde(default)]
    pub partner_id: String,
    #[serde(default)]
    pub property_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub service_title: String,
}

impl NewLead {
    /// Form-side checks; the API itself accepts whatever it is handed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.customer_name.trim().is_empty() {
            return Err(ValidationError::new("customerName", "name is required"));
        }
        let digits = self
            .customer_phone
            .chars()
            .filter(|c| c.is_ascii_digit())
            .count();
        let allowed = self
            .customer_phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-'));
        if !allowed || !(8..=15).contains(&digits) {
            return Err(ValidationError::new(
                "customerPhone",
                "phone must contain 8 to 15 digits",
            ));
        }
        if self.service_title.trim().is_empty() {
            return Err(ValidationError::new("serviceTitle", "service is required"));
        }
        Ok(())
    }
}

/// Dashboard edit of the working fields. `None` leaves a field untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadUpdate {
    #[serde(default)]
    pub status: Option<LeadStatus>,
    #[serde(default)]
    pub manager_id: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub internal_notes: Option<String>,
}

impl LeadUpdate {
    fn apply(&self, lead: &mut Lead) {
        if let Some(status) = self.status {
            lead.status = status;
        }
        if let Some(manager_id) = &self.manager_id {
            lead.manager_id = Some(manager_id.clone());
        }
        if let Some(assigned_to) = &self.assigned_to {
            lead.assigned_to = Some(assigned_to.clone());
        }
        if let Some(notes) = &self.internal_notes {
            lead.internal_notes = Some(notes.clone());
        }
    }
}

/// Mock API over the lead collection.
#[derive(Clone)]
pub struct LeadsApi {
    leads: MockCollection<Lead>,
}

impl LeadsApi {
    pub fn new(leads: MockCollection<Lead>) -> Self {
        Self { leads }
    }

    pub async fn add_lead(&self, form: NewLead) -> Result<Lead, CatalogError> {
        let now = Utc::now();
        let lead = Lead {
            id: next_record_id("lead"),
            partner_id: form.partner_id,
            property_id: form.property_id,
            customer_name: form.customer_name.trim().to_string(),
            customer_phone: form.customer_phone.trim().to_string(),
            service_title: form.service_title.trim().to_string(),
            status: LeadStatus::New,
            created_at: now,
            updated_at: now,
            manager_id: None,
            assigned_to: None,
            internal_notes: None,
        };
        self.leads.create(lead, Placement::Front).await
    }

    pub async fn get_all_leads(&self) -> Result<Vec<Lead>, CatalogError> {
        self.leads.all().await
    }

    pub async fn get_lead(&self, id: &str) -> Result<Option<Lead>, CatalogError> {
        self.leads.find(id).await
    }

    pub async fn get_leads_by_partner(&self, partner_id: &str) -> Result<Vec<Lead>, CatalogError> {
        self.leads
            .filter(|lead| lead.partner_id == partner_id)
            .await
    }

    pub async fn get_leads_by_status(&self, status: LeadStatus) -> Result<Vec<Lead>, CatalogError> {
        self.leads.filter(|lead| lead.status == status).await
    }

    pub async fn update_lead_status(
        &self,
        id: &str,
        status: LeadStatus,
    ) -> Result<Option<Lead>, CatalogError> {
        self.leads
            .modify(id, |lead| {
                lead.status = status;
                lead.updated_at = Utc::now();
            })
            .await
    }

    pub async fn update_lead(
        &self,
        id: &str,
        update: LeadUpdate,
    ) -> Result<Option<Lead>, CatalogError> {
        self.leads
            .modify(id, |lead| {
                update.apply(lead);
                lead.updated_at = Utc::now();
            })
            .await
    }

    pub async fn delete_lead(&self, id: &str) -> Result<bool, CatalogError> {
        self.leads.remove(id).await
    }
}

/// Localized service names offered on the public request form.
pub fn service_catalog() -> Vec<LocalizedText> {
    vec![
        LocalizedText::text("تشطيب مطبخ", "Kitchen"),
        LocalizedText::text("تشطيب حمام", "Bathroom"),
        LocalizedText::text("تشطيب كامل", "Full Finishing"),
        LocalizedText::text("ديكور داخلي", "Interior Decoration"),
        LocalizedText::text("استشارة عقارية", "Property Consultation"),
    ]
}
