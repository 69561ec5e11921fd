use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::collection::{next_record_id, MockCollection};
use super::store::{Placement, Record};
use super::{CatalogError, ValidationError};
use crate::locale::{Locale, LocalizedText};

/// Category of a partner, used for grouping and plan eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartnerType {
    Developer,
    Agency,
    Finishing,
    Decorations,
    Admin,
    Individual,
}

impl PartnerType {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Developer,
            Self::Agency,
            Self::Finishing,
            Self::Decorations,
            Self::Admin,
            Self::Individual,
        ]
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Developer, Locale::En) => "Developer",
            (Self::Developer, Locale::Ar) => "مطور عقاري",
            (Self::Agency, Locale::En) => "Agency",
            (Self::Agency, Locale::Ar) => "وكالة عقارية",
            (Self::Finishing, Locale::En) => "Finishing Company",
            (Self::Finishing, Locale::Ar) => "شركة تشطيبات",
            (Self::Decorations, Locale::En) => "Decorations",
            (Self::Decorations, Locale::Ar) => "ديكورات",
            (Self::Admin, Locale::En) => "Administrator",
            (Self::Admin, Locale::Ar) => "مدير",
            (Self::Individual, Locale::En) => "Individual",
            (Self::Individual, Locale::Ar) => "فرد",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartnerStatus {
    Pending,
    Active,
}

/// Category-specific details. Each partner carries exactly one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum PartnerProfile {
    Developer {
        headquarters: LocalizedText,
        #[serde(default)]
        project_ids: Vec<String>,
    },
    Agency {
        office: LocalizedText,
        licensed_agents: u16,
    },
    Finishing {
        #[serde(default)]
        services: Vec<LocalizedText>,
    },
    Decorations {
        #[serde(default)]
        specialties: Vec<LocalizedText>,
    },
    Admin,
    Individual {
        phone: String,
    },
}

impl PartnerProfile {
    pub const fn partner_type(&self) -> PartnerType {
        match self {
            Self::Developer { .. } => PartnerType::Developer,
            Self::Agency { .. } => PartnerType::Agency,
            Self::Finishing { .. } => PartnerType::Finishing,
            Self::Decorations { .. } => PartnerType::Decorations,
            Self::Admin => PartnerType::Admin,
            Self::Individual { .. } => PartnerType::Individual,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub plan_id: String,
    pub ends_on: NaiveDate,
}

impl Subscription {
    pub fn is_current(&self, today: NaiveDate) -> bool {
        today <= self.ends_on
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub email: String,
    /// Plaintext mock credential; never serialized.
    #[serde(skip_serializing, default)]
    pub password: String,
    pub status: PartnerStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,
    pub joined_on: NaiveDate,
    pub profile: PartnerProfile,
}

impl Partner {
    pub const fn partner_type(&self) -> PartnerType {
        self.profile.partner_type()
    }
}

impl Record for Partner {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPartner {
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub email: String,
    pub password: String,
    pub profile: PartnerProfile,
}

impl NewPartner {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_incomplete() {
            return Err(ValidationError::new(
                "name",
                "name is required in Arabic and English",
            ));
        }
        let email = self.email.trim();
        let well_formed = email
            .split_once('@')
            .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
        if !well_formed {
            return Err(ValidationError::new("email", "email address is malformed"));
        }
        if self.password.chars().count() < 6 {
            return Err(ValidationError::new(
                "password",
                "password must have at least 6 characters",
            ));
        }
        Ok(())
    }
}

/// Edit of the public profile; each localized field updates both locales together.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerUpdate {
    pub name: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub email: Option<String>,
    pub profile: Option<PartnerProfile>,
}

#[derive(Clone)]
pub struct PartnersApi {
    partners: MockCollection<Partner>,
}

impl PartnersApi {
    pub fn new(partners: MockCollection<Partner>) -> Self {
        Self { partners }
    }

    pub async fn get_all_partners(&self) -> Result<Vec<Partner>, CatalogError> {
        self.partners.all().await
    }

    pub async fn get_partner_by_id(&self, id: &str) -> Result<Option<Partner>, CatalogError> {
        self.partners.find(id).await
    }

    pub async fn get_partners_by_type(
        &self,
        partner_type: PartnerType,
    ) -> Result<Vec<Partner>, CatalogError> {
        self.partners
            .filter(|partner| partner.partner_type() == partner_type)
            .await
    }

    /// Active partners only, as shown on the public site.
    pub async fn get_public_partners(
        &self,
        partner_type: Option<PartnerType>,
    ) -> Result<Vec<Partner>, CatalogError> {
        self.partners
            .filter(|partner| {
                partner.status == PartnerStatus::Active
                    && partner.partner_type() != PartnerType::Admin
                    && partner_type.map_or(true, |wanted| partner.partner_type() == wanted)
            })
            .await
    }

    /// Registrations start pending until an admin activates them.
    pub async fn add_partner(&self, form: NewPartner) -> Result<Partner, CatalogError> {
        let partner = Partner {
            id: next_record_id("partner"),
            name: form.name,
            description: form.description,
            email: form.email.trim().to_ascii_lowercase(),
            password: form.password,
            status: PartnerStatus::Pending,
            subscription: None,
            joined_on: Utc::now().date_naive(),
            profile: form.profile,
        };
        self.partners.create(partner, Placement::Back).await
    }

    pub async fn update_partner(
        &self,
        id: &str,
        update: PartnerUpdate,
    ) -> Result<Option<Partner>, CatalogError> {
        self.partners
            .modify(id, |partner| {
                if let Some(name) = &update.name {
                    partner.name = name.clone();
                }
                if let Some(description) = &update.description {
                    partner.description = description.clone();
                }
                if let Some(email) = &update.email {
                    partner.email = email.trim().to_ascii_lowercase();
                }
                if let Some(profile) = &update.profile {
                    partner.profile = profile.clone();
                }
            })
            .await
    }

    pub async fn set_partner_status(
        &self,
        id: &str,
        status: PartnerStatus,
    ) -> Result<Option<Partner>, CatalogError> {
        self.partners
            .modify(id, |partner| partner.status = status)
            .await
    }

    pub async fn assign_subscription(
        &self,
        id: &str,
        subscription: Subscription,
    ) -> Result<Option<Partner>, CatalogError> {
        self.partners
            .modify(id, |partner| partner.subscription = Some(subscription.clone()))
            .await
    }

    pub async fn delete_partner(&self, id: &str) -> Result<bool, CatalogError> {
        self.partners.remove(id).await
    }

    /// Static credential lookup used by the dashboards' sign-in form.
    pub async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Partner>, CatalogError> {
        let email = email.trim().to_ascii_lowercase();
        let mut matches = self
            .partners
            .filter(|partner| partner.email == email && partner.password == password)
            .await?;
        Ok(matches.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockLatency;

    fn api() -> PartnersApi {
        PartnersApi::new(MockCollection::in_memory(
            "partners",
            Vec::new(),
            MockLatency::none(),
        ))
    }

    fn finishing_form() -> NewPartner {
        NewPartner {
            name: LocalizedText::text("لمسة للتشطيبات", "Lamsa Finishing"),
            description: LocalizedText::text("تشطيبات متكاملة", "Turnkey finishing"),
            email: " Info@Lamsa.example ".to_string(),
            password: "secret-pass".to_string(),
            profile: PartnerProfile::Finishing {
                services: vec![LocalizedText::text("مطابخ", "Kitchens")],
            },
        }
    }

    #[test]
    fn profile_serializes_with_type_tag() {
        let value = serde_json::to_value(PartnerProfile::Agency {
            office: LocalizedText::text("المعادي", "Maadi"),
            licensed_agents: 4,
        })
        .expect("serializes");
        assert_eq!(value["type"], "agency");
        assert_eq!(value["licensedAgents"], 4);
    }

    #[tokio::test]
    async fn registrations_start_pending_and_hidden() {
        let api = api();
        let partner = api.add_partner(finishing_form()).await.expect("add");
        assert_eq!(partner.status, PartnerStatus::Pending);
        assert_eq!(partner.email, "info@lamsa.example");
        assert_eq!(partner.partner_type(), PartnerType::Finishing);
        assert!(api
            .get_public_partners(None)
            .await
            .expect("list")
            .is_empty());

        api.set_partner_status(&partner.id, PartnerStatus::Active)
            .await
            .expect("activate")
            .expect("present");
        let visible = api
            .get_public_partners(Some(PartnerType::Finishing))
            .await
            .expect("list");
        assert_eq!(visible.len(), 1);
    }

    #[tokio::test]
    async fn name_update_changes_both_locales() {
        let api = api();
        let partner = api.add_partner(finishing_form()).await.expect("add");

        let updated = api
            .update_partner(
                &partner.id,
                PartnerUpdate {
                    name: Some(LocalizedText::text("لمسة برو", "Lamsa Pro")),
                    ..PartnerUpdate::default()
                },
            )
            .await
            .expect("update")
            .expect("present");

        assert_eq!(updated.name.ar, "لمسة برو");
        assert_eq!(updated.name.en, "Lamsa Pro");
        assert_eq!(updated.description, partner.description);
    }

    #[tokio::test]
    async fn credentials_are_matched_case_insensitively_on_email() {
        let api = api();
        api.add_partner(finishing_form()).await.expect("add");

        assert!(api
            .find_by_credentials("INFO@lamsa.example", "secret-pass")
            .await
            .expect("lookup")
            .is_some());
        assert!(api
            .find_by_credentials("info@lamsa.example", "wrong")
            .await
            .expect("lookup")
            .is_none());
    }
}
