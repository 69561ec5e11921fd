use serde::{Deserialize, Serialize};

use super::collection::MockCollection;
use super::partners::PartnerType;
use super::store::Record;
use super::CatalogError;
use crate::locale::{Locale, LocalizedText};

/// Partner categories a subscription plan is sold to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanAudience {
    Developers,
    Agencies,
    ServiceProviders,
    Individuals,
}

impl PlanAudience {
    /// Audience a partner category buys from; admins never subscribe.
    pub const fn for_partner(partner_type: PartnerType) -> Option<Self> {
        match partner_type {
            PartnerType::Developer => Some(Self::Developers),
            PartnerType::Agency => Some(Self::Agencies),
            PartnerType::Finishing | PartnerType::Decorations => Some(Self::ServiceProviders),
            PartnerType::Individual => Some(Self::Individuals),
            PartnerType::Admin => None,
        }
    }

    pub fn accepts(self, partner_type: PartnerType) -> bool {
        Self::for_partner(partner_type) == Some(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanTier {
    Basic,
    Professional,
    Elite,
}

impl PlanTier {
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Basic, Locale::En) => "Basic",
            (Self::Basic, Locale::Ar) => "أساسية",
            (Self::Professional, Locale::En) => "Professional",
            (Self::Professional, Locale::Ar) => "احترافية",
            (Self::Elite, Locale::En) => "Elite",
            (Self::Elite, Locale::Ar) => "النخبة",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub id: String,
    pub audience: PlanAudience,
    pub tier: PlanTier,
    pub name: LocalizedText,
    #[serde(default)]
    pub features: Vec<LocalizedText>,
    pub monthly_price: u32,
    /// `None` means unlimited listings.
    #[serde(default)]
    pub listing_limit: Option<u32>,
}

impl Record for SubscriptionPlan {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanUpdate {
    pub name: Option<LocalizedText>,
    pub features: Option<Vec<LocalizedText>>,
    pub monthly_price: Option<u32>,
    /// `Some(None)` lifts the limit.
    #[serde(default, with = "double_option")]
    pub listing_limit: Option<Option<u32>>,
}

mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(super) fn serialize<S>(value: &Option<Option<u32>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.flatten().serialize(serializer)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<u32>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<u32>::deserialize(deserializer).map(Some)
    }
}

#[derive(Clone)]
pub struct PlansApi {
    plans: MockCollection<SubscriptionPlan>,
}

impl PlansApi {
    pub fn new(plans: MockCollection<SubscriptionPlan>) -> Self {
        Self { plans }
    }

    pub async fn get_plans(&self) -> Result<Vec<SubscriptionPlan>, CatalogError> {
        let mut plans = self.plans.all().await?;
        plans.sort_by_key(|plan| (plan.audience, plan.tier));
        Ok(plans)
    }

    pub async fn get_plans_for(
        &self,
        partner_type: PartnerType,
    ) -> Result<Vec<SubscriptionPlan>, CatalogError> {
        let mut plans = self
            .plans
            .filter(|plan| plan.audience.accepts(partner_type))
            .await?;
        plans.sort_by_key(|plan| plan.tier);
        Ok(plans)
    }

    pub async fn get_plan(&self, id: &str) -> Result<Option<SubscriptionPlan>, CatalogError> {
        self.plans.find(id).await
    }

    pub async fn update_plan(
        &self,
        id: &str,
        update: PlanUpdate,
    ) -> Result<Option<SubscriptionPlan>, CatalogError> {
        self.plans
            .modify(id, |plan| {
                if let Some(name) = &update.name {
                    plan.name = name.clone();
                }
                if let Some(features) = &update.features {
                    plan.features = features.clone();
                }
                if let Some(price) = update.monthly_price {
                    plan.monthly_price = price;
                }
                if let Some(limit) = update.listing_limit {
                    plan.listing_limit = limit;
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockLatency;

    fn plan(id: &str, audience: PlanAudience, tier: PlanTier) -> SubscriptionPlan {
        SubscriptionPlan {
            id: id.to_string(),
            audience,
            tier,
            name: LocalizedText::text("باقة", "Plan"),
            features: Vec::new(),
            monthly_price: 500,
            listing_limit: Some(10),
        }
    }

    #[test]
    fn audience_follows_partner_category() {
        assert!(PlanAudience::ServiceProviders.accepts(PartnerType::Decorations));
        assert!(PlanAudience::ServiceProviders.accepts(PartnerType::Finishing));
        assert!(!PlanAudience::Agencies.accepts(PartnerType::Developer));
        assert_eq!(PlanAudience::for_partner(PartnerType::Admin), None);
    }

    #[test]
    fn update_distinguishes_missing_and_null_limit() {
        let untouched: PlanUpdate = serde_json::from_str(r#"{"monthlyPrice": 900}"#).expect("parse");
        assert_eq!(untouched.listing_limit, None);

        let lifted: PlanUpdate = serde_json::from_str(r#"{"listingLimit": null}"#).expect("parse");
        assert_eq!(lifted.listing_limit, Some(None));
    }

    #[tokio::test]
    async fn plans_for_partner_are_ordered_by_tier() {
        let api = PlansApi::new(MockCollection::in_memory(
            "plans",
            vec![
                plan("svc-elite", PlanAudience::ServiceProviders, PlanTier::Elite),
                plan("dev-basic", PlanAudience::Developers, PlanTier::Basic),
                plan("svc-basic", PlanAudience::ServiceProviders, PlanTier::Basic),
            ],
            MockLatency::none(),
        ));

        let ids: Vec<String> = api
            .get_plans_for(PartnerType::Finishing)
            .await
            .expect("plans")
            .into_iter()
            .map(|plan| plan.id)
            .collect();
        assert_eq!(ids, ["svc-basic", "svc-elite"]);

        let updated = api
            .update_plan(
                "svc-basic",
                PlanUpdate {
                    listing_limit: Some(None),
                    ..PlanUpdate::default()
                },
            )
            .await
            .expect("update")
            .expect("present");
        assert_eq!(updated.listing_limit, None);
    }
}
