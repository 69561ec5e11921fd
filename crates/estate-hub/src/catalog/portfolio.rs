use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::collection::{next_record_id, MockCollection};
use super::store::{Placement, Record};
use super::CatalogError;
use crate::locale::LocalizedText;

/// Finished job showcased on a finishing or decorations partner's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: String,
    pub partner_id: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<NaiveDate>,
}

impl Record for PortfolioItem {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolioItem {
    pub partner_id: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub image_url: String,
    #[serde(default)]
    pub completed_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioUpdate {
    pub title: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub image_url: Option<String>,
    pub completed_on: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct PortfolioApi {
    items: MockCollection<PortfolioItem>,
}

impl PortfolioApi {
    pub fn new(items: MockCollection<PortfolioItem>) -> Self {
        Self { items }
    }

    pub async fn get_portfolio(&self) -> Result<Vec<PortfolioItem>, CatalogError> {
        self.items.all().await
    }

    pub async fn get_portfolio_item(&self, id: &str) -> Result<Option<PortfolioItem>, CatalogError> {
        self.items.find(id).await
    }

    pub async fn get_portfolio_by_partner(
        &self,
        partner_id: &str,
    ) -> Result<Vec<PortfolioItem>, CatalogError> {
        self.items.filter(|item| item.partner_id == partner_id).await
    }

    pub async fn add_portfolio_item(
        &self,
        form: NewPortfolioItem,
    ) -> Result<PortfolioItem, CatalogError> {
        let item = PortfolioItem {
            id: next_record_id("portfolio"),
            partner_id: form.partner_id,
            title: form.title,
            description: form.description,
            image_url: form.image_url,
            completed_on: form.completed_on,
        };
        self.items.create(item, Placement::Front).await
    }

    pub async fn update_portfolio_item(
        &self,
        id: &str,
        update: PortfolioUpdate,
    ) -> Result<Option<PortfolioItem>, CatalogError> {
        self.items
            .modify(id, |item| {
                if let Some(title) = &update.title {
                    item.title = title.clone();
                }
                if let Some(description) = &update.description {
                    item.description = description.clone();
                }
                if let Some(image_url) = &update.image_url {
                    item.image_url = image_url.clone();
                }
                if update.completed_on.is_some() {
                    item.completed_on = update.completed_on;
                }
            })
            .await
    }

    pub async fn delete_portfolio_item(&self, id: &str) -> Result<bool, CatalogError> {
        self.items.remove(id).await
    }
}
