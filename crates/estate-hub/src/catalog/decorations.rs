use serde::{Deserialize, Serialize};

use super::collection::{next_record_id, MockCollection};
use super::store::{Placement, Record};
use super::CatalogError;
use crate::locale::LocalizedText;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationItem {
    pub id: String,
    pub name: LocalizedText,
    pub price: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationCategory {
    pub id: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub image_url: String,
    #[serde(default)]
    pub items: Vec<DecorationItem>,
}

impl Record for DecorationCategory {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDecorationCategory {
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDecorationItem {
    pub name: LocalizedText,
    pub price: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationCategoryUpdate {
    pub name: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub image_url: Option<String>,
}

#[derive(Clone)]
pub struct DecorationsApi {
    categories: MockCollection<DecorationCategory>,
}

impl DecorationsApi {
    pub fn new(categories: MockCollection<DecorationCategory>) -> Self {
        Self { categories }
    }

    pub async fn get_categories(&self) -> Result<Vec<DecorationCategory>, CatalogError> {
        self.categories.all().await
    }

    pub async fn get_category(
        &self,
        id: &str,
    ) -> Result<Option<DecorationCategory>, CatalogError> {
        self.categories.find(id).await
    }

    pub async fn add_category(
        &self,
        form: NewDecorationCategory,
    ) -> Result<DecorationCategory, CatalogError> {
        let category = DecorationCategory {
            id: next_record_id("decoration"),
            name: form.name,
            description: form.description,
            image_url: form.image_url,
            items: Vec::new(),
        };
        self.categories.create(category, Placement::Back).await
    }

    pub async fn update_category(
        &self,
        id: &str,
        update: DecorationCategoryUpdate,
    ) -> Result<Option<DecorationCategory>, CatalogError> {
        self.categories
            .modify(id, |category| {
                if let Some(name) = &update.name {
                    category.name = name.clone();
                }
                if let Some(description) = &update.description {
                    category.description = description.clone();
                }
                if let Some(image_url) = &update.image_url {
                    category.image_url = image_url.clone();
                }
            })
            .await
    }

    /// Appends an item to a category; `None` when the category does not exist.
    pub async fn add_item(
        &self,
        category_id: &str,
        form: NewDecorationItem,
    ) -> Result<Option<DecorationCategory>, CatalogError> {
        let item = DecorationItem {
            id: next_record_id("decoration-item"),
            name: form.name,
            price: form.price,
        };
        self.categories
            .modify(category_id, |category| category.items.push(item.clone()))
            .await
    }

    pub async fn remove_item(
        &self,
        category_id: &str,
        item_id: &str,
    ) -> Result<bool, CatalogError> {
        let mut removed = false;
        self.categories
            .modify(category_id, |category| {
                let before = category.items.len();
                category.items.retain(|item| item.id != item_id);
                removed = category.items.len() < before;
            })
            .await?;
        Ok(removed)
    }

    pub async fn delete_category(&self, id: &str) -> Result<bool, CatalogError> {
        self.categories.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockLatency;

    #[tokio::test]
    async fn items_attach_to_existing_categories_only() {
        let api = DecorationsApi::new(MockCollection::in_memory(
            "decorations",
            Vec::new(),
            MockLatency::none(),
        ));
        let category = api
            .add_category(NewDecorationCategory {
                name: LocalizedText::text("إضاءة", "Lighting"),
                description: LocalizedText::text("ثريات", "Chandeliers"),
                image_url: "/images/lighting.jpg".to_string(),
            })
            .await
            .expect("add category");

        let item = NewDecorationItem {
            name: LocalizedText::text("ثريا كريستال", "Crystal chandelier"),
            price: 18_500,
        };
        let updated = api
            .add_item(&category.id, item.clone())
            .await
            .expect("add item")
            .expect("category present");
        assert_eq!(updated.items.len(), 1);

        assert!(api
            .add_item("decoration-missing", item)
            .await
            .expect("resolves")
            .is_none());

        let item_id = updated.items[0].id.clone();
        assert!(api.remove_item(&category.id, &item_id).await.expect("remove"));
        assert!(!api.remove_item(&category.id, &item_id).await.expect("remove again"));
    }
}
