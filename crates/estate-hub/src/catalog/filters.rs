use serde::{Deserialize, Serialize};

use super::collection::{next_record_id, MockCollection};
use super::store::{Placement, Record};
use super::CatalogError;
use crate::locale::LocalizedText;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterGroup {
    City,
    PropertyType,
    FinishingType,
    Amenity,
}

/// A selectable value in one of the public search filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOption {
    pub id: String,
    pub group: FilterGroup,
    pub label: LocalizedText,
    pub value: String,
}

impl Record for FilterOption {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFilterOption {
    pub group: FilterGroup,
    pub label: LocalizedText,
    pub value: String,
}

#[derive(Clone)]
pub struct FiltersApi {
    options: MockCollection<FilterOption>,
}

impl FiltersApi {
    pub fn new(options: MockCollection<FilterOption>) -> Self {
        Self { options }
    }

    pub async fn get_filter_options(&self) -> Result<Vec<FilterOption>, CatalogError> {
        self.options.all().await
    }

    pub async fn get_filter_group(
        &self,
        group: FilterGroup,
    ) -> Result<Vec<FilterOption>, CatalogError> {
        self.options.filter(|option| option.group == group).await
    }

    pub async fn add_filter_option(
        &self,
        form: NewFilterOption,
    ) -> Result<FilterOption, CatalogError> {
        let option = FilterOption {
            id: next_record_id("filter"),
            group: form.group,
            label: form.label,
            value: form.value.trim().to_ascii_lowercase(),
        };
        self.options.create(option, Placement::Back).await
    }

    pub async fn update_filter_label(
        &self,
        id: &str,
        label: LocalizedText,
    ) -> Result<Option<FilterOption>, CatalogError> {
        self.options
            .modify(id, |option| option.label = label.clone())
            .await
    }

    pub async fn delete_filter_option(&self, id: &str) -> Result<bool, CatalogError> {
        self.options.remove(id).await
    }
}
