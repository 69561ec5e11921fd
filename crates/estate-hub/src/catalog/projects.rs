use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::collection::{next_record_id, MockCollection};
use super::store::{Placement, Record};
use super::CatalogError;
use crate::locale::{Locale, LocalizedText};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Planned,
    UnderConstruction,
    Delivered,
}

impl ProjectStatus {
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Planned, Locale::En) => "Planned",
            (Self::Planned, Locale::Ar) => "مخطط",
            (Self::UnderConstruction, Locale::En) => "Under Construction",
            (Self::UnderConstruction, Locale::Ar) => "تحت الإنشاء",
            (Self::Delivered, Locale::En) => "Delivered",
            (Self::Delivered, Locale::Ar) => "تم التسليم",
        }
    }
}

/// Compound or tower launched by a developer partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub partner_id: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub location: LocalizedText,
    pub units: u32,
    pub delivery: NaiveDate,
    pub status: ProjectStatus,
}

impl Record for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub partner_id: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub location: LocalizedText,
    pub units: u32,
    pub delivery: NaiveDate,
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub name: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub units: Option<u32>,
    pub delivery: Option<NaiveDate>,
    pub status: Option<ProjectStatus>,
}

#[derive(Clone)]
pub struct ProjectsApi {
    projects: MockCollection<Project>,
}

impl ProjectsApi {
    pub fn new(projects: MockCollection<Project>) -> Self {
        Self { projects }
    }

    pub async fn get_projects(&self) -> Result<Vec<Project>, CatalogError> {
        self.projects.all().await
    }

    pub async fn get_project(&self, id: &str) -> Result<Option<Project>, CatalogError> {
        self.projects.find(id).await
    }

    pub async fn get_projects_by_partner(
        &self,
        partner_id: &str,
    ) -> Result<Vec<Project>, CatalogError> {
        self.projects
            .filter(|project| project.partner_id == partner_id)
            .await
    }

    pub async fn add_project(&self, form: NewProject) -> Result<Project, CatalogError> {
        let project = Project {
            id: next_record_id("project"),
            partner_id: form.partner_id,
            name: form.name,
            description: form.description,
            location: form.location,
            units: form.units,
            delivery: form.delivery,
            status: form.status,
        };
        self.projects.create(project, Placement::Back).await
    }

    pub async fn update_project(
        &self,
        id: &str,
        update: ProjectUpdate,
    ) -> Result<Option<Project>, CatalogError> {
        self.projects
            .modify(id, |project| {
                if let Some(name) = &update.name {
                    project.name = name.clone();
                }
                if let Some(description) = &update.description {
                    project.description = description.clone();
                }
                if let Some(units) = update.units {
                    project.units = units;
                }
                if let Some(delivery) = update.delivery {
                    project.delivery = delivery;
                }
                if let Some(status) = update.status {
                    project.status = status;
                }
            })
            .await
    }

    pub async fn delete_project(&self, id: &str) -> Result<bool, CatalogError> {
        self.projects.remove(id).await
    }
}
