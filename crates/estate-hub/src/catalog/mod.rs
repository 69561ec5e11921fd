//! In-memory catalog standing in for the marketplace backend.
//!
//! Each API reads or mutates its own collection after a simulated network
//! delay. Missing records are reported through `None`/`false`, never as errors;
//! errors are reserved for the store itself failing.

pub mod collection;
pub mod decorations;
pub mod filters;
pub mod leads;
pub mod partners;
pub mod plans;
pub mod portfolio;
pub mod projects;
pub mod properties;
pub mod router;
pub mod store;

use serde::Serialize;

use crate::config::MockLatency;
use crate::seed;

pub use collection::MockCollection;
pub use decorations::{
    DecorationCategory, DecorationCategoryUpdate, DecorationItem, DecorationsApi,
    NewDecorationCategory, NewDecorationItem,
};
pub use filters::{FilterGroup, FilterOption, FiltersApi, NewFilterOption};
pub use leads::{Lead, LeadStatus, LeadUpdate, LeadsApi, NewLead};
pub use partners::{
    NewPartner, Partner, PartnerProfile, PartnerStatus, PartnerType, PartnerUpdate, PartnersApi,
    Subscription,
};
pub use plans::{PlanAudience, PlanTier, PlanUpdate, PlansApi, SubscriptionPlan};
pub use portfolio::{NewPortfolioItem, PortfolioApi, PortfolioItem, PortfolioUpdate};
pub use projects::{NewProject, Project, ProjectStatus, ProjectUpdate, ProjectsApi};
pub use properties::{
    GeoPoint, ListingWindow, NewProperty, PropertiesApi, Property, PropertyKind, PropertyQuery,
    PropertyStatus, PropertyUpdate,
};
pub use router::{catalog_router, CatalogState, PARTNER_HEADER};
pub use store::{InMemoryStore, Placement, Record, RecordStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Rejected form input, raised by the forms before they call the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Every mock API, sharing one latency profile.
#[derive(Clone)]
pub struct Catalog {
    pub properties: PropertiesApi,
    pub partners: PartnersApi,
    pub leads: LeadsApi,
    pub plans: PlansApi,
    pub portfolio: PortfolioApi,
    pub projects: ProjectsApi,
    pub filters: FiltersApi,
    pub decorations: DecorationsApi,
}

impl Catalog {
    /// Empty collections.
    pub fn empty(latency: MockLatency) -> Self {
        Self::from_seed(seed::CatalogSeed::default(), latency)
    }

    /// Collections pre-filled with the bundled demo data.
    pub fn seeded(latency: MockLatency) -> Self {
        Self::from_seed(seed::demo_catalog(), latency)
    }

    pub fn from_seed(seed: seed::CatalogSeed, latency: MockLatency) -> Self {
        Self {
            properties: PropertiesApi::new(MockCollection::in_memory(
                "properties",
                seed.properties,
                latency,
            )),
            partners: PartnersApi::new(MockCollection::in_memory(
                "partners",
                seed.partners,
                latency,
            )),
            leads: LeadsApi::new(MockCollection::in_memory("leads", seed.leads, latency)),
            plans: PlansApi::new(MockCollection::in_memory("plans", seed.plans, latency)),
            portfolio: PortfolioApi::new(MockCollection::in_memory(
                "portfolio",
                seed.portfolio,
                latency,
            )),
            projects: ProjectsApi::new(MockCollection::in_memory(
                "projects",
                seed.projects,
                latency,
            )),
            filters: FiltersApi::new(MockCollection::in_memory(
                "filters",
                seed.filters,
                latency,
            )),
            decorations: DecorationsApi::new(MockCollection::in_memory(
                "decorations",
                seed.decorations,
                latency,
            )),
        }
    }
}
