//! Dashboard roles derived from the partner record itself.

use serde::Serialize;

use crate::catalog::{Partner, PartnerStatus, PartnerType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Partner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Property,
    Lead,
    PortfolioItem,
    Project,
    Partner,
    Plan,
    FilterOption,
    DecorationCategory,
}

impl Resource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Lead => "lead",
            Self::PortfolioItem => "portfolio item",
            Self::Project => "project",
            Self::Partner => "partner",
            Self::Plan => "plan",
            Self::FilterOption => "filter option",
            Self::DecorationCategory => "decoration category",
        }
    }

    /// Resources only administrators may change.
    pub const fn is_admin_only(self) -> bool {
        matches!(
            self,
            Self::Partner | Self::Plan | Self::FilterOption | Self::DecorationCategory
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("unknown partner '{0}'")]
    UnknownPartner(String),
    #[error("partner '{0}' is awaiting approval")]
    PendingApproval(String),
    #[error("not allowed to modify this {}", .0.label())]
    Forbidden(Resource),
}

/// The signed-in partner as the dashboard sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub partner_id: String,
    pub role: Role,
    pub partner_type: PartnerType,
}

impl Principal {
    pub fn from_partner(partner: &Partner) -> Result<Self, AccessError> {
        let partner_type = partner.partner_type();
        let role = match (partner_type, partner.status) {
            (PartnerType::Admin, _) => Role::Admin,
            (_, PartnerStatus::Active) => Role::Partner,
            (_, PartnerStatus::Pending) => {
                return Err(AccessError::PendingApproval(partner.id.clone()))
            }
        };
        Ok(Self {
            partner_id: partner.id.clone(),
            role,
            partner_type,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Partner id reads are restricted to, or `None` when everything is visible.
    pub fn scope(&self) -> Option<&str> {
        match self.role {
            Role::Admin => None,
            Role::Partner => Some(&self.partner_id),
        }
    }

    pub fn can_modify(&self, resource: Resource, owner_id: &str) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Partner => !resource.is_admin_only() && owner_id == self.partner_id,
        }
    }

    pub fn ensure_can_modify(&self, resource: Resource, owner_id: &str) -> Result<(), AccessError> {
        if self.can_modify(resource, owner_id) {
            Ok(())
        } else {
            Err(AccessError::Forbidden(resource))
        }
    }

    pub fn ensure_admin(&self, resource: Resource) -> Result<(), AccessError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AccessError::Forbidden(resource))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn principal(id: &str) -> Result<Principal, AccessError> {
        let partners = seed::demo_catalog().partners;
        let partner = partners
            .iter()
            .find(|partner| partner.id == id)
            .expect("seeded partner");
        Principal::from_partner(partner)
    }

    #[test]
    fn admin_profile_grants_admin_role() {
        let admin = principal(seed::ADMIN_PARTNER_ID).expect("admin");
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.scope(), None);
        assert!(admin.can_modify(Resource::Plan, "anyone"));
        assert!(admin.ensure_admin(Resource::Partner).is_ok());
    }

    #[test]
    fn partners_only_touch_their_own_records() {
        let agency = principal(seed::AGENCY_PARTNER_ID).expect("active agency");
        assert_eq!(agency.role, Role::Partner);
        assert_eq!(agency.scope(), Some(seed::AGENCY_PARTNER_ID));

        assert!(agency
            .ensure_can_modify(Resource::Property, seed::AGENCY_PARTNER_ID)
            .is_ok());
        assert_eq!(
            agency.ensure_can_modify(Resource::Lead, seed::DEVELOPER_PARTNER_ID),
            Err(AccessError::Forbidden(Resource::Lead))
        );
        assert_eq!(
            agency.ensure_can_modify(Resource::Plan, seed::AGENCY_PARTNER_ID),
            Err(AccessError::Forbidden(Resource::Plan))
        );
        assert!(agency.ensure_admin(Resource::Partner).is_err());
    }

    #[test]
    fn pending_partners_have_no_dashboard() {
        assert_eq!(
            principal(seed::PENDING_PARTNER_ID),
            Err(AccessError::PendingApproval(seed::PENDING_PARTNER_ID.to_string()))
        );
    }

    #[test]
    fn forbidden_message_names_the_resource() {
        let error = AccessError::Forbidden(Resource::DecorationCategory);
        assert_eq!(error.to_string(), "not allowed to modify this decoration category");
    }
}
