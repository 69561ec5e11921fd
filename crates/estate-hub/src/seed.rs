//! Bundled demo data loaded into the in-memory catalog at start-up.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::catalog::{
    DecorationCategory, DecorationItem, FilterGroup, FilterOption, GeoPoint, Lead, LeadStatus,
    ListingWindow, Partner, PartnerProfile, PartnerStatus, PlanAudience, PlanTier, PortfolioItem,
    Project, ProjectStatus, Property, PropertyKind, PropertyStatus, Subscription,
    SubscriptionPlan,
};
use crate::locale::LocalizedText;

pub const ADMIN_PARTNER_ID: &str = "partner-admin";
pub const DEVELOPER_PARTNER_ID: &str = "partner-nile-developments";
pub const AGENCY_PARTNER_ID: &str = "partner-delta-realty";
pub const FINISHING_PARTNER_ID: &str = "partner-lamsa-finishing";
pub const DECORATIONS_PARTNER_ID: &str = "partner-bayt-decor";
pub const INDIVIDUAL_PARTNER_ID: &str = "partner-omar-owner";
pub const PENDING_PARTNER_ID: &str = "partner-rawda-design";

/// Initial contents for every collection.
#[derive(Debug, Clone, Default)]
pub struct CatalogSeed {
    pub properties: Vec<Property>,
    pub partners: Vec<Partner>,
    pub leads: Vec<Lead>,
    pub plans: Vec<SubscriptionPlan>,
    pub portfolio: Vec<PortfolioItem>,
    pub projects: Vec<Project>,
    pub filters: Vec<FilterOption>,
    pub decorations: Vec<DecorationCategory>,
}

pub fn demo_catalog() -> CatalogSeed {
    CatalogSeed {
        properties: properties(),
        partners: partners(),
        leads: leads(),
        plans: plans(),
        portfolio: portfolio(),
        projects: projects(),
        filters: filters(),
        decorations: decorations(),
    }
}

fn text(ar: &str, en: &str) -> LocalizedText {
    LocalizedText::text(ar, en)
}

fn day(year: i32, month: u32, date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, date).unwrap_or_default()
}

fn at(year: i32, month: u32, date: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, date, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

fn partners() -> Vec<Partner> {
    vec![
        Partner {
            id: ADMIN_PARTNER_ID.to_string(),
            name: text("إدارة المنصة", "Platform Admin"),
            description: text("فريق إدارة الموقع", "Site administration team"),
            email: "admin@estatehub.example".to_string(),
            password: "admin123".to_string(),
            status: PartnerStatus::Active,
            subscription: None,
            joined_on: day(2024, 1, 2),
            profile: PartnerProfile::Admin,
        },
        Partner {
            id: DEVELOPER_PARTNER_ID.to_string(),
            name: text("النيل للتطوير العقاري", "Nile Developments"),
            description: text(
                "مطور عقاري لمشروعات سكنية متكاملة",
                "Developer of integrated residential communities",
            ),
            email: "sales@niledev.example".to_string(),
            password: "nile2024".to_string(),
            status: PartnerStatus::Active,
            subscription: Some(Subscription {
                plan_id: "plan-developers-elite".to_string(),
                ends_on: day(2026, 3, 31),
            }),
            joined_on: day(2024, 2, 14),
            profile: PartnerProfile::Developer {
                headquarters: text("القاهرة الجديدة", "New Cairo"),
                project_ids: vec![
                    "project-nile-gardens".to_string(),
                    "project-nile-towers".to_string(),
                ],
            },
        },
        Partner {
            id: AGENCY_PARTNER_ID.to_string(),
            name: text("دلتا للعقارات", "Delta Realty"),
            description: text("وكالة بيع وتأجير", "Sales and rentals agency"),
            email: "hello@deltarealty.example".to_string(),
            password: "delta2024".to_string(),
            status: PartnerStatus::Active,
            subscription: Some(Subscription {
                plan_id: "plan-agencies-professional".to_string(),
                ends_on: day(2025, 12, 31),
            }),
            joined_on: day(2024, 5, 3),
            profile: PartnerProfile::Agency {
                office: text("المعادي", "Maadi"),
                licensed_agents: 12,
            },
        },
        Partner {
            id: FINISHING_PARTNER_ID.to_string(),
            name: text("لمسة للتشطيبات", "Lamsa Finishing"),
            description: text("تشطيبات سكنية وتجارية", "Residential and commercial finishing"),
            email: "projects@lamsa.example".to_string(),
            password: "lamsa2024".to_string(),
            status: PartnerStatus::Active,
            subscription: Some(Subscription {
                plan_id: "plan-services-basic".to_string(),
                ends_on: day(2025, 9, 30),
            }),
            joined_on: day(2024, 8, 21),
            profile: PartnerProfile::Finishing {
                services: vec![
                    text("تشطيب مطبخ", "Kitchen"),
                    text("تشطيب حمام", "Bathroom"),
                    text("تشطيب كامل", "Full Finishing"),
                ],
            },
        },
        Partner {
            id: DECORATIONS_PARTNER_ID.to_string(),
            name: text("بيت للديكور", "Bayt Decor"),
            description: text("تصميم داخلي وأثاث", "Interior design and furnishing"),
            email: "studio@baytdecor.example".to_string(),
            password: "bayt2024".to_string(),
            status: PartnerStatus::Active,
            subscription: None,
            joined_on: day(2024, 11, 9),
            profile: PartnerProfile::Decorations {
                specialties: vec![text("إضاءة", "Lighting"), text("ستائر", "Curtains")],
            },
        },
        Partner {
            id: INDIVIDUAL_PARTNER_ID.to_string(),
            name: text("عمر حسن", "Omar Hassan"),
            description: text("مالك يعرض شقته", "Owner listing an apartment"),
            email: "omar@mail.example".to_string(),
            password: "omar2025".to_string(),
            status: PartnerStatus::Active,
            subscription: None,
            joined_on: day(2025, 1, 17),
            profile: PartnerProfile::Individual {
                phone: "01012345678".to_string(),
            },
        },
        Partner {
            id: PENDING_PARTNER_ID.to_string(),
            name: text("روضة للتصميم", "Rawda Design"),
            description: text("ديكورات حديثة", "Modern decorations"),
            email: "info@rawda.example".to_string(),
            password: "rawda2025".to_string(),
            status: PartnerStatus::Pending,
            subscription: None,
            joined_on: day(2025, 2, 26),
            profile: PartnerProfile::Decorations {
                specialties: vec![text("ورق حائط", "Wallpaper")],
            },
        },
    ]
}

fn properties() -> Vec<Property> {
    vec![
        Property {
            id: "property-nile-gardens-b12".to_string(),
            partner_id: DEVELOPER_PARTNER_ID.to_string(),
            title: text("شقة بحديقة في نايل جاردنز", "Garden apartment at Nile Gardens"),
            description: text(
                "شقة ٣ غرف بحديقة خاصة وتشطيب كامل",
                "Three-bedroom apartment with private garden, fully finished",
            ),
            city: text("القاهرة الجديدة", "New Cairo"),
            price_label: text("٤٬٢٠٠٬٠٠٠ ج.م", "EGP 4,200,000"),
            kind: PropertyKind::Apartment,
            status: PropertyStatus::ForSale,
            price: 4_200_000,
            area: 180,
            bedrooms: 3,
            bathrooms: 2,
            amenities: vec![text("حديقة", "Garden"), text("أمن", "Security")],
            location: GeoPoint {
                lat: 30.0301,
                lng: 31.4700,
            },
            listing: ListingWindow {
                start: day(2025, 1, 5),
                end: None,
            },
            featured: true,
        },
        Property {
            id: "property-nile-towers-villa".to_string(),
            partner_id: DEVELOPER_PARTNER_ID.to_string(),
            title: text("فيلا مستقلة", "Standalone villa"),
            description: text("فيلا ٥ غرف مع مسبح", "Five-bedroom villa with pool"),
            city: text("الشيخ زايد", "Sheikh Zayed"),
            price_label: text("١٥٬٠٠٠٬٠٠٠ ج.م", "EGP 15,000,000"),
            kind: PropertyKind::Villa,
            status: PropertyStatus::ForSale,
            price: 15_000_000,
            area: 420,
            bedrooms: 5,
            bathrooms: 4,
            amenities: vec![text("مسبح", "Pool"), text("جراج", "Garage")],
            location: GeoPoint {
                lat: 30.0444,
                lng: 30.9760,
            },
            listing: ListingWindow {
                start: day(2024, 10, 1),
                end: Some(day(2025, 12, 31)),
            },
            featured: false,
        },
        Property {
            id: "property-delta-maadi-rent".to_string(),
            partner_id: AGENCY_PARTNER_ID.to_string(),
            title: text("شقة مفروشة للإيجار", "Furnished apartment for rent"),
            description: text("قريبة من المترو", "Walking distance to the metro"),
            city: text("المعادي", "Maadi"),
            price_label: text("٢٥٬٠٠٠ ج.م / شهر", "EGP 25,000 / month"),
            kind: PropertyKind::Apartment,
            status: PropertyStatus::ForRent,
            price: 25_000,
            area: 140,
            bedrooms: 2,
            bathrooms: 2,
            amenities: vec![text("مفروشة", "Furnished")],
            location: GeoPoint {
                lat: 29.9602,
                lng: 31.2569,
            },
            listing: ListingWindow {
                start: day(2025, 2, 1),
                end: Some(day(2025, 8, 31)),
            },
            featured: false,
        },
        Property {
            id: "property-omar-chalet".to_string(),
            partner_id: INDIVIDUAL_PARTNER_ID.to_string(),
            title: text("شاليه على البحر", "Sea-view chalet"),
            description: text("الساحل الشمالي، صف أول", "North Coast, first row"),
            city: text("الساحل الشمالي", "North Coast"),
            price_label: text("٦٬٥٠٠٬٠٠٠ ج.م", "EGP 6,500,000"),
            kind: PropertyKind::Chalet,
            status: PropertyStatus::Sold,
            price: 6_500_000,
            area: 120,
            bedrooms: 2,
            bathrooms: 1,
            amenities: vec![text("إطلالة بحرية", "Sea view")],
            location: GeoPoint {
                lat: 30.9576,
                lng: 28.8337,
            },
            listing: ListingWindow {
                start: day(2024, 6, 1),
                end: Some(day(2024, 9, 30)),
            },
            featured: false,
        },
    ]
}

fn lead(
    id: &str,
    partner_id: &str,
    customer: (&str, &str),
    service_title: &str,
    status: LeadStatus,
    created_at: DateTime<Utc>,
) -> Lead {
    Lead {
        id: id.to_string(),
        partner_id: partner_id.to_string(),
        property_id: None,
        customer_name: customer.0.to_string(),
        customer_phone: customer.1.to_string(),
        service_title: service_title.to_string(),
        status,
        created_at,
        updated_at: created_at,
        manager_id: None,
        assigned_to: None,
        internal_notes: None,
    }
}

fn leads() -> Vec<Lead> {
    let mut with_property = lead(
        "lead-seed-1",
        DEVELOPER_PARTNER_ID,
        ("Mariam Adel", "01011112222"),
        "Property Consultation",
        LeadStatus::SiteVisit,
        at(2025, 3, 2, 10),
    );
    with_property.property_id = Some("property-nile-gardens-b12".to_string());
    with_property.assigned_to = Some("Sales desk".to_string());

    vec![
        with_property,
        lead(
            "lead-seed-2",
            FINISHING_PARTNER_ID,
            ("Karim Samir", "01022223333"),
            "Kitchen",
            LeadStatus::Quoted,
            at(2025, 2, 20, 14),
        ),
        lead(
            "lead-seed-3",
            FINISHING_PARTNER_ID,
            ("Nour Hany", "01033334444"),
            "Full Finishing",
            LeadStatus::InProgress,
            at(2025, 1, 28, 9),
        ),
        lead(
            "lead-seed-4",
            FINISHING_PARTNER_ID,
            ("Youssef Ali", "01044445555"),
            "Bathroom",
            LeadStatus::Completed,
            at(2024, 12, 11, 16),
        ),
        lead(
            "lead-seed-5",
            AGENCY_PARTNER_ID,
            ("Salma Fathy", "01055556666"),
            "Property Consultation",
            LeadStatus::Contacted,
            at(2025, 2, 3, 11),
        ),
        lead(
            "lead-seed-6",
            DECORATIONS_PARTNER_ID,
            ("Hana Mostafa", "01066667777"),
            "Interior Decoration",
            LeadStatus::New,
            at(2025, 3, 6, 18),
        ),
        lead(
            "lead-seed-7",
            DEVELOPER_PARTNER_ID,
            ("Tarek Nabil", "01077778888"),
            "Property Consultation",
            LeadStatus::Cancelled,
            at(2024, 11, 19, 13),
        ),
    ]
}

fn plan(
    audience: PlanAudience,
    tier: PlanTier,
    name: LocalizedText,
    monthly_price: u32,
    listing_limit: Option<u32>,
    features: Vec<LocalizedText>,
) -> SubscriptionPlan {
    let audience_slug = match audience {
        PlanAudience::Developers => "developers",
        PlanAudience::Agencies => "agencies",
        PlanAudience::ServiceProviders => "services",
        PlanAudience::Individuals => "individuals",
    };
    let tier_slug = match tier {
        PlanTier::Basic => "basic",
        PlanTier::Professional => "professional",
        PlanTier::Elite => "elite",
    };
    SubscriptionPlan {
        id: format!("plan-{audience_slug}-{tier_slug}"),
        audience,
        tier,
        name,
        features,
        monthly_price,
        listing_limit,
    }
}

fn plans() -> Vec<SubscriptionPlan> {
    vec![
        plan(
            PlanAudience::Developers,
            PlanTier::Professional,
            text("باقة المطور", "Developer Professional"),
            7_500,
            Some(50),
            vec![text("صفحة مشروعات", "Projects page")],
        ),
        plan(
            PlanAudience::Developers,
            PlanTier::Elite,
            text("باقة المطور المميزة", "Developer Elite"),
            15_000,
            None,
            vec![
                text("صفحة مشروعات", "Projects page"),
                text("ظهور مميز", "Featured placement"),
            ],
        ),
        plan(
            PlanAudience::Agencies,
            PlanTier::Professional,
            text("باقة الوكالات", "Agency Professional"),
            4_000,
            Some(100),
            vec![text("لوحة العملاء", "Leads dashboard")],
        ),
        plan(
            PlanAudience::ServiceProviders,
            PlanTier::Basic,
            text("باقة مقدمي الخدمات", "Service Basic"),
            1_200,
            Some(10),
            vec![text("معرض أعمال", "Portfolio gallery")],
        ),
        plan(
            PlanAudience::ServiceProviders,
            PlanTier::Elite,
            text("باقة مقدمي الخدمات المميزة", "Service Elite"),
            3_500,
            None,
            vec![
                text("معرض أعمال", "Portfolio gallery"),
                text("أولوية في الطلبات", "Priority requests"),
            ],
        ),
        plan(
            PlanAudience::Individuals,
            PlanTier::Basic,
            text("باقة الأفراد", "Owner Basic"),
            300,
            Some(2),
            vec![text("إعلانان", "Two listings")],
        ),
    ]
}

fn portfolio() -> Vec<PortfolioItem> {
    vec![
        PortfolioItem {
            id: "portfolio-lamsa-kitchen".to_string(),
            partner_id: FINISHING_PARTNER_ID.to_string(),
            title: text("مطبخ مودرن", "Modern kitchen"),
            description: text("خشب بلوط ورخام", "Oak and marble"),
            image_url: "/images/portfolio/lamsa-kitchen.jpg".to_string(),
            completed_on: Some(day(2024, 10, 15)),
        },
        PortfolioItem {
            id: "portfolio-lamsa-villa".to_string(),
            partner_id: FINISHING_PARTNER_ID.to_string(),
            title: text("تشطيب فيلا", "Villa fit-out"),
            description: text("تشطيب كامل ٤٠٠ م", "Full 400 m² fit-out"),
            image_url: "/images/portfolio/lamsa-villa.jpg".to_string(),
            completed_on: Some(day(2024, 7, 1)),
        },
        PortfolioItem {
            id: "portfolio-bayt-living".to_string(),
            partner_id: DECORATIONS_PARTNER_ID.to_string(),
            title: text("غرفة معيشة", "Living room"),
            description: text("إضاءة وستائر", "Lighting and curtains"),
            image_url: "/images/portfolio/bayt-living.jpg".to_string(),
            completed_on: None,
        },
    ]
}

fn projects() -> Vec<Project> {
    vec![
        Project {
            id: "project-nile-gardens".to_string(),
            partner_id: DEVELOPER_PARTNER_ID.to_string(),
            name: text("نايل جاردنز", "Nile Gardens"),
            description: text("كمبوند سكني متكامل", "Integrated residential compound"),
            location: text("القاهرة الجديدة", "New Cairo"),
            units: 640,
            delivery: day(2026, 6, 30),
            status: ProjectStatus::UnderConstruction,
        },
        Project {
            id: "project-nile-towers".to_string(),
            partner_id: DEVELOPER_PARTNER_ID.to_string(),
            name: text("أبراج النيل", "Nile Towers"),
            description: text("أبراج سكنية وإدارية", "Residential and office towers"),
            location: text("الشيخ زايد", "Sheikh Zayed"),
            units: 300,
            delivery: day(2024, 12, 1),
            status: ProjectStatus::Delivered,
        },
    ]
}

fn filters() -> Vec<FilterOption> {
    let option = |id: &str, group, label: LocalizedText, value: &str| FilterOption {
        id: id.to_string(),
        group,
        label,
        value: value.to_string(),
    };
    vec![
        option(
            "filter-city-new-cairo",
            FilterGroup::City,
            text("القاهرة الجديدة", "New Cairo"),
            "new-cairo",
        ),
        option(
            "filter-city-sheikh-zayed",
            FilterGroup::City,
            text("الشيخ زايد", "Sheikh Zayed"),
            "sheikh-zayed",
        ),
        option(
            "filter-city-maadi",
            FilterGroup::City,
            text("المعادي", "Maadi"),
            "maadi",
        ),
        option(
            "filter-type-apartment",
            FilterGroup::PropertyType,
            text("شقة", "Apartment"),
            "apartment",
        ),
        option(
            "filter-type-villa",
            FilterGroup::PropertyType,
            text("فيلا", "Villa"),
            "villa",
        ),
        option(
            "filter-finishing-full",
            FilterGroup::FinishingType,
            text("تشطيب كامل", "Fully finished"),
            "full",
        ),
        option(
            "filter-finishing-core",
            FilterGroup::FinishingType,
            text("نصف تشطيب", "Core and shell"),
            "core",
        ),
        option(
            "filter-amenity-pool",
            FilterGroup::Amenity,
            text("مسبح", "Pool"),
            "pool",
        ),
    ]
}

fn decorations() -> Vec<DecorationCategory> {
    vec![
        DecorationCategory {
            id: "decoration-lighting".to_string(),
            name: text("إضاءة", "Lighting"),
            description: text("ثريات وإضاءة مخفية", "Chandeliers and hidden lighting"),
            image_url: "/images/decorations/lighting.jpg".to_string(),
            items: vec![DecorationItem {
                id: "decoration-item-chandelier".to_string(),
                name: text("ثريا كريستال", "Crystal chandelier"),
                price: 18_500,
            }],
        },
        DecorationCategory {
            id: "decoration-curtains".to_string(),
            name: text("ستائر", "Curtains"),
            description: text("ستائر وبلاك أوت", "Drapes and blackout blinds"),
            image_url: "/images/decorations/curtains.jpg".to_string(),
            items: Vec::new(),
        },
    ]
}
