use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::collection::{next_record_id, MockCollection};
use super::store::{Placement, Record};
use super::{CatalogError, ValidationError};
use crate::locale::{Locale, LocalizedText};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyKind {
    Apartment,
    Villa,
    Townhouse,
    Duplex,
    Chalet,
    Office,
    Shop,
    Land,
}

impl PropertyKind {
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Apartment, Locale::En) => "Apartment",
            (Self::Apartment, Locale::Ar) => "شقة",
            (Self::Villa, Locale::En) => "Villa",
            (Self::Villa, Locale::Ar) => "فيلا",
            (Self::Townhouse, Locale::En) => "Townhouse",
            (Self::Townhouse, Locale::Ar) => "تاون هاوس",
            (Self::Duplex, Locale::En) => "Duplex",
            (Self::Duplex, Locale::Ar) => "دوبلكس",
            (Self::Chalet, Locale::En) => "Chalet",
            (Self::Chalet, Locale::Ar) => "شاليه",
            (Self::Office, Locale::En) => "Office",
            (Self::Office, Locale::Ar) => "مكتب",
            (Self::Shop, Locale::En) => "Shop",
            (Self::Shop, Locale::Ar) => "محل",
            (Self::Land, Locale::En) => "Land",
            (Self::Land, Locale::Ar) => "أرض",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyStatus {
    ForSale,
    ForRent,
    Sold,
    Rented,
}

impl PropertyStatus {
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::ForSale, Locale::En) => "For Sale",
            (Self::ForSale, Locale::Ar) => "للبيع",
            (Self::ForRent, Locale::En) => "For Rent",
            (Self::ForRent, Locale::Ar) => "للإيجار",
            (Self::Sold, Locale::En) => "Sold",
            (Self::Sold, Locale::Ar) => "تم البيع",
            (Self::Rented, Locale::En) => "Rented",
            (Self::Rented, Locale::Ar) => "تم التأجير",
        }
    }

    pub const fn is_available(self) -> bool {
        matches!(self, Self::ForSale | Self::ForRent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Dates between which a listing is shown publicly. An open end means indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingWindow {
    pub start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl ListingWindow {
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && self.end.map_or(true, |end| day <= end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub partner_id: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub city: LocalizedText,
    pub price_label: LocalizedText,
    pub kind: PropertyKind,
    pub status: PropertyStatus,
    pub price: u64,
    pub area: u32,
    pub bedrooms: u8,
    pub bathrooms: u8,
    #[serde(default)]
    pub amenities: Vec<LocalizedText>,
    pub location: GeoPoint,
    pub listing: ListingWindow,
    #[serde(default)]
    pub featured: bool,
}

impl Record for Property {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Public catalog filters. Every populated field must match.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyQuery {
    pub partner_id: Option<String>,
    pub city: Option<String>,
    pub kind: Option<PropertyKind>,
    pub status: Option<PropertyStatus>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub min_bedrooms: Option<u8>,
    pub active_on: Option<NaiveDate>,
    #[serde(default)]
    pub featured_only: bool,
}

impl PropertyQuery {
    /// Canonical form of the populated filters, independent of parameter order.
    pub fn cache_key(&self) -> String {
        let mut parts = Vec::new();
        if let Some(partner_id) = &self.partner_id {
            parts.push(format!("partner={partner_id}"));
        }
        if let Some(city) = &self.city {
            parts.push(format!("city={city}"));
        }
        if let Some(kind) = self.kind {
            parts.push(format!("kind={kind:?}"));
        }
        if let Some(status) = self.status {
            parts.push(format!("status={status:?}"));
        }
        if let Some(min) = self.min_price {
            parts.push(format!("min_price={min}"));
        }
        if let Some(max) = self.max_price {
            parts.push(format!("max_price={max}"));
        }
        if let Some(beds) = self.min_bedrooms {
            parts.push(format!("min_bedrooms={beds}"));
        }
        if let Some(day) = self.active_on {
            parts.push(format!("active_on={day}"));
        }
        if self.featured_only {
            parts.push("featured".to_string());
        }
        parts.join("&")
    }

    pub fn matches(&self, property: &Property) -> bool {
        if let Some(partner_id) = &self.partner_id {
            if &property.partner_id != partner_id {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if !property.city.matches(city) {
                return false;
            }
        }
        if self.kind.is_some_and(|kind| kind != property.kind) {
            return false;
        }
        if self.status.is_some_and(|status| status != property.status) {
            return false;
        }
        if self.min_price.is_some_and(|min| property.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| property.price > max) {
            return false;
        }
        if self
            .min_bedrooms
            .is_some_and(|beds| property.bedrooms < beds)
        {
            return false;
        }
        if self
            .active_on
            .is_some_and(|day| !property.listing.contains(day))
        {
            return false;
        }
        !self.featured_only || property.featured
    }
}

fn check_listing(
    title: &LocalizedText,
    price: u64,
    area: u32,
    listing: &ListingWindow,
    location: &GeoPoint,
) -> Result<(), ValidationError> {
    if title.is_incomplete() {
        return Err(ValidationError::new(
            "title",
            "title is required in Arabic and English",
        ));
    }
    if price == 0 {
        return Err(ValidationError::new("price", "price must be positive"));
    }
    if area == 0 {
        return Err(ValidationError::new("area", "area must be positive"));
    }
    if listing.end.is_some_and(|end| end < listing.start) {
        return Err(ValidationError::new(
            "listing",
            "listing end precedes its start",
        ));
    }
    if !(-90.0..=90.0).contains(&location.lat) || !(-180.0..=180.0).contains(&location.lng) {
        return Err(ValidationError::new("location", "coordinates out of range"));
    }
    Ok(())
}

/// Listing form submitted by a partner or admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub partner_id: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub city: LocalizedText,
    pub price_label: LocalizedText,
    pub kind: PropertyKind,
    pub status: PropertyStatus,
    pub price: u64,
    pub area: u32,
    pub bedrooms: u8,
    pub bathrooms: u8,
    #[serde(default)]
    pub amenities: Vec<LocalizedText>,
    pub location: GeoPoint,
    pub listing: ListingWindow,
    #[serde(default)]
    pub featured: bool,
}

impl NewProperty {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_listing(
            &self.title,
            self.price,
            self.area,
            &self.listing,
            &self.location,
        )
    }

    fn into_property(self, id: String) -> Property {
        Property {
            id,
            partner_id: self.partner_id,
            title: self.title,
            description: self.description,
            city: self.city,
            price_label: self.price_label,
            kind: self.kind,
            status: self.status,
            price: self.price,
            area: self.area,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            amenities: self.amenities,
            location: self.location,
            listing: self.listing,
            featured: self.featured,
        }
    }
}

/// Partial edit. Localized fields replace both locales at once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUpdate {
    pub title: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub price_label: Option<LocalizedText>,
    pub status: Option<PropertyStatus>,
    pub price: Option<u64>,
    pub amenities: Option<Vec<LocalizedText>>,
    pub listing: Option<ListingWindow>,
    pub featured: Option<bool>,
}

impl PropertyUpdate {
    /// Checks the listing as it would look after this edit, with the same rules as creation.
    pub fn validate(&self, current: &Property) -> Result<(), ValidationError> {
        let mut merged = current.clone();
        self.apply(&mut merged);
        check_listing(
            &merged.title,
            merged.price,
            merged.area,
            &merged.listing,
            &merged.location,
        )
    }

    fn apply(&self, property: &mut Property) {
        if let Some(title) = &self.title {
            property.title = title.clone();
        }
        if let Some(description) = &self.description {
            property.description = description.clone();
        }
        if let Some(price_label) = &self.price_label {
            property.price_label = price_label.clone();
        }
        if let Some(status) = self.status {
            property.status = status;
        }
        if let Some(price) = self.price {
            property.price = price;
        }
        if let Some(amenities) = &self.amenities {
            property.amenities = amenities.clone();
        }
        if let Some(listing) = self.listing {
            property.listing = listing;
        }
        if let Some(featured) = self.featured {
            property.featured = featured;
        }
    }
}

#[derive(Clone)]
pub struct PropertiesApi {
    properties: MockCollection<Property>,
}

impl PropertiesApi {
    pub fn new(properties: MockCollection<Property>) -> Self {
        Self { properties }
    }

    pub async fn get_all_properties(&self) -> Result<Vec<Property>, CatalogError> {
        self.properties.all().await
    }

    pub async fn get_property_by_id(&self, id: &str) -> Result<Option<Property>, CatalogError> {
        self.properties.find(id).await
    }

    pub async fn get_properties_by_partner(
        &self,
        partner_id: &str,
    ) -> Result<Vec<Property>, CatalogError> {
        self.properties
            .filter(|property| property.partner_id == partner_id)
            .await
    }

    pub async fn search(&self, query: &PropertyQuery) -> Result<Vec<Property>, CatalogError> {
        self.properties.filter(|property| query.matches(property)).await
    }

    pub async fn add_property(&self, form: NewProperty) -> Result<Property, CatalogError> {
        let property = form.into_property(next_record_id("property"));
        self.properties.create(property, Placement::Front).await
    }

    pub async fn update_property(
        &self,
        id: &str,
        update: PropertyUpdate,
    ) -> Result<Option<Property>, CatalogError> {
        self.properties
            .modify(id, |property| update.apply(property))
            .await
    }

    pub async fn delete_property(&self, id: &str) -> Result<bool, CatalogError> {
        self.properties.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockLatency;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn listing_form() -> NewProperty {
        NewProperty {
            partner_id: "partner-dev".to_string(),
            title: LocalizedText::text("شقة بحديقة", "Garden apartment"),
            description: LocalizedText::text("وصف", "Description"),
            city: LocalizedText::text("القاهرة الجديدة", "New Cairo"),
            price_label: LocalizedText::text("٣٬٥٠٠٬٠٠٠ ج.م", "EGP 3,500,000"),
            kind: PropertyKind::Apartment,
            status: PropertyStatus::ForSale,
            price: 3_500_000,
            area: 165,
            bedrooms: 3,
            bathrooms: 2,
            amenities: vec![LocalizedText::text("حديقة", "Garden")],
            location: GeoPoint {
                lat: 30.03,
                lng: 31.47,
            },
            listing: ListingWindow {
                start: day(2025, 1, 1),
                end: Some(day(2025, 6, 30)),
            },
            featured: false,
        }
    }

    #[test]
    fn validation_requires_both_locales_and_sane_window() {
        assert!(listing_form().validate().is_ok());

        let mut missing_ar = listing_form();
        missing_ar.title.ar.clear();
        assert_eq!(missing_ar.validate().expect_err("blank ar").field, "title");

        let mut inverted = listing_form();
        inverted.listing.end = Some(day(2024, 12, 1));
        assert_eq!(inverted.validate().expect_err("inverted").field, "listing");
    }

    #[tokio::test]
    async fn search_combines_filters() {
        let api = PropertiesApi::new(MockCollection::in_memory(
            "properties",
            Vec::new(),
            MockLatency::none(),
        ));
        let apartment = api.add_property(listing_form()).await.expect("add");
        let mut villa = listing_form();
        villa.kind = PropertyKind::Villa;
        villa.price = 12_000_000;
        villa.bedrooms = 5;
        api.add_property(villa).await.expect("add villa");

        let query = PropertyQuery {
            city: Some("new cairo".to_string()),
            max_price: Some(5_000_000),
            active_on: Some(day(2025, 3, 15)),
            ..PropertyQuery::default()
        };
        let found = api.search(&query).await.expect("search");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, apartment.id);

        let expired = PropertyQuery {
            active_on: Some(day(2025, 7, 1)),
            ..PropertyQuery::default()
        };
        assert!(api.search(&expired).await.expect("search").is_empty());
    }

    #[tokio::test]
    async fn update_replaces_localized_pair_in_one_write() {
        let api = PropertiesApi::new(MockCollection::in_memory(
            "properties",
            Vec::new(),
            MockLatency::none(),
        ));
        let property = api.add_property(listing_form()).await.expect("add");

        let updated = api
            .update_property(
                &property.id,
                PropertyUpdate {
                    title: Some(LocalizedText::text("شقة مميزة", "Premium apartment")),
                    status: Some(PropertyStatus::Sold),
                    ..PropertyUpdate::default()
                },
            )
            .await
            .expect("update")
            .expect("present");

        assert_eq!(updated.title.get(Locale::Ar), "شقة مميزة");
        assert_eq!(updated.title.get(Locale::En), "Premium apartment");
        assert!(!updated.status.is_available());
        assert_eq!(updated.price, property.price);
    }
}
