//! Tabular export of catalog records.

pub mod csv;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::locale::Locale;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize export row: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Header label plus the dot path its values are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub label: String,
    pub path: String,
}

impl Column {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Record sets with a ready-made column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Leads,
    Properties,
    Partners,
}

impl Dataset {
    pub const fn all() -> [Self; 3] {
        [Self::Leads, Self::Properties, Self::Partners]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Leads => "leads",
            Self::Properties => "properties",
            Self::Partners => "partners",
        }
    }

    pub fn file_name(self, today: NaiveDate) -> String {
        format!("{}-{}.csv", self.code(), today.format("%Y-%m-%d"))
    }

    pub fn columns(self, locale: Locale) -> Vec<Column> {
        let lang = locale.code();
        let pick = |ar: &str, en: &str| match locale {
            Locale::Ar => ar.to_string(),
            Locale::En => en.to_string(),
        };

        match self {
            Self::Leads => vec![
                Column::new(pick("المعرف", "ID"), "id"),
                Column::new(pick("الشريك", "Partner"), "partnerId"),
                Column::new(pick("اسم العميل", "Customer"), "customerName"),
                Column::new(pick("الهاتف", "Phone"), "customerPhone"),
                Column::new(pick("الخدمة", "Service"), "serviceTitle"),
                Column::new(pick("الحالة", "Status"), "status"),
                Column::new(pick("تاريخ الإنشاء", "Created"), "createdAt"),
                Column::new(pick("المسؤول", "Assigned To"), "assignedTo"),
                Column::new(pick("ملاحظات", "Notes"), "internalNotes"),
            ],
            Self::Properties => vec![
                Column::new(pick("المعرف", "ID"), "id"),
                Column::new(pick("العنوان", "Title"), format!("title.{lang}")),
                Column::new(pick("المدينة", "City"), format!("city.{lang}")),
                Column::new(pick("النوع", "Type"), "kind"),
                Column::new(pick("الحالة", "Status"), "status"),
                Column::new(pick("السعر", "Price"), "price"),
                Column::new(pick("المساحة", "Area"), "area"),
                Column::new(pick("غرف النوم", "Bedrooms"), "bedrooms"),
                Column::new(pick("الحمامات", "Bathrooms"), "bathrooms"),
                Column::new(pick("المميزات", "Amenities"), format!("amenities.{lang}")),
                Column::new(pick("خط العرض", "Latitude"), "location.lat"),
                Column::new(pick("خط الطول", "Longitude"), "location.lng"),
            ],
            Self::Partners => vec![
                Column::new(pick("المعرف", "ID"), "id"),
                Column::new(pick("الاسم", "Name"), format!("name.{lang}")),
                Column::new(pick("النوع", "Type"), "profile.type"),
                Column::new(pick("البريد الإلكتروني", "Email"), "email"),
                Column::new(pick("الحالة", "Status"), "status"),
                Column::new(pick("الباقة", "Plan"), "subscription.planId"),
                Column::new(pick("نهاية الاشتراك", "Subscription Ends"), "subscription.endsOn"),
                Column::new(pick("تاريخ الانضمام", "Joined"), "joinedOn"),
            ],
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown export dataset '{0}'")]
pub struct UnknownDataset(pub String);

impl FromStr for Dataset {
    type Err = UnknownDataset;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::all()
            .into_iter()
            .find(|dataset| dataset.code() == normalized)
            .ok_or_else(|| UnknownDataset(value.to_string()))
    }
}
