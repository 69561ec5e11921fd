//! Bilingual value model.
//!
//! Every user-facing string in the catalog is stored as a [`Localized`] pair so
//! a single write replaces the Arabic and English values together.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl Locale {
    pub const fn all() -> [Self; 2] {
        [Self::Ar, Self::En]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
        }
    }

    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Ar)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{0}', expected 'ar' or 'en'")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let code = raw.trim().to_ascii_lowercase();
        // Accept region-qualified tags such as `ar-EG` or `en_US`.
        match code.split(['-', '_']).next().unwrap_or_default() {
            "ar" => Ok(Self::Ar),
            "en" => Ok(Self::En),
            _ => Err(UnknownLocale(raw.to_string())),
        }
    }
}

/// A value carried in both supported locales.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Localized<T> {
    pub ar: T,
    pub en: T,
}

/// Most localized fields are plain text.
pub type LocalizedText = Localized<String>;

impl<T> Localized<T> {
    pub fn new(ar: T, en: T) -> Self {
        Self { ar, en }
    }

    pub fn get(&self, locale: Locale) -> &T {
        match locale {
            Locale::Ar => &self.ar,
            Locale::En => &self.en,
        }
    }

    pub fn get_mut(&mut self, locale: Locale) -> &mut T {
        match locale {
            Locale::Ar => &mut self.ar,
            Locale::En => &mut self.en,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Localized<U> {
        Localized {
            ar: f(self.ar),
            en: f(self.en),
        }
    }
}

impl LocalizedText {
    pub fn text(ar: impl Into<String>, en: impl Into<String>) -> Self {
        Self::new(ar.into(), en.into())
    }

    /// True when either locale is blank.
    pub fn is_incomplete(&self) -> bool {
        self.ar.trim().is_empty() || self.en.trim().is_empty()
    }

    /// Case-insensitive match against either locale.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.ar.to_lowercase().contains(&needle) || self.en.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_region_qualified_tags() {
        assert_eq!("ar-EG".parse::<Locale>(), Ok(Locale::Ar));
        assert_eq!("EN_us".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn selects_value_by_locale() {
        let title = LocalizedText::text("شقة", "Apartment");
        assert_eq!(title.get(Locale::Ar), "شقة");
        assert_eq!(title.get(Locale::En), "Apartment");
        assert!(Locale::Ar.is_rtl());
        assert!(!Locale::En.is_rtl());
    }

    #[test]
    fn matches_either_locale() {
        let city = LocalizedText::text("القاهرة", "Cairo");
        assert!(city.matches("cai"));
        assert!(city.matches("القاهرة"));
        assert!(!city.matches("Giza"));
        assert!(LocalizedText::text("", "Cairo").is_incomplete());
    }
}
