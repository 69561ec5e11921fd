use chrono::{Datelike, NaiveDate};

use super::views::GrowthPoint;
use crate::locale::Locale;

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_AR: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

/// Longest growth series a summary will build: ten years of months.
pub const MAX_GROWTH_MONTHS: usize = 120;

/// Months since year 0, so consecutive months differ by one.
fn month_index(day: NaiveDate) -> i64 {
    i64::from(day.year()) * 12 + i64::from(day.month0())
}

pub fn month_label(year: i64, month0: usize, locale: Locale) -> String {
    let names = match locale {
        Locale::Ar => &MONTHS_AR,
        Locale::En => &MONTHS_EN,
    };
    format!("{} {year}", names[month0 % 12])
}

/// Cumulative growth over the `months` calendar months ending with `today`'s.
///
/// The window is capped at [`MAX_GROWTH_MONTHS`] buckets.
///
/// Dates before the first bucket count toward every cumulative total; dates
/// after `today`'s month are ignored.
pub fn monthly_growth<I>(dates: I, months: usize, today: NaiveDate, locale: Locale) -> Vec<GrowthPoint>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let months = months.min(MAX_GROWTH_MONTHS);
    if months == 0 {
        return Vec::new();
    }

    let mut indices: Vec<i64> = dates.into_iter().map(month_index).collect();
    indices.sort_unstable();

    let last = month_index(today);
    let first = last - (months as i64 - 1);

    let mut cursor = indices.partition_point(|index| *index < first);
    let mut cumulative = cursor;

    (first..=last)
        .map(|bucket| {
            let start = cursor;
            while cursor < indices.len() && indices[cursor] == bucket {
                cursor += 1;
            }
            let added = cursor - start;
            cumulative += added;

            let year = bucket.div_euclid(12);
            let month0 = bucket.rem_euclid(12) as usize;
            GrowthPoint {
                month: format!("{year:04}-{:02}", month0 + 1),
                label: month_label(year, month0, locale),
                added,
                cumulative,
            }
        })
        .collect()
}
