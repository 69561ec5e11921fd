use std::collections::HashMap;

use super::views::{PartnerRankEntry, ServiceRankEntry};
use crate::catalog::{Lead, Partner};
use crate::locale::Locale;

/// Count occurrences and order them by count descending, key ascending.
fn ranked<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }
    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|(a_key, a_count), (b_key, b_count)| {
        b_count.cmp(a_count).then_with(|| a_key.cmp(b_key))
    });
    ranked
}

/// The `n` partners with the most leads.
///
/// The cut happens before joining to `partners`, so leads pointing at a removed
/// partner take a slot and the result can be shorter than `n`.
pub fn top_partners_by_leads(
    leads: &[Lead],
    partners: &[Partner],
    n: usize,
    locale: Locale,
) -> Vec<PartnerRankEntry> {
    let by_id: HashMap<&str, &Partner> = partners
        .iter()
        .map(|partner| (partner.id.as_str(), partner))
        .collect();

    ranked(leads.iter().map(|lead| lead.partner_id.as_str()))
        .into_iter()
        .take(n)
        .filter_map(|(partner_id, count)| {
            by_id.get(partner_id).map(|partner| PartnerRankEntry {
                partner_id: partner.id.clone(),
                partner_name: partner.name.get(locale).clone(),
                partner_type: partner.partner_type(),
                leads: count,
            })
        })
        .collect()
}

/// The `n` most requested services, by trimmed title.
pub fn top_services(leads: &[Lead], n: usize) -> Vec<ServiceRankEntry> {
    ranked(
        leads
            .iter()
            .map(|lead| lead.service_title.trim())
            .filter(|title| !title.is_empty()),
    )
    .into_iter()
    .take(n)
    .map(|(title, count)| ServiceRankEntry {
        service_title: title.to_string(),
        leads: count,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn leads_for(partner_ids: &[&str]) -> Vec<Lead> {
        let template = seed::demo_catalog().leads.remove(0);
        partner_ids
            .iter()
            .enumerate()
            .map(|(index, partner_id)| Lead {
                id: format!("lead-{index}"),
                partner_id: partner_id.to_string(),
                ..template.clone()
            })
            .collect()
    }

    #[test]
    fn partners_rank_by_count_then_id() {
        let partners = seed::demo_catalog().partners;
        let leads = leads_for(&[
            seed::AGENCY_PARTNER_ID,
            seed::FINISHING_PARTNER_ID,
            seed::FINISHING_PARTNER_ID,
            seed::DEVELOPER_PARTNER_ID,
            seed::AGENCY_PARTNER_ID,
        ]);

        let top = top_partners_by_leads(&leads, &partners, 3, Locale::En);
        let ids: Vec<_> = top.iter().map(|entry| entry.partner_id.as_str()).collect();
        assert_eq!(
            ids,
            [
                seed::AGENCY_PARTNER_ID,
                seed::FINISHING_PARTNER_ID,
                seed::DEVELOPER_PARTNER_ID
            ]
        );
        assert_eq!(top[0].leads, 2);
    }

    #[test]
    fn removed_partners_are_dropped_after_the_cut() {
        let partners = seed::demo_catalog().partners;
        let leads = leads_for(&["partner-gone", "partner-gone", seed::AGENCY_PARTNER_ID]);

        let top = top_partners_by_leads(&leads, &partners, 1, Locale::En);
        assert!(top.is_empty());

        let top = top_partners_by_leads(&leads, &partners, 2, Locale::Ar);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].partner_id, seed::AGENCY_PARTNER_ID);
    }

    #[test]
    fn services_group_on_trimmed_titles() {
        let mut leads = leads_for(&["a", "b", "c"]);
        leads[0].service_title = "Kitchen".into();
        leads[1].service_title = " Kitchen ".into();
        leads[2].service_title = "Painting".into();

        let top = top_services(&leads, 5);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].service_title, "Kitchen");
        assert_eq!(top[0].leads, 2);
    }
}
