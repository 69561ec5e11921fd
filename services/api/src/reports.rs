use crate::infra::{parse_dataset, parse_date, parse_locale};
use chrono::{Local, NaiveDate};
use clap::Args;
use estate_hub::analytics::{
    DashboardSummary, GrowthPoint, SummaryOptions, SummaryScope, GROWTH_MONTHS, MAX_GROWTH_MONTHS,
};
use estate_hub::catalog::Catalog;
use estate_hub::config::MockLatency;
use estate_hub::error::AppError;
use estate_hub::export::{csv, Dataset, ExportError};
use estate_hub::locale::Locale;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AnalyticsArgs {
    /// Limit the summary to one partner's leads and listings
    #[arg(long)]
    pub(crate) partner_id: Option<String>,
    /// Number of months in the growth series (1 to 120)
    #[arg(
        long,
        default_value_t = GROWTH_MONTHS as u16,
        value_parser = clap::value_parser!(u16).range(1..=MAX_GROWTH_MONTHS as i64)
    )]
    pub(crate) months: u16,
    /// Label language (ar or en)
    #[arg(long, default_value = "ar", value_parser = parse_locale)]
    pub(crate) lang: Locale,
    /// Override the reporting date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Dataset to export: leads, properties or partners
    #[arg(value_parser = parse_dataset)]
    pub(crate) dataset: Dataset,
    /// Column header language (ar or en)
    #[arg(long, default_value = "ar", value_parser = parse_locale)]
    pub(crate) lang: Locale,
    /// Limit leads or properties to one partner
    #[arg(long)]
    pub(crate) partner_id: Option<String>,
    /// Write to this file instead of stdout
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

pub(crate) async fn run_analytics(args: AnalyticsArgs) -> Result<(), AppError> {
    let catalog = Catalog::seeded(MockLatency::none());
    let summary = build_summary(&catalog, &args).await?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&summary).map_err(ExportError::from)?;
        println!("{rendered}");
    } else {
        write_summary(&mut io::stdout().lock(), &summary)?;
    }
    Ok(())
}

async fn build_summary(
    catalog: &Catalog,
    args: &AnalyticsArgs,
) -> Result<DashboardSummary, AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let options = SummaryOptions::new(today, args.lang).with_months(usize::from(args.months));
    let leads = catalog.leads.get_all_leads().await?;
    let properties = catalog.properties.get_all_properties().await?;

    match &args.partner_id {
        Some(partner_id) => {
            if catalog.partners.get_partner_by_id(partner_id).await?.is_none() {
                return Err(AppError::not_found("partner", partner_id.as_str()));
            }
            Ok(DashboardSummary::partner(
                partner_id,
                &leads,
                &properties,
                options,
            ))
        }
        None => {
            let partners = catalog.partners.get_all_partners().await?;
            Ok(DashboardSummary::admin(
                &leads,
                &properties,
                &partners,
                options,
            ))
        }
    }
}

fn write_summary(out: &mut impl Write, summary: &DashboardSummary) -> io::Result<()> {
    let scope = match (summary.scope, &summary.partner_id) {
        (SummaryScope::Partner, Some(partner_id)) => format!("partner {partner_id}"),
        _ => "all partners".to_string(),
    };
    writeln!(out, "Dashboard summary for {scope} as of {}", summary.generated_on)?;

    let leads = &summary.leads;
    writeln!(
        out,
        "- {} leads | {} open | {:.0}% converted | {} this month",
        leads.total,
        leads.open,
        leads.conversion_rate * 100.0,
        summary.leads_this_month
    )?;
    for entry in &leads.by_status {
        writeln!(out, "    {:<14} {}", entry.status_label, entry.count)?;
    }

    let properties = &summary.properties;
    writeln!(
        out,
        "- {} properties | {} available | {} featured",
        properties.total, properties.available, properties.featured
    )?;

    if let Some(partners) = &summary.partners {
        writeln!(
            out,
            "- {} partners | {} active | {} pending approval | {} with a current plan",
            partners.total, partners.active, partners.pending, partners.with_current_subscription
        )?;
    }

    if !summary.top_partners.is_empty() {
        writeln!(out, "\nTop partners by leads:")?;
        for entry in &summary.top_partners {
            writeln!(out, "  {} ({}): {}", entry.partner_name, entry.partner_id, entry.leads)?;
        }
    }

    if !summary.top_services.is_empty() {
        writeln!(out, "\nTop services:")?;
        for entry in &summary.top_services {
            writeln!(out, "  {}: {}", entry.service_title, entry.leads)?;
        }
    }

    writeln!(out, "\nLead growth:")?;
    write_growth(out, &summary.lead_growth)?;
    if !summary.partner_growth.is_empty() {
        writeln!(out, "\nPartner growth:")?;
        write_growth(out, &summary.partner_growth)?;
    }
    Ok(())
}

fn write_growth(out: &mut impl Write, points: &[GrowthPoint]) -> io::Result<()> {
    for point in points {
        writeln!(out, "  {:<16} +{} ({} total)", point.label, point.added, point.cumulative)?;
    }
    Ok(())
}

pub(crate) async fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let catalog = Catalog::seeded(MockLatency::none());
    let rendered = export_csv(&catalog, &args).await?;

    match &args.out {
        Some(path) => {
            std::fs::write(path, rendered.as_bytes())?;
            eprintln!("wrote {} export to {}", args.dataset, path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

async fn export_csv(catalog: &Catalog, args: &ExportArgs) -> Result<String, AppError> {
    let columns = args.dataset.columns(args.lang);
    let scope = args.partner_id.as_deref();

    let rendered = match args.dataset {
        Dataset::Leads => {
            let leads = match scope {
                Some(partner_id) => catalog.leads.get_leads_by_partner(partner_id).await?,
                None => catalog.leads.get_all_leads().await?,
            };
            csv::render(&leads, &columns)?
        }
        Dataset::Properties => {
            let properties = match scope {
                Some(partner_id) => catalog.properties.get_properties_by_partner(partner_id).await?,
                None => catalog.properties.get_all_properties().await?,
            };
            csv::render(&properties, &columns)?
        }
        Dataset::Partners => csv::render(&catalog.partners.get_all_partners().await?, &columns)?,
    };
    Ok(rendered)
}
