use chrono::NaiveDate;
use estate_hub::catalog::Catalog;
use estate_hub::config::CatalogConfig;
use estate_hub::export::Dataset;
use estate_hub::locale::Locale;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog for the configured latency, seeded with demo data unless disabled.
pub(crate) fn build_catalog(config: &CatalogConfig) -> Catalog {
    if config.seed {
        Catalog::seeded(config.latency)
    } else {
        Catalog::empty(config.latency)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_locale(raw: &str) -> Result<Locale, String> {
    raw.parse::<Locale>().map_err(|err| err.to_string())
}

pub(crate) fn parse_dataset(raw: &str) -> Result<Dataset, String> {
    raw.parse::<Dataset>().map_err(|err| err.to_string())
}
