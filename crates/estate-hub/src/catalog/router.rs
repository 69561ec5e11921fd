use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use super::leads::service_catalog;
use super::{
    Catalog, CatalogError, FilterGroup, Lead, LeadStatus, LeadUpdate, NewLead, NewProperty,
    Partner, PartnerStatus, PartnerType, PropertyQuery, PropertyUpdate, Subscription,
    ValidationError,
};
use crate::access::{AccessError, Principal, Resource};
use crate::analytics::{DashboardSummary, SummaryOptions};
use crate::error::AppError;
use crate::export::{csv, Dataset};
use crate::locale::Locale;
use crate::query::QueryClient;

/// Header carrying the signed-in partner's id on dashboard requests.
pub const PARTNER_HEADER: &str = "x-partner-id";

#[derive(Clone)]
pub struct CatalogState {
    pub catalog: Catalog,
    pub queries: QueryClient,
}

impl CatalogState {
    pub fn new(catalog: Catalog, queries: QueryClient) -> Self {
        Self { catalog, queries }
    }
}

/// Public site, partner dashboard and admin endpoints over one catalog.
pub fn catalog_router(state: CatalogState) -> Router {
    Router::new()
        .route("/api/v1/properties", get(list_properties))
        .route("/api/v1/properties/:id", get(property_detail))
        .route("/api/v1/partners", get(list_partners))
        .route("/api/v1/partners/:id", get(partner_detail))
        .route("/api/v1/plans", get(list_plans))
        .route("/api/v1/projects", get(list_projects))
        .route("/api/v1/portfolio", get(list_portfolio))
        .route("/api/v1/filters", get(list_filters))
        .route("/api/v1/decorations", get(list_decorations))
        .route("/api/v1/services", get(list_services))
        .route("/api/v1/leads", post(submit_lead))
        .route("/api/v1/dashboard/me", get(current_principal))
        .route("/api/v1/dashboard/leads", get(dashboard_leads))
        .route(
            "/api/v1/dashboard/leads/:id",
            patch(update_lead).delete(delete_lead),
        )
        .route("/api/v1/dashboard/properties", post(create_property))
        .route(
            "/api/v1/dashboard/properties/:id",
            patch(update_property).delete(delete_property),
        )
        .route("/api/v1/dashboard/summary", get(dashboard_summary))
        .route("/api/v1/dashboard/export/:dataset", get(export_dataset))
        .route(
            "/api/v1/admin/partners/:id/status",
            patch(change_partner_status),
        )
        .route(
            "/api/v1/admin/partners/:id/subscription",
            patch(change_partner_subscription),
        )
        .with_state(state)
}

/// Read `key` through the query cache, calling `fetch` on a miss.
async fn read_through<T, F, Fut>(
    state: &CatalogState,
    key: String,
    fetch: F,
) -> Result<Arc<T>, AppError>
where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, CatalogError>> + Send + 'static,
{
    Ok(state.queries.fetch_query(key, fetch).await?)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: &T) -> Response {
    (status, Json(body)).into_response()
}

fn is_public(partner: &Partner) -> bool {
    partner.status == PartnerStatus::Active && partner.partner_type() != PartnerType::Admin
}

async fn resolve_principal(state: &CatalogState, headers: &HeaderMap) -> Result<Principal, AppError> {
    let partner_id = headers
        .get(PARTNER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AccessError::UnknownPartner(String::new()))?
        .to_string();

    let partners = state.catalog.partners.clone();
    let id = partner_id.clone();
    let partner = read_through(state, format!("partners:id:{partner_id}"), move || {
        let partners = partners.clone();
        let id = id.clone();
        async move { partners.get_partner_by_id(&id).await }
    })
    .await?;

    match partner.as_ref() {
        Some(partner) => Ok(Principal::from_partner(partner)?),
        None => Err(AccessError::UnknownPartner(partner_id).into()),
    }
}

#[derive(Debug, Default, Deserialize)]
struct LangParams {
    lang: Option<Locale>,
}

#[derive(Debug, Default, Deserialize)]
struct PartnerListParams {
    #[serde(rename = "type")]
    partner_type: Option<PartnerType>,
}

#[derive(Debug, Default, Deserialize)]
struct OwnerParams {
    partner_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FilterParams {
    group: Option<FilterGroup>,
}

#[derive(Debug, Default, Deserialize)]
struct DashboardLeadParams {
    status: Option<LeadStatus>,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryParams {
    lang: Option<Locale>,
    today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct StatusChange {
    status: PartnerStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionChange {
    plan_id: String,
    ends_on: NaiveDate,
}

async fn list_properties(
    State(state): State<CatalogState>,
    Query(search): Query<PropertyQuery>,
) -> Result<Response, AppError> {
    let properties = state.catalog.properties.clone();
    let key = format!("properties:search:{}", search.cache_key());
    let results = read_through(&state, key, move || {
        let properties = properties.clone();
        let search = search.clone();
        async move { properties.search(&search).await }
    })
    .await?;
    Ok(json_response(StatusCode::OK, results.as_ref()))
}

async fn property_detail(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let properties = state.catalog.properties.clone();
    let lookup = id.clone();
    let property = read_through(&state, format!("properties:id:{id}"), move || {
        let properties = properties.clone();
        let lookup = lookup.clone();
        async move { properties.get_property_by_id(&lookup).await }
    })
    .await?;
    match property.as_ref() {
        Some(property) => Ok(json_response(StatusCode::OK, property)),
        None => Err(AppError::not_found("property", id)),
    }
}

async fn list_partners(
    State(state): State<CatalogState>,
    Query(params): Query<PartnerListParams>,
) -> Result<Response, AppError> {
    let partners = state.catalog.partners.clone();
    let wanted = params.partner_type;
    let key = match wanted {
        Some(partner_type) => format!("partners:public:{}", partner_type.label(Locale::En)),
        None => "partners:public:all".to_string(),
    };
    let results = read_through(&state, key, move || {
        let partners = partners.clone();
        async move { partners.get_public_partners(wanted).await }
    })
    .await?;
    Ok(json_response(StatusCode::OK, results.as_ref()))
}

async fn partner_detail(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let partners = state.catalog.partners.clone();
    let lookup = id.clone();
    let partner = read_through(&state, format!("partners:id:{id}"), move || {
        let partners = partners.clone();
        let lookup = lookup.clone();
        async move { partners.get_partner_by_id(&lookup).await }
    })
    .await?;
    match partner.as_ref() {
        Some(partner) if is_public(partner) => Ok(json_response(StatusCode::OK, partner)),
        _ => Err(AppError::not_found("partner", id)),
    }
}

async fn list_plans(State(state): State<CatalogState>) -> Result<Response, AppError> {
    let plans = state.catalog.plans.clone();
    let results = read_through(&state, "plans:all".to_string(), move || {
        let plans = plans.clone();
        async move { plans.get_plans().await }
    })
    .await?;
    Ok(json_response(StatusCode::OK, results.as_ref()))
}

async fn list_projects(
    State(state): State<CatalogState>,
    Query(params): Query<OwnerParams>,
) -> Result<Response, AppError> {
    let projects = state.catalog.projects.clone();
    let results = match params.partner_id {
        Some(partner_id) => {
            let key = format!("projects:partner:{partner_id}");
            read_through(&state, key, move || {
                let projects = projects.clone();
                let partner_id = partner_id.clone();
                async move { projects.get_projects_by_partner(&partner_id).await }
            })
            .await?
        }
        None => {
            read_through(&state, "projects:all".to_string(), move || {
                let projects = projects.clone();
                async move { projects.get_projects().await }
            })
            .await?
        }
    };
    Ok(json_response(StatusCode::OK, results.as_ref()))
}

async fn list_portfolio(
    State(state): State<CatalogState>,
    Query(params): Query<OwnerParams>,
) -> Result<Response, AppError> {
    let portfolio = state.catalog.portfolio.clone();
    let results = match params.partner_id {
        Some(partner_id) => {
            let key = format!("portfolio:partner:{partner_id}");
            read_through(&state, key, move || {
                let portfolio = portfolio.clone();
                let partner_id = partner_id.clone();
                async move { portfolio.get_portfolio_by_partner(&partner_id).await }
            })
            .await?
        }
        None => {
            read_through(&state, "portfolio:all".to_string(), move || {
                let portfolio = portfolio.clone();
                async move { portfolio.get_portfolio().await }
            })
            .await?
        }
    };
    Ok(json_response(StatusCode::OK, results.as_ref()))
}

async fn list_filters(
    State(state): State<CatalogState>,
    Query(params): Query<FilterParams>,
) -> Result<Response, AppError> {
    let filters = state.catalog.filters.clone();
    let results = match params.group {
        Some(group) => {
            let key = format!("filters:{group:?}");
            read_through(&state, key, move || {
                let filters = filters.clone();
                async move { filters.get_filter_group(group).await }
            })
            .await?
        }
        None => {
            read_through(&state, "filters:all".to_string(), move || {
                let filters = filters.clone();
                async move { filters.get_filter_options().await }
            })
            .await?
        }
    };
    Ok(json_response(StatusCode::OK, results.as_ref()))
}

async fn list_decorations(State(state): State<CatalogState>) -> Result<Response, AppError> {
    let decorations = state.catalog.decorations.clone();
    let results = read_through(&state, "decorations:all".to_string(), move || {
        let decorations = decorations.clone();
        async move { decorations.get_categories().await }
    })
    .await?;
    Ok(json_response(StatusCode::OK, results.as_ref()))
}

async fn list_services() -> Response {
    json_response(StatusCode::OK, &service_catalog())
}

async fn submit_lead(
    State(state): State<CatalogState>,
    Json(form): Json<NewLead>,
) -> Result<Response, AppError> {
    form.validate()?;
    let partner = state
        .catalog
        .partners
        .get_partner_by_id(form.partner_id.trim())
        .await?;
    if !partner.as_ref().is_some_and(is_public) {
        return Err(ValidationError::new("partnerId", "unknown partner").into());
    }

    let lead = state.catalog.leads.add_lead(form).await?;
    state.queries.invalidate_prefix("leads:");
    Ok(json_response(StatusCode::CREATED, &lead))
}

async fn current_principal(
    State(state): State<CatalogState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let principal = resolve_principal(&state, &headers).await?;
    Ok(json_response(StatusCode::OK, &principal))
}

/// Leads visible to `principal`, read through the cache.
async fn scoped_leads(state: &CatalogState, principal: &Principal) -> Result<Arc<Vec<Lead>>, AppError> {
    let leads = state.catalog.leads.clone();
    match principal.scope() {
        None => {
            read_through(state, "leads:all".to_string(), move || {
                let leads = leads.clone();
                async move { leads.get_all_leads().await }
            })
            .await
        }
        Some(partner_id) => {
            let partner_id = partner_id.to_string();
            read_through(state, format!("leads:partner:{partner_id}"), move || {
                let leads = leads.clone();
                let partner_id = partner_id.clone();
                async move { leads.get_leads_by_partner(&partner_id).await }
            })
            .await
        }
    }
}

async fn scoped_properties(
    state: &CatalogState,
    principal: &Principal,
) -> Result<Arc<Vec<super::Property>>, AppError> {
    let properties = state.catalog.properties.clone();
    match principal.scope() {
        None => {
            read_through(state, "properties:all".to_string(), move || {
                let properties = properties.clone();
                async move { properties.get_all_properties().await }
            })
            .await
        }
        Some(partner_id) => {
            let partner_id = partner_id.to_string();
            read_through(state, format!("properties:partner:{partner_id}"), move || {
                let properties = properties.clone();
                let partner_id = partner_id.clone();
                async move { properties.get_properties_by_partner(&partner_id).await }
            })
            .await
        }
    }
}

async fn all_partners(state: &CatalogState) -> Result<Arc<Vec<Partner>>, AppError> {
    let partners = state.catalog.partners.clone();
    read_through(state, "partners:all".to_string(), move || {
        let partners = partners.clone();
        async move { partners.get_all_partners().await }
    })
    .await
}

async fn dashboard_leads(
    State(state): State<CatalogState>,
    headers: HeaderMap,
    Query(params): Query<DashboardLeadParams>,
) -> Result<Response, AppError> {
    let principal = resolve_principal(&state, &headers).await?;
    let leads = scoped_leads(&state, &principal).await?;
    match params.status {
        Some(status) => {
            let filtered: Vec<&Lead> = leads.iter().filter(|lead| lead.status == status).collect();
            Ok(json_response(StatusCode::OK, &filtered))
        }
        None => Ok(json_response(StatusCode::OK, leads.as_ref())),
    }
}

async fn update_lead(
    State(state): State<CatalogState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(update): Json<LeadUpdate>,
) -> Result<Response, AppError> {
    let principal = resolve_principal(&state, &headers).await?;
    let existing = state
        .catalog
        .leads
        .get_lead(&id)
        .await?
        .ok_or_else(|| AppError::not_found("lead", id.as_str()))?;
    principal.ensure_can_modify(Resource::Lead, &existing.partner_id)?;

    let updated = state
        .catalog
        .leads
        .update_lead(&id, update)
        .await?
        .ok_or_else(|| AppError::not_found("lead", id.as_str()))?;
    state.queries.invalidate_prefix("leads:");
    Ok(json_response(StatusCode::OK, &updated))
}

async fn delete_lead(
    State(state): State<CatalogState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let principal = resolve_principal(&state, &headers).await?;
    let existing = state
        .catalog
        .leads
        .get_lead(&id)
        .await?
        .ok_or_else(|| AppError::not_found("lead", id.as_str()))?;
    principal.ensure_can_modify(Resource::Lead, &existing.partner_id)?;

    if !state.catalog.leads.delete_lead(&id).await? {
        return Err(AppError::not_found("lead", id));
    }
    state.queries.invalidate_prefix("leads:");
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn create_property(
    State(state): State<CatalogState>,
    headers: HeaderMap,
    Json(mut form): Json<NewProperty>,
) -> Result<Response, AppError> {
    let principal = resolve_principal(&state, &headers).await?;
    if form.partner_id.trim().is_empty() {
        form.partner_id = principal.partner_id.clone();
    }
    principal.ensure_can_modify(Resource::Property, &form.partner_id)?;
    form.validate()?;

    let property = state.catalog.properties.add_property(form).await?;
    state.queries.invalidate_prefix("properties:");
    Ok(json_response(StatusCode::CREATED, &property))
}

async fn update_property(
    State(state): State<CatalogState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(update): Json<PropertyUpdate>,
) -> Result<Response, AppError> {
    let principal = resolve_principal(&state, &headers).await?;
    let existing = state
        .catalog
        .properties
        .get_property_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("property", id.as_str()))?;
    principal.ensure_can_modify(Resource::Property, &existing.partner_id)?;
    update.validate(&existing)?;

    let updated = state
        .catalog
        .properties
        .update_property(&id, update)
        .await?
        .ok_or_else(|| AppError::not_found("property", id.as_str()))?;
    state.queries.invalidate_prefix("properties:");
    Ok(json_response(StatusCode::OK, &updated))
}

async fn delete_property(
    State(state): State<CatalogState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let principal = resolve_principal(&state, &headers).await?;
    let existing = state
        .catalog
        .properties
        .get_property_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("property", id.as_str()))?;
    principal.ensure_can_modify(Resource::Property, &existing.partner_id)?;

    if !state.catalog.properties.delete_property(&id).await? {
        return Err(AppError::not_found("property", id));
    }
    state.queries.invalidate_prefix("properties:");
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn dashboard_summary(
    State(state): State<CatalogState>,
    headers: HeaderMap,
    Query(params): Query<SummaryParams>,
) -> Result<Response, AppError> {
    let principal = resolve_principal(&state, &headers).await?;
    let options = SummaryOptions::new(
        params.today.unwrap_or_else(|| Utc::now().date_naive()),
        params.lang.unwrap_or_default(),
    );

    let leads = scoped_leads(&state, &principal).await?;
    let properties = scoped_properties(&state, &principal).await?;
    let summary = match principal.scope() {
        None => {
            let partners = all_partners(&state).await?;
            DashboardSummary::admin(&leads, &properties, &partners, options)
        }
        Some(partner_id) => DashboardSummary::partner(partner_id, &leads, &properties, options),
    };
    Ok(json_response(StatusCode::OK, &summary))
}

async fn export_dataset(
    State(state): State<CatalogState>,
    headers: HeaderMap,
    Path(dataset): Path<String>,
    Query(params): Query<LangParams>,
) -> Result<Response, AppError> {
    let principal = resolve_principal(&state, &headers).await?;
    let dataset: Dataset = dataset
        .parse()
        .map_err(|err: crate::export::UnknownDataset| AppError::BadRequest(err.to_string()))?;
    let columns = dataset.columns(params.lang.unwrap_or_default());

    let body = match dataset {
        Dataset::Leads => csv::render(scoped_leads(&state, &principal).await?.as_slice(), &columns)?,
        Dataset::Properties => {
            csv::render(scoped_properties(&state, &principal).await?.as_slice(), &columns)?
        }
        Dataset::Partners => {
            principal.ensure_admin(Resource::Partner)?;
            csv::render(all_partners(&state).await?.as_slice(), &columns)?
        }
    };

    let disposition = format!(
        "attachment; filename=\"{}\"",
        dataset.file_name(Utc::now().date_naive())
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

async fn change_partner_status(
    State(state): State<CatalogState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(change): Json<StatusChange>,
) -> Result<Response, AppError> {
    let principal = resolve_principal(&state, &headers).await?;
    principal.ensure_admin(Resource::Partner)?;

    let partner = state
        .catalog
        .partners
        .set_partner_status(&id, change.status)
        .await?
        .ok_or_else(|| AppError::not_found("partner", id.as_str()))?;
    state.queries.invalidate_prefix("partners:");
    Ok(json_response(StatusCode::OK, &partner))
}

async fn change_partner_subscription(
    State(state): State<CatalogState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(change): Json<SubscriptionChange>,
) -> Result<Response, AppError> {
    let principal = resolve_principal(&state, &headers).await?;
    principal.ensure_admin(Resource::Partner)?;

    let partner = state
        .catalog
        .partners
        .get_partner_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("partner", id.as_str()))?;
    let plan = state
        .catalog
        .plans
        .get_plan(&change.plan_id)
        .await?
        .ok_or(ValidationError::new("planId", "unknown plan"))?;
    if !plan.audience.accepts(partner.partner_type()) {
        return Err(ValidationError::new("planId", "plan is not offered to this partner type").into());
    }

    let subscription = Subscription {
        plan_id: plan.id,
        ends_on: change.ends_on,
    };
    let partner = state
        .catalog
        .partners
        .assign_subscription(&id, subscription)
        .await?
        .ok_or_else(|| AppError::not_found("partner", id.as_str()))?;
    state.queries.invalidate_prefix("partners:");
    Ok(json_response(StatusCode::OK, &partner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockLatency;
    use crate::seed;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn state() -> CatalogState {
        CatalogState::new(Catalog::seeded(MockLatency::none()), QueryClient::new())
    }

    async fn send(router: &Router, request: Request<Body>) -> Response {
        router
            .clone()
            .oneshot(request)
            .await
            .expect("route executes")
    }

    fn get_as(uri: &str, partner_id: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(uri);
        if let Some(partner_id) = partner_id {
            builder = builder.header(PARTNER_HEADER, partner_id);
        }
        builder.body(Body::empty()).expect("request")
    }

    fn json_request(method: &str, uri: &str, partner_id: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(partner_id) = partner_id {
            builder = builder.header(PARTNER_HEADER, partner_id);
        }
        builder
            .body(Body::from(serde_json::to_vec(&body).expect("encode")))
            .expect("request")
    }

    fn csv_records(text: &str) -> usize {
        ::csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(text.trim_start_matches(csv::BOM).as_bytes())
            .records()
            .count()
    }

    async fn read_json(response: Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn property_search_applies_query_filters() {
        let router = catalog_router(state());
        let response = send(&router, get_as("/api/v1/properties?kind=apartment", None)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        let expected = seed::demo_catalog()
            .properties
            .iter()
            .filter(|property| property.kind == super::super::PropertyKind::Apartment)
            .count();
        assert_eq!(body.as_array().map(Vec::len), Some(expected));
    }

    #[tokio::test]
    async fn unknown_property_is_404() {
        let router = catalog_router(state());
        let response = send(&router, get_as("/api/v1/properties/property-missing", None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn public_partner_list_hides_admin_and_pending() {
        let router = catalog_router(state());
        let body = read_json(send(&router, get_as("/api/v1/partners", None)).await).await;
        let ids: Vec<&str> = body
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|partner| partner["id"].as_str())
            .collect();
        assert!(!ids.contains(&seed::ADMIN_PARTNER_ID));
        assert!(!ids.contains(&seed::PENDING_PARTNER_ID));
        assert!(ids.contains(&seed::AGENCY_PARTNER_ID));
        assert!(body[0].get("password").is_none());
    }

    #[tokio::test]
    async fn submitted_lead_shows_up_in_the_partner_dashboard() {
        let state = state();
        let router = catalog_router(state.clone());
        let before = read_json(
            send(
                &router,
                get_as("/api/v1/dashboard/leads", Some(seed::FINISHING_PARTNER_ID)),
            )
            .await,
        )
        .await;

        let response = send(
            &router,
            json_request(
                "POST",
                "/api/v1/leads",
                None,
                json!({
                    "partnerId": seed::FINISHING_PARTNER_ID,
                    "customerName": "Ali",
                    "customerPhone": "0100000000",
                    "serviceTitle": "Kitchen"
                }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = read_json(response).await;
        assert_eq!(created["status"], "new");

        let after = read_json(
            send(
                &router,
                get_as("/api/v1/dashboard/leads", Some(seed::FINISHING_PARTNER_ID)),
            )
            .await,
        )
        .await;
        let before_len = before.as_array().map_or(0, Vec::len);
        assert_eq!(after.as_array().map(Vec::len), Some(before_len + 1));
        assert_eq!(after[0]["id"], created["id"]);
    }

    #[tokio::test]
    async fn invalid_lead_form_is_rejected_with_the_field() {
        let router = catalog_router(state());
        let response = send(
            &router,
            json_request(
                "POST",
                "/api/v1/leads",
                None,
                json!({
                    "partnerId": seed::FINISHING_PARTNER_ID,
                    "customerName": "Ali",
                    "customerPhone": "12",
                    "serviceTitle": "Kitchen"
                }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(read_json(response).await["field"], "customerPhone");
    }

    #[tokio::test]
    async fn dashboard_requires_a_known_active_partner() {
        let router = catalog_router(state());
        let anonymous = send(&router, get_as("/api/v1/dashboard/leads", None)).await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        let pending = send(
            &router,
            get_as("/api/v1/dashboard/leads", Some(seed::PENDING_PARTNER_ID)),
        )
        .await;
        assert_eq!(pending.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn partners_cannot_edit_each_others_leads() {
        let router = catalog_router(state());
        let response = send(
            &router,
            json_request(
                "PATCH",
                "/api/v1/dashboard/leads/lead-seed-1",
                Some(seed::AGENCY_PARTNER_ID),
                json!({ "status": "completed" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = send(
            &router,
            json_request(
                "PATCH",
                "/api/v1/dashboard/leads/lead-seed-1",
                Some(seed::ADMIN_PARTNER_ID),
                json!({ "status": "completed", "internalNotes": "closed by admin" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["status"], "completed");
        assert_eq!(body["internalNotes"], "closed by admin");
    }

    #[tokio::test]
    async fn deleting_a_missing_property_is_404() {
        let router = catalog_router(state());
        let response = send(
            &router,
            Request::delete("/api/v1/dashboard/properties/property-missing")
                .header(PARTNER_HEADER, seed::ADMIN_PARTNER_ID)
                .body(Body::empty())
                .expect("request"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn approving_a_partner_refreshes_the_public_list() {
        let router = catalog_router(state());
        let before = read_json(send(&router, get_as("/api/v1/partners", None)).await).await;
        assert!(!before.to_string().contains(seed::PENDING_PARTNER_ID));

        let uri = format!("/api/v1/admin/partners/{}/status", seed::PENDING_PARTNER_ID);
        let denied = send(
            &router,
            json_request("PATCH", &uri, Some(seed::AGENCY_PARTNER_ID), json!({ "status": "active" })),
        )
        .await;
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);

        let approved = send(
            &router,
            json_request("PATCH", &uri, Some(seed::ADMIN_PARTNER_ID), json!({ "status": "active" })),
        )
        .await;
        assert_eq!(approved.status(), StatusCode::OK);

        let after = read_json(send(&router, get_as("/api/v1/partners", None)).await).await;
        assert!(after.to_string().contains(seed::PENDING_PARTNER_ID));
    }

    #[tokio::test]
    async fn subscription_must_match_the_partner_audience() {
        let router = catalog_router(state());
        let uri = format!("/api/v1/admin/partners/{}/subscription", seed::AGENCY_PARTNER_ID);

        let mismatch = send(
            &router,
            json_request(
                "PATCH",
                &uri,
                Some(seed::ADMIN_PARTNER_ID),
                json!({ "planId": "plan-developers-elite", "endsOn": "2026-01-31" }),
            ),
        )
        .await;
        assert_eq!(mismatch.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let accepted = send(
            &router,
            json_request(
                "PATCH",
                &uri,
                Some(seed::ADMIN_PARTNER_ID),
                json!({ "planId": "plan-agencies-professional", "endsOn": "2026-01-31" }),
            ),
        )
        .await;
        assert_eq!(accepted.status(), StatusCode::OK);
        let body = read_json(accepted).await;
        assert_eq!(body["subscription"]["planId"], "plan-agencies-professional");
    }

    #[tokio::test]
    async fn lead_export_is_a_scoped_csv_attachment() {
        let router = catalog_router(state());
        let response = send(
            &router,
            get_as(
                "/api/v1/dashboard/export/leads?lang=en",
                Some(seed::FINISHING_PARTNER_ID),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .expect("ascii header")
            .contains("leads-"));

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        let text = String::from_utf8(body.to_vec()).expect("utf-8");
        let own = seed::demo_catalog()
            .leads
            .iter()
            .filter(|lead| lead.partner_id == seed::FINISHING_PARTNER_ID)
            .count();
        assert!(text.starts_with(csv::BOM));
        assert_eq!(csv_records(&text), own);
    }

    #[tokio::test]
    async fn partner_export_is_admin_only() {
        let router = catalog_router(state());
        let denied = send(
            &router,
            get_as("/api/v1/dashboard/export/partners", Some(seed::AGENCY_PARTNER_ID)),
        )
        .await;
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);

        let unknown = send(
            &router,
            get_as("/api/v1/dashboard/export/invoices", Some(seed::ADMIN_PARTNER_ID)),
        )
        .await;
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn summary_scope_follows_the_principal() {
        let router = catalog_router(state());
        let admin = read_json(
            send(
                &router,
                get_as(
                    "/api/v1/dashboard/summary?lang=en&today=2025-03-20",
                    Some(seed::ADMIN_PARTNER_ID),
                ),
            )
            .await,
        )
        .await;
        assert_eq!(admin["scope"], "admin");
        assert!(admin["partners"].is_object());

        let partner = read_json(
            send(
                &router,
                get_as(
                    "/api/v1/dashboard/summary?today=2025-03-20",
                    Some(seed::DEVELOPER_PARTNER_ID),
                ),
            )
            .await,
        )
        .await;
        assert_eq!(partner["scope"], "partner");
        assert_eq!(partner["locale"], "ar");
        assert!(partner.get("partners").is_none());
    }

    #[tokio::test]
    async fn search_parameter_order_shares_one_cache_entry() {
        let state = state();
        let router = catalog_router(state.clone());

        let first = send(&router, get_as("/api/v1/properties?kind=apartment&minBedrooms=2", None)).await;
        let second = send(&router, get_as("/api/v1/properties?minBedrooms=2&kind=apartment", None)).await;
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(read_json(first).await, read_json(second).await);
        assert_eq!(state.queries.len(), 1);
    }

    #[tokio::test]
    async fn property_edit_cannot_break_creation_rules() {
        let state = state();
        let router = catalog_router(state.clone());
        let target = seed::demo_catalog()
            .properties
            .into_iter()
            .next()
            .expect("seed has properties");
        let uri = format!("/api/v1/dashboard/properties/{}", target.id);

        let zero_price = send(
            &router,
            json_request("PATCH", &uri, Some(seed::ADMIN_PARTNER_ID), json!({ "price": 0 })),
        )
        .await;
        assert_eq!(zero_price.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(read_json(zero_price).await["field"], "price");

        let inverted = send(
            &router,
            json_request(
                "PATCH",
                &uri,
                Some(seed::ADMIN_PARTNER_ID),
                json!({ "listing": { "start": "2025-06-01", "end": "2024-01-01" } }),
            ),
        )
        .await;
        assert_eq!(inverted.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(read_json(inverted).await["field"], "listing");

        let stored = state
            .catalog
            .properties
            .get_property_by_id(&target.id)
            .await
            .expect("lookup resolves")
            .expect("property exists");
        assert_eq!(stored, target);

        let repriced = send(
            &router,
            json_request("PATCH", &uri, Some(seed::ADMIN_PARTNER_ID), json!({ "price": 4_200_000 })),
        )
        .await;
        assert_eq!(repriced.status(), StatusCode::OK);
        assert_eq!(read_json(repriced).await["price"], 4_200_000);
    }

    #[tokio::test]
    async fn multi_line_notes_stay_inside_one_csv_record() {
        let state = state();
        let router = catalog_router(state.clone());
        let leads = state
            .catalog
            .leads
            .get_leads_by_partner(seed::FINISHING_PARTNER_ID)
            .await
            .expect("leads listed");
        let first = leads.first().expect("partner has leads");
        state
            .catalog
            .leads
            .update_lead(
                &first.id,
                LeadUpdate {
                    internal_notes: Some("Called twice\nPrefers evenings".to_string()),
                    ..LeadUpdate::default()
                },
            )
            .await
            .expect("update resolves")
            .expect("lead exists");

        let response = send(
            &router,
            get_as(
                "/api/v1/dashboard/export/leads?lang=en",
                Some(seed::FINISHING_PARTNER_ID),
            ),
        )
        .await;
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        let text = String::from_utf8(body.to_vec()).expect("utf-8");
        assert!(text.contains("Called twice\nPrefers evenings"));
        assert_eq!(csv_records(&text), leads.len());
    }
}
