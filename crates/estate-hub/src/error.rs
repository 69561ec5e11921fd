use crate::access::AccessError;
use crate::catalog::{CatalogError, StoreError, ValidationError};
use crate::config::ConfigError;
use crate::export::ExportError;
use crate::query::QueryError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Catalog(CatalogError),
    Query(QueryError),
    Export(ExportError),
    Access(AccessError),
    Validation(ValidationError),
    NotFound { resource: &'static str, id: String },
    BadRequest(String),
}

impl AppError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Access(AccessError::UnknownPartner(_)) => StatusCode::UNAUTHORIZED,
            AppError::Access(_) => StatusCode::FORBIDDEN,
            AppError::Catalog(CatalogError::Store(StoreError::Conflict(_))) => {
                StatusCode::CONFLICT
            }
            AppError::Query(err)
                if matches!(
                    err.downcast_ref::<CatalogError>(),
                    Some(CatalogError::Store(StoreError::Unavailable(_)))
                ) =>
            {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Catalog(CatalogError::Store(StoreError::Unavailable(_))) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Query(_)
            | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Query(err) => write!(f, "query failed: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
            AppError::Access(err) => write!(f, "{}", err),
            AppError::Validation(err) => write!(f, "invalid {}", err),
            AppError::NotFound { resource, id } => write!(f, "{} '{}' not found", resource, id),
            AppError::BadRequest(message) => write!(f, "bad request: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Query(err) => Some(err),
            AppError::Export(err) => Some(err),
            AppError::Access(err) => Some(err),
            AppError::Validation(err) => Some(err),
            AppError::NotFound { .. } | AppError::BadRequest(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Validation(err) => json!({
                "error": self.to_string(),
                "field": err.field,
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<QueryError> for AppError {
    fn from(value: QueryError) -> Self {
        Self::Query(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl From<AccessError> for AppError {
    fn from(value: AccessError) -> Self {
        Self::Access(value)
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
