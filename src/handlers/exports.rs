use crate::auth::AuthenticatedUser;
use crate::errors::ServiceError;
use crate::services::export::ExportFile;
use crate::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::get,
    Router,
};

fn csv_download(file: ExportFile) -> Result<impl IntoResponse, ServiceError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| ServiceError::InternalError(e.to_string()))?,
    );
    Ok((headers, file.bytes))
}

async fn export_milk_production(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    csv_download(state.services.export.milk_production().await?)
}

async fn export_health_records(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    csv_download(state.services.export.health_records().await?)
}

async fn export_sales(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    csv_download(state.services.export.sales().await?)
}

async fn export_payments(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    csv_download(state.services.export.payments().await?)
}

async fn export_expenses(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    csv_download(state.services.export.expenses().await?)
}

async fn export_vaccinations(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    csv_download(state.services.export.vaccinations().await?)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/export/milk_production", get(export_milk_production))
        .route("/export/health_records", get(export_health_records))
        .route("/export/sales", get(export_sales))
        .route("/export/payments", get(export_payments))
        .route("/export/expenses", get(export_expenses))
        .route("/export/vaccinations", get(export_vaccinations))
}
