use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    calendar::parse_iso_date,
    error::{AppError, Result},
    handlers::AppState,
    models::{NewDelivery, RescheduleRequest},
};

/// Optional filters for the delivery list
#[derive(Debug, Default, Deserialize)]
pub struct DeliveryFilter {
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// List deliveries, optionally restricted to one date or a date range
pub async fn list_deliveries(
    State(state): State<AppState>,
    Query(filter): Query<DeliveryFilter>,
) -> Result<impl IntoResponse> {
    let deliveries = match (filter.date, filter.start, filter.end) {
        (Some(date), _, _) => state.deliveries.list_on(query_date("date", &date)?).await?,
        (None, Some(start), Some(end)) => {
            state
                .deliveries
                .list_in_range(query_date("start", &start)?, query_date("end", &end)?)
                .await?
        }
        (None, None, None) => state.deliveries.list_all().await?,
        _ => {
            return Err(AppError::Validation(
                "start and end must be given together".into(),
            ));
        }
    };

    Ok((StatusCode::OK, Json(deliveries)))
}

/// Create delivery handler
pub async fn create_delivery(
    State(state): State<AppState>,
    Json(new_delivery): Json<NewDelivery>,
) -> Result<impl IntoResponse> {
    let id = state.deliveries.create(new_delivery).await?;
    let delivery = state.deliveries.get(id).await?;
    Ok((StatusCode::CREATED, Json(delivery)))
}

/// Get delivery by ID handler
pub async fn get_delivery(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let delivery = state.deliveries.get(id).await?;
    Ok((StatusCode::OK, Json(delivery)))
}

/// Drag/drop reschedule handler
pub async fn reschedule_delivery(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<RescheduleRequest>,
) -> Result<impl IntoResponse> {
    let delivery = state
        .deliveries
        .reschedule(id, &request.delivery_date)
        .await?;
    Ok((StatusCode::OK, Json(delivery)))
}

/// Delete delivery handler
pub async fn delete_delivery(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.deliveries.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Configured gates and zones for the entry form
pub async fn get_options(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.deliveries.options().clone())
}

fn query_date(name: &str, raw: &str) -> Result<chrono::NaiveDate> {
    parse_iso_date(raw.trim())
        .ok_or_else(|| AppError::Validation(format!("{} {:?} is not YYYY-MM-DD", name, raw)))
}
