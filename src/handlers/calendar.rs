use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Local;

use crate::{
    calendar::{self, CalendarQuery},
    error::Result,
    handlers::AppState,
};

/// Calendar view for `?period=today|tomorrow|week|month|year&year=&month=&day=`
pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse> {
    let (period, reference) = query.resolve(Local::now().date_naive());
    let view = calendar::aggregate(period, reference, &*state.deliveries).await?;
    Ok((StatusCode::OK, Json(view)))
}
