use axum::{extract::Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
pub struct CalcRequest {
    pub num1: f64,
    pub num2: f64,
    pub op: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalcResponse {
    pub result: f64,
}

pub fn evaluate(num1: f64, num2: f64, op: &str) -> Result<f64> {
    match op {
        "+" => Ok(num1 + num2),
        "-" => Ok(num1 - num2),
        "*" => Ok(num1 * num2),
        "/" if num2 == 0.0 => Err(AppError::Validation("Division by zero".into())),
        "/" => Ok(num1 / num2),
        other => Err(AppError::Validation(format!("unknown operator {:?}", other))),
    }
}

pub async fn calculate(Json(request): Json<CalcRequest>) -> Result<impl IntoResponse> {
    let result = evaluate(request.num1, request.num2, request.op.trim())?;
    Ok((StatusCode::OK, Json(CalcResponse { result })))
}
