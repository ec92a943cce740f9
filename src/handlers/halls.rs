use axum::{extract::Extension, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::database::halls::{self as queries, HallDraft, HallError};
use crate::error::ApiError;

/// POST /api/halls/addHall
pub async fn add_hall(
    Extension(pool): Extension<PgPool>,
    Json(draft): Json<HallDraft>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let hall = queries::add_hall(&pool, draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Hall added successfully", "data": hall })),
    ))
}

/// DELETE /api/halls/deleteHall
pub async fn delete_hall(
    Extension(pool): Extension<PgPool>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let raw = payload
        .get("hallId")
        .filter(|v| !v.is_null())
        .ok_or_else(|| ApiError::bad_request("Missing field: hallId"))?;
    let hall_id = coerce_hall_id(raw)
        .ok_or_else(|| ApiError::bad_request("Invalid field: hallId must be an integer"))?;

    let message = queries::delete_hall_by_id(&pool, hall_id).await?;
    Ok(Json(json!({ "message": message })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateHallRequest {
    #[serde(rename = "hallId")]
    pub hall_id: Value,
    pub field_name: String,
    pub changes: Value,
}

/// PATCH /api/halls/update
///
/// Error mapping here is deliberately coarse: every failure answers 500
/// with the error text, matching the rest of the public contract.
pub async fn update_hall(
    Extension(pool): Extension<PgPool>,
    Json(request): Json<UpdateHallRequest>,
) -> Result<Json<Value>, ApiError> {
    let hall_id = coerce_hall_id(&request.hall_id)
        .ok_or_else(|| ApiError::internal_server_error("hallId must be an integer"))?;

    match queries::update_hall(&pool, hall_id, &request.field_name, request.changes).await {
        Ok(message) => Ok(Json(json!({ "message": message }))),
        Err(err) => {
            if let HallError::Database(ref source) = err {
                tracing::error!("hall update failed: {source}");
            }
            Err(ApiError::internal_server_error(err.to_string()))
        }
    }
}

/// The id arrives as a JSON number or a numeric string; anything else is
/// rejected rather than treated as a missing row.
fn coerce_hall_id(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}
