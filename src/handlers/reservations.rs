use axum::{extract::Extension, response::Json};
use sqlx::PgPool;

use crate::database::models::Reservation;
use crate::database::reservations as queries;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/reservations
pub async fn list_reservations(
    Extension(pool): Extension<PgPool>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    tracing::debug!(user = auth_user.user, "listing reservations");

    let reservations = queries::list_reservations(&pool).await?;
    Ok(Json(reservations))
}
