use sqlx::PgPool;

use super::models::Reservation;

/// Fetch every reservation on record.
pub async fn list_reservations(pool: &PgPool) -> Result<Vec<Reservation>, sqlx::Error> {
    sqlx::query_as::<_, Reservation>(
        "SELECT reservation_id, reserver_id, hall_id, date, start_time, end_time, \
         purpose, status, food_requirement FROM reservation",
    )
    .fetch_all(pool)
    .await
}
