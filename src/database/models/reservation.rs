use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

/// A booking of a hall by a reservation holder.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub reservation_id: i32,
    pub reserver_id: i32,
    pub hall_id: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub purpose: Option<String>,
    /// Defaults to "pending" at the database level.
    pub status: Option<String>,
    pub food_requirement: Option<bool>,
}
