use serde::Serialize;
use sqlx::FromRow;

/// A reservable venue record.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Hall {
    pub hall_id: i32,
    pub hall_name: String,
    pub hall_facility: String,
    pub capacity: i32,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub hall_type: String,
    pub primary_in_charge: String,
}
