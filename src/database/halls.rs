use serde::Deserialize;
use serde_json::Value;
use sqlx::PgPool;
use thiserror::Error;

use super::models::Hall;

/// Errors raised by hall operations. HTTP status mapping lives in the
/// handler layer, never here.
#[derive(Debug, Error)]
pub enum HallError {
    #[error("The following required fields are missing: {}. Please provide all required information and try again.", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("A hall with this name already exists. Please choose a different name.")]
    DuplicateName,

    #[error("No hall found with the id {0}")]
    NotFound(i32),

    #[error("Invalid column name: {0}. Valid columns are: hallName, hallFacility, capacity, type, primaryInCharge")]
    InvalidColumn(String),

    #[error("Invalid value for {field}: expected {expected}")]
    InvalidValue {
        field: &'static str,
        expected: &'static str,
    },

    #[error("An unexpected database error occurred")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for HallError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // hall_name carries the only unique constraint on this table
            if db_err.is_unique_violation() {
                return HallError::DuplicateName;
            }
        }
        HallError::Database(err)
    }
}

/// Incoming hall payload. All five fields are required; presence is checked
/// here so the error can name every missing field at once.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HallDraft {
    pub hall_name: Option<String>,
    pub hall_facility: Option<String>,
    pub capacity: Option<i32>,
    #[serde(rename = "type")]
    pub hall_type: Option<String>,
    pub primary_in_charge: Option<String>,
}

impl HallDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.hall_name.is_none() {
            missing.push("hallName");
        }
        if self.hall_facility.is_none() {
            missing.push("hallFacility");
        }
        if self.capacity.is_none() {
            missing.push("capacity");
        }
        if self.hall_type.is_none() {
            missing.push("type");
        }
        if self.primary_in_charge.is_none() {
            missing.push("primaryInCharge");
        }
        missing
    }
}

/// Closed mapping from the logical field names accepted by the update
/// endpoint to physical columns. No caller-supplied string ever reaches the
/// generated SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HallField {
    Name,
    Facility,
    Capacity,
    Type,
    PrimaryInCharge,
}

impl HallField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "hallName" => Some(Self::Name),
            "hallFacility" => Some(Self::Facility),
            "capacity" => Some(Self::Capacity),
            "type" => Some(Self::Type),
            "primaryInCharge" => Some(Self::PrimaryInCharge),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Name => "hall_name",
            Self::Facility => "hall_facility",
            Self::Capacity => "capacity",
            Self::Type => "\"type\"",
            Self::PrimaryInCharge => "primary_in_charge",
        }
    }

    fn logical_name(self) -> &'static str {
        match self {
            Self::Name => "hallName",
            Self::Facility => "hallFacility",
            Self::Capacity => "capacity",
            Self::Type => "type",
            Self::PrimaryInCharge => "primaryInCharge",
        }
    }
}

/// Insert a new hall and return the stored row.
pub async fn add_hall(pool: &PgPool, draft: HallDraft) -> Result<Hall, HallError> {
    let missing = draft.missing_fields();
    if !missing.is_empty() {
        return Err(HallError::MissingFields(missing));
    }

    let hall = sqlx::query_as::<_, Hall>(
        r#"
        INSERT INTO halls (hall_name, hall_facility, capacity, "type", primary_in_charge)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING hall_id, hall_name, hall_facility, capacity, "type", primary_in_charge
        "#,
    )
    .bind(draft.hall_name)
    .bind(draft.hall_facility)
    .bind(draft.capacity)
    .bind(draft.hall_type)
    .bind(draft.primary_in_charge)
    .fetch_one(pool)
    .await?;

    Ok(hall)
}

/// Delete a hall by id. Dependent reservations go with it via the
/// database-level cascade; no related rows are read back here.
pub async fn delete_hall_by_id(pool: &PgPool, hall_id: i32) -> Result<String, HallError> {
    let result = sqlx::query("DELETE FROM halls WHERE hall_id = $1")
        .bind(hall_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(HallError::NotFound(hall_id));
    }

    Ok(format!("Hall \"{hall_id}\" has been deleted."))
}

/// Update a single column of a hall. The column comes from the
/// [`HallField`] allow-list and the value is checked against that column's
/// type before any statement is issued.
pub async fn update_hall(
    pool: &PgPool,
    hall_id: i32,
    column_name: &str,
    new_value: Value,
) -> Result<String, HallError> {
    let field = HallField::parse(column_name)
        .ok_or_else(|| HallError::InvalidColumn(column_name.to_string()))?;

    let sql = format!("UPDATE halls SET {} = $1 WHERE hall_id = $2", field.column());
    let query = match field {
        HallField::Capacity => {
            let capacity = new_value
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .ok_or(HallError::InvalidValue {
                    field: field.logical_name(),
                    expected: "an integer",
                })?;
            sqlx::query(&sql).bind(capacity)
        }
        _ => {
            let text = new_value
                .as_str()
                .ok_or(HallError::InvalidValue {
                    field: field.logical_name(),
                    expected: "a string",
                })?
                .to_owned();
            sqlx::query(&sql).bind(text)
        }
    };

    let result = query.bind(hall_id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(HallError::NotFound(hall_id));
    }

    Ok(format!("Hall with ID \"{hall_id}\" has been updated."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lists_every_missing_field_in_check_order() {
        let err = HallError::MissingFields(HallDraft::default().missing_fields());
        assert_eq!(
            err.to_string(),
            "The following required fields are missing: hallName, hallFacility, capacity, type, primaryInCharge. \
             Please provide all required information and try again."
        );
    }

    #[test]
    fn partially_filled_draft_names_only_the_gaps() {
        let draft = HallDraft {
            hall_name: Some("Room A".into()),
            capacity: Some(0),
            ..Default::default()
        };
        assert_eq!(draft.missing_fields(), vec!["hallFacility", "type", "primaryInCharge"]);
    }

    #[test]
    fn zero_capacity_counts_as_present() {
        let draft = HallDraft { capacity: Some(0), ..Default::default() };
        assert!(!draft.missing_fields().contains(&"capacity"));
    }

    #[test]
    fn field_allow_list_is_closed() {
        for name in ["hallName", "hallFacility", "capacity", "type", "primaryInCharge"] {
            assert!(HallField::parse(name).is_some(), "{name} should be allowed");
        }
        for name in ["hallId", "hall_name", "password", "", "capacity "] {
            assert!(HallField::parse(name).is_none(), "{name} should be rejected");
        }
    }

    #[test]
    fn invalid_column_error_names_the_offender_and_options() {
        let err = HallError::InvalidColumn("password".into());
        assert_eq!(
            err.to_string(),
            "Invalid column name: password. Valid columns are: hallName, hallFacility, capacity, type, primaryInCharge"
        );
    }

    // A lazily-connecting pool never opens a connection, so rejection paths
    // that precede the statement can run without a database.
    fn disconnected_pool() -> PgPool {
        sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost:5432/unreachable")
            .unwrap()
    }

    #[tokio::test]
    async fn update_rejects_unknown_columns_before_touching_the_store() {
        let pool = disconnected_pool();
        let err = update_hall(&pool, 1, "hallId", json!("x")).await.unwrap_err();
        assert!(matches!(err, HallError::InvalidColumn(ref name) if name == "hallId"));
    }

    #[tokio::test]
    async fn update_rejects_string_values_for_capacity() {
        let pool = disconnected_pool();
        let err = update_hall(&pool, 1, "capacity", json!("forty-two")).await.unwrap_err();
        assert!(matches!(
            err,
            HallError::InvalidValue { field: "capacity", expected: "an integer" }
        ));
    }

    #[tokio::test]
    async fn update_rejects_numeric_values_for_text_columns() {
        let pool = disconnected_pool();
        let err = update_hall(&pool, 1, "hallName", json!(12)).await.unwrap_err();
        assert!(matches!(err, HallError::InvalidValue { field: "hallName", .. }));
    }

    #[test]
    fn not_found_message_references_the_id() {
        assert_eq!(HallError::NotFound(9999).to_string(), "No hall found with the id 9999");
    }
}
