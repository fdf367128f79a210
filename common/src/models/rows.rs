//! Result rows of the benchmark functions.
//!
//! Each struct mirrors the output columns of one `public.perf_*` function and
//! is decoded with `sqlx::FromRow`. Field names are the JSON field names.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Row of `public.perf_test`: one column per supported PostgreSQL type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PerfTestRow {
    pub row_num: i32,
    pub text_val: String,
    pub varchar_val: String,
    pub char_val: String,
    pub smallint_val: i16,
    pub int_val: i32,
    pub bigint_val: i64,
    /// `numeric` read as double precision.
    pub numeric_val: f64,
    pub real_val: f32,
    pub double_val: f64,
    pub bool_val: bool,
    pub date_val: NaiveDate,
    /// `time` rendered by PostgreSQL as text.
    pub time_val: String,
    pub timestamp_val: NaiveDateTime,
    pub timestamptz_val: DateTime<Utc>,
    /// `interval` rendered by PostgreSQL as text.
    pub interval_val: String,
    #[schema(value_type = String)]
    pub uuid_val: Uuid,
    #[schema(value_type = Object)]
    pub json_val: serde_json::Value,
    #[schema(value_type = Object)]
    pub jsonb_val: serde_json::Value,
    pub int_array_val: Vec<i32>,
    pub text_array_val: Vec<String>,
    pub nullable_text: Option<String>,
    pub nullable_int: Option<i32>,
}

/// Row of `public.perf_minimal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MinimalRow {
    pub status: String,
    pub ts: DateTime<Utc>,
}

/// Row of `public.perf_post`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PostRow {
    pub row_num: i32,
    /// The submitted payload as seen by the database.
    #[schema(value_type = Object)]
    pub echo: serde_json::Value,
    pub computed: String,
}

/// Row of `public.perf_nested`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct NestedRow {
    pub row_num: i32,
    #[schema(value_type = Object)]
    pub nested: serde_json::Value,
}

/// Row of `public.perf_large_payload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LargePayloadRow {
    pub data: String,
}

/// Row of `public.perf_many_params`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ManyParamsRow {
    pub param_count: i32,
    pub checksum: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nullable_columns_serialize_as_null() {
        let row = PerfTestRow {
            row_num: 1,
            text_val: "a".into(),
            varchar_val: "b".into(),
            char_val: "c".into(),
            smallint_val: 1,
            int_val: 2,
            bigint_val: 3,
            numeric_val: 1.5,
            real_val: 2.5,
            double_val: 3.5,
            bool_val: true,
            date_val: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            time_val: "10:30:00".into(),
            timestamp_val: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            timestamptz_val: DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            interval_val: "1 day".into(),
            uuid_val: Uuid::nil(),
            json_val: json!({"key": "value"}),
            jsonb_val: json!({"key": "value"}),
            int_array_val: vec![1, 2, 3],
            text_array_val: vec!["a".into()],
            nullable_text: None,
            nullable_int: Some(7),
        };

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["nullable_text"], serde_json::Value::Null);
        assert_eq!(value["nullable_int"], json!(7));
        assert_eq!(value["json_val"], json!({"key": "value"}));
        assert_eq!(value["date_val"], json!("2024-01-15"));
        assert_eq!(value["uuid_val"], json!("00000000-0000-0000-0000-000000000000"));
        assert_eq!(value.as_object().unwrap().len(), 23);
    }
}
