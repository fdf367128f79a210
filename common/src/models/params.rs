//! Request parameters and the positional arguments derived from them.
//!
//! Query values are forwarded as raw text and cast inside SQL, so nothing
//! here validates a value beyond presence. The only conversions done locally
//! are defaults and the permissive boolean rule in [`flag`].

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::errors::{AppError, AppResult};

/// Default `_records` for the nested endpoint.
pub const DEFAULT_NESTED_RECORDS: &str = "100";
/// Default `_depth` for the nested endpoint.
pub const DEFAULT_NESTED_DEPTH: &str = "3";
/// Default `_size_kb` for the large payload endpoint.
pub const DEFAULT_PAYLOAD_SIZE_KB: &str = "100";
/// Default `_records` for the POST endpoint.
pub const DEFAULT_POST_RECORDS: i32 = 10;

/// `"true"` is true, everything else (absent included) is false.
pub fn flag(value: Option<&str>) -> bool {
    value == Some("true")
}

/// First value of `key` in a raw query string; repeats are ignored.
fn first(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
}

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn text_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

// ============== /api/perf-test ==============

/// Query string of `GET /api/perf-test`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PerfTestQuery {
    /// Number of rows to generate (required).
    #[serde(rename = "_records")]
    pub records: Option<String>,
    #[serde(rename = "_text")]
    pub text: Option<String>,
    #[serde(rename = "_int")]
    pub int: Option<String>,
    #[serde(rename = "_bigint")]
    pub bigint: Option<String>,
    #[serde(rename = "_numeric")]
    pub numeric: Option<String>,
    #[serde(rename = "_real")]
    pub real: Option<String>,
    #[serde(rename = "_double")]
    pub double: Option<String>,
    /// `true` or anything else.
    #[serde(rename = "_bool")]
    pub bool: Option<String>,
    #[serde(rename = "_date")]
    pub date: Option<String>,
    #[serde(rename = "_timestamp")]
    pub timestamp: Option<String>,
    #[serde(rename = "_timestamptz")]
    pub timestamptz: Option<String>,
    #[serde(rename = "_uuid")]
    pub uuid: Option<String>,
    #[serde(rename = "_json")]
    pub json: Option<String>,
    #[serde(rename = "_jsonb")]
    pub jsonb: Option<String>,
    /// PostgreSQL array literal, e.g. `{1,2,3}`.
    #[serde(rename = "_int_array")]
    pub int_array: Option<String>,
    /// PostgreSQL array literal, e.g. `{a,b,c}`.
    #[serde(rename = "_text_array")]
    pub text_array: Option<String>,
}

/// Arguments of `public.perf_test`, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerfTestArgs {
    pub records: String,
    pub text: String,
    pub int: String,
    pub bigint: String,
    pub numeric: String,
    pub real: String,
    pub double: String,
    pub bool: bool,
    pub date: String,
    pub timestamp: String,
    pub timestamptz: String,
    pub uuid: String,
    pub json: String,
    pub jsonb: String,
    pub int_array: String,
    pub text_array: String,
}

impl PerfTestQuery {
    /// Builds the query from raw `key=value` pairs, first occurrence wins.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            records: first(pairs, "_records"),
            text: first(pairs, "_text"),
            int: first(pairs, "_int"),
            bigint: first(pairs, "_bigint"),
            numeric: first(pairs, "_numeric"),
            real: first(pairs, "_real"),
            double: first(pairs, "_double"),
            bool: first(pairs, "_bool"),
            date: first(pairs, "_date"),
            timestamp: first(pairs, "_timestamp"),
            timestamptz: first(pairs, "_timestamptz"),
            uuid: first(pairs, "_uuid"),
            json: first(pairs, "_json"),
            jsonb: first(pairs, "_jsonb"),
            int_array: first(pairs, "_int_array"),
            text_array: first(pairs, "_text_array"),
        }
    }

    /// Fails with a bad request when `_records` is absent or empty.
    pub fn into_args(self) -> AppResult<PerfTestArgs> {
        let records = self
            .records
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::BadRequest("Missing _records parameter".to_string()))?;

        Ok(PerfTestArgs {
            records,
            bool: flag(self.bool.as_deref()),
            text: text(self.text),
            int: text(self.int),
            bigint: text(self.bigint),
            numeric: text(self.numeric),
            real: text(self.real),
            double: text(self.double),
            date: text(self.date),
            timestamp: text(self.timestamp),
            timestamptz: text(self.timestamptz),
            uuid: text(self.uuid),
            json: text(self.json),
            jsonb: text(self.jsonb),
            int_array: text(self.int_array),
            text_array: text(self.text_array),
        })
    }
}

// ============== /api/perf-post ==============

/// JSON body of `POST /api/perf-post`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PerfPostBody {
    /// Rows to generate; `0` or absent means 10.
    #[serde(rename = "_records", default)]
    pub records: Option<i32>,
    /// Arbitrary object echoed back by the database.
    #[serde(rename = "_payload", default)]
    #[schema(value_type = Option<Object>)]
    pub payload: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Arguments of `public.perf_post`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerfPostArgs {
    pub records: i32,
    /// Payload serialized as JSON text, cast to `jsonb` in SQL.
    pub payload: String,
}

impl PerfPostBody {
    /// Decodes the raw request body. A JSON `null` body counts as `{}`; any
    /// other decode failure is a bad request.
    pub fn from_slice(body: &[u8]) -> AppResult<Self> {
        serde_json::from_slice::<Option<Self>>(body)
            .map(Option::unwrap_or_default)
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }

    pub fn into_args(self) -> AppResult<PerfPostArgs> {
        let records = match self.records {
            None | Some(0) => DEFAULT_POST_RECORDS,
            Some(n) => n,
        };
        let payload = match self.payload {
            Some(map) => serde_json::to_string(&map),
            None => serde_json::to_string(&serde_json::Value::Null),
        }
        .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(PerfPostArgs { records, payload })
    }
}

// ============== /api/perf-nested ==============

/// Query string of `GET /api/perf-nested`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PerfNestedQuery {
    /// Rows to generate, default 100.
    #[serde(rename = "_records")]
    pub records: Option<String>,
    /// Nesting depth of each JSON document, default 3.
    #[serde(rename = "_depth")]
    pub depth: Option<String>,
}

/// Arguments of `public.perf_nested`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerfNestedArgs {
    pub records: String,
    pub depth: String,
}

impl PerfNestedQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            records: first(pairs, "_records"),
            depth: first(pairs, "_depth"),
        }
    }

    pub fn into_args(self) -> PerfNestedArgs {
        PerfNestedArgs {
            records: text_or(self.records, DEFAULT_NESTED_RECORDS),
            depth: text_or(self.depth, DEFAULT_NESTED_DEPTH),
        }
    }
}

// ============== /api/perf-large-payload ==============

/// Query string of `GET /api/perf-large-payload`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PerfLargePayloadQuery {
    /// Approximate payload size in KB, default 100.
    #[serde(rename = "_size_kb")]
    pub size_kb: Option<String>,
}

impl PerfLargePayloadQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            size_kb: first(pairs, "_size_kb"),
        }
    }

    /// Returns the `_size_kb` argument.
    pub fn into_size_kb(self) -> String {
        text_or(self.size_kb, DEFAULT_PAYLOAD_SIZE_KB)
    }
}

// ============== /api/perf-many-params ==============

/// Query string of `GET /api/perf-many-params`.
///
/// Parameters repeat the pattern text, int, bool, numeric, text four times.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PerfManyParamsQuery {
    #[serde(rename = "_p1")]
    pub p1: Option<String>,
    #[serde(rename = "_p2")]
    pub p2: Option<String>,
    #[serde(rename = "_p3")]
    pub p3: Option<String>,
    #[serde(rename = "_p4")]
    pub p4: Option<String>,
    #[serde(rename = "_p5")]
    pub p5: Option<String>,
    #[serde(rename = "_p6")]
    pub p6: Option<String>,
    #[serde(rename = "_p7")]
    pub p7: Option<String>,
    #[serde(rename = "_p8")]
    pub p8: Option<String>,
    #[serde(rename = "_p9")]
    pub p9: Option<String>,
    #[serde(rename = "_p10")]
    pub p10: Option<String>,
    #[serde(rename = "_p11")]
    pub p11: Option<String>,
    #[serde(rename = "_p12")]
    pub p12: Option<String>,
    #[serde(rename = "_p13")]
    pub p13: Option<String>,
    #[serde(rename = "_p14")]
    pub p14: Option<String>,
    #[serde(rename = "_p15")]
    pub p15: Option<String>,
    #[serde(rename = "_p16")]
    pub p16: Option<String>,
    #[serde(rename = "_p17")]
    pub p17: Option<String>,
    #[serde(rename = "_p18")]
    pub p18: Option<String>,
    #[serde(rename = "_p19")]
    pub p19: Option<String>,
    #[serde(rename = "_p20")]
    pub p20: Option<String>,
}

/// One text, int, bool, numeric, text group of `public.perf_many_params`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamGroup {
    pub text: String,
    pub int: String,
    pub flag: bool,
    pub numeric: String,
    pub trailing_text: String,
}

impl ParamGroup {
    fn new(
        text: Option<String>,
        int: Option<String>,
        flag_value: Option<String>,
        numeric: Option<String>,
        trailing_text: Option<String>,
    ) -> Self {
        Self {
            text: self::text(text),
            int: self::text(int),
            flag: flag(flag_value.as_deref()),
            numeric: self::text(numeric),
            trailing_text: self::text(trailing_text),
        }
    }
}

/// Arguments of `public.perf_many_params`, `$1..$20` as four groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerfManyParamsArgs {
    pub groups: [ParamGroup; 4],
}

impl PerfManyParamsQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            p1: first(pairs, "_p1"),
            p2: first(pairs, "_p2"),
            p3: first(pairs, "_p3"),
            p4: first(pairs, "_p4"),
            p5: first(pairs, "_p5"),
            p6: first(pairs, "_p6"),
            p7: first(pairs, "_p7"),
            p8: first(pairs, "_p8"),
            p9: first(pairs, "_p9"),
            p10: first(pairs, "_p10"),
            p11: first(pairs, "_p11"),
            p12: first(pairs, "_p12"),
            p13: first(pairs, "_p13"),
            p14: first(pairs, "_p14"),
            p15: first(pairs, "_p15"),
            p16: first(pairs, "_p16"),
            p17: first(pairs, "_p17"),
            p18: first(pairs, "_p18"),
            p19: first(pairs, "_p19"),
            p20: first(pairs, "_p20"),
        }
    }

    pub fn into_args(self) -> PerfManyParamsArgs {
        PerfManyParamsArgs {
            groups: [
                ParamGroup::new(self.p1, self.p2, self.p3, self.p4, self.p5),
                ParamGroup::new(self.p6, self.p7, self.p8, self.p9, self.p10),
                ParamGroup::new(self.p11, self.p12, self.p13, self.p14, self.p15),
                ParamGroup::new(self.p16, self.p17, self.p18, self.p19, self.p20),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_only_accepts_exact_true() {
        assert!(flag(Some("true")));
        assert!(!flag(Some("TRUE")));
        assert!(!flag(Some("1")));
        assert!(!flag(Some("yes")));
        assert!(!flag(Some("")));
        assert!(!flag(None));
    }

    #[test]
    fn test_perf_test_requires_records() {
        let err = PerfTestQuery::default().into_args().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_string(), "Missing _records parameter");

        let empty = PerfTestQuery {
            records: Some(String::new()),
            ..Default::default()
        };
        assert!(empty.into_args().is_err());
    }

    #[test]
    fn test_perf_test_fills_missing_values_with_empty_text() {
        let args = PerfTestQuery {
            records: Some("10".into()),
            int: Some("42".into()),
            bool: Some("true".into()),
            int_array: Some("{1,2,3}".into()),
            ..Default::default()
        }
        .into_args()
        .unwrap();

        assert_eq!(args.records, "10");
        assert_eq!(args.int, "42");
        assert!(args.bool);
        assert_eq!(args.int_array, "{1,2,3}");
        assert_eq!(args.text, "");
        assert_eq!(args.uuid, "");
        assert_eq!(args.jsonb, "");
    }

    #[test]
    fn test_post_records_default_to_ten() {
        let absent = PerfPostBody::from_slice(b"{}").unwrap().into_args().unwrap();
        assert_eq!(absent.records, 10);

        let zero = PerfPostBody::from_slice(br#"{"_records":0}"#)
            .unwrap()
            .into_args()
            .unwrap();
        assert_eq!(zero.records, 10);

        let five = PerfPostBody::from_slice(br#"{"_records":5,"_payload":{"a":1}}"#)
            .unwrap()
            .into_args()
            .unwrap();
        assert_eq!(five.records, 5);
        assert_eq!(five.payload, r#"{"a":1}"#);
    }

    #[test]
    fn test_post_without_payload_sends_json_null() {
        let args = PerfPostBody::from_slice(br#"{"_records":3}"#)
            .unwrap()
            .into_args()
            .unwrap();
        assert_eq!(args.payload, "null");
    }

    #[test]
    fn test_post_malformed_body_is_bad_request() {
        for body in [&b""[..], b"{", br#""text""#, br#"{"_records":"five"}"#, br#"{"_payload":3}"#] {
            let err = PerfPostBody::from_slice(body).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "body {:?}", body);
        }
    }

    #[test]
    fn test_post_null_body_is_empty_body() {
        let args = PerfPostBody::from_slice(b"null").unwrap().into_args().unwrap();
        assert_eq!(args.records, 10);
        assert_eq!(args.payload, "null");
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_keys_take_first_value() {
        let query = PerfTestQuery::from_pairs(&pairs(&[
            ("_records", "2"),
            ("_bool", "true"),
            ("_records", "3"),
            ("_bool", "false"),
        ]));
        let args = query.into_args().unwrap();
        assert_eq!(args.records, "2");
        assert!(args.bool);

        let nested = PerfNestedQuery::from_pairs(&pairs(&[("_depth", "5"), ("_depth", "9")]));
        assert_eq!(nested.into_args().depth, "5");

        let many = PerfManyParamsQuery::from_pairs(&pairs(&[
            ("_p3", "true"),
            ("_p3", "false"),
            ("_p20", "a"),
            ("_p20", "b"),
        ]))
        .into_args();
        assert!(many.groups[0].flag);
        assert_eq!(many.groups[3].trailing_text, "a");
    }

    #[test]
    fn test_present_but_empty_records_is_missing() {
        let query = PerfTestQuery::from_pairs(&pairs(&[("_records", ""), ("_records", "4")]));
        assert!(query.into_args().is_err());
    }

    #[test]
    fn test_nested_defaults() {
        let args = PerfNestedQuery::default().into_args();
        assert_eq!(args.records, "100");
        assert_eq!(args.depth, "3");

        let args = PerfNestedQuery {
            records: Some("7".into()),
            depth: Some(String::new()),
        }
        .into_args();
        assert_eq!(args.records, "7");
        assert_eq!(args.depth, "3");
    }

    #[test]
    fn test_large_payload_default_size() {
        assert_eq!(PerfLargePayloadQuery::default().into_size_kb(), "100");
        let query = PerfLargePayloadQuery {
            size_kb: Some("512".into()),
        };
        assert_eq!(query.into_size_kb(), "512");
    }

    #[test]
    fn test_many_params_groups() {
        let args = PerfManyParamsQuery {
            p3: Some("true".into()),
            p7: Some("456".into()),
            p8: Some("false".into()),
            p20: Some("tail".into()),
            ..Default::default()
        }
        .into_args();

        assert!(args.groups[0].flag);
        assert_eq!(args.groups[0].text, "");
        assert_eq!(args.groups[1].int, "456");
        assert!(!args.groups[1].flag);
        assert!(!args.groups[2].flag);
        assert_eq!(args.groups[3].trailing_text, "tail");
    }
}
