//! Stored-function invocation.
//!
//! Every benchmark endpoint maps to exactly one `public.perf_*` function. The
//! casts in the SQL below are part of the contract: text arguments are bound
//! as `text` and converted by PostgreSQL to the declared parameter types.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::{postgres::PgPoolOptions, PgPool};
use utoipa::ToSchema;

use common::config::AppConfig;
use common::errors::AppResult;
use common::models::{
    LargePayloadRow, ManyParamsRow, MinimalRow, NestedRow, PerfManyParamsArgs, PerfNestedArgs,
    PerfPostArgs, PerfTestArgs, PerfTestRow, PostRow,
};

const PERF_TEST_SQL: &str = "
    SELECT row_num, text_val, varchar_val, char_val, smallint_val, int_val, bigint_val,
           numeric_val::float8 AS numeric_val, real_val, double_val, bool_val, date_val,
           time_val::text AS time_val, timestamp_val, timestamptz_val,
           interval_val::text AS interval_val, uuid_val, json_val, jsonb_val,
           int_array_val, text_array_val, nullable_text, nullable_int
    FROM public.perf_test($1::int, $2, $3::int, $4::bigint, $5::numeric, $6::real,
                          $7::double precision, $8, $9::date, $10::timestamp,
                          $11::timestamptz, $12::uuid, $13::json, $14::jsonb,
                          $15::int[], $16::text[])";

const PERF_MINIMAL_SQL: &str = "SELECT status, ts FROM public.perf_minimal()";

const PERF_POST_SQL: &str =
    "SELECT row_num, echo, computed FROM public.perf_post($1, $2::jsonb)";

const PERF_NESTED_SQL: &str =
    "SELECT row_num, nested FROM public.perf_nested($1::int, $2::int)";

const PERF_LARGE_PAYLOAD_SQL: &str = "SELECT data FROM public.perf_large_payload($1::int)";

const PERF_MANY_PARAMS_SQL: &str = "
    SELECT param_count, checksum FROM public.perf_many_params(
        $1, $2::int, $3, $4::numeric, $5,
        $6, $7::int, $8, $9::numeric, $10,
        $11, $12::int, $13, $14::numeric, $15,
        $16, $17::int, $18, $19::numeric, $20
    )";

/// Snapshot of the connection pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PoolStatus {
    /// Open connections, idle or in use.
    pub size: u32,
    /// Open connections not currently borrowed.
    pub idle: usize,
    /// Configured upper bound.
    pub max_connections: u32,
}

/// Invokes the benchmark functions.
///
/// One method per function; each runs exactly one query and returns the full
/// row set or the first error.
#[async_trait]
pub trait PerfStore: Send + Sync {
    async fn perf_test(&self, args: &PerfTestArgs) -> AppResult<Vec<PerfTestRow>>;

    async fn perf_minimal(&self) -> AppResult<Vec<MinimalRow>>;

    async fn perf_post(&self, args: &PerfPostArgs) -> AppResult<Vec<PostRow>>;

    async fn perf_nested(&self, args: &PerfNestedArgs) -> AppResult<Vec<NestedRow>>;

    async fn perf_large_payload(&self, size_kb: &str) -> AppResult<Vec<LargePayloadRow>>;

    async fn perf_many_params(&self, args: &PerfManyParamsArgs) -> AppResult<Vec<ManyParamsRow>>;

    fn pool_status(&self) -> PoolStatus;
}

/// [`PerfStore`] backed by a sqlx PostgreSQL pool.
pub struct PgPerfStore {
    pool: PgPool,
    max_connections: u32,
}

impl PgPerfStore {
    /// Opens the pool. Called once at startup; failure is fatal for the process.
    pub async fn connect(config: &AppConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.database_url)
            .await?;

        tracing::info!(
            max_connections = config.max_connections,
            "PostgreSQL pool ready"
        );
        Ok(Self::from_pool(pool, config.max_connections))
    }

    pub fn from_pool(pool: PgPool, max_connections: u32) -> Self {
        Self {
            pool,
            max_connections,
        }
    }

    /// Waits for borrowed connections to come back, then closes all of them.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }
}

#[async_trait]
impl PerfStore for PgPerfStore {
    async fn perf_test(&self, args: &PerfTestArgs) -> AppResult<Vec<PerfTestRow>> {
        let rows = sqlx::query_as::<_, PerfTestRow>(PERF_TEST_SQL)
            .bind(args.records.as_str())
            .bind(args.text.as_str())
            .bind(args.int.as_str())
            .bind(args.bigint.as_str())
            .bind(args.numeric.as_str())
            .bind(args.real.as_str())
            .bind(args.double.as_str())
            .bind(args.bool)
            .bind(args.date.as_str())
            .bind(args.timestamp.as_str())
            .bind(args.timestamptz.as_str())
            .bind(args.uuid.as_str())
            .bind(args.json.as_str())
            .bind(args.jsonb.as_str())
            .bind(args.int_array.as_str())
            .bind(args.text_array.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn perf_minimal(&self) -> AppResult<Vec<MinimalRow>> {
        let rows = sqlx::query_as::<_, MinimalRow>(PERF_MINIMAL_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn perf_post(&self, args: &PerfPostArgs) -> AppResult<Vec<PostRow>> {
        let rows = sqlx::query_as::<_, PostRow>(PERF_POST_SQL)
            .bind(args.records)
            .bind(args.payload.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn perf_nested(&self, args: &PerfNestedArgs) -> AppResult<Vec<NestedRow>> {
        let rows = sqlx::query_as::<_, NestedRow>(PERF_NESTED_SQL)
            .bind(args.records.as_str())
            .bind(args.depth.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn perf_large_payload(&self, size_kb: &str) -> AppResult<Vec<LargePayloadRow>> {
        let rows = sqlx::query_as::<_, LargePayloadRow>(PERF_LARGE_PAYLOAD_SQL)
            .bind(size_kb)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn perf_many_params(&self, args: &PerfManyParamsArgs) -> AppResult<Vec<ManyParamsRow>> {
        let mut query = sqlx::query_as::<_, ManyParamsRow>(PERF_MANY_PARAMS_SQL);
        for group in &args.groups {
            query = query
                .bind(group.text.as_str())
                .bind(group.int.as_str())
                .bind(group.flag)
                .bind(group.numeric.as_str())
                .bind(group.trailing_text.as_str());
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    fn pool_status(&self) -> PoolStatus {
        PoolStatus {
            size: self.pool.size(),
            idle: self.pool.num_idle(),
            max_connections: self.max_connections,
        }
    }
}
