//! Handler模块
//!
//! 查询参数按原始键值对读取，重复的键只取第一个值。

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use common::errors::AppResult;
use common::models::{
    LargePayloadRow, ManyParamsRow, MinimalRow, NestedRow, PerfLargePayloadQuery,
    PerfManyParamsQuery, PerfNestedQuery, PerfTestQuery, PerfTestRow, PostRow,
};
use common::response::JsonArray;
use crate::service::PerfService;
use crate::state::AppState;
use crate::store::PoolStatus;

/// 类型矩阵测试
#[utoipa::path(
    get,
    path = "/api/perf-test",
    tag = "perf",
    params(PerfTestQuery),
    responses(
        (status = 200, description = "函数返回的行", body = Vec<PerfTestRow>),
        (status = 400, description = "缺少 _records 参数"),
        (status = 500, description = "数据库错误")
    )
)]
pub async fn perf_test(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<JsonArray<PerfTestRow>> {
    let service = PerfService::new(state.store);
    Ok(service.perf_test(PerfTestQuery::from_pairs(&pairs)).await?.into())
}

/// 最小查询基线
#[utoipa::path(
    get,
    path = "/api/perf-minimal",
    tag = "perf",
    responses(
        (status = 200, description = "函数返回的行", body = Vec<MinimalRow>),
        (status = 500, description = "数据库错误")
    )
)]
pub async fn perf_minimal(State(state): State<AppState>) -> AppResult<JsonArray<MinimalRow>> {
    let service = PerfService::new(state.store);
    Ok(service.perf_minimal().await?.into())
}

/// POST 请求体测试
///
/// 请求体按原始字节读取，任何 JSON 解析错误都返回 400，与 Content-Type 无关。
#[utoipa::path(
    post,
    path = "/api/perf-post",
    tag = "perf",
    request_body = common::models::PerfPostBody,
    responses(
        (status = 200, description = "函数返回的行", body = Vec<PostRow>),
        (status = 400, description = "请求体不是合法 JSON"),
        (status = 500, description = "数据库错误")
    )
)]
pub async fn perf_post(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<JsonArray<PostRow>> {
    let service = PerfService::new(state.store);
    Ok(service.perf_post(&body).await?.into())
}

/// 嵌套 JSON 测试
#[utoipa::path(
    get,
    path = "/api/perf-nested",
    tag = "perf",
    params(PerfNestedQuery),
    responses(
        (status = 200, description = "函数返回的行", body = Vec<NestedRow>),
        (status = 500, description = "数据库错误")
    )
)]
pub async fn perf_nested(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<JsonArray<NestedRow>> {
    let service = PerfService::new(state.store);
    Ok(service.perf_nested(PerfNestedQuery::from_pairs(&pairs)).await?.into())
}

/// 大响应体测试
#[utoipa::path(
    get,
    path = "/api/perf-large-payload",
    tag = "perf",
    params(PerfLargePayloadQuery),
    responses(
        (status = 200, description = "函数返回的行", body = Vec<LargePayloadRow>),
        (status = 500, description = "数据库错误")
    )
)]
pub async fn perf_large_payload(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<JsonArray<LargePayloadRow>> {
    let service = PerfService::new(state.store);
    Ok(service.perf_large_payload(PerfLargePayloadQuery::from_pairs(&pairs)).await?.into())
}

/// 多参数测试
#[utoipa::path(
    get,
    path = "/api/perf-many-params",
    tag = "perf",
    params(PerfManyParamsQuery),
    responses(
        (status = 200, description = "函数返回的行", body = Vec<ManyParamsRow>),
        (status = 500, description = "数据库错误")
    )
)]
pub async fn perf_many_params(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<JsonArray<ManyParamsRow>> {
    let service = PerfService::new(state.store);
    Ok(service.perf_many_params(PerfManyParamsQuery::from_pairs(&pairs)).await?.into())
}

/// 健康检查端点
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "服务运行正常", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.config.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        pool: state.store.pool_status(),
    })
}

/// 健康检查响应
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// 服务状态
    pub status: String,
    /// 服务名称
    pub service: String,
    /// 服务版本
    pub version: String,
    /// 当前时间戳
    pub timestamp: DateTime<Utc>,
    /// 连接池状态
    pub pool: PoolStatus,
}
