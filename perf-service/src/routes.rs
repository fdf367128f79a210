//! 路由模块
//!
//! 每个路径只注册一个方法，其他方法由 axum 返回 405 且响应体为空。

use axum::{
    routing::{get, post},
    Router,
};
use crate::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/perf-test", get(handlers::perf_test))
        .route("/api/perf-minimal", get(handlers::perf_minimal))
        .route("/api/perf-post", post(handlers::perf_post))
        .route("/api/perf-nested", get(handlers::perf_nested))
        .route("/api/perf-large-payload", get(handlers::perf_large_payload))
        .route("/api/perf-many-params", get(handlers::perf_many_params))
        .route("/api/health", get(handlers::health_check))
}
