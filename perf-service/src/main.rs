//! PostgreSQL 存储函数性能测试服务
//!
//! 提供六个基准测试端点，每个端点调用一个 `public.perf_*` 存储函数：
//! - 类型矩阵、最小查询、POST 请求体
//! - 嵌套 JSON、大响应体、多参数

mod handlers;
mod routes;
mod service;
mod state;
mod store;


use std::sync::Arc;

use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use common::config::{AppConfig, LogFormat};
use common::middleware::request_id::request_id_middleware;
use state::AppState;
use store::PgPerfStore;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::OpenApi;

const SERVICE_NAME: &str = "perf-service";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "性能测试服务 API",
        version = "0.1.0",
        description = "PostgreSQL 存储函数性能测试 HTTP 服务"
    ),
    paths(
        handlers::perf_test,
        handlers::perf_minimal,
        handlers::perf_post,
        handlers::perf_nested,
        handlers::perf_large_payload,
        handlers::perf_many_params,
        handlers::health_check,
    ),
    components(schemas(
        common::models::PerfTestRow,
        common::models::MinimalRow,
        common::models::PostRow,
        common::models::NestedRow,
        common::models::LargePayloadRow,
        common::models::ManyParamsRow,
        common::models::PerfPostBody,
        handlers::HealthResponse,
        store::PoolStatus,
    )),
    tags(
        (name = "perf", description = "基准测试端点"),
        (name = "health", description = "健康检查端点")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 环境变量优先于 .env 文件
    let dotenv = dotenvy::dotenv();

    // 加载配置
    let config = AppConfig::load_with_service(SERVICE_NAME);

    // 初始化日志追踪
    init_tracing(config.log_format);
    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "读取 .env 文件失败");
        }
    }

    // 连接池在启动时创建一次，失败则进程退出
    let store = Arc::new(
        PgPerfStore::connect(&config)
            .await
            .context("failed to open PostgreSQL pool (check DATABASE_URL)")?,
    );

    let state = AppState::new(config.clone(), store.clone());
    let app = create_router(state);

    // 启动服务
    let addr = config.bind_addr();
    info!(service = SERVICE_NAME, address = %addr, "启动服务");

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("绑定地址失败: {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务运行失败")?;

    store.close().await;
    info!(service = SERVICE_NAME, "服务已停止");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "无法监听 Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "无法监听 SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("收到停止信号，开始优雅关闭");
}
