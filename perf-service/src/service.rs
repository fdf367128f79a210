//! 性能测试服务模块
//!
//! 把请求参数整理成存储函数的位置参数，调用存储层并记录耗时。

use std::sync::Arc;
use std::time::Instant;

use common::errors::AppResult;
use common::models::{
    LargePayloadRow, ManyParamsRow, MinimalRow, NestedRow, PerfLargePayloadQuery,
    PerfManyParamsQuery, PerfNestedQuery, PerfPostBody, PerfTestQuery, PerfTestRow, PostRow,
};
use crate::store::PerfStore;

/// 性能测试服务
pub struct PerfService {
    store: Arc<dyn PerfStore>,
}

impl PerfService {
    /// 创建新的服务实例
    pub fn new(store: Arc<dyn PerfStore>) -> Self {
        Self { store }
    }

    /// 类型矩阵测试，`_records` 必填
    pub async fn perf_test(&self, query: PerfTestQuery) -> AppResult<Vec<PerfTestRow>> {
        let args = query.into_args()?;
        let start = Instant::now();
        let rows = self.store.perf_test(&args).await?;
        log_call("perf_test", rows.len(), start);
        Ok(rows)
    }

    /// 最小查询基线
    pub async fn perf_minimal(&self) -> AppResult<Vec<MinimalRow>> {
        let start = Instant::now();
        let rows = self.store.perf_minimal().await?;
        log_call("perf_minimal", rows.len(), start);
        Ok(rows)
    }

    /// POST 请求体测试，body 为原始字节
    pub async fn perf_post(&self, body: &[u8]) -> AppResult<Vec<PostRow>> {
        let args = PerfPostBody::from_slice(body)?.into_args()?;
        let start = Instant::now();
        let rows = self.store.perf_post(&args).await?;
        log_call("perf_post", rows.len(), start);
        Ok(rows)
    }

    /// 嵌套 JSON 测试
    pub async fn perf_nested(&self, query: PerfNestedQuery) -> AppResult<Vec<NestedRow>> {
        let args = query.into_args();
        let start = Instant::now();
        let rows = self.store.perf_nested(&args).await?;
        log_call("perf_nested", rows.len(), start);
        Ok(rows)
    }

    /// 大响应体测试
    pub async fn perf_large_payload(
        &self,
        query: PerfLargePayloadQuery,
    ) -> AppResult<Vec<LargePayloadRow>> {
        let size_kb = query.into_size_kb();
        let start = Instant::now();
        let rows = self.store.perf_large_payload(&size_kb).await?;
        log_call("perf_large_payload", rows.len(), start);
        Ok(rows)
    }

    /// 多参数测试
    pub async fn perf_many_params(
        &self,
        query: PerfManyParamsQuery,
    ) -> AppResult<Vec<ManyParamsRow>> {
        let args = query.into_args();
        let start = Instant::now();
        let rows = self.store.perf_many_params(&args).await?;
        log_call("perf_many_params", rows.len(), start);
        Ok(rows)
    }
}

fn log_call(function: &str, rows: usize, start: Instant) {
    tracing::debug!(
        function,
        rows,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "存储函数调用完成"
    );
}
