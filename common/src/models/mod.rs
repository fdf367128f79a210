//! Request and result models of the benchmark endpoints.

pub mod params;
pub mod rows;

pub use params::{
    PerfLargePayloadQuery, PerfManyParamsArgs, PerfManyParamsQuery, PerfNestedArgs,
    PerfNestedQuery, PerfPostArgs, PerfPostBody, PerfTestArgs, PerfTestQuery,
};
pub use rows::{LargePayloadRow, ManyParamsRow, MinimalRow, NestedRow, PerfTestRow, PostRow};
