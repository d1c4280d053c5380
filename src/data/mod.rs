//! Google Analytics Data API
//!
//! Typed request/response models for `runReport` (v1beta) and
//! `runFunnelReport` (v1alpha), and the `DataClient` that sends them.
//!
//! # Overview
//!
//! - `RunReportRequest` / `RunReportResponse` - standard reports, including
//!   the `limit`/`offset` window used by offset pagination
//! - `FilterExpression` - dimension and metric filters
//! - `RunFunnelReportRequest` / `RunFunnelReportResponse` - funnel reports

mod client;
mod filter;
mod funnel;
mod types;

pub use client::{DataClient, DEFAULT_DATA_URL};
pub use filter::{
    BetweenFilter, Filter, FilterExpression, FilterExpressionList, FilterKind, InListFilter,
    MatchType, NumericFilter, NumericValue, Operation, StringFilter,
};
pub use funnel::{
    Funnel, FunnelBreakdown, FunnelEventFilter, FunnelFieldFilter, FunnelFilterExpression,
    FunnelFilterExpressionList, FunnelResponseMetadata, FunnelStep, FunnelSubReport,
    FunnelVisualizationType, RunFunnelReportRequest, RunFunnelReportResponse,
};
pub use types::{
    property_resource, DateRange, Dimension, DimensionHeader, DimensionValue, Metric,
    MetricHeader, MetricType, MetricValue, PropertyQuota, QuotaStatus, ResponseMetadata, Row,
    RunReportRequest, RunReportResponse, SamplingMetadata,
};
