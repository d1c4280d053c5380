//! Funnel report models (`google.analytics.data.v1alpha`)

use super::filter::{FilterExpression, FilterKind, StringFilter};
use super::types::{
    property_resource, DateRange, Dimension, DimensionHeader, MetricHeader, PropertyQuota, Row,
    SamplingMetadata,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request
// ============================================================================

/// Body of `properties.runFunnelReport`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunFunnelReportRequest {
    #[serde(skip)]
    pub property: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub date_ranges: Vec<DateRange>,
    pub funnel: Funnel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funnel_breakdown: Option<FunnelBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funnel_visualization_type: Option<FunnelVisualizationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_filter: Option<FilterExpression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub return_property_quota: bool,
}

impl RunFunnelReportRequest {
    pub fn new(property_id: &str) -> Self {
        Self {
            property: property_resource(property_id),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn date_range(mut self, start_date: &str, end_date: &str) -> Self {
        self.date_ranges.push(DateRange::new(start_date, end_date));
        self
    }

    /// Break the funnel table down by a dimension
    #[must_use]
    pub fn breakdown(mut self, dimension: &str) -> Self {
        self.funnel_breakdown = Some(FunnelBreakdown {
            breakdown_dimension: Dimension::new(dimension),
            limit: None,
        });
        self
    }

    #[must_use]
    pub fn step(mut self, step: FunnelStep) -> Self {
        self.funnel.steps.push(step);
        self
    }
}

/// Ordered steps a user must pass through
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Funnel {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_open_funnel: bool,
    #[serde(default)]
    pub steps: Vec<FunnelStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStep {
    pub name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_directly_followed_by: bool,
    /// Duration string such as `"300s"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub within_duration_from_prior_step: Option<String>,
    pub filter_expression: FunnelFilterExpression,
}

impl FunnelStep {
    pub fn new(name: impl Into<String>, filter_expression: FunnelFilterExpression) -> Self {
        Self {
            name: name.into(),
            is_directly_followed_by: false,
            within_duration_from_prior_step: None,
            filter_expression,
        }
    }
}

/// Step condition; exactly one variant is present on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FunnelFilterExpression {
    AndGroup(FunnelFilterExpressionList),
    OrGroup(FunnelFilterExpressionList),
    NotExpression(Box<FunnelFilterExpression>),
    FunnelFieldFilter(FunnelFieldFilter),
    FunnelEventFilter(FunnelEventFilter),
}

impl FunnelFilterExpression {
    /// Matches a single event name
    pub fn event(event_name: impl Into<String>) -> Self {
        Self::FunnelEventFilter(FunnelEventFilter {
            event_name: event_name.into(),
        })
    }

    /// Matches any of the given event names
    pub fn any_event(event_names: &[&str]) -> Self {
        Self::or(event_names.iter().map(|name| Self::event(*name)).collect())
    }

    pub fn field(field_name: impl Into<String>, filter: StringFilter) -> Self {
        Self::FunnelFieldFilter(FunnelFieldFilter {
            field_name: field_name.into(),
            kind: FilterKind::StringFilter(filter),
        })
    }

    pub fn and(expressions: Vec<FunnelFilterExpression>) -> Self {
        Self::AndGroup(FunnelFilterExpressionList { expressions })
    }

    pub fn or(expressions: Vec<FunnelFilterExpression>) -> Self {
        Self::OrGroup(FunnelFilterExpressionList { expressions })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FunnelFilterExpressionList {
    #[serde(default)]
    pub expressions: Vec<FunnelFilterExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelFieldFilter {
    pub field_name: String,
    #[serde(flatten)]
    pub kind: FilterKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelEventFilter {
    pub event_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelBreakdown {
    pub breakdown_dimension: Dimension,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FunnelVisualizationType {
    StandardFunnel,
    TrendedFunnel,
}

// ============================================================================
// Response
// ============================================================================

/// Result of `properties.runFunnelReport`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunFunnelReportResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funnel_table: Option<FunnelSubReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funnel_visualization: Option<FunnelSubReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_quota: Option<PropertyQuota>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelSubReport {
    #[serde(default)]
    pub dimension_headers: Vec<DimensionHeader>,
    #[serde(default)]
    pub metric_headers: Vec<MetricHeader>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub metadata: FunnelResponseMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelResponseMetadata {
    #[serde(default)]
    pub sampling_metadatas: Vec<SamplingMetadata>,
}
