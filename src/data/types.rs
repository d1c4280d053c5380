//! Report request and response models
//!
//! Field names follow the proto3 JSON mapping of `google.analytics.data.v1beta`.

use super::filter::FilterExpression;
use crate::types::{int64_from_str_or_num, opt_int64_from_str_or_num};
use serde::{Deserialize, Serialize};

/// Normalize a property id into its resource name (`properties/{id}`)
pub fn property_resource(property_id: &str) -> String {
    let id = property_id.trim();
    if id.starts_with("properties/") {
        id.to_string()
    } else {
        format!("properties/{id}")
    }
}

// ============================================================================
// Request
// ============================================================================

/// A contiguous set of days, inclusive on both ends
///
/// Dates are `YYYY-MM-DD` or relative (`today`, `yesterday`, `NdaysAgo`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl DateRange {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            name: None,
        }
    }
}

/// A report dimension, referenced by API name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A report metric, referenced by API name or defined by an expression
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub invisible: bool,
}

impl Metric {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Body of `properties.runReport`
///
/// `property` travels in the URL, not in the body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportRequest {
    #[serde(skip)]
    pub property: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<Metric>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub date_ranges: Vec<DateRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_filter: Option<FilterExpression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_filter: Option<FilterExpression>,
    #[serde(default)]
    pub offset: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub keep_empty_rows: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub return_property_quota: bool,
}

impl RunReportRequest {
    /// Start a request against `properties/{property_id}`
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

    #[must_use]
    pub fn dimension(mut self, name: &str) -> Self {
        self.dimensions.push(Dimension::new(name));
        self
    }

    #[must_use]
    pub fn metric(mut self, name: &str) -> Self {
        self.metrics.push(Metric::new(name));
        self
    }

    #[must_use]
    pub fn dimension_filter(mut self, filter: FilterExpression) -> Self {
        self.dimension_filter = Some(filter);
        self
    }

    #[must_use]
    pub fn metric_filter(mut self, filter: FilterExpression) -> Self {
        self.metric_filter = Some(filter);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn return_property_quota(mut self, enabled: bool) -> Self {
        self.return_property_quota = enabled;
        self
    }

    /// Copy of this request positioned at `offset`; every other field is kept
    pub fn with_offset(&self, offset: i64) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }
}

// ============================================================================
// Response
// ============================================================================

/// Result of `properties.runReport`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportResponse {
    #[serde(default)]
    pub dimension_headers: Vec<DimensionHeader>,
    #[serde(default)]
    pub metric_headers: Vec<MetricHeader>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub totals: Vec<Row>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maximums: Vec<Row>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub minimums: Vec<Row>,
    /// Total rows in the query result, independent of `limit`/`offset`.
    /// Omitted by the server when zero.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_int64_from_str_or_num"
    )]
    pub row_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ResponseMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_quota: Option<PropertyQuota>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DimensionHeader {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricHeader {
    pub name: String,
    #[serde(rename = "type", default)]
    pub metric_type: MetricType,
}

/// Value type of a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricType {
    #[default]
    MetricTypeUnspecified,
    TypeInteger,
    TypeFloat,
    TypeSeconds,
    TypeMilliseconds,
    TypeMinutes,
    TypeHours,
    TypeStandard,
    TypeCurrency,
    TypeFeet,
    TypeMiles,
    TypeMeters,
    TypeKilometers,
    #[serde(other)]
    Unrecognized,
}

impl MetricType {
    /// Enum value name as the API spells it
    pub fn name(&self) -> &'static str {
        match self {
            Self::MetricTypeUnspecified => "METRIC_TYPE_UNSPECIFIED",
            Self::TypeInteger => "TYPE_INTEGER",
            Self::TypeFloat => "TYPE_FLOAT",
            Self::TypeSeconds => "TYPE_SECONDS",
            Self::TypeMilliseconds => "TYPE_MILLISECONDS",
            Self::TypeMinutes => "TYPE_MINUTES",
            Self::TypeHours => "TYPE_HOURS",
            Self::TypeStandard => "TYPE_STANDARD",
            Self::TypeCurrency => "TYPE_CURRENCY",
            Self::TypeFeet => "TYPE_FEET",
            Self::TypeMiles => "TYPE_MILES",
            Self::TypeMeters => "TYPE_METERS",
            Self::TypeKilometers => "TYPE_KILOMETERS",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}

/// One report row; values are positional against the headers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub dimension_values: Vec<DimensionValue>,
    #[serde(default)]
    pub metric_values: Vec<MetricValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DimensionValue {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricValue {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    #[serde(default)]
    pub data_loss_from_other_row: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_reason: Option<String>,
    #[serde(default)]
    pub subject_to_thresholding: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sampling_metadatas: Vec<SamplingMetadata>,
}

/// Sampling applied to one date range
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingMetadata {
    #[serde(default, deserialize_with = "int64_from_str_or_num")]
    pub samples_read_count: i64,
    #[serde(default, deserialize_with = "int64_from_str_or_num")]
    pub sampling_space_size: i64,
}

/// Quota state after the request, when `returnPropertyQuota` was set
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyQuota {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_per_day: Option<QuotaStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_per_hour: Option<QuotaStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrent_requests: Option<QuotaStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_errors_per_project_per_hour: Option<QuotaStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potentially_thresholded_requests_per_hour: Option<QuotaStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_per_project_per_hour: Option<QuotaStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuotaStatus {
    #[serde(default)]
    pub consumed: i64,
    #[serde(default)]
    pub remaining: i64,
}
