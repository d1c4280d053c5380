//! Dimension and metric filter expressions
//!
//! `FilterExpression` mirrors the `oneof expr` of the API: exactly one of
//! `andGroup`, `orGroup`, `notExpression` or `filter` is present.

use crate::types::int64_from_str_or_num;
use serde::{Deserialize, Serialize};

/// A boolean expression over field filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterExpression {
    AndGroup(FilterExpressionList),
    OrGroup(FilterExpressionList),
    NotExpression(Box<FilterExpression>),
    Filter(Filter),
}

impl FilterExpression {
    pub fn and(expressions: Vec<FilterExpression>) -> Self {
        Self::AndGroup(FilterExpressionList { expressions })
    }

    pub fn or(expressions: Vec<FilterExpression>) -> Self {
        Self::OrGroup(FilterExpressionList { expressions })
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(expression: FilterExpression) -> Self {
        Self::NotExpression(Box::new(expression))
    }

    pub fn filter(filter: Filter) -> Self {
        Self::Filter(filter)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterExpressionList {
    #[serde(default)]
    pub expressions: Vec<FilterExpression>,
}

/// A single-field filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub field_name: String,
    #[serde(flatten)]
    pub kind: FilterKind,
}

impl Filter {
    /// Exact, case-insensitive string match
    pub fn string(field_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::string_with(field_name, StringFilter::exact(value))
    }

    pub fn string_with(field_name: impl Into<String>, filter: StringFilter) -> Self {
        Self {
            field_name: field_name.into(),
            kind: FilterKind::StringFilter(filter),
        }
    }

    pub fn in_list(field_name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            field_name: field_name.into(),
            kind: FilterKind::InListFilter(InListFilter {
                values,
                case_sensitive: false,
            }),
        }
    }

    pub fn numeric(field_name: impl Into<String>, operation: Operation, value: NumericValue) -> Self {
        Self {
            field_name: field_name.into(),
            kind: FilterKind::NumericFilter(NumericFilter { operation, value }),
        }
    }

    pub fn between(field_name: impl Into<String>, from: NumericValue, to: NumericValue) -> Self {
        Self {
            field_name: field_name.into(),
            kind: FilterKind::BetweenFilter(BetweenFilter {
                from_value: from,
                to_value: to,
            }),
        }
    }
}

/// The `oneof one_filter` of a field filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    StringFilter(StringFilter),
    InListFilter(InListFilter),
    NumericFilter(NumericFilter),
    BetweenFilter(BetweenFilter),
    EmptyFilter(EmptyFilter),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter {
    #[serde(default)]
    pub match_type: MatchType,
    pub value: String,
    #[serde(default)]
    pub case_sensitive: bool,
}

impl StringFilter {
    pub fn exact(value: impl Into<String>) -> Self {
        Self {
            match_type: MatchType::Exact,
            value: value.into(),
            case_sensitive: false,
        }
    }

    pub fn contains(value: impl Into<String>) -> Self {
        Self {
            match_type: MatchType::Contains,
            value: value.into(),
            case_sensitive: false,
        }
    }

    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    MatchTypeUnspecified,
    #[default]
    Exact,
    BeginsWith,
    EndsWith,
    Contains,
    FullRegexp,
    PartialRegexp,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InListFilter {
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericFilter {
    pub operation: Operation,
    pub value: NumericValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    #[default]
    OperationUnspecified,
    Equal,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetweenFilter {
    pub from_value: NumericValue,
    pub to_value: NumericValue,
}

/// `int64Value` or `doubleValue`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericValue {
    Int64Value(#[serde(deserialize_with = "int64_from_str_or_num")] i64),
    DoubleValue(f64),
}

/// Matches empty values; carries no fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmptyFilter {}
