//! Ready-made report requests
//!
//! Each function builds the request one of the CLI subcommands sends.

use crate::data::{
    Filter, FilterExpression, FunnelFilterExpression, FunnelStep, RunFunnelReportRequest,
    RunReportRequest, StringFilter,
};

/// Default page size of the paginated report
pub const DEFAULT_PAGE_SIZE: i64 = 100_000;

/// Daily event counts of `first_open` over the last week
pub fn dimension_filter_report(property_id: &str) -> RunReportRequest {
    RunReportRequest::new(property_id)
        .dimension("date")
        .metric("eventCount")
        .date_range("7daysAgo", "yesterday")
        .dimension_filter(FilterExpression::filter(Filter::string(
            "eventName",
            "first_open",
        )))
}

/// First-user acquisition report over 350 days, `limit` rows per page
pub fn pagination_report(property_id: &str, limit: i64) -> RunReportRequest {
    RunReportRequest::new(property_id)
        .date_range("350daysAgo", "yesterday")
        .dimension("firstUserSource")
        .dimension("firstUserMedium")
        .dimension("firstUserCampaignName")
        .metric("sessions")
        .metric("keyEvents")
        .metric("totalRevenue")
        .limit(limit)
        .offset(0)
}

/// Closed five-step acquisition-to-purchase funnel, broken down by device
pub fn default_funnel_report(property_id: &str) -> RunFunnelReportRequest {
    RunFunnelReportRequest::new(property_id)
        .date_range("30daysAgo", "today")
        .breakdown("deviceCategory")
        .step(FunnelStep::new(
            "First open/visit",
            FunnelFilterExpression::any_event(&["first_open", "first_visit"]),
        ))
        .step(FunnelStep::new(
            "Organic visitors",
            FunnelFilterExpression::field(
                "firstUserMedium",
                StringFilter::contains("organic").case_sensitive(false),
            ),
        ))
        .step(FunnelStep::new(
            "Session start",
            FunnelFilterExpression::event("session_start"),
        ))
        .step(FunnelStep::new(
            "Screen/Page view",
            FunnelFilterExpression::any_event(&["screen_view", "page_view"]),
        ))
        .step(FunnelStep::new(
            "Purchase",
            FunnelFilterExpression::any_event(&["purchase", "in_app_purchase"]),
        ))
}
