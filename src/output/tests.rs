//! Tests for the output module

use super::*;
use crate::admin::{Account, Property};
use crate::data::RunFunnelReportResponse;
use crate::data::RunReportResponse;
use pretty_assertions::assert_eq;
use serde_json::json;

fn render(format: OutputFormat, f: impl FnOnce(&mut Printer<Vec<u8>>)) -> String {
    let mut printer = Printer::new(Vec::new(), format);
    f(&mut printer);
    String::from_utf8(printer.into_inner()).unwrap()
}

fn sample_report() -> RunReportResponse {
    serde_json::from_value(json!({
        "dimensionHeaders": [{"name": "date"}],
        "metricHeaders": [{"name": "eventCount", "type": "TYPE_INTEGER"}],
        "rows": [
            {"dimensionValues": [{"value": "20240102"}], "metricValues": [{"value": "12"}]},
            {"dimensionValues": [{"value": "20240101"}], "metricValues": [{"value": "7"}]}
        ],
        "rowCount": 2
    }))
    .unwrap()
}

#[test]
fn test_run_report_pretty() {
    let output = render(OutputFormat::Pretty, |p| p.run_report(&sample_report()).unwrap());
    assert_eq!(
        output,
        "2 rows received\n\
         Dimension header name: date\n\
         Metric header name: eventCount (TYPE_INTEGER)\n\
         Report result:\n\
         20240102 12\n\
         20240101 7\n"
    );
}

#[test]
fn test_report_page_uses_page_rows() {
    let mut page = sample_report();
    page.row_count = Some(250);
    let output = render(OutputFormat::Pretty, |p| p.report_page(&page, 3).unwrap());
    assert!(output.starts_with("2 rows received for request #3\n"));
}

#[test]
fn test_pagination_summary() {
    let pretty = render(OutputFormat::Pretty, |p| p.pagination_summary(250, 3).unwrap());
    assert_eq!(pretty, "250 rows in 3 requests\n");

    let json = render(OutputFormat::Json, |p| p.pagination_summary(250, 3).unwrap());
    assert_eq!(json, "");
}

#[test]
fn test_empty_report_pretty() {
    let response: RunReportResponse = serde_json::from_value(json!({
        "dimensionHeaders": [{"name": "date"}],
        "metricHeaders": [{"name": "eventCount", "type": "TYPE_INTEGER"}]
    }))
    .unwrap();
    let output = render(OutputFormat::Pretty, |p| p.run_report(&response).unwrap());
    assert!(output.starts_with("0 rows received\n"));
    assert!(output.ends_with("Report result:\n"));
}

#[test]
fn test_run_report_json() {
    let output = render(OutputFormat::Json, |p| p.run_report(&sample_report()).unwrap());
    assert_eq!(output.lines().count(), 1);
    let parsed: serde_json::Value = serde_json::from_str(output.trim_end()).unwrap();
    assert_eq!(parsed["rowCount"], json!(2));
    assert_eq!(parsed["rows"][1]["metricValues"][0]["value"], json!("7"));
}

#[test]
fn test_funnel_report_pretty() {
    let response: RunFunnelReportResponse = serde_json::from_value(json!({
        "funnelTable": {
            "dimensionHeaders": [{"name": "funnelStepName"}, {"name": "deviceCategory"}],
            "metricHeaders": [{"name": "activeUsers", "type": "TYPE_INTEGER"}],
            "rows": [{
                "dimensionValues": [{"value": "1. First open/visit"}, {"value": "desktop"}],
                "metricValues": [{"value": "42"}]
            }],
            "metadata": {"samplingMetadatas": [{"samplesReadCount": "10", "samplingSpaceSize": "100"}]}
        }
    }))
    .unwrap();

    let output = render(OutputFormat::Pretty, |p| p.funnel_report(&response).unwrap());
    assert_eq!(
        output,
        "Report result:\n\
         === FUNNEL VISUALIZATION ===\n\
         Dimension headers:\n\
         Metric headers:\n\
         Dimension and metric values for each row in the report:\n\
         Sampling metadata for each date range:\n\
         === FUNNEL TABLE ===\n\
         Dimension headers:\n\
         funnelStepName\n\
         deviceCategory\n\
         Metric headers:\n\
         activeUsers\n\
         Dimension and metric values for each row in the report:\n\
         Row #0\n\
         funnelStepName: '1. First open/visit'\n\
         deviceCategory: 'desktop'\n\
         activeUsers: '42'\n\
         Sampling metadata for each date range:\n\
         Sampling metadata for date range #0: samplesReadCount=10 samplingSpaceSize=100\n"
    );
}

#[test]
fn test_accounts_pretty() {
    let account: Account = serde_json::from_value(json!({
        "name": "accounts/100",
        "displayName": "Demo",
        "regionCode": "FR",
        "createTime": "1970-01-01T00:01:40Z",
        "updateTime": "1970-01-01T00:03:20Z"
    }))
    .unwrap();

    let output = render(OutputFormat::Pretty, |p| {
        p.listing_header().unwrap();
        p.account(&account).unwrap();
    });
    assert_eq!(
        output,
        "Result:\n\
         Account name: accounts/100\n\
         Display name: Demo\n\
         Country code: FR\n\
         Create time: 100\n\
         Update time: 200\n"
    );
}

#[test]
fn test_property_pretty() {
    let property = Property {
        name: "properties/7".to_string(),
        parent: "accounts/100".to_string(),
        display_name: "Shop".to_string(),
        currency_code: "EUR".to_string(),
        time_zone: "Europe/Paris".to_string(),
        ..Default::default()
    };

    let output = render(OutputFormat::Pretty, |p| p.property(0, &property).unwrap());
    assert_eq!(
        output,
        "Property #0 resource name: properties/7, parent: accounts/100, display name: \"Shop\", \
         currency: EUR, time zone: Europe/Paris, create time: 0, update time: 0\n"
    );
}

#[test]
fn test_listing_json_has_no_header() {
    let account = Account {
        name: "accounts/1".to_string(),
        ..Default::default()
    };
    let output = render(OutputFormat::Json, |p| {
        p.listing_header().unwrap();
        p.account(&account).unwrap();
    });
    assert!(output.starts_with("{\"name\":\"accounts/1\""));
    assert_eq!(output.lines().count(), 1);
}
