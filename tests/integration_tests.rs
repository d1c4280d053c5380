//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: settings → API clients → pagination → printed output

use analytics_samples::cli::{Cli, Runner};
use analytics_samples::config::Settings;
use analytics_samples::error::{Error, ServiceCode};
use analytics_samples::pagination::OffsetPaginator;
use analytics_samples::samples::pagination_report;
use clap::Parser;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings {
        access_token: Some("test-token".to_string()),
        ..Default::default()
    };
    settings.endpoints.admin_url = server.uri();
    settings.endpoints.data_url = server.uri();
    settings.http.max_retries = 0;
    settings
}

fn report_page(start: u64, count: u64, row_count: u64) -> Value {
    let rows: Vec<Value> = (start..start + count)
        .map(|i| {
            json!({
                "dimensionValues": [
                    {"value": format!("source-{i}")},
                    {"value": "organic"},
                    {"value": "(not set)"}
                ],
                "metricValues": [{"value": i.to_string()}, {"value": "0"}, {"value": "0"}]
            })
        })
        .collect();
    json!({
        "dimensionHeaders": [
            {"name": "firstUserSource"},
            {"name": "firstUserMedium"},
            {"name": "firstUserCampaignName"}
        ],
        "metricHeaders": [
            {"name": "sessions", "type": "TYPE_INTEGER"},
            {"name": "keyEvents", "type": "TYPE_INTEGER"},
            {"name": "totalRevenue", "type": "TYPE_CURRENCY"}
        ],
        "rows": rows,
        "rowCount": row_count.to_string(),
        "kind": "analyticsData#runReport"
    })
}

async fn mount_page(server: &MockServer, offset: u64, count: u64, row_count: u64) {
    Mock::given(method("POST"))
        .and(path("/v1beta/properties/1234:runReport"))
        .and(body_partial_json(json!({"offset": offset})))
        .respond_with(ResponseTemplate::new(200).set_body_json(report_page(offset, count, row_count)))
        .expect(1)
        .mount(server)
        .await;
}

/// A writer whose reader has gone away
struct ClosedPipe;

impl std::io::Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }
}

async fn run_cli(settings: Settings, args: &[&str]) -> (String, analytics_samples::Result<()>) {
    let mut argv = vec!["analytics-samples"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let runner = Runner::with_settings(cli, settings);

    let mut out = Vec::new();
    let result = runner.run_with_output(&mut out).await;
    (String::from_utf8(out).unwrap(), result)
}

// ============================================================================
// Paginated report
// ============================================================================

#[tokio::test]
async fn test_paginated_report_fetches_every_row() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 100, 250).await;
    mount_page(&server, 100, 100, 250).await;
    mount_page(&server, 200, 50, 250).await;

    let client = settings_for(&server).data_client().unwrap();
    let pages = OffsetPaginator::new()
        .fetch_all(&client, &pagination_report("1234", 100))
        .await
        .unwrap();

    assert_eq!(pages.request_count(), 3);
    assert_eq!(pages.row_count(), 250);
    let last = pages.rows().last().unwrap();
    assert_eq!(last.dimension_values[0].value, "source-249");
}

#[tokio::test]
async fn test_paginate_command_prints_each_page() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 2, 3).await;
    mount_page(&server, 2, 1, 3).await;

    let (output, result) = run_cli(
        settings_for(&server),
        &["paginate", "--property-id", "1234", "--limit", "2"],
    )
    .await;

    result.unwrap();
    assert!(output.starts_with("2 rows received for request #1\n"));
    assert!(output.contains("Dimension header name: firstUserSource\n"));
    assert!(output.contains("Metric header name: totalRevenue (TYPE_CURRENCY)\n"));
    assert!(output.contains("1 rows received for request #2\nDimension header name"));
    assert!(output.ends_with("Report result:\nsource-2 2\n3 rows in 2 requests\n"));
}

#[tokio::test]
async fn test_paginate_command_reports_incomplete_fetch() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 2, 5).await;

    Mock::given(method("POST"))
        .and(path("/v1beta/properties/1234:runReport"))
        .and(body_partial_json(json!({"offset": 2})))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": {"code": 503, "message": "The service is currently unavailable.", "status": "UNAVAILABLE"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (output, result) = run_cli(
        settings_for(&server),
        &["paginate", "--property-id", "1234", "--limit", "2"],
    )
    .await;

    assert!(output.starts_with("2 rows received for request #1\n"));
    assert!(!output.contains("request #2"));

    let err = result.unwrap_err();
    assert_eq!(err.service_code(), Some(ServiceCode::Unavailable));
    match err {
        Error::IncompleteFetch { pages_received, .. } => assert_eq!(pages_received, 1),
        other => panic!("expected IncompleteFetch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_paginate_command_stops_when_output_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/properties/1234:runReport"))
        .respond_with(ResponseTemplate::new(200).set_body_json(report_page(0, 100, 500)))
        .expect(1)
        .mount(&server)
        .await;

    let argv = ["analytics-samples", "paginate", "--property-id", "1234", "--limit", "100"];
    let runner = Runner::with_settings(Cli::try_parse_from(argv).unwrap(), settings_for(&server));
    let err = runner.run_with_output(ClosedPipe).await.unwrap_err();

    match err {
        Error::IncompleteFetch {
            pages_received,
            source,
        } => {
            assert_eq!(pages_received, 1);
            assert!(matches!(*source, Error::Io(_)));
        }
        other => panic!("expected IncompleteFetch, got {other:?}"),
    }
    server.verify().await;
}

// ============================================================================
// Other commands
// ============================================================================

#[tokio::test]
async fn test_report_command_sends_dimension_filter() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/properties/1234:runReport"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "dimensionFilter": {"filter": {"fieldName": "eventName"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dimensionHeaders": [{"name": "date"}],
            "metricHeaders": [{"name": "eventCount", "type": "TYPE_INTEGER"}],
            "rows": [{"dimensionValues": [{"value": "20240105"}], "metricValues": [{"value": "9"}]}],
            "rowCount": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut settings = settings_for(&server);
    settings.property_id = Some("1234".to_string());
    let (output, result) = run_cli(settings, &["report"]).await;

    result.unwrap();
    assert_eq!(
        output,
        "1 rows received\n\
         Dimension header name: date\n\
         Metric header name: eventCount (TYPE_INTEGER)\n\
         Report result:\n\
         20240105 9\n"
    );
}

#[tokio::test]
async fn test_accounts_command_lists_all_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/accounts"))
        .and(query_param("pageToken", "second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [{"name": "accounts/2", "displayName": "Two", "regionCode": "DE"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1beta/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [{
                "name": "accounts/1",
                "displayName": "One",
                "regionCode": "US",
                "createTime": "1970-01-01T00:00:10Z",
                "updateTime": "1970-01-01T00:00:20Z"
            }],
            "nextPageToken": "second"
        })))
        .mount(&server)
        .await;

    let (output, result) = run_cli(settings_for(&server), &["accounts", "--format", "json"]).await;

    result.unwrap();
    let names: Vec<String> = output
        .lines()
        .map(|line| serde_json::from_str::<Value>(line).unwrap()["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["accounts/1", "accounts/2"]);
}

#[tokio::test]
async fn test_properties_command_requires_account() {
    let server = MockServer::start().await;
    let (output, result) = run_cli(settings_for(&server), &["properties"]).await;

    assert!(output.is_empty());
    assert!(matches!(result.unwrap_err(), Error::MissingSetting { .. }));
}

#[tokio::test]
async fn test_funnel_command() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1alpha/properties/1234:runFunnelReport"))
        .and(body_partial_json(json!({
            "funnelBreakdown": {"breakdownDimension": {"name": "deviceCategory"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "funnelTable": {
                "dimensionHeaders": [{"name": "funnelStepName"}],
                "metricHeaders": [{"name": "activeUsers", "type": "TYPE_INTEGER"}],
                "rows": [{"dimensionValues": [{"value": "5. Purchase"}], "metricValues": [{"value": "3"}]}]
            },
            "funnelVisualization": {
                "dimensionHeaders": [{"name": "funnelStepName"}],
                "metricHeaders": [{"name": "activeUsers", "type": "TYPE_INTEGER"}]
            },
            "kind": "analyticsData#runFunnelReport"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (output, result) = run_cli(settings_for(&server), &["funnel", "--property-id", "1234"]).await;

    result.unwrap();
    assert!(output.starts_with("Report result:\n=== FUNNEL VISUALIZATION ===\n"));
    assert!(output.contains("=== FUNNEL TABLE ===\n"));
    assert!(output.contains("Row #0\nfunnelStepName: '5. Purchase'\nactiveUsers: '3'\n"));
}
