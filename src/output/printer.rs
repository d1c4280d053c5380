//! Response printer

use crate::admin::{Account, Property};
use crate::data::{FunnelSubReport, RunFunnelReportResponse, RunReportResponse};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// How responses are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Pretty,
    /// One JSON document per line
    Json,
}

/// Writes responses in the selected format
pub struct Printer<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print a single (unpaginated) report
    ///
    /// The row count printed is the server's `rowCount`.
    pub fn run_report(&mut self, response: &RunReportResponse) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.json_line(response);
        }
        writeln!(self.out, "{} rows received", response.row_count.unwrap_or(0))?;
        self.report_body(response)
    }

    /// Print one page of a paginated report
    pub fn report_page(&mut self, response: &RunReportResponse, request_number: u32) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.json_line(response);
        }
        writeln!(
            self.out,
            "{} rows received for request #{}",
            response.rows.len(),
            request_number
        )?;
        self.report_body(response)
    }

    /// Closing line of a paginated report; pretty output only
    pub fn pagination_summary(&mut self, rows: u64, requests: u32) -> Result<()> {
        if self.format == OutputFormat::Json {
            return Ok(());
        }
        writeln!(self.out, "{rows} rows in {requests} requests")?;
        Ok(())
    }

    fn report_body(&mut self, response: &RunReportResponse) -> Result<()> {
        for header in &response.dimension_headers {
            writeln!(self.out, "Dimension header name: {}", header.name)?;
        }
        for header in &response.metric_headers {
            writeln!(
                self.out,
                "Metric header name: {} ({})",
                header.name,
                header.metric_type.name()
            )?;
        }

        writeln!(self.out, "Report result:")?;
        for row in &response.rows {
            let dimension = row.dimension_values.first().map_or("", |v| v.value.as_str());
            let metric = row.metric_values.first().map_or("", |v| v.value.as_str());
            writeln!(self.out, "{dimension} {metric}")?;
        }
        Ok(())
    }

    /// Print both sub-reports of a funnel report
    pub fn funnel_report(&mut self, response: &RunFunnelReportResponse) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.json_line(response);
        }
        writeln!(self.out, "Report result:")?;
        writeln!(self.out, "=== FUNNEL VISUALIZATION ===")?;
        self.funnel_sub_report(response.funnel_visualization.as_ref())?;
        writeln!(self.out, "=== FUNNEL TABLE ===")?;
        self.funnel_sub_report(response.funnel_table.as_ref())
    }

    fn funnel_sub_report(&mut self, sub_report: Option<&FunnelSubReport>) -> Result<()> {
        let empty = FunnelSubReport::default();
        let sub_report = sub_report.unwrap_or(&empty);

        writeln!(self.out, "Dimension headers:")?;
        for header in &sub_report.dimension_headers {
            writeln!(self.out, "{}", header.name)?;
        }
        writeln!(self.out, "Metric headers:")?;
        for header in &sub_report.metric_headers {
            writeln!(self.out, "{}", header.name)?;
        }

        writeln!(
            self.out,
            "Dimension and metric values for each row in the report:"
        )?;
        for (index, row) in sub_report.rows.iter().enumerate() {
            writeln!(self.out, "Row #{index}")?;
            for (position, value) in row.dimension_values.iter().enumerate() {
                let name = sub_report
                    .dimension_headers
                    .get(position)
                    .map_or("", |h| h.name.as_str());
                writeln!(self.out, "{name}: '{}'", value.value)?;
            }
            for (position, value) in row.metric_values.iter().enumerate() {
                let name = sub_report
                    .metric_headers
                    .get(position)
                    .map_or("", |h| h.name.as_str());
                writeln!(self.out, "{name}: '{}'", value.value)?;
            }
        }

        writeln!(self.out, "Sampling metadata for each date range:")?;
        for (index, metadata) in sub_report.metadata.sampling_metadatas.iter().enumerate() {
            writeln!(
                self.out,
                "Sampling metadata for date range #{index}: samplesReadCount={} samplingSpaceSize={}",
                metadata.samples_read_count, metadata.sampling_space_size
            )?;
        }
        Ok(())
    }

    /// Print the heading of an account or property listing
    pub fn listing_header(&mut self) -> Result<()> {
        if self.format == OutputFormat::Pretty {
            writeln!(self.out, "Result:")?;
        }
        Ok(())
    }

    pub fn account(&mut self, account: &Account) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.json_line(account);
        }
        writeln!(self.out, "Account name: {}", account.name)?;
        writeln!(self.out, "Display name: {}", account.display_name)?;
        writeln!(self.out, "Country code: {}", account.region_code)?;
        writeln!(self.out, "Create time: {}", seconds(account.create_time))?;
        writeln!(self.out, "Update time: {}", seconds(account.update_time))?;
        Ok(())
    }

    pub fn property(&mut self, index: usize, property: &Property) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.json_line(property);
        }
        writeln!(
            self.out,
            "Property #{index} resource name: {}, parent: {}, display name: \"{}\", currency: {}, time zone: {}, create time: {}, update time: {}",
            property.name,
            property.parent,
            property.display_name,
            property.currency_code,
            property.time_zone,
            seconds(property.create_time),
            seconds(property.update_time),
        )?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn json_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> std::fmt::Debug for Printer<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Printer")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

/// Unix seconds of a timestamp; unset timestamps print as 0
fn seconds(time: Option<DateTime<Utc>>) -> i64 {
    time.map_or(0, |t| t.timestamp())
}
