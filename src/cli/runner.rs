//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::output::Printer;
use crate::pagination::{OffsetPaginator, TotalRowsPolicy};
use crate::samples;
use futures::TryStreamExt;
use std::io::Write;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
    settings: Settings,
}

impl Runner {
    /// Create a runner, loading settings from `--config` and the environment
    pub fn new(cli: Cli) -> Result<Self> {
        let settings = Settings::load(cli.config.as_deref())?;
        Ok(Self::with_settings(cli, settings))
    }

    /// Create a runner with already-resolved settings; command-line flags
    /// still take precedence
    pub fn with_settings(cli: Cli, mut settings: Settings) -> Self {
        if let Some(path) = &cli.credentials {
            settings.credentials = Some(path.clone());
        }
        Self { cli, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the CLI command, printing to stdout
    pub async fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        self.run_with_output(stdout.lock()).await
    }

    /// Run the CLI command, printing to `out`
    pub async fn run_with_output<W: Write>(&self, out: W) -> Result<()> {
        let mut printer = Printer::new(out, self.cli.format);
        let result = match &self.cli.command {
            Commands::Accounts => self.accounts(&mut printer).await,
            Commands::Properties { account_id } => {
                self.properties(&mut printer, account_id.as_deref()).await
            }
            Commands::Report { property_id } => {
                self.report(&mut printer, property_id.as_deref()).await
            }
            Commands::Paginate {
                property_id,
                limit,
                snapshot_total,
            } => {
                self.paginate(&mut printer, property_id.as_deref(), *limit, *snapshot_total)
                    .await
            }
            Commands::Funnel { property_id } => {
                self.funnel(&mut printer, property_id.as_deref()).await
            }
        };
        let flushed = printer.flush();
        result.and(flushed)
    }

    fn property_id<'a>(&'a self, flag: Option<&'a str>) -> Result<&'a str> {
        match flag {
            Some(id) => Ok(id),
            None => self.settings.property_id(),
        }
    }

    async fn accounts<W: Write>(&self, printer: &mut Printer<W>) -> Result<()> {
        let client = self.settings.admin_client()?;
        printer.listing_header()?;

        let mut accounts = std::pin::pin!(client.list_all_accounts());
        let mut count = 0usize;
        while let Some(account) = accounts.try_next().await? {
            printer.account(&account)?;
            count += 1;
        }
        debug!(count, "Listed accounts");
        Ok(())
    }

    async fn properties<W: Write>(
        &self,
        printer: &mut Printer<W>,
        account_id: Option<&str>,
    ) -> Result<()> {
        let account_id = match account_id {
            Some(id) => id,
            None => self.settings.account_id()?,
        };
        let client = self.settings.admin_client()?;
        printer.listing_header()?;

        let mut properties = std::pin::pin!(client.list_all_properties(account_id));
        let mut index = 0usize;
        while let Some(property) = properties.try_next().await? {
            printer.property(index, &property)?;
            index += 1;
        }
        Ok(())
    }

    async fn report<W: Write>(
        &self,
        printer: &mut Printer<W>,
        property_id: Option<&str>,
    ) -> Result<()> {
        let request = samples::dimension_filter_report(self.property_id(property_id)?);
        let client = self.settings.data_client()?;
        let response = client.run_report(&request).await?;
        printer.run_report(&response)
    }

    async fn paginate<W: Write>(
        &self,
        printer: &mut Printer<W>,
        property_id: Option<&str>,
        limit: Option<i64>,
        snapshot_total: bool,
    ) -> Result<()> {
        let limit = limit.unwrap_or(self.settings.page_size);
        if limit <= 0 {
            return Err(Error::config(format!("--limit must be positive, got {limit}")));
        }
        let policy = if snapshot_total {
            TotalRowsPolicy::Snapshot
        } else {
            self.settings.total_rows
        };

        let request = samples::pagination_report(self.property_id(property_id)?, limit);
        let client = self.settings.data_client()?;

        // Pages are printed as they arrive, so a failed fetch still shows
        // everything received before the error. A failed write stops the
        // fetch before the next request.
        let pages = OffsetPaginator::new()
            .with_policy(policy)
            .fetch_all_with(&client, &request, |page, state| {
                printer.report_page(page, state.request_count)
            })
            .await?;
        info!(
            rows = pages.row_count(),
            requests = pages.request_count(),
            "Paginated report complete"
        );
        printer.pagination_summary(pages.row_count(), pages.request_count())?;
        Ok(())
    }

    async fn funnel<W: Write>(
        &self,
        printer: &mut Printer<W>,
        property_id: Option<&str>,
    ) -> Result<()> {
        let request = samples::default_funnel_report(self.property_id(property_id)?);
        let client = self.settings.data_client()?;
        let response = client.run_funnel_report(&request).await?;
        printer.funnel_report(&response)
    }
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("command", &self.cli.command)
            .finish_non_exhaustive()
    }
}
