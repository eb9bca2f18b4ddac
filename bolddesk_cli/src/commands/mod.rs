//! CLI subcommand implementations.

pub mod agents;
pub mod brands;
pub mod contact_groups;
pub mod contacts;
pub mod fields;
pub mod rate_limit;
pub mod repl;
pub mod tickets;
pub mod worklogs;

use std::time::Duration;

use anyhow::{bail, Result};
use bolddesk_lib::types::PagedResponse;
use bolddesk_lib::validation::{
    sanitize_text, validate_order_by, validate_page, validate_per_page, validate_q_expression,
    MAX_NAME_LENGTH,
};
use bolddesk_lib::{CancellationToken, Client, Paginator, Query};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use crate::output::OutputFormat;
use crate::Commands;

/// Everything a command needs besides its own arguments.
#[derive(Clone, Debug)]
pub struct Context {
    pub client: Client,
    pub format: OutputFormat,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl Context {
    /// Applies the global `--page` / `--per-page` flags.
    pub fn paged<Q: Query>(&self, mut query: Q) -> Result<Q> {
        if let Some(page) = self.page {
            query = query.with_page(validate_page(page)?);
        }
        if let Some(per_page) = self.per_page {
            query = query.with_per_page(validate_per_page(per_page)?);
        }
        Ok(query)
    }
}

/// Flags shared by every `list` subcommand.
#[derive(Args, Debug, Default)]
pub struct ListOptions {
    /// Fetch every page instead of one
    #[arg(long)]
    pub all: bool,

    /// Sort order, e.g. "createdon desc" or "-lastupdatedon"
    #[arg(long)]
    pub order_by: Option<String>,

    /// Raw filter expression, e.g. "status:[1,2]" (repeatable)
    #[arg(long = "q")]
    pub q: Vec<String>,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,
}

impl ListOptions {
    /// Validates the flags and folds them, plus the global paging flags, into `query`.
    pub fn apply<Q: Query>(&self, ctx: &Context, query: Q) -> Result<Q> {
        let mut query = ctx.paged(query)?;
        if let Some(order_by) = &self.order_by {
            let (field, direction) = validate_order_by(order_by)?;
            query = query.with_order_by(&field, direction);
        }
        for q in &self.q {
            query = query.with_q(&validate_q_expression(q)?);
        }
        if let Some(search) = &self.search {
            query = query.with_filter(&sanitize_text(search, MAX_NAME_LENGTH)?);
        }
        if self.all {
            query = query.with_requires_counts(true);
        }
        Ok(query)
    }
}

/// Drives a [`Paginator`] to the end behind a spinner. Ctrl-C stops after
/// the page in flight; a second Ctrl-C quits.
pub struct FetchAll {
    bar: ProgressBar,
    sink: Box<dyn Fn(&str) + Send + Sync>,
}

impl FetchAll {
    pub fn new() -> Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::with_template("{spinner} [{elapsed_precise}] {msg}")?);
        bar.enable_steady_tick(Duration::from_millis(120));
        let handle = bar.clone();
        Ok(Self {
            bar,
            sink: Box::new(move |msg: &str| handle.set_message(msg.to_string())),
        })
    }

    pub async fn collect<'a, T, Q>(&'a self, paginator: Paginator<'a, T, Q>) -> Result<Vec<T>>
    where
        T: Send + 'a,
        Q: Query + Clone,
    {
        let token = CancellationToken::new();
        let watcher = {
            let token = token.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_err() {
                    return;
                }
                eprintln!("\nStopping after the current page. Press Ctrl+C again to quit.");
                token.cancel();
                if tokio::signal::ctrl_c().await.is_ok() {
                    std::process::exit(130);
                }
            })
        };

        let mut paginator = paginator
            .with_cancellation(token.clone())
            .with_progress(&*self.sink);
        let mut items = Vec::new();
        let outcome = loop {
            match paginator.next_page().await {
                Ok(Some(page)) => items.extend(page),
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        watcher.abort();
        self.bar.finish_and_clear();
        outcome?;

        if token.is_cancelled() {
            eprintln!("Cancelled: {} items fetched", items.len());
        } else {
            eprintln!("{} items across {} pages", items.len(), paginator.pages_fetched());
        }
        Ok(items)
    }
}

/// One line describing a single fetched page, printed to stderr.
pub fn page_summary<T>(page: u32, resp: &PagedResponse<T>) -> String {
    if resp.count > 0 {
        format!("Page {}: {} of {} total", page, resp.result.len(), resp.count)
    } else {
        format!("Page {}: {} fetched", page, resp.result.len())
    }
}

/// Runs one parsed command. The REPL reuses this for every line it reads.
pub async fn dispatch(command: &Commands, ctx: &Context) -> Result<()> {
    match command {
        Commands::Tickets(args) => tickets::run(args, ctx).await,
        Commands::Contacts(args) => contacts::run(args, ctx).await,
        Commands::ContactGroups(args) => contact_groups::run(args, ctx).await,
        Commands::Agents(args) => agents::run(args, ctx).await,
        Commands::Brands(args) => brands::run(args, ctx).await,
        Commands::Worklogs(args) => worklogs::run(args, ctx).await,
        Commands::Fields(args) => fields::run(args, ctx).await,
        Commands::RateLimit => rate_limit::run(ctx).await,
        Commands::Repl => bail!("already in the REPL"),
    }
}

#[cfg(test)]
mod tests {
    use bolddesk_lib::{ListQuery, TicketQuery};

    use super::*;

    fn ctx(page: Option<u32>, per_page: Option<u32>) -> Context {
        Context {
            client: Client::with_base_url("http://localhost:1", "key").unwrap(),
            format: OutputFormat::Table,
            page,
            per_page,
        }
    }

    #[test]
    fn paged_applies_global_flags() {
        let query = ctx(Some(3), Some(25)).paged(ListQuery::default()).unwrap();
        assert_eq!(query.common.page, 3);
        assert_eq!(query.common.per_page, Some(25));
    }

    #[test]
    fn paged_rejects_out_of_range() {
        assert!(ctx(Some(0), None).paged(ListQuery::default()).is_err());
        assert!(ctx(None, Some(500)).paged(ListQuery::default()).is_err());
    }

    #[test]
    fn list_options_fold_into_query() {
        let opts = ListOptions {
            all: true,
            order_by: Some("-createdon".to_string()),
            q: vec!["status:[1]".to_string()],
            search: Some(" printer ".to_string()),
        };
        let query = opts.apply(&ctx(None, None), TicketQuery::default()).unwrap();
        assert_eq!(query.common.order_by.as_deref(), Some("createdon desc"));
        assert_eq!(query.common.q, vec!["status:[1]"]);
        assert_eq!(query.common.filter.as_deref(), Some("printer"));
        assert_eq!(query.common.requires_counts, Some(true));
    }

    #[test]
    fn list_options_reject_bad_filter() {
        let opts = ListOptions {
            q: vec!["status".to_string()],
            ..Default::default()
        };
        assert!(opts.apply(&ctx(None, None), ListQuery::default()).is_err());
    }

    #[test]
    fn page_summary_with_and_without_count() {
        let resp = PagedResponse {
            result: vec![1, 2, 3],
            count: 42,
        };
        assert_eq!(page_summary(2, &resp), "Page 2: 3 of 42 total");
        let resp = PagedResponse {
            result: vec![1],
            count: 0,
        };
        assert_eq!(page_summary(1, &resp), "Page 1: 1 fetched");
    }
}
