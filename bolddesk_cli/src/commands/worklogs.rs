use anyhow::{anyhow, bail, Result};
use bolddesk_lib::types::{WorklogCreate, WorklogUpdate};
use bolddesk_lib::validation::{sanitize_text, validate_id, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};
use bolddesk_lib::WorklogQuery;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};

use super::{page_summary, Context, FetchAll, ListOptions};
use crate::output::{print_created, print_done, print_worklogs};

#[derive(Args)]
pub struct WorklogsArgs {
    #[command(subcommand)]
    pub command: WorklogsCommand,
}

#[derive(Subcommand)]
pub enum WorklogsCommand {
    /// List worklogs, optionally for one ticket
    List(WorklogListArgs),
    /// Log time against a ticket
    Add {
        ticket: i64,
        /// Time spent in minutes
        #[arg(long)]
        minutes: u32,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        billable: bool,
        /// Day the work happened (YYYY-MM-DD); defaults to today on the server
        #[arg(long)]
        date: Option<String>,
    },
    /// Change a worklog entry
    Update {
        ticket: i64,
        worklog: i64,
        #[arg(long)]
        minutes: Option<u32>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        billable: Option<bool>,
    },
    /// Remove a worklog entry
    Delete { ticket: i64, worklog: i64 },
}

#[derive(Args)]
pub struct WorklogListArgs {
    #[command(flatten)]
    pub list: ListOptions,

    /// Only this ticket's worklogs
    #[arg(long)]
    pub ticket: Option<i64>,

    /// Agent who logged the time
    #[arg(long)]
    pub agent: Option<i64>,

    #[arg(long)]
    pub billable: Option<bool>,

    /// Date filter: today, yesterday, lastweek, ...
    #[arg(long)]
    pub logged_on: Option<String>,
}

pub async fn run(args: &WorklogsArgs, ctx: &Context) -> Result<()> {
    let worklogs = ctx.client.worklogs();
    match &args.command {
        WorklogsCommand::List(list) => {
            let mut query = list.list.apply(ctx, WorklogQuery::default())?;
            if let Some(ticket) = list.ticket {
                query = query.with_ticket_id(validate_id(ticket, "ticket ID")?);
            }
            if let Some(agent) = list.agent {
                query = query.with_agent_id(validate_id(agent, "agent ID")?);
            }
            if let Some(billable) = list.billable {
                query = query.with_billable(billable);
            }
            if let Some(logged_on) = &list.logged_on {
                query = query.with_logged_on(&sanitize_text(logged_on, MAX_NAME_LENGTH)?);
            }

            if list.list.all {
                let fetch = FetchAll::new()?;
                let items = fetch.collect(worklogs.all(query)).await?;
                print_worklogs(&items, &ctx.format)?;
            } else {
                let resp = worklogs.list(&query).await?;
                eprintln!("{}", page_summary(query.common.page, &resp));
                print_worklogs(&resp.result, &ctx.format)?;
            }
        }
        WorklogsCommand::Add {
            ticket,
            minutes,
            description,
            billable,
            date,
        } => {
            let ticket = validate_id(*ticket, "ticket ID")?;
            let body = WorklogCreate {
                time_spent: validate_minutes(*minutes)?,
                description: description
                    .as_deref()
                    .map(|d| sanitize_text(d, MAX_DESCRIPTION_LENGTH))
                    .transpose()?,
                is_billable: *billable,
                log_date: date.as_deref().map(parse_log_date).transpose()?,
            };
            let resp = worklogs.create(ticket, &body).await?;
            print_created("worklog", &resp, &ctx.format);
        }
        WorklogsCommand::Update {
            ticket,
            worklog,
            minutes,
            description,
            billable,
        } => {
            let ticket = validate_id(*ticket, "ticket ID")?;
            let worklog = validate_id(*worklog, "worklog ID")?;
            let body = WorklogUpdate {
                time_spent: minutes.map(validate_minutes).transpose()?,
                description: description
                    .as_deref()
                    .map(|d| sanitize_text(d, MAX_DESCRIPTION_LENGTH))
                    .transpose()?,
                is_billable: *billable,
            };
            if body.time_spent.is_none() && body.description.is_none() && body.is_billable.is_none() {
                bail!("nothing to update: pass at least one of --minutes, --description, --billable");
            }
            let resp = worklogs.update(ticket, worklog, &body).await?;
            print_done(&format!("Updated worklog {}", worklog), &resp, &ctx.format);
        }
        WorklogsCommand::Delete { ticket, worklog } => {
            let ticket = validate_id(*ticket, "ticket ID")?;
            let worklog = validate_id(*worklog, "worklog ID")?;
            let resp = worklogs.delete(ticket, worklog).await?;
            print_done(&format!("Deleted worklog {}", worklog), &resp, &ctx.format);
        }
    }
    Ok(())
}

// A day, in minutes.
const MAX_MINUTES: u32 = 24 * 60;

fn validate_minutes(minutes: u32) -> Result<u32> {
    if minutes == 0 || minutes > MAX_MINUTES {
        bail!("--minutes must be between 1 and {}, got {}", MAX_MINUTES, minutes);
    }
    Ok(minutes)
}

fn parse_log_date(input: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid date '{}': expected YYYY-MM-DD", input))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("invalid date '{}'", input))?;
    Ok(midnight.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn minutes_range() {
        assert!(validate_minutes(0).is_err());
        assert_eq!(validate_minutes(90).unwrap(), 90);
        assert!(validate_minutes(MAX_MINUTES + 1).is_err());
    }

    #[test]
    fn log_date_is_midnight_utc() {
        let date = parse_log_date("2024-03-09").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 9));
        assert_eq!(date.to_rfc3339(), "2024-03-09T00:00:00+00:00");
        assert!(parse_log_date("09/03/2024").is_err());
    }
}
