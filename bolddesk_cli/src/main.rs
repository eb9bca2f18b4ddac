mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use bolddesk_lib::Config;
use clap::{Parser, Subcommand};

use crate::commands::Context;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "bolddesk", version)]
#[command(about = "Work with BoldDesk tickets, contacts and agents from the terminal")]
pub(crate) struct Cli {
    /// Output format [default: table]
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Page number for list commands
    #[arg(long, global = true)]
    pub page: Option<u32>,

    /// Results per page for list commands (1-100)
    #[arg(long, global = true)]
    pub per_page: Option<u32>,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Tickets, notes and replies
    Tickets(commands::tickets::TicketsArgs),
    /// Contacts (end users)
    Contacts(commands::contacts::ContactsArgs),
    /// Contact groups (customer organisations)
    ContactGroups(commands::contact_groups::ContactGroupsArgs),
    /// Agents
    Agents(commands::agents::AgentsArgs),
    /// Brands
    Brands(commands::brands::BrandsArgs),
    /// Time tracking entries
    Worklogs(commands::worklogs::WorklogsArgs),
    /// Ticket and contact field definitions
    Fields(commands::fields::FieldsArgs),
    /// Show the most recent rate-limit reading
    RateLimit,
    /// Start an interactive shell
    Repl,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", output::render_error(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bolddesk=warn".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::resolve(cli.config.as_deref())?;
    let ctx = Context {
        client: config.client()?,
        format: cli.format.unwrap_or(OutputFormat::Table),
        page: cli.page,
        per_page: cli.per_page,
    };

    match &cli.command {
        Commands::Repl => commands::repl::run(&ctx).await,
        command => commands::dispatch(command, &ctx).await,
    }
}
