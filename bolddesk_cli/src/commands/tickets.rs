use anyhow::{bail, Result};
use bolddesk_lib::types::{TicketCreate, TicketMessageCreate, TicketNoteCreate, TicketUpdate};
use bolddesk_lib::validation::{
    self, parse_id_list, sanitize_text, validate_email, validate_id, MAX_DESCRIPTION_LENGTH,
    MAX_SUBJECT_LENGTH,
};
use bolddesk_lib::{ListQuery, TicketQuery};
use clap::{Args, Subcommand};

use super::{page_summary, Context, FetchAll, ListOptions};
use crate::output::{
    print_created, print_done, print_messages, print_notes, print_one, print_tickets,
};

#[derive(Args)]
pub struct TicketsArgs {
    #[command(subcommand)]
    pub command: TicketsCommand,
}

#[derive(Subcommand)]
pub enum TicketsCommand {
    /// List tickets
    List(TicketListArgs),
    /// Show a single ticket
    Get { id: i64 },
    /// Create a ticket
    Create(TicketCreateArgs),
    /// Change fields on a ticket
    Update(TicketUpdateArgs),
    /// Delete a ticket
    Delete { id: i64 },
    /// Close a ticket
    Close { id: i64 },
    /// List private notes on a ticket
    Notes { id: i64 },
    /// Add a private note to a ticket
    Note {
        id: i64,
        /// Note text
        #[arg(long)]
        text: String,
    },
    /// List the public conversation on a ticket
    Messages { id: i64 },
    /// Reply to the requester
    Reply {
        id: i64,
        /// Reply text
        #[arg(long)]
        text: String,
        /// Status ID to move the ticket to
        #[arg(long)]
        status: Option<i64>,
    },
}

#[derive(Args)]
pub struct TicketListArgs {
    #[command(flatten)]
    pub list: ListOptions,

    /// Status IDs, comma-separated (e.g. 1,2)
    #[arg(long)]
    pub status: Option<String>,

    /// Priority IDs, comma-separated
    #[arg(long)]
    pub priority: Option<String>,

    /// Brand IDs, comma-separated
    #[arg(long)]
    pub brand: Option<String>,

    /// Assigned agent ID
    #[arg(long)]
    pub agent: Option<i64>,

    /// Creation date filter: today, yesterday, lastweek, ...
    #[arg(long)]
    pub created_on: Option<String>,

    /// Tag (repeatable)
    #[arg(long)]
    pub tag: Vec<String>,

    /// Saved view ID
    #[arg(long)]
    pub view: Option<i64>,
}

#[derive(Args)]
pub struct TicketCreateArgs {
    #[arg(long)]
    pub subject: String,

    #[arg(long)]
    pub description: String,

    /// Brand the ticket belongs to
    #[arg(long)]
    pub brand: i64,

    /// Requester email; a contact is created if none exists
    #[arg(long)]
    pub requester_email: Option<String>,

    #[arg(long)]
    pub priority: Option<i64>,

    #[arg(long)]
    pub category: Option<i64>,

    /// Agent to assign
    #[arg(long)]
    pub agent: Option<i64>,

    /// Tag (repeatable)
    #[arg(long)]
    pub tag: Vec<String>,
}

#[derive(Args)]
pub struct TicketUpdateArgs {
    pub id: i64,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long)]
    pub status: Option<i64>,

    #[arg(long)]
    pub priority: Option<i64>,

    #[arg(long)]
    pub category: Option<i64>,

    #[arg(long)]
    pub agent: Option<i64>,

    #[arg(long)]
    pub group: Option<i64>,
}

pub async fn run(args: &TicketsArgs, ctx: &Context) -> Result<()> {
    let tickets = ctx.client.tickets();
    match &args.command {
        TicketsCommand::List(list) => {
            let query = build_query(list, ctx)?;
            if list.list.all {
                let fetch = FetchAll::new()?;
                let items = fetch.collect(tickets.all(query)).await?;
                print_tickets(&items, &ctx.format)?;
            } else {
                let resp = tickets.list(&query).await?;
                eprintln!("{}", page_summary(query.common.page, &resp));
                print_tickets(&resp.result, &ctx.format)?;
            }
        }
        TicketsCommand::Get { id } => {
            let ticket = tickets.get(validate_id(*id, "ticket ID")?).await?;
            print_one(&ticket, &ctx.format, print_tickets)?;
        }
        TicketsCommand::Create(create) => {
            let body = build_create(create)?;
            let resp = tickets.create(&body).await?;
            print_created("ticket", &resp, &ctx.format);
        }
        TicketsCommand::Update(update) => {
            let id = validate_id(update.id, "ticket ID")?;
            let body = build_update(update)?;
            let resp = tickets.update(id, &body).await?;
            print_done(&format!("Updated ticket {}", id), &resp, &ctx.format);
        }
        TicketsCommand::Delete { id } => {
            let id = validate_id(*id, "ticket ID")?;
            let resp = tickets.delete(id).await?;
            print_done(&format!("Deleted ticket {}", id), &resp, &ctx.format);
        }
        TicketsCommand::Close { id } => {
            let id = validate_id(*id, "ticket ID")?;
            let resp = tickets.close(id).await?;
            print_done(&format!("Closed ticket {}", id), &resp, &ctx.format);
        }
        TicketsCommand::Notes { id } => {
            let query = ctx.paged(ListQuery::default())?;
            let resp = tickets.notes(validate_id(*id, "ticket ID")?, &query).await?;
            print_notes(&resp.result, &ctx.format)?;
        }
        TicketsCommand::Note { id, text } => {
            let note = TicketNoteCreate {
                description: sanitize_text(text, MAX_DESCRIPTION_LENGTH)?,
            };
            let resp = tickets.add_note(validate_id(*id, "ticket ID")?, &note).await?;
            print_created("note", &resp, &ctx.format);
        }
        TicketsCommand::Messages { id } => {
            let query = ctx.paged(ListQuery::default())?;
            let resp = tickets
                .messages(validate_id(*id, "ticket ID")?, &query)
                .await?;
            print_messages(&resp.result, &ctx.format)?;
        }
        TicketsCommand::Reply { id, text, status } => {
            let message = TicketMessageCreate {
                description: sanitize_text(text, MAX_DESCRIPTION_LENGTH)?,
                status_id: status.map(|s| validate_id(s, "status ID")).transpose()?,
            };
            let resp = tickets.reply(validate_id(*id, "ticket ID")?, &message).await?;
            print_created("reply", &resp, &ctx.format);
        }
    }
    Ok(())
}

fn build_query(args: &TicketListArgs, ctx: &Context) -> Result<TicketQuery> {
    let mut query = args.list.apply(ctx, TicketQuery::default())?;
    if let Some(status) = &args.status {
        query = query.with_status_ids(&parse_id_list(status)?);
    }
    if let Some(priority) = &args.priority {
        query = query.with_priority_ids(&parse_id_list(priority)?);
    }
    if let Some(brand) = &args.brand {
        query = query.with_brand_ids(&parse_id_list(brand)?);
    }
    if let Some(agent) = args.agent {
        query = query.with_agent_id(validate_id(agent, "agent ID")?);
    }
    if let Some(created_on) = &args.created_on {
        query = query.with_created_on(&sanitize_text(created_on, validation::MAX_NAME_LENGTH)?);
    }
    for tag in &args.tag {
        query = query.with_tag(&sanitize_text(tag, validation::MAX_NAME_LENGTH)?);
    }
    if let Some(view) = args.view {
        query = query.with_view_id(validate_id(view, "view ID")?);
    }
    Ok(query)
}

fn build_create(args: &TicketCreateArgs) -> Result<TicketCreate> {
    Ok(TicketCreate {
        subject: sanitize_text(&args.subject, MAX_SUBJECT_LENGTH)?,
        description: sanitize_text(&args.description, MAX_DESCRIPTION_LENGTH)?,
        brand_id: validate_id(args.brand, "brand ID")?,
        requester_email_id: args.requester_email.as_deref().map(validate_email).transpose()?,
        requester_id: None,
        category_id: args.category.map(|id| validate_id(id, "category ID")).transpose()?,
        priority_id: args.priority.map(|id| validate_id(id, "priority ID")).transpose()?,
        agent_id: args.agent.map(|id| validate_id(id, "agent ID")).transpose()?,
        tags: args
            .tag
            .iter()
            .map(|t| sanitize_text(t, validation::MAX_NAME_LENGTH))
            .collect::<Result<_, _>>()?,
    })
}

fn build_update(args: &TicketUpdateArgs) -> Result<TicketUpdate> {
    let update = TicketUpdate {
        subject: args
            .subject
            .as_deref()
            .map(|s| sanitize_text(s, MAX_SUBJECT_LENGTH))
            .transpose()?,
        status_id: args.status.map(|id| validate_id(id, "status ID")).transpose()?,
        priority_id: args.priority.map(|id| validate_id(id, "priority ID")).transpose()?,
        category_id: args.category.map(|id| validate_id(id, "category ID")).transpose()?,
        agent_id: args.agent.map(|id| validate_id(id, "agent ID")).transpose()?,
        group_id: args.group.map(|id| validate_id(id, "group ID")).transpose()?,
    };
    if update.is_empty() {
        bail!("nothing to update: pass at least one of --subject, --status, --priority, --category, --agent, --group");
    }
    Ok(update)
}
