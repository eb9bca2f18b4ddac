use anyhow::{anyhow, bail, Result};
use bolddesk_lib::types::{AgentCreate, AgentUpdate};
use bolddesk_lib::validation::{
    parse_id_list, sanitize_text, validate_email, validate_id, MAX_NAME_LENGTH,
};
use bolddesk_lib::{AgentQuery, AgentStatus};
use clap::{Args, Subcommand};

use super::{page_summary, Context, FetchAll, ListOptions};
use crate::output::{print_agents, print_created, print_done, print_one};

#[derive(Args)]
pub struct AgentsArgs {
    #[command(subcommand)]
    pub command: AgentsCommand,
}

#[derive(Subcommand)]
pub enum AgentsCommand {
    /// List agents
    List(AgentListArgs),
    /// Show a single agent
    Get { id: i64 },
    /// Invite a new agent
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Role IDs, comma-separated
        #[arg(long)]
        roles: Option<String>,
        /// Brand IDs, comma-separated
        #[arg(long)]
        brands: Option<String>,
    },
    /// Change an agent's name, roles or groups
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        /// Role IDs, comma-separated
        #[arg(long)]
        roles: Option<String>,
        /// Group IDs, comma-separated
        #[arg(long)]
        groups: Option<String>,
    },
    /// Re-enable a deactivated agent
    Activate { id: i64 },
    /// Deactivate an agent
    Deactivate { id: i64 },
}

#[derive(Args)]
pub struct AgentListArgs {
    #[command(flatten)]
    pub list: ListOptions,

    /// Account state: active, inactive, invited
    #[arg(long)]
    pub status: Option<String>,

    /// Role ID (repeatable)
    #[arg(long)]
    pub role: Vec<i64>,
}

pub async fn run(args: &AgentsArgs, ctx: &Context) -> Result<()> {
    let agents = ctx.client.agents();
    match &args.command {
        AgentsCommand::List(list) => {
            let mut query = list.list.apply(ctx, AgentQuery::default())?;
            if let Some(status) = &list.status {
                query = query.with_status(parse_status(status)?);
            }
            for role in &list.role {
                query = query.with_role_id(validate_id(*role, "role ID")?);
            }

            if list.list.all {
                let fetch = FetchAll::new()?;
                let items = fetch.collect(agents.all(query)).await?;
                print_agents(&items, &ctx.format)?;
            } else {
                let resp = agents.list(&query).await?;
                eprintln!("{}", page_summary(query.common.page, &resp));
                print_agents(&resp.result, &ctx.format)?;
            }
        }
        AgentsCommand::Get { id } => {
            let agent = agents.get(validate_id(*id, "agent ID")?).await?;
            print_one(&agent, &ctx.format, print_agents)?;
        }
        AgentsCommand::Create {
            name,
            email,
            roles,
            brands,
        } => {
            let body = AgentCreate {
                name: sanitize_text(name, MAX_NAME_LENGTH)?,
                email_id: validate_email(email)?,
                role_ids: roles.as_deref().map(parse_id_list).transpose()?.unwrap_or_default(),
                brand_ids: brands.as_deref().map(parse_id_list).transpose()?.unwrap_or_default(),
            };
            let resp = agents.create(&body).await?;
            print_created("agent", &resp, &ctx.format);
        }
        AgentsCommand::Update {
            id,
            name,
            roles,
            groups,
        } => {
            let id = validate_id(*id, "agent ID")?;
            let body = AgentUpdate {
                name: name
                    .as_deref()
                    .map(|n| sanitize_text(n, MAX_NAME_LENGTH))
                    .transpose()?,
                role_ids: roles.as_deref().map(parse_id_list).transpose()?,
                group_ids: groups.as_deref().map(parse_id_list).transpose()?,
            };
            if body.name.is_none() && body.role_ids.is_none() && body.group_ids.is_none() {
                bail!("nothing to update: pass at least one of --name, --roles, --groups");
            }
            let resp = agents.update(id, &body).await?;
            print_done(&format!("Updated agent {}", id), &resp, &ctx.format);
        }
        AgentsCommand::Activate { id } => {
            let id = validate_id(*id, "agent ID")?;
            let resp = agents.activate(id).await?;
            print_done(&format!("Activated agent {}", id), &resp, &ctx.format);
        }
        AgentsCommand::Deactivate { id } => {
            let id = validate_id(*id, "agent ID")?;
            let resp = agents.deactivate(id).await?;
            print_done(&format!("Deactivated agent {}", id), &resp, &ctx.format);
        }
    }
    Ok(())
}

fn parse_status(input: &str) -> Result<AgentStatus> {
    input.trim().parse::<AgentStatus>().map_err(|_| {
        anyhow!(
            "unknown agent status '{}'. Valid values: active, inactive, invited",
            input
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing() {
        assert_eq!(parse_status(" Active ").unwrap(), AgentStatus::Active);
        assert!(parse_status("retired").is_err());
    }
}
