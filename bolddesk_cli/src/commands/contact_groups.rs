use anyhow::{bail, Result};
use bolddesk_lib::types::{ContactGroupCreate, ContactGroupUpdate};
use bolddesk_lib::validation::{
    sanitize_text, validate_id, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH,
};
use bolddesk_lib::ListQuery;
use clap::{Args, Subcommand};

use super::{page_summary, Context, FetchAll, ListOptions};
use crate::output::{print_contact_groups, print_contacts, print_created, print_done, print_one};

#[derive(Args)]
pub struct ContactGroupsArgs {
    #[command(subcommand)]
    pub command: ContactGroupsCommand,
}

#[derive(Subcommand)]
pub enum ContactGroupsCommand {
    /// List contact groups
    List(ListOptions),
    /// Show a single contact group
    Get { id: i64 },
    /// Create a contact group
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Email domain whose contacts join automatically (repeatable)
        #[arg(long)]
        domain: Vec<String>,
    },
    /// Change fields on a contact group
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Replaces the domain list (repeatable)
        #[arg(long)]
        domain: Vec<String>,
    },
    /// Delete a contact group
    Delete { id: i64 },
    /// List the contacts in a group
    Members { id: i64 },
}

pub async fn run(args: &ContactGroupsArgs, ctx: &Context) -> Result<()> {
    let groups = ctx.client.contact_groups();
    match &args.command {
        ContactGroupsCommand::List(list) => {
            let query = list.apply(ctx, ListQuery::default())?;
            if list.all {
                let fetch = FetchAll::new()?;
                let items = fetch.collect(groups.all(query)).await?;
                print_contact_groups(&items, &ctx.format)?;
            } else {
                let resp = groups.list(&query).await?;
                eprintln!("{}", page_summary(query.common.page, &resp));
                print_contact_groups(&resp.result, &ctx.format)?;
            }
        }
        ContactGroupsCommand::Get { id } => {
            let group = groups.get(validate_id(*id, "contact group ID")?).await?;
            print_one(&group, &ctx.format, print_contact_groups)?;
        }
        ContactGroupsCommand::Create {
            name,
            description,
            domain,
        } => {
            let body = ContactGroupCreate {
                contact_group_name: sanitize_text(name, MAX_NAME_LENGTH)?,
                contact_group_description: description
                    .as_deref()
                    .map(|d| sanitize_text(d, MAX_DESCRIPTION_LENGTH))
                    .transpose()?,
                contact_group_domains: clean_domains(domain)?,
            };
            let resp = groups.create(&body).await?;
            print_created("contact group", &resp, &ctx.format);
        }
        ContactGroupsCommand::Update {
            id,
            name,
            description,
            domain,
        } => {
            let id = validate_id(*id, "contact group ID")?;
            let body = ContactGroupUpdate {
                contact_group_name: name
                    .as_deref()
                    .map(|n| sanitize_text(n, MAX_NAME_LENGTH))
                    .transpose()?,
                contact_group_description: description
                    .as_deref()
                    .map(|d| sanitize_text(d, MAX_DESCRIPTION_LENGTH))
                    .transpose()?,
                contact_group_domains: if domain.is_empty() {
                    None
                } else {
                    Some(clean_domains(domain)?)
                },
            };
            if body.contact_group_name.is_none()
                && body.contact_group_description.is_none()
                && body.contact_group_domains.is_none()
            {
                bail!("nothing to update: pass at least one of --name, --description, --domain");
            }
            let resp = groups.update(id, &body).await?;
            print_done(&format!("Updated contact group {}", id), &resp, &ctx.format);
        }
        ContactGroupsCommand::Delete { id } => {
            let id = validate_id(*id, "contact group ID")?;
            let resp = groups.delete(id).await?;
            print_done(&format!("Deleted contact group {}", id), &resp, &ctx.format);
        }
        ContactGroupsCommand::Members { id } => {
            let query = ctx.paged(ListQuery::default())?;
            let resp = groups
                .members(validate_id(*id, "contact group ID")?, &query)
                .await?;
            eprintln!("{}", page_summary(query.common.page, &resp));
            print_contacts(&resp.result, &ctx.format)?;
        }
    }
    Ok(())
}

fn clean_domains(domains: &[String]) -> Result<Vec<String>> {
    domains
        .iter()
        .map(|d| {
            let d = sanitize_text(d, MAX_NAME_LENGTH)?.to_ascii_lowercase();
            if d.contains('@') || !d.contains('.') {
                bail!("'{}' is not a domain name (expected e.g. example.com)", d);
            }
            Ok(d)
        })
        .collect()
}
