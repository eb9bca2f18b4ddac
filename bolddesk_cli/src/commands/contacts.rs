use anyhow::{bail, Result};
use bolddesk_lib::types::{ContactCreate, ContactUpdate};
use bolddesk_lib::validation::{sanitize_text, validate_email, validate_id, MAX_NAME_LENGTH};
use bolddesk_lib::ContactQuery;
use clap::{Args, Subcommand};

use super::{page_summary, Context, FetchAll, ListOptions};
use crate::output::{print_contacts, print_created, print_done, print_one};

#[derive(Args)]
pub struct ContactsArgs {
    #[command(subcommand)]
    pub command: ContactsCommand,
}

#[derive(Subcommand)]
pub enum ContactsCommand {
    /// List contacts
    List(ContactListArgs),
    /// Show a single contact
    Get { id: i64 },
    /// Create a contact
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
    },
    /// Change fields on a contact
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
    },
    /// Delete a contact
    Delete { id: i64 },
    /// Stop a contact from raising tickets
    Block { id: i64 },
    /// Allow a blocked contact again
    Unblock { id: i64 },
}

#[derive(Args)]
pub struct ContactListArgs {
    #[command(flatten)]
    pub list: ListOptions,

    /// Exact email address
    #[arg(long)]
    pub email: Option<String>,

    /// Contact group ID
    #[arg(long)]
    pub group: Option<i64>,

    /// Only blocked (true) or unblocked (false) contacts
    #[arg(long)]
    pub blocked: Option<bool>,
}

pub async fn run(args: &ContactsArgs, ctx: &Context) -> Result<()> {
    let contacts = ctx.client.contacts();
    match &args.command {
        ContactsCommand::List(list) => {
            let mut query = list.list.apply(ctx, ContactQuery::default())?;
            if let Some(email) = &list.email {
                query = query.with_email(&validate_email(email)?);
            }
            if let Some(group) = list.group {
                query = query.with_contact_group_id(validate_id(group, "contact group ID")?);
            }
            if let Some(blocked) = list.blocked {
                query = query.with_blocked(blocked);
            }

            if list.list.all {
                let fetch = FetchAll::new()?;
                let items = fetch.collect(contacts.all(query)).await?;
                print_contacts(&items, &ctx.format)?;
            } else {
                let resp = contacts.list(&query).await?;
                eprintln!("{}", page_summary(query.common.page, &resp));
                print_contacts(&resp.result, &ctx.format)?;
            }
        }
        ContactsCommand::Get { id } => {
            let contact = contacts.get(validate_id(*id, "contact ID")?).await?;
            print_one(&contact, &ctx.format, print_contacts)?;
        }
        ContactsCommand::Create {
            name,
            email,
            phone,
            mobile,
        } => {
            let body = ContactCreate {
                contact_name: sanitize_text(name, MAX_NAME_LENGTH)?,
                email_id: validate_email(email)?,
                contact_phone_no: optional_text(phone)?,
                contact_mobile_no: optional_text(mobile)?,
            };
            let resp = contacts.create(&body).await?;
            print_created("contact", &resp, &ctx.format);
        }
        ContactsCommand::Update {
            id,
            name,
            email,
            phone,
            mobile,
        } => {
            let id = validate_id(*id, "contact ID")?;
            let body = ContactUpdate {
                contact_name: optional_text(name)?,
                email_id: email.as_deref().map(validate_email).transpose()?,
                contact_phone_no: optional_text(phone)?,
                contact_mobile_no: optional_text(mobile)?,
            };
            if body.contact_name.is_none()
                && body.email_id.is_none()
                && body.contact_phone_no.is_none()
                && body.contact_mobile_no.is_none()
            {
                bail!("nothing to update: pass at least one of --name, --email, --phone, --mobile");
            }
            let resp = contacts.update(id, &body).await?;
            print_done(&format!("Updated contact {}", id), &resp, &ctx.format);
        }
        ContactsCommand::Delete { id } => {
            let id = validate_id(*id, "contact ID")?;
            let resp = contacts.delete(id).await?;
            print_done(&format!("Deleted contact {}", id), &resp, &ctx.format);
        }
        ContactsCommand::Block { id } => {
            let id = validate_id(*id, "contact ID")?;
            let resp = contacts.block(id).await?;
            print_done(&format!("Blocked contact {}", id), &resp, &ctx.format);
        }
        ContactsCommand::Unblock { id } => {
            let id = validate_id(*id, "contact ID")?;
            let resp = contacts.unblock(id).await?;
            print_done(&format!("Unblocked contact {}", id), &resp, &ctx.format);
        }
    }
    Ok(())
}

fn optional_text(value: &Option<String>) -> Result<Option<String>> {
    Ok(value
        .as_deref()
        .map(|v| sanitize_text(v, MAX_NAME_LENGTH))
        .transpose()?)
}
