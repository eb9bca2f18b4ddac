use anyhow::Result;
use bolddesk_lib::types::FieldOptionCreate;
use bolddesk_lib::validation::{sanitize_text, validate_id, MAX_NAME_LENGTH};
use bolddesk_lib::ListQuery;
use clap::{Args, Subcommand};

use super::{page_summary, Context};
use crate::output::{print_created, print_done, print_field_options, print_fields, print_one};

#[derive(Args)]
pub struct FieldsArgs {
    #[command(subcommand)]
    pub command: FieldsCommand,
}

#[derive(Subcommand)]
pub enum FieldsCommand {
    /// List field definitions
    List {
        /// Contact fields instead of ticket fields
        #[arg(long)]
        contact: bool,
    },
    /// Show a single ticket field
    Get { id: i64 },
    /// List the options of a dropdown field
    Options { id: i64 },
    /// Add an option to a dropdown field
    AddOption {
        id: i64,
        #[arg(long)]
        value: String,
        /// Position in the dropdown
        #[arg(long)]
        order: Option<i32>,
    },
    /// Remove an option from a dropdown field
    DeleteOption { id: i64, option: i64 },
}

pub async fn run(args: &FieldsArgs, ctx: &Context) -> Result<()> {
    let fields = ctx.client.fields();
    match &args.command {
        FieldsCommand::List { contact } => {
            let query = ctx.paged(ListQuery::default())?;
            let resp = if *contact {
                fields.contact_fields(&query).await?
            } else {
                fields.list(&query).await?
            };
            eprintln!("{}", page_summary(query.common.page, &resp));
            print_fields(&resp.result, &ctx.format)?;
        }
        FieldsCommand::Get { id } => {
            let field = fields.get(validate_id(*id, "field ID")?).await?;
            print_one(&field, &ctx.format, print_fields)?;
        }
        FieldsCommand::Options { id } => {
            let resp = fields.options(validate_id(*id, "field ID")?).await?;
            print_field_options(&resp.result, &ctx.format)?;
        }
        FieldsCommand::AddOption { id, value, order } => {
            let option = FieldOptionCreate {
                value: sanitize_text(value, MAX_NAME_LENGTH)?,
                sort_order: *order,
            };
            let resp = fields.add_option(validate_id(*id, "field ID")?, &option).await?;
            print_created("option", &resp, &ctx.format);
        }
        FieldsCommand::DeleteOption { id, option } => {
            let id = validate_id(*id, "field ID")?;
            let option = validate_id(*option, "option ID")?;
            let resp = fields.delete_option(id, option).await?;
            print_done(
                &format!("Deleted option {} from field {}", option, id),
                &resp,
                &ctx.format,
            );
        }
    }
    Ok(())
}
