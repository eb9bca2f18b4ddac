use anyhow::Result;
use bolddesk_lib::validation::validate_id;
use bolddesk_lib::ListQuery;
use clap::{Args, Subcommand};

use super::{page_summary, Context, FetchAll, ListOptions};
use crate::output::{print_brands, print_one};

#[derive(Args)]
pub struct BrandsArgs {
    #[command(subcommand)]
    pub command: BrandsCommand,
}

#[derive(Subcommand)]
pub enum BrandsCommand {
    /// List brands
    List(ListOptions),
    /// Show a single brand
    Get { id: i64 },
}

pub async fn run(args: &BrandsArgs, ctx: &Context) -> Result<()> {
    let brands = ctx.client.brands();
    match &args.command {
        BrandsCommand::List(list) => {
            let query = list.apply(ctx, ListQuery::default())?;
            if list.all {
                let fetch = FetchAll::new()?;
                let items = fetch.collect(brands.all(query)).await?;
                print_brands(&items, &ctx.format)?;
            } else {
                let resp = brands.list(&query).await?;
                eprintln!("{}", page_summary(query.common.page, &resp));
                print_brands(&resp.result, &ctx.format)?;
            }
        }
        BrandsCommand::Get { id } => {
            let brand = brands.get(validate_id(*id, "brand ID")?).await?;
            print_one(&brand, &ctx.format, print_brands)?;
        }
    }
    Ok(())
}
