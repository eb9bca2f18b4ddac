use anyhow::Result;
use bolddesk_lib::{ListQuery, Query};
use tracing::debug;

use super::Context;
use crate::output::print_rate_limit;

/// Shows the quota reported by the most recent response. A fresh process has
/// seen none yet, so it makes the cheapest call available first.
pub async fn run(ctx: &Context) -> Result<()> {
    if ctx.client.rate_limit().is_none() {
        debug!("no rate-limit headers seen yet, probing /brands");
        ctx.client
            .brands()
            .list(&ListQuery::default().with_per_page(1))
            .await?;
    }
    print_rate_limit(ctx.client.rate_limit().as_ref(), &ctx.format)
}
