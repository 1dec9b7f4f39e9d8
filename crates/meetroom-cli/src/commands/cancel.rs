//! Cancel command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use super::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct CancelArgs {
    /// Reservation id, as shown by `meetroom my`
    pub id: i64,
}

pub async fn run(ctx: &Context, args: CancelArgs) -> Result<()> {
    ctx.client
        .cancel_reservation(args.id)
        .await
        .with_context(|| format!("Failed to cancel reservation {}", args.id))?;

    output::success(&format!("Reservation {} canceled", args.id));
    Ok(())
}
