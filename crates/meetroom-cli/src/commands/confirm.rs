//! Confirm command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use super::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct ConfirmArgs {
    /// Reservation id, as shown by `meetroom my`
    pub id: i64,
}

pub async fn run(ctx: &Context, args: ConfirmArgs) -> Result<()> {
    ctx.client
        .confirm_use(args.id)
        .await
        .with_context(|| format!("Failed to confirm reservation {}", args.id))?;

    output::success(&format!("Reservation {} marked as in use", args.id));
    Ok(())
}
