//! My-reservations command implementation.

use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;

use super::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct MyArgs {
    /// Print one JSON object per reservation
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: MyArgs) -> Result<()> {
    let reservations = ctx
        .client
        .my_reservations()
        .await
        .context("Failed to list reservations")?;

    if args.json {
        for reservation in &reservations {
            output::json(reservation)?;
        }
        return Ok(());
    }

    if reservations.is_empty() {
        println!("{}", "No reservations".dimmed());
        return Ok(());
    }

    for r in &reservations {
        println!(
            "#{:<5} {} {}  {}  {}",
            r.id,
            r.date,
            r.time,
            r.room.bold(),
            output::status(r.status)
        );
        if let Some(reason) = r.reject_reason.as_deref().filter(|s| !s.is_empty()) {
            println!("       {}", format!("rejected: {}", reason).dimmed());
        }
    }

    Ok(())
}
