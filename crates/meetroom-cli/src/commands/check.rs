//! Check command implementation.

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::Args;
use colored::Colorize;

use meetroom_core::TimeSlot;

use super::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Day of the meeting (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// First hour (0-23)
    #[arg(long)]
    pub start: u8,

    /// Hour the meeting ends (1-24)
    #[arg(long)]
    pub end: u8,

    /// Number of attendees
    #[arg(long)]
    pub people: u32,

    /// Print one JSON object per room
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: CheckArgs) -> Result<()> {
    let slot = TimeSlot::new(args.date, args.start, args.end).context("Invalid time slot")?;

    let rooms = ctx
        .client
        .check_rooms(&slot, args.people)
        .await
        .context("Failed to check availability")?;

    if args.json {
        for room in &rooms {
            output::json(room)?;
        }
        return Ok(());
    }

    if rooms.is_empty() {
        println!("{}", format!("No rooms free for {}", slot).dimmed());
        return Ok(());
    }

    println!("Free for {} ({} people):", slot, args.people);
    for room in &rooms {
        println!(
            "  #{:<4} {}  capacity {}",
            room.id,
            room.name.bold(),
            room.capacity
        );
    }

    Ok(())
}
