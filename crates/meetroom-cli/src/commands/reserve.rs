//! Reserve command implementation.

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::Args;

use meetroom_core::TimeSlot;

use super::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct ReserveArgs {
    /// Room id, as shown by `meetroom rooms`
    #[arg(long)]
    pub room: i64,

    /// Day of the meeting (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// First hour (0-23)
    #[arg(long)]
    pub start: u8,

    /// Hour the meeting ends (1-24)
    #[arg(long)]
    pub end: u8,

    /// Meeting topic
    #[arg(long)]
    pub topic: String,

    /// Number of attendees
    #[arg(long)]
    pub people: u32,
}

pub async fn run(ctx: &Context, args: ReserveArgs) -> Result<()> {
    let slot = TimeSlot::new(args.date, args.start, args.end).context("Invalid time slot")?;

    ctx.client
        .create_reservation(args.room, &slot, &args.topic, args.people)
        .await
        .context("Failed to create reservation")?;

    output::success("Reservation submitted, awaiting approval");
    output::field("Room", &args.room.to_string());
    output::field("When", &slot.to_string());

    Ok(())
}
