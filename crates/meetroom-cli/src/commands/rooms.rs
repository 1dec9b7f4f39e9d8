//! Rooms command implementation.

use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;

use super::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct RoomsArgs {
    /// Print one JSON object per room
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: RoomsArgs) -> Result<()> {
    let rooms = ctx
        .client
        .list_rooms()
        .await
        .context("Failed to list rooms")?;

    if args.json {
        for room in &rooms {
            output::json(room)?;
        }
        return Ok(());
    }

    if rooms.is_empty() {
        println!("{}", "No rooms".dimmed());
        return Ok(());
    }

    for room in &rooms {
        let number = room.room_no.as_deref().unwrap_or("-");
        let availability = if room.is_available {
            "open".green()
        } else {
            "closed".red()
        };
        println!(
            "#{:<4} {} ({})  capacity {}  {}",
            room.id,
            room.name.bold(),
            number,
            room.capacity,
            availability
        );
        if let Some(usage) = &room.usage {
            println!("      {}", usage.dimmed());
        }
    }

    Ok(())
}
