//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::commands::{cancel, check, confirm, login, my, reserve, rooms};

/// Meeting room reservation client.
#[derive(Parser, Debug)]
#[command(name = "meetroom")]
#[command(author, version = env!("MEETROOM_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where and how to reach the reservation API.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Base URL of the reservation API
    #[arg(
        long,
        env = "MEETROOM_API_URL",
        default_value = "http://localhost:8000",
        global = true
    )]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "MEETROOM_TIMEOUT_SECS", default_value_t = 5, global = true)]
    pub timeout_secs: u64,

    /// Path of the token refresh endpoint
    #[arg(
        long,
        env = "MEETROOM_REFRESH_PATH",
        default_value = meetroom_core::DEFAULT_REFRESH_PATH,
        global = true
    )]
    pub refresh_path: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the issued credentials
    Login(login::LoginArgs),

    /// Forget the stored credentials
    Logout,

    /// Show whether a session is stored
    Status,

    /// List meeting rooms
    Rooms(rooms::RoomsArgs),

    /// Find rooms free for a time slot
    Check(check::CheckArgs),

    /// Reserve a room
    Reserve(reserve::ReserveArgs),

    /// List your reservations
    My(my::MyArgs),

    /// Cancel a pending or approved reservation
    Cancel(cancel::CancelArgs),

    /// Confirm you are using an approved reservation
    Confirm(confirm::ConfirmArgs),
}
