//! Subcommand implementations.

pub mod cancel;
pub mod check;
pub mod confirm;
pub mod login;
mod logout;
pub mod my;
pub mod reserve;
pub mod rooms;
mod status;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result, anyhow};

use meetroom_core::{ApiUrl, ErrorKind};
use meetroom_file::FileCredentialStore;
use meetroom_http::{ClientConfig, ReservationClient};

use crate::cli::{ApiArgs, Cli, Commands};
use crate::events::CliEvents;
use crate::session::storage;

/// Everything a command needs to talk to the API.
pub struct Context {
    pub client: ReservationClient,
    pub store: Arc<FileCredentialStore>,
}

impl Context {
    fn open(api: &ApiArgs) -> Result<Self> {
        let api_url = ApiUrl::new(&api.api_url).context("Invalid API URL")?;
        let config = ClientConfig::new(api_url)
            .with_timeout(Duration::from_secs(api.timeout_secs))
            .with_refresh_path(api.refresh_path.as_str());

        let store = storage::open_store()?;
        // Not routed through CliEvents, so keep it out of `already_reported`
        let client = ReservationClient::new(config, store.clone(), Arc::new(CliEvents))
            .map_err(|e| anyhow!("Failed to create API client: {}", e))?;

        Ok(Self { client, store })
    }
}

pub async fn handle(cli: Cli) -> Result<()> {
    let ctx = Context::open(&cli.api)?;

    match cli.command {
        Commands::Login(args) => login::run(&ctx, args).await,
        Commands::Logout => logout::run(&ctx),
        Commands::Status => status::run(&ctx),
        Commands::Rooms(args) => rooms::run(&ctx, args).await,
        Commands::Check(args) => check::run(&ctx, args).await,
        Commands::Reserve(args) => reserve::run(&ctx, args).await,
        Commands::My(args) => my::run(&ctx, args).await,
        Commands::Cancel(args) => cancel::run(&ctx, args).await,
        Commands::Confirm(args) => confirm::run(&ctx, args).await,
    }
}

/// Whether `err` was already shown to the user by [`CliEvents`].
///
/// Application and transport failures surface as `request failed` or
/// `network unreachable`; session-ending failures as the expiry notice.
pub fn already_reported(err: &anyhow::Error) -> bool {
    err.downcast_ref::<meetroom_core::Error>()
        .is_some_and(|e| match e.kind() {
            ErrorKind::Application | ErrorKind::Transport => true,
            ErrorKind::RefreshFailure | ErrorKind::SessionExpired => true,
            ErrorKind::AuthExpired | ErrorKind::Store | ErrorKind::InvalidInput => false,
        })
}
