//! Status command implementation.

use anyhow::{Context as _, Result};

use meetroom_core::CredentialStore;

use super::Context;
use crate::output;

pub fn run(ctx: &Context) -> Result<()> {
    let logged_in = ctx.store.has_session();

    output::field("Session", if logged_in { "logged in" } else { "not logged in" });
    output::field("API", ctx.client.config().api_url.as_str());
    output::field("Credentials", &ctx.store.path().display().to_string());

    if logged_in {
        if let Some(saved_at) = ctx.store.saved_at().context("Failed to read credential file")? {
            output::field("Saved", &saved_at.to_rfc3339());
        }
        let refreshable = ctx.store.refresh_token().is_some();
        output::field("Refreshable", if refreshable { "yes" } else { "no" });
    }

    Ok(())
}
