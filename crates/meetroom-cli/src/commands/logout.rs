//! Logout command implementation.

use anyhow::{Context as _, Result};

use super::Context;
use crate::output;

pub fn run(ctx: &Context) -> Result<()> {
    ctx.client.logout().context("Failed to clear credentials")?;
    output::success("Logged out");
    Ok(())
}
