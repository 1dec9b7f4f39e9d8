//! In-memory credential store.

use std::sync::RwLock;

use crate::traits::CredentialStore;
use crate::{AccessToken, RefreshToken, Result};

#[derive(Debug, Default)]
struct Slots {
    access_token: Option<AccessToken>,
    refresh_token: Option<RefreshToken>,
}

/// Credential store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slots: RwLock<Slots>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a credential pair.
    pub fn with_tokens(access: AccessToken, refresh: Option<RefreshToken>) -> Self {
        Self {
            slots: RwLock::new(Slots {
                access_token: Some(access),
                refresh_token: refresh,
            }),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn access_token(&self) -> Option<AccessToken> {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        slots.access_token.clone()
    }

    fn refresh_token(&self) -> Option<RefreshToken> {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        slots.refresh_token.clone()
    }

    fn set_access_token(&self, token: AccessToken) -> Result<()> {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        slots.access_token = Some(token);
        Ok(())
    }

    fn save(&self, access: AccessToken, refresh: Option<RefreshToken>) -> Result<()> {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        slots.access_token = Some(access);
        slots.refresh_token = refresh;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        *slots = Slots::default();
        Ok(())
    }
}
