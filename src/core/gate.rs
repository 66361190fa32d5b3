//! Admin access gate.
//!
//! This is a UI lock, not authentication: there is no token, no expiry and
//! no server-side check. Anything deployed beyond a trusted machine needs a
//! real credential and session mechanism behind `Authenticator`.

use crate::core::{Authenticator, StateStore};
use crate::utils::error::Result;

pub const ADMIN_FLAG_KEY: &str = "adminAuth";
const UNLOCKED: &str = "true";

/// Compares the entered value against one configured secret.
#[derive(Debug, Clone)]
pub struct StaticSecretAuthenticator {
    secret: String,
}

impl StaticSecretAuthenticator {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl Authenticator for StaticSecretAuthenticator {
    fn verify(&self, candidate: &str) -> bool {
        !self.secret.is_empty() && candidate == self.secret
    }
}

pub struct AccessGate<A: Authenticator, K: StateStore> {
    authenticator: A,
    state: K,
}

impl<A: Authenticator, K: StateStore> AccessGate<A, K> {
    pub fn new(authenticator: A, state: K) -> Self {
        Self {
            authenticator,
            state,
        }
    }

    /// Unreadable state counts as locked.
    pub async fn is_unlocked(&self) -> bool {
        match self.state.get(ADMIN_FLAG_KEY).await {
            Ok(value) => value.as_deref() == Some(UNLOCKED),
            Err(e) => {
                tracing::warn!("Could not read admin flag, treating as locked: {}", e);
                false
            }
        }
    }

    /// Sets the flag when `candidate` is accepted. Returns whether it was.
    pub async fn unlock(&self, candidate: &str) -> Result<bool> {
        if !self.authenticator.verify(candidate) {
            tracing::info!("Admin unlock rejected");
            return Ok(false);
        }

        self.state.set(ADMIN_FLAG_KEY, UNLOCKED).await?;
        tracing::info!("Admin dashboard unlocked");
        Ok(true)
    }

    pub async fn lock(&self) -> Result<()> {
        self.state.remove(ADMIN_FLAG_KEY).await?;
        tracing::info!("Admin dashboard locked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStateStore;

    fn gate() -> AccessGate<StaticSecretAuthenticator, MemoryStateStore> {
        AccessGate::new(
            StaticSecretAuthenticator::new("admin123"),
            MemoryStateStore::new(),
        )
    }

    #[tokio::test]
    async fn test_wrong_secrets_leave_gate_locked() {
        let gate = gate();
        for attempt in ["", "admin", "ADMIN123", "admin123 ", " admin123"] {
            assert!(!gate.unlock(attempt).await.unwrap(), "{:?}", attempt);
            assert!(!gate.is_unlocked().await);
        }
    }

    #[tokio::test]
    async fn test_exact_secret_unlocks_and_logout_relocks() {
        let gate = gate();
        assert!(!gate.is_unlocked().await);

        assert!(gate.unlock("admin123").await.unwrap());
        assert!(gate.is_unlocked().await);

        gate.lock().await.unwrap();
        assert!(!gate.is_unlocked().await);
    }

    #[tokio::test]
    async fn test_foreign_flag_value_is_locked() {
        let state = MemoryStateStore::new();
        state.set(ADMIN_FLAG_KEY, "yes").await.unwrap();
        let gate = AccessGate::new(StaticSecretAuthenticator::new("admin123"), state);

        assert!(!gate.is_unlocked().await);
    }

    #[test]
    fn test_empty_secret_accepts_nothing() {
        assert!(!StaticSecretAuthenticator::new("").verify(""));
    }

    #[test]
    fn test_gate_usable_from_blocking_code() {
        let gate = gate();
        let unlocked = tokio_test::block_on(async {
            gate.unlock("admin123").await.unwrap();
            gate.is_unlocked().await
        });
        assert!(unlocked);
    }
}
