use std::sync::{Arc, RwLock};

use shared_types::WalletAddress;

/// The credential pair established at login.
#[derive(Clone, Debug, PartialEq)]
pub struct Credentials {
    /// Bearer token attached to every authenticated API call.
    pub token: String,
    /// The connected wallet, already normalized.
    pub wallet: WalletAddress,
}

/// Explicit session handle injected into stores and API adapters.
///
/// Cloning is cheap and every clone observes the same login state, so one
/// `Session` created at startup can feed the case store, the document store
/// and both HTTP adapters. `init` at login, `clear` at logout — there is no
/// ambient global to consult.
#[derive(Clone, Debug, Default)]
pub struct Session {
    inner: Arc<RwLock<Option<Credentials>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&self, token: impl Into<String>, wallet: WalletAddress) {
        let mut guard = self.inner.write().expect("session lock poisoned");
        *guard = Some(Credentials {
            token: token.into(),
            wallet,
        });
    }

    pub fn clear(&self) {
        let mut guard = self.inner.write().expect("session lock poisoned");
        *guard = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().expect("session lock poisoned").is_some()
    }

    /// The bearer credential, if logged in.
    pub fn bearer_token(&self) -> Option<String> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|c| c.token.clone())
    }

    /// The current identity, if logged in.
    pub fn identity(&self) -> Option<WalletAddress> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|c| c.wallet.clone())
    }
}
