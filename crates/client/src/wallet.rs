use shared_types::{AppError, WalletAddress};

/// External wallet provider (browser extension, hardware bridge, ...).
///
/// The provider yields raw account strings in whatever casing it likes;
/// everything downstream of [`resolve_identity`] only ever sees the
/// normalized [`WalletAddress`].
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    async fn request_accounts(&self) -> Result<Vec<String>, AppError>;
}

/// Ask the provider for its accounts and normalize the first one into the
/// canonical identity used for all authorization checks.
pub async fn resolve_identity<P: IdentityProvider>(provider: &P) -> Result<WalletAddress, AppError> {
    let accounts = provider.request_accounts().await?;
    let first = accounts
        .first()
        .ok_or_else(|| AppError::unauthorized("Wallet provider returned no accounts"))?;
    WalletAddress::parse(first)
}
