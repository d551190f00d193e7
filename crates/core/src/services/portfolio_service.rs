use crate::errors::CoreError;
use crate::models::address::Address;
use crate::models::wallet::Wallet;

/// Mutations of the tracked-wallet collection.
///
/// Pure business logic: no I/O, no API calls. The caller loads the current
/// collection, applies one of these, and persists the result.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Fail with `DuplicateWallet` if `address` is already tracked
    /// (case-insensitive).
    pub fn ensure_not_tracked(&self, wallets: &[Wallet], address: &Address) -> Result<(), CoreError> {
        if wallets.iter().any(|w| &w.address == address) {
            return Err(CoreError::DuplicateWallet(address.to_string()));
        }
        Ok(())
    }

    /// Append a fully valued wallet. Rejects duplicates.
    pub fn add_wallet(&self, wallets: &mut Vec<Wallet>, wallet: Wallet) -> Result<(), CoreError> {
        self.ensure_not_tracked(wallets, &wallet.address)?;
        wallets.push(wallet);
        Ok(())
    }

    /// Remove a wallet by address and return it.
    pub fn remove_wallet(
        &self,
        wallets: &mut Vec<Wallet>,
        address: &str,
    ) -> Result<Wallet, CoreError> {
        let idx = wallets
            .iter()
            .position(|w| w.address.matches(address))
            .ok_or_else(|| CoreError::WalletNotFound(address.trim().to_string()))?;
        Ok(wallets.remove(idx))
    }

    /// Replace the entry for `refreshed.address` in place, keeping its
    /// position in the list.
    ///
    /// Returns `None` when the address is no longer tracked (it was removed
    /// while the fetch was in flight); the result is discarded, not an error.
    pub fn merge_refresh(&self, wallets: &mut [Wallet], refreshed: Wallet) -> Option<Wallet> {
        let slot = wallets.iter_mut().find(|w| w.address == refreshed.address)?;
        *slot = refreshed;
        Some(slot.clone())
    }

    /// Look up a tracked wallet (case-insensitive).
    pub fn find<'a>(&self, wallets: &'a [Wallet], address: &str) -> Option<&'a Wallet> {
        wallets.iter().find(|w| w.address.matches(address))
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
