use crate::errors::CoreError;
use crate::models::address::Address;
use crate::providers::traits::WalletDataProvider;

/// Turns user input into a canonical [`Address`].
///
/// Hex input is checked locally with no network call. Inputs carrying the
/// alias suffix go through the provider's name resolver, and whatever it
/// returns must itself pass the hex shape check.
pub struct AddressService {
    alias_suffix: String,
}

impl AddressService {
    pub fn new(alias_suffix: impl Into<String>) -> Self {
        Self {
            alias_suffix: alias_suffix.into().to_lowercase(),
        }
    }

    /// Does this input look like a name-service alias (e.g. `alice.hl`)?
    /// An empty suffix disables aliases, and hex-shaped input never is one.
    pub fn is_alias(&self, input: &str) -> bool {
        let trimmed = input.trim();
        if self.alias_suffix.is_empty() || Address::is_hex_address(trimmed) {
            return false;
        }
        let lower = trimmed.to_lowercase();
        lower.len() > self.alias_suffix.len() && lower.ends_with(&self.alias_suffix)
    }

    pub async fn normalize(
        &self,
        input: &str,
        resolver: &dyn WalletDataProvider,
    ) -> Result<Address, CoreError> {
        let trimmed = input.trim();

        if self.is_alias(trimmed) {
            log::debug!("Resolving alias {trimmed} via {}", resolver.name());
            let resolved = resolver
                .resolve_alias(trimmed)
                .await
                .map_err(|e| CoreError::Resolution(format!("{trimmed}: {}", resolver_message(&e))))?;

            return Address::parse_hex(&resolved).map_err(|_| {
                CoreError::Resolution(format!(
                    "{trimmed}: resolver returned a malformed address {resolved:?}"
                ))
            });
        }

        Address::parse_hex(trimmed)
    }
}

impl Default for AddressService {
    fn default() -> Self {
        Self::new(".hl")
    }
}

/// The collaborator's own message, without our error-kind prefix.
fn resolver_message(e: &CoreError) -> String {
    match e {
        CoreError::Api { message, .. } => message.clone(),
        CoreError::Network(message) => message.clone(),
        other => other.to_string(),
    }
}
