use alloy::network::EthereumWallet;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use url::Url;

use crate::error::BindingError;

pub fn parse_signer(key: &str) -> Result<PrivateKeySigner, BindingError> {
    let hex = key.trim();
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    hex.parse::<PrivateKeySigner>().map_err(|e| BindingError::InvalidKey(e.to_string()))
}

/// HTTP provider with the recommended fillers that signs with `signer`.
pub fn build_signing_provider(rpc_url: &Url, signer: PrivateKeySigner) -> DynProvider {
    ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(rpc_url.clone())
        .erased()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn parses_prefixed_and_bare_keys() {
        let a = parse_signer(DEV_KEY).unwrap();
        let b = parse_signer(&DEV_KEY[2..]).unwrap();
        assert_eq!(a.address(), b.address());
        assert_eq!(
            a.address().to_string(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[test]
    fn rejects_malformed_key() {
        assert!(matches!(parse_signer("0x1234"), Err(BindingError::InvalidKey(_))));
        assert!(matches!(parse_signer("not hex"), Err(BindingError::InvalidKey(_))));
    }
}
