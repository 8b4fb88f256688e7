use alloy::primitives::Address;
use url::Url;

use crate::error::BindingError;
use crate::AppConfig;

/// Where the RSVP contract lives and how to reach the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractLocation {
    pub rsvp: Address,
    pub rpc_url: Url,
}

impl ContractLocation {
    pub fn from_config(cfg: &AppConfig) -> Result<Self, BindingError> {
        let rsvp = cfg
            .contract_address
            .trim()
            .parse::<Address>()
            .map_err(|_| BindingError::InvalidAddress(cfg.contract_address.clone()))?;
        let rpc_url = cfg
            .rpc_http_url
            .parse::<Url>()
            .map_err(|e: url::ParseError| BindingError::InvalidRpcUrl(format!("{}: {e}", cfg.rpc_http_url)))?;
        Ok(Self { rsvp, rpc_url })
    }
}
