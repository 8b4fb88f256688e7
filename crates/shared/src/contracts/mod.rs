//! Binding to the on-chain RSVP contract.

pub mod bindings;
pub mod provider;
pub mod registry;

use alloy::network::ReceiptResponse;
use alloy::primitives::{Address, TxHash, B256, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider};
use alloy::rpc::types::Log;
use async_trait::async_trait;

use crate::error::{BindingError, ContractError};
use crate::AppConfig;
use bindings::Web3RSVP;
use provider::{build_signing_provider, parse_signer};
use registry::ContractLocation;

pub const CREATE_EVENT_GAS_LIMIT: u64 = 900_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEventCall {
    /// Epoch milliseconds.
    pub event_timestamp: i64,
    pub deposit: U256,
    pub max_capacity: u64,
    pub event_cost: String,
    pub event_data_cid: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedEvent {
    pub tx_hash: TxHash,
    pub event_id: B256,
}

/// Write side of the RSVP contract.
#[async_trait]
pub trait EventRegistry: Send + Sync {
    /// Broadcasts `createNewEvent` and returns as soon as the node accepted it.
    async fn send_create_event(&self, call: &NewEventCall) -> Result<TxHash, ContractError>;

    /// Waits until `tx_hash` is mined and reads the new event id from its receipt.
    async fn wait_for_event(&self, tx_hash: TxHash) -> Result<CreatedEvent, ContractError>;
}

/// Produces a contract proxy for the current wallet session. Never cached.
pub trait ContractConnector: Send + Sync {
    fn connect(&self) -> Result<Box<dyn EventRegistry>, BindingError>;
}

/// First `NewEventCreated` in the receipt logs; its `eventID` is the new event.
pub fn event_id_from_logs(logs: &[Log]) -> Result<B256, ContractError> {
    logs.iter()
        .find_map(|log| log.log_decode::<Web3RSVP::NewEventCreated>().ok())
        .map(|decoded| decoded.inner.data.eventID)
        .ok_or(ContractError::MissingEventLog)
}

pub struct RsvpContract {
    instance: Web3RSVP::Web3RSVPInstance<DynProvider>,
}

impl RsvpContract {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self { instance: Web3RSVP::new(address, provider) }
    }
}

#[async_trait]
impl EventRegistry for RsvpContract {
    async fn send_create_event(&self, call: &NewEventCall) -> Result<TxHash, ContractError> {
        let timestamp = u64::try_from(call.event_timestamp)
            .map_err(|_| ContractError::Transaction(format!("event timestamp {} is before 1970", call.event_timestamp)))?;
        let pending = self
            .instance
            .createNewEvent(
                U256::from(timestamp),
                call.deposit,
                U256::from(call.max_capacity),
                call.event_cost.clone(),
                call.event_data_cid.clone(),
            )
            .gas(CREATE_EVENT_GAS_LIMIT)
            .send()
            .await
            .map_err(|e| ContractError::Transaction(e.to_string()))?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(%tx_hash, "Minting...");
        Ok(tx_hash)
    }

    async fn wait_for_event(&self, tx_hash: TxHash) -> Result<CreatedEvent, ContractError> {
        let root = self.instance.provider().root().clone();
        let receipt = PendingTransactionBuilder::new(root, tx_hash)
            .get_receipt()
            .await
            .map_err(|e| ContractError::Receipt(e.to_string()))?;
        if !receipt.status() {
            return Err(ContractError::Reverted(tx_hash.to_string()));
        }
        let event_id = event_id_from_logs(receipt.inner.logs())?;
        tracing::info!(%tx_hash, %event_id, "Minted");
        Ok(CreatedEvent { tx_hash, event_id })
    }
}

/// Signs with the configured private key, if there is one.
pub struct WalletConnector {
    location: ContractLocation,
    private_key: Option<String>,
}

impl WalletConnector {
    pub fn from_config(cfg: &AppConfig) -> Result<Self, BindingError> {
        Ok(Self {
            location: ContractLocation::from_config(cfg)?,
            private_key: cfg.private_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn has_wallet(&self) -> bool {
        self.private_key.is_some()
    }
}

impl std::fmt::Debug for WalletConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConnector")
            .field("location", &self.location)
            .field("has_wallet", &self.has_wallet())
            .finish()
    }
}

impl ContractConnector for WalletConnector {
    fn connect(&self) -> Result<Box<dyn EventRegistry>, BindingError> {
        let Some(key) = &self.private_key else {
            tracing::warn!("no wallet configured; set EVENTSKY_PRIVATE_KEY to sign transactions");
            return Err(BindingError::NoWallet);
        };
        let signer = parse_signer(key)?;
        tracing::debug!(account = %signer.address(), contract = %self.location.rsvp, "binding rsvp contract");
        let provider = build_signing_provider(&self.location.rpc_url, signer);
        Ok(Box::new(RsvpContract::new(self.location.rsvp, provider)))
    }
}
