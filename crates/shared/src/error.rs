use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("invalid index url: {0}")] InvalidUrl(String),
    #[error("index request failed: {0}")] Http(#[from] reqwest::Error),
    #[error("index returned status {status}: {body}")] Status { status: u16, body: String },
    #[error("graphql error: {0}")] Graphql(String),
    #[error("index response had no data")] EmptyResponse,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage token is not configured")] MissingToken,
    #[error("invalid storage url: {0}")] InvalidUrl(String),
    #[error("upload request failed: {0}")] Http(#[from] reqwest::Error),
    #[error("upload rejected with status {status}: {body}")] Status { status: u16, body: String },
    #[error("upload response did not contain a cid")] MissingCid,
}

#[derive(Error, Debug)]
pub enum BindingError {
    #[error("no wallet connected")] NoWallet,
    #[error("invalid wallet key: {0}")] InvalidKey(String),
    #[error("invalid rpc url: {0}")] InvalidRpcUrl(String),
    #[error("invalid contract address: {0}")] InvalidAddress(String),
}

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")] Transaction(String),
    #[error("{0}")] Receipt(String),
    #[error("transaction {0} reverted")] Reverted(String),
    #[error("receipt has no NewEventCreated log")] MissingEventLog,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DraftError {
    #[error("{0} is required")] Missing(&'static str),
    #[error("max capacity must be a positive integer, got {0:?}")] InvalidCapacity(String),
    #[error("invalid deposit {0:?}: {1}")] InvalidDeposit(String, String),
    #[error("invalid date {0:?}, expected YYYY-MM-DD")] InvalidDate(String),
    #[error("invalid time {0:?}, expected HH:MM")] InvalidTime(String),
    #[error("{0} does not exist in the local time zone")] NonexistentLocalTime(String),
    #[error("{0} is before 1970-01-01")] BeforeEpoch(String),
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("invalid event: {0}")] InvalidDraft(#[from] DraftError),
    #[error("could not serialize event metadata: {0}")] Metadata(#[from] serde_json::Error),
    #[error(transparent)] Upload(#[from] StorageError),
    #[error(transparent)] Binding(#[from] BindingError),
    #[error(transparent)] Contract(#[from] ContractError),
}

impl SubmitError {
    pub fn code(&self) -> &'static str {
        match self {
            SubmitError::InvalidDraft(_) | SubmitError::Metadata(_) => "INVALID_DRAFT",
            SubmitError::Upload(_) => "UPLOAD_FAILED",
            SubmitError::Binding(BindingError::NoWallet) => "NO_WALLET",
            SubmitError::Binding(_) => "WALLET_ERROR",
            SubmitError::Contract(_) => "CONTRACT_FAILED",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody { error_code: self.code(), message: self.to_string() }
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorBody { pub error_code: &'static str, pub message: String }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_separate_missing_wallet_from_contract_failure() {
        assert_eq!(SubmitError::from(BindingError::NoWallet).code(), "NO_WALLET");
        let err = SubmitError::from(ContractError::Transaction("user rejected".into()));
        assert_eq!(err.code(), "CONTRACT_FAILED");
        assert_eq!(err.to_string(), "user rejected");
    }

    #[test]
    fn body_carries_message() {
        let body = SubmitError::from(DraftError::Missing("image")).body();
        assert_eq!(body.error_code, "INVALID_DRAFT");
        assert_eq!(body.message, "invalid event: image is required");
    }
}
