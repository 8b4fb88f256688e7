//! Event creation: validate, upload the bundle, call the contract, report.

use std::sync::Mutex;
use std::time::Duration;

use alloy::primitives::{TxHash, B256};
use tokio::sync::watch;

use crate::contracts::{ContractConnector, CreatedEvent, NewEventCall};
use crate::domain::event::draft::ValidatedDraft;
use crate::domain::event::{EventDraft, EventMetadata};
use crate::error::SubmitError;
use crate::storage::{ContentStore, NamedBlob};
use crate::AppConfig;

pub const LISTING_ROUTE: &str = "/";
pub const SUCCESS_MESSAGE: &str = "Your event has been created successfully. \
     Please note that it may take a few minutes to appear on the home page.";

/// What the user sees about the current attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Banner {
    #[default]
    Idle,
    Pending,
    Success(String),
    Failure(String),
}

/// What happens to the typed-in text once an attempt is over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DraftRetention {
    /// Name, description, link and cost are cleared whatever the outcome.
    #[default]
    ClearAlways,
    KeepOnFailure,
}

impl DraftRetention {
    pub fn from_config(cfg: &AppConfig) -> Self {
        if cfg.clear_draft_on_failure { DraftRetention::ClearAlways } else { DraftRetention::KeepOnFailure }
    }
}

pub trait Navigator: Send + Sync {
    fn schedule_redirect(&self, route: &'static str, delay: Duration);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub route: &'static str,
    pub delay: Duration,
}

/// Holds the last requested redirect until the front end acts on it.
#[derive(Debug, Default)]
pub struct DeferredRedirect(Mutex<Option<Redirect>>);

impl DeferredRedirect {
    pub fn take(&self) -> Option<Redirect> {
        self.0.lock().ok().and_then(|mut g| g.take())
    }
}

impl Navigator for DeferredRedirect {
    fn schedule_redirect(&self, route: &'static str, delay: Duration) {
        if let Ok(mut g) = self.0.lock() {
            *g = Some(Redirect { route, delay });
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub cid: String,
    pub tx_hash: TxHash,
    pub event_id: B256,
}

pub struct Submitter<S, C, N> {
    store: S,
    connector: C,
    navigator: N,
    banner: watch::Sender<Banner>,
    redirect_delay: Duration,
    retention: DraftRetention,
}

impl<S, C, N> Submitter<S, C, N>
where
    S: ContentStore,
    C: ContractConnector,
    N: Navigator,
{
    pub fn new(store: S, connector: C, navigator: N) -> Self {
        Self {
            store,
            connector,
            navigator,
            banner: watch::Sender::new(Banner::Idle),
            redirect_delay: Duration::from_secs(5),
            retention: DraftRetention::default(),
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    pub fn with_retention(mut self, retention: DraftRetention) -> Self {
        self.retention = retention;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<Banner> {
        self.banner.subscribe()
    }

    pub fn banner(&self) -> Banner {
        self.banner.borrow().clone()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// One attempt. Every failure is terminal; nothing is retried.
    pub async fn submit(&self, draft: &mut EventDraft) -> Result<SubmissionReceipt, SubmitError> {
        tracing::info!("Form submitted");
        let validated = match draft.validate() {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "draft rejected");
                self.publish(Banner::Failure(format!("There was an error creating your event: {e}")));
                return Err(e.into());
            }
        };

        let outcome = self.run(validated).await;
        if outcome.is_ok() || self.retention == DraftRetention::ClearAlways {
            draft.clear_text_fields();
        }
        outcome
    }

    async fn run(&self, draft: ValidatedDraft) -> Result<SubmissionReceipt, SubmitError> {
        let cid = match self.upload(&draft).await {
            Ok(cid) => cid,
            Err(e) => {
                tracing::error!(error = %e, "upload failed");
                self.publish(Banner::Failure(format!(
                    "Oops! Something went wrong. Please refresh and try again. Error {e}"
                )));
                return Err(e);
            }
        };

        match self.create_event(&draft, &cid).await {
            Ok(created) => {
                self.publish(Banner::Success(SUCCESS_MESSAGE.into()));
                self.navigator.schedule_redirect(LISTING_ROUTE, self.redirect_delay);
                Ok(SubmissionReceipt { cid, tx_hash: created.tx_hash, event_id: created.event_id })
            }
            Err(e) => {
                tracing::error!(error = %e, %cid, "event creation failed");
                self.publish(Banner::Failure(format!("There was an error creating your event: {e}")));
                Err(e)
            }
        }
    }

    async fn upload(&self, draft: &ValidatedDraft) -> Result<String, SubmitError> {
        let files = vec![
            NamedBlob::new(EventMetadata::FILE_NAME, draft.metadata.to_json()?),
            NamedBlob::new(draft.image.file_name.clone(), draft.image.bytes.clone()),
        ];
        Ok(self.store.put(files).await?)
    }

    async fn create_event(&self, draft: &ValidatedDraft, cid: &str) -> Result<CreatedEvent, SubmitError> {
        let registry = self.connector.connect()?;
        let call = NewEventCall {
            event_timestamp: draft.event_timestamp,
            deposit: draft.deposit,
            max_capacity: draft.max_capacity,
            event_cost: draft.cost.clone(),
            event_data_cid: cid.to_owned(),
        };
        let tx_hash = registry.send_create_event(&call).await?;
        self.publish(Banner::Pending);
        Ok(registry.wait_for_event(tx_hash).await?)
    }

    fn publish(&self, banner: Banner) {
        self.banner.send_replace(banner);
    }
}
