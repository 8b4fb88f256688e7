//! Event creation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use shared::contracts::WalletConnector;
use shared::domain::event::{EventDraft, ImageFile};
use shared::storage::Web3StorageClient;
use shared::submission::{DeferredRedirect, DraftRetention, Submitter};
use shared::AppConfig;

use super::list::{self, ListArgs};
use crate::output::{print_banner, OutputFormat};

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Event name
    #[arg(long)]
    pub name: String,
    /// What the event is about
    #[arg(long, default_value = "")]
    pub description: String,
    /// Where attendees join
    #[arg(long)]
    pub link: String,
    /// Event date, YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    /// Start time in this machine's time zone, HH:MM
    #[arg(long)]
    pub time: String,
    /// Cost in US dollars
    #[arg(long)]
    pub cost: String,
    /// Number of spots available
    #[arg(long)]
    pub capacity: String,
    /// Refundable deposit to reserve one spot, in MATIC
    #[arg(long)]
    pub deposit: String,
    /// Event image
    #[arg(long)]
    pub image: PathBuf,
    /// Exit after creating instead of showing the listing
    #[arg(long)]
    pub no_redirect: bool,
}

async fn read_image(path: &Path) -> anyhow::Result<ImageFile> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("{} has no usable file name", path.display()))?
        .to_owned();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(ImageFile { file_name, bytes })
}

pub async fn handle(args: CreateArgs, cfg: &AppConfig, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let image = read_image(&args.image).await?;
    let mut draft = EventDraft {
        name: args.name,
        description: args.description,
        link: args.link,
        date: args.date,
        time: args.time,
        cost: args.cost,
        max_capacity: args.capacity,
        refund: args.deposit,
        image: Some(image),
    };

    let store = Web3StorageClient::connect(cfg).context("storage client")?;
    let connector = WalletConnector::from_config(cfg).context("contract binding")?;
    let submitter = Submitter::new(store, connector, DeferredRedirect::default())
        .with_redirect_delay(cfg.redirect_delay())
        .with_retention(DraftRetention::from_config(cfg));

    let mut banners = submitter.subscribe();
    let printer = tokio::spawn(async move {
        while banners.changed().await.is_ok() {
            let banner = banners.borrow_and_update().clone();
            print_banner(&banner);
        }
    });

    let result = submitter.submit(&mut draft).await;
    let redirect = submitter.navigator().take();
    drop(submitter);
    let _ = printer.await;

    match result {
        Ok(receipt) => {
            let summary = serde_json::json!({
                "event_id": receipt.event_id.to_string(),
                "tx_hash": receipt.tx_hash.to_string(),
                "cid": receipt.cid.clone(),
            });
            match format {
                OutputFormat::Json => format.print_json(&summary),
                OutputFormat::Table => {
                    println!("event id: {}", receipt.event_id);
                    println!("tx hash:  {}", receipt.tx_hash);
                    println!("cid:      {}", receipt.cid);
                }
            }
            if let Some(redirect) = redirect.filter(|_| !args.no_redirect) {
                tracing::info!(route = redirect.route, delay = ?redirect.delay, "returning to listing");
                tokio::time::sleep(redirect.delay).await;
                list::handle(ListArgs::default(), cfg, format).await?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if let OutputFormat::Json = format {
                format.print_json(&e.body());
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
