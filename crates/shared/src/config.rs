use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUBGRAPH_URL: &str =
    "https://api.thegraph.com/subgraphs/name/hayleyiscoding/events";
pub const DEFAULT_STORAGE_URL: &str = "https://api.web3.storage";
pub const DEFAULT_RPC_HTTP_URL: &str = "https://rpc-mumbai.maticvigil.com";
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x00Dd672d0886825ee2413aAbdf3300F000e09585";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_subgraph_url")]
    pub subgraph_url: String,
    #[serde(default = "default_storage_url")]
    pub storage_url: String,
    /// Token for the content storage service. Only `create` needs it.
    #[serde(default)]
    pub storage_token: Option<String>,
    #[serde(default = "default_rpc_http_url")]
    pub rpc_http_url: String,
    /// Hex private key of the wallet that signs transactions. Absent means no wallet session.
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default = "default_contract_address")]
    pub contract_address: String,
    #[serde(default = "default_redirect_delay_secs")]
    pub redirect_delay_secs: u64,
    #[serde(default = "default_clear_draft_on_failure")]
    pub clear_draft_on_failure: bool,
}

fn default_subgraph_url() -> String { DEFAULT_SUBGRAPH_URL.into() }
fn default_storage_url() -> String { DEFAULT_STORAGE_URL.into() }
fn default_rpc_http_url() -> String { DEFAULT_RPC_HTTP_URL.into() }
fn default_contract_address() -> String { DEFAULT_CONTRACT_ADDRESS.into() }
fn default_redirect_delay_secs() -> u64 { 5 }
fn default_clear_draft_on_failure() -> bool { true }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            subgraph_url: default_subgraph_url(),
            storage_url: default_storage_url(),
            storage_token: None,
            rpc_http_url: default_rpc_http_url(),
            private_key: None,
            contract_address: default_contract_address(),
            redirect_delay_secs: default_redirect_delay_secs(),
            clear_draft_on_failure: default_clear_draft_on_failure(),
        }
    }
}

impl AppConfig {
    /// Defaults, then `EventSky.toml`, then `EVENTSKY_*` environment variables.
    pub fn from_env() -> Result<Self, figment::Error> {
        dotenvy::dotenv().ok();
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("EventSky.toml"))
            .merge(Env::prefixed("EVENTSKY_"))
    }

    pub fn redirect_delay(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.redirect_delay_secs)
    }
}
