pub mod config;
pub mod error;
pub mod domain {
    pub mod event;
    pub mod units;
}
pub mod contracts;
pub mod graph;
pub mod repo;
pub mod search;
pub mod storage;
pub mod submission;

pub use config::AppConfig;
