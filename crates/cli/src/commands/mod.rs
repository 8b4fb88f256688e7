//! CLI Commands

pub mod create;
pub mod list;
