//! CLI commands for gamerec

pub mod build;
pub mod dispatch;
pub mod export;
pub mod format;
pub mod import;
pub mod init;
pub mod recommend;
pub mod stages;
pub mod steps;
