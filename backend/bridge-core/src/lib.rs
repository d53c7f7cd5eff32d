pub mod config;
pub mod dispatch;
pub mod download;
pub mod error;
pub mod file_manager;
pub mod file_service;
pub mod fs_ops;
pub mod native_messaging;
pub mod supervisor;

#[cfg(test)]
mod tests;

pub use config::BridgeConfig;
pub use supervisor::{RunMode, run_host};

pub const BACKEND_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const LOOPBACK_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 9900;
pub const DEFAULT_SERVER_ADDR: &str =
    const_format::concatcp!(LOOPBACK_HOST, ":", DEFAULT_SERVER_PORT);
