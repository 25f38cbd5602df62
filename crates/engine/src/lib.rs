pub mod config;
pub mod walker;

pub use config::{EntryPolicy, WalkerConfig, WalkerFileConfig};
pub use walker::Walker;
