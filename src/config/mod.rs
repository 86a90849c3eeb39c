//! Configuration module for the expense ledger
//!
//! This module provides configuration management including:
//! - Base directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::{LedgerPaths, LEDGER_DIR_ENV};
pub use settings::{ServerSettings, Settings};
