//! Path management for the expense ledger
//!
//! ## Path Resolution Order
//!
//! 1. `EXPENSE_LEDGER_DIR` environment variable (if set)
//! 2. The platform config directory from `directories::ProjectDirs`
//!    (`~/.config/expense-ledger` on Linux, `%APPDATA%\expense-ledger` on Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{LedgerError, LedgerResult};

/// Environment variable overriding the base directory
pub const LEDGER_DIR_ENV: &str = "EXPENSE_LEDGER_DIR";

/// Manages all paths used by the ledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve the base directory
    ///
    /// # Errors
    ///
    /// Returns `Config` if no home directory can be determined and the
    /// override is not set.
    pub fn new() -> LedgerResult<Self> {
        let base_dir = match std::env::var_os(LEDGER_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (useful for testing)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding the ledger file
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// The CSV ledger (`data/expenses.csv`)
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir().join("expenses.csv")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> LedgerResult<()> {
        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LedgerError::Io(format!("Failed to create data directory: {}", e)))
    }
}

fn resolve_default_path() -> LedgerResult<PathBuf> {
    ProjectDirs::from("", "", "expense-ledger")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| LedgerError::Config("Could not determine a home directory".into()))
}
