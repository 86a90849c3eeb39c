//! CSV file backend for the expense ledger
//!
//! File layout:
//!
//! ```text
//! next ID:,4
//! id,amount,category,description,date
//! 1,15.50,Groceries,Pizza,2026-01-27
//! 3,22.00,Personal Care,Shampoo,2026-01-28
//! ```
//!
//! The first line carries the ID counter so IDs are never reused after a
//! delete. Every operation rewrites the whole file atomically, which makes a
//! single record operation all-or-nothing on disk.
//!
//! Rows are held as raw bytes between load and save. A row that is not valid
//! UTF-8, or that fails validation, is skipped on load but written back
//! unchanged. Updates and deletes only ever touch rows that would load.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder, StringRecord, WriterBuilder};
use tracing::{debug, warn};

use super::file_io::{read_if_exists, write_atomic};
use super::{ExpenseStore, FieldUpdate};
use crate::error::{LedgerError, LedgerResult};
use crate::models::expense::ROW_HEADER;
use crate::models::{Expense, ExpenseDraft, ExpenseId};

const COUNTER_LABEL: &str = "next ID:";

/// Stores the ledger as a CSV file with a next-ID header
#[derive(Debug, Clone)]
pub struct CsvExpenseStore {
    path: PathBuf,
}

impl CsvExpenseStore {
    /// Create a store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The ID the next insert will receive
    pub fn next_id(&self) -> LedgerResult<ExpenseId> {
        Ok(self.load()?.next_id)
    }

    fn load(&self) -> LedgerResult<LedgerFile> {
        match read_if_exists(&self.path)? {
            Some(contents) => LedgerFile::parse(&contents, &self.path),
            None => Ok(LedgerFile::empty()),
        }
    }

    fn save(&self, file: &LedgerFile) -> LedgerResult<()> {
        write_atomic(&self.path, &file.to_bytes()?)
    }
}

impl ExpenseStore for CsvExpenseStore {
    fn ensure_schema(&mut self) -> LedgerResult<()> {
        if self.path.exists() {
            // Fail early on a corrupted counter rather than on the first write
            self.load()?;
            return Ok(());
        }

        debug!(path = %self.path.display(), "Creating empty ledger file");
        self.save(&LedgerFile::empty())
    }

    fn insert(&mut self, draft: &ExpenseDraft) -> LedgerResult<Expense> {
        let mut file = self.load()?;

        let expense = draft.clone().into_expense(file.next_id);
        file.rows.push(ByteRecord::from(expense.to_row().to_vec()));
        file.next_id = file.next_id.next();

        self.save(&file)?;
        Ok(expense)
    }

    fn select_all(&self) -> LedgerResult<Vec<Expense>> {
        let file = self.load()?;

        let mut seen = HashSet::new();
        let mut expenses = Vec::with_capacity(file.rows.len());
        let mut skipped = 0usize;

        for row in &file.rows {
            let line = row.position().map(|p| p.line()).unwrap_or_default();

            match load_row(row) {
                Ok(expense) if seen.insert(expense.id()) => expenses.push(expense),
                Ok(expense) => {
                    skipped += 1;
                    warn!(line, id = %expense.id(), "Skipping duplicate expense row");
                }
                Err(err) => {
                    skipped += 1;
                    warn!(line, error = %err, "Skipping malformed expense row");
                }
            }
        }

        debug!(
            path = %self.path.display(),
            loaded = expenses.len(),
            skipped,
            "Loaded ledger"
        );
        Ok(expenses)
    }

    fn update_field(&mut self, id: ExpenseId, update: &FieldUpdate) -> LedgerResult<()> {
        let mut file = self.load()?;

        // The first loadable row with this ID is the one select_all returns
        let Some(row) = file.rows.iter_mut().find(|row| loaded_id(row) == Some(id)) else {
            debug!(%id, field = update.field_name(), "No stored row to update");
            return Ok(());
        };

        let value = update.persisted_value();
        let column = update.column();
        *row = row
            .iter()
            .enumerate()
            .map(|(i, field)| if i == column { value.as_bytes() } else { field })
            .collect();

        self.save(&file)
    }

    fn delete(&mut self, id: ExpenseId) -> LedgerResult<()> {
        let mut file = self.load()?;

        let before = file.rows.len();
        file.rows.retain(|row| loaded_id(row) != Some(id));
        if file.rows.len() == before {
            debug!(%id, "No stored row to delete");
            return Ok(());
        }

        self.save(&file)
    }
}

/// Decode and validate a stored row
fn load_row(row: &ByteRecord) -> LedgerResult<Expense> {
    let text = StringRecord::from_byte_record(row.clone())
        .map_err(|e| LedgerError::CorruptedData(format!("Row is not valid UTF-8: {}", e)))?;
    let fields: Vec<&str> = text.iter().collect();
    Expense::from_row(&fields)
}

/// ID of a row that loads as an expense
fn loaded_id(row: &ByteRecord) -> Option<ExpenseId> {
    load_row(row).ok().map(|expense| expense.id())
}

/// ID in the first column, whether or not the rest of the row is valid
fn row_id(row: &ByteRecord) -> Option<ExpenseId> {
    std::str::from_utf8(row.get(0)?).ok()?.parse().ok()
}

/// Raw contents of the ledger file
///
/// Rows are kept as bytes so that rows which fail validation survive a rewrite.
struct LedgerFile {
    next_id: ExpenseId,
    rows: Vec<ByteRecord>,
}

impl LedgerFile {
    fn empty() -> Self {
        Self {
            next_id: ExpenseId::first(),
            rows: Vec::new(),
        }
    }

    fn parse(contents: &[u8], path: &Path) -> LedgerResult<Self> {
        if contents.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::empty());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(contents);
        let mut records = reader.byte_records();

        let next_id = match records.next() {
            Some(counter) => parse_counter(&header_text(counter)?)?,
            None => return Ok(Self::empty()),
        };

        match records.next() {
            Some(header) => {
                let header = header_text(header)?;
                if !header.iter().map(str::trim).eq(ROW_HEADER.iter().copied()) {
                    return Err(LedgerError::CorruptedData(format!(
                        "Unexpected column header in {}",
                        path.display()
                    )));
                }
            }
            None => {
                return Ok(Self {
                    next_id,
                    rows: Vec::new(),
                })
            }
        }

        let mut rows = Vec::new();
        for record in records {
            match record {
                Ok(row) => rows.push(row),
                Err(err) => warn!(error = %err, "Skipping unreadable ledger line"),
            }
        }

        let mut file = Self { next_id, rows };
        file.raise_counter_past_stored_ids(path);
        Ok(file)
    }

    /// Never hand out an ID that is already on disk, whatever the header says
    fn raise_counter_past_stored_ids(&mut self, path: &Path) {
        if let Some(max_id) = self.rows.iter().filter_map(row_id).max() {
            if max_id >= self.next_id {
                warn!(
                    path = %path.display(),
                    header = %self.next_id,
                    max_id = %max_id,
                    "ID counter is behind stored rows; raising it"
                );
                self.next_id = max_id.next();
            }
        }
    }

    fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        writer.write_record([COUNTER_LABEL, self.next_id.to_string().as_str()])?;
        writer.write_record(ROW_HEADER)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }

        writer
            .into_inner()
            .map_err(|e| LedgerError::Storage(format!("Failed to serialize ledger: {}", e)))
    }
}

fn parse_counter(record: &StringRecord) -> LedgerResult<ExpenseId> {
    let label = record.get(0).map(str::trim);
    let value = record.get(1).map(str::trim);

    match (label, value) {
        (Some(COUNTER_LABEL), Some(value)) => value
            .parse::<i64>()
            .ok()
            .and_then(|raw| ExpenseId::new(raw).ok())
            .ok_or_else(|| {
                LedgerError::CorruptedData(format!("Unparsable next ID counter: '{}'", value))
            }),
        _ => Err(LedgerError::CorruptedData(
            "Missing next ID counter header".into(),
        )),
    }
}

/// The counter and column header lines must be readable text
fn header_text(record: csv::Result<ByteRecord>) -> LedgerResult<StringRecord> {
    let record = record.map_err(|e| {
        LedgerError::CorruptedData(format!("Unreadable ledger header: {}", e))
    })?;
    StringRecord::from_byte_record(record)
        .map_err(|e| LedgerError::CorruptedData(format!("Unreadable ledger header: {}", e)))
}
