// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Stock persistence adapter.
//!
//! Maps the [`Stock`] aggregate to and from a durable JSON document:
//!
//! ```json
//! { "bankNotes": { "FIVE": 10, ... }, "inkLevel": 10, "paperLevel": 10 }
//! ```
//!
//! Loading is lenient by contract: a missing or empty document yields a
//! freshly seeded stock, a malformed document is logged and replaced by a
//! seeded stock, a document missing a consumable field keeps the seed value
//! for that field, and a missing denomination key loads as count 0. Saving
//! is strict: write failures are returned to the caller, never swallowed.

use crate::denomination::Denomination;
use crate::stock::{SEED_CONSUMABLE_LEVEL, Stock};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Key of the stock document within the byte store.
pub const STOCK_KEY: &str = "stock.json";

/// Persistence adapter errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The byte store failed to read the stock document
    #[error("failed to read stock document")]
    Read(#[source] io::Error),

    /// The stored document could not be parsed
    #[error("malformed stock document")]
    Malformed(#[source] serde_json::Error),

    /// The stock snapshot could not be encoded
    #[error("failed to encode stock document")]
    Encode(#[source] serde_json::Error),

    /// The byte store failed to write the stock document
    #[error("failed to write stock document")]
    Write(#[source] io::Error),
}

/// Durable byte store supplied by the surrounding persistence layer.
pub trait ByteStore {
    /// Reads the bytes stored under `key`. `Ok(None)` means no prior
    /// representation exists (first run).
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    /// Writes `bytes` under `key`, overwriting any prior representation.
    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()>;
}

impl<S: ByteStore + ?Sized> ByteStore for &S {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        (**self).write(key, bytes)
    }
}

/// Filesystem byte store rooted at a data directory.
///
/// The directory is created on first write, mirroring a first-run machine
/// that has never persisted anything.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ByteStore for FileStore {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.root.join(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.root.join(key), bytes)
    }
}

/// In-memory byte store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ByteStore for MemoryStore {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        self.entries.lock().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Wire form of the stock aggregate.
///
/// Consumable fields are optional so documents produced by an older or
/// newer schema still load; a missing field means "unchanged from seed".
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StockDocument {
    #[serde(default)]
    bank_notes: HashMap<Denomination, u32>,
    #[serde(default)]
    ink_level: Option<u32>,
    #[serde(default)]
    paper_level: Option<u32>,
}

impl StockDocument {
    fn from_stock(stock: &Stock) -> Self {
        let snapshot = stock.snapshot();
        Self {
            bank_notes: snapshot.notes,
            ink_level: Some(snapshot.ink_level),
            paper_level: Some(snapshot.paper_level),
        }
    }

    fn into_stock(self) -> Stock {
        Stock::from_parts(
            self.bank_notes,
            self.ink_level.unwrap_or(SEED_CONSUMABLE_LEVEL),
            self.paper_level.unwrap_or(SEED_CONSUMABLE_LEVEL),
        )
    }
}

/// Load/save facade over a [`ByteStore`].
#[derive(Debug)]
pub struct StockStore<S> {
    store: S,
}

impl<S: ByteStore> StockStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the persisted stock, if any.
    ///
    /// `Ok(None)` means no prior representation exists (or an empty one, a
    /// crash artifact treated the same as first run).
    ///
    /// # Errors
    ///
    /// - [`StoreError::Read`] - the byte store failed.
    /// - [`StoreError::Malformed`] - the document could not be parsed.
    pub fn try_load(&self) -> Result<Option<Stock>, StoreError> {
        let bytes = match self.store.read(STOCK_KEY).map_err(StoreError::Read)? {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => return Ok(None),
        };
        let document: StockDocument =
            serde_json::from_slice(&bytes).map_err(StoreError::Malformed)?;
        Ok(Some(document.into_stock()))
    }

    /// Loads the persisted stock, substituting a freshly seeded one when
    /// nothing usable is stored. Never fails: read and parse failures are
    /// logged as warnings and recovered.
    pub fn load(&self) -> Stock {
        match self.try_load() {
            Ok(Some(stock)) => stock,
            Ok(None) => Stock::seeded(),
            Err(e) => {
                warn!(error = %e, "unusable stock document, substituting seeded stock");
                Stock::seeded()
            }
        }
    }

    /// Writes the complete current stock snapshot, overwriting any prior
    /// representation.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Encode`] - the snapshot could not be serialized.
    /// - [`StoreError::Write`] - the byte store rejected the write. The
    ///   caller decides whether to retry or continue unpersisted.
    pub fn save(&self, stock: &Stock) -> Result<(), StoreError> {
        let document = StockDocument::from_stock(stock);
        let bytes = serde_json::to_vec_pretty(&document).map_err(StoreError::Encode)?;
        self.store.write(STOCK_KEY, &bytes).map_err(StoreError::Write)
    }
}
