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

//! # ATM Stock
//!
//! This library provides the internal stock ledger of a cash machine: it
//! tracks physical bank note inventory by denomination plus two consumable
//! counters (receipt ink, receipt paper), and answers "can this amount be
//! dispensed, and with which notes?" before mutating state.
//!
//! ## Core Components
//!
//! - [`Stock`]: Denomination ledger with the greedy exact-change algorithm
//! - [`StockStore`]: Persistence adapter over a durable [`ByteStore`]
//! - [`Denomination`]: The fixed Euro note set
//! - [`StockError`]: Error types for stock operation failures
//!
//! ## Example
//!
//! ```
//! use atm_stock_rs::{Denomination, Stock};
//! use rust_decimal_macros::dec;
//!
//! // A fresh machine holds 10 notes of each denomination.
//! let stock = Stock::seeded();
//! assert_eq!(stock.total_value(), dec!(8850));
//!
//! // Dispense exact change, largest notes first.
//! let receipt = stock.dispense(dec!(250)).unwrap();
//! assert_eq!(receipt.notes.count(Denomination::TwoHundred), 1);
//! assert_eq!(receipt.notes.count(Denomination::Fifty), 1);
//! assert!(receipt.receipt_printed);
//! ```
//!
//! ## Thread Safety
//!
//! The surrounding session flow is single-threaded by construction, but
//! [`Stock`] keeps all counters behind one lock so that every dispense is a
//! single atomic check-and-mutate step.

mod denomination;
mod dispense;
pub mod error;
mod stock;
mod store;

pub use denomination::Denomination;
pub use dispense::{Consumable, DispensePlan, Receipt};
pub use error::StockError;
pub use stock::{
    Dispenser, LOW_SUPPLY_THRESHOLD, Restocker, SEED_CONSUMABLE_LEVEL,
    SEED_NOTES_PER_DENOMINATION, Stock, StockSnapshot,
};
pub use store::{ByteStore, FileStore, MemoryStore, STOCK_KEY, StockStore, StoreError};
