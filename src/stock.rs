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

//! Denomination ledger.
//!
//! [`Stock`] holds the per-denomination note counts and the two receipt
//! consumables (ink, paper), and runs the greedy exact-change algorithm.
//! Each mutator is one atomic critical section: the plan step and the
//! apply step never straddle a lock release, so stock cannot change
//! between deciding on a note split and removing those notes.
//!
//! # Example
//!
//! ```
//! use atm_stock_rs::Stock;
//! use rust_decimal_macros::dec;
//!
//! let stock = Stock::seeded();
//! assert_eq!(stock.total_value(), dec!(8850));
//!
//! let receipt = stock.dispense(dec!(180)).unwrap();
//! assert!(receipt.receipt_printed);
//! assert_eq!(stock.total_value(), dec!(8670));
//! ```

use crate::denomination::Denomination;
use crate::dispense::{Consumable, DispensePlan, Receipt};
use crate::error::StockError;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::collections::HashMap;

/// Notes of each denomination in a freshly seeded stock.
pub const SEED_NOTES_PER_DENOMINATION: u32 = 10;

/// Ink and paper units in a freshly seeded stock.
pub const SEED_CONSUMABLE_LEVEL: u32 = 10;

/// At or below this many units a consumable counts as low and dispenses
/// carry the low-supplies advisory. At zero the receipt is skipped entirely.
pub const LOW_SUPPLY_THRESHOLD: u32 = 5;

/// Read and dispense capability over a stock.
///
/// This is the surface granted to the withdrawal flow and to read-only
/// status reporting. Restocking is a separate capability ([`Restocker`])
/// so callers receive only what their role requires.
pub trait Dispenser {
    /// Total face value of all notes currently held.
    fn total_value(&self) -> Decimal;

    /// Whether an exact note combination exists for `amount`. Read-only.
    fn can_dispense(&self, amount: Decimal) -> bool;

    /// Removes notes summing to exactly `amount` and evaluates the receipt
    /// consumables.
    fn dispense(&self, amount: Decimal) -> Result<Receipt, StockError>;

    /// Point-in-time copy of all counters for reporting.
    fn snapshot(&self) -> StockSnapshot;
}

/// Restock capability, granted to privileged callers only.
pub trait Restocker: Dispenser {
    /// Adds `quantity` notes of one denomination. Returns the new count.
    fn restock_notes(&self, note: Denomination, quantity: u32) -> Result<u32, StockError>;

    /// Adds `quantity` units of ink or paper. Returns the new level.
    fn restock_consumable(&self, kind: Consumable, quantity: u32) -> Result<u32, StockError>;
}

#[derive(Debug)]
struct StockData {
    /// Every denomination is always present as a key.
    notes: HashMap<Denomination, u32>,
    ink_level: u32,
    paper_level: u32,
}

impl StockData {
    fn seeded() -> Self {
        let notes = Denomination::ALL
            .iter()
            .map(|note| (*note, SEED_NOTES_PER_DENOMINATION))
            .collect();
        Self {
            notes,
            ink_level: SEED_CONSUMABLE_LEVEL,
            paper_level: SEED_CONSUMABLE_LEVEL,
        }
    }

    fn from_parts(counts: HashMap<Denomination, u32>, ink_level: u32, paper_level: u32) -> Self {
        // Denominations absent from the input load as count 0.
        let notes = Denomination::ALL
            .iter()
            .map(|note| (*note, counts.get(note).copied().unwrap_or(0)))
            .collect();
        Self {
            notes,
            ink_level,
            paper_level,
        }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            Denomination::ALL.iter().all(|note| self.notes.contains_key(note)),
            "Invariant violated: denomination key missing from stock"
        );
    }

    fn count(&self, note: Denomination) -> u32 {
        self.notes.get(&note).copied().unwrap_or(0)
    }

    fn total_value(&self) -> Decimal {
        self.notes
            .iter()
            .map(|(note, count)| note.face_value() * Decimal::from(*count))
            .sum()
    }

    /// Greedy exact-change computation, largest notes first.
    ///
    /// `take = min(available, floor(remaining / face))` per denomination.
    /// Returns `None` when the residue is nonzero: the amount cannot be
    /// made exactly from the available notes, even if the total value is
    /// sufficient. `Decimal` arithmetic is exact, so the residue check is
    /// exact zero.
    fn plan(&self, amount: Decimal) -> Option<DispensePlan> {
        let mut plan = DispensePlan::new();
        let mut remaining = amount;

        for note in Denomination::DESCENDING {
            let available = self.count(note);
            if available == 0 {
                continue;
            }
            let face = note.face_value();
            let needed = (remaining / face).floor();
            let take = needed.min(Decimal::from(available)).to_u32().unwrap_or(0);
            if take > 0 {
                plan.record(note, take);
                remaining -= face * Decimal::from(take);
            }
        }

        remaining.is_zero().then_some(plan)
    }

    /// Removes the planned notes. The plan must have been computed against
    /// this same data under the same lock.
    fn apply(&mut self, plan: &DispensePlan) {
        for (note, count) in plan.iter() {
            let available = self.notes.entry(note).or_insert(0);
            debug_assert!(
                *available >= count,
                "Invariant violated: plan takes {count} x {note} but only {available} held"
            );
            *available = available.saturating_sub(count);
        }
        self.assert_invariants();
    }

    /// Evaluates the consumable policy for one receipt.
    ///
    /// Returns `(receipt_printed, low_supplies)`. When either consumable is
    /// exhausted nothing is printed and nothing is consumed; when either is
    /// low (1..=LOW_SUPPLY_THRESHOLD) the receipt still prints but the
    /// advisory flag is set.
    fn consume_receipt(&mut self) -> (bool, bool) {
        if self.ink_level == 0 || self.paper_level == 0 {
            return (false, false);
        }
        let low = self.ink_level <= LOW_SUPPLY_THRESHOLD
            || self.paper_level <= LOW_SUPPLY_THRESHOLD;
        self.ink_level -= 1;
        self.paper_level -= 1;
        (true, low)
    }
}

/// Cash machine stock: bank notes plus receipt consumables.
///
/// One instance exists per running machine. All counters live behind a
/// single [`Mutex`], which makes `dispense` a single atomic
/// check-and-mutate step even though the surrounding session flow is
/// single-threaded by construction.
#[derive(Debug)]
pub struct Stock {
    inner: Mutex<StockData>,
}

impl Stock {
    /// Stock with the fixed seed quantities: 10 of each denomination,
    /// 10 ink, 10 paper.
    pub fn seeded() -> Self {
        Self {
            inner: Mutex::new(StockData::seeded()),
        }
    }

    /// Stock reconstructed from explicit counters (persistence load path).
    /// Denominations missing from `counts` start at 0.
    pub fn from_parts(
        counts: HashMap<Denomination, u32>,
        ink_level: u32,
        paper_level: u32,
    ) -> Self {
        Self {
            inner: Mutex::new(StockData::from_parts(counts, ink_level, paper_level)),
        }
    }

    pub fn note_count(&self, note: Denomination) -> u32 {
        self.inner.lock().count(note)
    }

    pub fn ink_level(&self) -> u32 {
        self.inner.lock().ink_level
    }

    pub fn paper_level(&self) -> u32 {
        self.inner.lock().paper_level
    }

    pub fn total_value(&self) -> Decimal {
        self.inner.lock().total_value()
    }

    pub fn can_dispense(&self, amount: Decimal) -> bool {
        if amount <= Decimal::ZERO {
            return false;
        }
        self.inner.lock().plan(amount).is_some()
    }

    /// Runs the exact-change algorithm without mutating state.
    ///
    /// # Errors
    ///
    /// - [`StockError::InvalidQuantity`] - `amount` is not positive.
    /// - [`StockError::NotExact`] - no combination of available notes sums
    ///   to exactly `amount`.
    pub fn plan_dispense(&self, amount: Decimal) -> Result<DispensePlan, StockError> {
        if amount <= Decimal::ZERO {
            return Err(StockError::InvalidQuantity);
        }
        self.inner.lock().plan(amount).ok_or(StockError::NotExact)
    }

    /// Dispenses exactly `amount`, or fails without touching any counter.
    ///
    /// On success the planned notes are removed and the consumable policy
    /// runs: the returned [`Receipt`] reports whether paperwork was issued
    /// and whether supplies are running low. The plan and the mutation
    /// happen under one lock acquisition.
    ///
    /// # Errors
    ///
    /// - [`StockError::InvalidQuantity`] - `amount` is not positive.
    /// - [`StockError::InsufficientNotes`] - exact change cannot be formed,
    ///   including when total value is sufficient but the denomination mix
    ///   has gaps.
    pub fn dispense(&self, amount: Decimal) -> Result<Receipt, StockError> {
        if amount <= Decimal::ZERO {
            return Err(StockError::InvalidQuantity);
        }

        let mut data = self.inner.lock();
        let plan = data.plan(amount).ok_or(StockError::InsufficientNotes)?;
        data.apply(&plan);
        let (receipt_printed, low_supplies) = data.consume_receipt();

        Ok(Receipt {
            amount,
            notes: plan,
            receipt_printed,
            low_supplies,
        })
    }

    /// Adds notes of one denomination. Returns the new count.
    ///
    /// # Errors
    ///
    /// [`StockError::InvalidQuantity`] - `quantity` is zero.
    pub fn restock_notes(&self, note: Denomination, quantity: u32) -> Result<u32, StockError> {
        if quantity == 0 {
            return Err(StockError::InvalidQuantity);
        }
        let mut data = self.inner.lock();
        let count = data.notes.entry(note).or_insert(0);
        *count = count.saturating_add(quantity);
        Ok(*count)
    }

    /// Adds ink or paper units. Returns the new level.
    ///
    /// # Errors
    ///
    /// [`StockError::InvalidQuantity`] - `quantity` is zero.
    pub fn restock_consumable(
        &self,
        kind: Consumable,
        quantity: u32,
    ) -> Result<u32, StockError> {
        if quantity == 0 {
            return Err(StockError::InvalidQuantity);
        }
        let mut data = self.inner.lock();
        let level = match kind {
            Consumable::Ink => &mut data.ink_level,
            Consumable::Paper => &mut data.paper_level,
        };
        *level = level.saturating_add(quantity);
        Ok(*level)
    }

    /// Point-in-time copy of every counter, for the technician status view.
    pub fn snapshot(&self) -> StockSnapshot {
        let data = self.inner.lock();
        StockSnapshot {
            notes: data.notes.clone(),
            ink_level: data.ink_level,
            paper_level: data.paper_level,
            total_value: data.total_value(),
        }
    }
}

impl Default for Stock {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Dispenser for Stock {
    fn total_value(&self) -> Decimal {
        Stock::total_value(self)
    }

    fn can_dispense(&self, amount: Decimal) -> bool {
        Stock::can_dispense(self, amount)
    }

    fn dispense(&self, amount: Decimal) -> Result<Receipt, StockError> {
        Stock::dispense(self, amount)
    }

    fn snapshot(&self) -> StockSnapshot {
        Stock::snapshot(self)
    }
}

impl Restocker for Stock {
    fn restock_notes(&self, note: Denomination, quantity: u32) -> Result<u32, StockError> {
        Stock::restock_notes(self, note, quantity)
    }

    fn restock_consumable(&self, kind: Consumable, quantity: u32) -> Result<u32, StockError> {
        Stock::restock_consumable(self, kind, quantity)
    }
}

/// Point-in-time view of all stock counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    #[serde(rename = "bankNotes")]
    pub notes: HashMap<Denomination, u32>,
    pub ink_level: u32,
    pub paper_level: u32,
    pub total_value: Decimal,
}
