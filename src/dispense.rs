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

//! Dispense value types.
//!
//! A [`DispensePlan`] is one candidate note allocation for a requested
//! amount. It is ephemeral: produced by the exact-change algorithm, applied
//! (or discarded) within the same call, never persisted.

use crate::denomination::Denomination;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Note allocation for a single dispense: denomination to count-to-remove.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispensePlan {
    counts: HashMap<Denomination, u32>,
}

impl DispensePlan {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records notes taken for one denomination. Zero takes are not stored.
    pub(crate) fn record(&mut self, note: Denomination, count: u32) {
        if count > 0 {
            self.counts.insert(note, count);
        }
    }

    /// Planned count for one denomination (0 if the plan does not use it).
    pub fn count(&self, note: Denomination) -> u32 {
        self.counts.get(&note).copied().unwrap_or(0)
    }

    /// Iterates over the denominations the plan actually uses.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        self.counts.iter().map(|(note, count)| (*note, *count))
    }

    /// Total face value of the planned notes.
    pub fn total_value(&self) -> Decimal {
        self.counts
            .iter()
            .map(|(note, count)| note.face_value() * Decimal::from(*count))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Outcome of a successful dispense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// Amount handed out.
    pub amount: Decimal,
    /// Notes removed from stock for this amount.
    pub notes: DispensePlan,
    /// Whether a physical receipt was issued. False when ink or paper is
    /// exhausted; the cash still leaves the machine.
    pub receipt_printed: bool,
    /// Advisory flag: a consumable is low (1..=5 units) and needs
    /// restocking soon.
    pub low_supplies: bool,
}

/// Receipt consumable kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Consumable {
    Ink,
    Paper,
}

impl fmt::Display for Consumable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Consumable::Ink => write!(f, "ink"),
            Consumable::Paper => write!(f, "paper"),
        }
    }
}

impl FromStr for Consumable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ink" => Ok(Consumable::Ink),
            "paper" => Ok(Consumable::Paper),
            other => Err(format!("unknown consumable '{other}' (expected ink or paper)")),
        }
    }
}
