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

//! Error types for stock operations.

use thiserror::Error;

/// Stock operation errors.
///
/// None of these are fatal: every failure is a value returned to the caller
/// and leaves the stock unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    /// Dispense amount or restock quantity is not positive
    #[error("invalid quantity (must be positive)")]
    InvalidQuantity,

    /// No combination of available notes sums to exactly the amount
    #[error("cannot make exact change with available notes")]
    NotExact,

    /// Dispense rejected: exact change cannot be formed from current stock
    #[error("insufficient bank notes for requested amount")]
    InsufficientNotes,
}
