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

//! Euro bank note denominations.
//!
//! The denomination set is fixed at compile time. Denominations are
//! serialized by symbolic name (`"FIVE"`, `"ONE_HUNDRED"`, ...) so the
//! durable representation stays stable even if face values are revisited.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One face value in the fixed Euro note set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Denomination {
    Five,
    Ten,
    Twenty,
    Fifty,
    OneHundred,
    TwoHundred,
    FiveHundred,
}

impl Denomination {
    /// All denominations, ascending by face value.
    pub const ALL: [Denomination; 7] = [
        Denomination::Five,
        Denomination::Ten,
        Denomination::Twenty,
        Denomination::Fifty,
        Denomination::OneHundred,
        Denomination::TwoHundred,
        Denomination::FiveHundred,
    ];

    /// All denominations, descending by face value.
    ///
    /// This is the traversal order of the greedy exact-change algorithm:
    /// largest notes first.
    pub const DESCENDING: [Denomination; 7] = [
        Denomination::FiveHundred,
        Denomination::TwoHundred,
        Denomination::OneHundred,
        Denomination::Fifty,
        Denomination::Twenty,
        Denomination::Ten,
        Denomination::Five,
    ];

    /// Face value in whole euros.
    pub const fn value(self) -> u32 {
        match self {
            Denomination::Five => 5,
            Denomination::Ten => 10,
            Denomination::Twenty => 20,
            Denomination::Fifty => 50,
            Denomination::OneHundred => 100,
            Denomination::TwoHundred => 200,
            Denomination::FiveHundred => 500,
        }
    }

    /// Face value as a [`Decimal`] for amount arithmetic.
    pub fn face_value(self) -> Decimal {
        Decimal::from(self.value())
    }

    /// Symbolic name used in the durable representation.
    pub const fn name(self) -> &'static str {
        match self {
            Denomination::Five => "FIVE",
            Denomination::Ten => "TEN",
            Denomination::Twenty => "TWENTY",
            Denomination::Fifty => "FIFTY",
            Denomination::OneHundred => "ONE_HUNDRED",
            Denomination::TwoHundred => "TWO_HUNDRED",
            Denomination::FiveHundred => "FIVE_HUNDRED",
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "€{}", self.value())
    }
}

impl FromStr for Denomination {
    type Err = String;

    /// Parses either the face value (`"50"`) or the symbolic name
    /// (`"fifty"`, case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "5" | "FIVE" => Ok(Denomination::Five),
            "10" | "TEN" => Ok(Denomination::Ten),
            "20" | "TWENTY" => Ok(Denomination::Twenty),
            "50" | "FIFTY" => Ok(Denomination::Fifty),
            "100" | "ONE_HUNDRED" => Ok(Denomination::OneHundred),
            "200" | "TWO_HUNDRED" => Ok(Denomination::TwoHundred),
            "500" | "FIVE_HUNDRED" => Ok(Denomination::FiveHundred),
            other => Err(format!("unknown denomination '{other}'")),
        }
    }
}
