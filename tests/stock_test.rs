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

//! Stock public API integration tests.

use atm_stock_rs::{Consumable, Denomination, Stock, StockError};
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// Builds a stock holding only the given notes, with full supplies.
fn stock_with_notes(counts: &[(Denomination, u32)]) -> Stock {
    Stock::from_parts(counts.iter().copied().collect(), 10, 10)
}

/// Builds a seeded note mix with the given consumable levels.
fn stock_with_supplies(ink: u32, paper: u32) -> Stock {
    let counts: HashMap<Denomination, u32> =
        Denomination::ALL.iter().map(|note| (*note, 10)).collect();
    Stock::from_parts(counts, ink, paper)
}

// === Seed State ===

#[test]
fn seeded_stock_holds_ten_of_everything() {
    let stock = Stock::seeded();

    for note in Denomination::ALL {
        assert_eq!(stock.note_count(note), 10);
    }
    assert_eq!(stock.ink_level(), 10);
    assert_eq!(stock.paper_level(), 10);
    assert_eq!(stock.total_value(), dec!(8850));
}

#[test]
fn from_parts_fills_missing_denominations_with_zero() {
    let stock = stock_with_notes(&[(Denomination::Twenty, 4)]);

    assert_eq!(stock.note_count(Denomination::Twenty), 4);
    assert_eq!(stock.note_count(Denomination::Five), 0);
    assert_eq!(stock.total_value(), dec!(80));
}

// === Dispensing ===

#[test]
fn dispense_reduces_total_by_exact_amount() {
    let stock = Stock::seeded();
    let before = stock.total_value();

    stock.dispense(dec!(385)).unwrap();

    assert_eq!(stock.total_value(), before - dec!(385));
}

#[test]
fn dispense_uses_greedy_note_selection() {
    let stock = Stock::seeded();
    let receipt = stock.dispense(dec!(385)).unwrap();

    // 385 = 200 + 100 + 50 + 20 + 10 + 5, largest notes first.
    assert_eq!(receipt.notes.count(Denomination::TwoHundred), 1);
    assert_eq!(receipt.notes.count(Denomination::OneHundred), 1);
    assert_eq!(receipt.notes.count(Denomination::Fifty), 1);
    assert_eq!(receipt.notes.count(Denomination::Twenty), 1);
    assert_eq!(receipt.notes.count(Denomination::Ten), 1);
    assert_eq!(receipt.notes.count(Denomination::Five), 1);
    assert_eq!(receipt.notes.total_value(), dec!(385));
}

#[test]
fn greedy_parity_single_large_note() {
    let stock = stock_with_notes(&[(Denomination::FiveHundred, 1)]);
    let plan = stock.plan_dispense(dec!(500)).unwrap();

    assert_eq!(plan.count(Denomination::FiveHundred), 1);
    assert!(plan.iter().count() == 1);
}

#[test]
fn greedy_parity_falls_back_when_large_notes_exhausted() {
    let stock = stock_with_notes(&[
        (Denomination::FiveHundred, 0),
        (Denomination::TwoHundred, 2),
        (Denomination::OneHundred, 1),
    ]);
    let plan = stock.plan_dispense(dec!(500)).unwrap();

    assert_eq!(plan.count(Denomination::TwoHundred), 2);
    assert_eq!(plan.count(Denomination::OneHundred), 1);
}

#[test]
fn dispense_fails_when_exact_change_impossible() {
    // Total value 500 >= 300, yet no exact combination exists.
    let stock = stock_with_notes(&[(Denomination::FiveHundred, 1)]);

    let result = stock.dispense(dec!(300));
    assert_eq!(result, Err(StockError::InsufficientNotes));
    assert_eq!(stock.total_value(), dec!(500));
}

#[test]
fn dispense_fails_beyond_total_value() {
    let stock = stock_with_notes(&[(Denomination::Ten, 2)]);
    assert_eq!(stock.dispense(dec!(30)), Err(StockError::InsufficientNotes));
}

#[test]
fn dispense_drains_stock_to_zero() {
    let stock = stock_with_notes(&[(Denomination::Five, 2)]);
    stock.dispense(dec!(10)).unwrap();

    assert_eq!(stock.note_count(Denomination::Five), 0);
    assert_eq!(stock.total_value(), dec!(0));
    assert_eq!(stock.dispense(dec!(5)), Err(StockError::InsufficientNotes));
}

#[test]
fn can_dispense_matches_dispense_outcome() {
    let stock = stock_with_notes(&[(Denomination::FiveHundred, 1)]);

    assert!(stock.can_dispense(dec!(500)));
    assert!(!stock.can_dispense(dec!(300)));
    assert!(!stock.can_dispense(dec!(0)));
    assert!(!stock.can_dispense(dec!(-5)));

    // can_dispense is read-only.
    assert_eq!(stock.note_count(Denomination::FiveHundred), 1);
}

// === Consumable Policy ===

#[test]
fn receipt_printed_with_full_supplies() {
    let stock = stock_with_supplies(10, 10);
    let receipt = stock.dispense(dec!(20)).unwrap();

    assert!(receipt.receipt_printed);
    assert!(!receipt.low_supplies);
    assert_eq!(stock.ink_level(), 9);
    assert_eq!(stock.paper_level(), 9);
}

#[test]
fn low_ink_still_prints_with_warning() {
    let stock = stock_with_supplies(5, 10);
    let receipt = stock.dispense(dec!(20)).unwrap();

    assert!(receipt.receipt_printed);
    assert!(receipt.low_supplies);
    assert_eq!(stock.ink_level(), 4);
    assert_eq!(stock.paper_level(), 9);
}

#[test]
fn low_paper_still_prints_with_warning() {
    let stock = stock_with_supplies(10, 1);
    let receipt = stock.dispense(dec!(20)).unwrap();

    assert!(receipt.receipt_printed);
    assert!(receipt.low_supplies);
    assert_eq!(stock.paper_level(), 0);
}

#[test]
fn exhausted_ink_skips_receipt_and_preserves_counters() {
    let stock = stock_with_supplies(0, 10);
    let receipt = stock.dispense(dec!(20)).unwrap();

    assert!(!receipt.receipt_printed);
    assert!(!receipt.low_supplies);
    assert_eq!(stock.ink_level(), 0);
    assert_eq!(stock.paper_level(), 10);
    // Cash still left the machine.
    assert_eq!(stock.note_count(Denomination::Twenty), 9);
}

#[test]
fn exhausted_paper_skips_receipt() {
    let stock = stock_with_supplies(10, 0);
    let receipt = stock.dispense(dec!(20)).unwrap();

    assert!(!receipt.receipt_printed);
    assert_eq!(stock.ink_level(), 10);
}

#[test]
fn supplies_degrade_independently_of_cash() {
    let stock = stock_with_supplies(2, 2);

    // Two receipts drain the supplies to zero.
    assert!(stock.dispense(dec!(5)).unwrap().receipt_printed);
    assert!(stock.dispense(dec!(5)).unwrap().receipt_printed);

    // Third dispense succeeds without paperwork.
    let receipt = stock.dispense(dec!(5)).unwrap();
    assert!(!receipt.receipt_printed);
    assert_eq!(stock.ink_level(), 0);
    assert_eq!(stock.paper_level(), 0);
}

// === Restocking ===

#[test]
fn restock_notes_increases_count() {
    let stock = Stock::seeded();
    assert_eq!(stock.restock_notes(Denomination::OneHundred, 7), Ok(17));
    assert_eq!(stock.note_count(Denomination::OneHundred), 17);
    assert_eq!(stock.total_value(), dec!(9550));
}

#[test]
fn restock_makes_previously_impossible_amounts_dispensable() {
    let stock = stock_with_notes(&[(Denomination::FiveHundred, 1)]);
    assert!(!stock.can_dispense(dec!(300)));

    stock.restock_notes(Denomination::OneHundred, 3).unwrap();
    assert!(stock.can_dispense(dec!(300)));

    let receipt = stock.dispense(dec!(300)).unwrap();
    assert_eq!(receipt.notes.count(Denomination::OneHundred), 3);
}

#[test]
fn restock_consumable_reenables_receipts() {
    let stock = stock_with_supplies(0, 10);
    assert!(!stock.dispense(dec!(5)).unwrap().receipt_printed);

    stock.restock_consumable(Consumable::Ink, 10).unwrap();
    let receipt = stock.dispense(dec!(5)).unwrap();
    assert!(receipt.receipt_printed);
    assert_eq!(stock.ink_level(), 9);
}

#[test]
fn restock_rejects_zero_quantity() {
    let stock = Stock::seeded();
    assert_eq!(
        stock.restock_notes(Denomination::Five, 0),
        Err(StockError::InvalidQuantity)
    );
    assert_eq!(
        stock.restock_consumable(Consumable::Paper, 0),
        Err(StockError::InvalidQuantity)
    );
}

// === Status View ===

#[test]
fn snapshot_totals_match_per_denomination_sums() {
    let stock = Stock::seeded();
    stock.dispense(dec!(730)).unwrap();

    let snapshot = stock.snapshot();
    let summed: rust_decimal::Decimal = snapshot
        .notes
        .iter()
        .map(|(note, count)| note.face_value() * rust_decimal::Decimal::from(*count))
        .sum();

    assert_eq!(snapshot.total_value, summed);
    assert_eq!(snapshot.total_value, dec!(8120));
}

#[test]
fn snapshot_is_a_copy_not_a_view() {
    let stock = Stock::seeded();
    let snapshot = stock.snapshot();

    stock.dispense(dec!(500)).unwrap();

    assert_eq!(snapshot.notes[&Denomination::FiveHundred], 10);
    assert_eq!(stock.note_count(Denomination::FiveHundred), 9);
}
