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

use atm_stock_rs::{
    Consumable, Denomination, FileStore, Stock, StockError, StockSnapshot, StockStore,
};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::cmp::Reverse;
use std::path::PathBuf;
use std::process;

/// ATM Stock - Inspect and operate a cash machine's note inventory
///
/// Loads the persisted stock document, applies one operation, and persists
/// the result. A machine with no persisted state starts seeded with 10 notes
/// of each denomination and 10 units each of ink and paper.
#[derive(Parser, Debug)]
#[command(name = "atm-stock-rs")]
#[command(about = "A cash machine stock engine that dispenses exact change", long_about = None)]
struct Args {
    /// Directory holding the persisted stock document
    #[arg(long, default_value = "data", value_name = "DIR")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show current stock levels (technician view)
    Status,
    /// Dispense an exact amount in bank notes
    Dispense {
        /// Amount in euros, e.g. 180
        amount: Decimal,
    },
    /// Add bank notes of one denomination (privileged)
    Restock {
        /// Denomination by face value or name, e.g. 50 or fifty
        denomination: Denomination,
        /// Number of notes to add
        quantity: u32,
    },
    /// Add receipt supplies (privileged)
    Supplies {
        /// Consumable kind: ink or paper
        kind: Consumable,
        /// Units to add
        quantity: u32,
    },
}

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let args = Args::parse();
    let store = StockStore::new(FileStore::new(&args.data_dir));

    // Load never fails: missing or unusable documents fall back to the
    // seeded defaults (the failure is logged by the store).
    let stock = store.load();

    if let Err(e) = run(&stock, &args.command) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    // A failed operation changes nothing, so only successful runs persist.
    if let Err(e) = store.save(&stock) {
        eprintln!("Error saving stock: {e}");
        process::exit(1);
    }
}

fn run(stock: &Stock, command: &Command) -> Result<(), StockError> {
    match command {
        Command::Status => {
            print!("{}", render_status(&stock.snapshot()));
        }
        Command::Dispense { amount } => {
            let receipt = stock.dispense(*amount)?;

            println!("Dispensed €{}:", receipt.amount);
            let mut notes: Vec<_> = receipt.notes.iter().collect();
            notes.sort_by_key(|(note, _)| Reverse(note.value()));
            for (note, count) in notes {
                println!("  {count} x {note}");
            }

            if receipt.receipt_printed {
                println!("Receipt printed.");
            } else {
                println!("No receipt printed: supplies exhausted.");
            }
            if receipt.low_supplies {
                println!("Warning: ink or paper running low, restock soon.");
            }
        }
        Command::Restock {
            denomination,
            quantity,
        } => {
            let count = stock.restock_notes(*denomination, *quantity)?;
            println!("Added {quantity} x {denomination} notes. New count: {count}");
        }
        Command::Supplies { kind, quantity } => {
            let level = stock.restock_consumable(*kind, *quantity)?;
            println!("Added {quantity} units of {kind}. New level: {level}");
        }
    }
    Ok(())
}

/// Formats the technician status view: per-denomination counts with their
/// value, total cash, and consumable levels.
fn render_status(snapshot: &StockSnapshot) -> String {
    let mut out = String::from("========== ATM STOCK LEVELS ==========\nBANK NOTES:\n");

    for note in Denomination::DESCENDING {
        let count = snapshot.notes.get(&note).copied().unwrap_or(0);
        let value = note.face_value() * Decimal::from(count);
        out.push_str(&format!(
            "  {:<5} : {:>3} notes (€{})\n",
            note.to_string(),
            count,
            value
        ));
    }

    out.push_str(&format!("\nTotal Cash: €{}\n", snapshot.total_value));
    out.push_str("\nCONSUMABLES:\n");
    out.push_str(&format!("  Ink Level   : {} units\n", snapshot.ink_level));
    out.push_str(&format!("  Paper Level : {} units\n", snapshot.paper_level));
    out.push_str("======================================\n");
    out
}
