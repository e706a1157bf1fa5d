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

use checkout_sim::{
    CheckoutError, GroceryItem, Shopper, ShopperIdGenerator, Store, StoreConfig, TimeStep,
};
use clap::Parser;
use csv::{ReaderBuilder, Trim, Writer};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Checkout Simulator - Run a store checkout over a shopper CSV
///
/// Reads shoppers from a CSV file, sends them through the store's lanes and
/// writes one row per register to stdout.
#[derive(Parser, Debug)]
#[command(name = "checkout-sim")]
#[command(about = "Simulates grocery checkout lanes over a shopper CSV", long_about = None)]
struct Args {
    /// Path to CSV file with shoppers
    ///
    /// Expected format: shopper,time,item,price,handling
    /// Example: cargo run -- shoppers.csv > registers.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Number of registers (one lane each)
    #[arg(long, default_value_t = 3)]
    registers: u16,

    /// How many of the lanes are express lanes (15 items or fewer)
    #[arg(long, default_value_t = 1)]
    express_lines: u16,

    /// Items each cashier scans per time step
    #[arg(long, default_value_t = 5)]
    items_per_step: u64,

    /// Discount given on every receipt, between 0 and 1
    #[arg(long, default_value_t = Decimal::ZERO)]
    discount: Decimal,

    /// Make every n-th unit of the same item free
    #[arg(long, value_name = "N")]
    multi_buy: Option<usize>,

    /// Log every shopper and transaction
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn store_config(&self) -> StoreConfig {
        StoreConfig {
            registers: self.registers,
            express_lines: self.express_lines,
            items_per_step: self.items_per_step,
            discount: self.discount,
            multi_buy: self.multi_buy,
        }
    }
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "checkout_sim=debug"
    } else {
        "checkout_sim=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    let mut store = match Store::from_config(&args.store_config()) {
        Ok(store) => store,
        Err(e) => {
            error!("Invalid store configuration: {}", e);
            process::exit(1);
        }
    };

    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            error!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let mut ids = ShopperIdGenerator::new();
    let shoppers = match read_shoppers(BufReader::new(file), &mut ids) {
        Ok(shoppers) => shoppers,
        Err(e) => {
            error!("Error reading shoppers: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = store.run(shoppers) {
        error!("Simulation failed: {}", e);
        process::exit(1);
    }

    if let Err(e) = write_registers(&store, std::io::stdout()) {
        error!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Largest price or handling rating accepted from a CSV row.
const MAX_ITEM_VALUE: Decimal = dec!(1000000000);

/// Raw CSV record matching the input format.
///
/// Fields: `shopper, time, item, price, handling`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    shopper: String,
    time: TimeStep,
    item: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    price: Option<Decimal>,
    #[serde(deserialize_with = "csv::invalid_option")]
    handling: Option<Decimal>,
}

impl CsvRecord {
    /// Converts the record's item columns to a grocery item.
    fn to_item(&self) -> Result<GroceryItem, CheckoutError> {
        let price = self.price.ok_or(CheckoutError::Missing { field: "price" })?;
        let handling = self
            .handling
            .ok_or(CheckoutError::Missing { field: "handling" })?;
        let in_range = |value: Decimal| (Decimal::ZERO..=MAX_ITEM_VALUE).contains(&value);
        if !in_range(price) || !in_range(handling) {
            return Err(CheckoutError::InvalidItem(self.item.clone()));
        }
        Ok(GroceryItem::new(self.item.as_str(), price, handling))
    }
}

/// A shopper being assembled from consecutive rows.
struct PendingShopper {
    label: String,
    time: TimeStep,
    groceries: Vec<GroceryItem>,
}

/// Reads shoppers from a CSV reader.
///
/// Consecutive rows with the same `shopper` label make up one shopper's
/// grocery list; the arrival time comes from the group's first row. Ids are
/// assigned from `ids` in file order. Malformed rows and rows with a missing,
/// negative or oversized price or handling rating are skipped with a warning.
///
/// # CSV Format
///
/// ```csv
/// shopper,time,item,price,handling
/// alice,0,apple,0.50,1
/// alice,0,beef,7.99,3
/// bob,2,milk,2.49,1
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the CSV structure is invalid.
pub fn read_shoppers<R: Read>(
    reader: R,
    ids: &mut ShopperIdGenerator,
) -> Result<Vec<Shopper>, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let mut shoppers = Vec::new();
    let mut pending: Option<PendingShopper> = None;

    for result in rdr.deserialize::<CsvRecord>() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping malformed row: {}", e);
                continue;
            }
        };

        let starts_new_group = pending
            .as_ref()
            .is_none_or(|current| current.label != record.shopper);
        if starts_new_group {
            if let Some(done) = pending.take() {
                shoppers.push(ids.create(&done.groceries, done.time));
            }
            pending = Some(PendingShopper {
                label: record.shopper.clone(),
                time: record.time,
                groceries: Vec::new(),
            });
        }

        match record.to_item() {
            Ok(item) => {
                if let Some(current) = pending.as_mut() {
                    current.groceries.push(item);
                }
            }
            Err(e) => warn!(shopper = %record.shopper, "Skipping item {}: {}", record.item, e),
        }
    }

    if let Some(done) = pending {
        shoppers.push(ids.create(&done.groceries, done.time));
    }

    Ok(shoppers)
}

/// Writes one row per register to a CSV writer.
///
/// # CSV Format
///
/// Columns: `register, transactions, running_time, running_cost, revenue`
///
/// ```csv
/// register,transactions,running_time,running_cost,revenue
/// 1,4,12,310.5000,42.10
/// ```
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_registers<S, W: Write>(store: &Store<S>, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    for register in store.registers() {
        wtr.serialize(register)?;
    }

    wtr.flush()?;
    Ok(())
}
