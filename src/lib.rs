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

//! # Checkout Simulator
//!
//! This library models the checkout end of a grocery store: shoppers pick an
//! admitting line, registers process them one transaction at a time, and
//! every transaction carries a receipt.
//!
//! ## Core Components
//!
//! - [`Shopper`]: Immutable arrival with a grocery list and a unique id
//! - [`CheckoutLine`]: FIFO queue of shoppers guarded by an [`AdmissionPolicy`]
//! - [`Register`]: Sequential processor accruing running cost and time
//! - [`Receipt`] / [`Transaction`]: Immutable records of a completed checkout
//! - [`Store`]: Driver wiring lanes to registers for a whole simulation
//! - [`CheckoutError`]: Error types for checkout processing failures
//!
//! Time is measured in discrete [`TimeStep`]s supplied by the caller.
//!
//! ## Example
//!
//! ```
//! use checkout_sim::{GroceryItem, ShopperIdGenerator, Store, StoreConfig};
//! use rust_decimal_macros::dec;
//!
//! let mut store = Store::from_config(&StoreConfig::default()).unwrap();
//! let mut ids = ShopperIdGenerator::new();
//!
//! let milk = GroceryItem::new("milk", dec!(2.49), dec!(1));
//! let shoppers = vec![ids.create(&[milk.clone()], 0), ids.create(&vec![milk; 20], 1)];
//! store.run(shoppers).unwrap();
//!
//! // small basket in the express lane, big basket in the next one
//! assert_eq!(store.registers()[0].transactions().len(), 1);
//! assert_eq!(store.registers()[1].transactions().len(), 1);
//! assert!(store.turned_away().is_empty());
//! ```

mod base;
pub mod config;
pub mod error;
mod grocery;
pub mod line;
mod queue;
pub mod receipt;
pub mod register;
mod shopper;
mod store;
mod transaction;

pub use base::{RegisterId, ShopperId, TimeStep};
pub use config::{Configuration, StoreConfig};
pub use error::{CheckoutError, ErrorKind};
pub use grocery::GroceryItem;
pub use line::{AdmissionPolicy, CheckoutLine, EXPRESS_ITEM_LIMIT};
pub use queue::{FifoQueue, Queue};
pub use receipt::{MultiBuyPricing, Pricing, Receipt, StandardPricing};
pub use register::{Cashier, Register, TransactionStrategy};
pub use shopper::{Shopper, ShopperIdGenerator};
pub use store::Store;
pub use transaction::Transaction;
