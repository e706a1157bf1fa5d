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

//! Shoppers and their identities.
//!
//! A [`Shopper`] is an arrival event: a grocery list, the time step at which
//! the shopper reached the checkout area, and a unique id. Ids come from a
//! [`ShopperIdGenerator`] scoped to one simulation run.
//!
//! # Example
//!
//! ```
//! use checkout_sim::{Configuration, GroceryItem, ShopperIdGenerator};
//! use rust_decimal_macros::dec;
//! use std::sync::Arc;
//!
//! let mut ids = ShopperIdGenerator::new();
//! let apple = GroceryItem::new("apple", dec!(0.50), dec!(1));
//! let shopper = Arc::new(ids.create(&[apple], 0));
//!
//! let lines = [Configuration::express_line(), Configuration::normal_line()];
//! assert!(Arc::clone(&shopper).select_line(&lines).unwrap());
//! assert_eq!(lines[0].len(), 1);
//! ```

use crate::base::{ShopperId, TimeStep};
use crate::grocery::GroceryItem;
use crate::line::CheckoutLine;
use crate::queue::Queue;
use crate::CheckoutError;
use std::sync::Arc;

/// A shopper waiting to check out.
#[derive(Debug, PartialEq, Eq)]
pub struct Shopper {
    id: ShopperId,
    time: TimeStep,
    groceries: Box<[GroceryItem]>,
}

impl Shopper {
    pub fn id(&self) -> ShopperId {
        self.id
    }

    /// Time step at which this shopper arrived.
    pub fn time(&self) -> TimeStep {
        self.time
    }

    /// Read-only view of the shopping list.
    pub fn groceries(&self) -> &[GroceryItem] {
        &self.groceries
    }

    /// Joins the first line in `lines` that admits this shopper.
    ///
    /// Lines are tried in the order given. The choice is greedy: queue
    /// lengths are not considered. Returns `Ok(false)` without touching any
    /// line when none of them admits the shopper.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`CheckoutLine::enqueue`], which cannot
    /// occur for a line that just reported the shopper as admissible.
    pub fn select_line<Q>(self: Arc<Self>, lines: &[CheckoutLine<Q>]) -> Result<bool, CheckoutError>
    where
        Q: Queue<Arc<Shopper>>,
    {
        for line in lines {
            if line.can_enter_line(&self) {
                line.enqueue(self)?;
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Hands out shopper ids for one simulation run.
///
/// Ids start at zero and increase by one per shopper; they are never reused.
#[derive(Debug, Default)]
pub struct ShopperIdGenerator {
    next: u64,
}

impl ShopperIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ShopperId {
        let id = ShopperId(self.next);
        self.next += 1;
        id
    }

    /// Creates a shopper with a fresh id.
    ///
    /// The grocery list is copied, so later changes to `groceries` by the
    /// caller are not seen by the shopper.
    pub fn create(&mut self, groceries: &[GroceryItem], time: TimeStep) -> Shopper {
        Shopper {
            id: self.next_id(),
            time,
            groceries: groceries.into(),
        }
    }
}
