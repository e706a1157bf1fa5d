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

//! Receipts and pricing strategies.
//!
//! A [`Receipt`] fixes what was bought and the discount given. How those
//! groceries add up to a subtotal and a sale value is left to a [`Pricing`]
//! strategy chosen when the receipt is built.
//!
//! # Example
//!
//! ```
//! use checkout_sim::{GroceryItem, Receipt};
//! use rust_decimal_macros::dec;
//!
//! let groceries = [
//!     GroceryItem::new("apple", dec!(0.50), dec!(1)),
//!     GroceryItem::new("beef", dec!(7.50), dec!(3)),
//! ];
//! let receipt = Receipt::standard(&groceries, dec!(0.25)).unwrap();
//! assert_eq!(receipt.subtotal(), dec!(8.00));
//! assert_eq!(receipt.sale_value(), dec!(6.00));
//! ```

use crate::CheckoutError;
use crate::grocery::GroceryItem;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Computes the money side of a receipt.
pub trait Pricing: fmt::Debug + Send + Sync {
    /// Total before discount.
    fn subtotal(&self, groceries: &[GroceryItem]) -> Decimal;

    /// Amount the shopper pays once `discount` is applied to `subtotal`.
    fn sale_value(&self, subtotal: Decimal, discount: Decimal) -> Decimal {
        subtotal * (Decimal::ONE - discount)
    }
}

/// Sum of the item prices, discount applied to the whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPricing;

impl Pricing for StandardPricing {
    fn subtotal(&self, groceries: &[GroceryItem]) -> Decimal {
        groceries.iter().map(GroceryItem::price).sum()
    }
}

/// Every `every`-th unit of the same item is free.
///
/// With `every = 3`, three apples cost as much as two. Units are matched by
/// item name.
#[derive(Debug, Clone, Copy)]
pub struct MultiBuyPricing {
    every: usize,
}

impl MultiBuyPricing {
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidConfig`] if `every` is below 2, which
    /// would make every unit (or none) free.
    pub fn new(every: usize) -> Result<Self, CheckoutError> {
        if every < 2 {
            return Err(CheckoutError::InvalidConfig(format!(
                "multi-buy promotion needs at least 2 units, got {every}"
            )));
        }
        Ok(Self { every })
    }

    pub fn every(&self) -> usize {
        self.every
    }
}

impl Pricing for MultiBuyPricing {
    fn subtotal(&self, groceries: &[GroceryItem]) -> Decimal {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut subtotal = Decimal::ZERO;
        for item in groceries {
            let count = seen.entry(item.name()).or_insert(0);
            *count += 1;
            if *count % self.every != 0 {
                subtotal += item.price();
            }
        }
        subtotal
    }
}

/// Immutable record of one shopper's purchase.
#[derive(Debug, Clone)]
pub struct Receipt {
    groceries: Box<[GroceryItem]>,
    /// `0` is no discount, `1` is a 100% discount.
    discount: Decimal,
    pricing: Arc<dyn Pricing>,
}

impl Receipt {
    /// Builds a receipt over a private copy of `groceries`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidDiscount`] if `discount` is outside
    /// `[0, 1]`.
    pub fn new(
        groceries: &[GroceryItem],
        discount: Decimal,
        pricing: Arc<dyn Pricing>,
    ) -> Result<Self, CheckoutError> {
        if discount < Decimal::ZERO || discount > Decimal::ONE {
            return Err(CheckoutError::InvalidDiscount(discount));
        }
        Ok(Self {
            groceries: groceries.into(),
            discount,
            pricing,
        })
    }

    /// Builds a receipt priced with [`StandardPricing`].
    pub fn standard(groceries: &[GroceryItem], discount: Decimal) -> Result<Self, CheckoutError> {
        Self::new(groceries, discount, Arc::new(StandardPricing))
    }

    pub fn groceries(&self) -> &[GroceryItem] {
        &self.groceries
    }

    pub fn discount(&self) -> Decimal {
        self.discount
    }

    pub fn subtotal(&self) -> Decimal {
        self.pricing.subtotal(&self.groceries)
    }

    pub fn sale_value(&self) -> Decimal {
        self.pricing.sale_value(self.subtotal(), self.discount)
    }
}
