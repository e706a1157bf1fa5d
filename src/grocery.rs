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

//! Grocery items as seen by the checkout.
//!
//! Catalog lookup lives outside this crate. The checkout only ever asks an
//! item for its price and its handling rating; the name is carried so that
//! per-item promotions can group identical units.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An immutable grocery item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroceryItem {
    name: String,
    price: Decimal,
    handling_rating: Decimal,
}

impl GroceryItem {
    pub fn new(name: impl Into<String>, price: Decimal, handling_rating: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
            handling_rating,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// How hard the item is to scan and bag. Feeds the register's labor cost.
    pub fn handling_rating(&self) -> Decimal {
        self.handling_rating
    }
}
