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

//! Store assembly.
//!
//! [`Configuration`] is the factory boundary: it names the queue, line and
//! receipt implementations a store is built from. [`StoreConfig`] carries the
//! knobs for a whole simulated store and checks them before anything is
//! built.

use crate::CheckoutError;
use crate::grocery::GroceryItem;
use crate::line::CheckoutLine;
use crate::queue::FifoQueue;
use crate::receipt::{MultiBuyPricing, Pricing, Receipt, StandardPricing};
use crate::register::Cashier;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Selected implementations for each pluggable piece of the checkout.
pub struct Configuration;

impl Configuration {
    pub fn queue_implementation<T>() -> FifoQueue<T> {
        FifoQueue::new()
    }

    /// A line that admits every shopper.
    pub fn normal_line() -> CheckoutLine {
        CheckoutLine::unrestricted()
    }

    /// A line that admits shoppers with 15 items or fewer.
    pub fn express_line() -> CheckoutLine {
        CheckoutLine::express()
    }

    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidDiscount`] if `discount` is outside
    /// `[0, 1]`.
    pub fn receipt_implementation(
        groceries: &[GroceryItem],
        discount: Decimal,
    ) -> Result<Receipt, CheckoutError> {
        Receipt::standard(groceries, discount)
    }
}

/// Settings for one simulated store.
///
/// Each register serves exactly one lane. The first `express_lines` lanes are
/// express lanes, the rest are unrestricted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub registers: u16,
    pub express_lines: u16,
    pub items_per_step: u64,
    pub discount: Decimal,
    /// Every n-th unit of the same item is free when set.
    pub multi_buy: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            registers: 3,
            express_lines: 1,
            items_per_step: 5,
            discount: Decimal::ZERO,
            multi_buy: None,
        }
    }
}

impl StoreConfig {
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidConfig`] for an empty store, more express
    ///   lanes than registers, a zero scan rate, or a multi-buy below 2.
    /// - [`CheckoutError::InvalidDiscount`] for a discount outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.registers == 0 {
            return Err(CheckoutError::InvalidConfig(
                "store needs at least one register".to_string(),
            ));
        }
        if self.express_lines > self.registers {
            return Err(CheckoutError::InvalidConfig(format!(
                "{} express lines but only {} registers",
                self.express_lines, self.registers
            )));
        }
        self.cashier().map(|_| ())
    }

    pub fn pricing(&self) -> Result<Arc<dyn Pricing>, CheckoutError> {
        match self.multi_buy {
            Some(every) => Ok(Arc::new(MultiBuyPricing::new(every)?)),
            None => Ok(Arc::new(StandardPricing)),
        }
    }

    /// The cashier every register of the store is staffed with.
    pub fn cashier(&self) -> Result<Cashier, CheckoutError> {
        Cashier::new(self.items_per_step, self.discount, self.pricing()?)
    }

    /// Lanes in the order shoppers consider them: express first.
    pub fn lines(&self) -> Vec<CheckoutLine> {
        (0..self.registers)
            .map(|lane| {
                if lane < self.express_lines {
                    Configuration::express_line()
                } else {
                    Configuration::normal_line()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::AdmissionPolicy;
    use crate::queue::Queue;
    use rust_decimal_macros::dec;

    #[test]
    fn factory_provides_every_implementation() {
        let queue = Configuration::queue_implementation::<u8>();
        assert!(queue.is_empty());
        assert_eq!(
            Configuration::normal_line().policy(),
            AdmissionPolicy::Unrestricted
        );
        assert_eq!(
            Configuration::express_line().policy(),
            AdmissionPolicy::MaxItems(15)
        );
        assert!(Configuration::receipt_implementation(&[], Decimal::ZERO).is_ok());
    }

    #[test]
    fn default_config_is_valid() {
        let config = StoreConfig::default();
        assert!(config.validate().is_ok());

        let policies: Vec<_> = config.lines().iter().map(CheckoutLine::policy).collect();
        assert_eq!(
            policies,
            vec![
                AdmissionPolicy::MaxItems(15),
                AdmissionPolicy::Unrestricted,
                AdmissionPolicy::Unrestricted
            ]
        );
    }

    #[test]
    fn invalid_configs_rejected() {
        let no_registers = StoreConfig {
            registers: 0,
            express_lines: 0,
            ..StoreConfig::default()
        };
        assert!(matches!(
            no_registers.validate(),
            Err(CheckoutError::InvalidConfig(_))
        ));

        let too_many_express = StoreConfig {
            registers: 2,
            express_lines: 3,
            ..StoreConfig::default()
        };
        assert!(too_many_express.validate().is_err());

        let bad_discount = StoreConfig {
            discount: dec!(1.5),
            ..StoreConfig::default()
        };
        assert_eq!(
            bad_discount.validate(),
            Err(CheckoutError::InvalidDiscount(dec!(1.5)))
        );

        let bad_promotion = StoreConfig {
            multi_buy: Some(1),
            ..StoreConfig::default()
        };
        assert!(bad_promotion.validate().is_err());

        let zero_rate = StoreConfig {
            items_per_step: 0,
            ..StoreConfig::default()
        };
        assert!(zero_rate.validate().is_err());
    }
}
