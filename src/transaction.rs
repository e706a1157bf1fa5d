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

//! Completed checkout transactions.

use crate::CheckoutError;
use crate::base::TimeStep;
use crate::receipt::Receipt;
use crate::shopper::Shopper;
use rust_decimal::Decimal;
use std::sync::Arc;

/// A receipt for one shopper plus when, and for how long, a register worked
/// on it.
#[derive(Debug, Clone)]
pub struct Transaction {
    receipt: Receipt,
    shopper: Arc<Shopper>,
    start_time: TimeStep,
    time_steps: TimeStep,
}

impl Transaction {
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidTimeSteps`] if `time_steps` is zero.
    /// - [`CheckoutError::TimeOverflow`] if the transaction would end past
    ///   the last representable time step.
    pub fn new(
        receipt: Receipt,
        shopper: Arc<Shopper>,
        start_time: TimeStep,
        time_steps: TimeStep,
    ) -> Result<Self, CheckoutError> {
        if time_steps < 1 {
            return Err(CheckoutError::InvalidTimeSteps);
        }
        if start_time.checked_add(time_steps).is_none() {
            return Err(CheckoutError::TimeOverflow {
                start: start_time,
                steps: time_steps,
            });
        }
        Ok(Self {
            receipt,
            shopper,
            start_time,
            time_steps,
        })
    }

    pub fn receipt(&self) -> &Receipt {
        &self.receipt
    }

    pub fn shopper(&self) -> &Arc<Shopper> {
        &self.shopper
    }

    pub fn start_time(&self) -> TimeStep {
        self.start_time
    }

    /// Number of time steps the transaction takes. Always at least 1.
    pub fn time_steps(&self) -> TimeStep {
        self.time_steps
    }

    /// Time step at which the register is free again.
    ///
    /// Cannot overflow: [`Transaction::new`] rejects such transactions.
    pub fn end_time(&self) -> TimeStep {
        self.start_time + self.time_steps
    }

    /// Sum of the handling ratings of everything on the receipt.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::CostOverflow`] if the sum leaves the decimal
    /// range.
    pub fn handling_difficulty(&self) -> Result<Decimal, CheckoutError> {
        self.receipt
            .groceries()
            .iter()
            .try_fold(Decimal::ZERO, |total, item| {
                total.checked_add(item.handling_rating())
            })
            .ok_or(CheckoutError::CostOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grocery::GroceryItem;
    use crate::shopper::ShopperIdGenerator;
    use rust_decimal_macros::dec;

    fn fixture() -> (Receipt, Arc<Shopper>) {
        let groceries = [
            GroceryItem::new("apple", dec!(0.50), dec!(1.5)),
            GroceryItem::new("beef", dec!(7.99), dec!(2.5)),
        ];
        let shopper = Arc::new(ShopperIdGenerator::new().create(&groceries, 4));
        let receipt = Receipt::standard(shopper.groceries(), Decimal::ZERO).unwrap();
        (receipt, shopper)
    }

    #[test]
    fn zero_time_steps_rejected() {
        let (receipt, shopper) = fixture();
        let result = Transaction::new(receipt, shopper, 4, 0);
        assert!(matches!(result, Err(CheckoutError::InvalidTimeSteps)));
    }

    #[test]
    fn accessors_return_construction_values() {
        let (receipt, shopper) = fixture();
        let transaction = Transaction::new(receipt, Arc::clone(&shopper), 4, 3).unwrap();

        assert_eq!(transaction.start_time(), 4);
        assert_eq!(transaction.time_steps(), 3);
        assert_eq!(transaction.end_time(), 7);
        assert_eq!(transaction.shopper(), &shopper);
        assert_eq!(transaction.handling_difficulty(), Ok(dec!(4.0)));
    }

    #[test]
    fn end_past_last_time_step_rejected() {
        let (receipt, shopper) = fixture();
        let result = Transaction::new(receipt.clone(), Arc::clone(&shopper), u64::MAX, 1);
        assert!(matches!(
            result,
            Err(CheckoutError::TimeOverflow {
                start: u64::MAX,
                steps: 1
            })
        ));

        let last = Transaction::new(receipt, shopper, u64::MAX - 2, 2).unwrap();
        assert_eq!(last.end_time(), u64::MAX);
    }

    #[test]
    fn difficulty_overflow_is_reported() {
        let groceries = [
            GroceryItem::new("anvil", dec!(1), Decimal::MAX),
            GroceryItem::new("anvil", dec!(1), Decimal::MAX),
        ];
        let shopper = Arc::new(ShopperIdGenerator::new().create(&groceries, 0));
        let receipt = Receipt::standard(shopper.groceries(), Decimal::ZERO).unwrap();
        let transaction = Transaction::new(receipt, shopper, 0, 1).unwrap();

        assert_eq!(
            transaction.handling_difficulty(),
            Err(CheckoutError::CostOverflow)
        );
    }
}
