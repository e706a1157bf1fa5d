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

//! Registers and the cost model.
//!
//! A [`Register`] turns shoppers into [`Transaction`]s one at a time and keeps
//! three running quantities: cost, time and history. None of them ever go
//! backwards.
//!
//! # Cost model
//!
//! ```text
//!  idle:    +1 per time step spent waiting for the shopper to arrive
//!  labor:   + (handling difficulty × 100) / time_steps²
//!  base:    +1 per time step spent on the transaction
//! ```
//!
//! Faster processing of hard-to-handle groceries costs more: quick cashiers
//! are expensive.
//!
//! # Example
//!
//! ```
//! use checkout_sim::{Cashier, GroceryItem, Register, RegisterId, ShopperIdGenerator};
//! use rust_decimal_macros::dec;
//! use std::sync::Arc;
//!
//! let cashier = Cashier::standard(1, dec!(0)).unwrap();
//! let mut register = Register::new(RegisterId(1), cashier);
//!
//! let mut ids = ShopperIdGenerator::new();
//! let apple = GroceryItem::new("apple", dec!(0.50), dec!(2));
//! let shopper = Arc::new(ids.create(&[apple.clone(), apple], 0));
//!
//! let transaction = register.process_shopper(shopper).unwrap();
//! assert_eq!(transaction.time_steps(), 2);
//! assert_eq!(register.running_time(), 2);
//! assert_eq!(register.running_cost(), dec!(102));
//! ```

use crate::CheckoutError;
use crate::base::{RegisterId, TimeStep};
use crate::receipt::{Pricing, Receipt, StandardPricing};
use crate::shopper::Shopper;
use crate::transaction::Transaction;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::sync::Arc;
use tracing::{debug, error};

/// Decides how a register builds the transaction for a shopper.
///
/// Implementations choose pricing, discount and duration. The transaction
/// must start at `start_time`; a register rejects anything else as a broken
/// strategy.
pub trait TransactionStrategy {
    fn create_transaction(
        &mut self,
        shopper: Arc<Shopper>,
        start_time: TimeStep,
    ) -> Result<Transaction, CheckoutError>;
}

impl<F> TransactionStrategy for F
where
    F: FnMut(Arc<Shopper>, TimeStep) -> Result<Transaction, CheckoutError>,
{
    fn create_transaction(
        &mut self,
        shopper: Arc<Shopper>,
        start_time: TimeStep,
    ) -> Result<Transaction, CheckoutError> {
        self(shopper, start_time)
    }
}

/// A cashier scanning a fixed number of items per time step.
#[derive(Debug, Clone)]
pub struct Cashier {
    items_per_step: u64,
    discount: Decimal,
    pricing: Arc<dyn Pricing>,
}

impl Cashier {
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidConfig`] if `items_per_step` is zero.
    /// - [`CheckoutError::InvalidDiscount`] if `discount` is outside `[0, 1]`.
    pub fn new(
        items_per_step: u64,
        discount: Decimal,
        pricing: Arc<dyn Pricing>,
    ) -> Result<Self, CheckoutError> {
        if items_per_step == 0 {
            return Err(CheckoutError::InvalidConfig(
                "cashier must scan at least one item per time step".to_string(),
            ));
        }
        if discount < Decimal::ZERO || discount > Decimal::ONE {
            return Err(CheckoutError::InvalidDiscount(discount));
        }
        Ok(Self {
            items_per_step,
            discount,
            pricing,
        })
    }

    /// A cashier using [`StandardPricing`].
    pub fn standard(items_per_step: u64, discount: Decimal) -> Result<Self, CheckoutError> {
        Self::new(items_per_step, discount, Arc::new(StandardPricing))
    }

    /// Time steps needed for `items` items. An empty basket still takes one.
    pub fn time_steps_for(&self, items: usize) -> TimeStep {
        (items as u64).div_ceil(self.items_per_step).max(1)
    }
}

impl TransactionStrategy for Cashier {
    fn create_transaction(
        &mut self,
        shopper: Arc<Shopper>,
        start_time: TimeStep,
    ) -> Result<Transaction, CheckoutError> {
        let receipt = Receipt::new(shopper.groceries(), self.discount, Arc::clone(&self.pricing))?;
        let time_steps = self.time_steps_for(shopper.groceries().len());
        Transaction::new(receipt, shopper, start_time, time_steps)
    }
}

/// Sequential transaction processor with an accruing cost.
///
/// Registers are not meant to be shared across threads; every mutation goes
/// through [`Register::process_shopper`] and needs `&mut self`.
#[derive(Debug)]
pub struct Register<S> {
    id: RegisterId,
    strategy: S,
    running_cost: Decimal,
    running_time: TimeStep,
    transactions: Vec<Transaction>,
}

impl<S> Register<S>
where
    S: TransactionStrategy,
{
    pub fn new(id: RegisterId, strategy: S) -> Self {
        Self {
            id,
            strategy,
            running_cost: Decimal::ZERO,
            running_time: 0,
            transactions: Vec::new(),
        }
    }

    /// Running cost after idling `idle_steps` and then working `transaction`.
    fn accrued_cost(
        &self,
        transaction: &Transaction,
        idle_steps: TimeStep,
    ) -> Result<Decimal, CheckoutError> {
        let steps = Decimal::from(transaction.time_steps());
        let labor = transaction
            .handling_difficulty()?
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|work| steps.checked_mul(steps).and_then(|sq| work.checked_div(sq)))
            .ok_or(CheckoutError::CostOverflow)?;

        self.running_cost
            .checked_add(Decimal::from(idle_steps))
            .and_then(|cost| cost.checked_add(labor))
            .and_then(|cost| cost.checked_add(steps))
            .ok_or(CheckoutError::CostOverflow)
    }

    fn assert_invariants(&self, previous_cost: Decimal, previous_time: TimeStep) {
        debug_assert!(
            self.running_cost >= previous_cost,
            "Invariant violated: running cost went down: {} -> {}",
            previous_cost,
            self.running_cost
        );
        debug_assert!(
            self.running_time >= previous_time,
            "Invariant violated: running time went back: {} -> {}",
            previous_time,
            self.running_time
        );
    }

    /// Processes a shopper, returning the transaction that was recorded.
    ///
    /// If the shopper arrived after the register's current time, the
    /// register first idles forward to the arrival time at a cost of 1 per
    /// step. The strategy then builds the transaction, and its labor and base
    /// cost are added to the running totals.
    ///
    /// # Errors
    ///
    /// - Any error raised by the strategy while building the transaction.
    /// - [`CheckoutError::CostOverflow`] if the new running cost leaves the
    ///   decimal range.
    /// - [`CheckoutError::ClockMismatch`] if the transaction does not start at
    ///   the register's (advanced) running time. This means the strategy is
    ///   broken: the error is logged at error level and must not be retried
    ///   with the same strategy. Treat it as fatal for the simulation run.
    ///
    /// On error the register is left exactly as it was, idle time included.
    pub fn process_shopper(&mut self, shopper: Arc<Shopper>) -> Result<&Transaction, CheckoutError> {
        let previous_cost = self.running_cost;
        let previous_time = self.running_time;

        let start_time = self.running_time.max(shopper.time());
        let idle_steps = start_time - self.running_time;

        let transaction = self.strategy.create_transaction(shopper, start_time)?;
        if transaction.start_time() != start_time {
            error!(
                register = %self.id,
                expected = start_time,
                actual = transaction.start_time(),
                "transaction start time does not match register time"
            );
            return Err(CheckoutError::ClockMismatch {
                expected: start_time,
                actual: transaction.start_time(),
            });
        }

        let time_steps = transaction.time_steps();
        let running_cost = self.accrued_cost(&transaction, idle_steps)?;

        self.running_cost = running_cost;
        self.running_time = transaction.end_time();
        self.assert_invariants(previous_cost, previous_time);

        debug!(
            register = %self.id,
            shopper = %transaction.shopper().id(),
            start = start_time,
            steps = time_steps,
            idle = idle_steps,
            cost = %self.running_cost,
            "processed shopper"
        );

        let index = self.transactions.len();
        self.transactions.push(transaction);
        Ok(&self.transactions[index])
    }
}

impl<S> Register<S> {
    const DECIMAL_PRECISION: u32 = 4;

    pub fn id(&self) -> RegisterId {
        self.id
    }

    pub fn running_cost(&self) -> Decimal {
        self.running_cost
    }

    pub fn running_time(&self) -> TimeStep {
        self.running_time
    }

    /// Every transaction processed so far, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Total sale value collected across all transactions.
    pub fn revenue(&self) -> Decimal {
        self.transactions
            .iter()
            .map(|transaction| transaction.receipt().sale_value())
            .sum()
    }
}

impl<S> Serialize for Register<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let precision = Self::DECIMAL_PRECISION;
        let mut state = serializer.serialize_struct("Register", 5)?;
        state.serialize_field("register", &self.id)?;
        state.serialize_field("transactions", &self.transactions.len())?;
        state.serialize_field("running_time", &self.running_time)?;
        state.serialize_field("running_cost", &self.running_cost.round_dp(precision))?;
        state.serialize_field("revenue", &self.revenue().round_dp(precision))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grocery::GroceryItem;
    use crate::shopper::ShopperIdGenerator;
    use rust_decimal_macros::dec;

    fn item(handling: Decimal) -> GroceryItem {
        GroceryItem::new("item", dec!(1.00), handling)
    }

    #[test]
    fn cashier_time_steps_round_up() {
        let cashier = Cashier::standard(3, Decimal::ZERO).unwrap();
        assert_eq!(cashier.time_steps_for(0), 1);
        assert_eq!(cashier.time_steps_for(1), 1);
        assert_eq!(cashier.time_steps_for(3), 1);
        assert_eq!(cashier.time_steps_for(4), 2);
        assert_eq!(cashier.time_steps_for(9), 3);
    }

    #[test]
    fn cashier_rejects_bad_settings() {
        assert!(matches!(
            Cashier::standard(0, Decimal::ZERO),
            Err(CheckoutError::InvalidConfig(_))
        ));
        assert_eq!(
            Cashier::standard(1, dec!(2)).unwrap_err(),
            CheckoutError::InvalidDiscount(dec!(2))
        );
    }

    #[test]
    fn idle_time_is_charged_once() {
        let mut ids = ShopperIdGenerator::new();
        let mut register = Register::new(RegisterId(1), Cashier::standard(1, Decimal::ZERO).unwrap());

        // arrives at 10 with one item of zero difficulty: 10 idle + 1 base
        register
            .process_shopper(Arc::new(ids.create(&[item(Decimal::ZERO)], 10)))
            .unwrap();
        assert_eq!(register.running_time(), 11);
        assert_eq!(register.running_cost(), dec!(11));

        // arrived earlier than the clock: no idle charge, no rewind
        let transaction = register
            .process_shopper(Arc::new(ids.create(&[item(Decimal::ZERO)], 3)))
            .unwrap();
        assert_eq!(transaction.start_time(), 11);
        assert_eq!(register.running_time(), 12);
        assert_eq!(register.running_cost(), dec!(12));
    }

    #[test]
    fn strategy_errors_leave_register_untouched() {
        let mut ids = ShopperIdGenerator::new();
        let mut register = Register::new(RegisterId(1), |_: Arc<Shopper>, _: TimeStep| -> Result<Transaction, CheckoutError> {
            Err(CheckoutError::InvalidTimeSteps)
        });

        let result = register.process_shopper(Arc::new(ids.create(&[], 25)));
        assert!(matches!(result, Err(CheckoutError::InvalidTimeSteps)));
        assert_eq!(register.running_time(), 0);
        assert_eq!(register.running_cost(), Decimal::ZERO);
        assert!(register.transactions().is_empty());
    }

    #[test]
    fn serializer_rounds_to_four_decimal_places() {
        let mut ids = ShopperIdGenerator::new();
        let mut register = Register::new(RegisterId(3), Cashier::standard(1, Decimal::ZERO).unwrap());

        // difficulty 1 over 3 steps: 100 / 9 = 11.1111..., plus 3 base
        let groceries = [item(dec!(1)), item(Decimal::ZERO), item(Decimal::ZERO)];
        register
            .process_shopper(Arc::new(ids.create(&groceries, 0)))
            .unwrap();

        let json = serde_json::to_string(&register).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["register"], 3);
        assert_eq!(parsed["transactions"], 1);
        assert_eq!(parsed["running_time"], 3);
        assert_eq!(parsed["running_cost"].as_str().unwrap(), "14.1111");
        assert_eq!(parsed["revenue"].as_str().unwrap(), "3.00");
    }

    #[test]
    fn precision_constant_is_four() {
        assert_eq!(Register::<Cashier>::DECIMAL_PRECISION, 4);
    }
}
