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

//! Store simulation driver.
//!
//! The [`Store`] is the central component that wires checkout lines to
//! registers and feeds shoppers through them in arrival order.
//!
//! # Lanes
//!
//! Line *i* is served by register *i*. Arriving shoppers pick the first line
//! that admits them, so lane order is priority order. Shoppers that no line
//! admits are turned away and remembered for the report.
//!
//! # Thread Safety
//!
//! A store is driven from one thread. Independent stores share nothing and
//! can be simulated in parallel.

use crate::base::{RegisterId, ShopperId};
use crate::config::StoreConfig;
use crate::line::CheckoutLine;
use crate::register::{Cashier, Register, TransactionStrategy};
use crate::shopper::Shopper;
use crate::CheckoutError;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A set of lanes, each with its own register.
///
/// # Invariants
///
/// - There are exactly as many registers as lines.
/// - A shopper is either waiting in one line, recorded in one register's
///   history, listed as turned away, or listed as failed with the error that
///   stopped their checkout.
#[derive(Debug)]
pub struct Store<S> {
    lines: Vec<CheckoutLine>,
    registers: Vec<Register<S>>,
    turned_away: Vec<ShopperId>,
    failed: Vec<(ShopperId, CheckoutError)>,
}

impl<S> Store<S>
where
    S: TransactionStrategy,
{
    /// Creates a store with one register per line, numbered from 1.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidConfig`] if there are no lines or the
    /// number of strategies differs from the number of lines.
    pub fn new(
        lines: Vec<CheckoutLine>,
        strategies: impl IntoIterator<Item = S>,
    ) -> Result<Self, CheckoutError> {
        let registers: Vec<_> = strategies
            .into_iter()
            .zip(1u16..)
            .map(|(strategy, id)| Register::new(RegisterId(id), strategy))
            .collect();

        if lines.is_empty() {
            return Err(CheckoutError::InvalidConfig(
                "store needs at least one line".to_string(),
            ));
        }
        if registers.len() != lines.len() {
            return Err(CheckoutError::InvalidConfig(format!(
                "{} lines but {} registers",
                lines.len(),
                registers.len()
            )));
        }

        Ok(Self {
            lines,
            registers,
            turned_away: Vec::new(),
            failed: Vec::new(),
        })
    }

    /// Sends an arriving shopper to the first line that admits them.
    ///
    /// Returns `Ok(false)` if every line turned the shopper away.
    pub fn arrive(&mut self, shopper: Arc<Shopper>) -> Result<bool, CheckoutError> {
        let id = shopper.id();
        let items = shopper.groceries().len();
        let admitted = shopper.select_line(&self.lines)?;
        if admitted {
            debug!(shopper = %id, items, "shopper joined a line");
        } else {
            warn!(shopper = %id, items, "no line admits shopper");
            self.turned_away.push(id);
        }
        Ok(admitted)
    }

    /// Lets every register work through its line.
    ///
    /// # Errors
    ///
    /// Stops at the first register error. The shopper being processed at that
    /// point has already left the line, so they are listed in [`Store::failed`]
    /// together with the error. Shoppers behind them stay in their lines.
    pub fn checkout(&mut self) -> Result<(), CheckoutError> {
        for (line, register) in self.lines.iter().zip(self.registers.iter_mut()) {
            while let Some(shopper) = line.dequeue() {
                let id = shopper.id();
                if let Err(err) = register.process_shopper(shopper).map(|_| ()) {
                    warn!(shopper = %id, register = %register.id(), %err, "checkout failed");
                    self.failed.push((id, err.clone()));
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Runs a full simulation: arrivals in time order, then checkout.
    ///
    /// Shoppers arriving at the same time step keep their relative order.
    pub fn run(&mut self, mut shoppers: Vec<Shopper>) -> Result<(), CheckoutError> {
        shoppers.sort_by_key(Shopper::time);
        let arrivals = shoppers.len();
        for shopper in shoppers {
            self.arrive(Arc::new(shopper))?;
        }
        self.checkout()?;

        info!(
            arrivals,
            turned_away = self.turned_away.len(),
            revenue = %self.total_revenue(),
            cost = %self.total_cost(),
            "simulation finished"
        );
        Ok(())
    }
}

impl Store<Cashier> {
    /// Builds a store staffed with identical cashiers.
    ///
    /// # Errors
    ///
    /// Returns the error from [`StoreConfig::validate`].
    pub fn from_config(config: &StoreConfig) -> Result<Self, CheckoutError> {
        config.validate()?;
        let cashier = config.cashier()?;
        let strategies = (0..config.registers).map(|_| cashier.clone());
        Self::new(config.lines(), strategies)
    }
}

impl<S> Store<S> {
    /// Lines in priority order.
    pub fn lines(&self) -> &[CheckoutLine] {
        &self.lines
    }

    pub fn registers(&self) -> &[Register<S>] {
        &self.registers
    }

    /// Shoppers that no line would admit, in arrival order.
    pub fn turned_away(&self) -> &[ShopperId] {
        &self.turned_away
    }

    /// Shoppers whose checkout failed, with the error their register raised.
    pub fn failed(&self) -> &[(ShopperId, CheckoutError)] {
        &self.failed
    }

    pub fn total_revenue(&self) -> Decimal {
        self.registers.iter().map(Register::revenue).sum()
    }

    pub fn total_cost(&self) -> Decimal {
        self.registers.iter().map(Register::running_cost).sum()
    }
}
