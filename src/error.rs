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

//! Error types for checkout processing.
//!
//! Every error falls into one of three [`ErrorKind`]s. Missing and invalid
//! arguments reject the call before any state is touched. An internal
//! consistency violation means a [`TransactionStrategy`] is broken and should
//! never be retried.
//!
//! [`TransactionStrategy`]: crate::TransactionStrategy

use crate::base::{ShopperId, TimeStep};
use rust_decimal::Decimal;
use thiserror::Error;

/// Checkout processing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// A required input was absent
    #[error("missing {field}")]
    Missing { field: &'static str },

    /// Discount is outside `[0, 1]`
    #[error("discount {0} must be in the range [0, 1]")]
    InvalidDiscount(Decimal),

    /// Grocery item carries a negative or oversized price or handling rating
    #[error("item {0} has a price or handling rating out of range")]
    InvalidItem(String),

    /// A transaction was built with zero duration
    #[error("cannot perform transaction in less than 1 time step")]
    InvalidTimeSteps,

    /// Transaction would end past the last representable time step
    #[error("transaction starting at {start} for {steps} steps overflows the clock")]
    TimeOverflow { start: TimeStep, steps: TimeStep },

    /// Register cost exceeds the representable decimal range
    #[error("register cost overflowed")]
    CostOverflow,

    /// Shopper was forced into a line whose admission policy rejects them
    #[error("shopper {shopper} with {items} items is not admitted to this line")]
    AdmissionRejected { shopper: ShopperId, items: usize },

    /// Store configuration is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Transaction start time disagrees with the register clock.
    ///
    /// Only a faulty [`TransactionStrategy`](crate::TransactionStrategy)
    /// produces this. The register is left untouched, but retrying with the
    /// same strategy fails the same way, so callers should abort the run.
    #[error("transaction start time {actual} does not match register time {expected}")]
    ClockMismatch {
        expected: TimeStep,
        actual: TimeStep,
    },
}

/// Broad classification of a [`CheckoutError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingArgument,
    InvalidArgument,
    /// A component broke its contract. Not recoverable by retrying.
    InternalConsistency,
}

impl CheckoutError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Missing { .. } => ErrorKind::MissingArgument,
            Self::InvalidDiscount(_)
            | Self::InvalidItem(_)
            | Self::InvalidTimeSteps
            | Self::TimeOverflow { .. }
            | Self::CostOverflow
            | Self::AdmissionRejected { .. }
            | Self::InvalidConfig(_) => ErrorKind::InvalidArgument,
            Self::ClockMismatch { .. } => ErrorKind::InternalConsistency,
        }
    }
}
