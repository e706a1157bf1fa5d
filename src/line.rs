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

//! Checkout lines.
//!
//! A [`CheckoutLine`] is a FIFO queue of shoppers guarded by an
//! [`AdmissionPolicy`]. The policy is checked again on every enqueue, so a
//! line never holds a shopper it would have turned away.

use crate::CheckoutError;
use crate::queue::{FifoQueue, Queue};
use crate::shopper::Shopper;
use std::sync::Arc;

/// Largest basket an express line accepts.
pub const EXPRESS_ITEM_LIMIT: usize = 15;

/// Rule deciding whether a shopper may join a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionPolicy {
    /// Everyone may join.
    Unrestricted,
    /// Only shoppers with at most this many items may join.
    MaxItems(usize),
}

impl AdmissionPolicy {
    pub fn admits(&self, shopper: &Shopper) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::MaxItems(limit) => shopper.groceries().len() <= *limit,
        }
    }
}

/// An admission-gated queue of shoppers.
///
/// Lines are meant to be driven from a single logical thread. The backing
/// queue tolerates shared access, but interleaving `can_enter_line` and
/// `enqueue` from several threads is not supported.
#[derive(Debug)]
pub struct CheckoutLine<Q = FifoQueue<Arc<Shopper>>> {
    policy: AdmissionPolicy,
    shoppers: Q,
}

impl CheckoutLine {
    /// A line that admits every shopper.
    pub fn unrestricted() -> Self {
        Self::with_queue(AdmissionPolicy::Unrestricted, FifoQueue::new())
    }

    /// A line for baskets of at most [`EXPRESS_ITEM_LIMIT`] items.
    pub fn express() -> Self {
        Self::with_queue(
            AdmissionPolicy::MaxItems(EXPRESS_ITEM_LIMIT),
            FifoQueue::new(),
        )
    }
}

impl<Q> CheckoutLine<Q>
where
    Q: Queue<Arc<Shopper>>,
{
    pub fn with_queue(policy: AdmissionPolicy, shoppers: Q) -> Self {
        Self { policy, shoppers }
    }

    pub fn policy(&self) -> AdmissionPolicy {
        self.policy
    }

    pub fn can_enter_line(&self, shopper: &Shopper) -> bool {
        self.policy.admits(shopper)
    }

    /// Adds `shopper` to the back of the line.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AdmissionRejected`] if the line's policy does
    /// not admit the shopper. The line is left unchanged.
    pub fn enqueue(&self, shopper: Arc<Shopper>) -> Result<(), CheckoutError> {
        if !self.can_enter_line(&shopper) {
            return Err(CheckoutError::AdmissionRejected {
                shopper: shopper.id(),
                items: shopper.groceries().len(),
            });
        }
        self.shoppers.enqueue(shopper);
        Ok(())
    }

    /// Removes the shopper at the front of the line, or `None` if it is empty.
    pub fn dequeue(&self) -> Option<Arc<Shopper>> {
        self.shoppers.dequeue()
    }

    pub fn len(&self) -> usize {
        self.shoppers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shoppers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grocery::GroceryItem;
    use crate::shopper::ShopperIdGenerator;
    use rust_decimal_macros::dec;

    fn shopper_with(ids: &mut ShopperIdGenerator, items: usize) -> Arc<Shopper> {
        let item = GroceryItem::new("milk", dec!(2.49), dec!(1));
        Arc::new(ids.create(&vec![item; items], 0))
    }

    #[test]
    fn policy_boundary_is_inclusive() {
        let mut ids = ShopperIdGenerator::new();
        let policy = AdmissionPolicy::MaxItems(EXPRESS_ITEM_LIMIT);

        assert!(policy.admits(&shopper_with(&mut ids, 0)));
        assert!(policy.admits(&shopper_with(&mut ids, 15)));
        assert!(!policy.admits(&shopper_with(&mut ids, 16)));
    }

    #[test]
    fn rejected_enqueue_leaves_line_untouched() {
        let mut ids = ShopperIdGenerator::new();
        let line = CheckoutLine::express();
        let small = shopper_with(&mut ids, 2);
        let large = shopper_with(&mut ids, 40);

        line.enqueue(Arc::clone(&small)).unwrap();
        let result = line.enqueue(Arc::clone(&large));

        assert_eq!(
            result,
            Err(CheckoutError::AdmissionRejected {
                shopper: large.id(),
                items: 40
            })
        );
        assert_eq!(line.len(), 1);
        assert_eq!(line.dequeue(), Some(small));
        assert!(line.is_empty());
    }

    #[test]
    fn presets_use_expected_policies() {
        assert_eq!(
            CheckoutLine::unrestricted().policy(),
            AdmissionPolicy::Unrestricted
        );
        assert_eq!(
            CheckoutLine::express().policy(),
            AdmissionPolicy::MaxItems(15)
        );
    }
}
