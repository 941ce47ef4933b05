//! Player currency as an injected capability.
//!
//! Both minigames read and write the balance through [`BalanceStore`]; the
//! store itself lives with whoever owns the application state. Every
//! transition in this crate performs at most one mutation per call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Insufficient funds: need {required}, have {available}")]
pub struct InsufficientFunds {
    pub required: u64,
    pub available: u64,
}

/// Getter/setter pair over the player's currency
pub trait BalanceStore {
    fn balance(&self) -> u64;

    fn set_balance(&mut self, value: u64);

    /// Deduct `amount` in a single read-modify-write.
    ///
    /// Returns the new balance, or leaves the store untouched when the
    /// balance is too low.
    fn try_debit(&mut self, amount: u64) -> Result<u64, InsufficientFunds> {
        let available = self.balance();
        let remaining = available.checked_sub(amount).ok_or(InsufficientFunds {
            required: amount,
            available,
        })?;
        self.set_balance(remaining);
        Ok(remaining)
    }

    /// Add `amount` in a single read-modify-write (saturating)
    fn credit(&mut self, amount: u64) -> u64 {
        let updated = self.balance().saturating_add(amount);
        self.set_balance(updated);
        updated
    }
}

impl<B: BalanceStore + ?Sized> BalanceStore for &mut B {
    fn balance(&self) -> u64 {
        (**self).balance()
    }

    fn set_balance(&mut self, value: u64) {
        (**self).set_balance(value)
    }
}

/// In-memory balance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wallet(u64);

impl Wallet {
    pub fn new(amount: u64) -> Self {
        Self(amount)
    }
}

impl BalanceStore for Wallet {
    fn balance(&self) -> u64 {
        self.0
    }

    fn set_balance(&mut self, value: u64) {
        self.0 = value;
    }
}
