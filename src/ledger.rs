//! Pure balance rules: request validation and the credit-limit check.
//!
//! Both functions are side-effect free. Stores call [`apply`] exactly once per
//! accepted request, while holding whatever lock makes the update atomic.

use crate::{
    error::LedgerError,
    model::{Balance, Transaction, TransactionKind},
};

/// Description length is counted in `char`s, not bytes.
pub const MAX_DESCRIPTION_CHARS: usize = 10;

/// Signature stores accept for the read-modify-write step.
pub type Mutator = fn(Balance, &Transaction) -> Result<Balance, LedgerError>;

pub fn validate(transaction: &Transaction) -> bool {
    if transaction.amount <= 0 {
        return false;
    }

    let description_len = transaction.description.chars().count();
    (1..=MAX_DESCRIPTION_CHARS).contains(&description_len)
}

pub fn apply(balance: Balance, transaction: &Transaction) -> Result<Balance, LedgerError> {
    if !validate(transaction) {
        return Err(LedgerError::InvalidTransaction);
    }

    let updated = match transaction.kind {
        TransactionKind::Credit => balance
            .balance
            .checked_add(transaction.amount)
            .ok_or(LedgerError::InvalidTransaction)?,
        TransactionKind::Debit => {
            let candidate = balance
                .balance
                .checked_sub(transaction.amount)
                .ok_or(LedgerError::InsufficientLimit)?;
            if candidate < balance.limit.saturating_neg() {
                return Err(LedgerError::InsufficientLimit);
            }
            candidate
        }
    };

    Ok(Balance {
        balance: updated,
        ..balance
    })
}
