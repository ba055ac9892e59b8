use std::{
    collections::{hash_map::Entry, HashMap},
    sync::{Mutex, MutexGuard},
};

use anyhow::anyhow;
use async_trait::async_trait;

use super::TransactionStore;
use crate::{
    error::LedgerError,
    ledger::Mutator,
    model::{Balance, ClientId, Transaction},
};

#[derive(Default)]
struct Ledger {
    balances: HashMap<ClientId, Balance>,
    transactions: HashMap<ClientId, Vec<Transaction>>,
}

/// Process-local store. One lock covers every client, reads included, so a
/// reader never sees a balance without its matching transaction.
#[derive(Default)]
pub struct InMemoryStore {
    ledger: Mutex<Ledger>,
}

impl InMemoryStore {
    pub fn new() -> InMemoryStore {
        InMemoryStore::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Ledger>, LedgerError> {
        self.ledger
            .lock()
            .map_err(|_| LedgerError::Internal(anyhow!("ledger lock poisoned")))
    }
}

#[async_trait]
impl TransactionStore for InMemoryStore {
    async fn clear(&self) -> Result<(), LedgerError> {
        let mut ledger = self.lock()?;
        ledger.balances.clear();
        ledger.transactions.clear();
        Ok(())
    }

    async fn add_client(&self, id: ClientId, balance: i64, limit: i64) -> Result<(), LedgerError> {
        match self.lock()?.balances.entry(id) {
            Entry::Occupied(_) => Err(LedgerError::Internal(anyhow!("client {id} already exists"))),
            Entry::Vacant(slot) => {
                slot.insert(Balance { limit, balance });
                Ok(())
            }
        }
    }

    async fn provision_client(&self, id: ClientId, limit: i64) -> Result<bool, LedgerError> {
        match self.lock()?.balances.entry(id) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(Balance { limit, balance: 0 });
                Ok(true)
            }
        }
    }

    async fn get_balance(&self, id: ClientId) -> Result<Balance, LedgerError> {
        self.lock()?
            .balances
            .get(&id)
            .copied()
            .ok_or(LedgerError::ClientNotFound)
    }

    async fn get_transactions(
        &self,
        id: ClientId,
        limit: usize,
    ) -> Result<Vec<Transaction>, LedgerError> {
        Ok(match self.lock()?.transactions.get(&id) {
            Some(log) => log.iter().rev().take(limit).cloned().collect(),
            None => Vec::new(),
        })
    }

    async fn apply_transaction_atomically(
        &self,
        id: ClientId,
        transaction: Transaction,
        mutator: Mutator,
    ) -> Result<Balance, LedgerError> {
        let mut ledger = self.lock()?;

        let current = *ledger
            .balances
            .get(&id)
            .ok_or(LedgerError::ClientNotFound)?;
        let updated = mutator(current, &transaction)?;

        ledger.balances.insert(id, updated);
        // oldest first; equal timestamps stay in insertion order
        let log = ledger.transactions.entry(id).or_default();
        let at = log.partition_point(|t| t.created_at <= transaction.created_at);
        log.insert(at, transaction);
        Ok(updated)
    }
}
