use async_trait::async_trait;
use tracing::info;

use crate::{
    error::LedgerError,
    ledger::Mutator,
    model::{Balance, ClientId, Transaction},
};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

/// How many transactions a statement carries.
pub const STATEMENT_SIZE: usize = 10;

/// Persistence for balances and the per-client transaction log.
///
/// `apply_transaction_atomically` is the only mutation path: it must serialize
/// concurrent callers for the same client and either persist both the new
/// balance and the transaction, or nothing.
#[async_trait]
pub trait TransactionStore: Send + Sync + 'static {
    /// Wipes all clients and transactions.
    async fn clear(&self) -> Result<(), LedgerError>;

    /// Fails if `id` already exists.
    async fn add_client(&self, id: ClientId, balance: i64, limit: i64) -> Result<(), LedgerError>;

    /// Adds `id` with a zero balance unless it already exists, in one step.
    /// Returns whether the client was added.
    async fn provision_client(&self, id: ClientId, limit: i64) -> Result<bool, LedgerError>;

    async fn get_balance(&self, id: ClientId) -> Result<Balance, LedgerError>;

    /// Newest first, at most `limit` entries.
    async fn get_transactions(
        &self,
        id: ClientId,
        limit: usize,
    ) -> Result<Vec<Transaction>, LedgerError>;

    async fn apply_transaction_atomically(
        &self,
        id: ClientId,
        transaction: Transaction,
        mutator: Mutator,
    ) -> Result<Balance, LedgerError>;
}

/// Provisions every `(id, limit)` pair that the store does not know yet, with a zero balance.
/// Safe to run from several instances at once.
pub async fn seed_clients<S: TransactionStore>(
    store: &S,
    clients: &[(ClientId, i64)],
) -> Result<(), LedgerError> {
    for &(id, limit) in clients {
        if store.provision_client(id, limit).await? {
            info!(client = id, limit, "seeded client");
        }
    }
    Ok(())
}
