use anyhow::Context;
use async_trait::async_trait;
use deadpool_postgres::{Object, Pool, PoolConfig, Runtime};
use tokio_postgres::NoTls;
use tracing::info;

use super::TransactionStore;
use crate::{
    error::LedgerError,
    ledger::Mutator,
    model::{Balance, ClientId, Transaction, TransactionKind},
    schema,
};

/// Relational store. The atomic update holds a row lock on the client for the
/// whole read-modify-write and commits balance and log entry together.
pub struct PostgresStore {
    pool: Pool,
}

impl PostgresStore {
    pub fn connect(url: &str, pool_size: usize) -> anyhow::Result<PostgresStore> {
        let mut cfg = deadpool_postgres::Config::new();
        cfg.url = Some(url.to_string());
        cfg.pool = PoolConfig::new(pool_size).into();
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .context("error creating pg pool")?;
        Ok(PostgresStore { pool })
    }

    /// Creates the tables if they are missing. Instances booting together
    /// take turns on an advisory lock, since concurrent `CREATE ... IF NOT EXISTS`
    /// can still collide in the catalog.
    pub async fn mount(&self) -> anyhow::Result<()> {
        let mut conn = self.pool.get().await.context("error getting db conn")?;
        let tx = conn
            .transaction()
            .await
            .context("error opening transaction")?;
        tx.execute("SELECT pg_advisory_xact_lock($1)", &[&schema::MOUNT_LOCK_KEY])
            .await
            .context("error taking schema lock")?;
        tx.batch_execute(schema::DDL)
            .await
            .context("error mounting schema")?;
        tx.commit().await.context("error committing schema")?;
        info!("schema mounted");
        Ok(())
    }

    async fn conn(&self) -> Result<Object, LedgerError> {
        Ok(self.pool.get().await.context("error getting db conn")?)
    }
}

#[async_trait]
impl TransactionStore for PostgresStore {
    async fn clear(&self) -> Result<(), LedgerError> {
        self.conn()
            .await?
            .batch_execute("DELETE FROM transacoes; DELETE FROM clientes;")
            .await
            .context("error clearing tables")?;
        Ok(())
    }

    async fn add_client(&self, id: ClientId, balance: i64, limit: i64) -> Result<(), LedgerError> {
        self.conn()
            .await?
            .execute(
                "INSERT INTO clientes (id, saldo, limite) VALUES ($1, $2, $3)",
                &[&id, &balance, &limit],
            )
            .await
            .with_context(|| format!("error adding client {id}"))?;
        Ok(())
    }

    async fn provision_client(&self, id: ClientId, limit: i64) -> Result<bool, LedgerError> {
        let inserted = self
            .conn()
            .await?
            .execute(
                "INSERT INTO clientes (id, saldo, limite) VALUES ($1, 0, $2)
                ON CONFLICT (id) DO NOTHING",
                &[&id, &limit],
            )
            .await
            .with_context(|| format!("error provisioning client {id}"))?;
        Ok(inserted == 1)
    }

    async fn get_balance(&self, id: ClientId) -> Result<Balance, LedgerError> {
        let row = self
            .conn()
            .await?
            .query_opt("SELECT saldo, limite FROM clientes WHERE id = $1", &[&id])
            .await
            .context("error querying balance")?
            .ok_or(LedgerError::ClientNotFound)?;

        Ok(Balance {
            balance: row.get(0),
            limit: row.get(1),
        })
    }

    async fn get_transactions(
        &self,
        id: ClientId,
        limit: usize,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let conn = self.conn().await?;
        let stmt = conn
            .prepare_cached(
                "SELECT valor, tipo, descricao, realizada_em FROM transacoes
                WHERE id_cliente = $1
                ORDER BY realizada_em DESC, id DESC
                LIMIT $2",
            )
            .await
            .context("error preparing stmt (transactions)")?;

        let limit = i64::try_from(limit).context("statement limit out of range")?;
        let rows = conn
            .query(&stmt, &[&id, &limit])
            .await
            .context("error querying transactions")?;

        let mut transactions = Vec::with_capacity(rows.len());
        for row in rows {
            let code: String = row.get(1);
            transactions.push(Transaction {
                amount: row.get(0),
                kind: TransactionKind::from_code(&code)
                    .with_context(|| format!("unknown transaction type {code:?}"))?,
                description: row.get(2),
                created_at: row.get(3),
            });
        }
        Ok(transactions)
    }

    async fn apply_transaction_atomically(
        &self,
        id: ClientId,
        transaction: Transaction,
        mutator: Mutator,
    ) -> Result<Balance, LedgerError> {
        let mut conn = self.conn().await?;
        // dropping `tx` without commit rolls back and releases the row lock
        let tx = conn
            .transaction()
            .await
            .context("error opening transaction")?;

        let row = tx
            .query_opt(
                "SELECT saldo, limite FROM clientes WHERE id = $1 FOR UPDATE",
                &[&id],
            )
            .await
            .context("error locking client row")?
            .ok_or(LedgerError::ClientNotFound)?;
        let current = Balance {
            balance: row.get(0),
            limit: row.get(1),
        };

        let updated = mutator(current, &transaction)?;

        tx.execute(
            "INSERT INTO transacoes (id_cliente, valor, tipo, descricao, realizada_em)
            VALUES ($1, $2, $3, $4, $5)",
            &[
                &id,
                &transaction.amount,
                &transaction.kind.code(),
                &transaction.description,
                &transaction.created_at,
            ],
        )
        .await
        .context("error inserting transaction")?;

        tx.execute(
            "UPDATE clientes SET saldo = $2 WHERE id = $1",
            &[&id, &updated.balance],
        )
        .await
        .context("error updating balance")?;

        tx.commit().await.context("error committing transaction")?;
        Ok(updated)
    }
}
