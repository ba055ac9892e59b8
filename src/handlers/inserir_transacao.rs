use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::LedgerError,
    ledger,
    model::{ClientId, Transaction, TransactionKind},
    store::TransactionStore,
};

#[derive(Deserialize)]
struct TransacaoDTO {
    pub valor: i64,
    pub tipo: TransactionKind,
    pub descricao: String,
}

#[derive(Serialize)]
pub struct TransacaoResultDTO {
    pub limite: i64,
    pub saldo: i64,
}

pub async fn handler<S: TransactionStore>(
    id_cliente: Result<Path<ClientId>, PathRejection>,
    State(store): State<Arc<S>>,
    payload: Bytes,
) -> Result<Json<TransacaoResultDTO>, LedgerError> {
    let Path(id_cliente) = id_cliente.map_err(|e| {
        debug!("rejecting client id: {e}");
        LedgerError::InvalidTransaction
    })?;

    let payload = serde_json::from_slice::<TransacaoDTO>(&payload).map_err(|e| {
        debug!(client = id_cliente, "rejecting payload: {e}");
        LedgerError::InvalidTransaction
    })?;

    let transacao = Transaction::new(payload.valor, payload.tipo, payload.descricao);
    let saldo = store
        .apply_transaction_atomically(id_cliente, transacao, ledger::apply)
        .await?;

    Ok(Json(TransacaoResultDTO {
        limite: saldo.limit,
        saldo: saldo.balance,
    }))
}
