use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::LedgerError,
    model::{Balance, ClientId, Transaction},
    store::{TransactionStore, STATEMENT_SIZE},
};

#[derive(Serialize)]
pub struct ExtratoDTO {
    pub saldo: ExtratoSaldoDTO,
    pub ultimas_transacoes: Vec<ExtratoTransacaoDTO>,
}

#[derive(Serialize)]
pub struct ExtratoSaldoDTO {
    pub total: i64,
    pub data_extrato: String,
    pub limite: i64,
}

#[derive(Serialize)]
pub struct ExtratoTransacaoDTO {
    pub valor: i64,
    pub tipo: &'static str,
    pub descricao: String,
    pub realizada_em: String,
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

impl ExtratoDTO {
    pub fn from(saldo: Balance, extrato: Vec<Transaction>) -> ExtratoDTO {
        ExtratoDTO {
            saldo: ExtratoSaldoDTO {
                total: saldo.balance,
                data_extrato: format_timestamp(Utc::now()),
                limite: saldo.limit,
            },
            ultimas_transacoes: extrato
                .into_iter()
                .map(|t| ExtratoTransacaoDTO {
                    valor: t.amount,
                    tipo: t.kind.code(),
                    descricao: t.description,
                    realizada_em: format_timestamp(t.created_at),
                })
                .collect(),
        }
    }
}

pub async fn handler<S: TransactionStore>(
    id_cliente: Result<Path<ClientId>, PathRejection>,
    State(store): State<Arc<S>>,
) -> Result<Json<ExtratoDTO>, LedgerError> {
    let Path(id_cliente) = id_cliente.map_err(|_| LedgerError::InvalidTransaction)?;

    let saldo = store.get_balance(id_cliente).await?;
    let extrato = store.get_transactions(id_cliente, STATEMENT_SIZE).await?;

    Ok(Json(ExtratoDTO::from(saldo, extrato)))
}
