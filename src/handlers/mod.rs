use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::store::TransactionStore;

pub mod extrato;
pub mod inserir_transacao;

pub fn router<S: TransactionStore>(store: Arc<S>) -> Router {
    Router::new()
        .route("/clientes/:id/transacoes", post(inserir_transacao::handler::<S>))
        .route("/clientes/:id/extrato", get(extrato::handler::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
