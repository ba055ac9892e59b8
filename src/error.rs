use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid transaction payload")]
    InvalidTransaction,
    #[error("insufficient limit for this debit")]
    InsufficientLimit,
    #[error("client not found")]
    ClientNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = match &self {
            LedgerError::InvalidTransaction | LedgerError::InsufficientLimit => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            LedgerError::ClientNotFound => StatusCode::NOT_FOUND,
            LedgerError::Internal(e) => {
                error!("request failed: {e:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        status.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_error_kinds_to_status_codes() {
        let cases = [
            (LedgerError::InvalidTransaction, StatusCode::UNPROCESSABLE_ENTITY),
            (LedgerError::InsufficientLimit, StatusCode::UNPROCESSABLE_ENTITY),
            (LedgerError::ClientNotFound, StatusCode::NOT_FOUND),
            (
                LedgerError::Internal(anyhow::anyhow!("connection reset")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
