use chrono::{DateTime, Utc};
use serde::Deserialize;

pub type ClientId = i32;

/// Snapshot of a client's account. `balance` never goes below `-limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    pub limit: i64,
    pub balance: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "c")]
    Credit,
    #[serde(rename = "d")]
    Debit,
}

impl TransactionKind {
    pub fn code(&self) -> &'static str {
        match self {
            TransactionKind::Credit => "c",
            TransactionKind::Debit => "d",
        }
    }

    pub fn from_code(code: &str) -> Option<TransactionKind> {
        match code.trim() {
            "c" => Some(TransactionKind::Credit),
            "d" => Some(TransactionKind::Debit),
            _ => None,
        }
    }
}

/// A ledger entry. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub amount: i64,
    pub kind: TransactionKind,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(amount: i64, kind: TransactionKind, description: impl Into<String>) -> Transaction {
        Transaction {
            amount,
            kind,
            description: description.into(),
            created_at: Utc::now(),
        }
    }
}
