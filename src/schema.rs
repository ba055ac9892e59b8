use crate::model::ClientId;

/// The five accounts every deployment starts with, as `(id, limit)`.
pub const SEED_CLIENTS: [(ClientId, i64); 5] = [
    (1, 1000 * 100),
    (2, 800 * 100),
    (3, 10000 * 100),
    (4, 100000 * 100),
    (5, 5000 * 100),
];

/// `pg_advisory_xact_lock` key held while mounting the schema.
pub const MOUNT_LOCK_KEY: i64 = 0x7269_6e68_61;

pub const DDL: &str = "
    CREATE TABLE IF NOT EXISTS clientes (
        id INTEGER PRIMARY KEY,
        limite BIGINT NOT NULL,
        saldo BIGINT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS transacoes (
        id BIGSERIAL PRIMARY KEY,
        id_cliente INTEGER NOT NULL REFERENCES clientes (id),
        valor BIGINT NOT NULL,
        tipo CHAR(1) NOT NULL,
        descricao VARCHAR(10) NOT NULL,
        realizada_em TIMESTAMPTZ NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_extrato
        ON transacoes (id_cliente, realizada_em DESC, id DESC);
";
