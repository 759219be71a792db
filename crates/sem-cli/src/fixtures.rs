//! Seeds the embedded warehouse with small fixture tables matching the
//! demo entity descriptors, standing in for a bespoke seed script (§4.9).

use anyhow::{Context, Result};
use sem_db::DuckDbWarehouse;

const SEED_SQL: &str = r#"
CREATE SCHEMA IF NOT EXISTS analytics;

CREATE TABLE analytics.owners (
    id TEXT,
    name TEXT,
    segment TEXT,
    signed_up_at TIMESTAMP
);

INSERT INTO analytics.owners VALUES
    ('o1', 'Ada Okafor',    'enterprise', TIMESTAMP '2025-09-01 00:00:00'),
    ('o2', 'Bram Visser',   'smb',        TIMESTAMP '2025-10-12 00:00:00'),
    ('o3', 'Chioma Eze',    'enterprise', TIMESTAMP '2025-11-03 00:00:00'),
    ('o4', 'Dev Khatri',    'churned',    TIMESTAMP '2025-11-20 00:00:00'),
    ('o5', 'Elin Moberg',   'smb',        TIMESTAMP '2026-01-15 00:00:00');

CREATE TABLE analytics.accounts (
    id TEXT,
    owner_id TEXT,
    region TEXT,
    status TEXT,
    created_at TIMESTAMP,
    balance_usd DOUBLE
);

INSERT INTO analytics.accounts VALUES
    ('a1', 'o1', 'us-east', 'active',   TIMESTAMP '2026-01-05 00:00:00', 12000.50),
    ('a2', 'o1', 'us-east', 'active',   TIMESTAMP '2026-02-11 00:00:00',  4300.00),
    ('a3', 'o2', 'eu-west', 'active',   TIMESTAMP '2026-01-20 00:00:00',  900.25),
    ('a4', 'o2', 'eu-west', 'closed',   TIMESTAMP '2025-12-01 00:00:00',     0.00),
    ('a5', 'o3', 'us-east', 'active',   TIMESTAMP '2026-03-02 00:00:00', 30250.00),
    ('a6', 'o4', 'apac',    'active',   TIMESTAMP '2026-01-28 00:00:00',  1500.00),
    ('a7', 'o5', 'apac',    'active',   TIMESTAMP '2026-02-18 00:00:00',  7600.75),
    ('a8', NULL, 'us-east', 'pending',  TIMESTAMP '2026-03-10 00:00:00',     0.00);
"#;

/// Create and populate the demo schema in a fresh in-memory warehouse.
pub fn seed(warehouse: &DuckDbWarehouse) -> Result<()> {
    warehouse
        .execute_batch(SEED_SQL)
        .context("failed to seed the demo warehouse with fixture tables")
}
