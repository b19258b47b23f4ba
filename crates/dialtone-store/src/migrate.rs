use crate::error::{Result, StoreError};
use rusqlite::Connection;

/// Embedded migrations; the schema version is the number applied, kept in
/// the database header (`PRAGMA user_version`).
const MIGRATIONS: &[(&str, &str)] = &[(
    "001_init.sql",
    include_str!("../migrations/001_init.sql"),
)];

pub fn run_migrations(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    let current = schema_version(&tx)?;
    let available = MIGRATIONS.len() as i64;

    if current > available {
        return Err(StoreError::Migration(format!(
            "db version {} newer than available migrations {}",
            current, available
        )));
    }

    for (version, (name, sql)) in (1..).zip(MIGRATIONS.iter()).skip(current as usize) {
        tx.execute_batch(sql)
            .map_err(|err| StoreError::Migration(format!("{}: {}", name, err)))?;
        tx.pragma_update(None, "user_version", version)?;
    }

    tx.commit()?;
    Ok(())
}

pub fn schema_version(conn: &Connection) -> Result<i64> {
    let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}
