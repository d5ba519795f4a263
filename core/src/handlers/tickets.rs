use std::path::Path;

use anyhow::{bail, Context};
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags};

use crate::util::write_atomic_str;

const GOLD_TOTAL_SQL: &str = "SELECT SUM(units * price) FROM tickets WHERE type = 'Gold'";

/// Render a SQL sum the way it reads back as a number: integers as-is, reals
/// always with a fractional part, NULL (no rows) as zero.
fn render_total(value: Value) -> anyhow::Result<String> {
    Ok(match value {
        Value::Null => "0".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Real(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
            format!("{x:.1}")
        }
        Value::Real(x) => x.to_string(),
        other => bail!("unexpected SUM result type: {:?}", other.data_type()),
    })
}

pub fn query_gold_total(conn: &Connection) -> anyhow::Result<String> {
    let value: Value = conn
        .query_row(GOLD_TOTAL_SQL, [], |row| row.get(0))
        .context("gold ticket query failed")?;
    render_total(value)
}

pub fn gold_ticket_sales(db: &Path, output: &Path) -> anyhow::Result<String> {
    // Read-only: the ticket store is an input and must not be created or modified.
    let conn = Connection::open_with_flags(
        db,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("failed to open ticket store {}", db.display()))?;

    let total = query_gold_total(&conn)?;
    write_atomic_str(output, &total)?;
    Ok(total)
}
