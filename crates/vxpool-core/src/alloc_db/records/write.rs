//! Allocation write operations: bulk insert/delete and per-row updates.

use anyhow::Result;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use super::super::types::Vni;

/// Insert `vnis` as unallocated rows in one statement. Returns rows inserted.
pub(crate) async fn insert_free_chunk(conn: &mut SqliteConnection, vnis: &[Vni]) -> Result<u64> {
    if vnis.is_empty() {
        return Ok(0);
    }
    let mut qb = QueryBuilder::<Sqlite>::new("INSERT INTO vni_allocations (vni, allocated) ");
    qb.push_values(vnis, |mut b, vni| {
        b.push_bind(*vni).push_bind(false);
    });
    let done = qb.build().execute(&mut *conn).await?;
    Ok(done.rows_affected())
}

/// Delete the rows keyed by `vnis` in one statement. Returns rows deleted.
pub(crate) async fn delete_chunk(conn: &mut SqliteConnection, vnis: &[Vni]) -> Result<u64> {
    if vnis.is_empty() {
        return Ok(0);
    }
    let mut qb = QueryBuilder::<Sqlite>::new("DELETE FROM vni_allocations WHERE vni IN (");
    let mut sep = qb.separated(", ");
    for vni in vnis {
        sep.push_bind(*vni);
    }
    sep.push_unseparated(")");
    let done = qb.build().execute(&mut *conn).await?;
    Ok(done.rows_affected())
}

/// Set the allocated flag of one row. Returns rows updated (0 if untracked).
pub(crate) async fn set_allocated(conn: &mut SqliteConnection, vni: Vni, allocated: bool) -> Result<u64> {
    let done = sqlx::query(
        r#"
        UPDATE vni_allocations
        SET allocated = ?1
        WHERE vni = ?2
        "#,
    )
    .bind(allocated)
    .bind(vni)
    .execute(&mut *conn)
    .await?;
    Ok(done.rows_affected())
}

pub(crate) async fn delete_one(conn: &mut SqliteConnection, vni: Vni) -> Result<u64> {
    let done = sqlx::query(
        r#"
        DELETE FROM vni_allocations
        WHERE vni = ?1
        "#,
    )
    .bind(vni)
    .execute(&mut *conn)
    .await?;
    Ok(done.rows_affected())
}
