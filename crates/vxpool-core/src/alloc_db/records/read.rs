//! Allocation read operations.

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use super::super::db::AllocDb;
use super::super::types::{AllocationCounts, Vni, VniAllocation};

fn from_row(row: &SqliteRow) -> VniAllocation {
    VniAllocation {
        vni: row.get("vni"),
        allocated: row.get("allocated"),
    }
}

/// Every row, ascending by VNI.
pub(crate) async fn fetch_all_ordered(conn: &mut SqliteConnection) -> Result<Vec<VniAllocation>> {
    let rows = sqlx::query(
        r#"
        SELECT vni, allocated
        FROM vni_allocations
        ORDER BY vni ASC
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}

pub(crate) async fn fetch_one(conn: &mut SqliteConnection, vni: Vni) -> Result<Option<VniAllocation>> {
    let row = sqlx::query(
        r#"
        SELECT vni, allocated
        FROM vni_allocations
        WHERE vni = ?1
        "#,
    )
    .bind(vni)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.as_ref().map(from_row))
}

impl AllocDb {
    /// Fetch a single allocation row.
    pub async fn get_allocation(&self, vni: Vni) -> Result<Option<VniAllocation>> {
        let mut conn = self.pool.acquire().await?;
        fetch_one(&mut conn, vni).await
    }

    /// List rows ascending by VNI, optionally only the allocated ones.
    pub async fn list_allocations(&self, only_allocated: bool) -> Result<Vec<VniAllocation>> {
        let rows = sqlx::query(
            r#"
            SELECT vni, allocated
            FROM vni_allocations
            WHERE allocated = 1 OR ?1 = 0
            ORDER BY vni ASC
            "#,
        )
        .bind(only_allocated)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(from_row).collect())
    }

    pub async fn count_allocations(&self) -> Result<AllocationCounts> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total,
                   COALESCE(SUM(CASE WHEN allocated THEN 1 ELSE 0 END), 0) AS allocated
            FROM vni_allocations
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(AllocationCounts {
            total: row.get("total"),
            allocated: row.get("allocated"),
        })
    }
}
