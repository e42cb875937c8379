//! Tests for alloc_db (use in-memory DB helper from db).

use crate::alloc_db::db::open_memory;
use crate::alloc_db::records::{delete_chunk, fetch_all_ordered, insert_free_chunk, set_allocated};
use crate::alloc_db::{AllocDb, AllocationCounts, VniAllocation};

#[tokio::test]
async fn bulk_insert_list_and_count() {
    let db = open_memory().await.unwrap();
    assert!(db.list_allocations(false).await.unwrap().is_empty());
    assert_eq!(db.count_allocations().await.unwrap(), AllocationCounts::default());

    let mut conn = db.pool.acquire().await.unwrap();
    assert_eq!(insert_free_chunk(&mut conn, &[30, 10, 20]).await.unwrap(), 3);
    assert_eq!(insert_free_chunk(&mut conn, &[]).await.unwrap(), 0);
    assert_eq!(set_allocated(&mut conn, 20, true).await.unwrap(), 1);
    assert_eq!(set_allocated(&mut conn, 99, true).await.unwrap(), 0);
    drop(conn);

    // Ascending by VNI regardless of insert order.
    let rows = db.list_allocations(false).await.unwrap();
    assert_eq!(
        rows,
        vec![
            VniAllocation { vni: 10, allocated: false },
            VniAllocation { vni: 20, allocated: true },
            VniAllocation { vni: 30, allocated: false },
        ]
    );
    let allocated = db.list_allocations(true).await.unwrap();
    assert_eq!(allocated, vec![VniAllocation { vni: 20, allocated: true }]);

    let counts = db.count_allocations().await.unwrap();
    assert_eq!(counts.total, 3);
    assert_eq!(counts.allocated, 1);
    assert_eq!(counts.free(), 2);
}

#[tokio::test]
async fn duplicate_vni_insert_is_rejected() {
    let db = open_memory().await.unwrap();
    let mut conn = db.pool.acquire().await.unwrap();
    insert_free_chunk(&mut conn, &[1, 2]).await.unwrap();
    assert!(insert_free_chunk(&mut conn, &[2, 3]).await.is_err());
    let rows = fetch_all_ordered(&mut conn).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn bulk_delete_by_key_set() {
    let db = open_memory().await.unwrap();
    let mut conn = db.pool.acquire().await.unwrap();
    insert_free_chunk(&mut conn, &[1, 2, 3, 4]).await.unwrap();
    assert_eq!(delete_chunk(&mut conn, &[2, 4, 8]).await.unwrap(), 2);
    assert_eq!(delete_chunk(&mut conn, &[]).await.unwrap(), 0);
    drop(conn);

    assert!(db.get_allocation(2).await.unwrap().is_none());
    assert_eq!(
        db.get_allocation(3).await.unwrap(),
        Some(VniAllocation { vni: 3, allocated: false })
    );
}

#[tokio::test]
async fn dropped_locked_transaction_rolls_back() {
    let db = open_memory().await.unwrap();
    {
        let mut tx = db.begin_locked().await.unwrap();
        insert_free_chunk(&mut *tx, &[5, 6]).await.unwrap();
    }
    assert!(db.list_allocations(false).await.unwrap().is_empty());
}

#[tokio::test]
async fn open_at_persists_across_handles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("alloc.db");
    let db = AllocDb::open_at(&path).await.unwrap();
    let mut conn = db.pool.acquire().await.unwrap();
    insert_free_chunk(&mut conn, &[42]).await.unwrap();
    drop(conn);
    db.close().await;

    let reopened = AllocDb::open_at(&path).await.unwrap();
    assert_eq!(
        reopened.get_allocation(42).await.unwrap(),
        Some(VniAllocation { vni: 42, allocated: false })
    );
}
