//! Tests for sync_allocations (in-memory DB).

use crate::alloc_db::db::open_memory;
use crate::alloc_db::{AllocDb, Vni, VniAllocation};
use crate::ranges::{parse_ranges, RangeSet};

use super::SyncStats;

fn set(entries: &[&str]) -> RangeSet {
    RangeSet::from_ranges(&parse_ranges(entries).unwrap())
}

async fn vnis(db: &AllocDb) -> Vec<Vni> {
    db.list_allocations(false)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.vni)
        .collect()
}

#[tokio::test]
async fn sync_populates_empty_table() {
    let db = open_memory().await.unwrap();
    let stats = db.sync_allocations(&set(&["100:102"]), 100).await.unwrap();
    assert_eq!(
        stats,
        SyncStats {
            added: 3,
            removed: 0,
            retained_outside: 0
        }
    );
    let rows = db.list_allocations(false).await.unwrap();
    assert_eq!(
        rows,
        vec![
            VniAllocation { vni: 100, allocated: false },
            VniAllocation { vni: 101, allocated: false },
            VniAllocation { vni: 102, allocated: false },
        ]
    );
}

#[tokio::test]
async fn sync_is_idempotent() {
    let db = open_memory().await.unwrap();
    let ranges = set(&["1:50", "40:60", "100:100"]);
    let first = db.sync_allocations(&ranges, 100).await.unwrap();
    assert_eq!(first.added, 61);

    let before = db.list_allocations(false).await.unwrap();
    let second = db.sync_allocations(&ranges, 100).await.unwrap();
    assert!(second.is_noop(), "{second:?}");
    assert_eq!(db.list_allocations(false).await.unwrap(), before);
}

#[tokio::test]
async fn sync_chunks_large_ranges() {
    let db = open_memory().await.unwrap();
    let stats = db.sync_allocations(&set(&["1:1050"]), 100).await.unwrap();
    assert_eq!(stats.added, 1050);
    assert_eq!(db.count_allocations().await.unwrap().total, 1050);

    let stats = db.sync_allocations(&set(&["1001:1050"]), 7).await.unwrap();
    assert_eq!(stats.removed, 1000);
    assert_eq!(stats.added, 0);
    assert_eq!(vnis(&db).await, (1001..=1050).collect::<Vec<Vni>>());
}

#[tokio::test]
async fn sync_zero_bulk_size_still_progresses() {
    let db = open_memory().await.unwrap();
    let stats = db.sync_allocations(&set(&["5:9"]), 0).await.unwrap();
    assert_eq!(stats.added, 5);
}

#[tokio::test]
async fn sync_oversized_bulk_size_stays_under_sqlite_variable_limit() {
    let db = open_memory().await.unwrap();
    let stats = db.sync_allocations(&set(&["1:40000"]), 40_000).await.unwrap();
    assert_eq!(stats.added, 40_000);

    let stats = db
        .sync_allocations(&set(&["39001:40000"]), usize::MAX)
        .await
        .unwrap();
    assert_eq!(stats.removed, 39_000);
    assert_eq!(stats.added, 0);
    assert_eq!(db.count_allocations().await.unwrap().total, 1000);
}

#[tokio::test]
async fn sync_keeps_allocated_rows_outside_new_ranges() {
    let db = open_memory().await.unwrap();
    db.sync_allocations(&set(&["100:102"]), 100).await.unwrap();
    db.allocate_specific(101).await.unwrap();

    let stats = db.sync_allocations(&set(&["200:201"]), 100).await.unwrap();
    assert_eq!(
        stats,
        SyncStats {
            added: 2,
            removed: 2,
            retained_outside: 1
        }
    );

    let rows = db.list_allocations(false).await.unwrap();
    assert_eq!(
        rows,
        vec![
            VniAllocation { vni: 101, allocated: true },
            VniAllocation { vni: 200, allocated: false },
            VniAllocation { vni: 201, allocated: false },
        ]
    );
}

#[tokio::test]
async fn sync_preserves_allocated_state_inside_ranges() {
    let db = open_memory().await.unwrap();
    db.sync_allocations(&set(&["1:5"]), 100).await.unwrap();
    db.allocate_specific(3).await.unwrap();

    let stats = db.sync_allocations(&set(&["1:8"]), 100).await.unwrap();
    assert_eq!(stats.added, 3);
    assert_eq!(stats.removed, 0);
    assert!(db.get_allocation(3).await.unwrap().unwrap().allocated);
    assert_eq!(db.count_allocations().await.unwrap().allocated, 1);
}

#[tokio::test]
async fn sync_with_empty_ranges_removes_all_free_rows() {
    let db = open_memory().await.unwrap();
    db.sync_allocations(&set(&["1:10"]), 100).await.unwrap();
    db.allocate_specific(4).await.unwrap();

    let stats = db.sync_allocations(&RangeSet::default(), 100).await.unwrap();
    assert_eq!(stats.removed, 9);
    assert_eq!(stats.retained_outside, 1);
    assert_eq!(vnis(&db).await, vec![4]);
}
