mod common;
use common::{at, crew, hours, services};
use fieldops::core::sync::{MemoryRemote, SyncService};
use fieldops::core::timer::TimerLogic;
use fieldops::errors::AppError;
use fieldops::models::collection::Collection;
use fieldops::models::entry::Entry;
use serde_json::{Value, json};

/// Entry #77 as another device would have pushed it.
fn tablet_entry(c: &common::Crew) -> Value {
    json!({
        "id": 77,
        "userId": c.worker.id,
        "areaId": c.area_id,
        "start": "2025-03-10T07:00:00Z",
        "end": "2025-03-10T08:00:00Z",
        "durationMs": 3_600_000,
        "note": "von Tablet",
        "day": "2025-03-10",
        "createdAt": "2025-03-10T08:00:00Z"
    })
}

#[test]
fn test_first_push_sends_everything_then_only_changes() {
    let (svc, clock) = services();
    let c = crew(&svc);
    let remote = MemoryRemote::new();
    let sync = SyncService::new(&svc, &remote);

    assert_eq!(sync.push_changes(Collection::Users).unwrap(), 4);
    assert_eq!(remote.len(Collection::Users), 4);
    assert!(sync.watermark(Collection::Users).unwrap().pushed.is_some());

    assert!(remote.is_empty(Collection::Entries));
    TimerLogic::start(&svc, &c.worker, c.area_id, "", false).unwrap();
    clock.advance(hours(1));
    let entry = TimerLogic::stop(&svc, &c.worker, false).unwrap().entry;

    assert_eq!(sync.push_changes(Collection::Entries).unwrap(), 1);
    let pushed = remote.get(Collection::Entries, entry.id).unwrap();
    assert_eq!(pushed["durationMs"], 3_600_000);
}

#[test]
fn test_pull_upserts_by_id() {
    let (svc, _clock) = services();
    let c = crew(&svc);
    let remote = MemoryRemote::new();

    remote
        .insert(Collection::Entries, tablet_entry(&c), at(2025, 3, 10, 9, 0))
        .unwrap();

    let sync = SyncService::new(&svc, &remote);
    assert_eq!(sync.pull_changes(Collection::Entries).unwrap(), 1);

    let e: Entry = svc.store.require(77).unwrap();
    assert_eq!(e.note, "von Tablet");
    assert!(!e.published);
}

#[test]
fn test_settings_are_not_synchronised() {
    let (svc, _clock) = services();
    let remote = MemoryRemote::new();
    let sync = SyncService::new(&svc, &remote);
    assert!(matches!(
        sync.push_changes(Collection::Settings),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn test_sync_all_needs_executive() {
    let (svc, _clock) = services();
    let c = crew(&svc);
    let remote = MemoryRemote::new();
    let sync = SyncService::new(&svc, &remote);

    assert!(matches!(
        sync.sync_all(&c.manager),
        Err(AppError::Forbidden(_))
    ));

    let report = sync.sync_all(&c.admin).unwrap();
    assert_eq!(report.collections.len(), Collection::KEYED.len());
    assert!(report.collections.contains(&(Collection::Users, 4, 4)));
}

#[test]
fn test_pulled_records_are_not_pushed_back() {
    let (svc, clock) = services();
    let c = crew(&svc);
    let remote = MemoryRemote::new();
    let sync = SyncService::new(&svc, &remote);

    assert_eq!(sync.push_changes(Collection::Entries).unwrap(), 0);
    remote
        .insert(Collection::Entries, tablet_entry(&c), at(2025, 3, 10, 9, 0))
        .unwrap();
    assert_eq!(sync.pull_changes(Collection::Entries).unwrap(), 1);
    assert_eq!(sync.push_changes(Collection::Entries).unwrap(), 0);

    // local work after the pull still goes out
    TimerLogic::start(&svc, &c.worker, c.area_id, "", false).unwrap();
    clock.advance(hours(1));
    TimerLogic::stop(&svc, &c.worker, false).unwrap();
    assert_eq!(sync.push_changes(Collection::Entries).unwrap(), 1);
}

#[test]
fn test_malformed_pull_writes_nothing() {
    let (svc, _clock) = services();
    let c = crew(&svc);
    let remote = MemoryRemote::new();
    remote
        .insert(Collection::Entries, tablet_entry(&c), at(2025, 3, 10, 9, 0))
        .unwrap();
    remote
        .insert(
            Collection::Entries,
            json!({ "id": 78, "note": "halb" }),
            at(2025, 3, 10, 9, 0),
        )
        .unwrap();

    let sync = SyncService::new(&svc, &remote);
    assert!(matches!(
        sync.pull_changes(Collection::Entries),
        Err(AppError::Validation(_))
    ));
    assert_eq!(svc.store.count(Collection::Entries).unwrap(), 0);
    assert!(svc.store.list::<Entry>().is_ok());
}
