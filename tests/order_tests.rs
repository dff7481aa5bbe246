mod common;
use chrono::Duration;
use common::{at, crew, hours, services};
use fieldops::core::files::FileLogic;
use fieldops::core::orders::{OrderDraft, OrderEdit, OrderFilter, OrderLogic};
use fieldops::core::services::Services;
use fieldops::errors::AppError;
use fieldops::models::entry::Entry;
use fieldops::models::order::{Order, OrderStatus};

fn plan(svc: &Services, c: &common::Crew, title: &str) -> Order {
    OrderLogic::create(
        svc,
        &c.manager,
        OrderDraft {
            title: title.to_string(),
            area_id: c.area_id,
            assigned_to: c.worker.id,
            start_plan: Some(at(2025, 3, 10, 9, 0)),
            end_plan: Some(at(2025, 3, 10, 11, 0)),
            address: Some("Hauptstr. 5".into()),
            ..OrderDraft::default()
        },
    )
    .unwrap()
}

#[test]
fn test_lifecycle_produces_matching_entry() {
    let (svc, clock) = services();
    let c = crew(&svc);
    let order = plan(&svc, &c, "Büro Müller");
    assert_eq!(order.status, OrderStatus::Planned);

    let started = OrderLogic::start(&svc, &c.worker, order.id).unwrap();
    assert_eq!(started.order.status, OrderStatus::Started);
    assert!(started.location.is_some(), "no locator configured");

    clock.advance(Duration::minutes(100));
    let finished = OrderLogic::stop(&svc, &c.worker, order.id).unwrap();
    assert!(finished.is_complete());
    let (order, entry) = finished.into_entry().unwrap();

    assert_eq!(order.status, OrderStatus::Finished);
    assert_eq!(entry.user_id, order.assigned_to);
    assert_eq!(entry.area_id, order.area_id);
    assert_eq!(Some(entry.start), order.start_real);
    assert_eq!(Some(entry.end), order.end_real);
    assert_eq!(entry.duration_ms, 100 * 60_000);
    assert_eq!(entry.note, "Einsatz: Büro Müller");
}

#[test]
fn test_stop_before_start_is_rejected() {
    let (svc, _clock) = services();
    let c = crew(&svc);
    let order = plan(&svc, &c, "A");

    assert!(matches!(
        OrderLogic::stop(&svc, &c.worker, order.id),
        Err(AppError::Validation(_))
    ));
    assert!(svc.store.list::<Entry>().unwrap().is_empty());
}

#[test]
fn test_double_stop_writes_two_entries() {
    let (svc, clock) = services();
    let c = crew(&svc);
    let order = plan(&svc, &c, "A");

    OrderLogic::start(&svc, &c.worker, order.id).unwrap();
    clock.advance(hours(1));
    OrderLogic::stop(&svc, &c.worker, order.id).unwrap();
    clock.advance(hours(1));
    OrderLogic::stop(&svc, &c.worker, order.id).unwrap();

    let entries: Vec<Entry> = svc.store.list().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].duration_ms, 2 * 3_600_000);
}

#[test]
fn test_zero_length_stop_is_partial() {
    let (svc, _clock) = services();
    let c = crew(&svc);
    let order = plan(&svc, &c, "A");

    OrderLogic::start(&svc, &c.worker, order.id).unwrap();
    let finished = OrderLogic::stop(&svc, &c.worker, order.id).unwrap();
    assert!(!finished.is_complete());
    assert!(finished.entry_error.is_some());

    // the order write is kept
    let stored: Order = svc.store.require(order.id).unwrap();
    assert_eq!(stored.status, OrderStatus::Finished);

    assert!(matches!(
        finished.into_entry(),
        Err(AppError::PartialFailure(_))
    ));
}

#[test]
fn test_record_entry_reconciles_finished_order() {
    let (svc, clock) = services();
    let c = crew(&svc);
    let order = plan(&svc, &c, "A");

    assert!(matches!(
        OrderLogic::record_entry(&svc, &c.manager, order.id),
        Err(AppError::Validation(_))
    ));

    OrderLogic::start(&svc, &c.worker, order.id).unwrap();
    clock.advance(hours(1));
    OrderLogic::stop(&svc, &c.worker, order.id).unwrap();

    let entry = OrderLogic::record_entry(&svc, &c.manager, order.id).unwrap();
    assert_eq!(entry.duration_ms, 3_600_000);
    assert!(matches!(
        OrderLogic::record_entry(&svc, &c.worker, order.id),
        Err(AppError::Forbidden(_))
    ));
}

#[test]
fn test_sign_confirms_and_stop_keeps_confirmed() {
    let (svc, clock) = services();
    let c = crew(&svc);
    let order = plan(&svc, &c, "A");
    let sig = FileLogic::save(&svc, "data:image/png;base64,iVBORw0KGgo=").unwrap();

    assert!(matches!(
        OrderLogic::sign(&svc, &c.worker, order.id, 999),
        Err(AppError::NotFound { .. })
    ));

    let signed = OrderLogic::sign(&svc, &c.worker, order.id, sig.id).unwrap();
    assert_eq!(signed.status, OrderStatus::Confirmed);
    assert_eq!(signed.signature, Some(sig.id));

    let restarted = OrderLogic::start(&svc, &c.worker, order.id).unwrap();
    assert_eq!(restarted.order.status, OrderStatus::Confirmed);

    clock.advance(hours(1));
    let finished = OrderLogic::stop(&svc, &c.worker, order.id).unwrap();
    assert_eq!(finished.order.status, OrderStatus::Confirmed);
}

#[test]
fn test_photos_append() {
    let (svc, _clock) = services();
    let c = crew(&svc);
    let order = plan(&svc, &c, "A");
    let p1 = FileLogic::save(&svc, "data:image/jpeg;base64,AAAA").unwrap();
    let p2 = FileLogic::save(&svc, "data:image/jpeg;base64,BBBB").unwrap();

    OrderLogic::attach_photo(&svc, &c.worker, order.id, p1.id).unwrap();
    let o = OrderLogic::attach_photo(&svc, &c.worker, order.id, p2.id).unwrap();
    assert_eq!(o.photos, vec![p1.id, p2.id]);
}

#[test]
fn test_only_assignee_or_manager_may_execute() {
    let (svc, _clock) = services();
    let c = crew(&svc);
    let order = plan(&svc, &c, "A");

    assert!(matches!(
        OrderLogic::start(&svc, &c.other, order.id),
        Err(AppError::Forbidden(_))
    ));
    assert!(OrderLogic::start(&svc, &c.manager, order.id).is_ok());
}

#[test]
fn test_plan_is_validated() {
    let (svc, _clock) = services();
    let c = crew(&svc);

    let bad_window = OrderDraft {
        title: "A".into(),
        area_id: c.area_id,
        assigned_to: c.worker.id,
        start_plan: Some(at(2025, 3, 10, 11, 0)),
        end_plan: Some(at(2025, 3, 10, 9, 0)),
        ..OrderDraft::default()
    };
    assert!(matches!(
        OrderLogic::create(&svc, &c.manager, bad_window),
        Err(AppError::Validation(_))
    ));

    let unknown_user = OrderDraft {
        title: "A".into(),
        area_id: c.area_id,
        assigned_to: 999,
        ..OrderDraft::default()
    };
    assert!(matches!(
        OrderLogic::create(&svc, &c.manager, unknown_user),
        Err(AppError::NotFound { .. })
    ));

    let by_worker = OrderDraft {
        title: "A".into(),
        area_id: c.area_id,
        assigned_to: c.worker.id,
        ..OrderDraft::default()
    };
    assert!(matches!(
        OrderLogic::create(&svc, &c.worker, by_worker),
        Err(AppError::Forbidden(_))
    ));
}

#[test]
fn test_edit_keeps_status() {
    let (svc, _clock) = services();
    let c = crew(&svc);
    let order = plan(&svc, &c, "A");
    OrderLogic::start(&svc, &c.worker, order.id).unwrap();

    let edited = OrderLogic::edit(
        &svc,
        &c.manager,
        order.id,
        OrderEdit {
            title: Some("B".into()),
            assigned_to: Some(c.other.id),
            ..OrderEdit::default()
        },
    )
    .unwrap();
    assert_eq!(edited.title, "B");
    assert_eq!(edited.assigned_to, c.other.id);
    assert_eq!(edited.status, OrderStatus::Started);
}

#[test]
fn test_list_filters_and_sorts() {
    let (svc, _clock) = services();
    let c = crew(&svc);

    let mk = |title: &str, who: i64, day: Option<u32>| {
        OrderLogic::create(
            &svc,
            &c.manager,
            OrderDraft {
                title: title.into(),
                area_id: c.area_id,
                assigned_to: who,
                start_plan: day.map(|d| at(2025, 3, d, 9, 0)),
                ..OrderDraft::default()
            },
        )
        .unwrap()
    };
    mk("late", c.worker.id, Some(20));
    mk("early", c.worker.id, Some(5));
    mk("someone else", c.other.id, Some(12));
    mk("unplanned", c.worker.id, None);

    let mine = OrderLogic::list(
        &svc,
        &c.worker,
        &OrderFilter {
            mine: true,
            ..OrderFilter::default()
        },
    )
    .unwrap();
    let titles: Vec<&str> = mine.iter().map(|o| o.title.as_str()).collect();
    assert_eq!(titles, vec!["unplanned", "early", "late"]);

    let window = OrderLogic::list(
        &svc,
        &c.manager,
        &OrderFilter {
            mine: false,
            from: Some(chrono::NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()),
            to: Some(chrono::NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()),
        },
    )
    .unwrap();
    let titles: Vec<&str> = window.iter().map(|o| o.title.as_str()).collect();
    assert_eq!(titles, vec!["unplanned", "someone else", "late"]);
}
