mod common;
use common::{at, crew, hours, services};
use fieldops::core::aggregate::daily_summaries;
use fieldops::core::entries::{EntryEdit, EntryFilter, EntryLogic};
use fieldops::core::orders::{OrderDraft, OrderLogic};
use fieldops::core::review::{ReviewFlags, ReviewKind, ReviewLogic};
use fieldops::core::settings::SettingsLogic;
use fieldops::core::timer::TimerLogic;
use fieldops::errors::AppError;
use fieldops::models::entry::Entry;
use fieldops::models::order::{Order, OrderStatus};

#[test]
fn test_flags_toggle_independently() {
    let (svc, clock) = services();
    let c = crew(&svc);
    TimerLogic::start(&svc, &c.worker, c.area_id, "", false).unwrap();
    clock.advance(hours(1));
    let entry = TimerLogic::stop(&svc, &c.worker, false).unwrap().entry;

    // published without approval is allowed
    let item = ReviewLogic::set_review(
        &svc,
        &c.manager,
        ReviewKind::Entry,
        entry.id,
        ReviewFlags {
            approved: None,
            published: Some(true),
        },
    )
    .unwrap();
    assert!(!item.approved && item.published);

    ReviewLogic::set_review(
        &svc,
        &c.manager,
        ReviewKind::Entry,
        entry.id,
        ReviewFlags {
            approved: Some(true),
            published: Some(false),
        },
    )
    .unwrap();

    let back: Entry = svc.store.require(entry.id).unwrap();
    assert!(back.approved && !back.published);
    assert_eq!(back.duration_ms, entry.duration_ms);
}

#[test]
fn test_review_leaves_order_status_alone() {
    let (svc, _clock) = services();
    let c = crew(&svc);
    let order = OrderLogic::create(
        &svc,
        &c.manager,
        OrderDraft {
            title: "A".into(),
            area_id: c.area_id,
            assigned_to: c.worker.id,
            ..OrderDraft::default()
        },
    )
    .unwrap();

    ReviewLogic::set_review(
        &svc,
        &c.admin,
        ReviewKind::Order,
        order.id,
        ReviewFlags {
            approved: Some(true),
            published: Some(true),
        },
    )
    .unwrap();

    let back: Order = svc.store.require(order.id).unwrap();
    assert_eq!(back.status, OrderStatus::Planned);
    assert!(back.approved && back.published);
}

#[test]
fn test_review_needs_manager_and_a_flag() {
    let (svc, clock) = services();
    let c = crew(&svc);
    TimerLogic::start(&svc, &c.worker, c.area_id, "", false).unwrap();
    clock.advance(hours(1));
    let entry = TimerLogic::stop(&svc, &c.worker, false).unwrap().entry;

    let approve = ReviewFlags {
        approved: Some(true),
        published: None,
    };
    assert!(matches!(
        ReviewLogic::set_review(&svc, &c.worker, ReviewKind::Entry, entry.id, approve),
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        ReviewLogic::set_review(
            &svc,
            &c.manager,
            ReviewKind::Entry,
            entry.id,
            ReviewFlags::default()
        ),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        ReviewLogic::set_review(&svc, &c.manager, ReviewKind::Order, 999, approve),
        Err(AppError::NotFound { .. })
    ));
}

#[test]
fn test_review_list_is_newest_first() {
    let (svc, clock) = services();
    let c = crew(&svc);

    TimerLogic::start(&svc, &c.worker, c.area_id, "", false).unwrap();
    clock.advance(hours(1));
    TimerLogic::stop(&svc, &c.worker, false).unwrap();

    OrderLogic::create(
        &svc,
        &c.manager,
        OrderDraft {
            title: "later".into(),
            area_id: c.area_id,
            assigned_to: c.worker.id,
            start_plan: Some(at(2025, 3, 12, 9, 0)),
            ..OrderDraft::default()
        },
    )
    .unwrap();

    let items = ReviewLogic::list(&svc, &c.manager).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].kind, ReviewKind::Order);
    assert_eq!(items[1].kind, ReviewKind::Entry);
}

#[test]
fn test_review_list_orders_by_planned_start_before_real_start() {
    let (svc, clock) = services();
    let c = crew(&svc);

    TimerLogic::start(&svc, &c.worker, c.area_id, "", false).unwrap();
    clock.advance(hours(1));
    let entry = TimerLogic::stop(&svc, &c.worker, false).unwrap().entry;

    let mk = |title: &str, day: u32| {
        OrderLogic::create(
            &svc,
            &c.manager,
            OrderDraft {
                title: title.into(),
                area_id: c.area_id,
                assigned_to: c.worker.id,
                start_plan: Some(at(2025, 3, day, 9, 0)),
                ..OrderDraft::default()
            },
        )
        .unwrap()
    };
    // planned the day before, but only started after the entry was recorded
    let overdue = mk("Nachholtermin", 9);
    let upcoming = mk("Praxis", 12);
    OrderLogic::start(&svc, &c.worker, overdue.id).unwrap();

    let order: Vec<(ReviewKind, i64)> = ReviewLogic::list(&svc, &c.manager)
        .unwrap()
        .iter()
        .map(|i| (i.kind, i.id))
        .collect();
    assert_eq!(
        order,
        vec![
            (ReviewKind::Order, upcoming.id),
            (ReviewKind::Entry, entry.id),
            (ReviewKind::Order, overdue.id),
        ]
    );
}

#[test]
fn test_entry_edit_rederives_duration_and_day() {
    let (svc, clock) = services();
    let c = crew(&svc);
    TimerLogic::start(&svc, &c.worker, c.area_id, "", false).unwrap();
    clock.advance(hours(1));
    let entry = TimerLogic::stop(&svc, &c.worker, false).unwrap().entry;

    let edited = EntryLogic::edit(
        &svc,
        &c.admin,
        entry.id,
        EntryEdit {
            start: Some(at(2025, 3, 9, 14, 0)),
            end: Some(at(2025, 3, 9, 16, 30)),
            note: Some("nachgetragen".into()),
            ..EntryEdit::default()
        },
    )
    .unwrap();
    assert_eq!(edited.duration_ms, 150 * 60_000);
    assert_eq!(edited.day, chrono::NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());

    assert!(matches!(
        EntryLogic::edit(
            &svc,
            &c.admin,
            entry.id,
            EntryEdit {
                end: Some(at(2025, 3, 9, 13, 0)),
                ..EntryEdit::default()
            }
        ),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        EntryLogic::edit(
            &svc,
            &c.manager,
            entry.id,
            EntryEdit {
                note: Some("x".into()),
                ..EntryEdit::default()
            }
        ),
        Err(AppError::Forbidden(_))
    ));
}

#[test]
fn test_worker_only_sees_own_entries() {
    let (svc, clock) = services();
    let c = crew(&svc);
    for who in [&c.worker, &c.other] {
        TimerLogic::start(&svc, who, c.area_id, "", false).unwrap();
        clock.advance(hours(1));
        TimerLogic::stop(&svc, who, false).unwrap();
    }

    let filter = EntryFilter {
        user_id: Some(c.other.id),
        ..EntryFilter::default()
    };
    let seen = EntryLogic::list(&svc, &c.worker, &filter).unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].user_id, c.worker.id);

    let all = EntryLogic::list(&svc, &c.manager, &EntryFilter::default()).unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].start > all[1].start);
}

#[test]
fn test_daily_totals_round_once() {
    let (svc, clock) = services();
    let c = crew(&svc);
    SettingsLogic::set(&svc, &c.manager, "rounding", "10").unwrap();

    // 1h05 + 1h10 on the same day
    for mins in [65, 70] {
        TimerLogic::start(&svc, &c.worker, c.area_id, "", false).unwrap();
        clock.advance(chrono::Duration::minutes(mins));
        TimerLogic::stop(&svc, &c.worker, false).unwrap();
    }

    let entries = EntryLogic::list(&svc, &c.manager, &EntryFilter::default()).unwrap();
    let step = SettingsLogic::load(&svc).unwrap().rounding;
    let days = daily_summaries(&entries, step);

    assert_eq!(days.len(), 1);
    assert_eq!(days[0].raw_ms, 135 * 60_000);
    assert_eq!(days[0].rounded_total_ms, 140 * 60_000);
    assert_eq!(days[0].rounded_sum_ms, 140 * 60_000);
}
