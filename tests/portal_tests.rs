mod common;
use chrono::{Duration, NaiveDate};
use common::{at, crew, hours, services};
use fieldops::core::areas::AreaLogic;
use fieldops::core::clients::ClientLogic;
use fieldops::core::orders::{OrderDraft, OrderLogic};
use fieldops::core::portal::PortalLogic;
use fieldops::core::review::{ReviewFlags, ReviewKind, ReviewLogic};
use fieldops::core::settings::SettingsLogic;
use fieldops::core::timer::TimerLogic;
use fieldops::errors::AppError;
use fieldops::models::collection::Collection;

const PUBLISH: ReviewFlags = ReviewFlags {
    approved: None,
    published: Some(true),
};

#[test]
fn test_feed_only_shows_published_records_of_client_areas() {
    let (svc, clock) = services();
    let c = crew(&svc);
    let hidden_area = AreaLogic::create(&svc, &c.manager, "Lager", "#333").unwrap();
    let client = ClientLogic::create(&svc, &c.manager, "Kanzlei Roth", vec![c.area_id]).unwrap();

    let mut ids = Vec::new();
    for area in [c.area_id, c.area_id, hidden_area.id] {
        TimerLogic::start(&svc, &c.worker, area, "Reinigung", false).unwrap();
        clock.advance(Duration::minutes(50));
        ids.push(TimerLogic::stop(&svc, &c.worker, false).unwrap().entry.id);
    }
    // first entry published, second not, third published but outside the client's areas
    ReviewLogic::set_review(&svc, &c.manager, ReviewKind::Entry, ids[0], PUBLISH).unwrap();
    ReviewLogic::set_review(&svc, &c.manager, ReviewKind::Entry, ids[2], PUBLISH).unwrap();

    let feed = PortalLogic::feed(&svc, &client.token, None, None).unwrap();
    assert_eq!(feed.client, "Kanzlei Roth");
    assert_eq!(feed.entries.len(), 1);
    let e = &feed.entries[0];
    assert_eq!(e.user_name, "Jonas");
    assert_eq!(e.area_name, "Allgemein");
    assert_eq!(e.duration_min, 50);
    assert_eq!(e.note, "Reinigung");
}

#[test]
fn test_feed_applies_rounding_and_date_range() {
    let (svc, clock) = services();
    let c = crew(&svc);
    let client = ClientLogic::create(&svc, &c.manager, "Praxis", vec![c.area_id]).unwrap();
    SettingsLogic::set(&svc, &c.manager, "rounding", "15").unwrap();

    TimerLogic::start(&svc, &c.worker, c.area_id, "", false).unwrap();
    clock.advance(Duration::minutes(52));
    let id = TimerLogic::stop(&svc, &c.worker, false).unwrap().entry.id;
    ReviewLogic::set_review(&svc, &c.manager, ReviewKind::Entry, id, PUBLISH).unwrap();

    let feed = PortalLogic::feed(&svc, &client.token, None, None).unwrap();
    assert_eq!(feed.entries[0].duration_min, 45);

    let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let next = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
    assert_eq!(
        PortalLogic::feed(&svc, &client.token, Some(day), Some(day))
            .unwrap()
            .entries
            .len(),
        1
    );
    assert!(
        PortalLogic::feed(&svc, &client.token, Some(next), None)
            .unwrap()
            .entries
            .is_empty()
    );
}

#[test]
fn test_feed_orders() {
    let (svc, clock) = services();
    let c = crew(&svc);
    let client = ClientLogic::create(&svc, &c.manager, "Praxis", vec![c.area_id]).unwrap();

    let mk = |title: &str, day: Option<u32>| {
        OrderLogic::create(
            &svc,
            &c.manager,
            OrderDraft {
                title: title.into(),
                area_id: c.area_id,
                assigned_to: c.worker.id,
                start_plan: day.map(|d| at(2025, 3, d, 9, 0)),
                address: Some("Ring 1".into()),
                ..OrderDraft::default()
            },
        )
        .unwrap()
    };
    let planned = mk("Praxis", Some(10));
    let unplanned = mk("Sonderreinigung", None);
    mk("Entwurf", Some(10));
    for id in [planned.id, unplanned.id] {
        ReviewLogic::set_review(&svc, &c.manager, ReviewKind::Order, id, PUBLISH).unwrap();
    }
    OrderLogic::start(&svc, &c.worker, planned.id).unwrap();
    clock.advance(hours(1));
    OrderLogic::stop(&svc, &c.worker, planned.id).unwrap();

    let feed = PortalLogic::feed(&svc, &client.token, None, None).unwrap();
    assert_eq!(feed.orders.len(), 2);
    assert!(feed.orders.iter().any(|o| o.status == "finished"));
    assert!(feed.orders.iter().all(|o| o.assigned_name == "Jonas"));

    // a date window hides unplanned orders
    let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let ranged = PortalLogic::feed(&svc, &client.token, Some(day), Some(day)).unwrap();
    assert_eq!(ranged.orders.len(), 1);
    assert_eq!(ranged.orders[0].title, "Praxis");
}

#[test]
fn test_unknown_token_is_not_found() {
    let (svc, _clock) = services();
    crew(&svc);
    match PortalLogic::feed(&svc, "nope", None, None) {
        Err(AppError::NotFound { collection, .. }) => assert_eq!(collection, Collection::Clients),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(PortalLogic::feed(&svc, "", None, None).is_err());
}
