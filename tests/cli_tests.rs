use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{PIN, fo, init_and_login, setup_session, setup_test_db, temp_out};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");
    let session = setup_session("cli_init");

    fo().args(["--db", &db_path, "--session", &session, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(fs::metadata(&db_path).is_ok());
}

#[test]
fn test_commands_require_login() {
    let db_path = setup_test_db("cli_no_login");
    let session = setup_session("cli_no_login");

    fo().args(["--db", &db_path, "--session", &session, "--test", "init"])
        .assert()
        .success();

    fo().args(["--db", &db_path, "--session", &session, "area", "list"])
        .assert()
        .failure()
        .stderr(contains("not logged in"));
}

#[test]
fn test_wrong_pin_is_rejected() {
    let db_path = setup_test_db("cli_wrong_pin");
    let session = setup_session("cli_wrong_pin");
    init_and_login(&db_path, &session);

    fo().args(["--db", &db_path, "--session", &session, "login", "1", "--pin", "9999"])
        .assert()
        .failure()
        .stderr(contains("wrong PIN"));

    fo().args(["--db", &db_path, "--session", &session, "setup", "--pin", PIN])
        .assert()
        .failure()
        .stderr(contains("users already exist"));
}

#[test]
fn test_timer_roundtrip_and_entry_list() {
    let db_path = setup_test_db("cli_timer");
    let session = setup_session("cli_timer");
    init_and_login(&db_path, &session);

    fo().args(["--db", &db_path, "--session", &session, "whoami"])
        .assert()
        .success()
        .stdout(contains("Admin"));

    fo().args([
        "--db", &db_path, "--session", &session, "timer", "start", "--area", "1", "--note",
        "Treppenhaus",
    ])
    .assert()
    .success()
    .stdout(contains("Timer started"));

    fo().args([
        "--db", &db_path, "--session", &session, "timer", "start", "--area", "1",
    ])
    .assert()
    .failure()
    .stderr(contains("already running"));

    fo().args(["--db", &db_path, "--session", &session, "timer", "status"])
        .assert()
        .success()
        .stdout(contains("Running since"));

    fo().args(["--db", &db_path, "--session", &session, "timer", "stop"])
        .assert()
        .success()
        .stdout(contains("Entry #1 recorded"));

    fo().args(["--db", &db_path, "--session", &session, "entry", "list"])
        .assert()
        .success()
        .stdout(contains("Allgemein").and(contains("Treppenhaus")));
}

#[test]
fn test_geo_notice_when_position_missing() {
    let db_path = setup_test_db("cli_geo");
    let session = setup_session("cli_geo");
    init_and_login(&db_path, &session);

    fo().args([
        "--db", &db_path, "--session", &session, "timer", "start", "--area", "1", "--geo",
    ])
    .assert()
    .success()
    .stdout(contains("Timer started"));

    fo().args([
        "--db", &db_path, "--session", &session, "--lat", "48.1", "--lon", "11.5", "timer",
        "stop", "--geo",
    ])
    .assert()
    .success()
    .stdout(contains("recorded"));
}

#[test]
fn test_order_flow() {
    let db_path = setup_test_db("cli_order");
    let session = setup_session("cli_order");
    init_and_login(&db_path, &session);

    fo().args([
        "--db",
        &db_path,
        "--session",
        &session,
        "order",
        "add",
        "--title",
        "Praxis Dr. Weber",
        "--area",
        "1",
        "--assign",
        "1",
        "--start-plan",
        "2025-03-10 09:00",
    ])
    .assert()
    .success()
    .stdout(contains("created with id 1"));

    fo().args(["--db", &db_path, "--session", &session, "order", "stop", "1"])
        .assert()
        .failure()
        .stderr(contains("has not been started"));

    fo().args(["--db", &db_path, "--session", &session, "order", "start", "1"])
        .assert()
        .success();

    fo().args(["--db", &db_path, "--session", &session, "order", "stop", "1"])
        .assert()
        .success()
        .stdout(contains("finished"));

    fo().args(["--db", &db_path, "--session", &session, "order", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Praxis Dr. Weber").and(contains("finished")));
}

#[test]
fn test_export_csv_and_force() {
    let db_path = setup_test_db("cli_export");
    let session = setup_session("cli_export");
    init_and_login(&db_path, &session);
    let out = temp_out("cli_export", "csv");

    fo().args(["--db", &db_path, "--session", &session, "timer", "start", "--area", "1"])
        .assert()
        .success();
    fo().args(["--db", &db_path, "--session", &session, "timer", "stop"])
        .assert()
        .success();

    fo().args([
        "--db", &db_path, "--session", &session, "export", "--format", "csv", "--file", &out,
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with('\u{feff}'));
    assert!(content.contains("ID;Mitarbeiter;Arbeitsbereich"));
    assert!(content.contains("\"Admin\""));

    fo().args([
        "--db", &db_path, "--session", &session, "export", "--format", "csv", "--file", &out,
    ])
    .assert()
    .failure();

    fo().args([
        "--db", &db_path, "--session", &session, "export", "--format", "csv", "--file", &out,
        "--force",
    ])
    .assert()
    .success();
}

#[test]
fn test_backup_then_restore() {
    let db_path = setup_test_db("cli_backup");
    let session = setup_session("cli_backup");
    init_and_login(&db_path, &session);
    let out = temp_out("cli_backup", "json");

    fo().args(["--db", &db_path, "--session", &session, "area", "add", "Keller"])
        .assert()
        .success();

    fo().args(["--db", &db_path, "--session", &session, "backup", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    fo().args(["--db", &db_path, "--session", &session, "area", "del", "2"])
        .assert()
        .success();

    fo().args(["--db", &db_path, "--session", &session, "restore", "--file", &out])
        .assert()
        .success();

    fo().args(["--db", &db_path, "--session", &session, "area", "list"])
        .assert()
        .success()
        .stdout(contains("Keller"));
}

#[test]
fn test_portal_prints_published_feed() {
    let db_path = setup_test_db("cli_portal");
    let session = setup_session("cli_portal");
    init_and_login(&db_path, &session);

    fo().args(["--db", &db_path, "--session", &session, "portal", "--token", "missing"])
        .assert()
        .failure()
        .stderr(contains("not found"));

    fo().args([
        "--db", &db_path, "--session", &session, "client", "add", "Praxis", "--areas", "1",
    ])
    .assert()
    .success()
    .stdout(contains("portal token"));

    fo().args(["--db", &db_path, "--session", &session, "client", "list"])
        .assert()
        .success()
        .stdout(contains("Praxis"));
}

#[test]
fn test_settings_and_review() {
    let db_path = setup_test_db("cli_settings");
    let session = setup_session("cli_settings");
    init_and_login(&db_path, &session);

    fo().args(["--db", &db_path, "--session", &session, "setting", "set", "rounding", "15"])
        .assert()
        .success();
    fo().args(["--db", &db_path, "--session", &session, "setting", "list"])
        .assert()
        .success()
        .stdout(contains("rounding = 15"));

    fo().args(["--db", &db_path, "--session", &session, "timer", "start", "--area", "1"])
        .assert()
        .success();
    fo().args(["--db", &db_path, "--session", &session, "timer", "stop"])
        .assert()
        .success();

    fo().args([
        "--db", &db_path, "--session", &session, "review", "set", "entry", "1", "--approve",
        "--publish",
    ])
    .assert()
    .success()
    .stdout(contains("entry #1"));

    fo().args([
        "--db", &db_path, "--session", &session, "review", "set", "entry", "1", "--approve",
        "--unapprove",
    ])
    .assert()
    .failure();
}
