#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use fieldops::core::auth::AuthLogic;
use fieldops::core::clock::ManualClock;
use fieldops::core::services::Services;
use fieldops::core::session::MemorySessionStore;
use fieldops::core::users::UserLogic;
use fieldops::db::store::Store;
use fieldops::models::actor::Actor;
use fieldops::models::user::Role;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

pub const PIN: &str = "1234";

pub fn fo() -> Command {
    cargo_bin_cmd!("fieldops")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_fieldops.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Session snapshot next to the test DB
pub fn setup_session(name: &str) -> String {
    temp_out(&format!("{name}_session"), "json")
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Local wall-clock time on a fixed day, as UTC.
pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("unambiguous local time")
        .with_timezone(&Utc)
}

pub fn hours(h: i64) -> Duration {
    Duration::hours(h)
}

pub type ManualClockRc = Rc<ManualClock>;

/// In-memory store with a hand-driven clock.
pub fn services() -> (Services, ManualClockRc) {
    let clock = Rc::new(ManualClock::new(at(2025, 3, 10, 8, 0)));
    let store = Store::open_in_memory().expect("in-memory store");
    let svc = Services::new(store, MemorySessionStore::new()).with_clock(clock.clone());
    (svc, clock)
}

/// Admin (executive), a staff manager, two field-workers and the default area.
pub struct Crew {
    pub admin: Actor,
    pub manager: Actor,
    pub worker: Actor,
    pub other: Actor,
    pub area_id: i64,
}

pub fn crew(svc: &Services) -> Crew {
    let admin = AuthLogic::bootstrap_admin(svc, PIN).expect("bootstrap admin");
    let admin = Actor::from(&admin);

    let add = |name: &str, role: Role| {
        Actor::from(&UserLogic::create(svc, &admin, name, role, PIN).expect("create user"))
    };
    let manager = add("Petra", Role::StaffManager);
    let worker = add("Jonas", Role::FieldWorker);
    let other = add("Mia", Role::FieldWorker);

    Crew {
        admin,
        manager,
        worker,
        other,
        // bootstrap creates "Allgemein" as the first area
        area_id: 1,
    }
}

/// `init` then `setup` on a fresh DB, then log the admin in.
pub fn init_and_login(db_path: &str, session: &str) {
    fo().args(["--db", db_path, "--session", session, "--test", "init"])
        .assert()
        .success();
    fo().args(["--db", db_path, "--session", session, "setup", "--pin", PIN])
        .assert()
        .success();
    fo().args(["--db", db_path, "--session", session, "login", "1", "--pin", PIN])
        .assert()
        .success();
}
