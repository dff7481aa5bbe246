pub mod aggregate;
pub mod areas;
pub mod auth;
pub mod backup;
pub mod clients;
pub mod clock;
pub mod entries;
pub mod files;
pub mod geo;
pub mod log;
pub mod orders;
pub mod portal;
pub mod review;
pub mod services;
pub mod session;
pub mod settings;
pub mod sync;
pub mod tasks;
pub mod timer;
pub mod users;
