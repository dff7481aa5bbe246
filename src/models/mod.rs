pub mod actor;
pub mod area;
pub mod client;
pub mod collection;
pub mod day_summary;
pub mod entry;
pub mod file;
pub mod geo;
pub mod order;
pub mod setting;
pub mod task;
pub mod user;
