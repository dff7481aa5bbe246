pub mod area;
pub mod auth;
pub mod backup;
pub mod client;
pub mod config;
pub mod db;
pub mod entry;
pub mod export;
pub mod file;
pub mod init;
pub mod log;
pub mod order;
pub mod portal;
pub mod review;
pub mod setting;
pub mod task;
pub mod timer;
pub mod user;
