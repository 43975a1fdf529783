pub mod account;
pub mod common;
pub mod config;
pub mod list;
pub mod manage;
