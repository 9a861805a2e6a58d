pub mod app;
pub mod chat;
pub mod config;
pub mod host;
pub mod setup;
pub mod shared;
