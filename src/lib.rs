//! TuneSeek: a music search desktop client and the small backend it talks to
//!
//! The `tuneseek` binary is the egui client; `tuneseek-server` hosts the auth
//! routes and brokers catalog access so client credentials never leave it.

pub mod api;
pub mod app;
pub mod config;
pub mod constants;
pub mod models;
pub mod screens;
pub mod server;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;
