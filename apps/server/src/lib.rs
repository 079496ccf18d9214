pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
mod main_lib;

pub use main_lib::{build_state, build_state_with_fetcher, init_tracing, AppState};
