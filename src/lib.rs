//! Tianji - time-based deterministic entropy signal for automated agents
//!
//! Maps a wall-clock instant onto one of six symbolic states through the
//! traditional lunar calendar and a two-hour time slot, then attaches a fixed
//! attribute profile agents can use to tune tone, temperature and risk.
//!
//! ## Components
//!
//! - **Calendar**: solar to lunar conversion behind the `LunarCalendar` trait
//! - **Engine**: index arithmetic and the constant profile table
//! - **Signal**: response assembly, fingerprint hash, next-change timestamp
//! - **API**: axum router serving `/v1/signal/now`

pub mod api;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod signal;

pub use api::{create_router, AppState};
pub use engine::{SignalEngine, SixGod};
pub use error::{Result, SignalError};
pub use signal::SignalResponse;
