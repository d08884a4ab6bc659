//! Common test utilities shared across integration tests

pub mod fixture;
pub mod helpers;

pub use fixture::Document;
pub use helpers::{fire_timers, move_to, press, release, run_frames};
