//! Coin Garden library crate — re-exports all modules for integration testing.
//!
//! The binary crate (`main.rs`) is the actual game entry point.
//! This library crate exposes the same modules so that `tests/` integration
//! tests can import game types, systems, and resources and drive the whole
//! simulation headlessly.

pub mod shared;
pub mod clock;
pub mod garden;
pub mod market;
pub mod bank;
pub mod mayor;
pub mod advisor;
pub mod data;
