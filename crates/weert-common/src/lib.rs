//! Shared types for the WeeRT tooling crates.
//!
//! This crate provides:
//! - The `LoopPacket` observation type (a single sensor reading event)
//! - Common error types with stable error codes

pub mod error;
pub mod packet;

pub use error::{Error, Result};
pub use packet::LoopPacket;
