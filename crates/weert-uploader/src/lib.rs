//! WeeRT telemetry uploader.
//!
//! On each new loop packet, filters a handful of observation fields using
//! configured expression strings, maps field names to their WeeRT spellings,
//! and POSTs a JSON measurement body to the server's packets endpoint.
//!
//! The host-engine concerns the uploader participates in — a bounded
//! producer/consumer queue, a background worker thread, stale-packet
//! dropping, and bounded retries — live in [`queue`] and [`worker`];
//! [`Uploader`] wires them together.

pub mod body;
pub mod client;
pub mod config;
pub mod expr;
pub mod queue;
pub mod service;
pub mod worker;

pub use body::{FilterTable, MeasurementBody, PacketBuilder, Tags};
pub use client::PacketClient;
pub use config::{AuthMode, UploaderConfig};
pub use expr::FieldExpr;
pub use queue::PacketQueue;
pub use service::Uploader;
