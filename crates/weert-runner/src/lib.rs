//! WeeRT documentation example runner.
//!
//! Scans a markdown document for embedded shell commands, runs them, and
//! re-emits the document with captured output plugged back in:
//! - Pseudo-comments of the form `[//]: # (cmd)` run silently.
//! - Example lines starting with `$` run with stdout captured; JSON-looking
//!   output lines are pretty-printed before insertion.
//! - Everything else passes through unchanged.
//!
//! This is a build-time documentation tool: run it over README.md, review
//! the result, and substitute it for the original.

pub mod extract;
pub mod peek;
pub mod render;
pub mod runner;

pub use peek::PeekLines;
pub use runner::{run, RunnerError};
