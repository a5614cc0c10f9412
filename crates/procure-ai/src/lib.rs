//! Core workflows for procurement automation.
//!
//! The crate turns free-text purchase requests into structured RFP records,
//! renders and dispatches vendor emails, extracts pricing and terms from
//! vendor replies, and ranks the resulting proposals. Transport and storage
//! live behind small traits so the workflows can run against any backend.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
