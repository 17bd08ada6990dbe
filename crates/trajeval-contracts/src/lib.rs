//! # trajeval-contracts
//!
//! Shared record types, summaries, and errors for the trajectory evaluation
//! engine.
//!
//! All crates in the workspace import from here. No evaluation logic lives in
//! this crate, only data definitions and error types.

pub mod error;
pub mod record;
pub mod result;
pub mod summary;
